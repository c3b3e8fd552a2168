mod app;
mod cli;
mod domain;
mod gateway;
mod infra;
mod output;
#[cfg(test)]
mod test_support;
mod usecases;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    infra::secrets::install_panic_redaction_hook();

    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return ExitCode::from(u8::try_from(error.exit_code()).unwrap_or(app::EXIT_USAGE));
        }
    };

    match app::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!(
                "deskchat: {}",
                infra::secrets::redact_text(&format!("{error:#}"))
            );
            ExitCode::from(app::exit_code_for(&error))
        }
    }
}

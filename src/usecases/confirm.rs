use std::io::{self, IsTerminal, Write};

use crate::usecases::error::QueryError;

/// Where a confirmation question is asked and answered.
pub trait ConfirmTerminal {
    fn is_interactive(&self) -> bool;
    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Asks on stderr and reads the answer from stdin, so stdout stays machine readable.
pub struct StdConfirmTerminal;

impl ConfirmTerminal for StdConfirmTerminal {
    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal() && io::stderr().is_terminal()
    }

    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stderr = io::stderr();
        write!(stderr, "{prompt}")?;
        stderr.flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_owned()))
    }
}

/// How a destructive command may proceed without asking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmPolicy {
    pub force: bool,
    pub no_input: bool,
}

/// Gates `action` behind a yes/no question unless `--force` was given.
///
/// Without a terminal to ask on, or with `--no-input`, the command is refused
/// as a usage error. A declined or unreadable answer cancels it.
pub fn confirm(
    terminal: &mut dyn ConfirmTerminal,
    policy: ConfirmPolicy,
    action: &str,
) -> Result<(), QueryError> {
    if policy.force {
        return Ok(());
    }
    if policy.no_input || !terminal.is_interactive() {
        return Err(QueryError::usage(format!(
            "refusing to {action} without confirmation; pass --force"
        )));
    }

    let answer = match terminal.prompt_line(&format!("{action}? [y/N] ")) {
        Ok(answer) => answer,
        Err(error) => {
            tracing::warn!(%error, "could not read confirmation");
            None
        }
    };

    match answer.as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("y" | "yes") => Ok(()),
        _ => Err(QueryError::Cancelled(format!("{action}: cancelled"))),
    }
}

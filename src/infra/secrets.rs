use std::panic;

const REDACTED: &str = "[REDACTED]";

const SECRET_KEYS: [&str; 4] = ["token", "authorization", "secret", "password"];

/// Scrubs bearer credentials and `key=value` secrets from free text.
pub fn redact_text(input: &str) -> String {
    let mut output = Vec::new();
    let mut redact_next = false;

    for chunk in input.split_whitespace() {
        if redact_next {
            output.push(REDACTED.to_owned());
            redact_next = false;
            continue;
        }

        if chunk.eq_ignore_ascii_case("bearer") {
            redact_next = true;
            output.push(chunk.to_owned());
            continue;
        }

        output.push(redact_assignment(chunk));
    }

    output.join(" ")
}

pub fn install_panic_redaction_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic payload omitted".to_owned());

        let scrubbed = redact_text(&payload);

        match panic_info.location() {
            Some(location) => eprintln!(
                "deskchat panic: {} at {}:{}",
                scrubbed,
                location.file(),
                location.line()
            ),
            None => eprintln!("deskchat panic: {scrubbed}"),
        }
    }));
}

fn redact_assignment(chunk: &str) -> String {
    let Some((key, _)) = chunk.split_once(['=', ':']) else {
        return chunk.to_owned();
    };

    let lowered = key.to_ascii_lowercase();
    if SECRET_KEYS.iter().any(|marker| lowered.contains(marker)) {
        format!("{key}={REDACTED}")
    } else {
        chunk.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_bearer_credentials() {
        let output = redact_text("Authorization: Bearer abc.def.ghi sent");

        assert!(!output.contains("abc.def.ghi"));
        assert!(output.ends_with("sent"));
    }

    #[test]
    fn redacts_secret_assignments() {
        let output = redact_text("token=sk-123456 url=http://localhost:23373");

        assert!(!output.contains("sk-123456"));
        assert!(output.contains("token=[REDACTED]"));
        assert!(output.contains("url=http://localhost:23373"));
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(redact_text("chat c1 not found"), "chat c1 not found");
    }
}

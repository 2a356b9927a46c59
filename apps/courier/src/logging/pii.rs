use std::fmt;

/// Mask a value that identifies a person (agent usernames, raw DB messages
/// that may echo them back).
///
/// Keeps the first character and the length class so log lines stay
/// correlatable without exposing the value itself.
pub fn redact(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        None => String::new(),
        Some(first) if chars.next().is_none() => format!("{first}***"),
        Some(first) => format!("{first}***({})", input.chars().count()),
    }
}

/// A wrapper that redacts the wrapped string when displayed.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

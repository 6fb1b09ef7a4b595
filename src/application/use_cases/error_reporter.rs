// ============================================================
// ERROR REPORTER
// ============================================================

use crate::domain::error::ParseError;
use crate::domain::views::DisplayedMessage;

pub const FAILURE_PREFIX: &str = "An error occurred while processing the CSV file";

pub const CORRECTIVE_HINT: &str =
    "Please ensure the uploaded file is a valid CSV and correctly formatted.";

/// Turn any parse failure into the message shown to the user
pub fn report(error: &ParseError) -> DisplayedMessage {
    DisplayedMessage {
        message: format!("{}: {}", FAILURE_PREFIX, error),
        hint: CORRECTIVE_HINT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_includes_diagnostic_and_hint() {
        let displayed = report(&ParseError::new("No columns to parse from file"));

        assert_eq!(
            displayed.message,
            "An error occurred while processing the CSV file: No columns to parse from file"
        );
        assert_eq!(
            displayed.hint,
            "Please ensure the uploaded file is a valid CSV and correctly formatted."
        );
    }

    #[test]
    fn test_hint_is_static() {
        let first = report(&ParseError::new("one"));
        let second = report(&ParseError::new("two"));
        assert_eq!(first.hint, second.hint);
        assert_ne!(first.message, second.message);
    }
}

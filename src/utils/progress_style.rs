use indicatif::ProgressStyle;

const SPINNER_TEMPLATE: &str = "{spinner} [{elapsed}] {wide_msg}";
const FINISHED_TEMPLATE: &str = "{wide_msg}";
const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏✔";

pub struct ProgressStyleTemplate;

impl ProgressStyleTemplate {
    pub fn spinner() -> ProgressStyle {
        ProgressStyle::with_template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(TICK_CHARS)
    }

    pub fn finished() -> ProgressStyle {
        ProgressStyle::with_template(FINISHED_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_parse() {
        assert!(ProgressStyle::with_template(SPINNER_TEMPLATE).is_ok());
        assert!(ProgressStyle::with_template(FINISHED_TEMPLATE).is_ok());
    }
}

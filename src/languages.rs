/// The language set the translation endpoints reliably support. Smaller than
/// what commercial services offer, but enough for the tool's scope.
const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("bn", "Bengali"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("hi", "Hindi"),
    ("zh", "Chinese"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
    ("ar", "Arabic"),
];

pub const DEFAULT_SOURCE_LANG: &str = "en";
pub const DEFAULT_TARGET_LANG: &str = "bn";

pub fn is_valid_code(code: &str) -> bool {
    let code = code.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .any(|(candidate, _)| candidate.eq_ignore_ascii_case(code))
}

pub fn display_name(code: &str) -> Option<&'static str> {
    let code = code.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

/// Codes in the presentation order used by language listings.
pub fn enabled_codes() -> impl Iterator<Item = &'static str> {
    SUPPORTED_LANGUAGES.iter().map(|(code, _)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_validate() {
        assert!(is_valid_code("en"));
        assert!(is_valid_code("bn"));
        assert!(is_valid_code(" AR "));
        assert!(!is_valid_code("xx"));
        assert!(!is_valid_code(""));
    }

    #[test]
    fn display_names_resolve() {
        assert_eq!(display_name("bn"), Some("Bengali"));
        assert_eq!(display_name("ja"), Some("Japanese"));
        assert_eq!(display_name("tlh"), None);
    }
}

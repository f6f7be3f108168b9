/// Crude script-range detection from the first character of the input.
/// Intentionally a heuristic: one character, five ranges, English fallback.
pub fn detect_language(text: &str) -> Option<&'static str> {
    let first = text.trim().chars().next()?;
    Some(match first {
        '\u{0980}'..='\u{09FF}' => "bn", // Bengali
        '\u{4E00}'..='\u{9FFF}' => "zh", // CJK
        '\u{0600}'..='\u{06FF}' => "ar", // Arabic
        '\u{0400}'..='\u{04FF}' => "ru", // Cyrillic
        '\u{0900}'..='\u{097F}' => "hi", // Devanagari
        _ => "en",
    })
}

#[cfg(test)]
mod tests {
    use super::detect_language;

    #[test]
    fn script_ranges_map_to_codes() {
        assert_eq!(detect_language("হ্যালো"), Some("bn"));
        assert_eq!(detect_language("你好"), Some("zh"));
        assert_eq!(detect_language("مرحبا"), Some("ar"));
        assert_eq!(detect_language("привет"), Some("ru"));
        assert_eq!(detect_language("नमस्ते"), Some("hi"));
    }

    #[test]
    fn everything_else_defaults_to_english() {
        assert_eq!(detect_language("hello"), Some("en"));
        assert_eq!(detect_language("123"), Some("en"));
        assert_eq!(detect_language("¡hola!"), Some("en"));
    }

    #[test]
    fn only_the_first_character_counts() {
        // Latin first, Bengali after: still detected as English.
        assert_eq!(detect_language("a হ্যালো"), Some("en"));
        assert_eq!(detect_language("  হ্যালো hello"), Some("bn"));
    }

    #[test]
    fn empty_input_detects_nothing() {
        assert_eq!(detect_language(""), None);
        assert_eq!(detect_language("   \n\t"), None);
    }
}

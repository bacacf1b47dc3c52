//! Free-text normalization for stored values.

use regex::Regex;
use std::sync::LazyLock;

// A word character followed by any run of non-whitespace
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w\S*").unwrap());

/// Title-case every word: first character upper case, the rest lower case.
///
/// A first character whose upper case is more than one character (`ß`) is
/// kept as is, so formatting twice gives the same text.
///
/// ```
/// use domain_hotels::format::format_text;
///
/// assert_eq!(format_text("UNITED kingdom"), "United Kingdom");
/// assert_eq!(format_text("CÔTE D'IVOIRE"), "Côte D'ivoire");
/// ```
pub fn format_text(input: &str) -> String {
    WORD.replace_all(input, |caps: &regex::Captures| {
        let word = &caps[0];
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => {
                let mut out = String::with_capacity(word.len());
                out.push(upper_single(first));
                out.push_str(&chars.as_str().to_lowercase());
                out
            }
            None => String::new(),
        }
    })
    .into_owned()
}

fn upper_single(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_cases_each_word() {
        assert_eq!(format_text("united kingdom"), "United Kingdom");
        assert_eq!(format_text("FRANCE"), "France");
    }

    #[test]
    fn test_is_idempotent() {
        let once = format_text("UNITED kingdom");
        assert_eq!(format_text(&once), once);
    }

    #[test]
    fn test_keeps_whitespace_and_leading_punctuation() {
        assert_eq!(format_text("  new   ZEALAND "), "  New   Zealand ");
        assert_eq!(format_text("(east) timor"), "(East) Timor");
    }

    #[test]
    fn test_hyphenated_word_is_one_token() {
        assert_eq!(format_text("guinea-BISSAU"), "Guinea-bissau");
    }

    #[test]
    fn test_lower_cases_accented_letters() {
        assert_eq!(format_text("CÔTE D'IVOIRE"), "Côte D'ivoire");
        assert_eq!(format_text("MÜNCHEN"), "München");
        assert_eq!(format_text("élan VITAL"), "Élan Vital");
    }

    #[test]
    fn test_is_idempotent_on_non_ascii() {
        for input in ["ßeta", "CÔTE D'IVOIRE", "ÅLAND islands", "straße"] {
            let once = format_text(input);
            assert_eq!(format_text(&once), once, "formatting {:?} twice", input);
        }
        assert_eq!(format_text("ßeta"), "ßeta");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(format_text(""), "");
    }
}

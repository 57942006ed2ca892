//! Text normalization shared by every comparison.
//!
//! Case folding is used for grading. Diacritic stripping is only used
//! for markup hints: grading stays accent-sensitive.

use std::borrow::Cow;

/// Accented Latin letters and the base letter they fold to.
const DIACRITICS: &[(char, char)] = &[
    ('à', 'a'),
    ('á', 'a'),
    ('â', 'a'),
    ('ã', 'a'),
    ('ä', 'a'),
    ('å', 'a'),
    ('æ', 'a'),
    ('ç', 'c'),
    ('é', 'e'),
    ('è', 'e'),
    ('ê', 'e'),
    ('ë', 'e'),
    ('ì', 'i'),
    ('í', 'i'),
    ('î', 'i'),
    ('ï', 'i'),
    ('ñ', 'n'),
    ('ò', 'o'),
    ('ó', 'o'),
    ('ô', 'o'),
    ('õ', 'o'),
    ('ö', 'o'),
    ('ø', 'o'),
    ('ù', 'u'),
    ('ú', 'u'),
    ('û', 'u'),
    ('ü', 'u'),
    ('ý', 'y'),
    ('ÿ', 'y'),
];

/// Entities produced by HTML special-character escaping.
const HTML_ENTITIES: &[(&str, char)] = &[
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#039;", '\''),
    ("&#39;", '\''),
    ("&#x27;", '\''),
];

/// Lowercase `s` unless the comparison is case sensitive.
///
/// Uses Unicode lowercasing, so `"ÉTÉ"` folds to `"été"`.
pub fn fold(s: &str, case_sensitive: bool) -> Cow<'_, str> {
    if case_sensitive {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(s.to_lowercase())
    }
}

/// Map a single character to its base letter, if it has one.
pub fn strip_diacritic(c: char) -> char {
    DIACRITICS
        .iter()
        .find(|(accented, _)| *accented == c)
        .map(|(_, base)| *base)
        .unwrap_or(c)
}

/// Replace accented letters from the fixed table with their base letter.
/// Characters outside the table pass through unchanged.
pub fn strip_diacritics(s: &str) -> Cow<'_, str> {
    if s.is_ascii() {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().map(strip_diacritic).collect())
}

/// Case-fold then strip diacritics from one character.
///
/// Returns a string because some characters lowercase to more than one
/// code point.
pub fn loose_char(c: char) -> String {
    c.to_lowercase().map(strip_diacritic).collect()
}

/// Decode HTML special-character entities in a single pass.
///
/// `"&amp;lt;"` decodes to `"&lt;"`, not `"<"`. Unknown entities are
/// left as they are.
pub fn decode_entities(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match HTML_ENTITIES
            .iter()
            .find(|(entity, _)| rest.starts_with(entity))
        {
            Some((entity, decoded)) => {
                out.push(*decoded);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_lowercases_when_insensitive() {
        assert_eq!(fold("Cat", false), "cat");
        assert_eq!(fold("Cat", true), "Cat");
    }

    #[test]
    fn fold_is_unicode_aware() {
        assert_eq!(fold("ÉTÉ", false), "été");
        assert_eq!(fold("ΣΟΦΙΑ", false), "σοφια");
    }

    #[test]
    fn fold_is_idempotent() {
        for word in ["Broth.", "ÇA", "already lower", "MiXeD ÀÉ"] {
            assert_eq!(fold(word, false), fold(&word.to_lowercase(), false));
        }
    }

    #[test]
    fn strip_diacritics_uses_fixed_table() {
        assert_eq!(strip_diacritics("garçon"), "garcon");
        assert_eq!(strip_diacritics("crème brûlée"), "creme brulee");
        assert_eq!(strip_diacritics("æøå"), "aoa");
        assert_eq!(strip_diacritics("ñandú"), "nandu");
    }

    #[test]
    fn strip_diacritics_passes_unknown_through() {
        // Uppercase and ligatures outside the table are untouched.
        assert_eq!(strip_diacritics("É"), "É");
        assert_eq!(strip_diacritics("œß"), "œß");
        assert_eq!(strip_diacritics("plain"), "plain");
    }

    #[test]
    fn loose_char_folds_case_and_accent() {
        assert_eq!(loose_char('É'), "e");
        assert_eq!(loose_char('Ç'), "c");
        assert_eq!(loose_char('x'), "x");
    }

    #[test]
    fn decode_entities_handles_escaping() {
        assert_eq!(decode_entities("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode_entities("&lt;b&gt;"), "<b>");
        assert_eq!(decode_entities("l&#039;eau"), "l'eau");
        assert_eq!(decode_entities("&quot;hi&quot;"), "\"hi\"");
    }

    #[test]
    fn decode_entities_is_single_pass() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn decode_entities_keeps_unknown() {
        assert_eq!(decode_entities("a & b"), "a & b");
        assert_eq!(decode_entities("&nbsp;"), "&nbsp;");
        assert_eq!(decode_entities("trailing &"), "trailing &");
    }
}

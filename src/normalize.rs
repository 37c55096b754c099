//! Driver name normalization.
//!
//! Turns display names such as "Nico Hülkenberg" or "Kimi Räikkönen" into the
//! ASCII fragments used to build headshot URLs. Accents are removed through
//! canonical decomposition, anything left that is not a word character or
//! whitespace goes through [`SUBSTITUTIONS`] and is dropped when there is no
//! entry for it.

use unicode_normalization::UnicodeNormalization;

/// Replacements for characters that survive decomposition as non-ASCII.
/// Precomposed entries are kept so the table reads as a complete Latin-1 map.
pub const SUBSTITUTIONS: &[(char, &str)] = &[
    ('À', "A"), ('Á', "A"), ('Â', "A"), ('Ã', "A"), ('Ä', "A"), ('Å', "A"), ('Æ', "AE"),
    ('Ç', "C"), ('È', "E"), ('É', "E"), ('Ê', "E"), ('Ë', "E"), ('Ì', "I"), ('Í', "I"),
    ('Î', "I"), ('Ï', "I"), ('Ð', "D"), ('Ñ', "N"), ('Ò', "O"), ('Ó', "O"), ('Ô', "O"),
    ('Õ', "O"), ('Ö', "O"), ('×', "x"), ('Ø', "O"), ('Ù', "U"), ('Ú', "U"), ('Û', "U"),
    ('Ü', "U"), ('Ý', "Y"), ('ß', "ss"), ('à', "a"), ('á', "a"), ('â', "a"), ('ã', "a"),
    ('ä', "a"), ('å', "a"), ('æ', "ae"), ('ç', "c"), ('è', "e"), ('é', "e"), ('ê', "e"),
    ('ë', "e"), ('ì', "i"), ('í', "i"), ('î', "i"), ('ï', "i"), ('ð', "d"), ('ñ', "n"),
    ('ò', "o"), ('ó', "o"), ('ô', "o"), ('õ', "o"), ('ö', "o"), ('ø', "o"), ('ù', "u"),
    ('ú', "u"), ('û', "u"), ('ü', "u"), ('ý', "y"), ('ÿ', "y"), ('Ł', "L"), ('ł', "l"),
    ('Ń', "N"), ('ń', "n"), ('Œ', "OE"), ('œ', "oe"), ('Ś', "S"), ('ś', "s"), ('Š', "S"),
    ('š', "s"), ('Ÿ', "Y"), ('Ž', "Z"), ('ž', "z"), ('ƒ', "f"), ('Ș', "S"), ('ș', "s"),
    ('Ț', "T"), ('ț', "t"),
];

const SLUG_SEPARATOR: char = '-';

fn is_combining_mark(ch: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&ch)
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn substitute(ch: char) -> Option<&'static str> {
    SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == ch)
        .map(|(_, to)| *to)
}

/// Maps a display name to ASCII word characters and whitespace.
///
/// Case is preserved. Characters with no ASCII equivalent are dropped, so a
/// name made only of such characters normalizes to an empty string.
pub fn normalize(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    for ch in name.nfd().filter(|c| !is_combining_mark(*c)) {
        if is_word_char(ch) || ch.is_whitespace() {
            normalized.push(ch);
        } else if let Some(replacement) = substitute(ch) {
            normalized.push_str(replacement);
        }
    }
    normalized
}

/// Builds the lowercase `given-family` slug for a driver.
///
/// Both halves are normalized on their own and always joined, so a name that
/// normalizes to nothing still yields a (degenerate) slug such as `"max-"`.
pub fn driver_slug(given_name: &str, family_name: &str) -> String {
    let mut slug = normalize(given_name);
    slug.push(SLUG_SEPARATOR);
    slug.push_str(&normalize(family_name));
    slug.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mapped_chars() -> Vec<char> {
        SUBSTITUTIONS.iter().map(|(from, _)| *from).collect()
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_single_characters() {
        assert_eq!(normalize("É"), "E");
        assert_eq!(normalize("Æ"), "AE");
        assert_eq!(normalize("ß"), "ss");
        assert_eq!(normalize("Ł"), "L");
        assert_eq!(normalize("ł"), "l");
        assert_eq!(normalize("Œ"), "OE");
        assert_eq!(normalize("Ø"), "O");
    }

    #[test]
    fn test_real_driver_names() {
        assert_eq!(normalize("Hülkenberg"), "Hulkenberg");
        assert_eq!(normalize("Räikkönen"), "Raikkonen");
        assert_eq!(normalize("Pérez"), "Perez");
        assert_eq!(normalize("Sergio Pérez"), "Sergio Perez");
        assert_eq!(normalize("Nyck de Vries"), "Nyck de Vries");
    }

    #[test]
    fn test_case_is_preserved() {
        assert_eq!(normalize("Max"), "Max");
        assert_eq!(normalize("ÉMILE"), "EMILE");
    }

    #[test]
    fn test_punctuation_is_dropped() {
        assert_eq!(normalize("O'Ward"), "OWard");
        assert_eq!(normalize("Jean-Éric"), "JeanEric");
        assert_eq!(normalize("Zhou."), "Zhou");
    }

    #[test]
    fn test_unmappable_name_is_empty() {
        assert_eq!(normalize("周冠宇"), "");
        assert_eq!(normalize("!?*"), "");
    }

    #[test]
    fn test_driver_slug() {
        assert_eq!(driver_slug("Max", "Verstappen"), "max-verstappen");
        assert_eq!(driver_slug("Nico", "Hülkenberg"), "nico-hulkenberg");
        assert_eq!(driver_slug("Guanyu", "Zhou"), "guanyu-zhou");
    }

    #[test]
    fn test_degenerate_slug_keeps_separator() {
        assert_eq!(driver_slug("Max", "周"), "max-");
        assert_eq!(driver_slug("", ""), "-");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_mapped_diacritics_become_ascii_words(
            chars in prop::collection::vec(prop::sample::select(mapped_chars()), 0..32),
        ) {
            let name: String = chars.into_iter().collect();
            let normalized = normalize(&name);
            for ch in normalized.chars() {
                prop_assert!(is_word_char(ch) || ch.is_whitespace(), "unexpected {:?}", ch);
                prop_assert!(!is_combining_mark(ch));
            }
        }

        #[test]
        fn prop_normalize_is_idempotent(name in "\\PC{0,24}") {
            let once = normalize(&name);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_slug_has_no_uppercase(given in "\\PC{0,12}", family in "\\PC{0,12}") {
            let slug = driver_slug(&given, &family);
            prop_assert!(slug.contains(SLUG_SEPARATOR));
            prop_assert!(!slug.chars().any(|c| c.is_ascii_uppercase()));
        }
    }
}

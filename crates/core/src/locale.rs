//! Bilingual numeral and duration formatting.
//!
//! The X-Station dashboard renders in English or Arabic. Arab-locale
//! operators expect Eastern Arabic (Arabic-Indic) digits in badge counts
//! and countdowns, so every number that reaches a notification body goes
//! through these helpers.

/// Eastern Arabic digits, indexed by the ASCII digit value.
const ARABIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Display locale for notification text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// English, Western Arabic digits.
    #[default]
    En,
    /// Arabic, Eastern Arabic digits.
    Ar,
}

impl Locale {
    /// Parse a BCP 47-ish locale tag.
    ///
    /// Any tag whose primary subtag is `ar` (case-insensitive, e.g.
    /// `"ar"`, `"ar-EG"`) maps to [`Locale::Ar`]; everything else,
    /// including the empty string, maps to [`Locale::En`].
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or("");
        if primary.eq_ignore_ascii_case("ar") {
            Locale::Ar
        } else {
            Locale::En
        }
    }
}

/// Replace ASCII digits with the locale's digit glyphs.
///
/// Non-digit characters pass through unchanged, so formatted strings
/// (`"3:20"`, `"x2"`) can be localized as a whole.
pub fn localize_digits(text: &str, locale: Locale) -> String {
    match locale {
        Locale::En => text.to_string(),
        Locale::Ar => text
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(d) => ARABIC_DIGITS[d as usize],
                None => c,
            })
            .collect(),
    }
}

/// Format a remaining-seconds value as `M:SS` with localized digits.
pub fn format_remaining(seconds: u32, locale: Locale) -> String {
    let formatted = format!("{}:{:02}", seconds / 60, seconds % 60);
    localize_digits(&formatted, locale)
}

/// Format an integer count with localized digits.
pub fn format_count(count: u64, locale: Locale) -> String {
    localize_digits(&count.to_string(), locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_tag_recognizes_arabic_variants() {
        assert_eq!(Locale::from_tag("ar"), Locale::Ar);
        assert_eq!(Locale::from_tag("ar-EG"), Locale::Ar);
        assert_eq!(Locale::from_tag("AR_SA"), Locale::Ar);
    }

    #[test]
    fn from_tag_defaults_to_english() {
        assert_eq!(Locale::from_tag("en"), Locale::En);
        assert_eq!(Locale::from_tag("en-US"), Locale::En);
        assert_eq!(Locale::from_tag(""), Locale::En);
        // "arb" is a different primary subtag, not Arabic-with-region.
        assert_eq!(Locale::from_tag("arb"), Locale::En);
    }

    #[test]
    fn localize_digits_maps_every_digit() {
        assert_eq!(localize_digits("0123456789", Locale::Ar), "٠١٢٣٤٥٦٧٨٩");
        assert_eq!(localize_digits("0123456789", Locale::En), "0123456789");
    }

    #[test]
    fn localize_digits_leaves_other_characters() {
        assert_eq!(localize_digits("Room 12 - x3", Locale::Ar), "Room ١٢ - x٣");
    }

    #[test]
    fn format_remaining_renders_minutes_and_seconds() {
        assert_eq!(format_remaining(200, Locale::En), "3:20");
        assert_eq!(format_remaining(59, Locale::En), "0:59");
        assert_eq!(format_remaining(0, Locale::En), "0:00");
        assert_eq!(format_remaining(200, Locale::Ar), "٣:٢٠");
    }

    #[test]
    fn format_count_localizes() {
        assert_eq!(format_count(10, Locale::En), "10");
        assert_eq!(format_count(10, Locale::Ar), "١٠");
    }
}

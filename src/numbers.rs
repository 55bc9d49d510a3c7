//! Numeral localization.
//!
//! Numbers embedded in text are re-rendered with the target language's digit
//! glyphs, and decimal numbers written in a foreign numbering system get the
//! target language's decimal separator first. Standalone numbers are
//! formatted through [`NumberFormatter`].

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::language::Language;

lazy_static! {
    /// A run of digits in any supported numbering system.
    static ref DIGIT_RUN_REGEX: Regex =
        Regex::new(r"[0-9\x{0660}-\x{0669}\x{06F0}-\x{06F9}]+").unwrap();
    static ref LATIN_DECIMAL_REGEX: Regex = Regex::new(r"([0-9]+)\.([0-9]+)").unwrap();
    static ref ARABIC_INDIC_DECIMAL_REGEX: Regex =
        Regex::new(r"([\x{0660}-\x{0669}]+),([\x{0660}-\x{0669}]+)").unwrap();
    static ref EXTENDED_ARABIC_INDIC_DECIMAL_REGEX: Regex =
        Regex::new(r"([\x{06F0}-\x{06F9}]+)\x{066B}([\x{06F0}-\x{06F9}]+)").unwrap();
}

/// A set of ten digit glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberingSystem {
    /// `0123456789`
    Latin,
    /// `٠١٢٣٤٥٦٧٨٩`
    ArabicIndic,
    /// `۰۱۲۳۴۵۶۷۸۹`
    ExtendedArabicIndic,
}

impl NumberingSystem {
    pub const ALL: [NumberingSystem; 3] = [
        NumberingSystem::Latin,
        NumberingSystem::ArabicIndic,
        NumberingSystem::ExtendedArabicIndic,
    ];

    fn zero(self) -> char {
        match self {
            NumberingSystem::Latin => '0',
            NumberingSystem::ArabicIndic => '\u{0660}',
            NumberingSystem::ExtendedArabicIndic => '\u{06F0}',
        }
    }

    /// The glyph for `value` (0-9) in this system.
    pub fn digit(self, value: u32) -> Option<char> {
        if value > 9 {
            return None;
        }
        char::from_u32(self.zero() as u32 + value)
    }

    /// The numeric value of `glyph` if it is a digit of this system.
    pub fn digit_value(self, glyph: char) -> Option<u32> {
        let offset = (glyph as u32).checked_sub(self.zero() as u32)?;
        (offset <= 9).then_some(offset)
    }

    /// Finds the system `glyph` belongs to, along with its value.
    pub fn classify(glyph: char) -> Option<(NumberingSystem, u32)> {
        NumberingSystem::ALL
            .into_iter()
            .find_map(|system| system.digit_value(glyph).map(|value| (system, value)))
    }

    /// The decimal separator conventionally written between digits of this system.
    pub fn decimal_separator(self) -> char {
        match self {
            NumberingSystem::Latin => '.',
            NumberingSystem::ArabicIndic => ',',
            NumberingSystem::ExtendedArabicIndic => '\u{066B}',
        }
    }

    fn decimal_regex(self) -> &'static Regex {
        match self {
            NumberingSystem::Latin => &LATIN_DECIMAL_REGEX,
            NumberingSystem::ArabicIndic => &ARABIC_INDIC_DECIMAL_REGEX,
            NumberingSystem::ExtendedArabicIndic => &EXTENDED_ARABIC_INDIC_DECIMAL_REGEX,
        }
    }

    /// Rewrites every digit in `digits` into this system. Non-digit characters are kept.
    pub fn transliterate(self, digits: &str) -> String {
        digits
            .chars()
            .map(|glyph| {
                NumberingSystem::classify(glyph)
                    .and_then(|(_, value)| self.digit(value))
                    .unwrap_or(glyph)
            })
            .collect()
    }
}

/// Localizes every number inside `text` for `language`.
///
/// Text that contains no digits is returned unchanged. A digit run mixing
/// numbering systems is not a numeral in any language and is left as-is.
pub fn localize_numbers(text: &str, language: Language) -> String {
    let target = language.numbering_system();
    let separator = language.decimal_separator();

    let mut prepared = text.to_string();
    for system in NumberingSystem::ALL {
        if system == target {
            continue;
        }
        prepared = system
            .decimal_regex()
            .replace_all(&prepared, |caps: &Captures| {
                format!("{}{}{}", &caps[1], separator, &caps[2])
            })
            .into_owned();
    }

    let mut rendered: HashMap<&str, String> = HashMap::new();
    for found in DIGIT_RUN_REGEX.find_iter(&prepared) {
        let run = found.as_str();
        if rendered.contains_key(run) {
            continue;
        }
        if let Some(localized) = render_digit_run(run, target) {
            rendered.insert(run, localized);
        }
    }

    DIGIT_RUN_REGEX
        .replace_all(&prepared, |caps: &Captures| {
            let run = &caps[0];
            rendered
                .get(run)
                .cloned()
                .unwrap_or_else(|| run.to_string())
        })
        .into_owned()
}

fn render_digit_run(run: &str, target: NumberingSystem) -> Option<String> {
    let mut source = None;
    let mut out = String::with_capacity(run.len());
    for glyph in run.chars() {
        let (system, value) = NumberingSystem::classify(glyph)?;
        match source {
            None => source = Some(system),
            Some(seen) if seen != system => return None,
            Some(_) => {}
        }
        out.push(target.digit(value)?);
    }
    Some(out)
}

/// How [`NumberFormatter`] lays out the integer part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberStyle {
    /// Digits only, e.g. `1234.5`.
    #[default]
    Plain,
    /// Digits with grouping separators, e.g. `1,234.5`.
    Decimal,
}

/// Formats and parses numbers using a language's digits and separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormatter {
    language: Language,
    style: NumberStyle,
    fraction_digits: Option<usize>,
}

impl NumberFormatter {
    pub fn new(language: Language) -> Self {
        NumberFormatter {
            language,
            style: NumberStyle::default(),
            fraction_digits: None,
        }
    }

    pub fn with_style(mut self, style: NumberStyle) -> Self {
        self.style = style;
        self
    }

    /// Fixes the number of digits after the decimal separator for floats.
    pub fn with_fraction_digits(mut self, fraction_digits: Option<usize>) -> Self {
        self.fraction_digits = fraction_digits;
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn format_integer(&self, value: i64) -> String {
        let digits = value.unsigned_abs().to_string();
        let mut out = String::new();
        if value < 0 {
            out.push('-');
        }
        out.push_str(&self.render_integer_part(&digits));
        out
    }

    pub fn format_float(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value.is_sign_negative() { "-∞" } else { "∞" }.to_string();
        }

        let latin = match self.fraction_digits {
            Some(precision) => format!("{:.*}", precision, value.abs()),
            None => format!("{}", value.abs()),
        };
        let (integer, fraction) = match latin.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (latin.as_str(), None),
        };

        let mut out = String::new();
        if value.is_sign_negative() && value != 0.0 {
            out.push('-');
        }
        out.push_str(&self.render_integer_part(integer));
        if let Some(fraction) = fraction {
            out.push(self.language.decimal_separator());
            out.push_str(&self.language.numbering_system().transliterate(fraction));
        }
        out
    }

    /// Parses a numeral written in this formatter's language (digits of any
    /// system are accepted). Returns `None` for anything that is not a number.
    pub fn parse(&self, text: &str) -> Option<f64> {
        let decimal = self.language.decimal_separator();
        let grouping = self.language.grouping_separator();
        let mut latin = String::with_capacity(text.len());
        let mut seen_digit = false;
        let mut seen_decimal = false;

        for (index, glyph) in text.trim().chars().enumerate() {
            if let Some((_, value)) = NumberingSystem::classify(glyph) {
                seen_digit = true;
                latin.push(char::from_digit(value, 10)?);
            } else if glyph == decimal && !seen_decimal {
                seen_decimal = true;
                latin.push('.');
            } else if glyph == grouping && self.style == NumberStyle::Decimal && !seen_decimal {
                continue;
            } else if glyph == '-' && index == 0 {
                latin.push('-');
            } else {
                return None;
            }
        }

        if !seen_digit {
            return None;
        }
        latin.parse().ok()
    }

    fn render_integer_part(&self, latin_digits: &str) -> String {
        let system = self.language.numbering_system();
        let localized = system.transliterate(latin_digits);
        match self.style {
            NumberStyle::Plain => localized,
            NumberStyle::Decimal => group_digits(&localized, self.language.grouping_separator()),
        }
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let glyphs: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(digits.len() + glyphs.len() / 3);
    for (index, glyph) in glyphs.iter().enumerate() {
        if index > 0 && (glyphs.len() - index) % 3 == 0 {
            out.push(separator);
        }
        out.push(*glyph);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_decimal_to_arabic() {
        assert_eq!(localize_numbers("01.10 key", Language::Ar), "٠١,١٠ key");
    }

    #[test]
    fn test_arabic_decimal_to_english() {
        assert_eq!(localize_numbers("٠١,١٠ key", Language::En), "01.10 key");
        assert_eq!(
            localize_numbers("٠١,١٠ key 01.10", Language::En),
            "01.10 key 01.10"
        );
    }

    #[test]
    fn test_mixed_input_to_arabic() {
        assert_eq!(
            localize_numbers("٠١,١٠ key 01.10", Language::Ar),
            "٠١,١٠ key ٠١,١٠"
        );
    }

    #[test]
    fn test_text_without_digits_is_unchanged() {
        assert_eq!(
            localize_numbers("latin-number-key", Language::Ar),
            "latin-number-key"
        );
        assert_eq!(localize_numbers("", Language::Ar), "");
    }

    #[test]
    fn test_mixed_numbering_run_is_left_untouched() {
        assert_eq!(localize_numbers("1٢ apples", Language::En), "1٢ apples");
    }

    #[test]
    fn test_persian_digits_and_separator() {
        assert_eq!(localize_numbers("3.5", Language::Fa), "۳٫۵");
        assert_eq!(localize_numbers("۳٫۵", Language::En), "3.5");
    }

    #[test]
    fn test_same_numbering_system_keeps_separators() {
        assert_eq!(localize_numbers("1,000.5", Language::De), "1,000.5");
    }

    #[test]
    fn test_repeated_numerals() {
        assert_eq!(localize_numbers("7 7 77 7", Language::Ar), "٧ ٧ ٧٧ ٧");
    }

    #[test]
    fn test_digit_and_classify() {
        assert_eq!(NumberingSystem::ArabicIndic.digit(3), Some('٣'));
        assert_eq!(NumberingSystem::Latin.digit(10), None);
        assert_eq!(
            NumberingSystem::classify('۹'),
            Some((NumberingSystem::ExtendedArabicIndic, 9))
        );
        assert_eq!(NumberingSystem::classify('a'), None);
    }

    #[test]
    fn test_format_integer() {
        let plain = NumberFormatter::new(Language::Ar);
        assert_eq!(plain.format_integer(1234), "١٢٣٤");
        let grouped = NumberFormatter::new(Language::En).with_style(NumberStyle::Decimal);
        assert_eq!(grouped.format_integer(1234567), "1,234,567");
        assert_eq!(grouped.format_integer(-999), "-999");
        let german = NumberFormatter::new(Language::De).with_style(NumberStyle::Decimal);
        assert_eq!(german.format_integer(1000), "1.000");
    }

    #[test]
    fn test_format_float() {
        assert_eq!(NumberFormatter::new(Language::Ar).format_float(1.5), "١,٥");
        assert_eq!(NumberFormatter::new(Language::En).format_float(-2.25), "-2.25");
        assert_eq!(
            NumberFormatter::new(Language::En)
                .with_fraction_digits(Some(1))
                .format_float(1.26),
            "1.3"
        );
        assert_eq!(NumberFormatter::new(Language::En).format_float(f64::NAN), "NaN");
    }

    #[test]
    fn test_parse() {
        assert_eq!(NumberFormatter::new(Language::Ar).parse("١,٥"), Some(1.5));
        assert_eq!(NumberFormatter::new(Language::En).parse("12.5"), Some(12.5));
        assert_eq!(
            NumberFormatter::new(Language::En)
                .with_style(NumberStyle::Decimal)
                .parse("1,234"),
            Some(1234.0)
        );
        assert_eq!(NumberFormatter::new(Language::En).parse("1.2.3"), None);
        assert_eq!(NumberFormatter::new(Language::En).parse("abc"), None);
        assert_eq!(NumberFormatter::new(Language::En).parse(""), None);
    }
}

//! Supported languages and the facts derived from them.
//!
//! A [`Language`] is an immutable identifier. Everything else (direction,
//! locale, digits, separators) is computed from it on demand.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::{error::Error, numbers::NumberingSystem};

/// Horizontal direction of text, layout and images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::LeftToRight => Direction::RightToLeft,
            Direction::RightToLeft => Direction::LeftToRight,
        }
    }

    pub fn is_right_to_left(self) -> bool {
        self == Direction::RightToLeft
    }
}

/// Text alignment of a text-bearing widget.
///
/// `Natural` follows the active language's direction and is resolved to
/// `Left` or `Right` on relocalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlignment {
    Left,
    Center,
    Right,
    Justified,
    #[default]
    Natural,
}

impl TextAlignment {
    /// Resolves `Natural` to the alignment of `language`; other values are kept.
    pub fn localized(self, language: Language) -> TextAlignment {
        match self {
            TextAlignment::Natural => language.text_alignment(),
            other => other,
        }
    }
}

/// All languages the crate knows how to switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    Ar,
    En,
    Nl,
    Ja,
    Ko,
    Vi,
    Ru,
    Sv,
    Fr,
    Es,
    Pt,
    It,
    De,
    Da,
    Fi,
    Nb,
    Tr,
    El,
    Id,
    Ms,
    Th,
    Hi,
    Hu,
    Pl,
    Cs,
    Sk,
    Uk,
    Hr,
    Ca,
    Ro,
    He,
    Ur,
    Fa,
    Ku,
    Arc,
    Sl,
    Ml,
    Am,
    EnGb,
    EnAu,
    EnCa,
    EnIn,
    FrCa,
    EsMx,
    PtBr,
    ZhHans,
    ZhHant,
    ZhHk,
    Es419,
    PtPt,
}

impl Language {
    pub const ALL: [Language; 50] = [
        Language::Ar,
        Language::En,
        Language::Nl,
        Language::Ja,
        Language::Ko,
        Language::Vi,
        Language::Ru,
        Language::Sv,
        Language::Fr,
        Language::Es,
        Language::Pt,
        Language::It,
        Language::De,
        Language::Da,
        Language::Fi,
        Language::Nb,
        Language::Tr,
        Language::El,
        Language::Id,
        Language::Ms,
        Language::Th,
        Language::Hi,
        Language::Hu,
        Language::Pl,
        Language::Cs,
        Language::Sk,
        Language::Uk,
        Language::Hr,
        Language::Ca,
        Language::Ro,
        Language::He,
        Language::Ur,
        Language::Fa,
        Language::Ku,
        Language::Arc,
        Language::Sl,
        Language::Ml,
        Language::Am,
        Language::EnGb,
        Language::EnAu,
        Language::EnCa,
        Language::EnIn,
        Language::FrCa,
        Language::EsMx,
        Language::PtBr,
        Language::ZhHans,
        Language::ZhHant,
        Language::ZhHk,
        Language::Es419,
        Language::PtPt,
    ];

    /// The identifier used for persistence and bundle directories (e.g. `en_GB`).
    pub fn identifier(self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::En => "en",
            Language::Nl => "nl",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::Vi => "vi",
            Language::Ru => "ru",
            Language::Sv => "sv",
            Language::Fr => "fr",
            Language::Es => "es",
            Language::Pt => "pt",
            Language::It => "it",
            Language::De => "de",
            Language::Da => "da",
            Language::Fi => "fi",
            Language::Nb => "nb",
            Language::Tr => "tr",
            Language::El => "el",
            Language::Id => "id",
            Language::Ms => "ms",
            Language::Th => "th",
            Language::Hi => "hi",
            Language::Hu => "hu",
            Language::Pl => "pl",
            Language::Cs => "cs",
            Language::Sk => "sk",
            Language::Uk => "uk",
            Language::Hr => "hr",
            Language::Ca => "ca",
            Language::Ro => "ro",
            Language::He => "he",
            Language::Ur => "ur",
            Language::Fa => "fa",
            Language::Ku => "ku",
            Language::Arc => "arc",
            Language::Sl => "sl",
            Language::Ml => "ml",
            Language::Am => "am",
            Language::EnGb => "en_GB",
            Language::EnAu => "en_AU",
            Language::EnCa => "en_CA",
            Language::EnIn => "en_IN",
            Language::FrCa => "fr_CA",
            Language::EsMx => "es_MX",
            Language::PtBr => "pt_BR",
            Language::ZhHans => "zh_Hans",
            Language::ZhHant => "zh_Hant",
            Language::ZhHk => "zh_HK",
            Language::Es419 => "es_419",
            Language::PtPt => "pt_PT",
        }
    }

    /// Looks up a language by exact identifier. Accepts `-` or `_` separators
    /// and any letter case (`en-gb`, `en_GB`).
    pub fn from_identifier(identifier: &str) -> Option<Language> {
        let canonical = canonical_identifier(identifier)?;
        Language::ALL
            .into_iter()
            .find(|language| language.identifier() == canonical)
    }

    /// Finds the closest supported language for an arbitrary locale string,
    /// walking `lang-Script-REGION` -> `lang-Script` -> `lang-REGION` -> `lang`.
    pub fn best_match(locale: &str) -> Option<Language> {
        let langid: LanguageIdentifier = locale.replace('_', "-").parse().ok()?;
        if let Some(exact) = Language::from_identifier(&langid.to_string()) {
            return Some(exact);
        }

        let language = langid.language.as_str();
        let mut candidates = Vec::new();
        if let Some(script) = langid.script {
            candidates.push(format!("{}_{}", language, script.as_str()));
        }
        if let Some(region) = langid.region {
            candidates.push(format!("{}_{}", language, region.as_str()));
        }
        candidates.push(language.to_string());

        candidates
            .iter()
            .find_map(|candidate| Language::from_identifier(candidate))
    }

    pub fn direction(self) -> Direction {
        match self {
            Language::Ar | Language::He | Language::Ur | Language::Fa | Language::Arc => {
                Direction::RightToLeft
            }
            _ => Direction::LeftToRight,
        }
    }

    pub fn is_right_to_left(self) -> bool {
        self.direction().is_right_to_left()
    }

    /// The locale object associated with the language, usable for dates and currency.
    pub fn locale(self) -> LanguageIdentifier {
        self.identifier()
            .replace('_', "-")
            .parse()
            .unwrap_or_default()
    }

    /// Left for left-to-right languages, right otherwise.
    pub fn text_alignment(self) -> TextAlignment {
        if self.is_right_to_left() {
            TextAlignment::Right
        } else {
            TextAlignment::Left
        }
    }

    /// The digit glyphs numbers are rendered with in this language.
    pub fn numbering_system(self) -> NumberingSystem {
        match self {
            Language::Ar => NumberingSystem::ArabicIndic,
            Language::Fa => NumberingSystem::ExtendedArabicIndic,
            _ => NumberingSystem::Latin,
        }
    }

    /// Decimal separator used in the language, e.g. `.` in English as in 12.5.
    pub fn decimal_separator(self) -> char {
        match self {
            Language::Fa => '\u{066B}',
            Language::Ar
            | Language::Nl
            | Language::Vi
            | Language::Ru
            | Language::Sv
            | Language::Fr
            | Language::Es
            | Language::Pt
            | Language::It
            | Language::De
            | Language::Da
            | Language::Fi
            | Language::Nb
            | Language::Tr
            | Language::El
            | Language::Id
            | Language::Hu
            | Language::Pl
            | Language::Cs
            | Language::Sk
            | Language::Uk
            | Language::Hr
            | Language::Ca
            | Language::Ro
            | Language::Sl
            | Language::Ku
            | Language::FrCa
            | Language::PtBr
            | Language::PtPt => ',',
            _ => '.',
        }
    }

    /// Thousands separator used in the language.
    pub fn grouping_separator(self) -> char {
        match self {
            Language::Ar | Language::Fa => '\u{066C}',
            Language::Fr
            | Language::FrCa
            | Language::Ru
            | Language::Uk
            | Language::Sv
            | Language::Nb
            | Language::Fi
            | Language::Cs
            | Language::Sk
            | Language::Pl
            | Language::Hu
            | Language::PtPt => '\u{00A0}',
            language if language.decimal_separator() == ',' => '.',
            _ => ',',
        }
    }

    pub fn all_left_to_right() -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|language| !language.is_right_to_left())
            .collect()
    }

    pub fn all_right_to_left() -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|language| language.is_right_to_left())
            .collect()
    }

    /// Every supported language except this one.
    pub fn other_languages(self) -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|language| *language != self)
            .collect()
    }
}

fn canonical_identifier(identifier: &str) -> Option<String> {
    let langid: LanguageIdentifier = identifier.trim().replace('_', "-").parse().ok()?;
    Some(langid.to_string().replace('-', "_"))
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_identifier(s).ok_or_else(|| Error::UnknownLanguage(s.to_string()))
    }
}

impl TryFrom<String> for Language {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.identifier().to_string()
    }
}

/// A language as requested by the host: a concrete language, or whatever the
/// operating system reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguagePreference {
    Device,
    Fixed(Language),
}

impl From<Language> for LanguagePreference {
    fn from(value: Language) -> Self {
        LanguagePreference::Fixed(value)
    }
}

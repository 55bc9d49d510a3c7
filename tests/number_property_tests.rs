use langswitch::{Language, NumberFormatter, NumberStyle, NumberingSystem, localize_numbers};
use proptest::prelude::*;

fn language_strategy() -> impl Strategy<Value = Language> {
    prop::sample::select(Language::ALL.to_vec())
}

fn words_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z ]{0,12}").expect("valid words regex")
}

proptest! {
    #[test]
    fn prop_text_without_digits_is_unchanged(text in words_strategy(), language in language_strategy()) {
        prop_assert_eq!(localize_numbers(&text, language), text);
    }

    #[test]
    fn prop_localizing_twice_is_stable(
        prefix in words_strategy(),
        number in 0u32..100_000,
        language in language_strategy(),
    ) {
        let text = format!("{}{}", prefix, number);
        let once = localize_numbers(&text, language);
        prop_assert_eq!(localize_numbers(&once, language), once);
    }

    #[test]
    fn prop_digits_use_target_system(number in 0u64..1_000_000_000, language in language_strategy()) {
        let localized = localize_numbers(&number.to_string(), language);
        let system = language.numbering_system();
        prop_assert!(localized.chars().all(|glyph| system.digit_value(glyph).is_some()));
        prop_assert_eq!(localized.chars().count(), number.to_string().len());
    }

    #[test]
    fn prop_round_trip_through_arabic(digits in "[0-9]{1,8}", fraction in "[0-9]{1,4}") {
        let latin = format!("{}.{}", digits, fraction);
        let arabic = localize_numbers(&latin, Language::Ar);
        prop_assert_eq!(localize_numbers(&arabic, Language::En), latin);
    }

    #[test]
    fn prop_formatter_parses_what_it_formats(value in -1_000_000i64..1_000_000, language in language_strategy()) {
        for style in [NumberStyle::Plain, NumberStyle::Decimal] {
            let formatter = NumberFormatter::new(language).with_style(style);
            let text = formatter.format_integer(value);
            prop_assert_eq!(formatter.parse(&text), Some(value as f64));
        }
    }
}

#[test]
fn test_mixed_system_run_is_left_alone() {
    let mixed = "1\u{0661}2";
    assert_eq!(localize_numbers(mixed, Language::En), mixed);
    assert_eq!(localize_numbers(mixed, Language::Fa), mixed);
}

#[test]
fn test_persian_to_arabic_separator() {
    let persian = format!(
        "{}\u{066B}{}",
        NumberingSystem::ExtendedArabicIndic.transliterate("12"),
        NumberingSystem::ExtendedArabicIndic.transliterate("5")
    );
    assert_eq!(localize_numbers(&persian, Language::Ar), "١٢,٥");
    assert_eq!(localize_numbers(&persian, Language::En), "12.5");
}

//! Runtime language switching for UI toolkits.
//!
//! Keeps the selected and default language in persistent storage, resolves
//! translations from per-language bundles, re-renders numbers in the
//! language's numerals and relocalizes component trees (text, alignment and
//! image direction) when the language changes.
//!
//! ```
//! use std::rc::Rc;
//! use langswitch::{Language, LanguageContext, bundle::{Bundle, MemoryBundles}};
//!
//! let ctx = LanguageContext::builder()
//!     .bundles(MemoryBundles::new().with_bundle(
//!         Language::Ar,
//!         Bundle::new("ar").with_table("Localizable", [("Hello", "مرحبا")]),
//!     ))
//!     .build();
//! ctx.set_default_language(Language::En).unwrap();
//! ctx.set_language(Language::Ar).unwrap();
//!
//! assert_eq!(ctx.localized("Hello").unwrap(), "مرحبا");
//! assert_eq!(ctx.numbers_localized("12").unwrap(), "١٢");
//! assert!(ctx.is_right_to_left().unwrap());
//! # let _: Rc<LanguageContext> = ctx;
//! ```

#![forbid(unsafe_code)]

pub mod bundle;
pub mod config;
pub mod context;
pub mod error;
pub mod format;
pub mod host;
pub mod language;
pub mod numbers;
pub mod relocalizer;
pub mod storage;
pub mod strings;
pub mod ui;

// Re-export most used types for easy consumption
pub use crate::{
    config::Config,
    context::{DefaultLanguageOutcome, LanguageContext, LanguageContextBuilder, ObserverId},
    error::Error,
    format::FormatArg,
    host::{HeadlessHost, Host},
    language::{Direction, Language, LanguagePreference, TextAlignment},
    numbers::{NumberFormatter, NumberStyle, NumberingSystem, localize_numbers},
    relocalizer::LanguageChange,
    storage::{FileStorage, MemoryStorage, Storage},
};

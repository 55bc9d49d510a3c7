//! A retained component model and the relocalization contract.
//!
//! Widgets implement [`Localizable`]. A walk is driven by a [`Localizer`],
//! which pins the language for the whole tree so every node sees the same one.

mod image;
mod view;
pub mod widgets;
mod window;

pub use image::Image;
pub use view::{View, Widget};
pub use window::{Snapshot, Window, WindowHandle};

use crate::{
    context::LanguageContext,
    language::{Direction, Language, TextAlignment},
};

/// Something that can re-apply translated text and direction-correct images.
pub trait Localizable {
    fn localize(&mut self, localizer: &Localizer<'_>);
}

/// The language and lookups used during one relocalization walk.
pub struct Localizer<'a> {
    context: &'a LanguageContext,
    language: Language,
}

impl<'a> Localizer<'a> {
    pub fn new(context: &'a LanguageContext, language: Language) -> Self {
        Localizer { context, language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn direction(&self) -> Direction {
        self.language.direction()
    }

    /// Translation of `text`, or `text` itself when there is none.
    pub fn text(&self, text: &str) -> String {
        self.context.localized_in(text, self.language)
    }

    pub fn alignment(&self, alignment: TextAlignment) -> TextAlignment {
        alignment.localized(self.language)
    }

    pub fn image(&self, image: &Image) -> Image {
        image.direction_localized(self.language)
    }
}

//! Text- and image-bearing widgets and how each one relocalizes.
//!
//! Every widget follows the same two rules: text is looked up as a
//! translation key and natural alignment is re-resolved; images are laid out
//! for the active direction unless the widget opts out.

use std::collections::{BTreeMap, HashMap};

use crate::{
    language::{Direction, TextAlignment},
    ui::{Image, Localizable, Localizer},
};

/// A string with attributes (font, color, ...) applying to the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributedText {
    pub string: String,
    pub attributes: HashMap<String, String>,
}

impl AttributedText {
    pub fn new(string: impl Into<String>) -> Self {
        AttributedText {
            string: string.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Same attributes, localized string.
    pub fn localized(&self, localizer: &Localizer<'_>) -> AttributedText {
        AttributedText {
            string: localizer.text(&self.string),
            attributes: self.attributes.clone(),
        }
    }
}

/// Interaction states a button can carry separate titles and images for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ControlState {
    Normal,
    Highlighted,
    Disabled,
    Selected,
    Focused,
}

fn localize_text(text: &mut Option<String>, localizer: &Localizer<'_>) {
    if let Some(value) = text.as_mut() {
        *value = localizer.text(value);
    }
}

fn localize_image(image: &mut Option<Image>, localizer: &Localizer<'_>) {
    if let Some(value) = image.as_mut() {
        *value = localizer.image(value);
    }
}

fn reset_image(image: &mut Option<Image>) {
    if let Some(value) = image.as_mut() {
        *value = value.horizontal_direction_changed(Direction::LeftToRight);
    }
}

fn revert_image(image: &mut Option<Image>) {
    if let Some(value) = image.as_mut() {
        *value = value.horizontal_direction_reverted();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Label {
    pub text: Option<String>,
    pub attributed_text: Option<AttributedText>,
    pub alignment: TextAlignment,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Label {
            text: Some(text.into()),
            ..Label::default()
        }
    }

    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl Localizable for Label {
    fn localize(&mut self, localizer: &Localizer<'_>) {
        self.alignment = localizer.alignment(self.alignment);
        localize_text(&mut self.text, localizer);
        if let Some(attributed) = self.attributed_text.as_mut() {
            *attributed = attributed.localized(localizer);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextField {
    pub text: Option<String>,
    pub placeholder: Option<String>,
    pub alignment: TextAlignment,
}

impl Localizable for TextField {
    fn localize(&mut self, localizer: &Localizer<'_>) {
        self.alignment = localizer.alignment(self.alignment);
        localize_text(&mut self.text, localizer);
        localize_text(&mut self.placeholder, localizer);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextView {
    pub text: Option<String>,
    pub alignment: TextAlignment,
}

impl Localizable for TextView {
    fn localize(&mut self, localizer: &Localizer<'_>) {
        self.alignment = localizer.alignment(self.alignment);
        localize_text(&mut self.text, localizer);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub titles: BTreeMap<ControlState, String>,
    pub attributed_titles: BTreeMap<ControlState, AttributedText>,
    pub images: BTreeMap<ControlState, Image>,
    should_localize_image_direction: bool,
}

impl Default for Button {
    fn default() -> Self {
        Button {
            titles: BTreeMap::new(),
            attributed_titles: BTreeMap::new(),
            images: BTreeMap::new(),
            should_localize_image_direction: true,
        }
    }
}

impl Button {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, state: ControlState, title: impl Into<String>) -> Self {
        self.titles.insert(state, title.into());
        self
    }

    pub fn with_image(mut self, state: ControlState, image: Image) -> Self {
        self.images.insert(state, image);
        self
    }

    pub fn should_localize_image_direction(&self) -> bool {
        self.should_localize_image_direction
    }

    /// Turning direction localization off resets every image to left-to-right.
    pub fn set_should_localize_image_direction(&mut self, enabled: bool) {
        self.should_localize_image_direction = enabled;
        if !enabled {
            for image in self.images.values_mut() {
                *image = image.horizontal_direction_changed(Direction::LeftToRight);
            }
        }
    }

    /// Flips every image to the opposite direction, whatever the language.
    pub fn revert_image_direction(&mut self) {
        for image in self.images.values_mut() {
            *image = image.horizontal_direction_reverted();
        }
    }
}

impl Localizable for Button {
    fn localize(&mut self, localizer: &Localizer<'_>) {
        for title in self.titles.values_mut() {
            *title = localizer.text(title);
        }
        for title in self.attributed_titles.values_mut() {
            *title = title.localized(localizer);
        }
        if !self.should_localize_image_direction {
            return;
        }
        for image in self.images.values_mut() {
            *image = localizer.image(image);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub image: Option<Image>,
    pub highlighted_image: Option<Image>,
    should_localize_image_direction: bool,
}

impl ImageView {
    pub fn new(image: Image) -> Self {
        ImageView {
            image: Some(image),
            highlighted_image: None,
            should_localize_image_direction: true,
        }
    }

    pub fn should_localize_image_direction(&self) -> bool {
        self.should_localize_image_direction
    }

    pub fn set_should_localize_image_direction(&mut self, enabled: bool) {
        self.should_localize_image_direction = enabled;
        if !enabled {
            reset_image(&mut self.image);
            reset_image(&mut self.highlighted_image);
        }
    }

    pub fn revert_image_direction(&mut self) {
        revert_image(&mut self.image);
        revert_image(&mut self.highlighted_image);
    }
}

impl Localizable for ImageView {
    fn localize(&mut self, localizer: &Localizer<'_>) {
        if !self.should_localize_image_direction {
            return;
        }
        localize_image(&mut self.image, localizer);
        localize_image(&mut self.highlighted_image, localizer);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabBarItem {
    pub title: Option<String>,
    pub image: Option<Image>,
    pub selected_image: Option<Image>,
    should_localize_image_direction: bool,
}

impl TabBarItem {
    pub fn new(title: impl Into<String>, image: Option<Image>) -> Self {
        TabBarItem {
            title: Some(title.into()),
            image,
            selected_image: None,
            should_localize_image_direction: true,
        }
    }

    pub fn should_localize_image_direction(&self) -> bool {
        self.should_localize_image_direction
    }

    pub fn set_should_localize_image_direction(&mut self, enabled: bool) {
        self.should_localize_image_direction = enabled;
        if !enabled {
            reset_image(&mut self.image);
            reset_image(&mut self.selected_image);
        }
    }

    pub fn revert_image_direction(&mut self) {
        revert_image(&mut self.image);
        revert_image(&mut self.selected_image);
    }
}

impl Localizable for TabBarItem {
    fn localize(&mut self, localizer: &Localizer<'_>) {
        localize_text(&mut self.title, localizer);
        if !self.should_localize_image_direction {
            return;
        }
        localize_image(&mut self.image, localizer);
        localize_image(&mut self.selected_image, localizer);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabBar {
    pub items: Vec<TabBarItem>,
    should_localize_image_direction: bool,
}

impl TabBar {
    pub fn new(items: Vec<TabBarItem>) -> Self {
        TabBar {
            items,
            should_localize_image_direction: true,
        }
    }

    pub fn should_localize_image_direction(&self) -> bool {
        self.should_localize_image_direction
    }

    /// Applies to every item.
    pub fn set_should_localize_image_direction(&mut self, enabled: bool) {
        self.should_localize_image_direction = enabled;
        for item in &mut self.items {
            item.set_should_localize_image_direction(enabled);
        }
    }

    /// Flips the images of every item.
    pub fn revert_image_direction(&mut self) {
        for item in &mut self.items {
            item.revert_image_direction();
        }
    }

    /// Flips the images of the item at `index`; out of range is ignored.
    pub fn revert_item_image_direction(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            item.revert_image_direction();
        }
    }
}

impl Localizable for TabBar {
    fn localize(&mut self, localizer: &Localizer<'_>) {
        for item in &mut self.items {
            item.should_localize_image_direction = self.should_localize_image_direction;
            item.localize(localizer);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segment {
    pub title: Option<String>,
    pub image: Option<Image>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedControl {
    pub segments: Vec<Segment>,
    should_localize_image_direction: bool,
}

impl SegmentedControl {
    pub fn new(segments: Vec<Segment>) -> Self {
        SegmentedControl {
            segments,
            should_localize_image_direction: true,
        }
    }

    pub fn should_localize_image_direction(&self) -> bool {
        self.should_localize_image_direction
    }

    pub fn set_should_localize_image_direction(&mut self, enabled: bool) {
        self.should_localize_image_direction = enabled;
        if !enabled {
            for segment in &mut self.segments {
                reset_image(&mut segment.image);
            }
        }
    }

    pub fn revert_image_direction(&mut self) {
        for segment in &mut self.segments {
            revert_image(&mut segment.image);
        }
    }
}

impl Localizable for SegmentedControl {
    fn localize(&mut self, localizer: &Localizer<'_>) {
        for segment in &mut self.segments {
            localize_text(&mut segment.title, localizer);
            if self.should_localize_image_direction {
                localize_image(&mut segment.image, localizer);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mirrored(image: &Option<Image>) -> bool {
        image.as_ref().is_some_and(Image::is_mirrored)
    }

    #[test]
    fn test_every_widget_reverts_through_the_same_name() {
        let mut image_view = ImageView::new(Image::new("arrow"));
        image_view.revert_image_direction();
        assert!(mirrored(&image_view.image));

        let mut button = Button::new().with_image(ControlState::Normal, Image::new("chevron"));
        button.revert_image_direction();
        assert!(button.images[&ControlState::Normal].is_right_to_left());

        let mut control = SegmentedControl::new(vec![Segment {
            title: None,
            image: Some(Image::new("dot")),
        }]);
        control.revert_image_direction();
        assert!(mirrored(&control.segments[0].image));
    }

    #[test]
    fn test_tab_bar_reverts_all_items_or_one() {
        let items = vec![
            TabBarItem::new("a", Some(Image::new("one"))),
            TabBarItem::new("b", Some(Image::new("two"))),
        ];
        let mut all = TabBar::new(items.clone());
        all.revert_image_direction();
        assert!(all.items.iter().all(|item| mirrored(&item.image)));

        let mut one = TabBar::new(items);
        one.revert_item_image_direction(1);
        one.revert_item_image_direction(5);
        assert!(!mirrored(&one.items[0].image));
        assert!(mirrored(&one.items[1].image));
    }

    #[test]
    fn test_disabling_direction_resets_to_left_to_right() {
        let mut bar = TabBar::new(vec![TabBarItem::new("a", Some(Image::new("one")))]);
        bar.revert_image_direction();
        bar.set_should_localize_image_direction(false);
        assert!(!bar.should_localize_image_direction());
        assert!(!mirrored(&bar.items[0].image));
        assert!(!bar.items[0].should_localize_image_direction());
    }
}

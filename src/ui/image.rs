use crate::language::{Direction, Language};

/// An image together with the horizontal direction it has been laid out for.
///
/// The direction travels with the image, so asking for the same direction
/// twice never flips twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    name: String,
    mirrored: bool,
    direction: Direction,
}

impl Image {
    /// A left-to-right, unmirrored image.
    pub fn new(name: impl Into<String>) -> Self {
        Image {
            name: name.into(),
            mirrored: false,
            direction: Direction::LeftToRight,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the image is drawn horizontally mirrored relative to its source.
    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn horizontal_direction(&self) -> Direction {
        self.direction
    }

    pub fn is_right_to_left(&self) -> bool {
        self.direction.is_right_to_left()
    }

    /// A mirrored copy; the recorded direction is unchanged.
    pub fn horizontally_flipped(&self) -> Image {
        Image {
            name: self.name.clone(),
            mirrored: !self.mirrored,
            direction: self.direction,
        }
    }

    /// A copy laid out for `direction`, flipped only if the direction differs.
    pub fn horizontal_direction_changed(&self, direction: Direction) -> Image {
        if self.direction == direction {
            return self.clone();
        }
        let mut image = self.horizontally_flipped();
        image.direction = direction;
        image
    }

    /// A copy flipped to the opposite direction.
    pub fn horizontal_direction_reverted(&self) -> Image {
        self.horizontal_direction_changed(self.direction.opposite())
    }

    /// A copy laid out for `language`'s direction.
    pub fn direction_localized(&self, language: Language) -> Image {
        self.horizontal_direction_changed(language.direction())
    }
}

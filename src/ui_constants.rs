// Layout constants shared by the shell, the list view and the cards.

/// Card width in logical pixels
pub const CARD_WIDTH: f32 = 320.0;

/// Gap between cards in the grid (both axes)
pub const CARD_GAP: f32 = 16.0;

/// Initial window size
pub const WINDOW_SIZE: [f32; 2] = [1080.0, 720.0];

pub mod spacing {
    pub const SMALL: f32 = 4.0;
    pub const MEDIUM: f32 = 8.0;
    pub const XLARGE: f32 = 24.0;
}

/// Card-specific layout constants
pub mod card {
    /// Inner margin of card frame (symmetric)
    pub const INNER_MARGIN: f32 = 8.0;

    /// Border radius of card corners
    pub const ROUNDING: f32 = 8.0;

    /// Footer plaque rounding
    pub const META_ROUNDING: f32 = 6.0;

    /// Footer plaque inner margin (horizontal)
    pub const META_MARGIN_H: f32 = 8.0;

    /// Footer plaque inner margin (vertical)
    pub const META_MARGIN_V: f32 = 6.0;
}

// Render facade for cards: re-export the implementation from views::cards::items
// so callers keep using views::cards::post_card.

pub use crate::views::cards::items::post_card;

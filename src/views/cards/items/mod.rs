// Card building blocks.
pub mod card;
mod meta_row;
pub use card::post_card;

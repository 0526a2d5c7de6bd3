mod items;
mod render;

pub use render::post_card;

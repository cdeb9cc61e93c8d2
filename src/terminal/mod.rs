pub mod events;
pub mod raw;
pub mod render;
pub mod theme;

// Terminal front end: geometry shared by hit-testing and drawing
pub mod layout;
pub mod render;

pub use render::draw;

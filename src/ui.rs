//! UI modules for mdwalk.

pub mod render;

pub use render::render;

//! Configuration modules for mdwalk, loaded from `mdwalk.toml`.

pub mod general;
pub mod keys;
pub mod load;
pub mod pager;
pub mod render;

pub use general::General;
pub use keys::Keys;
pub use load::Config;
pub use pager::PagerConfig;
pub use render::Render;

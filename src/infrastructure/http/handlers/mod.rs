//! HTTP Handlers

mod ping;
mod sample;
mod story;
mod voice;

pub use ping::*;
pub use sample::*;
pub use story::*;
pub use voice::*;

//! Icon and screenshot asset generation for the Loops extension package.
//!
//! The only non-trivial piece is [`png::encode`], a small PNG writer used by
//! every generator in this crate.

pub mod config;
pub mod error;
pub mod icon;
pub mod logger;
pub mod manifest;
pub mod pixel;
pub mod png;
pub mod screenshots;
pub mod svg;

pub use error::{Error, Result};
pub use pixel::{ColorMode, PixelBuffer};

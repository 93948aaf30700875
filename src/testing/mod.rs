//! Headless testing support.
//!
//! Use [`HeadlessSurface`] to create widgets without a terminal, script their
//! key input, and capture what they drew as plain text for snapshot-style
//! assertions.

pub mod headless;

pub use headless::{keys, HeadlessSurface};

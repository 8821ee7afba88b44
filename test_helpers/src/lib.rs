//! Test helpers shared across crates.
//!
//! This crate provides environment variable guards, scratch resource
//! directories and text comparison helpers for generated markup.

pub mod env;
pub mod resources;
pub mod text;

//! Core operations.
//!
//! This module contains the business logic for csgen commands,
//! separated from CLI argument parsing and output rendering.

pub mod bake;
pub mod check;

pub use bake::{BakeOptions, bake};
pub use check::check;

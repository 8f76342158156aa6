//! Common types used across the Sage Pay kit.

mod common;
mod sensitive;

pub use common::*;
pub use sensitive::*;

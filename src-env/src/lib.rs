//! Environment helpers locating the directory where run artefacts are written

pub mod constants;
pub mod env_utils;

pub use constants::*;
pub use env_utils::*;

//! Core types used across the crate.

mod amount;
mod common;
mod timestamp;

pub use amount::*;
pub use common::*;
pub use timestamp::*;

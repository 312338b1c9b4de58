//! Core application primitives (clock, orchestration tick)

pub mod clock;
pub mod runtime;

pub use clock::*;
pub use runtime::*;

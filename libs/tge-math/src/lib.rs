#![no_std]

pub mod cost;
pub mod invariants;
pub mod schedule;
pub mod token_math;

pub use cost::*;
pub use schedule::*;
pub use token_math::*;

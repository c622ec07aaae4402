#![doc = include_str!("../README.md")]

mod chudnovsky;
mod error;
mod limits;
mod provider;

pub use crate::chudnovsky::*;
pub use crate::error::*;
pub use crate::limits::*;
pub use crate::provider::*;

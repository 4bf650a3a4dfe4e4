#![doc = include_str!("../README.md")]

pub mod container;
pub mod error;

pub use container::TraceContainer;
pub use error::{LoadError, Result};

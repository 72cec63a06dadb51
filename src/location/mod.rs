//! Location acquisition layer

pub mod source;

pub use source::{LocationError, LocationSource};

//! Bill cut calculation.
//!
//! [`cut`] holds the calculator itself; [`common`] the rounding, parsing and
//! currency formatting shared by the models and front ends.

pub mod common;
pub mod cut;

pub use cut::{CutCalculator, days_between, summarize};

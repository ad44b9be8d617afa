pub mod calculations;
pub mod error;
pub mod models;

pub use calculations::{CutCalculator, days_between, summarize};
pub use error::CutError;
pub use models::*;

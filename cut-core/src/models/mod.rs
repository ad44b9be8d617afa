mod cut_input;
mod cut_result;

pub use cut_input::CutInput;
pub use cut_result::{CutOutcome, CutResult};

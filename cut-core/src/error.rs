use thiserror::Error;

/// Reasons a bill cannot be evaluated.
///
/// The `Display` text of each variant is the message shown to the user in
/// place of a summary.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CutError {
    /// Bill or received amount is empty or not a number.
    #[error("❗ Please enter valid Bill and Received amounts.")]
    MissingAmounts,

    /// Freight was entered but is not a number.
    #[error("❗ Please enter a valid Freight amount.")]
    InvalidFreight,

    /// Bill, freight or received is below zero.
    #[error("❗ Values cannot be negative.")]
    NegativeValue,

    /// Bill plus freight is zero, so no percentage exists.
    #[error("❗ Total (Bill + Freight) cannot be zero.")]
    ZeroTotal,

    /// An intermediate value does not fit in a `Decimal`.
    #[error("❗ Amounts are too large to calculate.")]
    Overflow,
}

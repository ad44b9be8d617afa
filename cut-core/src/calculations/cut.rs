//! Bill cut calculation.
//!
//! Compares what was billed (plus any freight) with what was actually
//! received and reports the shortfall, the "cut", as an amount and as a
//! percentage of the total.
//!
//! | Value       | Formula                          |
//! |-------------|----------------------------------|
//! | total       | bill + freight                   |
//! | cut amount  | bill - received                  |
//! | cut percent | cut amount / total × 100         |
//! | days        | today - bill date (whole days)   |
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use cut_core::{CutCalculator, CutInput, CutOutcome};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
//! let input = CutInput {
//!     bill: dec!(100),
//!     freight: dec!(0),
//!     received: dec!(80),
//!     bill_date: NaiveDate::from_ymd_opt(2025, 6, 5),
//! };
//!
//! let result = CutCalculator::new(today).calculate(&input).unwrap();
//!
//! assert_eq!(result.outcome, CutOutcome::Cut { amount: dec!(20), percent: dec!(20) });
//! assert_eq!(result.days_since_bill, Some(5));
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::{CutError, CutInput, CutOutcome, CutResult};

/// Calculator for bill cuts, evaluated as of a fixed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutCalculator {
    today: NaiveDate,
}

impl CutCalculator {
    /// Creates a calculator that counts elapsed days up to `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Evaluates one bill.
    ///
    /// # Errors
    ///
    /// - [`CutError::NegativeValue`] if bill, freight or received is below zero
    /// - [`CutError::ZeroTotal`] if bill plus freight is zero
    /// - [`CutError::Overflow`] if an intermediate value does not fit a `Decimal`
    pub fn calculate(
        &self,
        input: &CutInput,
    ) -> Result<CutResult, CutError> {
        self.check_non_negative(input)?;

        let total = self.total(input.bill, input.freight)?;
        let cut_amount = self.cut_amount(input.bill, input.received)?;
        let percent_cut = self.percent_cut(cut_amount, total)?;
        let days_since_bill = input.bill_date.map(|date| days_between(date, self.today));

        debug!(%total, %cut_amount, %percent_cut, ?days_since_bill, "bill cut calculated");

        Ok(CutResult {
            total,
            received: input.received,
            freight: input.freight,
            cut_amount,
            percent_cut,
            days_since_bill,
            outcome: CutOutcome::classify(cut_amount, percent_cut),
        })
    }

    fn check_non_negative(
        &self,
        input: &CutInput,
    ) -> Result<(), CutError> {
        let any_negative = [input.bill, input.freight, input.received]
            .iter()
            .any(|value| *value < Decimal::ZERO);

        if any_negative {
            Err(CutError::NegativeValue)
        } else {
            Ok(())
        }
    }

    /// Bill plus freight. Must be non-zero.
    fn total(
        &self,
        bill: Decimal,
        freight: Decimal,
    ) -> Result<Decimal, CutError> {
        let total = bill.checked_add(freight).ok_or(CutError::Overflow)?;
        if total.is_zero() {
            return Err(CutError::ZeroTotal);
        }
        Ok(total)
    }

    fn cut_amount(
        &self,
        bill: Decimal,
        received: Decimal,
    ) -> Result<Decimal, CutError> {
        bill.checked_sub(received).ok_or(CutError::Overflow)
    }

    fn percent_cut(
        &self,
        cut_amount: Decimal,
        total: Decimal,
    ) -> Result<Decimal, CutError> {
        cut_amount
            .checked_div(total)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or(CutError::Overflow)
    }
}

/// Whole days from `bill_date` to `today`. Negative for a future bill date.
pub fn days_between(
    bill_date: NaiveDate,
    today: NaiveDate,
) -> i64 {
    (today - bill_date).num_days()
}

/// Parses and evaluates a bill from form text, returning the text to display.
///
/// This is either the rendered [`CutResult`] summary or the validation
/// message of the [`CutError`] that stopped the calculation.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use cut_core::summarize;
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
///
/// let text = summarize("100", "", "120", None, today);
/// assert!(text.ends_with("✅ No cut, over-received by ₹20.00"));
///
/// let text = summarize("100", "0", "", None, today);
/// assert_eq!(text, "❗ Please enter valid Bill and Received amounts.");
/// ```
pub fn summarize(
    bill: &str,
    freight: &str,
    received: &str,
    bill_date: Option<NaiveDate>,
    today: NaiveDate,
) -> String {
    let result = CutInput::parse(bill, freight, received, bill_date)
        .and_then(|input| CutCalculator::new(today).calculate(&input));

    match result {
        Ok(result) => result.to_string(),
        Err(error) => {
            warn!(bill, freight, received, %error, "bill rejected");
            error.to_string()
        }
    }
}

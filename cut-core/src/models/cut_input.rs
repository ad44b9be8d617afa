use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CutError;
use crate::calculations::common::parse_amount;

/// Amounts and date describing one bill, already parsed from text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutInput {
    /// Amount billed to the customer.
    pub bill: Decimal,

    /// Freight charged on top of the bill. Zero when none.
    pub freight: Decimal,

    /// Amount actually received against the bill.
    pub received: Decimal,

    /// Date the bill was raised, if known.
    pub bill_date: Option<NaiveDate>,
}

impl CutInput {
    /// Parses the text of the bill, freight and received fields.
    ///
    /// Bill and received are required; freight defaults to zero when empty.
    /// Sign checks are left to [`CutCalculator`](crate::CutCalculator).
    ///
    /// # Errors
    ///
    /// - [`CutError::MissingAmounts`] if bill or received is empty or not a number
    /// - [`CutError::InvalidFreight`] if freight is present but not a number
    pub fn parse(
        bill: &str,
        freight: &str,
        received: &str,
        bill_date: Option<NaiveDate>,
    ) -> Result<Self, CutError> {
        let bill = required_amount(bill)?;
        let received = required_amount(received)?;
        let freight = parse_amount(freight)
            .map_err(|_| CutError::InvalidFreight)?
            .unwrap_or(Decimal::ZERO);

        Ok(Self {
            bill,
            freight,
            received,
            bill_date,
        })
    }
}

fn required_amount(s: &str) -> Result<Decimal, CutError> {
    match parse_amount(s) {
        Ok(Some(value)) => Ok(value),
        Ok(None) | Err(_) => Err(CutError::MissingAmounts),
    }
}

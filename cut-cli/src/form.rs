//! Form state for the bill cut calculator.
//!
//! Holds the raw field text the user typed, the last displayed result and the
//! calculate/refresh toggle. Nothing here outlives the session.

use std::fmt;

use chrono::NaiveDate;
use cut_core::{CutCalculator, CutInput};
use tracing::{debug, info, warn};

use crate::utils::opt_date_display;

/// Text placed in the freight field on a fresh form.
pub const DEFAULT_FREIGHT: &str = "0";

/// The bill cut form.
///
/// Calculate is enabled until a calculation succeeds; Refresh is enabled only
/// after one has. A rejected calculation shows its message but leaves
/// Calculate enabled so the input can be corrected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillCutForm {
    pub bill: String,
    pub freight: String,
    pub received: String,
    pub bill_date: Option<NaiveDate>,

    result: String,
    calculated: bool,
}

impl Default for BillCutForm {
    fn default() -> Self {
        Self::new()
    }
}

impl BillCutForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self {
            bill: String::new(),
            freight: DEFAULT_FREIGHT.to_string(),
            received: String::new(),
            bill_date: None,
            result: String::new(),
            calculated: false,
        }
    }

    pub fn set_bill(
        &mut self,
        value: impl Into<String>,
    ) {
        self.bill = value.into();
    }

    pub fn set_freight(
        &mut self,
        value: impl Into<String>,
    ) {
        self.freight = value.into();
    }

    pub fn set_received(
        &mut self,
        value: impl Into<String>,
    ) {
        self.received = value.into();
    }

    pub fn set_bill_date(
        &mut self,
        value: Option<NaiveDate>,
    ) {
        self.bill_date = value;
    }

    /// Text currently displayed under the form. Empty until Calculate is pressed.
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Check if a calculation has succeeded since the last refresh.
    pub fn is_calculated(&self) -> bool {
        self.calculated
    }

    pub fn can_calculate(&self) -> bool {
        !self.calculated
    }

    pub fn can_refresh(&self) -> bool {
        self.calculated
    }

    /// Press Calculate.
    ///
    /// Evaluates the current fields as of `today` and returns the text now
    /// displayed. Does nothing while a result is already shown.
    pub fn calculate(
        &mut self,
        today: NaiveDate,
    ) -> &str {
        if !self.can_calculate() {
            debug!("calculate ignored: result already shown");
            return &self.result;
        }

        let outcome = CutInput::parse(&self.bill, &self.freight, &self.received, self.bill_date)
            .and_then(|input| CutCalculator::new(today).calculate(&input));

        match outcome {
            Ok(result) => {
                self.result = result.to_string();
                self.calculated = true;
            }
            Err(error) => {
                warn!(%error, "calculation rejected");
                self.result = error.to_string();
            }
        }

        info!(calculated = self.calculated, "calculate pressed");
        &self.result
    }

    /// Press Refresh.
    ///
    /// Clears every field and the result. Returns `false` without changing
    /// anything if no calculation has succeeded yet.
    pub fn refresh(&mut self) -> bool {
        if !self.can_refresh() {
            debug!("refresh ignored: nothing calculated");
            return false;
        }

        *self = Self::new();
        info!("form refreshed");
        true
    }
}

impl fmt::Display for BillCutForm {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Bill:      {}", self.bill)?;
        writeln!(f, "Freight:   {}", self.freight)?;
        writeln!(f, "Received:  {}", self.received)?;
        writeln!(f, "Bill date: {}", opt_date_display(&self.bill_date))
    }
}

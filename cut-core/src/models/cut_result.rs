use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{format_percent, format_rupees};

/// Whether the customer paid short of the bill or covered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CutOutcome {
    /// Received less than billed.
    Cut {
        /// Bill minus received.
        amount: Decimal,
        /// Cut as a percentage of bill plus freight.
        percent: Decimal,
    },

    /// Received at least the billed amount. `amount` is the excess, zero
    /// when exactly the bill was paid.
    OverReceived { amount: Decimal },
}

impl CutOutcome {
    /// Classifies a cut amount. Anything not strictly positive is an over-receipt.
    pub fn classify(
        cut_amount: Decimal,
        percent_cut: Decimal,
    ) -> Self {
        if cut_amount > Decimal::ZERO {
            Self::Cut {
                amount: cut_amount,
                percent: percent_cut,
            }
        } else {
            Self::OverReceived {
                amount: cut_amount.abs(),
            }
        }
    }
}

/// Result of evaluating one bill.
///
/// `Display` renders the multi-line summary shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutResult {
    /// Bill plus freight.
    pub total: Decimal,

    /// Amount received.
    pub received: Decimal,

    /// Freight included in the total.
    pub freight: Decimal,

    /// Bill minus received. Negative when more than the bill was received.
    pub cut_amount: Decimal,

    /// `cut_amount / total * 100`, unrounded.
    pub percent_cut: Decimal,

    /// Whole days from the bill date to the evaluation date.
    pub days_since_bill: Option<i64>,

    /// Cut or over-receipt, as reported on the last summary lines.
    pub outcome: CutOutcome,
}

impl fmt::Display for CutResult {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "🧾 Total (Bill + Freight): {}", format_rupees(self.total))?;
        writeln!(f, "💸 Received: {}", format_rupees(self.received))?;

        if self.freight > Decimal::ZERO {
            writeln!(f, "🚚 Freight Included: {}", format_rupees(self.freight))?;
        } else {
            writeln!(f, "⚠️ No Freight Included")?;
        }

        if let Some(days) = self.days_since_bill {
            let unit = if days == 1 { "day" } else { "days" };
            writeln!(f, "📅 Days since bill: {days} {unit}")?;
        }

        match self.outcome {
            CutOutcome::Cut { amount, percent } => {
                writeln!(f, "🔻 Amount Cut: {}", format_rupees(amount))?;
                write!(f, "📉 Cut Percentage: {}", format_percent(percent))
            }
            CutOutcome::OverReceived { amount } => {
                write!(f, "✅ No cut, over-received by {}", format_rupees(amount))
            }
        }
    }
}

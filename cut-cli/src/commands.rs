//! Output and exit status of the non-interactive commands.
//!
//! The binary only parses arguments and loads input; everything it prints goes
//! through these functions so the text and status can be checked in tests.

use std::io::{self, Write};
use std::process::ExitCode;

use chrono::NaiveDate;
use cut_core::{CutCalculator, CutError, CutInput, CutResult};

use crate::csv_loader::BatchEntry;

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// Every bill was evaluated.
    Success,
    /// At least one bill was rejected by validation.
    Rejected,
}

impl From<CommandStatus> for ExitCode {
    fn from(status: CommandStatus) -> Self {
        match status {
            CommandStatus::Success => ExitCode::SUCCESS,
            CommandStatus::Rejected => ExitCode::FAILURE,
        }
    }
}

/// Field text for a single bill, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalcArgs {
    pub bill: String,
    pub freight: String,
    pub received: String,
    pub bill_date: Option<NaiveDate>,
}

/// Evaluate one bill and write its summary, or the validation message, to `out`.
pub fn run_calc<W: Write>(
    out: &mut W,
    args: &CalcArgs,
    today: NaiveDate,
) -> io::Result<Result<CutResult, CutError>> {
    let outcome = CutInput::parse(&args.bill, &args.freight, &args.received, args.bill_date)
        .and_then(|input| CutCalculator::new(today).calculate(&input));

    match &outcome {
        Ok(result) => writeln!(out, "{result}")?,
        Err(error) => writeln!(out, "{error}")?,
    }
    Ok(outcome)
}

/// Status for a single-bill outcome.
pub fn calc_status(outcome: &Result<CutResult, CutError>) -> CommandStatus {
    match outcome {
        Ok(_) => CommandStatus::Success,
        Err(_) => CommandStatus::Rejected,
    }
}

/// Write every batch entry followed by a one-line tally.
pub fn report_batch<W: Write>(
    out: &mut W,
    entries: &[BatchEntry],
) -> io::Result<CommandStatus> {
    for entry in entries {
        writeln!(out, "{entry}\n")?;
    }

    let rejected = entries.iter().filter(|e| e.outcome.is_err()).count();
    writeln!(out, "Evaluated {} bills ({} rejected).", entries.len(), rejected)?;

    Ok(if rejected == 0 {
        CommandStatus::Success
    } else {
        CommandStatus::Rejected
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::csv_loader;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn args(
        bill: &str,
        freight: &str,
        received: &str,
    ) -> CalcArgs {
        CalcArgs {
            bill: bill.to_string(),
            freight: freight.to_string(),
            received: received.to_string(),
            bill_date: None,
        }
    }

    // =========================================================================
    // run_calc tests
    // =========================================================================

    #[test]
    fn run_calc_prints_summary_and_succeeds() {
        let mut out = Vec::new();

        let outcome = run_calc(&mut out, &args("100", "0", "80"), today()).unwrap();

        assert_eq!(outcome.as_ref().unwrap().cut_amount, dec!(20));
        assert_eq!(calc_status(&outcome), CommandStatus::Success);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "🧾 Total (Bill + Freight): ₹100.00\n\
             💸 Received: ₹80.00\n\
             ⚠️ No Freight Included\n\
             🔻 Amount Cut: ₹20.00\n\
             📉 Cut Percentage: 20.00%\n"
        );
    }

    #[test]
    fn run_calc_prints_message_and_is_rejected() {
        let mut out = Vec::new();

        let outcome = run_calc(&mut out, &args("100", "-10", "80"), today()).unwrap();

        assert_eq!(outcome, Err(CutError::NegativeValue));
        assert_eq!(calc_status(&outcome), CommandStatus::Rejected);
        assert_eq!(String::from_utf8(out).unwrap(), "❗ Values cannot be negative.\n");
    }

    #[test]
    fn run_calc_reports_days_since_bill() {
        let mut out = Vec::new();
        let mut bill = args("100", "0", "120");
        bill.bill_date = NaiveDate::from_ymd_opt(2025, 6, 5);

        run_calc(&mut out, &bill, today()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("📅 Days since bill: 5 days\n"));
        assert!(text.contains("✅ No cut, over-received by ₹20.00\n"));
    }

    // =========================================================================
    // exit status tests
    // =========================================================================

    #[test]
    fn status_maps_to_exit_code() {
        assert_eq!(ExitCode::from(CommandStatus::Success), ExitCode::SUCCESS);
        assert_eq!(ExitCode::from(CommandStatus::Rejected), ExitCode::FAILURE);
    }

    // =========================================================================
    // report_batch tests
    // =========================================================================

    #[test]
    fn report_batch_all_valid_succeeds() {
        let rows = csv_loader::load_from_str("bill,received\n100,80\n").unwrap();
        let entries = csv_loader::evaluate(&rows, today());
        let mut out = Vec::new();

        let status = report_batch(&mut out, &entries).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(status, CommandStatus::Success);
        assert!(text.starts_with("Row 1:\n🧾 Total (Bill + Freight): ₹100.00\n"));
        assert!(text.ends_with("\n\nEvaluated 1 bills (0 rejected).\n"));
    }

    #[test]
    fn report_batch_with_rejected_row_is_rejected() {
        let rows = csv_loader::load_from_str("bill,received\n100,80\n0,0\n").unwrap();
        let entries = csv_loader::evaluate(&rows, today());
        let mut out = Vec::new();

        let status = report_batch(&mut out, &entries).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(status, CommandStatus::Rejected);
        assert!(text.contains("Row 2:\n❗ Total (Bill + Freight) cannot be zero.\n"));
        assert!(text.ends_with("Evaluated 2 bills (1 rejected).\n"));
    }
}

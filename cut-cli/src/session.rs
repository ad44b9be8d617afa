//! Interactive terminal session driving a [`BillCutForm`].
//!
//! Each input line is one command:
//!
//! | Command                  | Effect                                  |
//! |--------------------------|-----------------------------------------|
//! | `bill <amount>`          | Set the bill amount                     |
//! | `freight <amount>`       | Set the freight amount                  |
//! | `received <amount>`      | Set the received amount                 |
//! | `date <YYYY-MM-DD>`      | Set the bill date (`date clear` unsets) |
//! | `calc`                   | Press Calculate                         |
//! | `refresh`                | Press Refresh                           |
//! | `show`                   | Print the form and current result       |
//! | `help`                   | List commands                           |
//! | `quit` / `exit`          | Leave the session                       |

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::form::BillCutForm;
use crate::utils::{ParseDateError, parse_bill_date};

pub const PROMPT: &str = "> ";

const HELP: &str = "\
Commands:
  bill <amount>        set the bill amount
  freight <amount>     set the freight amount (optional)
  received <amount>    set the amount received
  date <YYYY-MM-DD>    set the bill date, or `date clear`
  calc                 calculate the cut
  refresh              clear the form after a calculation
  show                 show the form
  help                 show this help
  quit                 exit";

/// Why an input line is not a usable command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}', type `help` for a list")]
    Unknown(String),

    #[error(transparent)]
    Date(#[from] ParseDateError),
}

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bill(String),
    Freight(String),
    Received(String),
    Date(Option<NaiveDate>),
    Calculate,
    Refresh,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, arg) = line
            .split_once(char::is_whitespace)
            .map(|(w, a)| (w, a.trim()))
            .unwrap_or((line, ""));

        match word.to_ascii_lowercase().as_str() {
            "bill" => Ok(Self::Bill(arg.to_string())),
            "freight" => Ok(Self::Freight(arg.to_string())),
            "received" => Ok(Self::Received(arg.to_string())),
            "date" => match arg {
                "" | "clear" => Ok(Self::Date(None)),
                _ => Ok(Self::Date(Some(parse_bill_date(arg)?))),
            },
            "calc" | "calculate" => Ok(Self::Calculate),
            "refresh" => Ok(Self::Refresh),
            "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Interactive session over any line reader and writer.
pub struct Session<R, W> {
    input: R,
    output: W,
    form: BillCutForm,
    today: NaiveDate,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session whose day counts are relative to `today`.
    pub fn new(
        input: R,
        output: W,
        today: NaiveDate,
    ) -> Self {
        Self {
            input,
            output,
            form: BillCutForm::new(),
            today,
        }
    }

    pub fn form(&self) -> &BillCutForm {
        &self.form
    }

    /// Read and apply commands until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "💰 Bill Cut % Calculator (type `help` for commands)")?;

        let mut line = String::new();
        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(());
            }
            if line.trim().is_empty() {
                continue;
            }

            match Command::parse(&line) {
                Ok(Command::Quit) => return Ok(()),
                Ok(command) => self.apply(command)?,
                Err(error) => writeln!(self.output, "{error}")?,
            }
        }
    }

    /// Apply one command to the form and report the outcome.
    pub fn apply(
        &mut self,
        command: Command,
    ) -> io::Result<()> {
        debug!(?command, "session command");

        match command {
            Command::Bill(value) => self.form.set_bill(value),
            Command::Freight(value) => self.form.set_freight(value),
            Command::Received(value) => self.form.set_received(value),
            Command::Date(value) => self.form.set_bill_date(value),
            Command::Calculate => {
                if self.form.can_calculate() {
                    let text = self.form.calculate(self.today);
                    writeln!(self.output, "{text}")?;
                } else {
                    writeln!(self.output, "Calculate is disabled; use `refresh` to start over.")?;
                }
            }
            Command::Refresh => {
                if self.form.refresh() {
                    writeln!(self.output, "Form cleared.")?;
                } else {
                    writeln!(self.output, "Refresh is disabled until a result is shown.")?;
                }
            }
            Command::Show => {
                write!(self.output, "{}", self.form)?;
                if !self.form.result().is_empty() {
                    writeln!(self.output, "{}", self.form.result())?;
                }
            }
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Quit => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn run_script(script: &str) -> (String, BillCutForm) {
        let mut output = Vec::new();
        let mut session = Session::new(Cursor::new(script), &mut output, today());
        session.run().unwrap();
        let form = session.form().clone();
        (String::from_utf8(output).unwrap(), form)
    }

    // =========================================================================
    // Command::parse tests
    // =========================================================================

    #[test]
    fn parse_field_commands_keep_raw_text() {
        assert_eq!(Command::parse("bill 1,200.50"), Ok(Command::Bill("1,200.50".into())));
        assert_eq!(Command::parse("  Received   80 "), Ok(Command::Received("80".into())));
        assert_eq!(Command::parse("freight"), Ok(Command::Freight(String::new())));
    }

    #[test]
    fn parse_date_command() {
        assert_eq!(
            Command::parse("date 2025-06-05"),
            Ok(Command::Date(NaiveDate::from_ymd_opt(2025, 6, 5)))
        );
        assert_eq!(Command::parse("date clear"), Ok(Command::Date(None)));
        assert!(matches!(
            Command::parse("date soon"),
            Err(CommandError::Date(_))
        ));
    }

    #[test]
    fn parse_action_commands() {
        assert_eq!(Command::parse("calc"), Ok(Command::Calculate));
        assert_eq!(Command::parse("REFRESH"), Ok(Command::Refresh));
        assert_eq!(Command::parse("exit"), Ok(Command::Quit));
    }

    #[test]
    fn parse_unknown_command_is_error() {
        let result = Command::parse("print 5");

        assert_eq!(result, Err(CommandError::Unknown("print".to_string())));
        assert_eq!(
            result.unwrap_err().to_string(),
            "unknown command 'print', type `help` for a list"
        );
    }

    // =========================================================================
    // Session::run tests
    // =========================================================================

    #[test]
    fn run_calculates_cut() {
        let (output, form) = run_script("bill 100\nreceived 80\ncalc\nquit\n");

        assert!(output.contains("🔻 Amount Cut: ₹20.00\n📉 Cut Percentage: 20.00%\n"));
        assert!(form.is_calculated());
    }

    #[test]
    fn run_reports_days_since_bill() {
        let (output, _) = run_script("bill 100\nreceived 80\ndate 2025-06-05\ncalc\n");

        assert!(output.contains("📅 Days since bill: 5 days"));
    }

    #[test]
    fn run_shows_validation_message() {
        let (output, form) = run_script("bill 100\ncalc\n");

        assert!(output.contains("❗ Please enter valid Bill and Received amounts."));
        assert!(!form.is_calculated());
    }

    #[test]
    fn run_blocks_second_calculation() {
        let (output, _) = run_script("bill 100\nreceived 80\ncalc\ncalc\n");

        assert!(output.contains("Calculate is disabled"));
    }

    #[test]
    fn run_blocks_refresh_before_calculation() {
        let (output, form) = run_script("bill 100\nrefresh\n");

        assert!(output.contains("Refresh is disabled"));
        assert_eq!(form.bill, "100");
    }

    #[test]
    fn run_refresh_clears_form() {
        let (output, form) = run_script("bill 100\nreceived 120\ncalc\nrefresh\n");

        assert!(output.contains("✅ No cut, over-received by ₹20.00"));
        assert!(output.contains("Form cleared."));
        assert_eq!(form, BillCutForm::new());
    }

    #[test]
    fn run_stops_at_quit() {
        let (_, form) = run_script("quit\nbill 100\n");

        assert_eq!(form.bill, "");
    }

    #[test]
    fn run_reports_unknown_command_and_continues() {
        let (output, form) = run_script("frieght 10\nfreight 10\n");

        assert!(output.contains("unknown command 'frieght'"));
        assert_eq!(form.freight, "10");
    }
}

use chrono::NaiveDateTime;
use clap::{Args, Subcommand};
use serde_json::json;

use helperkit::dates::{self, DATE_TIME_FORMAT, DEFAULT_DATE_FORMAT};

use super::{helper_output, CmdResult, HelperOutput};

#[derive(Args)]
pub struct DateArgs {
    #[command(subcommand)]
    command: DateCommand,
}

#[derive(Subcommand)]
enum DateCommand {
    /// Whether a check date (default: now) is before, within or after a range
    Expiry {
        start: String,
        end: String,
        #[arg(long)]
        at: Option<String>,
    },
    /// Format a date with a strftime pattern
    Format {
        date: String,
        #[arg(long, default_value = DEFAULT_DATE_FORMAT)]
        format: String,
    },
    /// Human-readable difference from now or from another date
    Diff {
        date: String,
        #[arg(long)]
        from: Option<String>,
    },
    /// Whole years since a birthdate
    Age { birthdate: String },
    /// Past / future / today flags for a date
    Check { date: String },
    /// Whole days between two dates
    DaysBetween { start: String, end: String },
    /// Shift a date by a number of days (negative to go back)
    #[command(allow_negative_numbers = true)]
    AddDays { date: String, days: i64 },
    /// Start and end of the day containing a date (default: today)
    Day { date: Option<String> },
    /// Every day from start to end inclusive
    Range { start: String, end: String },
}

fn render(date: &NaiveDateTime) -> String {
    date.format(DATE_TIME_FORMAT).to_string()
}

pub fn run(args: DateArgs) -> CmdResult<HelperOutput> {
    match args.command {
        DateCommand::Expiry { start, end, at } => {
            let status = dates::check_expiry(&start, &end, at.as_deref())?;
            helper_output("date.expiry", status)
        }
        DateCommand::Format { date, format } => {
            helper_output("date.format", dates::format_date(&date, &format)?)
        }
        DateCommand::Diff { date, from } => helper_output(
            "date.diff",
            dates::diff_for_humans(&date, from.as_deref())?,
        ),
        DateCommand::Age { birthdate } => helper_output("date.age", dates::age(&birthdate)?),
        DateCommand::Check { date } => helper_output(
            "date.check",
            json!({
                "past": dates::is_past(&date)?,
                "future": dates::is_future(&date)?,
                "today": dates::is_today(&date)?,
            }),
        ),
        DateCommand::DaysBetween { start, end } => {
            helper_output("date.days-between", dates::days_between(&start, &end)?)
        }
        DateCommand::AddDays { date, days } => {
            helper_output("date.add-days", render(&dates::add_days(&date, days)?))
        }
        DateCommand::Day { date } => helper_output(
            "date.day",
            json!({
                "start": render(&dates::start_of_day(date.as_deref())?),
                "end": dates::end_of_day(date.as_deref())?
                    .format("%Y-%m-%d %H:%M:%S%.6f")
                    .to_string(),
            }),
        ),
        DateCommand::Range { start, end } => {
            let days: Vec<String> = dates::date_range(&start, &end)?
                .iter()
                .map(|d| d.format(DEFAULT_DATE_FORMAT).to_string())
                .collect();
            helper_output("date.range", days)
        }
    }
}

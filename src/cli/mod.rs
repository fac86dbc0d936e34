pub mod options;
pub mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use options::DayOptions;
use render::{render_dashboard, render_error, render_intervals, render_week, RenderOptions};
use tracing::{error, level_filters::LevelFilter};

use crate::{
    dashboard::{week_overview, Dashboard},
    utils::{
        clock::{Clock, DefaultClock},
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Dayquota", version, long_about = None)]
#[command(about = "Daily device activity and usage quota dashboard", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
    #[arg(long, help = "Also write logs into daily rotated files in this directory")]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Display quota usage and the 15 minute activity timeline of a day")]
    Show {
        #[command(flatten)]
        command: ShowCommand,
    },
    #[command(about = "Display quota usage for every day of a week")]
    Week {
        #[command(flatten)]
        command: WeekCommand,
    },
}

#[derive(Debug, clap::Args)]
pub struct ShowCommand {
    #[command(flatten)]
    day: DayOptions,
    #[arg(long, help = "Print the dashboard as json")]
    json: bool,
    #[arg(long, help = "List every interval with its time range")]
    intervals: bool,
    #[arg(long, help = "Disable colors")]
    no_color: bool,
}

#[derive(Debug, clap::Args)]
pub struct WeekCommand {
    #[command(flatten)]
    day: DayOptions,
    #[arg(long, help = "Disable colors")]
    no_color: bool,
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, args.log_dir.as_deref(), logging_level, args.log)?;

    let clock = DefaultClock;
    match args.commands {
        Commands::Show { command } => process_show_command(command, &clock),
        Commands::Week { command } => process_week_command(command, &clock),
    }
}

/// Prints the dashboard of a single day. Any failure replaces the whole dashboard with an error.
pub fn process_show_command(command: ShowCommand, clock: &impl Clock) -> Result<()> {
    let render_options = RenderOptions {
        color: !command.no_color,
    };
    let output = show_output(&command, clock).inspect_err(|e| {
        error!("Failed to build dashboard {e:?}");
        eprintln!("{}", render_error(e, render_options));
    })?;
    print!("{output}");
    Ok(())
}

fn show_output(command: &ShowCommand, clock: &impl Clock) -> Result<String> {
    let date = command.day.resolve_date(clock)?;
    let dashboard = Dashboard::load(&command.day.generator(), date)?;

    if command.json {
        return Ok(serde_json::to_string_pretty(&dashboard)? + "\n");
    }

    let mut output = render_dashboard(
        &dashboard,
        RenderOptions {
            color: !command.no_color,
        },
    );
    if command.intervals {
        output.push('\n');
        output.push_str(&render_intervals(&dashboard)?);
    }
    Ok(output)
}

pub fn process_week_command(command: WeekCommand, clock: &impl Clock) -> Result<()> {
    let render_options = RenderOptions {
        color: !command.no_color,
    };
    let week = command
        .day
        .resolve_date(clock)
        .and_then(|date| week_overview(&command.day.generator(), date))
        .inspect_err(|e| {
            error!("Failed to build week overview {e:?}");
            eprintln!("{}", render_error(e, render_options));
        })?;
    print!("{}", render_week(&week, render_options));
    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
    use clap::Parser;

    use crate::{activity::ActivityError, utils::clock::MockClock};

    use super::{process_show_command, show_output, Args, Commands};

    fn clock() -> MockClock {
        let mut clock = MockClock::new();
        clock.expect_now().returning(|| {
            Local
                .from_local_datetime(&NaiveDateTime::new(
                    NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
                    NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                ))
                .unwrap()
        });
        clock
    }

    fn show_command(args: &[&str]) -> super::ShowCommand {
        let args = Args::try_parse_from(["dayquota", "show"].iter().chain(args)).unwrap();
        match args.commands {
            Commands::Show { command } => command,
            Commands::Week { .. } => panic!("Expected show command"),
        }
    }

    #[test]
    fn test_parse_commands() {
        let args = Args::try_parse_from(["dayquota", "--log", "week", "--no-color"]).unwrap();
        assert!(args.log);
        assert!(matches!(args.commands, Commands::Week { command } if command.no_color));

        assert!(Args::try_parse_from(["dayquota"]).is_err());
        assert!(Args::try_parse_from(["dayquota", "show", "--quota", "-5"]).is_err());
    }

    #[test]
    fn test_show_plain() {
        let output = show_output(&show_command(&["--no-color", "--intervals"]), &clock()).unwrap();
        assert!(output.contains("Device activity for Sat, Mar 15 2025"));
        assert!(output.contains("Activity Timeline (15m Intervals)"));
        assert!(output.contains("23:45 - 00:00\tInactive"));
    }

    #[test]
    fn test_show_json() {
        let command = show_command(&["--json", "--date", "14/03/2025"]);
        let output = show_output(&command, &clock()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["date"], "2025-03-14");
        assert_eq!(value["record"]["intervals"].as_array().unwrap().len(), 96);
        assert_eq!(value["record"]["quota_limit_minutes"], 720);
        assert_eq!(value["buckets"].as_array().unwrap().len(), 24);
        assert_eq!(value["buckets"][23]["intervals"][3]["timestamp"], "23:45");
        assert!(value["summary"]["usage_percentage"].is_i64());
    }

    #[test]
    fn test_show_same_day_twice() {
        let command = show_command(&["--json", "--date", "14/03/2025", "--seed", "11"]);
        assert_eq!(
            show_output(&command, &clock()).unwrap(),
            show_output(&command, &clock()).unwrap()
        );
    }

    #[test]
    fn test_show_invalid_date() {
        let error = show_output(&show_command(&["--date", "not a date at all"]), &clock())
            .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<ActivityError>(),
            Some(ActivityError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_show_json_failure_exits_with_error() {
        let command = show_command(&["--json", "--no-color", "--date", "not a date at all"]);
        let error = process_show_command(command, &clock()).unwrap_err();
        assert!(error.downcast_ref::<ActivityError>().is_some());
    }
}

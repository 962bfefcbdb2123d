//! `slots` CLI — compute bookable slots and browse a host's booking page.
//!
//! ## Usage
//!
//! ```sh
//! # Candidate slots for one day, 09:00-17:00 New York, 30 minutes
//! slots generate --date 2026-03-02 --start 09:00 --end 17:00 \
//!     --host-zone America/New_York --duration 30
//!
//! # Same, shown to a viewer in Tokyo, minus busy intervals read from stdin
//! cat busy.json | slots generate --date 2026-03-02 --start 09:00 --end 17:00 \
//!     --host-zone America/New_York --viewer-zone Asia/Tokyo --duration 30 --busy -
//!
//! # Booking page for a configured host: fetch busy times and list booking links
//! slots page --config page.toml --user alice --event-type 1 --date 2026-03-02
//!
//! # Month grid, two months ahead
//! slots month --config page.toml --offset 2
//! ```
//!
//! Set `RUST_LOG=debug` for diagnostic output on stderr.

use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use booking_page::{BookingPage, DayState, HttpBusyQuery, PageConfig};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use slot_engine::{
    filter_slots_with, generate_with_policy, parse_time_of_day, parse_zone, slot_label,
    BoundaryPolicy, BusyInterval, BusyResponse, DateService, EventSpec, FixedClock, HourFormat,
    MonthNav, MonthView, SlotList, StartMatch, SystemClock, WorkingWindow,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slots", version, about = "Bookable slot calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pretend the current time is this RFC 3339 instant
    #[arg(long, global = true, value_parser = parse_instant)]
    now: Option<DateTime<Utc>>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the slots for one day and subtract busy intervals
    Generate {
        /// Day to generate slots for (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        /// Start of the working window (HH:MM, host zone)
        #[arg(long)]
        start: String,
        /// End of the working window (HH:MM, host zone)
        #[arg(long)]
        end: String,
        /// IANA zone of the host
        #[arg(long)]
        host_zone: String,
        /// IANA zone of the viewer (defaults to the host zone)
        #[arg(long)]
        viewer_zone: Option<String>,
        /// Event length in minutes
        #[arg(long, allow_negative_numbers = true)]
        duration: i64,
        /// Busy intervals as JSON: a file path, or "-" for stdin
        #[arg(long)]
        busy: Option<String>,
        /// Drop slots that would run past the end of the window
        #[arg(long)]
        fit_window: bool,
        /// Match busy starts by exact instant instead of by minute
        #[arg(long)]
        exact_start: bool,
        /// Show times on a 24-hour clock
        #[arg(long = "24h")]
        twenty_four: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show the bookable times of a configured host for one day
    Page {
        /// Page configuration file (TOML)
        #[arg(short, long)]
        config: String,
        /// Host username
        #[arg(short, long)]
        user: String,
        /// Event type id
        #[arg(short, long)]
        event_type: i64,
        /// Day to show (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the month grid; days in parentheses cannot be booked
    Month {
        /// Page configuration file (TOML); only the viewer zone is used
        #[arg(short, long)]
        config: Option<String>,
        /// Months away from the current month
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct SlotDto {
    start: String,
    local: String,
    label: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            date,
            start,
            end,
            host_zone,
            viewer_zone,
            duration,
            busy,
            fit_window,
            exact_start,
            twenty_four,
            format,
        } => {
            let host_zone = parse_zone(&host_zone)?;
            let viewer_zone = match viewer_zone {
                Some(z) => parse_zone(&z)?,
                None => host_zone,
            };
            let window = WorkingWindow {
                day_start: parse_time_of_day(&start)?,
                day_end: parse_time_of_day(&end)?,
                zone: host_zone,
            };
            let event = EventSpec {
                duration_minutes: duration,
            };
            let policy = if fit_window {
                BoundaryPolicy::FitWithinWindow
            } else {
                BoundaryPolicy::StartBeforeEnd
            };
            let rule = if exact_start {
                StartMatch::Exact
            } else {
                StartMatch::Minute
            };

            let candidates = generate_with_policy(Some(date), &window, viewer_zone, &event, policy)
                .context("Failed to generate slots")?;
            let busy = match busy {
                Some(source) => parse_busy(&read_input(&source)?)?,
                None => Vec::new(),
            };
            let slots = filter_slots_with(&candidates, &busy, rule);
            tracing::debug!(
                "{} of {} candidate slots are free",
                slots.len(),
                candidates.len()
            );

            let hour_format = if twenty_four {
                HourFormat::TwentyFour
            } else {
                HourFormat::Twelve
            };
            print_slots(&slots, hour_format, format)?;
        }
        Commands::Page {
            config,
            user,
            event_type,
            date,
            format,
        } => {
            let config = PageConfig::load(&config)
                .with_context(|| format!("Failed to load config: {}", config))?;
            let dates = date_service(cli.now, config.viewer_zone()?);
            let query = HttpBusyQuery::from_config(&config.api)?;

            let mut page = BookingPage::load(
                &config.profiles(),
                &user,
                event_type,
                dates,
                config.site.base_url.clone(),
            )
            .await
            .context("Failed to load booking page")?;
            page.set_hour_format(config.viewer.hour_format);

            if let DayState::Failed { message, .. } = page.show_day(date, &query).await? {
                bail!("{}", message);
            }

            let entries = page.entries();
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                OutputFormat::Text => {
                    println!(
                        "{} | {}",
                        page.event_type().title,
                        page.host().display_name()
                    );
                    if let Some(heading) = page.heading() {
                        println!("{}", heading);
                    }
                    if entries.is_empty() {
                        println!("No times available.");
                    }
                    for entry in &entries {
                        println!("{:<8} {}", entry.label, entry.link);
                    }
                }
            }
        }
        Commands::Month {
            config,
            offset,
            format,
        } => {
            let zone = match config {
                Some(path) => PageConfig::load(&path)
                    .with_context(|| format!("Failed to load config: {}", path))?
                    .viewer_zone()?,
                None => chrono_tz::UTC,
            };
            let dates = date_service(cli.now, zone);
            let view = MonthView::for_service(&dates, MonthNav::new(offset))?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
                OutputFormat::Text => print_month(&view),
            }
        }
    }

    Ok(())
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn date_service(now: Option<DateTime<Utc>>, zone: chrono_tz::Tz) -> DateService {
    match now {
        Some(instant) => DateService::new(FixedClock(instant), zone),
        None => DateService::new(SystemClock, zone),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    s.parse::<DateTime<Utc>>()
        .map_err(|e| format!("expected an RFC 3339 instant: {}", e))
}

/// Accept either an availability response body or a bare `[{start, end}]` array.
fn parse_busy(json: &str) -> Result<Vec<BusyInterval>> {
    if let Ok(response) = BusyResponse::from_json(json) {
        return Ok(response.into_intervals());
    }
    let list: Vec<BusyInterval> = serde_json::from_str(json)
        .context("Busy input must be an availability response or an array of {start, end}")?;
    Ok(BusyResponse::from(list).into_intervals())
}

fn print_slots(slots: &SlotList, hour_format: HourFormat, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let dtos: Vec<SlotDto> = slots
                .iter()
                .map(|s| SlotDto {
                    start: s.start.to_rfc3339(),
                    local: s.local().to_rfc3339(),
                    label: slot_label(s, hour_format),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&dtos)?);
        }
        OutputFormat::Text => {
            for slot in slots {
                println!("{:<8} {}", slot_label(slot, hour_format), slot.start.to_rfc3339());
            }
        }
    }
    Ok(())
}

fn print_month(view: &MonthView) {
    println!("{}", view.label());
    for week in view.days.chunks(7) {
        let row: Vec<String> = week
            .iter()
            .map(|d| {
                let day = d.date.format("%e").to_string();
                if d.selectable {
                    format!(" {} ", day)
                } else {
                    format!("({})", day)
                }
            })
            .collect();
        println!("{}", row.join(" ").trim_end());
    }
}

fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("Failed to read file: {}", source))
    }
}

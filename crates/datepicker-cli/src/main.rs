use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use datepicker_engine::{
    check_pattern, definitions_for, format_value, resolve, CalendarDate, Clock, ControllerBuilder,
    FixedClock, PickerConfig, PickerError, RangeGroup, RelativeRange, ResolveOptions, SelectionVariant, SystemClock,
    WeekStartDay, Zone, DEFAULT_DATE_FORMAT,
};
use log::{debug, info};
use serde_json::json;

#[derive(Parser)]
#[command(name = "datepicker", version, about = "Resolve relative date ranges and replay date-picker clicks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the relative ranges, grouped
    Ranges {
        /// Only these groups (day, week, month, quarter, year)
        #[arg(short, long = "group")]
        groups: Vec<String>,
    },
    /// Resolve one relative range to a {from, to} pair
    Resolve {
        /// Range identifier, e.g. "this_week" or "Trailing Month"
        range: String,
        #[command(flatten)]
        time: TimeArgs,
        #[arg(long, value_enum, default_value_t = WeekStart::Monday)]
        week_start: WeekStart,
    },
    /// Replay picker actions and print every emitted event as a JSON line
    Simulate {
        #[arg(long, value_enum)]
        variant: Option<Variant>,
        #[command(flatten)]
        time: TimeArgs,
        /// JSON picker configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Input-field date format (strftime)
        #[arg(long, default_value = DEFAULT_DATE_FORMAT)]
        format: String,
        /// Actions: click:YYYY-MM-DD, today, range:<id>, next, prev, submit, revert
        #[arg(required = true)]
        actions: Vec<String>,
    },
}

#[derive(clap::Args)]
struct TimeArgs {
    /// Anchor "now" (RFC 3339); defaults to the system clock
    #[arg(long)]
    at: Option<String>,
    /// IANA timezone; defaults to system local time
    #[arg(long)]
    tz: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum WeekStart {
    Monday,
    Sunday,
}

impl From<WeekStart> for WeekStartDay {
    fn from(w: WeekStart) -> Self {
        match w {
            WeekStart::Monday => WeekStartDay::Monday,
            WeekStart::Sunday => WeekStartDay::Sunday,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Variant {
    Single,
    Range,
}

impl From<Variant> for SelectionVariant {
    fn from(v: Variant) -> Self {
        match v {
            Variant::Single => SelectionVariant::Single,
            Variant::Range => SelectionVariant::Range,
        }
    }
}

/// One step of a `simulate` script.
#[derive(Debug)]
enum Action {
    Click(String),
    Today,
    Range(RelativeRange),
    Next,
    Prev,
    Submit,
    Revert,
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(date) = s.strip_prefix("click:") {
            return Ok(Action::Click(date.to_string()));
        }
        if let Some(id) = s.strip_prefix("range:") {
            return Ok(Action::Range(id.parse()?));
        }
        match s {
            "today" => Ok(Action::Today),
            "next" => Ok(Action::Next),
            "prev" => Ok(Action::Prev),
            "submit" => Ok(Action::Submit),
            "revert" => Ok(Action::Revert),
            _ => bail!("unknown action '{s}'"),
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Ranges { groups } => list_ranges(&groups),
        Command::Resolve {
            range,
            time,
            week_start,
        } => resolve_range(&range, &time, week_start.into()),
        Command::Simulate {
            variant,
            time,
            config,
            format,
            actions,
        } => simulate(variant, &time, config, &format, &actions),
    }
}

fn list_ranges(groups: &[String]) -> Result<()> {
    let groups = groups
        .iter()
        .map(|g| g.parse::<RangeGroup>())
        .collect::<Result<Vec<_>, _>>()?;
    let rows = definitions_for(&groups);
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn resolve_range(id: &str, time: &TimeArgs, week_start: WeekStartDay) -> Result<()> {
    let range: RelativeRange = id.parse()?;
    let zone = Zone::parse(time.tz.as_deref())?;
    let now = CalendarDate::from_instant(anchor(time)?.now_utc(), zone);
    debug!("resolving {range} at {now}");

    let value = resolve(range, &now, &ResolveOptions { week_start })?;
    let output = json!({
        "range": range,
        "label": range.label(),
        "timezone": zone.name(),
        "from": value.from(),
        "to": value.to(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn simulate(
    variant: Option<Variant>,
    time: &TimeArgs,
    config_path: Option<PathBuf>,
    format: &str,
    actions: &[String],
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path.display()))?;
            PickerConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => PickerConfig::default(),
    };
    if let Some(v) = variant {
        config.variant = v.into();
    }
    if time.tz.is_some() {
        config.timezone = time.tz.clone();
    }

    check_pattern(format).context("invalid --format")?;
    let actions = actions
        .iter()
        .map(|a| a.parse::<Action>())
        .collect::<Result<Vec<_>>>()?;

    // Callbacks cannot return errors, so formatting failures travel with the events.
    let events: Rc<RefCell<Vec<Result<serde_json::Value, PickerError>>>> = Rc::default();
    let changes = Rc::clone(&events);
    let months = Rc::clone(&events);
    let submits = Rc::clone(&events);
    let pattern = format.to_string();

    let mut picker = ControllerBuilder::from_config(&config)?
        .clock(anchor(time)?)
        .on_change(move |value, interaction| {
            let event = format_value(&value, &pattern).map(|text| {
                json!({
                    "event": "change",
                    "value": value,
                    "text": text,
                    "interaction": interaction,
                })
            });
            changes.borrow_mut().push(event)
        })
        .on_month_change(move |month| {
            months
                .borrow_mut()
                .push(Ok(json!({ "event": "month_change", "month": month })))
        })
        .on_submit(move || submits.borrow_mut().push(Ok(json!({ "event": "submit" }))))
        .build()?;

    info!(
        "simulating {} action(s) on a {:?} picker",
        actions.len(),
        picker.variant()
    );

    for action in actions {
        debug!("action {action:?}");
        match action {
            Action::Click(date) => {
                let date = CalendarDate::parse(&date, picker.zone())?;
                picker.click_day(date);
            }
            Action::Today => {
                picker.click_today();
            }
            Action::Range(range) => picker.apply_relative_range(range)?,
            Action::Next => picker.show_next_month(),
            Action::Prev => picker.show_previous_month(),
            Action::Submit => picker.submit(),
            Action::Revert => {
                picker.revert();
            }
        }
        let emitted: Vec<_> = events.borrow_mut().drain(..).collect();
        for event in emitted {
            println!("{}", event.context("formatting the selection")?);
        }
    }
    Ok(())
}

/// Fixed clock from `--at`, or the system clock.
fn anchor(time: &TimeArgs) -> Result<AnchorClock> {
    match time.at.as_deref() {
        Some(at) => {
            let instant = DateTime::parse_from_rfc3339(at)
                .with_context(|| format!("invalid --at '{at}'"))?
                .with_timezone(&Utc);
            Ok(AnchorClock::Fixed(FixedClock(instant)))
        }
        None => Ok(AnchorClock::System(SystemClock)),
    }
}

enum AnchorClock {
    Fixed(FixedClock),
    System(SystemClock),
}

impl Clock for AnchorClock {
    fn now_utc(&self) -> DateTime<Utc> {
        match self {
            AnchorClock::Fixed(c) => c.now_utc(),
            AnchorClock::System(c) => c.now_utc(),
        }
    }
}

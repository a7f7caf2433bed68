// Canvas Countdown
// Main entry point

use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use canvas_countdown::models::assignment::AssignmentMap;
use canvas_countdown::models::feed_source::{feed_id_from_atom_href, FeedSource};
use canvas_countdown::services::countdown::{Countdown, TerminalSink};
use canvas_countdown::services::deadline::next_due;
use canvas_countdown::services::feed::IcsFetcher;
use canvas_countdown::services::icalendar::{parse_due_date, AssignmentService};
use canvas_countdown::services::settings::SettingsService;
use canvas_countdown::utils::date::utc_to_local;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Parser)]
#[command(name = "canvas-countdown", version, about = "Countdown to your next Canvas assignment")]
struct Cli {
    /// Settings file (default: $CANVAS_COUNTDOWN_CONFIG or the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Calendar feed id, overriding the settings file
    #[arg(long, conflicts_with_all = ["atom_href", "ics"])]
    feed_id: Option<String>,

    /// Link of the "User Atom Feed (All Courses)"; the feed id is taken from it
    #[arg(long, conflicts_with = "ics")]
    atom_href: Option<String>,

    /// Read a saved .ics file instead of fetching the feed
    #[arg(long)]
    ics: Option<PathBuf>,

    /// Print every assignment in the feed and exit
    #[arg(long, conflicts_with = "once")]
    list: bool,

    /// Print the next assignment and exit
    #[arg(long)]
    once: bool,

    /// Print --list / --once output as JSON
    #[arg(long)]
    json: bool,

    /// Stop the live countdown after this many one-second ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Store the feed id from --feed-id / --atom-href in the settings file
    #[arg(long)]
    save: bool,
}

enum FeedInput {
    File(PathBuf),
    Remote { source: FeedSource, fetcher: IcsFetcher },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let settings_service = match &cli.config {
        Some(path) => SettingsService::new(path),
        None => SettingsService::from_env()?,
    };
    let mut settings = settings_service.load()?;

    if let Some(feed_id) = feed_id_from_args(&cli)? {
        settings.feed_id = Some(feed_id);
        if cli.save {
            settings_service.save(&settings)?;
            log::info!("Saved feed id to {}", settings_service.path().display());
        }
    }

    let input = match &cli.ics {
        Some(path) => FeedInput::File(path.clone()),
        None => {
            let source = settings.feed_source().ok_or_else(|| {
                anyhow!("No Canvas feed configured; pass --feed-id, --atom-href or --ics")
            })?;
            source.validate()?;
            FeedInput::Remote {
                source,
                fetcher: IcsFetcher::from_settings(&settings)?,
            }
        }
    };

    let service = AssignmentService::new();

    if cli.list {
        let assignments = load_assignments(&service, &input)?;
        return print_list(&assignments, cli.json);
    }

    if cli.once {
        let assignments = load_assignments(&service, &input)?;
        let nearest = next_due(&assignments);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&nearest)?);
        } else if let Some(nearest) = nearest {
            println!("Next Due: {}", nearest.name);
            println!("Due on: {}", nearest.due_iso8601());
        } else {
            println!("No upcoming assignments found.");
        }
        return Ok(());
    }

    // A saved file never changes, so only a remote feed is re-read.
    let ticks_per_run = match (&input, cli.ticks) {
        (_, Some(ticks)) => Some(ticks),
        (FeedInput::File(_), None) => None,
        (FeedInput::Remote { .. }, None) => Some(u64::from(settings.refresh_minutes) * 60),
    };

    let mut current = None;
    loop {
        let nearest = match &input {
            FeedInput::File(path) => next_due(&service.load_from_file(path)?),
            FeedInput::Remote { source, fetcher } => {
                service.refresh_nearest(fetcher, source, current.take(), Utc::now())
            }
        };
        let Some(nearest) = nearest else {
            println!("No upcoming assignments found.");
            return Ok(());
        };

        log::info!("Next assignment: {}", nearest.name);
        log::info!("Due on: {}", nearest.due_iso8601());

        let mut countdown = Countdown::new(nearest, settings.warning_thresholds.clone());
        let mut sink = TerminalSink::new(io::stdout());
        countdown.run(&mut sink, ticks_per_run, TICK)?;

        if cli.ticks.is_some() || matches!(input, FeedInput::File(_)) {
            println!();
            return Ok(());
        }
        current = Some(countdown.target().clone());
        log::debug!("Refreshing calendar feed");
    }
}

fn feed_id_from_args(cli: &Cli) -> Result<Option<String>> {
    if let Some(feed_id) = &cli.feed_id {
        return Ok(Some(feed_id.trim().to_string()));
    }

    match &cli.atom_href {
        Some(href) => feed_id_from_atom_href(href)
            .map(Some)
            .ok_or_else(|| anyhow!("Cannot retrieve the calendar feed id from {:?}", href)),
        None => Ok(None),
    }
}

fn load_assignments(service: &AssignmentService, input: &FeedInput) -> Result<AssignmentMap> {
    match input {
        FeedInput::File(path) => service.load_from_file(path),
        FeedInput::Remote { source, fetcher } => Ok(service.load_from_feed(fetcher, source)),
    }
}

fn print_list(assignments: &AssignmentMap, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(assignments)?);
        return Ok(());
    }

    if assignments.is_empty() {
        println!("No assignments found.");
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (name, record) in assignments.iter() {
        let raw = record.raw_due_date.as_deref().unwrap_or("-");
        let parsed = if record.has_due_date() { parse_due_date(raw) } else { None };
        let due = parsed
            .map(|due| utc_to_local(due).format("%a %d %b %Y %H:%M").to_string())
            .unwrap_or_else(|| "no due date".to_string());
        writeln!(out, "{}\t[{}]\t{}\t{}", name, record.class_label, raw, due)?;
    }
    Ok(())
}

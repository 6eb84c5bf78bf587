// Replays a CSV of fixes (timestamp_ms,latitude,longitude,accuracy) through a
// tracking session and prints what the overlay and notification would show.
//
//   cargo run --example replay -- tests/data/dublin_trip.csv [config.json]
use std::env;

use travelbar_core::gps_processor::RawData;
use travelbar_core::journey_tracker::Arrival;
use travelbar_core::notification::{self, Notice};
use travelbar_core::progress::ProgressState;
use travelbar_core::session::{TrackerEvent, TrackingSession};
use travelbar_core::sinks::Sinks;
use travelbar_core::TrackerConfig;

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: {} <fixes.csv> [config.json]", args[0]);
        std::process::exit(1);
    }
    let config = match args.get(2) {
        Some(path) => TrackerConfig::load(path)?,
        None => TrackerConfig::default(),
    };

    let mut fixes = Vec::new();
    let mut reader = csv::Reader::from_path(&args[1])?;
    for record in reader.records() {
        let record = record?;
        fixes.push(RawData {
            timestamp_ms: Some(record[0].parse()?),
            latitude: record[1].parse()?,
            longitude: record[2].parse()?,
            accuracy: Some(record[3].parse()?),
        });
    }
    let (Some(first), Some(last)) = (fixes.first(), fixes.last()) else {
        return Err("no fixes in file".into());
    };
    let start = first.coordinate();
    let destination = last.coordinate();

    let min_visible = config.min_visible_progress;
    let sinks = Sinks::new(
        move |progress: &ProgressState| {
            let level = notification::display_level(progress.percent_complete, min_visible);
            let bar = "#".repeat(level as usize / 5);
            println!("[{bar:<20}] {:>3}% {}", progress.percent_complete, progress.band);
        },
        |arrival: &Arrival| {
            println!(
                "arrived at {} ({}%)",
                arrival.destination, arrival.percent_complete
            )
        },
    )
    .with_notices(|notice: &Notice| println!("notification: {notice:?}"));

    let mut session = TrackingSession::new(config, sinks);
    session.handle(TrackerEvent::Start {
        start: Some(start),
        destination: Some(destination),
    })?;
    for fix in fixes {
        session.handle(TrackerEvent::Fix(fix))?;
    }
    session.handle(TrackerEvent::Stop)?;
    Ok(())
}

mod options;

use anyhow::Error as AnyError;
use chrono::{Duration, Utc};
use clap::Parser;
use giro::Measurement;
use options::{Cli, Command as CliCmd};
use serde::Serialize;
use skywave::Predictor;

fn main() -> Result<(), AnyError> {
    let cli = Cli::parse();

    env_logger::init();

    let predictor = Predictor::builder()
        .station(cli.station.as_str())
        .muf_distance(cli.muf_distance)
        .danger_accept_invalid_certs(cli.insecure)
        .build()?;

    match cli.cmd {
        CliCmd::Fetch {
            characteristic,
            hours,
            json,
        } => {
            let to = Utc::now();
            let from = to - Duration::seconds((hours * 3600.0) as i64);
            let series = predictor.series(&characteristic, None, from, to)?;
            if json {
                print_json(&series)?;
            } else {
                print_text(&series);
            }
        }
        CliCmd::Distance { toa } => {
            let distance = predictor.distance_by_toa(toa, None)?;
            println!("{distance:.0} km");
        }
        CliCmd::Toa { distance } => {
            let toa = predictor.toa_by_distance(distance, None)?;
            println!("{toa:.2} deg");
        }
    }
    Ok(())
}

fn print_text(series: &[Measurement]) {
    for measurement in series {
        println!(
            "{} {} = {}",
            measurement.time.format("%Y-%m-%dT%H:%M:%SZ"),
            measurement.characteristic,
            measurement.value
        );
    }
}

fn print_json(series: &[Measurement]) -> Result<(), AnyError> {
    #[derive(Serialize)]
    struct JsonEntry<'a> {
        time: String,
        characteristic: &'a str,
        value: f64,
    }

    let reshaped: Vec<JsonEntry> = series
        .iter()
        .map(|measurement| JsonEntry {
            time: measurement.time.to_rfc3339(),
            characteristic: &measurement.characteristic,
            value: measurement.value,
        })
        .collect();
    let json = serde_json::to_string(&reshaped)?;
    println!("{json}");
    Ok(())
}

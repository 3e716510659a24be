use clap::{Parser, Subcommand};

/// Estimate single-hop HF paths from live GIRO ionosonde data.
#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// URSI station code of the sounder to query.
    #[arg(short, long, default_value = giro::DEFAULT_STATION)]
    pub station: String,

    /// Reference distance for MUF(D) requests, in km.
    #[arg(long, default_value_t = giro::DEFAULT_MUF_DISTANCE_KM)]
    pub muf_distance: f64,

    /// Skip TLS certificate verification.
    #[arg(short = 'k', long, default_value_t = false)]
    pub insecure: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Fetch a characteristic's series and print it, latest first.
    Fetch {
        /// Characteristic name, e.g. foF2 or hmF2.
        characteristic: String,

        /// Window length looking back from now, in hours.
        #[arg(long, default_value_t = 1.0)]
        hours: f64,

        /// Print the series as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Predict ground distance for a take-off angle.
    Distance {
        /// Take-off angle, in degrees above the horizon.
        toa: f64,
    },

    /// Predict take-off angle for a ground distance.
    Toa {
        /// Ground distance to the remote transceiver, in km.
        distance: f64,
    },
}

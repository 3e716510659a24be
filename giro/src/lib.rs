//! # GIRO DIDB client
//!
//! Retrieves scaled ionospheric characteristics from the Global
//! Ionosphere Radio Observatory's Digital Ionogram Database
//! (<https://giro.uml.edu/didbase/scaled.php>) and decodes its
//! line-oriented plain-text responses into typed [`Measurement`]
//! series.
//!
//! ```no_run
//! use chrono::{Duration, Utc};
//!
//! // foF2 from Juliusruh (JR055) for the trailing hour, latest first.
//! let client = giro::Client::builder().build()?;
//! let to = Utc::now();
//! let series = client.series("foF2", "JR055", to - Duration::hours(1), to)?;
//! if let Some(latest) = series.first() {
//!     println!("{} = {}", latest.characteristic, latest.value);
//! }
//! # Ok::<(), giro::GiroError>(())
//! ```

mod client;
mod decode;
mod error;
mod measurement;

pub use crate::{
    client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_MUF_DISTANCE_KM, DEFAULT_STATION},
    decode::decode_series,
    error::{DecodeError, GiroError},
    measurement::{Measurement, MeasurementSeries},
};

//! # Skywave propagation estimates
//!
//! `skywave` answers "how far does a single hop reach at this take-off
//! angle?" (and the reverse) using the latest F2-layer peak height
//! scaled by a GIRO ionosonde.

mod error;
mod predictor;

pub use {
    crate::{
        error::SkywaveError,
        predictor::{Predictor, PredictorBuilder},
    },
    giro, hopgeom,
};

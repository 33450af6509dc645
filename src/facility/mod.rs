//! Facility-level suggestion tables.
//!
//! Each robotic facility lists the filters or gratings of its instruments on
//! the request form together with a suggested exposure for the target. The
//! Liverpool Telescope instruments are estimated with the signal-to-noise
//! model of [`crate::estimator`]; REM, LESEDI and BOLECINA publish reference
//! exposures that are scaled by flux ([`ScaledReference`]).

mod plan;
mod scaled;
mod suggestion;

pub use plan::{EstimationMethod, Facility, SuggestionPlan};
pub use scaled::ScaledReference;
pub use suggestion::{SuggestionRow, SuggestionTable};

//! Confidence level assignment (spec §4.7): `low` if any input to the
//! scenario's horizon/affordability selection was null, else `medium`;
//! `high` only when the data spans at least 90 days.

use spendsense_core::ConfidenceLevel;

pub fn assess(window_days: u32, any_soft_input_missing: bool) -> ConfidenceLevel {
    if any_soft_input_missing {
        ConfidenceLevel::Low
    } else if window_days >= 90 {
        ConfidenceLevel::High
    } else {
        ConfidenceLevel::Medium
    }
}

// ── Model errors ──
//
// Construction failures for domain values that carry range invariants.
// Router and transport failures stay `livebox_api::Error`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Invalid schedule ID: {0}. Must be between 1 and 168.")]
    InvalidId(i64),

    #[error("Invalid hour of day: {0}. Must be between 0 and 23.")]
    InvalidHour(i64),

    #[error("Invalid schedule ID string: {0:?}")]
    Unparsable(String),
}

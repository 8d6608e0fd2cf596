//! The storage projection: row size times write rate, extrapolated over time.

use crate::errors;
use crate::schema::SchemaSpec;
use crate::timing::{self, ActivityWindow};
use tracing::debug;

pub const DAYS_PER_MONTH: f64 = 30.0;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Storage projection for one set of inputs. The zero value is the "no projection" state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EstimationResult {
    pub row_size_bytes: u64,
    /// Floored for display; the byte figures use the unfloored rate.
    pub rows_per_day: u64,
    pub daily_bytes: f64,
    pub monthly_bytes: f64,
    pub yearly_bytes: f64,
    pub active_hours_per_day: f64,
}

/// Computes the projection for an already parsed cadence.
///
/// # Errors
/// Returns `Error::InvalidCadence` if `cadence_seconds` is not strictly positive.
///
/// # Examples
/// ```
/// use rowcast::estimate::estimate;
/// use rowcast::schema::{ColumnSpec, ColumnType, SchemaSpec};
/// use rowcast::timing::ActivityWindow;
///
/// let schema = SchemaSpec::new(vec![ColumnSpec::new(ColumnType::VARCHAR, Some(50))]);
/// let result = estimate(&schema, 60.0, &ActivityWindow::AlwaysActive, 100).unwrap();
/// assert_eq!(result.row_size_bytes, 72);
/// assert_eq!(result.rows_per_day, 144_000);
/// assert_eq!(result.daily_bytes, 10_368_000.0);
/// ```
pub fn estimate(
    schema: &SchemaSpec,
    cadence_seconds: f64,
    window: &ActivityWindow,
    population: u64,
) -> Result<EstimationResult, errors::Error> {
    if !(cadence_seconds > 0.0) {
        return Err(err!(
            InvalidCadence,
            "Polling interval must be greater than zero"
        ));
    }

    let row_size_bytes = schema.get_row_size();
    let active_seconds = window.active_seconds_per_day() as f64;
    let triggers_per_agent = active_seconds / cadence_seconds;
    let rows = triggers_per_agent * population as f64;
    let daily_bytes = rows * row_size_bytes as f64;

    debug!(
        row_size_bytes,
        active_seconds, triggers_per_agent, population, "Computed projection"
    );

    Ok(EstimationResult {
        row_size_bytes,
        rows_per_day: rows.floor() as u64,
        daily_bytes,
        monthly_bytes: daily_bytes * DAYS_PER_MONTH,
        yearly_bytes: daily_bytes * DAYS_PER_YEAR,
        active_hours_per_day: window.active_hours_per_day(),
    })
}

/// A projection paired with the validation error that zeroed it, if any.
#[derive(Debug)]
pub struct Projection {
    pub result: EstimationResult,
    pub error: Option<errors::Error>,
}

impl Projection {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Parses the `HH:MM:SS` interval and estimates, degrading to a zeroed result on failure.
pub fn project(
    schema: &SchemaSpec,
    interval: &str,
    window: &ActivityWindow,
    population: u64,
) -> Projection {
    let outcome = timing::parse_interval(interval)
        .and_then(|seconds| estimate(schema, seconds as f64, window, population));

    match outcome {
        Ok(result) => Projection {
            result,
            error: None,
        },
        Err(e) => {
            debug!(interval, "Projection zeroed. {}", e);
            Projection {
                result: EstimationResult::default(),
                error: Some(e),
            }
        }
    }
}

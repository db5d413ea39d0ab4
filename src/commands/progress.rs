use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::context::InteractionContext;
use crate::errors::CommandError;
use crate::types::InteractionResponse;

const FILLED: char = '█';
const EMPTY: char = '░';
const BAR_CELLS: usize = 10;

/// Share of the year elapsed at `now`, rounded to a whole percent.
///
/// The year is measured up to noon on 31 December, so the bar reads full for
/// the whole last half-day.
pub fn percentage(now: DateTime<Utc>) -> f64 {
    let year = now.year();
    let (Some(start), Some(end)) = (
        Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single(),
        Utc.with_ymd_and_hms(year, 12, 31, 11, 59, 59).single(),
    ) else {
        return 0.0;
    };

    let elapsed = (now - start).num_seconds() as f64;
    let total = (end - start).num_seconds() as f64;
    (elapsed / total * 100.0).round().clamp(0.0, 100.0)
}

pub fn to_bar(percentage: f64) -> String {
    let filled = ((percentage / 10.0) as usize).min(BAR_CELLS);
    let mut bar = String::with_capacity(BAR_CELLS * FILLED.len_utf8());
    bar.extend(std::iter::repeat(FILLED).take(filled));
    bar.extend(std::iter::repeat(EMPTY).take(BAR_CELLS - filled));
    bar
}

pub fn progress_command(_: &InteractionContext) -> Result<InteractionResponse, CommandError> {
    let pct = percentage(Utc::now());
    Ok(InteractionResponse::message(format!("{} {pct}%", to_bar(pct))))
}

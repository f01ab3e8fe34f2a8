use chrono::{Days, NaiveDate};
use engine_logging::engine_debug;

/// Calendar format of the listing's creation-date column.
pub const CREATION_DATE_FORMAT: &str = "%Y-%m-%d";

/// Recency filter applied to listing rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    Disabled,
    /// Keep rows created on or after `today - n` days.
    DaysBack(u32),
}

impl DateFilter {
    /// Earliest accepted creation date, or `None` when nothing is filtered.
    pub fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        match *self {
            DateFilter::Disabled => None,
            DateFilter::DaysBack(days) => today.checked_sub_days(Days::new(u64::from(days))),
        }
    }

    /// Decides whether a row's raw creation date is recent enough.
    ///
    /// Unparsable dates are accepted: a malformed cell must never end a run.
    pub fn is_within_range(&self, raw_date: &str, today: NaiveDate) -> bool {
        let Some(cutoff) = self.cutoff(today) else {
            return true;
        };
        match NaiveDate::parse_from_str(raw_date.trim(), CREATION_DATE_FORMAT) {
            Ok(created) => created >= cutoff,
            Err(err) => {
                engine_debug!("Unparsable creation date {:?} ({}); keeping row", raw_date, err);
                true
            }
        }
    }
}

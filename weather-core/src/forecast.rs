//! Daily summaries from the provider's 3-hourly forecast series.

use std::collections::HashMap;

use chrono::{DateTime, Days, NaiveDate, TimeZone};

use crate::{
    convert::round_i32,
    mapping::{canonical_condition, canonical_icon},
    model::ForecastDay,
};

pub const MAX_FORECAST_DAYS: usize = 5;

/// One point of the provider's forecast series.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    /// Epoch seconds.
    pub dt: i64,
    pub temp_max: f64,
    pub temp_min: f64,
    /// Provider weather code, e.g. `"Rain"`. Entries without one still add readings
    /// to an existing day but never start a new one.
    pub code: Option<String>,
}

/// Accumulator for all entries falling on one local calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBucket {
    pub date: NaiveDate,
    /// Timestamp of the first entry seen for `date`.
    pub dt: i64,
    /// Every high and low reading observed for `date`.
    pub readings: Vec<f64>,
    /// Weather code of the first entry; later entries never replace it.
    pub code: String,
}

impl DailyBucket {
    fn seed(date: NaiveDate, entry: &ForecastEntry, code: &str) -> Self {
        Self {
            date,
            dt: entry.dt,
            readings: vec![entry.temp_max, entry.temp_min],
            code: code.to_string(),
        }
    }

    fn extend(&mut self, entry: &ForecastEntry) {
        self.readings.push(entry.temp_max);
        self.readings.push(entry.temp_min);
    }

    pub fn high(&self) -> f64 {
        self.readings.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn low(&self) -> f64 {
        self.readings.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn reduce(&self, today: NaiveDate) -> ForecastDay {
        ForecastDay {
            day: day_label(self.date, today),
            high: round_i32(self.high()),
            low: round_i32(self.low()),
            condition: canonical_condition(&self.code).to_string(),
            icon: canonical_icon(&self.code).to_string(),
        }
    }
}

/// Group entries by their calendar date in `tz`, keeping first-seen date order.
pub fn bucket_by_day<Tz: TimeZone>(entries: &[ForecastEntry], tz: &Tz) -> Vec<DailyBucket> {
    let mut buckets: Vec<DailyBucket> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for entry in entries {
        let Some(utc) = DateTime::from_timestamp(entry.dt, 0) else {
            tracing::debug!(dt = entry.dt, "Skipping forecast entry with out-of-range timestamp");
            continue;
        };
        let date = utc.with_timezone(tz).date_naive();

        match index.get(&date) {
            Some(&i) => buckets[i].extend(entry),
            None => {
                let Some(code) = entry.code.as_deref() else {
                    tracing::debug!(
                        dt = entry.dt,
                        "Skipping forecast entry without a weather code"
                    );
                    continue;
                };
                index.insert(date, buckets.len());
                buckets.push(DailyBucket::seed(date, entry, code));
            }
        }
    }

    buckets
}

/// `Today`, `Tomorrow`, or the full weekday name.
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.checked_add_days(Days::new(1)) == Some(date) {
        "Tomorrow".to_string()
    } else {
        date.format("%A").to_string()
    }
}

/// Bucket, reduce, and keep the first [`MAX_FORECAST_DAYS`] days.
pub fn aggregate<Tz: TimeZone>(
    entries: &[ForecastEntry],
    tz: &Tz,
    today: NaiveDate,
) -> Vec<ForecastDay> {
    bucket_by_day(entries, tz)
        .iter()
        .take(MAX_FORECAST_DAYS)
        .map(|bucket| bucket.reduce(today))
        .collect()
}

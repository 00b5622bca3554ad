use chrono::{Datelike, NaiveDate};

use crate::core::error::{AnalogError, Result};

/// Convert a `YYYYMMDD` integer into a calendar date.
pub fn date_from_yyyymmdd(value: u32) -> Result<NaiveDate> {
    let year = (value / 10_000) as i32;
    let month = (value / 100) % 100;
    let day = value % 100;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| AnalogError::InvalidInput(format!("{value} is not a YYYYMMDD date")))
}

/// Convert a calendar date back into its `YYYYMMDD` integer form.
///
/// Years outside `0..=9999` do not fit the format and are clamped. A [`Series`]
/// never holds such dates, so match dates always round-trip.
pub fn date_to_yyyymmdd(date: NaiveDate) -> u32 {
    let year = date.year().clamp(0, 9999) as u32;
    year * 10_000 + date.month() * 100 + date.day()
}

/// A single observation as delivered by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    /// Opening price, `None` when no trade was observed.
    pub open: Option<f64>,
}

impl Bar {
    pub fn new(date: NaiveDate, open: Option<f64>) -> Self {
        Self { date, open }
    }

    /// Build a bar from the `YYYYMMDD` integer used by the bar store.
    pub fn from_yyyymmdd(date: u32, open: Option<f64>) -> Result<Self> {
        Ok(Self::new(date_from_yyyymmdd(date)?, open))
    }
}

/// Ordered opening prices for one instrument and timeframe.
///
/// Bars without an observed open are dropped at construction, so every index
/// into [`opens`](Series::opens) lines up with the same index into
/// [`dates`](Series::dates).
///
/// Invariants:
/// - at least one point
/// - dates strictly increasing
/// - every open is finite
/// - every date has a year in `0..=9999`, so it has a `YYYYMMDD` form
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    dates: Vec<NaiveDate>,
    opens: Vec<f64>,
    symbol: Option<String>,
    timeframe: Option<String>,
}

impl Series {
    /// Build a series from bars sorted ascending by date.
    pub fn from_bars(bars: &[Bar]) -> Result<Self> {
        let mut dates = Vec::with_capacity(bars.len());
        let mut opens = Vec::with_capacity(bars.len());

        for bar in bars {
            let Some(open) = bar.open else {
                continue;
            };
            if !(0..=9999).contains(&bar.date.year()) {
                return Err(AnalogError::InvalidInput(format!(
                    "date {} has no YYYYMMDD form",
                    bar.date
                )));
            }
            if !open.is_finite() {
                return Err(AnalogError::InvalidInput(format!(
                    "non-finite open {open} on {}",
                    bar.date
                )));
            }
            if let Some(&prev) = dates.last() {
                if bar.date <= prev {
                    return Err(AnalogError::InvalidInput(format!(
                        "dates must be strictly increasing: {} follows {prev}",
                        bar.date
                    )));
                }
            }
            dates.push(bar.date);
            opens.push(open);
        }

        if opens.is_empty() {
            return Err(AnalogError::InvalidInput(
                "series has no observed opens".to_string(),
            ));
        }

        Ok(Self {
            dates,
            opens,
            symbol: None,
            timeframe: None,
        })
    }

    /// Build a series from parallel `(YYYYMMDD, open)` rows.
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, Option<f64>)>,
    {
        let bars = rows
            .into_iter()
            .map(|(date, open)| Bar::from_yyyymmdd(date, open))
            .collect::<Result<Vec<_>>>()?;
        Self::from_bars(&bars)
    }

    /// Attach instrument labels. They are only used for diagnostics.
    pub fn with_labels(mut self, symbol: impl Into<String>, timeframe: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self.timeframe = Some(timeframe.into());
        self
    }

    pub fn len(&self) -> usize {
        self.opens.len()
    }

    /// Always false for a constructed series; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.opens.is_empty()
    }

    pub fn opens(&self) -> &[f64] {
        &self.opens
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn timeframe(&self) -> Option<&str> {
        self.timeframe.as_deref()
    }
}

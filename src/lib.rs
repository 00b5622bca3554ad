pub mod algorithms;
pub mod core;
pub mod metrics;

pub use crate::algorithms::dedup::{deduplicate, window_interval};
pub use crate::algorithms::normalize::{z_normalize, z_normalize_into};
pub use crate::algorithms::score::{similarity_score, MAX_SCORE};
pub use crate::algorithms::search::{find_analogs, find_analogs_with};
pub use crate::core::analog::{AnalogReport, Match};
pub use crate::core::config::AnalogConfig;
pub use crate::core::distance::ShapeDistance;
pub use crate::core::error::{AnalogError, Result};
pub use crate::core::series::{date_from_yyyymmdd, date_to_yyyymmdd, Bar, Series};
pub use crate::metrics::dtw::{dtw_distance, BandedDtw, DtwBuffer, DtwMetric, FullDtw};

/// Ranked, non-overlapping analogs of the most recent `window_length` points.
///
/// Runs [`find_analogs`] with the full DTW distance, then [`deduplicate`].
/// A series shorter than `2 * window_length` yields an empty list.
///
/// # Examples
///
/// ```
/// use analog_rs::{find_analogs_deduplicated, Series};
///
/// let rows = (0..40u32).map(|i| (20240101 + i % 31 + (i / 31) * 100, Some(f64::from(i + 1))));
/// let series = Series::from_rows(rows).unwrap();
/// let analogs = find_analogs_deduplicated(&series, 5, 0.0).unwrap();
/// assert!(analogs.iter().all(|m| m.similarity_score == 100.0));
/// ```
pub fn find_analogs_deduplicated(
    series: &Series,
    window_length: usize,
    min_score: f64,
) -> Result<Vec<Match>> {
    let candidates = find_analogs(series, window_length, min_score)?;
    deduplicate(candidates, window_length)
}

/// High-level facade for analog search, generic over the shape distance.
///
/// # Examples
///
/// ```
/// use analog_rs::{AnalogConfig, DtwEngine, Series};
///
/// let opens = [1.0, 3.0, 2.0, 5.0, 1.0, 3.0, 2.0, 5.0, 4.0, 1.0, 3.0, 2.0, 5.0];
/// let rows = opens.iter().enumerate().map(|(i, &v)| (20240101 + i as u32, Some(v)));
/// let series = Series::from_rows(rows).unwrap();
///
/// let engine = DtwEngine::new(AnalogConfig::new(4).with_min_score(99.0)).unwrap();
/// let report = engine.report(&series).unwrap();
/// assert_eq!(report.results[0].similarity_score, 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct AnalogEngine<D: ShapeDistance> {
    config: AnalogConfig,
    metric: D,
}

impl<D: ShapeDistance> AnalogEngine<D> {
    /// Create an engine with an explicit distance.
    pub fn with_metric(config: AnalogConfig, metric: D) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, metric })
    }

    /// Configuration the engine was built with, after validation.
    ///
    /// ```
    /// use analog_rs::{AnalogConfig, DtwEngine};
    ///
    /// let engine = DtwEngine::new(AnalogConfig::new(10).with_warping_window(2)).unwrap();
    /// assert_eq!(engine.config().window_length, 10);
    /// assert_eq!(engine.config().warping_window, Some(2));
    /// ```
    pub fn config(&self) -> &AnalogConfig {
        &self.config
    }

    /// Candidate windows scoring at least `min_score`, in ascending start order.
    pub fn search(&self, series: &Series) -> Result<Vec<Match>> {
        find_analogs_with(
            series,
            self.config.window_length,
            self.config.min_score,
            &self.metric,
        )
    }

    /// Ranked, non-overlapping analogs, best first.
    pub fn search_deduplicated(&self, series: &Series) -> Result<Vec<Match>> {
        deduplicate(self.search(series)?, self.config.window_length)
    }

    /// [`search_deduplicated`](Self::search_deduplicated) wrapped for serialization.
    pub fn report(&self, series: &Series) -> Result<AnalogReport> {
        self.search_deduplicated(series).map(AnalogReport::from)
    }
}

impl AnalogEngine<DtwMetric> {
    /// Create a DTW engine. The band is taken from `config.warping_window`.
    pub fn new(config: AnalogConfig) -> Result<Self> {
        let metric = DtwMetric::from_warping_window(config.warping_window);
        Self::with_metric(config, metric)
    }
}

/// Convenience type alias for the most common use case.
pub type DtwEngine = AnalogEngine<DtwMetric>;

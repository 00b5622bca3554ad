use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::algorithms::normalize::{z_normalize, z_normalize_into};
use crate::algorithms::score::similarity_score;
use crate::core::analog::Match;
use crate::core::distance::ShapeDistance;
use crate::core::error::{AnalogError, Result};
use crate::core::series::Series;
use crate::metrics::dtw::FullDtw;

/// Minimum number of candidate windows before dispatching to the parallel search.
/// Below this, thread-dispatch overhead exceeds parallelism gains.
#[cfg(feature = "parallel")]
const MIN_PARALLEL_WINDOWS: usize = 256;

/// Find historical windows shaped like the most recent `window_length` points,
/// using the full DTW distance.
///
/// See [`find_analogs_with`] for the search rules.
pub fn find_analogs(series: &Series, window_length: usize, min_score: f64) -> Result<Vec<Match>> {
    find_analogs_with(series, window_length, min_score, &FullDtw)
}

/// Find historical windows shaped like the most recent `window_length` points.
///
/// The last `window_length` opens form the current segment. Every window that
/// starts at index `0 ..= n - 2 * window_length - 1` is z-normalized, compared
/// to the normalized current segment with `metric`, and scored. Windows with
/// `score >= min_score` are returned in ascending start order; ranking is left
/// to [`deduplicate`](crate::algorithms::dedup::deduplicate).
///
/// The window starting right before the current segment is not a candidate.
///
/// # Returns
/// An empty list when the series holds fewer than `2 * window_length` points.
///
/// # Errors
/// `InvalidConfiguration` when `window_length == 0` or `min_score` is not finite.
pub fn find_analogs_with<D: ShapeDistance>(
    series: &Series,
    window_length: usize,
    min_score: f64,
    metric: &D,
) -> Result<Vec<Match>> {
    if window_length == 0 {
        return Err(AnalogError::InvalidConfiguration(
            "window_length must be >= 1".to_string(),
        ));
    }
    if !min_score.is_finite() {
        return Err(AnalogError::InvalidConfiguration(format!(
            "min_score must be finite, got {min_score}"
        )));
    }

    let n = series.len();
    let required = window_length.saturating_mul(2);
    if n < required {
        trace!(
            symbol = series.symbol(),
            points = n,
            required,
            "not enough history for an analog search"
        );
        return Ok(Vec::new());
    }

    let opens = series.opens();
    let query = z_normalize(&opens[n - window_length..]);
    let n_windows = n - required;

    let cx = SearchCtx {
        opens,
        dates: series.dates(),
        query: &query,
        m: window_length,
        min_score,
        metric,
    };

    #[cfg(feature = "parallel")]
    let matches = if n_windows >= MIN_PARALLEL_WINDOWS {
        search_parallel(&cx, n_windows)?
    } else {
        search_range(&cx, 0, n_windows)?
    };
    #[cfg(not(feature = "parallel"))]
    let matches = search_range(&cx, 0, n_windows)?;

    debug!(
        symbol = series.symbol(),
        timeframe = series.timeframe(),
        window_length,
        min_score,
        windows = n_windows,
        candidates = matches.len(),
        "analog search finished"
    );

    Ok(matches)
}

/// Read-only state shared by every worker.
struct SearchCtx<'a, D> {
    opens: &'a [f64],
    dates: &'a [NaiveDate],
    query: &'a [f64],
    m: usize,
    min_score: f64,
    metric: &'a D,
}

/// Score the windows starting in `start..end`, in order.
fn search_range<D: ShapeDistance>(
    cx: &SearchCtx<'_, D>,
    start: usize,
    end: usize,
) -> Result<Vec<Match>> {
    let m = cx.m;
    let mut scratch = cx.metric.scratch(m, m);
    let mut window = Vec::with_capacity(m);
    let mut out = Vec::new();

    for i in start..end {
        z_normalize_into(&cx.opens[i..i + m], &mut window);
        let d = cx.metric.distance_with(cx.query, &window, &mut scratch)?;
        let score = similarity_score(d, m)?;
        if score >= cx.min_score {
            out.push(Match {
                starting_date: cx.dates[i],
                similarity_score: score,
            });
        }
    }

    Ok(out)
}

/// Split the start indices into one contiguous range per thread.
///
/// Every window costs the same, so equal-length ranges balance the work.
/// Per-range results are concatenated in range order, reproducing the serial
/// output exactly.
#[cfg(feature = "parallel")]
fn search_parallel<D: ShapeDistance>(cx: &SearchCtx<'_, D>, n_windows: usize) -> Result<Vec<Match>> {
    use rayon::prelude::*;

    let n_threads = rayon::current_num_threads().max(1);
    let chunk = n_windows.div_ceil(n_threads);
    let ranges: Vec<(usize, usize)> = (0..n_windows)
        .step_by(chunk.max(1))
        .map(|start| (start, (start + chunk).min(n_windows)))
        .collect();

    let results: Vec<Vec<Match>> = ranges
        .into_par_iter()
        .map(|(start, end)| search_range(cx, start, end))
        .collect::<Result<_>>()?;

    Ok(results.into_iter().flatten().collect())
}

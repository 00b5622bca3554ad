use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::core::analog::Match;
use crate::core::error::{AnalogError, Result};

/// Calendar span `[start, start + window_length days]` covered by a match.
///
/// Saturates at the latest representable date.
pub fn window_interval(start: NaiveDate, window_length: usize) -> (NaiveDate, NaiveDate) {
    let end = start
        .checked_add_days(Days::new(window_length as u64))
        .unwrap_or(NaiveDate::MAX);
    (start, end)
}

/// Whether two closed intervals share at least one day. Touching counts.
#[inline]
fn overlaps(a: (NaiveDate, NaiveDate), b: (NaiveDate, NaiveDate)) -> bool {
    a.0 <= b.1 && b.0 <= a.1
}

/// Rank matches and drop those whose windows overlap a better one.
///
/// Greedy extraction: sort by score (descending, stable so earlier input wins
/// ties), then walk the ranking and accept a match only if its interval from
/// [`window_interval`] shares no day with an already accepted interval.
///
/// This favors the best-scoring windows; it does not maximize how many
/// windows survive.
///
/// # Returns
/// Accepted matches, best first.
///
/// # Errors
/// `InvalidInput` when `window_length == 0`.
pub fn deduplicate(matches: Vec<Match>, window_length: usize) -> Result<Vec<Match>> {
    if window_length == 0 {
        return Err(AnalogError::InvalidInput(
            "window_length must be >= 1 to deduplicate".to_string(),
        ));
    }

    let candidates = matches.len();
    let mut ranked = matches;
    ranked.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));

    let mut accepted: Vec<Match> = Vec::new();
    // Accepted intervals keyed by start. They are pairwise disjoint, so a new
    // interval can only collide with its nearest neighbour on either side.
    let mut taken: BTreeMap<NaiveDate, NaiveDate> = BTreeMap::new();

    for m in ranked {
        let interval = window_interval(m.starting_date, window_length);
        let before = taken.range(..=interval.0).next_back();
        let after = taken.range(interval.0..).next();
        if before
            .into_iter()
            .chain(after)
            .any(|(&s, &e)| overlaps((s, e), interval))
        {
            continue;
        }
        taken.insert(interval.0, interval.1);
        accepted.push(m);
    }

    debug!(candidates, accepted = accepted.len(), "deduplicated analogs");

    Ok(accepted)
}

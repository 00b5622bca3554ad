use crate::core::distance::ShapeDistance;
use crate::core::error::{AnalogError, Result};

/// Two-row working memory for the DTW recurrence.
///
/// Row `i` of the cost matrix only depends on row `i - 1`, so two rows of
/// `len(b) + 1` cells are enough. The buffers keep their capacity between
/// calls; resizing to the same width never reallocates.
#[derive(Debug, Clone, Default)]
pub struct DtwBuffer {
    prev: Vec<f64>,
    curr: Vec<f64>,
}

impl DtwBuffer {
    /// Pre-size for comparisons against sequences of `len_b` points.
    pub fn with_capacity(len_b: usize) -> Self {
        Self {
            prev: Vec::with_capacity(len_b + 1),
            curr: Vec::with_capacity(len_b + 1),
        }
    }

    fn reset(&mut self, width: usize) {
        self.prev.clear();
        self.prev.resize(width, f64::INFINITY);
        self.curr.clear();
        self.curr.resize(width, f64::INFINITY);
    }
}

/// Classic dynamic time warping over the full cost matrix.
///
/// `cell[i][j] = |a[i-1] - b[j-1]| + min(cell[i-1][j], cell[i][j-1], cell[i-1][j-1])`
/// with `cell[0][0] = 0` and every other border cell at infinity.
///
/// Edge cases:
/// - Both sequences empty → 0
/// - Exactly one sequence empty → `InvalidInput`
#[derive(Debug, Clone, Copy, Default)]
pub struct FullDtw;

/// DTW restricted to a Sakoe-Chiba band of the given radius.
///
/// Cells with `|i - j| > radius` are unreachable. The radius is widened to at
/// least `|len(a) - len(b)|` so the final cell can always be reached. Results
/// are never smaller than [`FullDtw`] and equal it once the band covers the
/// whole matrix.
#[derive(Debug, Clone, Copy)]
pub struct BandedDtw {
    pub radius: usize,
}

impl BandedDtw {
    pub fn new(radius: usize) -> Self {
        Self { radius }
    }
}

impl ShapeDistance for FullDtw {
    type Scratch = DtwBuffer;

    fn scratch(&self, _len_a: usize, len_b: usize) -> Self::Scratch {
        DtwBuffer::with_capacity(len_b)
    }

    fn distance_with(&self, a: &[f64], b: &[f64], scratch: &mut Self::Scratch) -> Result<f64> {
        check_lengths(a, b)?;
        if a.is_empty() {
            return Ok(0.0);
        }
        Ok(accumulate(a, b, None, scratch))
    }
}

impl ShapeDistance for BandedDtw {
    type Scratch = DtwBuffer;

    fn scratch(&self, _len_a: usize, len_b: usize) -> Self::Scratch {
        DtwBuffer::with_capacity(len_b)
    }

    fn distance_with(&self, a: &[f64], b: &[f64], scratch: &mut Self::Scratch) -> Result<f64> {
        check_lengths(a, b)?;
        if a.is_empty() {
            return Ok(0.0);
        }
        // A band wider than the longer sequence is the full matrix
        let radius = self
            .radius
            .max(a.len().abs_diff(b.len()))
            .min(a.len().max(b.len()));
        Ok(accumulate(a, b, Some(radius), scratch))
    }
}

/// DTW variant selected by [`AnalogConfig::warping_window`](crate::AnalogConfig).
#[derive(Debug, Clone, Copy)]
pub enum DtwMetric {
    Full(FullDtw),
    Banded(BandedDtw),
}

impl DtwMetric {
    pub fn from_warping_window(warping_window: Option<usize>) -> Self {
        match warping_window {
            Some(radius) => Self::Banded(BandedDtw::new(radius)),
            None => Self::Full(FullDtw),
        }
    }
}

impl Default for DtwMetric {
    fn default() -> Self {
        Self::Full(FullDtw)
    }
}

impl ShapeDistance for DtwMetric {
    type Scratch = DtwBuffer;

    fn scratch(&self, _len_a: usize, len_b: usize) -> Self::Scratch {
        DtwBuffer::with_capacity(len_b)
    }

    fn distance_with(&self, a: &[f64], b: &[f64], scratch: &mut Self::Scratch) -> Result<f64> {
        match self {
            Self::Full(metric) => metric.distance_with(a, b, scratch),
            Self::Banded(metric) => metric.distance_with(a, b, scratch),
        }
    }
}

/// Full-matrix DTW distance between two sequences.
///
/// # Examples
///
/// ```
/// use analog_rs::dtw_distance;
///
/// let d = dtw_distance(&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(d, 2.0);
/// ```
pub fn dtw_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    FullDtw.distance(a, b)
}

fn check_lengths(a: &[f64], b: &[f64]) -> Result<()> {
    if a.is_empty() != b.is_empty() {
        return Err(AnalogError::InvalidInput(format!(
            "cannot align an empty sequence with one of length {}",
            a.len().max(b.len())
        )));
    }
    Ok(())
}

/// Run the recurrence row by row. Both inputs must be non-empty.
fn accumulate(a: &[f64], b: &[f64], band: Option<usize>, buf: &mut DtwBuffer) -> f64 {
    let len_b = b.len();
    buf.reset(len_b + 1);
    buf.prev[0] = 0.0;

    for (i, &ai) in a.iter().enumerate().map(|(i, v)| (i + 1, v)) {
        let (lo, hi) = match band {
            Some(r) => {
                // Cells left over from two rows back may sit inside the new band
                buf.curr.fill(f64::INFINITY);
                (i.saturating_sub(r).max(1), i.saturating_add(r).min(len_b))
            }
            None => {
                buf.curr[0] = f64::INFINITY;
                (1, len_b)
            }
        };

        for j in lo..=hi {
            let cost = (ai - b[j - 1]).abs();
            let best = buf.prev[j].min(buf.curr[j - 1]).min(buf.prev[j - 1]);
            buf.curr[j] = cost + best;
        }

        std::mem::swap(&mut buf.prev, &mut buf.curr);
    }

    buf.prev[len_b]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtw_self_distance_zero() {
        let a = vec![0.3, -1.2, 4.5, 2.0, 2.0, -0.7];
        assert_eq!(dtw_distance(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn test_dtw_hand_computed() {
        // a = [1,2,3], b = [2,3,4]
        // Best path: (1,2)=1, (2,2)=0, (3,3)=0, (3,4)=1 → 2
        assert_eq!(dtw_distance(&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0]).unwrap(), 2.0);
    }

    #[test]
    fn test_dtw_unequal_lengths() {
        // a = [0,1,2], b = [0,2]: (0,0)=0, (1,0)=1 or (1,2)=1, (2,2)=0 → 1
        assert_eq!(dtw_distance(&[0.0, 1.0, 2.0], &[0.0, 2.0]).unwrap(), 1.0);
        assert_eq!(dtw_distance(&[0.0, 2.0], &[0.0, 1.0, 2.0]).unwrap(), 1.0);
    }

    #[test]
    fn test_dtw_single_points() {
        assert_eq!(dtw_distance(&[3.0], &[-1.5]).unwrap(), 4.5);
        // One point against many: every cell of b aligns with it
        assert_eq!(dtw_distance(&[1.0], &[0.0, 2.0, 1.0]).unwrap(), 2.0);
    }

    #[test]
    fn test_dtw_absorbs_time_shift() {
        let a = vec![0.0, 1.0, 0.0, 0.0, 0.0];
        let b = vec![0.0, 0.0, 0.0, 1.0, 0.0];
        assert_eq!(dtw_distance(&a, &b).unwrap(), 0.0);
    }

    #[test]
    fn test_dtw_empty_inputs() {
        assert_eq!(dtw_distance(&[], &[]).unwrap(), 0.0);
        assert!(matches!(
            dtw_distance(&[], &[1.0]),
            Err(AnalogError::InvalidInput(_))
        ));
        assert!(matches!(
            dtw_distance(&[1.0, 2.0], &[]),
            Err(AnalogError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_buffer_reuse_matches_fresh_computation() {
        let mut buf = DtwBuffer::default();
        let pairs: [(&[f64], &[f64]); 3] = [
            (&[1.0, 5.0, 2.0], &[1.0, 2.0]),
            (&[0.0, 0.0, 9.0, 1.0], &[3.0, 0.0, 0.5, 1.0]),
            (&[2.0], &[2.0, 2.0, 2.0, 7.0]),
        ];
        for (a, b) in pairs {
            let reused = FullDtw.distance_with(a, b, &mut buf).unwrap();
            assert_eq!(reused, dtw_distance(a, b).unwrap());
        }
    }

    #[test]
    fn test_banded_radius_zero_is_pointwise() {
        let a = vec![0.0, 1.0, 0.0, 0.0, 0.0];
        let b = vec![0.0, 0.0, 0.0, 1.0, 0.0];
        assert_eq!(BandedDtw::new(0).distance(&a, &b).unwrap(), 2.0);
    }

    #[test]
    fn test_banded_limits_warping() {
        // Aligning the spikes needs a warp of 2 steps
        let a = vec![0.0, 1.0, 0.0, 0.0, 0.0];
        let b = vec![0.0, 0.0, 0.0, 1.0, 0.0];
        assert!(BandedDtw::new(1).distance(&a, &b).unwrap() > 0.0);
        assert_eq!(BandedDtw::new(2).distance(&a, &b).unwrap(), 0.0);
    }

    #[test]
    fn test_banded_wide_equals_full() {
        let a: Vec<f64> = (0..20).map(|i| (i as f64 * 0.7).sin()).collect();
        let b: Vec<f64> = (0..17).map(|i| (i as f64 * 0.5).cos()).collect();
        let full = dtw_distance(&a, &b).unwrap();
        let banded = BandedDtw::new(20).distance(&a, &b).unwrap();
        assert!((full - banded).abs() < 1e-12, "full={full}, banded={banded}");
    }

    #[test]
    fn test_banded_huge_radius_equals_full() {
        let a = vec![1.0, 2.0, 3.0];
        assert_eq!(BandedDtw::new(usize::MAX).distance(&a, &a).unwrap(), 0.0);

        let a: Vec<f64> = (0..12).map(|i| (i as f64 * 0.8).sin()).collect();
        let b: Vec<f64> = (0..9).map(|i| (i as f64 * 0.3).cos()).collect();
        let banded = BandedDtw::new(usize::MAX).distance(&a, &b).unwrap();
        assert_eq!(banded, dtw_distance(&a, &b).unwrap());
    }

    #[test]
    fn test_banded_never_below_full() {
        let a: Vec<f64> = (0..15).map(|i| (i as f64 * 0.9).sin()).collect();
        let b: Vec<f64> = (0..15).map(|i| (i as f64 * 0.4 + 1.0).sin()).collect();
        let full = dtw_distance(&a, &b).unwrap();
        for r in 0..15 {
            let banded = BandedDtw::new(r).distance(&a, &b).unwrap();
            assert!(banded >= full - 1e-12, "r={r}: banded={banded} < full={full}");
        }
    }

    #[test]
    fn test_metric_from_warping_window() {
        let a = vec![0.0, 1.0, 0.0, 0.0, 0.0];
        let b = vec![0.0, 0.0, 0.0, 1.0, 0.0];
        let full = DtwMetric::from_warping_window(None);
        let banded = DtwMetric::from_warping_window(Some(1));
        assert!(matches!(full, DtwMetric::Full(_)));
        assert_eq!(full.distance(&a, &b).unwrap(), 0.0);
        assert!(banded.distance(&a, &b).unwrap() > 0.0);
    }

    #[test]
    fn test_banded_unequal_lengths_reachable() {
        // Radius 0 is widened to the length difference
        let d = BandedDtw::new(0).distance(&[1.0, 2.0, 3.0, 4.0], &[1.0, 4.0]).unwrap();
        assert!(d.is_finite());
    }
}

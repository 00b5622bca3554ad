use crate::core::error::Result;

/// Trait for shape distances used by analog search.
///
/// Designed for static polymorphism: the search loop is generic over
/// `D: ShapeDistance`, so the per-candidate call is monomorphized and inlined.
///
/// The associated `Scratch` type holds reusable working memory (e.g. the two
/// DTW rows). Each worker creates one scratch value and reuses it for every
/// candidate, keeping allocation out of the hot loop.
pub trait ShapeDistance: Clone + Send + Sync {
    /// Reusable working memory for one worker.
    type Scratch: Send;

    /// Allocate scratch space for comparing sequences of the given lengths.
    fn scratch(&self, len_a: usize, len_b: usize) -> Self::Scratch;

    /// Distance between `a` and `b`, using `scratch` as working memory.
    ///
    /// Must be symmetric for equal-length inputs and zero for `a == b`.
    fn distance_with(&self, a: &[f64], b: &[f64], scratch: &mut Self::Scratch) -> Result<f64>;

    /// One-off distance computation that allocates its own scratch space.
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        let mut scratch = self.scratch(a.len(), b.len());
        self.distance_with(a, b, &mut scratch)
    }
}

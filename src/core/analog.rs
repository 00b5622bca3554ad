use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::core::series::date_to_yyyymmdd;

/// A historical segment whose shape resembles the current segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Match {
    /// Date of the first point of the historical window.
    #[serde(serialize_with = "serialize_yyyymmdd")]
    pub starting_date: NaiveDate,
    /// Similarity in `(0, 100]`, higher is more similar.
    pub similarity_score: f64,
}

/// Response envelope handed to the presentation layer: `{"results": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalogReport {
    pub results: Vec<Match>,
}

impl From<Vec<Match>> for AnalogReport {
    fn from(results: Vec<Match>) -> Self {
        Self { results }
    }
}

fn serialize_yyyymmdd<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u32(date_to_yyyymmdd(*date))
}

use serde::{Deserialize, Serialize};

/// Batch-level summary statistics computed once per run.
///
/// Rates are fractions in `[0, 1]`. Every optional field is `None` when
/// `total_responses` is zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KpiResult {
    pub total_responses: usize,
    pub satisfaction_rate: Option<f64>,
    pub recommendation_rate: Option<f64>,
    pub most_used_service: Option<String>,
    pub top_region: Option<String>,
}

impl KpiResult {
    /// The result for a batch with no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.total_responses == 0
    }
}

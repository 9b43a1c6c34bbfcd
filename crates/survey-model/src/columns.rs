use serde::{Deserialize, Serialize};

/// Maps semantic survey roles to the physical column names of the input files.
///
/// The four required roles must resolve to present columns in every loaded
/// table. `date_col` and `respondent_id_col` are used only when configured
/// and present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub service_col: String,
    pub region_col: String,
    pub satisfied_col: String,
    pub recommend_col: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_col: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent_id_col: Option<String>,
}

impl ColumnMap {
    pub fn new(
        service_col: impl Into<String>,
        region_col: impl Into<String>,
        satisfied_col: impl Into<String>,
        recommend_col: impl Into<String>,
    ) -> Self {
        Self {
            service_col: service_col.into(),
            region_col: region_col.into(),
            satisfied_col: satisfied_col.into(),
            recommend_col: recommend_col.into(),
            date_col: None,
            respondent_id_col: None,
        }
    }

    #[must_use]
    pub fn with_date_col(mut self, name: impl Into<String>) -> Self {
        self.date_col = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_respondent_id_col(mut self, name: impl Into<String>) -> Self {
        self.respondent_id_col = Some(name.into());
        self
    }

    /// Required columns in role order: service, region, satisfied, recommend.
    pub fn required_columns(&self) -> [&str; 4] {
        [
            self.service_col.as_str(),
            self.region_col.as_str(),
            self.satisfied_col.as_str(),
            self.recommend_col.as_str(),
        ]
    }

    /// Text columns that get canonicalized.
    pub fn text_columns(&self) -> [&str; 2] {
        [self.service_col.as_str(), self.region_col.as_str()]
    }

    /// Yes/no columns coerced to the tri-state domain.
    pub fn flag_columns(&self) -> [&str; 2] {
        [self.satisfied_col.as_str(), self.recommend_col.as_str()]
    }
}

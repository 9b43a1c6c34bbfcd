//! Plain-text digest of a run's KPIs.

use std::fmt::Write;

use survey_model::KpiResult;

/// Percentage with one decimal place, or `N/A` when undefined.
pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{:.1}%", rate * 100.0),
        None => "N/A".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDigest {
    pub subject: String,
    pub body: String,
}

impl EmailDigest {
    /// Subject is `{prefix} Total={n}`. Rate and mode lines appear only for
    /// a non-empty batch.
    pub fn compose(subject_prefix: &str, kpis: &KpiResult) -> Self {
        let subject = format!("{subject_prefix} Total={}", kpis.total_responses);
        let mut body = String::from("Weekly Auto-Report\n\n");
        let _ = write!(body, "Total responses: {}", kpis.total_responses);
        if !kpis.is_empty() {
            let mode = |value: &Option<String>| value.clone().unwrap_or_else(|| "N/A".into());
            let _ = write!(
                body,
                "\nSatisfaction rate: {}\nRecommendation rate: {}\nMost used service: {}\nTop region: {}",
                format_rate(kpis.satisfaction_rate),
                format_rate(kpis.recommendation_rate),
                mode(&kpis.most_used_service),
                mode(&kpis.top_region),
            );
        }
        Self { subject, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_for_full_batch() {
        let kpis = KpiResult {
            total_responses: 3,
            satisfaction_rate: Some(2.0 / 3.0),
            recommendation_rate: None,
            most_used_service: Some("Laptop".to_string()),
            top_region: Some("North".to_string()),
        };
        let digest = EmailDigest::compose("[Weekly Report]", &kpis);
        assert_eq!(digest.subject, "[Weekly Report] Total=3");
        insta::assert_snapshot!(digest.body, @r"
        Weekly Auto-Report

        Total responses: 3
        Satisfaction rate: 66.7%
        Recommendation rate: N/A
        Most used service: Laptop
        Top region: North
        ");
    }

    #[test]
    fn test_digest_for_empty_batch() {
        let digest = EmailDigest::compose("[Weekly Report]", &KpiResult::empty());
        assert_eq!(digest.subject, "[Weekly Report] Total=0");
        assert_eq!(digest.body, "Weekly Auto-Report\n\nTotal responses: 0");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(Some(0.5)), "50.0%");
        assert_eq!(format_rate(Some(1.0)), "100.0%");
        assert_eq!(format_rate(None), "N/A");
    }
}

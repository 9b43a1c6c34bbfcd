//! Batch-level summary statistics.

use std::collections::HashMap;

use polars::prelude::{AnyValue, Column, DataFrame};

use survey_common::{any_to_f64, any_to_string_non_empty};
use survey_model::{ColumnMap, KpiResult};

fn flag_value(value: AnyValue<'_>) -> Option<bool> {
    match value {
        AnyValue::Null => None,
        AnyValue::Boolean(flag) => Some(flag),
        AnyValue::String(text) => match text.trim().to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        other => match any_to_f64(other) {
            Some(v) if v == 1.0 => Some(true),
            Some(v) if v == 0.0 => Some(false),
            _ => None,
        },
    }
}

/// Fraction of resolved flags that are true. `None` when no flag is resolved.
pub fn flag_rate(column: &Column) -> Option<f64> {
    let mut known = 0usize;
    let mut truthy = 0usize;
    for idx in 0..column.len() {
        if let Some(flag) = flag_value(column.get(idx).unwrap_or(AnyValue::Null)) {
            known += 1;
            if flag {
                truthy += 1;
            }
        }
    }
    if known == 0 {
        None
    } else {
        Some(truthy as f64 / known as f64)
    }
}

/// Most frequent non-empty value. Ties go to the value seen first.
pub fn most_frequent(column: &Column) -> Option<String> {
    // value -> (count, first row)
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for idx in 0..column.len() {
        let Some(value) = any_to_string_non_empty(column.get(idx).unwrap_or(AnyValue::Null))
        else {
            continue;
        };
        counts.entry(value).or_insert((0, idx)).0 += 1;
    }
    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, _)| value)
}

/// Computes the run's KPIs from the batch table.
///
/// An empty batch yields `total_responses == 0` with every other field `None`.
/// A role column absent from a non-empty batch leaves its KPI `None`.
pub fn compute_kpis(batch: &DataFrame, columns: &ColumnMap) -> KpiResult {
    let total = batch.height();
    if total == 0 {
        return KpiResult::empty();
    }
    let column = |name: &str| batch.column(name).ok();
    KpiResult {
        total_responses: total,
        satisfaction_rate: column(&columns.satisfied_col).and_then(flag_rate),
        recommendation_rate: column(&columns.recommend_col).and_then(flag_rate),
        most_used_service: column(&columns.service_col).and_then(most_frequent),
        top_region: column(&columns.region_col).and_then(most_frequent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn columns() -> ColumnMap {
        ColumnMap::new("Service", "Region", "Satisfied", "Recommend")
    }

    #[test]
    fn test_empty_batch_has_no_rates_or_modes() {
        let kpis = compute_kpis(&DataFrame::empty(), &columns());
        assert_eq!(kpis, KpiResult::empty());
        assert!(kpis.is_empty());
    }

    #[test]
    fn test_rates_and_modes() {
        let df = DataFrame::new(vec![
            Series::new("Service".into(), &["Laptop", "Phone", "Laptop"]).into_column(),
            Series::new("Region".into(), &["North", "South", "South"]).into_column(),
            Series::new("Satisfied".into(), &[true, true, false]).into_column(),
            Series::new("Recommend".into(), &[false, false, true]).into_column(),
        ])
        .unwrap();
        let kpis = compute_kpis(&df, &columns());
        assert_eq!(kpis.total_responses, 3);
        assert!((kpis.satisfaction_rate.unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert!((kpis.recommendation_rate.unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(kpis.most_used_service.as_deref(), Some("Laptop"));
        assert_eq!(kpis.top_region.as_deref(), Some("South"));
    }

    #[test]
    fn test_ties_go_to_first_seen() {
        let service = Series::new("Service".into(), &["Phone", "Laptop", "Laptop", "Phone"])
            .into_column();
        assert_eq!(most_frequent(&service).as_deref(), Some("Phone"));
    }

    #[test]
    fn test_rate_ignores_unresolved_flags() {
        let flags = Series::new("Satisfied".into(), &[Some(true), None, Some(false), Some(true)])
            .into_column();
        assert!((flag_rate(&flags).unwrap() - 2.0 / 3.0).abs() < 1e-12);
        let none = Series::new("Satisfied".into(), &[None::<bool>, None]).into_column();
        assert_eq!(flag_rate(&none), None);
    }

    #[test]
    fn test_rate_reads_numeric_and_text_flags() {
        let numeric = Series::new("n".into(), &[1i64, 0, 1, 1]).into_column();
        assert_eq!(flag_rate(&numeric), Some(0.75));
        let text = Series::new("t".into(), &["true", "false"]).into_column();
        assert_eq!(flag_rate(&text), Some(0.5));
    }
}

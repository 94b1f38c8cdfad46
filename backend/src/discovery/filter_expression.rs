//! Builds the filter expression for a single facet value.

use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use common::discovery_query::{FacetValue, FieldDataType};
use tracing::warn;

/// Stands in for an unrestricted facet group.
pub const ALL_FILTER_MARKER: &str = "__all__";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetExpression {
    All,
    Predicate { data_type: FieldDataType, expression: String },
}

impl FacetExpression {
    pub fn data_type(&self) -> FieldDataType {
        match self {
            FacetExpression::All => FieldDataType::NotApplicable,
            FacetExpression::Predicate { data_type, .. } => *data_type,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FacetExpression::All => ALL_FILTER_MARKER,
            FacetExpression::Predicate { expression, .. } => expression,
        }
    }
}

/// Expression for `value`, or `None` when the value contributes nothing.
///
/// `date_field` is the content type's date field and is only read for date facets.
pub fn filter_expression_for_value(
    value: &FacetValue,
    date_field: Option<&str>,
    now: DateTime<Utc>,
) -> Option<FacetExpression> {
    if value.is_all_sentinel() {
        return Some(FacetExpression::All);
    }
    let field = value.field_name.trim();
    let needs_field = matches!(value.data_type, FieldDataType::String | FieldDataType::Integer | FieldDataType::Array);
    if needs_field && field.is_empty() {
        warn!("skipping {:?} facet value without a field name", value.data_type);
        return None;
    }
    let expression = match value.data_type {
        FieldDataType::String => {
            let first = value.field_values.first()?;
            format!("{field} eq {}", quote_odata_string(&first.to_string()))
        }
        FieldDataType::Integer => {
            let terms = value
                .field_values
                .iter()
                .filter_map(|v| match v.as_int() {
                    Some(i) => Some(format!("{field} eq {i}")),
                    None => {
                        warn!("facet {field}: skipping non-integer value {v}");
                        None
                    }
                })
                .collect::<Vec<_>>();
            if terms.is_empty() {
                return None;
            }
            terms.join(" or ")
        }
        FieldDataType::Array => array_match_expression(field, value.field_values.iter().map(|v| v.to_string()))?,
        FieldDataType::Date => {
            let date_field = date_field?;
            let since = lookback_start(value.facet_option_id, now)?;
            format!("{date_field} ge {}T00:00:00Z", since.format("%Y-%m-%d"))
        }
        FieldDataType::NotApplicable | FieldDataType::Unknown => return None,
    };
    Some(FacetExpression::Predicate { data_type: value.data_type, expression })
}

/// Token match against a multi-valued field stored as delimited text.
pub fn array_match_expression(field: &str, values: impl Iterator<Item = String>) -> Option<String> {
    let terms = values
        .filter(|v| !v.trim().is_empty())
        .map(|v| format!("search.ismatch({}, {})", quote_odata_string(v.trim()), quote_odata_string(field)))
        .collect::<Vec<_>>();
    if terms.is_empty() {
        return None;
    }
    Some(terms.join(" or "))
}

/// First day of the lookback window selected by a date facet option.
pub fn lookback_start(facet_option_id: u32, now: DateTime<Utc>) -> Option<NaiveDate> {
    let since = match facet_option_id {
        502 => now.checked_sub_signed(Duration::days(7)),
        503 => now.checked_sub_months(Months::new(1)),
        504 => now.checked_sub_months(Months::new(6)),
        505 => now.checked_sub_months(Months::new(12)),
        105 => now.checked_sub_months(Months::new(2 * 12)),
        106 => now.checked_sub_months(Months::new(5 * 12)),
        107 => now.checked_sub_months(Months::new(10 * 12)),
        108 => now.checked_sub_months(Months::new(20 * 12)),
        _ => None,
    }?;
    Some(since.date_naive())
}

pub fn quote_odata_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

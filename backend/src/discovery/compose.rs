//! Per-content-type aggregation of facet expressions.
//!
//! Values picked inside one facet group are OR-ed together and parenthesized;
//! the groups that touch a content type are then AND-ed.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use common::{
    content_type::ContentType,
    discovery_query::{FacetValue, FieldDataType, SelectedFilter},
};
use tracing::debug;

use crate::discovery::{
    error::ComposeError,
    filter_expression::{FacetExpression, filter_expression_for_value, lookback_start},
    node_registry::NodeTypeRegistry,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposedFilter {
    /// No selected facet value applies to this content type.
    Empty,
    /// Every group that applies is unrestricted.
    All,
    /// Only date facets apply; the content type is not searched.
    DateOnly,
    Expression(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum GroupClause {
    All,
    Predicate(String),
}

#[derive(Debug, Default)]
struct Accumulated {
    groups: Vec<GroupClause>,
    data_types: BTreeSet<FieldDataType>,
}

pub fn compose_content_type_filters(
    selected_filters: &[SelectedFilter],
    registry: &NodeTypeRegistry,
    now: DateTime<Utc>,
) -> Result<BTreeMap<ContentType, ComposedFilter>, ComposeError> {
    ContentType::ALL
        .into_iter()
        .map(|content_type| {
            let filter = compose_for_content_type(content_type, selected_filters, registry, now)?;
            debug!("composed filter for {content_type}: {filter:?}");
            Ok::<_, ComposeError>((content_type, filter))
        })
        .collect()
}

pub fn compose_for_content_type(
    content_type: ContentType,
    selected_filters: &[SelectedFilter],
    registry: &NodeTypeRegistry,
    now: DateTime<Utc>,
) -> Result<ComposedFilter, ComposeError> {
    let accumulated = selected_filters.iter().try_fold(Accumulated::default(), |mut acc, filter| {
        let expressions = group_expressions(content_type, &filter.facet_values, registry, now)?;
        if !expressions.is_empty() {
            acc.data_types.extend(expressions.iter().map(|e| e.data_type()));
            acc.groups.push(group_clause(&expressions));
        }
        Ok::<_, ComposeError>(acc)
    })?;
    Ok(finish(accumulated))
}

fn group_expressions(
    content_type: ContentType,
    facet_values: &[FacetValue],
    registry: &NodeTypeRegistry,
    now: DateTime<Utc>,
) -> Result<Vec<FacetExpression>, ComposeError> {
    let mut expressions = Vec::new();
    for value in facet_values.iter().filter(|v| v.applies_to(content_type)) {
        // unknown date options are dropped before the registry is consulted
        let is_known_date = value.data_type == FieldDataType::Date
            && !value.is_all_sentinel()
            && lookback_start(value.facet_option_id, now).is_some();
        let date_field = if is_known_date {
            registry.date_field(content_type)?
        } else {
            None
        };
        expressions.extend(filter_expression_for_value(value, date_field, now));
    }
    Ok(expressions)
}

fn group_clause(expressions: &[FacetExpression]) -> GroupClause {
    if expressions.iter().any(|e| *e == FacetExpression::All) {
        return GroupClause::All;
    }
    let joined = expressions.iter().map(|e| e.as_str()).collect::<Vec<_>>().join(" or ");
    GroupClause::Predicate(format!("({joined})"))
}

fn finish(accumulated: Accumulated) -> ComposedFilter {
    let Accumulated { groups, data_types } = accumulated;
    if groups.is_empty() {
        return ComposedFilter::Empty;
    }
    if data_types.len() == 1 && data_types.contains(&FieldDataType::Date) {
        return ComposedFilter::DateOnly;
    }
    let predicates = groups
        .into_iter()
        .filter_map(|g| match g {
            GroupClause::All => None,
            GroupClause::Predicate(p) => Some(p),
        })
        .collect::<Vec<_>>();
    if predicates.is_empty() {
        return ComposedFilter::All;
    }
    ComposedFilter::Expression(predicates.join(" and "))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use common::{discovery_query::FacetFieldValue, node_type::NodeType};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap()
    }

    fn registry() -> NodeTypeRegistry {
        NodeTypeRegistry::from_node_types(vec![
            NodeType { name: "News".into(), date_field: Some("PublishedDate".into()) },
            NodeType { name: "Events".into(), date_field: Some("StartDate".into()) },
        ])
    }

    fn value(types: &[&str], field: &str, data_type: FieldDataType, values: Vec<FacetFieldValue>, option: u32) -> FacetValue {
        FacetValue {
            content_types: types.iter().map(|t| t.to_string()).collect(),
            field_name: field.into(),
            data_type,
            field_values: values,
            facet_option_id: option,
        }
    }

    fn int(types: &[&str], field: &str, i: i64) -> FacetValue {
        value(types, field, FieldDataType::Integer, vec![FacetFieldValue::Int(i)], 0)
    }

    fn all(types: &[&str]) -> FacetValue {
        value(types, "", FieldDataType::NotApplicable, vec![FacetFieldValue::Int(-1)], 0)
    }

    fn date(types: &[&str], option: u32) -> FacetValue {
        value(types, "", FieldDataType::Date, vec![], option)
    }

    fn group(id: u32, values: Vec<FacetValue>) -> SelectedFilter {
        SelectedFilter { facet_type_id: id, facet_values: values }
    }

    fn compose(filters: &[SelectedFilter], ty: ContentType) -> ComposedFilter {
        compose_for_content_type(ty, filters, &registry(), now()).unwrap()
    }

    #[test]
    fn group_of_all_markers_collapses_to_all() {
        let filters = vec![group(1, vec![all(&["News"]), all(&["News"])])];
        let composed = compose(&filters, ContentType::News);
        assert_eq!(composed, ComposedFilter::All);
    }

    #[test]
    fn same_group_values_are_or_ed_in_parentheses() {
        let filters = vec![group(20, vec![int(&["News"], "Type", 1), int(&["News"], "Type", 2)])];
        assert_eq!(compose(&filters, ContentType::News), ComposedFilter::Expression("(Type eq 1 or Type eq 2)".into()));
    }

    #[test]
    fn different_groups_are_and_ed() {
        let filters = vec![
            group(20, vec![int(&["News"], "Type", 1), int(&["News"], "Type", 2)]),
            group(21, vec![value(&["News"], "Region", FieldDataType::String, vec![FacetFieldValue::String("EU".into())], 0)]),
        ];
        assert_eq!(
            compose(&filters, ContentType::News),
            ComposedFilter::Expression("(Type eq 1 or Type eq 2) and (Region eq 'EU')".into())
        );
    }

    #[test]
    fn all_groups_are_stripped_next_to_real_predicates() {
        let filters = vec![group(1, vec![all(&["News"])]), group(20, vec![int(&["News"], "Type", 4)])];
        assert_eq!(compose(&filters, ContentType::News), ComposedFilter::Expression("(Type eq 4)".into()));
    }

    #[test]
    fn all_marker_absorbs_its_group() {
        let filters = vec![group(20, vec![int(&["News"], "Type", 1), all(&["News"])])];
        assert_eq!(compose(&filters, ContentType::News), ComposedFilter::All);
    }

    #[test]
    fn values_only_reach_their_content_types() {
        let filters = vec![group(20, vec![int(&["News", "Events"], "Type", 1), int(&["Events"], "Type", 2)])];
        assert_eq!(compose(&filters, ContentType::News), ComposedFilter::Expression("(Type eq 1)".into()));
        assert_eq!(compose(&filters, ContentType::Events), ComposedFilter::Expression("(Type eq 1 or Type eq 2)".into()));
        assert_eq!(compose(&filters, ContentType::Users), ComposedFilter::Empty);
    }

    #[test]
    fn date_only_content_type_is_suppressed() {
        let filters = vec![group(30, vec![date(&["News"], 502)])];
        assert_eq!(compose(&filters, ContentType::News), ComposedFilter::DateOnly);
    }

    #[test]
    fn date_with_other_facets_is_kept() {
        let filters = vec![group(30, vec![date(&["News"], 502)]), group(20, vec![int(&["News"], "Type", 2)])];
        assert_eq!(
            compose(&filters, ContentType::News),
            ComposedFilter::Expression("(PublishedDate ge 2024-03-08T00:00:00Z) and (Type eq 2)".into())
        );
    }

    #[test]
    fn unrecognized_date_option_contributes_nothing() {
        let filters = vec![group(30, vec![date(&["News"], 1)])];
        assert_eq!(compose(&filters, ContentType::News), ComposedFilter::Empty);
    }

    #[test]
    fn date_facet_without_node_type_fails() {
        let filters = vec![group(30, vec![date(&["Tools"], 502)])];
        let err = compose_content_type_filters(&filters, &registry(), now()).unwrap_err();
        assert_eq!(err, ComposeError::MissingNodeType { content_type: ContentType::Tools });
    }

    #[test]
    fn unknown_date_option_skips_registry_lookup() {
        let filters = vec![group(30, vec![date(&["Tools"], 999)])];
        let composed = compose_content_type_filters(&filters, &NodeTypeRegistry::default(), now()).unwrap();
        assert_eq!(composed[&ContentType::Tools], ComposedFilter::Empty);
    }

    #[test]
    fn blank_field_name_contributes_nothing() {
        let filters = vec![group(
            21,
            vec![value(&["News"], "  ", FieldDataType::String, vec![FacetFieldValue::String("x".into())], 0)],
        )];
        assert_eq!(compose(&filters, ContentType::News), ComposedFilter::Empty);
    }

    #[test]
    fn empty_selection_gives_empty_filters() {
        let filters = compose_content_type_filters(&[], &NodeTypeRegistry::default(), now()).unwrap();
        assert_eq!(filters.len(), ContentType::ALL.len());
        assert!(filters.values().all(|f| *f == ComposedFilter::Empty));
    }
}

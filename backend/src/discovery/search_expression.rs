//! Free-text and keyword search, and how it joins the per-type facet filter.

use crate::discovery::{
    compose::ComposedFilter,
    filter_expression::{array_match_expression, quote_odata_string},
};

/// Index field holding the keyword ids of a resource.
pub const KEYWORD_IDS_FIELD: &str = "KeywordIds";

/// Free texts and keyword id matches OR-ed together; `None` when nothing was supplied.
pub fn search_expression(search_texts: &[String], search_keyword_ids: &[String]) -> Option<String> {
    let mut terms = search_texts
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| format!("search.ismatch({})", quote_odata_string(t)))
        .collect::<Vec<_>>();
    terms.extend(array_match_expression(KEYWORD_IDS_FIELD, search_keyword_ids.iter().cloned()));
    if terms.is_empty() {
        return None;
    }
    Some(terms.join(" or "))
}

/// Filter actually sent for one content type, `None` meaning "no restriction".
pub fn final_entity_filter_query(entity_filter: &ComposedFilter, search: Option<&str>) -> Option<String> {
    match (entity_filter, search) {
        (ComposedFilter::Expression(filter), None) => Some(filter.clone()),
        (ComposedFilter::Expression(filter), Some(search)) => Some(format!("{filter} and ({search})")),
        (_, Some(search)) => Some(search.to_string()),
        (_, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_texts_and_keywords() {
        let expression = search_expression(&["solar".into(), " ".into()], &["k1".into(), "k2".into()]);
        assert_eq!(
            expression.as_deref(),
            Some("search.ismatch('solar') or search.ismatch('k1', 'KeywordIds') or search.ismatch('k2', 'KeywordIds')")
        );
    }

    #[test]
    fn no_terms_no_expression() {
        assert_eq!(search_expression(&[], &[]), None);
        assert_eq!(search_expression(&["".into()], &["  ".into()]), None);
    }

    #[test]
    fn search_is_and_ed_with_entity_filter() {
        let search = search_expression(&["foo".into()], &[]);
        let filter = ComposedFilter::Expression("(Type eq 2)".into());
        assert_eq!(
            final_entity_filter_query(&filter, search.as_deref()).as_deref(),
            Some("(Type eq 2) and (search.ismatch('foo'))")
        );
    }

    #[test]
    fn entity_filter_unchanged_without_search() {
        let filter = ComposedFilter::Expression("(Type eq 2) and (Region eq 'EU')".into());
        assert_eq!(
            final_entity_filter_query(&filter, None).as_deref(),
            Some("(Type eq 2) and (Region eq 'EU')")
        );
    }

    #[test]
    fn search_alone_when_filter_is_all_or_empty() {
        for filter in [ComposedFilter::All, ComposedFilter::Empty] {
            assert_eq!(final_entity_filter_query(&filter, Some("search.ismatch('x')")).as_deref(), Some("search.ismatch('x')"));
            assert_eq!(final_entity_filter_query(&filter, None), None);
        }
    }
}

//! Normalized query context shared by every adapter.
//!
//! Normalization happens exactly once per request; adapters, the scorer,
//! and the suggestion path all read the same context.

use crate::scorer;
use skillet_core::{SearchFilters, SearchRequest, SortOrder};

/// A validated, normalized search request as the adapters see it.
#[derive(Debug, Clone)]
pub struct QueryContext {
    /// Trimmed, lowercased query text.
    pub text: String,
    /// Whitespace-split terms of `text`, for scoring.
    pub terms: Vec<String>,
    pub filters: SearchFilters,
    pub sort: SortOrder,
    /// Page size after clamping.
    pub limit: i32,
    /// Page offset after clamping.
    pub offset: i32,
}

impl QueryContext {
    /// Build a context from a validated request.
    pub fn from_request(req: &SearchRequest) -> Self {
        let text = req.query.trim().to_lowercase();
        let terms = scorer::split_terms(&text);
        Self {
            text,
            terms,
            filters: req.filters.clone(),
            sort: req.sort_by,
            limit: req.effective_limit(),
            offset: req.effective_offset(),
        }
    }

    /// Context for a standalone suggestion or facet lookup: normalized
    /// text with no filters and no pagination.
    pub fn for_lookup(query: &str) -> Self {
        let text = query.trim().to_lowercase();
        let terms = scorer::split_terms(&text);
        Self {
            text,
            terms,
            filters: SearchFilters::default(),
            sort: SortOrder::default(),
            limit: 0,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillet_core::{DEFAULT_LIMIT, MAX_LIMIT};

    #[test]
    fn test_context_normalizes_text_once() {
        let req = SearchRequest::new("  Chicken CURRY  ");
        let ctx = QueryContext::from_request(&req);
        assert_eq!(ctx.text, "chicken curry");
        assert_eq!(ctx.terms, vec!["chicken", "curry"]);
    }

    #[test]
    fn test_context_applies_clamped_pagination() {
        let mut req = SearchRequest::new("pasta");
        req.limit = Some(500);
        req.offset = Some(-2);
        let ctx = QueryContext::from_request(&req);
        assert_eq!(ctx.limit, MAX_LIMIT);
        assert_eq!(ctx.offset, 0);

        let ctx = QueryContext::from_request(&SearchRequest::new("pasta"));
        assert_eq!(ctx.limit, DEFAULT_LIMIT);
        assert_eq!(ctx.offset, 0);
    }

    #[test]
    fn test_lookup_context_has_no_pagination() {
        let ctx = QueryContext::for_lookup(" Bread ");
        assert_eq!(ctx.text, "bread");
        assert_eq!(ctx.limit, 0);
        assert_eq!(ctx.filters, SearchFilters::default());
    }
}

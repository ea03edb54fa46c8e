//! Autocomplete suggestions and facet values.
//!
//! Both run the same per-kind fan-out as the main search but against
//! the adapters' lookup hooks. Kinds without titles or facet
//! vocabularies contribute nothing through the default trait impls.

use std::sync::Arc;

use futures_util::future::join_all;
use skillet_core::SearchSuggestion;

use crate::adapter::SearchAdapter;
use crate::config::SearchConfig;
use crate::context::QueryContext;

/// Title suggestions from the kinds that carry human-readable titles.
///
/// Per-kind lists are concatenated in adapter order and capped; there
/// is no dedup and no re-scoring. A failing kind is logged and skipped.
pub(crate) async fn title_suggestions(
    adapters: &[Arc<dyn SearchAdapter>],
    ctx: &QueryContext,
    config: &SearchConfig,
) -> Vec<SearchSuggestion> {
    if ctx.text.is_empty() {
        return Vec::new();
    }

    let lookups = adapters
        .iter()
        .map(|a| a.suggest(ctx, config.suggestions_per_kind));
    let outcomes = join_all(lookups).await;

    let mut suggestions = Vec::new();
    for (adapter, outcome) in adapters.iter().zip(outcomes) {
        match outcome {
            Ok(titles) => {
                suggestions.extend(titles.into_iter().map(|text| SearchSuggestion {
                    text,
                    kind: Some(adapter.kind()),
                    count: 1,
                }));
            }
            Err(e) => {
                tracing::warn!(kind = %adapter.kind(), error = %e, "suggestion lookup failed");
            }
        }
    }
    suggestions.truncate(config.suggestion_cap);
    suggestions
}

/// Facet values for the query: each kind's distinct vocabulary terms,
/// unioned into one flat list in first-seen order. Values are not
/// prefixed with their kind.
pub(crate) async fn facet_values(
    adapters: &[Arc<dyn SearchAdapter>],
    ctx: &QueryContext,
) -> Vec<String> {
    if ctx.text.is_empty() {
        return Vec::new();
    }

    let lookups = adapters.iter().map(|a| a.facets(ctx));
    let outcomes = join_all(lookups).await;

    let mut values: Vec<String> = Vec::new();
    for (adapter, outcome) in adapters.iter().zip(outcomes) {
        match outcome {
            Ok(facets) => {
                for value in facets {
                    if !values.contains(&value) {
                        values.push(value);
                    }
                }
            }
            Err(e) => {
                tracing::warn!(kind = %adapter.kind(), error = %e, "facet lookup failed");
            }
        }
    }
    values
}

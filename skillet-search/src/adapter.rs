//! Per-kind search adapter trait.
//!
//! Each content kind plugs into the aggregator through this trait. An
//! adapter owns the translation from the normalized query context to
//! its store's query shape, and hands back typed candidates. Only the
//! kinds that contribute suggestions or facet values override those
//! hooks; the defaults return nothing.

use async_trait::async_trait;
use skillet_core::{ContentKind, SkilletResult};

use crate::candidate::SearchCandidate;
use crate::context::QueryContext;

#[async_trait]
pub trait SearchAdapter: Send + Sync {
    /// Content kind this adapter serves.
    fn kind(&self) -> ContentKind;

    /// Run the search and return one page of matching candidates.
    async fn search(&self, ctx: &QueryContext) -> SkilletResult<Vec<SearchCandidate>>;

    /// Up to `limit` title suggestions for the query prefix.
    async fn suggest(&self, _ctx: &QueryContext, _limit: i32) -> SkilletResult<Vec<String>> {
        Ok(Vec::new())
    }

    /// Distinct facet values among this kind's matches.
    async fn facets(&self, _ctx: &QueryContext) -> SkilletResult<Vec<String>> {
        Ok(Vec::new())
    }
}

//! Caller-level deadline around a blocking search.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use quarry_core::errors::{QuarryResult, RetrievalError};
use quarry_core::models::{SearchRequest, SearchResponse};

use super::RetrievalEngine;

/// Run `search_detailed` on tokio's blocking pool and give up after `timeout`.
///
/// Giving up abandons the call only: the search keeps running to completion
/// in the background and its result is discarded.
pub async fn search_with_timeout(
    engine: Arc<RetrievalEngine>,
    request: SearchRequest,
    timeout: Duration,
) -> QuarryResult<SearchResponse> {
    request.validate()?;
    let handle = tokio::task::spawn_blocking(move || engine.search_detailed(&request));
    match tokio::time::timeout(timeout, handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(RetrievalError::TaskPanicked {
            task: format!("search ({join_error})"),
        }
        .into()),
        Err(_) => {
            let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            warn!(millis, "search abandoned at deadline");
            Err(RetrievalError::Timeout { millis }.into())
        }
    }
}

//! Paged resource iterator
//!
//! Drives a [`PageFetcher`] page by page, feeding each page's cursor into
//! the next fetch. Fetches are strictly sequential and only happen when the
//! consumer asks for the next page.

use super::types::{PageEnvelope, PageRequest, PageStep, PaginationState, DEFAULT_CURSOR_PARAM};
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Stream of page payloads where `None` marks a failed fetch
pub type PageStream = BoxStream<'static, Option<JsonObject>>;

/// Stream of page payloads with errors surfaced as `Err`
pub type TryPageStream = BoxStream<'static, Result<JsonObject>>;

/// Fetches one page; returns the raw response body
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page described by `request`
    async fn fetch(&self, request: PageRequest) -> Result<JsonValue>;
}

#[async_trait]
impl<F, Fut> PageFetcher for F
where
    F: Fn(PageRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<JsonValue>> + Send + 'static,
{
    async fn fetch(&self, request: PageRequest) -> Result<JsonValue> {
        (self)(request).await
    }
}

/// Stateful iterator over the pages of one listing
///
/// Single pass: once it reports `Done` or `Failed` it stays finished.
pub struct PagedIter {
    fetcher: Arc<dyn PageFetcher>,
    request: PageRequest,
    cursor_param: String,
    state: PaginationState,
}

impl PagedIter {
    /// Create an iterator over `fetcher` starting from `request`
    pub fn new(fetcher: impl PageFetcher + 'static, request: PageRequest) -> Self {
        Self::from_arc(Arc::new(fetcher), request)
    }

    /// Create an iterator from a shared fetcher
    pub fn from_arc(fetcher: Arc<dyn PageFetcher>, request: PageRequest) -> Self {
        Self {
            fetcher,
            request,
            cursor_param: DEFAULT_CURSOR_PARAM.to_string(),
            state: PaginationState::new(),
        }
    }

    /// Send the cursor in a different query parameter
    #[must_use]
    pub fn with_cursor_param(mut self, param: impl Into<String>) -> Self {
        self.cursor_param = param.into();
        self
    }

    /// Current pagination state
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// The request every page is derived from
    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    /// Fetch the next page
    pub async fn try_next(&mut self) -> PageStep<JsonObject> {
        self.next_envelope().await.map(|envelope| envelope.payload)
    }

    /// Fetch the next page, keeping its pagination metadata
    ///
    /// A failed fetch is logged here, once, whichever surface consumes it.
    pub async fn next_envelope(&mut self) -> PageStep<PageEnvelope> {
        if !self.state.should_fetch() {
            self.state.mark_done();
            return PageStep::Done;
        }

        let request = self
            .request
            .with_cursor(&self.cursor_param, self.state.cursor.as_deref());

        let body = match self.fetcher.fetch(request).await {
            Ok(body) => body,
            Err(err) => {
                error!(error = %err, page = self.state.pages + 1, "Page fetch failed");
                self.state.mark_done();
                return PageStep::Failed(err);
            }
        };

        let envelope = PageEnvelope::from_body(&body);
        self.state.advance(&envelope);
        debug!(
            page = self.state.pages,
            has_more = envelope.has_more,
            "Fetched page"
        );

        if envelope.has_more && envelope.cursor.is_none() {
            warn!(
                page = self.state.pages,
                "Server reported more pages without a cursor, stopping"
            );
            self.state.mark_done();
        }

        PageStep::Page(envelope)
    }

    /// Consume into a stream where a failed fetch yields one `None`
    ///
    /// The error is dropped after being logged; the stream ends right after
    /// the `None`.
    pub fn pages(self) -> PageStream {
        stream::unfold(Some(self), |iter| async move {
            let Some(mut iter) = iter else {
                return None;
            };
            match iter.try_next().await {
                PageStep::Page(page) => Some((Some(page), Some(iter))),
                PageStep::Done => None,
                PageStep::Failed(_) => Some((None, None)),
            }
        })
        .boxed()
    }

    /// Consume into a stream where a failed fetch yields one `Err`
    pub fn try_pages(self) -> TryPageStream {
        stream::unfold(Some(self), |iter| async move {
            let Some(mut iter) = iter else {
                return None;
            };
            match iter.try_next().await {
                PageStep::Page(page) => Some((Ok(page), Some(iter))),
                PageStep::Done => None,
                PageStep::Failed(err) => Some((Err(err), None)),
            }
        })
        .boxed()
    }

    /// Consume into a stream of payloads deserialized as `T`
    ///
    /// A payload that does not deserialize ends the stream with that error.
    pub fn typed<T>(self) -> BoxStream<'static, Result<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        stream::unfold(Some(self), |iter| async move {
            let Some(mut iter) = iter else {
                return None;
            };
            match iter.next_envelope().await {
                PageStep::Page(envelope) => match envelope.decode::<T>() {
                    Ok(decoded) => Some((Ok(decoded.payload), Some(iter))),
                    Err(err) => Some((Err(err), None)),
                },
                PageStep::Done => None,
                PageStep::Failed(err) => Some((Err(err), None)),
            }
        })
        .boxed()
    }

    /// Drain every page and concatenate the array under `field`
    ///
    /// Pages without the field contribute nothing. The first failure is
    /// returned as an error.
    pub async fn collect_items(mut self, field: &str) -> Result<Vec<JsonValue>> {
        let mut items = Vec::new();
        loop {
            match self.try_next().await {
                PageStep::Page(mut page) => match page.remove(field) {
                    Some(JsonValue::Array(values)) => items.extend(values),
                    Some(JsonValue::Null) | None => {}
                    Some(other) => {
                        return Err(Error::decode(format!(
                            "Expected '{field}' to be an array, got {other}"
                        )))
                    }
                },
                PageStep::Done => return Ok(items),
                PageStep::Failed(err) => return Err(err),
            }
        }
    }
}

impl std::fmt::Debug for PagedIter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedIter")
            .field("request", &self.request)
            .field("cursor_param", &self.cursor_param)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

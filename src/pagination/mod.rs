//! Pagination module
//!
//! Cursor pagination over the platform's `has_more` / `page_token` contract.
//!
//! # Overview
//!
//! List endpoints answer with
//! `{ code, msg, data: { has_more, page_token | next_page_token, ... } }`.
//! [`PagedIter`] hides the cursor bookkeeping: it re-issues the request with
//! the cursor from the previous page until the server stops reporting
//! `has_more`, yielding only the business fields of each page.
//!
//! Failures can be observed three ways:
//! - [`PagedIter::pages`] yields a single `None` and ends
//! - [`PagedIter::try_pages`] yields a single `Err` and ends
//! - [`PagedIter::try_next`] returns [`PageStep::Failed`]

mod iterator;
mod types;

pub use iterator::{PageFetcher, PageStream, PagedIter, TryPageStream};
pub use types::{
    PageEnvelope, PageRequest, PageStep, PaginationState, DEFAULT_CURSOR_PARAM, HAS_MORE_FIELD,
    NEXT_PAGE_TOKEN_FIELD, PAGE_TOKEN_FIELD,
};

//! Resource namespaces
//!
//! Each namespace borrows the [`Client`](crate::Client) and exposes one
//! struct per API resource. List endpoints come in two flavours:
//! - `list(...)` returns the raw [`ApiResponse`](crate::ApiResponse), pagination fields included
//! - `list_with_iterator(...)` returns a [`PageStream`](crate::pagination::PageStream)
//!   that follows the cursor; a `None` item means a fetch failed
//!
//! Versioned accessors (`client.im().v1()`) return the same namespace so
//! code written against the versioned paths keeps working.

mod aily;
mod contact;
mod im;

pub use aily::{Aily, AilyMessage, AilyRun, AilySession};
pub use contact::{Contact, Department, User};
pub use im::{Chat, Im, Message};

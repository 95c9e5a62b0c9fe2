//! Helpers for answering HTTP requests with JSON envelopes.
//!
//! ```
//! use respond::{Respond, Response};
//!
//! let mut response = Response::default();
//! Respond::new(&mut response).not_found("no such user").unwrap();
//!
//! assert_eq!(response.status(), 404);
//! assert_eq!(
//!     response.body().as_deref(),
//!     Some(&br#"{"success":false,"code":404,"message":"no such user"}"#[..])
//! );
//! ```

pub mod envelope;
mod error;
mod options;
mod respond;
mod sink;
mod status;

pub use error::{Error, Result};
pub use options::{ContentType, Options};
pub use respond::{Respond, JSON_CONTENT_TYPE};
pub use sink::{Event, Recorder, Response, ResponseSink};

//! Outbound HTTP for the resolver.
//!
//! Every probe goes through [`Fetcher`], which attaches the fixed User-Agent,
//! forwards cookies on request, and enforces both the per-connection timeout
//! and the request-wide [`Deadline`].

mod deadline;
mod request;
mod response;

pub use deadline::Deadline;
pub use request::Fetcher;
pub use response::FetchedResponse;

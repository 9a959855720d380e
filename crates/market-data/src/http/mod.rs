//! HTTP access to the exchange pages.
//!
//! - [`HttpFetch`] is the seam every retriever depends on
//! - [`ReqwestFetch`] is the production implementation (timeouts, browser
//!   headers, rotating user agent)

mod client;
mod headers;
#[cfg(test)]
pub(crate) mod testing;
mod traits;

pub use client::ReqwestFetch;
pub use headers::{random_user_agent, tmx_headers};
pub use traits::{HttpFetch, HttpRequest};

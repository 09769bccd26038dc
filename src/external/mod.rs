pub mod client;
pub mod error;
pub mod retry;
pub mod user_agent;
pub mod xview;

pub use client::{Fetch, FetchedBody, HttpFetcher, fetch};
pub use error::FetchError;
pub use retry::RetryPolicy;

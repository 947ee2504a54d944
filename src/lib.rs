//! fbgraph rest client
//!
//! this crate provides a small client for the facebook graph api. start
//! with [`Client`] and [`ClientConfig`], then use `get`, `put`, and
//! `delete` for ad-hoc node access, or the resource accessors
//! (`get_user_info`, `get_user_feed`, `put_message`, ...) for the common
//! shapes. reads follow `paging.next` links and return one aggregated
//! body.
//!
//! ## quick start
//!
//! ```no_run
//! use fbgraph::{Client, ClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(ClientConfig::new("user-access-token"))?;
//! let profile = client.get_user_info(None, None).await?;
//! println!("{:?}", profile);
//! # Ok(())
//! # }
//! ```
//!
//! tokens are supplied by the caller; the crate performs no oauth flow,
//! no retries, and no caching.

mod client;
mod config;
mod error;
mod fields;
mod paging;
mod resources;

pub use client::{Client, FileAttachment, Params, PutResponse};
pub use config::{
    ClientConfig, DEFAULT_PAGE_LIMIT, GRAPH_BASE_URL, GRAPH_DEFAULT_VERSION, GRAPH_VERSIONS,
};
pub use error::{Error, Result};
pub use fields::{FieldSpec, NodeSpec};
pub use resources::PhotoKind;

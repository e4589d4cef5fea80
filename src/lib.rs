//! Confluence REST API client library
//!
//! Provides a typed, authenticated client for common Confluence wiki
//! operations: fetching, searching, creating, and deleting content,
//! converting storage formats, and listing spaces and their content.
//!
//! Clients are constructed through a builder:
//!
//! ```no_run
//! use confluence_client::ConfluenceClient;
//!
//! # fn example() -> anyhow::Result<()> {
//! let client = ConfluenceClient::builder()
//!   .base_url("http://confluence.organisation.org")
//!   .username("jsmith")
//!   .password("hunter2")
//!   .build()?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod models;

pub use api::ConfluenceApi;
pub use client::{BASE_URL, Builder, ConfluenceClient};
pub use models::{
  Ancestor, Body, Content, ContentResultList, ContentType, NoContent, Representation, Space, SpaceResultList, Storage,
  Version,
};

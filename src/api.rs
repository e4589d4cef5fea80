//! Trait definitions for interacting with Confluence.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Content, ContentResultList, ContentType, Representation, Space, Storage};

/// Trait for Confluence API operations (enables testing with fake
/// implementations).
///
/// Every method is a single request/response round trip; there is no
/// client-side pagination, retry, or caching.
#[async_trait]
pub trait ConfluenceApi: Send + Sync {
  /// Fetch a single piece of content.
  ///
  /// # Arguments
  /// * `id` - Identifier of the page or blog post to fetch.
  ///
  /// # Returns
  /// The `Content` record, with whatever fields the server chose to include.
  async fn get_content_by_id(&self, id: &str) -> Result<Content>;

  /// Fetch the first page of the content listing, using server defaults.
  ///
  /// # Returns
  /// The paginated wrapper as the server returned it.
  async fn get_content_results(&self) -> Result<ContentResultList>;

  /// Search for content by space key and title.
  ///
  /// Match semantics are the server's, not the client's.
  ///
  /// # Arguments
  /// * `key` - Space key to search under.
  /// * `title` - Title of the content to search for.
  ///
  /// # Returns
  /// The paginated wrapper of matching content.
  async fn get_content_by_space_key_and_title(&self, key: &str, title: &str) -> Result<ContentResultList>;

  /// Convert a content body between representations.
  ///
  /// # Arguments
  /// * `storage` - Source body to convert.
  /// * `convert_to` - Target representation.
  ///
  /// # Returns
  /// The converted body in the target representation.
  async fn convert_content(&self, storage: &Storage, convert_to: Representation) -> Result<Storage>;

  /// Create a new page or blog post.
  ///
  /// # Arguments
  /// * `content` - The content to create; `id` and `status` should be unset.
  ///
  /// # Returns
  /// The created content as the server recorded it, id included.
  async fn post_content(&self, content: &Content) -> Result<Content>;

  /// Delete a piece of content.
  ///
  /// Whether the content is trashed, purged, or deleted outright is the
  /// server's policy; the client issues one DELETE and reports the outcome.
  ///
  /// # Arguments
  /// * `id` - Identifier of the page or blog post to delete.
  async fn delete_content_by_id(&self, id: &str) -> Result<()>;

  /// List the spaces available on the instance.
  ///
  /// # Returns
  /// The spaces from the first result page, in server order.
  async fn get_spaces(&self) -> Result<Vec<Space>>;

  /// Fetch all content of a space, with ancestors and storage bodies
  /// expanded.
  ///
  /// A single request with a page size of 1000; anything beyond that is not
  /// fetched.
  ///
  /// # Arguments
  /// * `space_key` - Key of the space to list.
  ///
  /// # Returns
  /// The content records from the first result page, in server order.
  async fn get_all_space_content(&self, space_key: &str) -> Result<Vec<Content>>;

  /// List the root-level content of a space, filtered by content type.
  ///
  /// # Arguments
  /// * `space_key` - Key of the space to list.
  /// * `content_type` - Whether to return pages or blog posts.
  ///
  /// # Returns
  /// The root content records, in server order.
  async fn get_root_content_by_space_key(&self, space_key: &str, content_type: ContentType) -> Result<Vec<Content>>;
}

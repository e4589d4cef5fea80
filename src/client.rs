//! HTTP client implementation for talking to the Confluence REST API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{debug, trace};
use url::Url;

use crate::api::ConfluenceApi;
use crate::models::{
  Content, ContentResultList, ContentType, NoContent, Representation, Space, SpaceResultList, Storage,
};

/// Base URL used when the builder is given no override. Points at a local
/// development instance.
pub const BASE_URL: &str = "http://localhost:8090";

// Default development credentials, applied independently when the caller
// supplies neither or only one of the pair.
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Confluence API client.
///
/// Immutable after construction: the base URL and the precomputed
/// authorization header are read-only, so one instance can be shared freely
/// across tasks.
///
/// ```no_run
/// use confluence_client::{ConfluenceApi, ConfluenceClient};
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = ConfluenceClient::builder()
///   .base_url("http://confluence.organisation.org")
///   .username("jsmith")
///   .password("hunter2")
///   .build()?;
///
/// let results = client.get_content_by_space_key_and_title("DEV", "A page or blog in DEV").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ConfluenceClient {
  base_url: String,
  auth_header: String,
  client: reqwest::Client,
}

impl ConfluenceClient {
  /// Start building a client.
  ///
  /// # Returns
  /// A `Builder` with no configuration; all settings are optional.
  pub fn builder() -> Builder {
    Builder::default()
  }

  /// The base URL requests are issued against.
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Create content and deliver the outcome through a callback instead of a
  /// return value.
  ///
  /// The request runs on a spawned task; the callback receives the created
  /// content on success or the raw transport error on failure. Must be
  /// called from within a tokio runtime.
  ///
  /// # Arguments
  /// * `content` - The content to create.
  /// * `callback` - Invoked exactly once with the result of the creation.
  pub fn post_content_with_callback<F>(&self, content: Content, callback: F)
  where
    F: FnOnce(Result<Content>) + Send + 'static,
  {
    let client = self.clone();
    tokio::spawn(async move {
      callback(client.post_content(&content).await);
    });
  }

  fn content_url(&self, id: &str) -> String {
    format!("{}/rest/api/content/{}", self.base_url, id)
  }

  fn content_results_url(&self) -> String {
    format!("{}/rest/api/content", self.base_url)
  }

  fn content_search_url(&self, key: &str, title: &str) -> Result<Url> {
    let mut url = Url::parse(&self.content_results_url()).context("Invalid content search URL")?;
    url.query_pairs_mut().append_pair("spaceKey", key).append_pair("title", title);
    Ok(url)
  }

  fn convert_url(&self, convert_to: Representation) -> String {
    format!("{}/rest/api/contentbody/convert/{}", self.base_url, convert_to)
  }

  fn spaces_url(&self) -> String {
    format!("{}/rest/api/space", self.base_url)
  }

  fn space_content_url(&self, space_key: &str) -> Result<Url> {
    let mut url = Url::parse(&format!("{}/rest/api/space/{}/content", self.base_url, space_key))
      .context("Invalid space content URL")?;
    url
      .query_pairs_mut()
      .append_pair("expand", "ancestors,body.storage")
      .append_pair("limit", "1000");
    Ok(url)
  }

  fn root_content_url(&self, space_key: &str, content_type: ContentType) -> Result<Url> {
    let mut url = Url::parse(&format!(
      "{}/rest/api/space/{}/content/{}",
      self.base_url, space_key, content_type
    ))
    .context("Invalid root content URL")?;
    url.query_pairs_mut().append_pair("depth", "root");
    Ok(url)
  }

  /// Check the response status, turning non-2xx responses into an error
  /// carrying the status and the response text.
  async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
      return Ok(response);
    }

    let status = response.status();
    let error_text = response
      .text()
      .await
      .unwrap_or_else(|_| String::from("(no error details)"));
    Err(anyhow!("Confluence API returned error {status}: {error_text}"))
  }
}

#[async_trait]
impl ConfluenceApi for ConfluenceClient {
  async fn get_content_by_id(&self, id: &str) -> Result<Content> {
    let url = self.content_url(id);

    let response = self
      .client
      .get(&url)
      .header("Authorization", &self.auth_header)
      .header("Accept", "application/json")
      .send()
      .await
      .context("Failed to send request to Confluence API")?;
    let response = Self::ensure_success(response).await?;

    let content: Content = response
      .json()
      .await
      .context("Failed to parse content response from Confluence API")?;

    Ok(content)
  }

  async fn get_content_results(&self) -> Result<ContentResultList> {
    let url = self.content_results_url();

    let response = self
      .client
      .get(&url)
      .header("Authorization", &self.auth_header)
      .header("Accept", "application/json")
      .send()
      .await
      .context("Failed to send request to Confluence API")?;
    let response = Self::ensure_success(response).await?;

    let results: ContentResultList = response
      .json()
      .await
      .context("Failed to parse content listing from Confluence API")?;

    Ok(results)
  }

  async fn get_content_by_space_key_and_title(&self, key: &str, title: &str) -> Result<ContentResultList> {
    let url = self.content_search_url(key, title)?;

    let response = self
      .client
      .get(url)
      .header("Authorization", &self.auth_header)
      .header("Accept", "application/json")
      .send()
      .await
      .context("Failed to send search request to Confluence API")?;
    let response = Self::ensure_success(response).await?;

    let results: ContentResultList = response
      .json()
      .await
      .context("Failed to parse search results from Confluence API")?;

    Ok(results)
  }

  async fn convert_content(&self, storage: &Storage, convert_to: Representation) -> Result<Storage> {
    let url = self.convert_url(convert_to);

    let response = self
      .client
      .post(&url)
      .header("Authorization", &self.auth_header)
      .header("Accept", "application/json")
      .json(storage)
      .send()
      .await
      .context("Failed to send conversion request to Confluence API")?;
    let response = Self::ensure_success(response).await?;

    let converted: Storage = response
      .json()
      .await
      .context("Failed to parse conversion response from Confluence API")?;

    Ok(converted)
  }

  async fn post_content(&self, content: &Content) -> Result<Content> {
    debug!(?content, "Posting content to Confluence");

    let url = self.content_results_url();

    let response = self
      .client
      .post(&url)
      .header("Authorization", &self.auth_header)
      .header("Accept", "application/json")
      .json(content)
      .send()
      .await
      .context("Failed to send creation request to Confluence API")?;
    let response = Self::ensure_success(response).await?;

    let created: Content = response
      .json()
      .await
      .context("Failed to parse created content from Confluence API")?;

    Ok(created)
  }

  async fn delete_content_by_id(&self, id: &str) -> Result<()> {
    let url = self.content_url(id);

    let response = self
      .client
      .delete(&url)
      .header("Authorization", &self.auth_header)
      .header("Accept", "application/json")
      .send()
      .await
      .context("Failed to send delete request to Confluence API")?;
    Self::ensure_success(response).await?;

    let no_content = NoContent;
    trace!(response = ?no_content, "Delete completed");

    Ok(())
  }

  async fn get_spaces(&self) -> Result<Vec<Space>> {
    let url = self.spaces_url();

    let response = self
      .client
      .get(&url)
      .header("Authorization", &self.auth_header)
      .header("Accept", "application/json")
      .send()
      .await
      .context("Failed to send request to Confluence API")?;
    let response = Self::ensure_success(response).await?;

    let spaces: SpaceResultList = response
      .json()
      .await
      .context("Failed to parse space listing from Confluence API")?;

    Ok(spaces.results)
  }

  async fn get_all_space_content(&self, space_key: &str) -> Result<Vec<Content>> {
    let url = self.space_content_url(space_key)?;

    let response = self
      .client
      .get(url)
      .header("Authorization", &self.auth_header)
      .header("Accept", "application/json")
      .send()
      .await
      .context("Failed to send request to Confluence API")?;
    let response = Self::ensure_success(response).await?;

    let contents: ContentResultList = response
      .json()
      .await
      .context("Failed to parse space content from Confluence API")?;

    Ok(contents.results)
  }

  async fn get_root_content_by_space_key(&self, space_key: &str, content_type: ContentType) -> Result<Vec<Content>> {
    let url = self.root_content_url(space_key, content_type)?;

    let response = self
      .client
      .get(url)
      .header("Authorization", &self.auth_header)
      .header("Accept", "application/json")
      .send()
      .await
      .context("Failed to send request to Confluence API")?;
    let response = Self::ensure_success(response).await?;

    let contents: ContentResultList = response
      .json()
      .await
      .context("Failed to parse root content from Confluence API")?;

    Ok(contents.results)
  }
}

/// Two-phase builder for [`ConfluenceClient`]: accumulate optional settings,
/// then freeze them into an immutable client with [`Builder::build`].
#[derive(Debug, Default)]
pub struct Builder {
  username: Option<String>,
  password: Option<String>,
  base_url: Option<String>,
  timeout: Option<Duration>,
}

impl Builder {
  /// Set the username half of the Basic Auth credential pair.
  pub fn username(mut self, username: impl Into<String>) -> Self {
    self.username = Some(username.into());
    self
  }

  /// Set the password half of the Basic Auth credential pair.
  pub fn password(mut self, password: impl Into<String>) -> Self {
    self.password = Some(password.into());
    self
  }

  /// Issue requests against this base URL instead of [`BASE_URL`].
  pub fn base_url(mut self, url: impl Into<String>) -> Self {
    self.base_url = Some(url.into());
    self
  }

  /// Override the default 30-second request timeout.
  pub fn timeout(mut self, timeout: Duration) -> Self {
    self.timeout = Some(timeout);
    self
  }

  /// Build the configured client.
  ///
  /// Resolves defaults for anything unset, encodes the credentials into the
  /// authorization header exactly once, and constructs the underlying HTTP
  /// client. Every request made through the result carries the same
  /// `Authorization` and `Accept: application/json` headers.
  ///
  /// # Errors
  /// Returns an error if the base URL does not parse or the HTTP client
  /// cannot be constructed.
  pub fn build(self) -> Result<ConfluenceClient> {
    let base_url = self
      .base_url
      .unwrap_or_else(|| BASE_URL.to_string())
      .trim_end_matches('/')
      .to_string();
    Url::parse(&base_url).context("Invalid Confluence base URL")?;

    let username = self.username.unwrap_or_else(|| DEFAULT_USERNAME.to_string());
    let password = self.password.unwrap_or_else(|| DEFAULT_PASSWORD.to_string());

    let credentials = format!("{username}:{password}");
    let auth_header = format!("Basic {}", BASE64.encode(credentials.as_bytes()));

    let timeout = self.timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    let client = reqwest::Client::builder()
      .timeout(timeout)
      .user_agent(format!("confluence-client/{}", env!("CARGO_PKG_VERSION")))
      .build()
      .context("Failed to create HTTP client")?;

    Ok(ConfluenceClient {
      base_url,
      auth_header,
      client,
    })
  }
}

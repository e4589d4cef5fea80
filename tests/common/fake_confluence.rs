//! Fake Confluence API client for testing
//!
//! A stub implementation of the Confluence API that serves predefined
//! responses and records mutations in memory, without any network requests.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use confluence_client::{ConfluenceApi, Content, ContentResultList, ContentType, Representation, Space, Storage};

use crate::common::fixtures;

/// A fake Confluence client backed by in-memory state.
pub struct FakeConfluenceClient {
  state: Mutex<State>,
}

struct State {
  contents: HashMap<String, Content>,
  // insertion order of content ids, so listings are deterministic
  order: Vec<String>,
  spaces: Vec<Space>,
  next_id: u64,
}

impl FakeConfluenceClient {
  /// Create a fake client with no content and no spaces.
  pub fn new() -> Self {
    Self {
      state: Mutex::new(State {
        contents: HashMap::new(),
        order: Vec::new(),
        spaces: Vec::new(),
        next_id: 900_000,
      }),
    }
  }

  /// Create a fake client preloaded with the sample fixtures.
  pub fn with_sample_data() -> Self {
    let client = Self::new();

    client.add_content_from_json(fixtures::sample_page_response());
    client.add_content_from_json(fixtures::sample_nested_page_response());
    client.add_content_from_json(fixtures::sample_blog_post_response());
    client.add_content_from_json(fixtures::sample_root_page_response());

    let spaces: Vec<Space> = serde_json::from_value(fixtures::sample_spaces()).unwrap();
    for space in spaces {
      client.add_space(space);
    }

    client
  }

  /// Load a content record from a JSON fixture.
  pub fn add_content_from_json(&self, json: serde_json::Value) {
    let content: Content = serde_json::from_value(json).expect("fixture should deserialize as Content");
    let id = content.id.clone().expect("fixture content should carry an id");
    let mut state = self.state.lock().unwrap();
    state.order.push(id.clone());
    state.contents.insert(id, content);
  }

  /// Register a space for listing.
  pub fn add_space(&self, space: Space) {
    self.state.lock().unwrap().spaces.push(space);
  }

  /// Whether the fake currently holds content with the given id.
  pub fn contains(&self, id: &str) -> bool {
    self.state.lock().unwrap().contents.contains_key(id)
  }
}

impl Default for FakeConfluenceClient {
  fn default() -> Self {
    Self::new()
  }
}

fn in_space(content: &Content, key: &str) -> bool {
  content.space.as_ref().is_some_and(|s| s.key == key)
}

#[async_trait]
impl ConfluenceApi for FakeConfluenceClient {
  async fn get_content_by_id(&self, id: &str) -> Result<Content> {
    self
      .state
      .lock()
      .unwrap()
      .contents
      .get(id)
      .cloned()
      .ok_or_else(|| anyhow!("No content found with id: {id}"))
  }

  async fn get_content_results(&self) -> Result<ContentResultList> {
    let state = self.state.lock().unwrap();
    let results: Vec<Content> = state.order.iter().filter_map(|id| state.contents.get(id).cloned()).collect();
    let size = results.len() as u32;
    Ok(ContentResultList {
      results,
      start: Some(0),
      limit: Some(25),
      size: Some(size),
    })
  }

  async fn get_content_by_space_key_and_title(&self, key: &str, title: &str) -> Result<ContentResultList> {
    let state = self.state.lock().unwrap();
    let results: Vec<Content> = state
      .order
      .iter()
      .filter_map(|id| state.contents.get(id))
      .filter(|c| in_space(c, key) && c.title == title)
      .cloned()
      .collect();
    let size = results.len() as u32;
    Ok(ContentResultList {
      results,
      start: Some(0),
      limit: Some(25),
      size: Some(size),
    })
  }

  async fn convert_content(&self, storage: &Storage, convert_to: Representation) -> Result<Storage> {
    Ok(Storage {
      value: storage.value.clone(),
      representation: convert_to.to_string(),
    })
  }

  async fn post_content(&self, content: &Content) -> Result<Content> {
    let mut state = self.state.lock().unwrap();
    let id = state.next_id.to_string();
    state.next_id += 1;

    let mut created = content.clone();
    created.id = Some(id.clone());
    created.status = Some("current".to_string());

    state.order.push(id.clone());
    state.contents.insert(id, created.clone());
    Ok(created)
  }

  async fn delete_content_by_id(&self, id: &str) -> Result<()> {
    let mut state = self.state.lock().unwrap();
    if state.contents.remove(id).is_none() {
      return Err(anyhow!("No content found with id: {id}"));
    }
    state.order.retain(|known| known != id);
    Ok(())
  }

  async fn get_spaces(&self) -> Result<Vec<Space>> {
    Ok(self.state.lock().unwrap().spaces.clone())
  }

  async fn get_all_space_content(&self, space_key: &str) -> Result<Vec<Content>> {
    let state = self.state.lock().unwrap();
    Ok(
      state
        .order
        .iter()
        .filter_map(|id| state.contents.get(id))
        .filter(|c| in_space(c, space_key))
        .cloned()
        .collect(),
    )
  }

  async fn get_root_content_by_space_key(&self, space_key: &str, content_type: ContentType) -> Result<Vec<Content>> {
    let state = self.state.lock().unwrap();
    Ok(
      state
        .order
        .iter()
        .filter_map(|id| state.contents.get(id))
        .filter(|c| in_space(c, space_key) && c.content_type == content_type)
        .filter(|c| c.ancestors.as_ref().is_none_or(|a| a.is_empty()))
        .cloned()
        .collect(),
    )
  }
}

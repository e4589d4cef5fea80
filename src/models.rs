//! Data transfer objects exchanged with the Confluence REST API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A piece of Confluence content: a page or a blog post.
///
/// Values returned by the API carry an `id` and `status`; values built by a
/// caller before creation usually leave those unset, and unset fields are
/// omitted from the serialized request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
  /// Unique numeric identifier assigned by Confluence.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(rename = "type")]
  /// Content type (`page` or `blogpost`).
  pub content_type: ContentType,
  /// Publication status such as `"current"` or `"trashed"`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status: Option<String>,
  /// Human-readable title displayed in the UI.
  pub title: String,
  /// Space the content lives in.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub space: Option<Space>,
  /// Body in storage format, when expanded or supplied.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub body: Option<Body>,
  /// Ancestor chain, root first, when the `ancestors` expansion is requested.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ancestors: Option<Vec<Ancestor>>,
  /// Version metadata, when present.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub version: Option<Version>,
}

/// Content body wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
  /// Storage-format representation of the body.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub storage: Option<Storage>,
}

/// One representation of a content body.
///
/// Used both as a nested body field and as the request/response payload of
/// the storage-format conversion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Storage {
  /// Raw markup in the named representation.
  pub value: String,
  /// Representation name (`"storage"`, `"view"`, ...).
  pub representation: String,
}

impl Storage {
  /// Build a storage payload in the given representation.
  pub fn new(value: impl Into<String>, representation: Representation) -> Self {
    Self {
      value: value.into(),
      representation: representation.to_string(),
    }
  }
}

/// Target representations accepted by the conversion endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
  /// Confluence's internal storage format.
  Storage,
  /// Rendered HTML view.
  View,
  /// Export-friendly HTML view.
  ExportView,
}

impl fmt::Display for Representation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Representation::Storage => "storage",
      Representation::View => "view",
      Representation::ExportView => "export_view",
    };
    f.write_str(name)
  }
}

/// Kinds of content a space can hold at its root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
  /// A wiki page.
  Page,
  /// A blog post.
  BlogPost,
}

impl fmt::Display for ContentType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      ContentType::Page => "page",
      ContentType::BlogPost => "blogpost",
    };
    f.write_str(name)
  }
}

/// A named container grouping related content under a unique key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
  /// Short key that uniquely identifies the space.
  pub key: String,
  /// Numeric space identifier.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<u64>,
  /// Human-readable space name.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  /// Space classification such as `"global"` or `"personal"`.
  pub space_type: Option<String>,
}

impl Space {
  /// Reference a space by key alone, as creation payloads do.
  pub fn with_key(key: impl Into<String>) -> Self {
    Self {
      key: key.into(),
      id: None,
      name: None,
      space_type: None,
    }
  }
}

/// Reference to an ancestor page, used when creating nested content and when
/// the `ancestors` expansion is requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ancestor {
  /// Identifier of the ancestor page.
  pub id: String,
}

/// Version metadata attached to content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
  /// Monotonically increasing version number.
  pub number: u32,
}

/// Paginated wrapper around content results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentResultList {
  /// Content records in the order the server returned them.
  pub results: Vec<Content>,
  /// Offset of the first result in the overall listing.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub start: Option<u32>,
  /// Page size the server applied.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub limit: Option<u32>,
  /// Number of results in this page.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub size: Option<u32>,
}

/// Paginated wrapper around space results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceResultList {
  /// Space records in the order the server returned them.
  pub results: Vec<Space>,
  /// Offset of the first result in the overall listing.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub start: Option<u32>,
  /// Page size the server applied.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub limit: Option<u32>,
  /// Number of results in this page.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub size: Option<u32>,
}

/// Marker for the empty body of a successful delete. Logged, then discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

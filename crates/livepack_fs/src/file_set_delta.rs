use livepack_utils::indexmap::FxIndexMap;
use serde::Deserialize;

/// The reply of the text-generation collaborator: files that were created or modified, with their
/// full new content, and files that were deleted.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct FileSetDelta {
  #[serde(default)]
  pub files: FxIndexMap<String, String>,
  #[serde(default, rename = "deletedFiles")]
  pub deleted_files: Vec<String>,
}

impl FileSetDelta {
  /// Parses a collaborator reply.
  ///
  /// Replies without either field are read in the legacy shape, a flat object of path → content,
  /// where non-string values are ignored.
  pub fn from_json(text: &str) -> anyhow::Result<Self> {
    let value: serde_json::Value = serde_json::from_str(text.trim())?;
    let serde_json::Value::Object(object) = value else {
      anyhow::bail!("Expected the response to be a JSON object");
    };

    if object.contains_key("files") || object.contains_key("deletedFiles") {
      return Ok(serde_json::from_value(serde_json::Value::Object(object))?);
    }

    let files = object
      .into_iter()
      .filter_map(|(path, content)| match content {
        serde_json::Value::String(content) => Some((path, content)),
        _ => None,
      })
      .collect();
    Ok(Self { files, deleted_files: Vec::new() })
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty() && self.deleted_files.is_empty()
  }
}

#[test]
fn parses_structured_reply() {
  let delta = FileSetDelta::from_json(
    r#"{"files":{"src/Timer.jsx":"export default 1;"},"deletedFiles":["src/Old.jsx"]}"#,
  )
  .unwrap();
  assert_eq!(delta.files.get("src/Timer.jsx").map(String::as_str), Some("export default 1;"));
  assert_eq!(delta.deleted_files, ["src/Old.jsx"]);
}

#[test]
fn parses_legacy_reply() {
  let delta = FileSetDelta::from_json(r#"{"src/App.jsx":"x","count":3}"#).unwrap();
  assert_eq!(delta.files.len(), 1);
  assert!(delta.deleted_files.is_empty());
}

#[test]
fn rejects_non_objects() {
  assert!(FileSetDelta::from_json("[1, 2]").is_err());
  assert!(FileSetDelta::from_json("not json").is_err());
}

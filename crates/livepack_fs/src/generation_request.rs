use crate::VirtualFileSet;

/// The text handed to the text-generation collaborator: the serialized file set plus the user's
/// instruction.
pub struct GenerationRequest<'a> {
  pub files: &'a VirtualFileSet,
  pub instruction: &'a str,
}

impl<'a> GenerationRequest<'a> {
  pub fn new(files: &'a VirtualFileSet, instruction: &'a str) -> Self {
    Self { files, instruction }
  }

  pub fn to_prompt(&self) -> String {
    format!("VFS: {}\n\nUSER REQUEST: {}", self.files.to_json(), self.instruction)
  }
}

#[test]
fn renders_prompt() {
  let files = VirtualFileSet::from_iter([("App.jsx", "x")]);
  let prompt = GenerationRequest::new(&files, "make it blue").to_prompt();
  assert_eq!(prompt, "VFS: {\"App.jsx\":\"x\"}\n\nUSER REQUEST: make it blue");
}

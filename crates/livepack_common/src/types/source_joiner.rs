use std::borrow::Cow;

/// Collects the pieces of a generated script and joins them with newlines.
#[derive(Debug, Default)]
pub struct SourceJoiner<'source> {
  inner: Vec<Cow<'source, str>>,
  prepend_source: Vec<Cow<'source, str>>,
}

impl<'source> SourceJoiner<'source> {
  pub fn append_source(&mut self, source: impl Into<Cow<'source, str>>) {
    self.inner.push(source.into());
  }

  pub fn prepend_source(&mut self, source: impl Into<Cow<'source, str>>) {
    self.prepend_source.push(source.into());
  }

  pub fn is_empty(&self) -> bool {
    self.inner.is_empty() && self.prepend_source.is_empty()
  }

  pub fn join(&self) -> String {
    let sources = self.prepend_source.iter().chain(self.inner.iter());
    let separators = (self.prepend_source.len() + self.inner.len()).saturating_sub(1);
    let size_hint = sources.clone().map(|source| source.len()).sum::<usize>() + separators;

    let mut ret_source = String::with_capacity(size_hint);
    for (index, source) in sources.enumerate() {
      if index > 0 {
        ret_source.push('\n');
      }
      ret_source.push_str(source);
    }
    ret_source
  }
}

#[test]
fn test_source_joiner() {
  let mut joiner = SourceJoiner::default();
  assert_eq!(joiner.join(), "");

  let owned = String::from("b();");
  joiner.append_source("a();");
  joiner.append_source(&owned);
  joiner.prepend_source("\"use strict\";");
  assert_eq!(joiner.join(), "\"use strict\";\na();\nb();");
}

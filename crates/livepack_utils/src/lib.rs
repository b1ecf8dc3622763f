pub mod ecmascript;
pub mod indexmap;
pub mod virtual_path;

/// Concatenates string-like values into a single `String`.
#[macro_export]
macro_rules! concat_string {
  ($($part:expr),+ $(,)?) => {{
    let mut ret = String::new();
    $(ret.push_str(::core::convert::AsRef::<str>::as_ref(&$part));)+
    ret
  }};
}

#[test]
fn test_concat_string() {
  let owned = String::from("b");
  assert_eq!(concat_string!("a", owned, "c"), "abc");
}

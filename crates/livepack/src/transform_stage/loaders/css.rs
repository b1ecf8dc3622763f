use livepack_common::{CompiledModule, ModuleType};
use livepack_utils::{concat_string, ecmascript::js_string_literal};

/// Stylesheets are not parsed. The module injects the text as-is into the document head.
pub fn compile(path: &str, source: &str) -> CompiledModule {
  let body = concat_string!(
    "var style = document.createElement(\"style\");\n",
    "style.textContent = ",
    js_string_literal(source),
    ";\ndocument.head.appendChild(style);\nmodule.exports = {};\n"
  );
  CompiledModule::new(path.into(), ModuleType::Css, body, vec![])
}

#[test]
fn quotes_the_stylesheet() {
  let module = compile("src/App.css", "body::after { content: \"`${x}`\"; }\n");
  assert_eq!(module.module_type, ModuleType::Css);
  assert!(module.requests.is_empty());
  assert!(module.body.contains(r#"style.textContent = "body::after { content: \"`${x}`\"; }\n";"#));
  assert!(module.body.ends_with("module.exports = {};\n"));
}

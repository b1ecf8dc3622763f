use livepack::{
  BuildResult, BundleError, Bundler, BundlerOptions, MemoryExternalResolver, PreparedBundle,
  VirtualFileSet,
};
use livepack_sandbox::{react_shim_host, ExecutionOutcome, PayloadExecutor, SandboxExecutor};
use serde_json::json;

async fn prepare(
  files: &VirtualFileSet,
  resolver: &MemoryExternalResolver,
) -> BuildResult<PreparedBundle> {
  Bundler::new(BundlerOptions::default()).prepare(files, resolver).await
}

fn execute(prepared: &PreparedBundle) -> Result<ExecutionOutcome, BundleError> {
  SandboxExecutor::default().with_react_shim().execute(
    &prepared.output.payload,
    &react_shim_host(),
    &prepared.externals,
  )
}

async fn run(files: &[(&str, &str)]) -> Result<ExecutionOutcome, BundleError> {
  let files = files.iter().copied().collect::<VirtualFileSet>();
  let prepared = prepare(&files, &MemoryExternalResolver::default()).await.unwrap();
  execute(&prepared)
}

#[tokio::test]
async fn renders_a_pass_through_component() {
  let outcome = run(&[(
    "src/App.jsx",
    "export default function App() {\n  return <div className=\"app\">Hello</div>;\n}\n",
  )])
  .await
  .unwrap();

  assert_eq!(outcome.exports, ["default"]);
  assert_eq!(
    outcome.rendered,
    Some(json!({ "type": "div", "props": { "className": "app" }, "children": ["Hello"] }))
  );
}

#[tokio::test]
async fn resolves_sibling_without_extension() {
  let outcome = run(&[
    (
      "src/App.jsx",
      "import React from 'react';\nimport Foo from './Foo';\nexport default function App() {\n  return <main><Foo name=\"x\" /></main>;\n}\n",
    ),
    ("src/Foo.jsx", "export default function Foo({ name }) {\n  return <span>{name}</span>;\n}\n"),
  ])
  .await
  .unwrap();

  assert_eq!(
    outcome.rendered,
    Some(json!({
      "type": "main",
      "props": {},
      "children": [{ "type": "span", "props": {}, "children": ["x"] }]
    }))
  );
}

#[tokio::test]
async fn host_modules_win_over_project_files() {
  let outcome = run(&[
    (
      "src/App.jsx",
      "import React from 'react';\nconsole.log(typeof React.createElement);\nexport default function App() {\n  return <p>ok</p>;\n}\n",
    ),
    ("src/react.js", "throw new Error('project file must not be loaded');\n"),
  ])
  .await
  .unwrap();

  assert_eq!(outcome.console[0].message, "function");
}

#[tokio::test]
async fn explicit_render_calls_are_recorded() {
  let outcome = run(&[
    (
      "src/index.jsx",
      "import React from 'react';\nimport ReactDOM from 'react-dom';\nimport App from './App';\nReactDOM.createRoot(document.getElementById('root')).render(<App />);\n",
    ),
    ("src/App.jsx", "export default function App() {\n  return <h1>Title</h1>;\n}\n"),
  ])
  .await
  .unwrap();

  assert_eq!(outcome.rendered, Some(json!({ "type": "h1", "props": {}, "children": ["Title"] })));
}

#[tokio::test]
async fn unresolvable_request_names_the_specifier() {
  let err = run(&[(
    "src/App.jsx",
    "import Nope from './Nope';\nexport default function App() {\n  return <Nope />;\n}\n",
  )])
  .await
  .unwrap_err();

  let BundleError::PayloadExecution { message, .. } = err else { panic!("unexpected error: {err}") };
  assert!(message.contains("'./Nope'"), "{message}");
  assert!(message.contains("src/App.jsx"), "{message}");
}

#[tokio::test]
async fn broken_file_degrades_into_a_stand_in() {
  let files = [
    (
      "src/App.jsx",
      "import A from './A';\nimport './B';\nexport default function App() {\n  return <A />;\n}\n",
    ),
    ("src/A.jsx", "export default function A() {\n  return <b>still works</b>;\n}\n"),
    ("src/B.jsx", "export default function B( {\n"),
  ]
  .into_iter()
  .collect::<VirtualFileSet>();

  let prepared = prepare(&files, &MemoryExternalResolver::default()).await.unwrap();
  assert_eq!(prepared.output.warnings.len(), 1);

  let outcome = execute(&prepared).unwrap();
  assert_eq!(outcome.console.len(), 1);
  assert_eq!(outcome.console[0].level, "error");
  assert!(outcome.console[0].message.starts_with("Transpile error in src/B.jsx"));
  assert_eq!(
    outcome.rendered,
    Some(json!({ "type": "b", "props": {}, "children": ["still works"] }))
  );
}

#[tokio::test]
async fn stylesheets_are_injected_in_import_order() {
  let outcome = run(&[
    ("src/App.jsx", "import './base.css';\nimport './App.css';\nexport default function App() {\n  return null;\n}\n"),
    ("src/App.css", ".app { color: red; }"),
    ("src/base.css", "body { margin: 0; }"),
  ])
  .await
  .unwrap();

  assert_eq!(outcome.styles, ["body { margin: 0; }", ".app { color: red; }"]);
  assert_eq!(outcome.rendered, None);
}

#[tokio::test]
async fn modules_are_evaluated_once() {
  let outcome = run(&[
    (
      "src/App.jsx",
      "import first from './counter';\nimport { read } from './reader';\nconsole.log(first === read());\nexport default function App() {\n  return null;\n}\n",
    ),
    ("src/counter.js", "console.log('init');\nexport default { id: Math.random() };\n"),
    ("src/reader.js", "import counter from './counter';\nexport function read() {\n  return counter;\n}\n"),
  ])
  .await
  .unwrap();

  let messages = outcome.console.iter().map(|line| line.message.as_str()).collect::<Vec<_>>();
  assert_eq!(messages, ["init", "true"]);
}

#[tokio::test]
async fn externals_are_wired_through_the_payload() {
  let files = [(
    "src/App.jsx",
    "import pad from 'left-pad';\nexport default function App() {\n  return <pre>{pad('7', 3)}</pre>;\n}\n",
  )]
  .into_iter()
  .collect::<VirtualFileSet>();
  let resolver = MemoryExternalResolver::default().with_module(
    "left-pad",
    "module.exports = function (value, width) {\n  value = String(value);\n  while (value.length < width) value = '0' + value;\n  return value;\n};\n",
  );

  let prepared = prepare(&files, &resolver).await.unwrap();
  assert_eq!(prepared.externals.len(), 1);

  let outcome = execute(&prepared).unwrap();
  assert_eq!(outcome.rendered, Some(json!({ "type": "pre", "props": {}, "children": ["007"] })));
}

#[tokio::test]
async fn one_failed_dependency_fails_the_attempt() {
  let files = [(
    "src/App.jsx",
    "import pad from 'left-pad';\nimport chunk from 'lodash.chunk';\nexport default function App() {\n  return null;\n}\n",
  )]
  .into_iter()
  .collect::<VirtualFileSet>();
  let resolver = MemoryExternalResolver::default().with_module("left-pad", "module.exports = 1;");

  let err = prepare(&files, &resolver).await.unwrap_err();
  let errors = err.bundle_errors().collect::<Vec<_>>();
  assert!(matches!(
    errors.as_slice(),
    [BundleError::DependencyFetch { package, .. }] if package == "lodash.chunk"
  ));
}

#[tokio::test]
async fn same_files_same_outcome() {
  let files = [
    ("src/App.jsx", "import Foo from './Foo';\nconsole.log('render');\nexport default function App() {\n  return <Foo />;\n}\n"),
    ("src/Foo.jsx", "export default () => <i>foo</i>;\n"),
  ];
  let first = run(&files).await.unwrap();
  let second = run(&files).await.unwrap();
  assert_eq!(first, second);
}

fn messages(outcome: &ExecutionOutcome) -> Vec<&str> {
  outcome.console.iter().map(|line| line.message.as_str()).collect()
}

#[tokio::test]
async fn imported_bindings_follow_later_assignments() {
  let outcome = run(&[
    (
      "src/App.jsx",
      "import { count, inc } from './counter';\ninc();\nconsole.log(count);\nexport default function App() {\n  return null;\n}\n",
    ),
    ("src/counter.js", "export let count = 0;\nexport function inc() {\n  count += 1;\n}\n"),
  ])
  .await
  .unwrap();

  assert_eq!(messages(&outcome), ["1"]);
}

#[tokio::test]
async fn circular_imports_read_initialised_exports() {
  let outcome = run(&[
    (
      "src/App.jsx",
      "import { b } from './b';\nexport const a = 'A';\nconsole.log(b());\nexport default function App() {\n  return null;\n}\n",
    ),
    ("src/b.js", "import { a } from './App';\nexport function b() {\n  return a;\n}\n"),
  ])
  .await
  .unwrap();

  assert_eq!(messages(&outcome), ["A"]);
}

#[tokio::test]
async fn promise_callbacks_and_dynamic_imports_settle() {
  let outcome = run(&[
    (
      "src/App.jsx",
      "Promise.resolve().then(() => console.log('later'));\nimport('./Lazy').then((mod) => console.log(mod.default));\nexport default function App() {\n  return null;\n}\n",
    ),
    ("src/Lazy.js", "export default 'lazy';\n"),
  ])
  .await
  .unwrap();

  assert_eq!(messages(&outcome), ["later", "lazy"]);
}

#[tokio::test]
async fn computed_requests_resolve_at_runtime() {
  let outcome = run(&[
    (
      "src/App.jsx",
      "const name = './Foo';\nconsole.log(require(name));\nexport default function App() {\n  return null;\n}\n",
    ),
    ("src/Foo.js", "module.exports = 7;\n"),
  ])
  .await
  .unwrap();

  assert_eq!(messages(&outcome), ["7"]);
}

#[tokio::test]
async fn ambiguous_computed_requests_list_the_candidates() {
  let err = run(&[
    (
      "src/App.jsx",
      "const name = './Foo';\nrequire(name);\nexport default function App() {\n  return null;\n}\n",
    ),
    ("src/a/Foo.js", "module.exports = 'a';\n"),
    ("src/b/Foo.js", "module.exports = 'b';\n"),
  ])
  .await
  .unwrap_err();

  let BundleError::PayloadExecution { message, .. } = err else { panic!("unexpected error: {err}") };
  assert!(
    message.contains("ambiguous request, candidates are src/a/Foo.js, src/b/Foo.js"),
    "{message}"
  );
}

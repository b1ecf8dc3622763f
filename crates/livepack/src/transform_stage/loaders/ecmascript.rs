use std::path::Path;

use livepack_common::{CompiledModule, ModuleType, NormalizedBundlerOptions};
use livepack_ecmascript::{to_commonjs, CommonJsModule, EcmaCompiler, TranspileOptions};
use livepack_error::BuildResult;

pub fn compile(
  path: &str,
  source: &str,
  module_type: ModuleType,
  options: &NormalizedBundlerOptions,
) -> BuildResult<CompiledModule> {
  let transpile_options = TranspileOptions {
    target: options.target.into(),
    jsx_pragma: options.jsx.pragma.clone(),
    jsx_pragma_frag: options.jsx.pragma_frag.clone(),
  };
  let code = EcmaCompiler::transpile(source, Path::new(path), &transpile_options)?;
  let CommonJsModule { code, requests } = to_commonjs(&code)?;
  Ok(CompiledModule::new(path.into(), module_type, code, requests))
}

#[test]
fn compiles_to_commonjs() {
  let module = compile(
    "src/App.jsx",
    "import React from 'react';\nimport Foo from './Foo';\nexport default function App() {\n  return <Foo />;\n}\n",
    ModuleType::Jsx,
    &NormalizedBundlerOptions::default(),
  )
  .unwrap();

  assert_eq!(module.requests, vec!["react".to_string(), "./Foo".to_string()]);
  assert!(module.body.contains("var __module_1 = __importDefault(require(\"./Foo\"));"));
  assert!(module.body.contains("__module_0.default.createElement(__module_1.default"));
  assert!(!module.body.contains("import "));
  assert!(!module.is_stand_in);
}

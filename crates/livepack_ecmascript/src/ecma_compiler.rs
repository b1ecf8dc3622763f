use std::path::Path;

use arcstr::ArcStr;
use itertools::Itertools;
use livepack_error::BuildResult;
use oxc::{
  codegen::{Codegen, CodegenReturn},
  diagnostics::OxcDiagnostic,
  semantic::SemanticBuilder,
  span::SourceType,
  transformer::{ESTarget, JsxOptions, JsxRuntime, TransformOptions, Transformer},
};

use crate::EcmaAst;

#[derive(Debug, Clone)]
pub struct TranspileOptions {
  pub target: ESTarget,
  pub jsx_pragma: String,
  pub jsx_pragma_frag: String,
}

impl Default for TranspileOptions {
  fn default() -> Self {
    Self {
      target: ESTarget::ESNext,
      jsx_pragma: "React.createElement".to_string(),
      jsx_pragma_frag: "React.Fragment".to_string(),
    }
  }
}

pub struct EcmaCompiler;

impl EcmaCompiler {
  pub fn parse(source: impl Into<ArcStr>, source_type: SourceType) -> BuildResult<EcmaAst> {
    EcmaAst::parse(source.into(), source_type)
      .map_err(|errors| anyhow::anyhow!("{}", join_diagnostics(&errors)).into())
  }

  pub fn print(ast: &EcmaAst) -> CodegenReturn {
    Codegen::new().build(ast.program())
  }

  /// Lowers component markup and modern syntax of a script file, keeping its module syntax.
  ///
  /// Markup is compiled with the classic runtime, so it turns into calls to the configured
  /// pragma instead of imports of a jsx runtime package.
  pub fn transpile(
    source: impl Into<ArcStr>,
    source_path: &Path,
    options: &TranspileOptions,
  ) -> BuildResult<String> {
    let source_type = SourceType::default().with_module(true).with_jsx(true);
    let mut ast = Self::parse(source, source_type)?;

    ast.transform(|allocator, program| -> BuildResult<()> {
      let semantic_ret = SemanticBuilder::new().with_excess_capacity(2.0).build(program);
      if !semantic_ret.errors.is_empty() {
        Err(anyhow::anyhow!("{}", join_diagnostics(&semantic_ret.errors)))?;
      }
      let scoping = semantic_ret.semantic.into_scoping();

      let mut transform_options = TransformOptions::from(options.target);
      transform_options.jsx = JsxOptions {
        runtime: JsxRuntime::Classic,
        pragma: Some(options.jsx_pragma.clone()),
        pragma_frag: Some(options.jsx_pragma_frag.clone()),
        ..JsxOptions::default()
      };

      let transformer_return = Transformer::new(allocator, source_path, &transform_options)
        .build_with_scoping(scoping, program);
      if !transformer_return.errors.is_empty() {
        Err(anyhow::anyhow!("{}", join_diagnostics(&transformer_return.errors)))?;
      }
      Ok(())
    })?;

    Ok(Self::print(&ast).code)
  }
}

fn join_diagnostics(diagnostics: &[OxcDiagnostic]) -> String {
  diagnostics.iter().map(ToString::to_string).join("; ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn basic_test() {
    let ast = EcmaCompiler::parse("const a = 1;".to_string(), SourceType::default()).unwrap();
    let code = EcmaCompiler::print(&ast).code;
    assert_eq!(code, "const a = 1;\n");
  }

  #[test]
  fn lowers_markup_with_classic_runtime() {
    let code = EcmaCompiler::transpile(
      "import React from 'react';\nexport default () => <div className=\"a\"><>hi</></div>;\n",
      Path::new("src/App.jsx"),
      &TranspileOptions::default(),
    )
    .unwrap();

    assert!(code.contains("React.createElement(\"div\""), "{code}");
    assert!(code.contains("React.Fragment"), "{code}");
    assert!(!code.contains("jsx-runtime"), "{code}");
    assert!(code.contains("import React from \"react\""), "{code}");
  }

  #[test]
  fn accepts_markup_in_js_files() {
    let code = EcmaCompiler::transpile(
      "export const Title = () => <h1>Title</h1>;",
      Path::new("src/Title.js"),
      &TranspileOptions::default(),
    )
    .unwrap();
    assert!(code.contains("React.createElement(\"h1\""), "{code}");
  }

  #[test]
  fn reports_syntax_errors() {
    let err = EcmaCompiler::transpile(
      "export default () => <div>;",
      Path::new("src/Broken.jsx"),
      &TranspileOptions::default(),
    )
    .unwrap_err();
    assert!(!err.is_empty());
    assert!(!err[0].to_string().is_empty());
  }
}

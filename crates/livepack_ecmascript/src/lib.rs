mod commonjs;
mod ecma_ast;
mod ecma_compiler;

pub use crate::{
  commonjs::{to_commonjs, CommonJsModule},
  ecma_ast::EcmaAst,
  ecma_compiler::{EcmaCompiler, TranspileOptions},
};

use oxc::{
  ast::ast::{Argument, CallExpression, Expression, ImportExpression},
  ast_visit::{walk, Visit},
  span::{GetSpan, Span},
};

pub struct DynamicImport {
  pub span: Span,
  pub source_span: Span,
  pub specifier: Option<String>,
}

/// Finds `import(..)` expressions and `require("..")` calls anywhere in a program.
#[derive(Default)]
pub struct RequestCollector {
  pub dynamic_imports: Vec<DynamicImport>,
  pub require_calls: Vec<String>,
}

impl<'a> Visit<'a> for RequestCollector {
  fn visit_import_expression(&mut self, it: &ImportExpression<'a>) {
    let specifier = match &it.source {
      Expression::StringLiteral(lit) => Some(lit.value.to_string()),
      _ => None,
    };
    self.dynamic_imports.push(DynamicImport {
      span: it.span,
      source_span: it.source.span(),
      specifier,
    });
    walk::walk_import_expression(self, it);
  }

  fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
    if let Expression::Identifier(callee) = &it.callee {
      if callee.name == "require" && it.arguments.len() == 1 {
        if let Some(Argument::StringLiteral(lit)) = it.arguments.first() {
          self.require_calls.push(lit.value.to_string());
        }
      }
    }
    walk::walk_call_expression(self, it);
  }
}

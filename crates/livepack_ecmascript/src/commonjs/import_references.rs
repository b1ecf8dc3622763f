use livepack_utils::concat_string;
use oxc::{
  ast::ast::{CallExpression, Expression, ExportNamedDeclaration, IdentifierReference, ObjectProperty},
  ast_visit::{walk, Visit},
  semantic::{Scoping, SymbolId},
  span::Span,
};
use rustc_hash::FxHashMap;

/// Finds every reference to an imported binding and records the member access that replaces it,
/// so importers always read the exporter's current value.
pub struct ImportReferences<'r> {
  scoping: &'r Scoping,
  bindings: &'r FxHashMap<SymbolId, String>,
  pub edits: Vec<(Span, String)>,
}

impl<'r> ImportReferences<'r> {
  pub fn new(scoping: &'r Scoping, bindings: &'r FxHashMap<SymbolId, String>) -> Self {
    Self { scoping, bindings, edits: vec![] }
  }

  fn resolve(&self, ident: &IdentifierReference<'_>) -> Option<&'r str> {
    let symbol_id = self.scoping.get_reference(ident.reference_id()).symbol_id()?;
    self.bindings.get(&symbol_id).map(String::as_str)
  }
}

impl<'a> Visit<'a> for ImportReferences<'_> {
  fn visit_identifier_reference(&mut self, it: &IdentifierReference<'a>) {
    if let Some(access) = self.resolve(it) {
      self.edits.push((it.span, access.to_string()));
    }
  }

  fn visit_object_property(&mut self, it: &ObjectProperty<'a>) {
    if it.shorthand {
      if let Expression::Identifier(ident) = &it.value {
        if let Some(access) = self.resolve(ident) {
          self.edits.push((it.span, concat_string!(ident.name, ": ", access)));
          return;
        }
      }
    }
    walk::walk_object_property(self, it);
  }

  // `foo()` must not become a method call on the module object.
  fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
    if let Expression::Identifier(callee) = &it.callee {
      if let Some(access) = self.resolve(callee) {
        self.edits.push((callee.span, concat_string!("(0, ", access, ")")));
        self.visit_arguments(&it.arguments);
        return;
      }
    }
    walk::walk_call_expression(self, it);
  }

  // Specifier lists are removed and turned into getters, so only declarations are walked.
  fn visit_export_named_declaration(&mut self, it: &ExportNamedDeclaration<'a>) {
    if let Some(declaration) = &it.declaration {
      self.visit_declaration(declaration);
    }
  }
}

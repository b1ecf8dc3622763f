//! Rewrites ES module syntax into the CommonJS shape the bundle runtime executes.
//!
//! Imports turn into `require` calls hoisted to the top of the module and every use of an
//! imported name reads through the required module, exports become live getters on `exports`,
//! and `import()` resolves through the same `require`.

mod helpers;
mod import_references;
mod request_collector;

use itertools::Itertools;
use livepack_error::BuildResult;
use livepack_utils::{
  concat_string,
  ecmascript::{js_string_literal, property_access_str, to_property_key},
  indexmap::FxIndexSet,
};
use oxc::{
  ast::ast::{
    Class, Declaration, ExportAllDeclaration, ExportDefaultDeclaration,
    ExportDefaultDeclarationKind, ExportNamedDeclaration, ExportSpecifier, Function,
    ImportDeclaration, ImportDeclarationSpecifier, ModuleExportName, Program, Statement,
  },
  ast_visit::Visit,
  semantic::{Scoping, SemanticBuilder, SymbolId},
  span::{GetSpan, SourceType, Span},
};
use rustc_hash::FxHashMap;
use string_wizard::MagicString;

use self::{
  helpers::RuntimeHelpers,
  import_references::ImportReferences,
  request_collector::{DynamicImport, RequestCollector},
};
use crate::EcmaCompiler;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonJsModule {
  /// Body of a `function (module, exports, require)` wrapper.
  pub code: String,
  /// Literal specifiers the module asks for, deduplicated, in source order.
  pub requests: Vec<String>,
}

pub fn to_commonjs(code: &str) -> BuildResult<CommonJsModule> {
  let ast = EcmaCompiler::parse(code, SourceType::mjs())?;
  let program = ast.program();
  let scoping = SemanticBuilder::new().build(program).semantic.into_scoping();
  let mut rewriter = CommonJsRewriter::new(code, &scoping);
  rewriter.rewrite(program);
  Ok(rewriter.finish())
}

/// An entry of the `__export` call. Getters for imported names are resolved once every import
/// has its module binding.
struct ExportGetter {
  name: String,
  value: String,
  local: Option<SymbolId>,
}

struct CommonJsRewriter<'code, 's> {
  magic: MagicString<'code>,
  scoping: &'s Scoping,
  helpers: RuntimeHelpers,
  hoisted: Vec<String>,
  getters: Vec<ExportGetter>,
  /// Import bindings and the member access each one reads through.
  bindings: FxHashMap<SymbolId, String>,
  requests: FxIndexSet<String>,
  has_module_syntax: bool,
  next_binding: usize,
}

impl<'code, 's> CommonJsRewriter<'code, 's> {
  fn new(code: &'code str, scoping: &'s Scoping) -> Self {
    Self {
      magic: MagicString::new(code),
      scoping,
      helpers: RuntimeHelpers::empty(),
      hoisted: vec![],
      getters: vec![],
      bindings: FxHashMap::default(),
      requests: FxIndexSet::default(),
      has_module_syntax: false,
      next_binding: 0,
    }
  }

  fn rewrite(&mut self, program: &Program<'_>) {
    for stmt in &program.body {
      match stmt {
        Statement::ImportDeclaration(decl) => self.rewrite_import(decl),
        Statement::ExportNamedDeclaration(decl) => self.rewrite_export_named(decl),
        Statement::ExportDefaultDeclaration(decl) => self.rewrite_export_default(decl),
        Statement::ExportAllDeclaration(decl) => self.rewrite_export_all(decl),
        _ => {}
      }
    }

    let mut references = ImportReferences::new(self.scoping, &self.bindings);
    references.visit_program(program);
    for (span, access) in references.edits {
      self.magic.update(span.start as usize, span.end as usize, access);
    }

    let mut collector = RequestCollector::default();
    collector.visit_program(program);
    for import in &collector.dynamic_imports {
      self.rewrite_dynamic_import(import);
    }
    self.requests.extend(collector.require_calls);
  }

  fn rewrite_import(&mut self, decl: &ImportDeclaration<'_>) {
    self.has_module_syntax = true;
    let require = self.require_call(decl.source.value.as_str());
    self.remove(decl.span);

    let specifiers = match &decl.specifiers {
      Some(specifiers) if !specifiers.is_empty() => specifiers,
      _ => {
        self.hoisted.push(concat_string!(require, ";"));
        return;
      }
    };

    let mut imports_default = false;
    let mut imports_named = false;
    let mut imports_namespace = false;
    for specifier in specifiers {
      match specifier {
        ImportDeclarationSpecifier::ImportDefaultSpecifier(_) => imports_default = true,
        ImportDeclarationSpecifier::ImportSpecifier(s)
          if s.imported.name().as_str() == "default" =>
        {
          imports_default = true;
        }
        ImportDeclarationSpecifier::ImportSpecifier(_) => imports_named = true,
        ImportDeclarationSpecifier::ImportNamespaceSpecifier(_) => imports_namespace = true,
      }
    }
    let needs_namespace = imports_namespace || (imports_default && imports_named);
    let binding = self.bind_module(require, imports_default, needs_namespace);

    for specifier in specifiers {
      let (local, access) = match specifier {
        ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
          (&s.local, property_access_str(&binding, "default"))
        }
        ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => (&s.local, binding.clone()),
        ImportDeclarationSpecifier::ImportSpecifier(s) => {
          (&s.local, property_access_str(&binding, &s.imported.name()))
        }
      };
      self.bindings.insert(local.symbol_id(), access);
    }
  }

  /// Hoists `var __module_N = require(..)`, wrapped in the interop helper the bindings need.
  /// A lone default only needs `{ default: module }` for modules that are not ES modules.
  fn bind_module(&mut self, require: String, needs_default: bool, needs_namespace: bool) -> String {
    let module = if needs_namespace {
      self.helpers |= RuntimeHelpers::IMPORT_STAR;
      concat_string!("__importStar(", require, ")")
    } else if needs_default {
      self.helpers |= RuntimeHelpers::IMPORT_DEFAULT;
      concat_string!("__importDefault(", require, ")")
    } else {
      require
    };
    let binding = self.next_binding_name();
    self.hoisted.push(format!("var {binding} = {module};"));
    binding
  }

  fn rewrite_export_named(&mut self, decl: &ExportNamedDeclaration<'_>) {
    self.has_module_syntax = true;

    if let Some(source) = &decl.source {
      let require = self.require_call(source.value.as_str());
      self.remove(decl.span);
      let is_default = |spec: &ExportSpecifier<'_>| spec.local.name().as_str() == "default";
      let exports_default = decl.specifiers.iter().any(is_default);
      let exports_named = !decl.specifiers.iter().all(is_default);
      let binding = self.bind_module(require, exports_default, exports_default && exports_named);
      for spec in &decl.specifiers {
        let value = property_access_str(&binding, &spec.local.name());
        self.add_getter(&spec.exported.name(), value, None);
      }
      return;
    }

    if let Some(declaration) = &decl.declaration {
      self.magic.remove(decl.span.start as usize, declaration.span().start as usize);
      match declaration {
        Declaration::VariableDeclaration(var) => {
          for declarator in &var.declarations {
            for id in declarator.id.get_binding_identifiers() {
              self.add_local_getter(id.name.as_str(), id.name.as_str());
            }
          }
        }
        Declaration::FunctionDeclaration(func) => {
          if let Some(id) = &func.id {
            self.add_local_getter(id.name.as_str(), id.name.as_str());
          }
        }
        Declaration::ClassDeclaration(class) => {
          if let Some(id) = &class.id {
            self.add_local_getter(id.name.as_str(), id.name.as_str());
          }
        }
        _ => {}
      }
      return;
    }

    self.remove(decl.span);
    for spec in &decl.specifiers {
      let local = match &spec.local {
        ModuleExportName::IdentifierReference(ident) => {
          self.scoping.get_reference(ident.reference_id()).symbol_id()
        }
        _ => None,
      };
      self.add_getter(&spec.exported.name(), spec.local.name().to_string(), local);
    }
  }

  fn rewrite_export_default(&mut self, decl: &ExportDefaultDeclaration<'_>) {
    self.has_module_syntax = true;
    match &decl.declaration {
      ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
        self.rewrite_default_function(decl.span, func);
      }
      ExportDefaultDeclarationKind::ClassDeclaration(class) => {
        self.rewrite_default_class(decl.span, class);
      }
      kind => {
        self.magic.update(
          decl.span.start as usize,
          kind.span().start as usize,
          "exports.default = ",
        );
      }
    }
  }

  fn rewrite_default_function(&mut self, span: Span, func: &Function<'_>) {
    match &func.id {
      Some(id) => {
        self.magic.remove(span.start as usize, func.span.start as usize);
        self.add_local_getter("default", id.name.as_str());
      }
      None => self.assign_default(span, func.span),
    }
  }

  fn rewrite_default_class(&mut self, span: Span, class: &Class<'_>) {
    match &class.id {
      Some(id) => {
        self.magic.remove(span.start as usize, class.span.start as usize);
        self.add_local_getter("default", id.name.as_str());
      }
      None => self.assign_default(span, class.span),
    }
  }

  /// `export default function () {}` becomes an assignment. The closing brace gains a
  /// semicolon so a following parenthesized statement is not parsed as a call.
  fn assign_default(&mut self, stmt_span: Span, decl_span: Span) {
    self.magic.update(stmt_span.start as usize, decl_span.start as usize, "exports.default = ");
    self.magic.update(decl_span.end as usize - 1, decl_span.end as usize, "};");
  }

  fn rewrite_export_all(&mut self, decl: &ExportAllDeclaration<'_>) {
    self.has_module_syntax = true;
    let require = self.require_call(decl.source.value.as_str());
    self.remove(decl.span);
    match &decl.exported {
      None => {
        self.helpers |= RuntimeHelpers::RE_EXPORT;
        self.hoisted.push(format!("__reExport(exports, {require});"));
      }
      Some(exported) => {
        self.helpers |= RuntimeHelpers::IMPORT_STAR;
        let binding = self.next_binding_name();
        self.hoisted.push(format!("var {binding} = __importStar({require});"));
        self.add_getter(&exported.name(), binding, None);
      }
    }
  }

  fn rewrite_dynamic_import(&mut self, import: &DynamicImport) {
    self.helpers |= RuntimeHelpers::IMPORT_STAR;
    if let Some(specifier) = &import.specifier {
      self.requests.insert(specifier.clone());
    }
    self.magic.update(
      import.span.start as usize,
      import.source_span.start as usize,
      "Promise.resolve().then(function () { return __importStar(require(",
    );
    self.magic.update(import.source_span.end as usize, import.span.end as usize, ")); })");
  }

  fn require_call(&mut self, specifier: &str) -> String {
    self.requests.insert(specifier.to_string());
    concat_string!("require(", js_string_literal(specifier), ")")
  }

  fn add_local_getter(&mut self, exported: &str, local: &str) {
    self.add_getter(exported, local.to_string(), None);
  }

  fn add_getter(&mut self, name: &str, value: String, local: Option<SymbolId>) {
    self.getters.push(ExportGetter { name: name.to_string(), value, local });
  }

  fn remove(&mut self, span: Span) {
    self.magic.remove(span.start as usize, span.end as usize);
  }

  fn next_binding_name(&mut self) -> String {
    let name = format!("__module_{}", self.next_binding);
    self.next_binding += 1;
    name
  }

  fn finish(self) -> CommonJsModule {
    let mut helpers = self.helpers;
    if !self.getters.is_empty() {
      helpers |= RuntimeHelpers::EXPORT;
    }

    let mut prologue = String::new();
    if self.has_module_syntax {
      prologue.push_str("\"use strict\";\n");
    }
    prologue.push_str(&helpers.render());
    if self.has_module_syntax {
      prologue.push_str("Object.defineProperty(exports, \"__esModule\", { value: true });\n");
    }
    if !self.getters.is_empty() {
      let entries = self
        .getters
        .iter()
        .map(|getter| {
          let value = getter
            .local
            .and_then(|symbol_id| self.bindings.get(&symbol_id))
            .unwrap_or(&getter.value);
          format!("  {}: function () {{ return {value}; }}", to_property_key(&getter.name))
        })
        .join(",\n");
      prologue.push_str(&format!("__export(exports, {{\n{entries}\n}});\n"));
    }
    for line in &self.hoisted {
      prologue.push_str(line);
      prologue.push('\n');
    }

    CommonJsModule {
      code: concat_string!(prologue, self.magic.to_string()),
      requests: self.requests.into_iter().collect(),
    }
  }
}

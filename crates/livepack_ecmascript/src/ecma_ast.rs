use arcstr::ArcStr;
use oxc::{
  allocator::Allocator, ast::ast::Program, diagnostics::OxcDiagnostic, parser::Parser,
  span::SourceType,
};
use self_cell::self_cell;

struct AstOwner {
  source: ArcStr,
  allocator: Allocator,
}

type ProgramOf<'ast> = Program<'ast>;

self_cell!(
  /// The program of one file, stored next to the source text and arena it borrows from.
  struct ParsedProgram {
    owner: AstOwner,

    #[covariant]
    dependent: ProgramOf,
  }
);

/// A parsed script file that can be stored and passed around without tracking the arena lifetime.
pub struct EcmaAst {
  cell: ParsedProgram,
  source_type: SourceType,
}

impl EcmaAst {
  /// Parses `source`. Recoverable syntax errors count as failures, a file either parses cleanly
  /// or is rejected.
  pub(crate) fn parse(source: ArcStr, source_type: SourceType) -> Result<Self, Vec<OxcDiagnostic>> {
    let owner = AstOwner { source, allocator: Allocator::default() };
    let cell = ParsedProgram::try_new(owner, |owner| {
      let ret = Parser::new(&owner.allocator, &owner.source, source_type).parse();
      if ret.errors.is_empty() && !ret.panicked {
        Ok(ret.program)
      } else if ret.errors.is_empty() {
        Err(vec![OxcDiagnostic::error("Unexpected end of input")])
      } else {
        Err(ret.errors)
      }
    })?;
    Ok(Self { cell, source_type })
  }

  pub fn program(&self) -> &Program<'_> {
    self.cell.borrow_dependent()
  }

  /// Runs a mutating pass that needs the arena and the program at once.
  pub fn transform<Ret>(
    &mut self,
    pass: impl for<'ast> FnOnce(&'ast Allocator, &mut Program<'ast>) -> Ret,
  ) -> Ret {
    self.cell.with_dependent_mut(|owner, program| pass(&owner.allocator, program))
  }
}

impl std::fmt::Debug for EcmaAst {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("EcmaAst").field("source_type", &self.source_type).finish_non_exhaustive()
  }
}

use std::fmt::Debug;

use arcstr::ArcStr;
use oxc::{
  allocator::Allocator,
  ast::ast::Program,
  span::{SourceType, Span},
};
use self_cell::self_cell;

pub struct ProgramOwner {
  pub source: ArcStr,
  pub allocator: Allocator,
}

pub struct ProgramDependent<'cell> {
  pub program: Program<'cell>,
}

self_cell!(
  /// Keeps `Program<'ast>` together with the source text and the arena it borrows from, so a
  /// module tree can be stored, moved between stages and handed to callers as an owned value.
  pub struct ProgramCell {
    owner: ProgramOwner,

    #[covariant]
    dependent: ProgramDependent,
  }
);

pub struct WithMutFields<'outer, 'inner> {
  pub source: &'inner ArcStr,
  pub allocator: &'inner Allocator,
  pub program: &'outer mut Program<'inner>,
}

impl ProgramCell {
  pub fn with_mut<'outer, Ret>(
    &'outer mut self,
    func: impl for<'inner> ::core::ops::FnOnce(WithMutFields<'outer, 'inner>) -> Ret,
  ) -> Ret {
    self.with_dependent_mut::<'outer, Ret>(
      |owner: &ProgramOwner, dependent: &'outer mut ProgramDependent| {
        func(WithMutFields {
          source: &owner.source,
          allocator: &owner.allocator,
          program: &mut dependent.program,
        })
      },
    )
  }
}

/// - To access `&mut ast::Program`, use `ast.program.with_mut(|fields| { fields.program; })`.
pub struct EcmaAst {
  pub program: ProgramCell,
  pub source_type: SourceType,
}

impl EcmaAst {
  pub fn source(&self) -> &ArcStr {
    &self.program.borrow_owner().source
  }

  pub fn program(&self) -> &Program {
    &self.program.borrow_dependent().program
  }

  /// Source text covered by `span`, empty if the span is out of range.
  pub fn slice(&self, span: Span) -> &str {
    self.source().get(span.start as usize..span.end as usize).unwrap_or_default()
  }
}

impl Debug for EcmaAst {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("EcmaAst")
      .field("source_len", &self.source().len())
      .field("statements", &self.program().body.len())
      .finish_non_exhaustive()
  }
}

unsafe impl Send for EcmaAst {}
unsafe impl Sync for EcmaAst {}

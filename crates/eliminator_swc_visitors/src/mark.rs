use eliminator_common::Symbol;
use eliminator_error::{Error, Result};
use eliminator_swc_utils::{ExprStmtExt, ImportSpecifierExt};
use rustc_hash::FxHashSet;
use swc_core::ecma::{
  ast,
  visit::{noop_visit_type, Visit, VisitWith},
};

use crate::{is_identifier_referenced, pattern::for_each_binding, ReferenceGraph};

/// A construct that introduces removable bindings.
#[derive(Debug, Clone, Copy)]
pub enum BindingSite<'a> {
  /// `function f() {}` or the target of a statement `f = function () {};` / `f = () => {};`.
  Function(&'a ast::Ident),
  /// The left-hand side of a variable declarator, possibly a destructuring pattern.
  Declarator(&'a ast::Pat),
  /// The local name of any of the three import specifier forms.
  Import(&'a ast::Ident),
}

impl<'a> BindingSite<'a> {
  pub fn for_each_ident(&self, f: &mut impl FnMut(&ast::Ident)) -> Result<()> {
    match self {
      BindingSite::Function(ident) | BindingSite::Import(ident) => {
        f(ident);
        Ok(())
      }
      BindingSite::Declarator(pat) => for_each_binding(pat, f),
    }
  }
}

/// Collects every binding that is referenced before any export is removed.
///
/// This is the upper bound of what the sweeper may delete: a binding that was already unused
/// in the input is none of our business.
pub struct CandidateCollector<'g, G: ReferenceGraph + ?Sized> {
  graph: &'g G,
  candidates: FxHashSet<Symbol>,
  error: Option<Error>,
}

impl<'g, G: ReferenceGraph + ?Sized> CandidateCollector<'g, G> {
  pub fn new(graph: &'g G) -> Self {
    Self {
      graph,
      candidates: Default::default(),
      error: None,
    }
  }

  pub fn collect(mut self, module: &ast::Module) -> Result<FxHashSet<Symbol>> {
    module.visit_with(&mut self);
    match self.error {
      Some(err) => Err(err),
      None => Ok(self.candidates),
    }
  }

  fn record(&mut self, site: BindingSite) {
    if self.error.is_some() {
      return;
    }
    let graph = self.graph;
    let candidates = &mut self.candidates;
    let res = site.for_each_ident(&mut |ident| {
      if is_identifier_referenced(graph, &ident.to_id()) {
        candidates.insert(ident.into());
      }
    });
    if let Err(err) = res {
      self.error = Some(err);
    }
  }
}

impl<'g, G: ReferenceGraph + ?Sized> Visit for CandidateCollector<'g, G> {
  noop_visit_type!();

  fn visit_fn_decl(&mut self, n: &ast::FnDecl) {
    self.record(BindingSite::Function(&n.ident));
    n.visit_children_with(self);
  }

  // Only the statement form, the one the sweeper can take out whole.
  fn visit_expr_stmt(&mut self, n: &ast::ExprStmt) {
    if let Some(target) = n.fn_assignment_target() {
      self.record(BindingSite::Function(target));
    }
    n.visit_children_with(self);
  }

  fn visit_var_declarator(&mut self, n: &ast::VarDeclarator) {
    self.record(BindingSite::Declarator(&n.name));
    n.init.visit_with(self);
  }

  fn visit_import_specifier(&mut self, n: &ast::ImportSpecifier) {
    self.record(BindingSite::Import(n.local()));
  }
}

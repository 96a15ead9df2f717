use std::mem;

use eliminator_common::Symbol;
use eliminator_error::{Error, Result};
use eliminator_swc_utils::{ExprStmtExt, ImportSpecifierExt};
use rustc_hash::FxHashSet;
use swc_core::{
  common::DUMMY_SP,
  ecma::{
    ast,
    visit::{noop_visit_mut_type, VisitMut, VisitMutWith},
  },
};
use tracing::{debug, instrument, trace};

use crate::{
  is_identifier_referenced, pattern::retain_bindings, BindingUsage, ReferenceGraph, ScopeAnalyzer,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepOutcome {
  /// Passes run, including the final one that removed nothing.
  pub passes: usize,
  pub removed: usize,
}

/// Removes dead candidates until a pass removes nothing.
///
/// The reference graph is rebuilt before every pass: code removed by the previous pass must
/// stop keeping its dependencies alive. Bindings whose declaration is removed leave
/// `candidates`.
#[instrument(skip_all)]
pub fn sweep<A: ScopeAnalyzer + ?Sized>(
  module: &mut ast::Module,
  analyzer: &A,
  candidates: &mut FxHashSet<Symbol>,
) -> Result<SweepOutcome> {
  let mut outcome = SweepOutcome::default();
  loop {
    let graph = analyzer.crawl(module);
    let mut sweeper = Sweeper::new(&graph, candidates);
    module.visit_mut_with(&mut sweeper);
    let Sweeper {
      removed,
      swept,
      error,
      ..
    } = sweeper;
    if let Some(err) = error {
      return Err(err);
    }

    outcome.passes += 1;
    outcome.removed += removed;
    debug!(pass = outcome.passes, removed, "Sweep pass finished");

    for symbol in &swept {
      candidates.remove(symbol);
    }
    if removed == 0 {
      return Ok(outcome);
    }
  }
}

fn is_dead<G: ReferenceGraph + ?Sized>(
  graph: &G,
  candidates: &FxHashSet<Symbol>,
  ident: &ast::Ident,
) -> bool {
  let id = ident.to_id();
  candidates.contains(&Symbol::from(ident))
    && !is_identifier_referenced(graph, &id)
    // `x = 5` without its `let x` would throw.
    && !graph.usage(&id).map_or(false, BindingUsage::has_fixed_writes)
}

/// One removal pass against a fixed reference graph.
struct Sweeper<'a, G: ReferenceGraph + ?Sized> {
  graph: &'a G,
  candidates: &'a FxHashSet<Symbol>,
  removed: usize,
  /// Bindings whose declaration was removed in this pass.
  swept: Vec<Symbol>,
  /// Set while visiting the head of a `for`, `for-in` or `for-of` loop.
  in_loop_head: bool,
  error: Option<Error>,
}

impl<'a, G: ReferenceGraph + ?Sized> Sweeper<'a, G> {
  fn new(graph: &'a G, candidates: &'a FxHashSet<Symbol>) -> Self {
    Self {
      graph,
      candidates,
      removed: 0,
      swept: vec![],
      in_loop_head: false,
      error: None,
    }
  }

  fn is_dead(&self, ident: &ast::Ident) -> bool {
    is_dead(self.graph, self.candidates, ident)
  }

  fn sweep_binding(&mut self, symbol: Symbol) {
    trace!("Swept {symbol}");
    self.removed += 1;
    self.swept.push(symbol);
  }

  fn prune_declarators(&mut self, decls: &mut Vec<ast::VarDeclarator>) {
    if self.error.is_some() {
      return;
    }
    let (graph, candidates) = (self.graph, self.candidates);
    let mut swept = vec![];
    let mut failure = None;
    decls.retain_mut(|decl| {
      if failure.is_some() {
        return true;
      }
      let outcome = retain_bindings(&mut decl.name, &mut |ident| {
        if is_dead(graph, candidates, ident) {
          swept.push(Symbol::from(ident));
          false
        } else {
          true
        }
      });
      match outcome {
        Ok(retained) => !retained.is_empty,
        Err(err) => {
          failure = Some(err);
          true
        }
      }
    });
    for symbol in swept {
      self.sweep_binding(symbol);
    }
    self.error = failure;
  }

  /// `false` when the statement has to go: a dead function declaration, a dead function-valued
  /// assignment, or a variable declaration whose declarators are all gone.
  fn retain_stmt(&mut self, stmt: &ast::Stmt) -> bool {
    match stmt {
      ast::Stmt::Decl(ast::Decl::Fn(fn_decl)) => {
        if self.is_dead(&fn_decl.ident) {
          self.sweep_binding(Symbol::from(&fn_decl.ident));
          false
        } else {
          true
        }
      }
      ast::Stmt::Decl(ast::Decl::Var(var)) => !var.decls.is_empty(),
      ast::Stmt::Expr(expr_stmt) => match expr_stmt.fn_assignment_target() {
        Some(target) if self.is_dead(target) => {
          trace!("Swept assignment to {}", Symbol::from(target));
          self.removed += 1;
          false
        }
        _ => true,
      },
      _ => true,
    }
  }

  fn retain_import(&mut self, import: &mut ast::ImportDecl) -> bool {
    // `import 'polyfill'` binds nothing.
    if import.specifiers.is_empty() {
      return true;
    }
    let (graph, candidates) = (self.graph, self.candidates);
    let mut swept = vec![];
    import.specifiers.retain(|specifier| {
      let local = specifier.local();
      if is_dead(graph, candidates, local) {
        swept.push(Symbol::from(local));
        false
      } else {
        true
      }
    });
    for symbol in swept {
      self.sweep_binding(symbol);
    }
    !import.specifiers.is_empty()
  }

  fn with_loop_head(&mut self, f: impl FnOnce(&mut Self)) {
    let prev = mem::replace(&mut self.in_loop_head, true);
    f(self);
    self.in_loop_head = prev;
  }
}

impl<'a, G: ReferenceGraph + ?Sized> VisitMut for Sweeper<'a, G> {
  noop_visit_mut_type!();

  fn visit_mut_module_items(&mut self, items: &mut Vec<ast::ModuleItem>) {
    for item in items.iter_mut() {
      match item {
        ast::ModuleItem::Stmt(stmt) => stmt.visit_mut_children_with(self),
        ast::ModuleItem::ModuleDecl(decl) => decl.visit_mut_with(self),
      }
    }
    items.retain_mut(|item| match item {
      ast::ModuleItem::Stmt(stmt) => self.retain_stmt(stmt),
      ast::ModuleItem::ModuleDecl(ast::ModuleDecl::Import(import)) => self.retain_import(import),
      ast::ModuleItem::ModuleDecl(ast::ModuleDecl::ExportDecl(ast::ExportDecl {
        decl: ast::Decl::Var(var),
        ..
      })) => !var.decls.is_empty(),
      _ => true,
    });
  }

  fn visit_mut_stmts(&mut self, stmts: &mut Vec<ast::Stmt>) {
    for stmt in stmts.iter_mut() {
      stmt.visit_mut_children_with(self);
    }
    stmts.retain(|stmt| self.retain_stmt(stmt));
  }

  // Statements outside of a statement list, e.g. `if (a) var b = () => {};`.
  fn visit_mut_stmt(&mut self, n: &mut ast::Stmt) {
    n.visit_mut_children_with(self);
    if !self.retain_stmt(n) {
      *n = ast::Stmt::Empty(ast::EmptyStmt { span: DUMMY_SP });
    }
  }

  // A pattern head of `for (x of xs)` assigns instead of declaring.
  fn visit_mut_pat(&mut self, n: &mut ast::Pat) {
    self.in_loop_head = false;
    n.visit_mut_children_with(self);
  }

  fn visit_mut_var_decl(&mut self, n: &mut ast::VarDecl) {
    let in_loop_head = mem::take(&mut self.in_loop_head);
    for decl in n.decls.iter_mut() {
      decl.visit_mut_children_with(self);
    }
    // The loop needs its declaration even if nothing reads the binding.
    if !in_loop_head {
      self.prune_declarators(&mut n.decls);
    }
  }

  fn visit_mut_for_stmt(&mut self, n: &mut ast::ForStmt) {
    match &mut n.init {
      Some(ast::VarDeclOrExpr::VarDecl(var)) => {
        self.with_loop_head(|this| var.visit_mut_with(this))
      }
      init => init.visit_mut_with(self),
    }
    n.test.visit_mut_with(self);
    n.update.visit_mut_with(self);
    n.body.visit_mut_with(self);
  }

  fn visit_mut_for_in_stmt(&mut self, n: &mut ast::ForInStmt) {
    self.with_loop_head(|this| n.left.visit_mut_with(this));
    n.right.visit_mut_with(self);
    n.body.visit_mut_with(self);
  }

  fn visit_mut_for_of_stmt(&mut self, n: &mut ast::ForOfStmt) {
    self.with_loop_head(|this| n.left.visit_mut_with(this));
    n.right.visit_mut_with(self);
    n.body.visit_mut_with(self);
  }
}

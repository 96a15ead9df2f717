use std::mem;

use eliminator_swc_utils::ExprStmtExt;
use rustc_hash::{FxHashMap, FxHashSet};
use swc_core::ecma::{
  ast::{self, Id},
  utils::{collect_decls, var::VarCollector},
  visit::{noop_visit_type, Visit, VisitWith},
};

/// How a binding is used somewhere in the module.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BindingUsage {
  pub reads: u32,
  pub writes: u32,
  /// Reads and writes that are not nested inside the binding's own function declaration.
  /// Only meaningful for bindings declared by a function declaration.
  pub escaping: u32,
  /// Writes made by statements of the form `x = function () {}` / `x = () => {}`, which are
  /// removed together with the binding.
  pub fn_assignments: u32,
}

impl BindingUsage {
  pub fn is_referenced(&self) -> bool {
    self.reads > 0
  }

  /// Whether some write would be left dangling if the declaration went away.
  pub fn has_fixed_writes(&self) -> bool {
    self.writes > self.fn_assignments
  }
}

/// Answers "how is this binding used" for one state of a module.
pub trait ReferenceGraph {
  fn usage(&self, id: &Id) -> Option<&BindingUsage>;

  /// Whether `id` is declared by a function declaration, the only kind of binding that can be
  /// referenced exclusively by itself.
  fn is_function_declaration(&self, id: &Id) -> bool;
}

/// Builds a fresh [ReferenceGraph] for a resolved module. Called again after every mutation,
/// since removed code must stop counting as a user.
pub trait ScopeAnalyzer {
  type Graph: ReferenceGraph;

  fn crawl(&self, module: &ast::Module) -> Self::Graph;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceAnalyzer;

impl ScopeAnalyzer for ReferenceAnalyzer {
  type Graph = ScopeSnapshot;

  fn crawl(&self, module: &ast::Module) -> ScopeSnapshot {
    ScopeSnapshot::crawl(module)
  }
}

#[derive(Debug, Default)]
pub struct ScopeSnapshot {
  usages: FxHashMap<Id, BindingUsage>,
  fn_decls: FxHashSet<Id>,
}

impl ScopeSnapshot {
  /// The module must have gone through `resolver`, otherwise every `x` in the module
  /// is the same binding.
  pub fn crawl(module: &ast::Module) -> Self {
    let mut collector = ReferenceCollector::default();
    module.visit_with(&mut collector);
    let ReferenceCollector {
      mut snapshot,
      named_exprs,
      ..
    } = collector;

    // Globals and names declared nowhere in the module have no binding to report on.
    let mut declared: FxHashSet<Id> = collect_decls::<Id, _>(module).into_iter().collect();
    declared.extend(named_exprs);
    snapshot.usages.retain(|id, _| declared.contains(id));
    snapshot
  }

  pub fn is_empty(&self) -> bool {
    self.usages.is_empty()
  }
}

impl ReferenceGraph for ScopeSnapshot {
  fn usage(&self, id: &Id) -> Option<&BindingUsage> {
    self.usages.get(id)
  }

  fn is_function_declaration(&self, id: &Id) -> bool {
    self.fn_decls.contains(id)
  }
}

#[derive(Clone, Copy)]
enum Access {
  Read,
  Write,
  ReadWrite,
}

#[derive(Default)]
struct ReferenceCollector {
  snapshot: ScopeSnapshot,
  /// Function declarations enclosing the node being visited, innermost last.
  enclosing_fn_decls: Vec<Id>,
  /// Set while visiting the target of an assignment or of a `for-in`/`for-of` head.
  in_assign_target: bool,
  /// Names of function and class expressions, visible only inside the expression.
  named_exprs: Vec<Id>,
}

impl ReferenceCollector {
  fn add_reference(&mut self, ident: &ast::Ident, access: Access) {
    let id = ident.to_id();
    let is_self_reference = self.enclosing_fn_decls.contains(&id);
    let usage = self.snapshot.usages.entry(id).or_default();
    match access {
      Access::Read => usage.reads += 1,
      Access::Write => usage.writes += 1,
      Access::ReadWrite => {
        usage.reads += 1;
        usage.writes += 1;
      }
    }
    if !is_self_reference {
      usage.escaping += 1;
    }
  }

  fn with_assign_target(&mut self, in_assign_target: bool, f: impl FnOnce(&mut Self)) {
    let prev = mem::replace(&mut self.in_assign_target, in_assign_target);
    f(self);
    self.in_assign_target = prev;
  }

  fn visit_write_target(&mut self, expr: &ast::Expr) {
    match expr {
      ast::Expr::Ident(ident) => self.add_reference(ident, Access::Write),
      _ => expr.visit_with(self),
    }
  }
}

impl Visit for ReferenceCollector {
  noop_visit_type!();

  fn visit_expr(&mut self, n: &ast::Expr) {
    if let ast::Expr::Ident(ident) = n {
      self.add_reference(ident, Access::Read);
    }
    self.with_assign_target(false, |this| n.visit_children_with(this));
  }

  fn visit_prop(&mut self, n: &ast::Prop) {
    if let ast::Prop::Shorthand(ident) = n {
      self.add_reference(ident, Access::Read);
    }
    n.visit_children_with(self);
  }

  fn visit_fn_decl(&mut self, n: &ast::FnDecl) {
    let id = n.ident.to_id();
    self.snapshot.fn_decls.insert(id.clone());
    self.enclosing_fn_decls.push(id);
    n.function.visit_with(self);
    self.enclosing_fn_decls.pop();
  }

  fn visit_fn_expr(&mut self, n: &ast::FnExpr) {
    if let Some(ident) = &n.ident {
      self.named_exprs.push(ident.to_id());
    }
    n.function.visit_with(self);
  }

  fn visit_class_expr(&mut self, n: &ast::ClassExpr) {
    if let Some(ident) = &n.ident {
      self.named_exprs.push(ident.to_id());
    }
    n.class.visit_with(self);
  }

  fn visit_expr_stmt(&mut self, n: &ast::ExprStmt) {
    if let Some(target) = n.fn_assignment_target() {
      let usage = self.snapshot.usages.entry(target.to_id()).or_default();
      usage.fn_assignments += 1;
    }
    n.visit_children_with(self);
  }

  fn visit_assign_expr(&mut self, n: &ast::AssignExpr) {
    match &n.left {
      ast::PatOrExpr::Expr(expr) => self.visit_write_target(expr),
      ast::PatOrExpr::Pat(pat) => match pat.as_ref() {
        ast::Pat::Ident(binding) => self.add_reference(&binding.id, Access::Write),
        ast::Pat::Expr(expr) => self.visit_write_target(expr),
        _ => self.with_assign_target(true, |this| pat.visit_with(this)),
      },
    }
    n.right.visit_with(self);
  }

  fn visit_update_expr(&mut self, n: &ast::UpdateExpr) {
    match n.arg.as_ref() {
      ast::Expr::Ident(ident) => self.add_reference(ident, Access::ReadWrite),
      arg => arg.visit_with(self),
    }
  }

  fn visit_pat(&mut self, n: &ast::Pat) {
    if self.in_assign_target {
      match n {
        ast::Pat::Ident(binding) => {
          self.add_reference(&binding.id, Access::Write);
          return;
        }
        ast::Pat::Expr(expr) => {
          self.visit_write_target(expr);
          return;
        }
        _ => {}
      }
    }
    n.visit_children_with(self);
  }

  fn visit_assign_pat_prop(&mut self, n: &ast::AssignPatProp) {
    if self.in_assign_target {
      self.add_reference(&n.key, Access::Write);
    }
    n.value.visit_with(self);
  }

  // `for (const x of xs)` declares `x` rather than assigning it.
  fn visit_var_decl(&mut self, n: &ast::VarDecl) {
    self.with_assign_target(false, |this| n.visit_children_with(this));
  }

  fn visit_for_in_stmt(&mut self, n: &ast::ForInStmt) {
    self.with_assign_target(true, |this| n.left.visit_with(this));
    n.right.visit_with(self);
    n.body.visit_with(self);
  }

  fn visit_for_of_stmt(&mut self, n: &ast::ForOfStmt) {
    self.with_assign_target(true, |this| n.left.visit_with(this));
    n.right.visit_with(self);
    n.body.visit_with(self);
  }

  // `export { foo }` observes `foo`. `export { foo } from './foo'` names another module's
  // binding and observes nothing here.
  fn visit_named_export(&mut self, n: &ast::NamedExport) {
    if n.src.is_some() {
      return;
    }
    for specifier in &n.specifiers {
      if let ast::ExportSpecifier::Named(named) = specifier {
        if let ast::ModuleExportName::Ident(ident) = &named.orig {
          self.add_reference(ident, Access::Read);
        }
      }
    }
  }

  // Declarations that are exported in place are observed by importers.
  fn visit_export_decl(&mut self, n: &ast::ExportDecl) {
    match &n.decl {
      ast::Decl::Fn(f) => self.add_reference(&f.ident, Access::Read),
      ast::Decl::Class(c) => self.add_reference(&c.ident, Access::Read),
      ast::Decl::Var(var) => {
        let mut declared: Vec<ast::Ident> = Default::default();
        var.visit_with(&mut VarCollector { to: &mut declared });
        for ident in &declared {
          self.add_reference(ident, Access::Read);
        }
      }
      _ => {}
    }
    n.decl.visit_with(self);
  }

  fn visit_export_default_decl(&mut self, n: &ast::ExportDefaultDecl) {
    match &n.decl {
      ast::DefaultDecl::Fn(ast::FnExpr {
        ident: Some(ident), ..
      })
      | ast::DefaultDecl::Class(ast::ClassExpr {
        ident: Some(ident), ..
      }) => self.add_reference(ident, Access::Read),
      _ => {}
    }
    n.decl.visit_with(self);
  }

  fn visit_jsx_element_name(&mut self, n: &ast::JSXElementName) {
    if let ast::JSXElementName::Ident(ident) = n {
      self.add_reference(ident, Access::Read);
    }
    n.visit_children_with(self);
  }

  fn visit_jsx_object(&mut self, n: &ast::JSXObject) {
    if let ast::JSXObject::Ident(ident) = n {
      self.add_reference(ident, Access::Read);
    }
    n.visit_children_with(self);
  }
}

#[cfg(test)]
mod tests {
  use eliminator_test_utils::parse_resolved;

  use super::*;

  fn usage_of(snapshot: &ScopeSnapshot, name: &str) -> BindingUsage {
    snapshot
      .usages
      .iter()
      .find(|((sym, _), _)| &**sym == name)
      .map(|(_, usage)| *usage)
      .unwrap_or_default()
  }

  #[test]
  fn declarations_are_not_references() {
    let module = parse_resolved("const a = 1; function f(b) { let c; }");
    let snapshot = ScopeSnapshot::crawl(&module);
    assert!(snapshot.is_empty());
  }

  #[test]
  fn counts_reads_and_writes() {
    let module = parse_resolved(
      r#"
      let a = 1;
      a = 2;
      a += 3;
      console.log(a, { a });
      "#,
    );
    let snapshot = ScopeSnapshot::crawl(&module);
    let usage = usage_of(&snapshot, "a");
    assert_eq!(usage.reads, 2);
    assert_eq!(usage.writes, 2);
  }

  #[test]
  fn update_expression_reads_and_writes() {
    let module = parse_resolved("let n = 0; n++;");
    let usage = usage_of(&ScopeSnapshot::crawl(&module), "n");
    assert_eq!((usage.reads, usage.writes), (1, 1));
  }

  #[test]
  fn destructuring_assignment_writes_each_leaf() {
    let module = parse_resolved("let a, b, c; [a, { b, x: c = a }] = value;");
    let snapshot = ScopeSnapshot::crawl(&module);
    assert_eq!(usage_of(&snapshot, "a").writes, 1);
    assert_eq!(usage_of(&snapshot, "a").reads, 1);
    assert_eq!(usage_of(&snapshot, "b").writes, 1);
    assert_eq!(usage_of(&snapshot, "c").writes, 1);
    assert_eq!(usage_of(&snapshot, "c").reads, 0);
  }

  #[test]
  fn member_properties_and_keys_are_not_references() {
    let module = parse_resolved("const a = 1; obj.a; ({ a: 1 }); class K { a() {} }");
    assert_eq!(usage_of(&ScopeSnapshot::crawl(&module), "a").reads, 0);
  }

  #[test]
  fn self_references_do_not_escape() {
    let module = parse_resolved(
      r#"
      function loop(n) { return n > 0 ? loop(n - 1) : loop; }
      function used() {}
      used();
      "#,
    );
    let snapshot = ScopeSnapshot::crawl(&module);
    let recursion = usage_of(&snapshot, "loop");
    assert_eq!(recursion.reads, 2);
    assert_eq!(recursion.escaping, 0);
    assert_eq!(usage_of(&snapshot, "used").escaping, 1);
    assert!(snapshot
      .usages
      .keys()
      .filter(|(sym, _)| &**sym == "loop")
      .all(|id| snapshot.is_function_declaration(id)));
  }

  #[test]
  fn local_export_specifiers_observe_bindings() {
    let module = parse_resolved(
      r#"
      const local = 1;
      export { local as renamed };
      export { remote } from './remote';
      "#,
    );
    let snapshot = ScopeSnapshot::crawl(&module);
    assert_eq!(usage_of(&snapshot, "local").reads, 1);
    assert_eq!(usage_of(&snapshot, "remote").reads, 0);
  }

  #[test]
  fn exported_declarations_are_observed() {
    let module = parse_resolved(
      r#"
      export function f() {}
      export const { a, b: [c] } = obj;
      export default function g() {}
      "#,
    );
    let snapshot = ScopeSnapshot::crawl(&module);
    for name in ["f", "a", "c", "g"] {
      assert_eq!(usage_of(&snapshot, name).escaping, 1, "{name}");
    }
  }

  #[test]
  fn jsx_element_names_are_references() {
    let module =
      parse_resolved("import Link from 'next/link'; const el = <Link.Item><Link /></Link.Item>;");
    assert_eq!(usage_of(&ScopeSnapshot::crawl(&module), "Link").reads, 3);
  }

  #[test]
  fn undeclared_names_are_not_tracked() {
    let module = parse_resolved(
      r#"
      handler = function () {};
      handler();
      console.log(handler);
      export function foo() { return handler(); }
      "#,
    );
    let snapshot = ScopeSnapshot::crawl(&module);
    assert_eq!(usage_of(&snapshot, "handler"), BindingUsage::default());
    assert_eq!(usage_of(&snapshot, "console"), BindingUsage::default());
    assert_eq!(usage_of(&snapshot, "foo").reads, 1);
  }

  #[test]
  fn statement_level_function_assignments_are_counted_apart() {
    let module = parse_resolved(
      r#"
      let a, b, c;
      a = () => 1;
      (b = function () {});
      c = b = () => 2;
      "#,
    );
    let snapshot = ScopeSnapshot::crawl(&module);
    let a = usage_of(&snapshot, "a");
    assert_eq!((a.writes, a.fn_assignments), (1, 1));
    assert!(!a.has_fixed_writes());
    let b = usage_of(&snapshot, "b");
    assert_eq!((b.writes, b.fn_assignments), (2, 1));
    assert!(b.has_fixed_writes());
    assert!(usage_of(&snapshot, "c").has_fixed_writes());
  }

  #[test]
  fn named_function_expressions_are_declared() {
    let module = parse_resolved("const f = function g() { g(); }; f();");
    assert_eq!(usage_of(&ScopeSnapshot::crawl(&module), "g").reads, 1);
  }
}

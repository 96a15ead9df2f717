use swc_core::{
  common::Mark,
  ecma::{ast, transforms::base::resolver, visit::VisitMutWith},
};

/// Gives every binding a `SyntaxContext` of its own. Must run inside `GLOBALS.set`.
pub fn resolve(
  ast: &mut ast::Module,
  unresolved_mark: Mark,
  top_level_mark: Mark,
  typescript: bool,
) {
  ast.visit_mut_with(&mut resolver(unresolved_mark, top_level_mark, typescript));
}

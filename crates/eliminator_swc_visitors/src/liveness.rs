use swc_core::ecma::ast::Id;

use crate::ReferenceGraph;

/// Whether the binding `id` is used from outside its own declaring construct.
///
/// Functions declared with a function declaration may call themselves. One whose every read
/// and write sits inside its own body is unobservable, so it counts as unreferenced.
/// A binding the graph has never seen is unreferenced too: this keeps partially analyzed
/// modules untouched instead of failing.
pub fn is_identifier_referenced<G: ReferenceGraph + ?Sized>(graph: &G, id: &Id) -> bool {
  let Some(usage) = graph.usage(id) else {
    return false;
  };
  if !usage.is_referenced() {
    return false;
  }
  if graph.is_function_declaration(id) {
    return usage.escaping > 0;
  }
  true
}

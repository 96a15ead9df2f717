use std::fmt::{Debug, Display};

use swc_core::{
  common::SyntaxContext,
  ecma::{ast, atoms::JsWord},
};

/// A resolved binding: the name plus the `SyntaxContext` the resolver assigned to its scope.
///
/// Two declarations of `x` in different scopes produce two different symbols, so the
/// candidate set can be keyed by `Symbol` without any tree positions.
#[derive(Hash, Clone, PartialEq, PartialOrd, Eq, Ord, Default)]
pub struct Symbol(ast::Id);

impl Symbol {
  pub fn name(&self) -> &JsWord {
    &self.0 .0
  }

  pub fn ctxt(&self) -> SyntaxContext {
    self.0 .1
  }
}

impl From<ast::Id> for Symbol {
  fn from(id: ast::Id) -> Self {
    Self(id)
  }
}

impl From<&ast::Ident> for Symbol {
  fn from(ident: &ast::Ident) -> Self {
    Self(ident.to_id())
  }
}

impl From<Symbol> for ast::Id {
  fn from(s: Symbol) -> Self {
    s.0
  }
}

impl Debug for Symbol {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple(&format!("Symbol({self})")).finish()
  }
}

impl Display for Symbol {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}#{}", self.name(), self.ctxt().as_u32())
  }
}

impl AsRef<ast::Id> for Symbol {
  fn as_ref(&self) -> &ast::Id {
    &self.0
  }
}

use swc_core::ecma::{ast, atoms::JsWord};

pub trait ModuleExportNameExt {
  /// `None` for string names such as `export { foo as "foo-bar" }`.
  fn as_ident(&self) -> Option<&ast::Ident>;
}

impl ModuleExportNameExt for ast::ModuleExportName {
  fn as_ident(&self) -> Option<&ast::Ident> {
    match self {
      ast::ModuleExportName::Ident(ident) => Some(ident),
      ast::ModuleExportName::Str(_) => None,
    }
  }
}

pub trait ExportNamedSpecifierExt {
  fn exported_as_name(&self) -> Option<&JsWord>;
}

impl ExportNamedSpecifierExt for ast::ExportNamedSpecifier {
  fn exported_as_name(&self) -> Option<&JsWord> {
    match &self.exported {
      Some(exported) => exported.as_ident().map(|ident| &ident.sym),
      None => self.orig.as_ident().map(|ident| &ident.sym),
    }
  }
}

pub trait ExportSpecifierExt {
  /// The identifier-shaped name this specifier is exported under, if any.
  fn exported_as_name(&self) -> Option<&JsWord>;
}

impl ExportSpecifierExt for ast::ExportSpecifier {
  fn exported_as_name(&self) -> Option<&JsWord> {
    match self {
      ast::ExportSpecifier::Named(named) => named.exported_as_name(),
      ast::ExportSpecifier::Namespace(ns) => ns.name.as_ident().map(|ident| &ident.sym),
      ast::ExportSpecifier::Default(default) => Some(&default.exported.sym),
    }
  }
}

pub trait ImportSpecifierExt {
  fn local(&self) -> &ast::Ident;
}

impl ImportSpecifierExt for ast::ImportSpecifier {
  fn local(&self) -> &ast::Ident {
    match self {
      ast::ImportSpecifier::Named(s) => &s.local,
      ast::ImportSpecifier::Default(s) => &s.local,
      ast::ImportSpecifier::Namespace(s) => &s.local,
    }
  }
}

pub trait FnLikeExprExt {
  /// `function () {}` or `() => {}`, looking through parentheses.
  fn is_fn_like(&self) -> bool;
}

impl FnLikeExprExt for ast::Expr {
  fn is_fn_like(&self) -> bool {
    match self {
      ast::Expr::Fn(_) | ast::Expr::Arrow(_) => true,
      ast::Expr::Paren(paren) => paren.expr.is_fn_like(),
      _ => false,
    }
  }
}

pub trait ExprStmtExt {
  /// `x` for a statement that is nothing but `x = function () {}` or `x = () => {}`, looking
  /// through parentheses. Chained and nested assignments don't count.
  fn fn_assignment_target(&self) -> Option<&ast::Ident>;
}

impl ExprStmtExt for ast::ExprStmt {
  fn fn_assignment_target(&self) -> Option<&ast::Ident> {
    let mut expr = self.expr.as_ref();
    while let ast::Expr::Paren(paren) = expr {
      expr = paren.expr.as_ref();
    }
    let ast::Expr::Assign(assign) = expr else {
      return None;
    };
    if assign.op != ast::AssignOp::Assign || !assign.right.is_fn_like() {
      return None;
    }
    match &assign.left {
      ast::PatOrExpr::Pat(pat) => match pat.as_ref() {
        ast::Pat::Ident(binding) => Some(&binding.id),
        ast::Pat::Expr(expr) => expr.as_ident(),
        _ => None,
      },
      ast::PatOrExpr::Expr(expr) => expr.as_ident(),
    }
  }
}

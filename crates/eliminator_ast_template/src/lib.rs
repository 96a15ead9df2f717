use swc_core::{
  common::DUMMY_SP,
  ecma::{ast, atoms::JsWord, utils::quote_ident},
};

/// Value bound by every placeholder export.
pub const PLACEHOLDER_VALUE: f64 = 1.0;

/// `export var <name> = 1;`
///
/// Stands in for a removed export so that consumers probing the module for `name` still find it.
pub fn build_placeholder_export(name: JsWord) -> ast::ModuleItem {
  use ast::{Decl, ExportDecl, Expr, Lit, ModuleDecl, ModuleItem, Number, VarDecl, VarDeclKind};

  ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl {
    span: DUMMY_SP,
    decl: Decl::Var(Box::new(VarDecl {
      span: DUMMY_SP,
      kind: VarDeclKind::Var,
      declare: false,
      decls: vec![ast::VarDeclarator {
        span: DUMMY_SP,
        name: ast::Pat::Ident(quote_ident!(name).into()),
        init: Some(Box::new(Expr::Lit(Lit::Num(Number {
          span: DUMMY_SP,
          value: PLACEHOLDER_VALUE,
          raw: None,
        })))),
        definite: false,
      }],
    })),
  }))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn placeholder_is_a_single_var_declarator() {
    let item = build_placeholder_export("getServerSideProps".into());
    let ast::ModuleItem::ModuleDecl(ast::ModuleDecl::ExportDecl(export)) = item else {
      panic!("expected an export declaration");
    };
    let var = export.decl.as_var().expect("expected a var declaration");
    assert_eq!(var.kind, ast::VarDeclKind::Var);
    assert_eq!(var.decls.len(), 1);
    let name = var.decls[0].name.as_ident().expect("expected an identifier target");
    assert_eq!(&*name.id.sym, "getServerSideProps");
  }
}

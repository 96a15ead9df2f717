use eliminator_ast_template::build_placeholder_export;
use eliminator_common::ExportName;
use eliminator_error::Result;
use eliminator_swc_utils::{ExportSpecifierExt, FnLikeExprExt};
use hashlink::LinkedHashSet;
use rustc_hash::FxHashSet;
use swc_core::ecma::ast;

use crate::pattern::{for_each_binding, retain_bindings};

/// Removes the targeted named exports of a module and leaves `export var <name> = 1;` in
/// their place.
///
/// Only top-level export declarations are touched. The bindings those exports used are left
/// for the sweeper.
pub struct ExportPruner {
  targets: FxHashSet<ExportName>,
}

impl ExportPruner {
  pub fn new<S: AsRef<str>>(targets: &[S]) -> Self {
    Self {
      targets: targets
        .iter()
        .map(|name| ExportName::from(name.as_ref()))
        .collect(),
    }
  }

  fn is_target(&self, name: &ExportName) -> bool {
    self.targets.contains(name)
  }

  fn is_fn_declarator_target(&self, decl: &ast::VarDeclarator) -> bool {
    let ast::Pat::Ident(binding) = &decl.name else {
      return false;
    };
    self.is_target(&binding.id.sym)
      && decl
        .init
        .as_deref()
        .map_or(false, |init| init.is_fn_like())
  }

  /// Whether [ExportPruner::prune] would remove anything, without touching the module.
  pub fn has_targets(&self, module: &ast::Module) -> bool {
    if self.targets.is_empty() {
      return false;
    }
    module.body.iter().any(|item| match item {
      ast::ModuleItem::ModuleDecl(ast::ModuleDecl::ExportNamed(named)) => named
        .specifiers
        .iter()
        .any(|spec| spec.exported_as_name().map_or(false, |name| self.is_target(name))),
      ast::ModuleItem::ModuleDecl(ast::ModuleDecl::ExportDecl(export)) => match &export.decl {
        ast::Decl::Fn(fn_decl) => self.is_target(&fn_decl.ident.sym),
        ast::Decl::Var(var) => var.decls.iter().any(|decl| match &decl.name {
          ast::Pat::Ident(_) => self.is_fn_declarator_target(decl),
          pat => {
            let mut found = false;
            let walked = for_each_binding(pat, &mut |ident| found |= self.is_target(&ident.sym));
            // A shape the walker rejects is reported by the mark phase, so let the run proceed.
            walked.is_err() || found
          }
        }),
        _ => false,
      },
      _ => false,
    })
  }

  /// Returns the removed export names in removal order.
  pub fn prune(&self, module: &mut ast::Module) -> Result<LinkedHashSet<ExportName>> {
    let mut removed = LinkedHashSet::default();
    if self.targets.is_empty() {
      return Ok(removed);
    }

    let mut index = 0;
    while index < module.body.len() {
      let mut names = vec![];
      let keep = match &mut module.body[index] {
        ast::ModuleItem::ModuleDecl(ast::ModuleDecl::ExportNamed(named)) => {
          self.prune_specifiers(named, &mut names)
        }
        ast::ModuleItem::ModuleDecl(ast::ModuleDecl::ExportDecl(export)) => {
          self.prune_decl(export, &mut names)?
        }
        _ => true,
      };

      let inserted = names.len();
      for name in &names {
        tracing::trace!("Removed export {name}");
        removed.insert(name.clone());
      }
      module
        .body
        .splice(index..index, names.into_iter().map(build_placeholder_export));
      index += inserted;

      if keep {
        index += 1;
      } else {
        module.body.remove(index);
      }
    }

    Ok(removed)
  }

  /// Returns whether the export should stay.
  fn prune_specifiers(&self, named: &mut ast::NamedExport, names: &mut Vec<ExportName>) -> bool {
    let before = named.specifiers.len();
    named.specifiers.retain(|spec| match spec.exported_as_name() {
      Some(name) if self.is_target(name) => {
        names.push(name.clone());
        false
      }
      _ => true,
    });
    // `export {}` written by hand is left as is.
    !(named.specifiers.len() < before && named.specifiers.is_empty())
  }

  fn prune_decl(&self, export: &mut ast::ExportDecl, names: &mut Vec<ExportName>) -> Result<bool> {
    match &mut export.decl {
      ast::Decl::Fn(fn_decl) if self.is_target(&fn_decl.ident.sym) => {
        names.push(fn_decl.ident.sym.clone());
        Ok(false)
      }
      ast::Decl::Var(var) => {
        let mut decls = Vec::with_capacity(var.decls.len());
        for mut decl in var.decls.drain(..) {
          if let ast::Pat::Ident(binding) = &decl.name {
            // A targeted name bound to anything but a function is kept.
            if self.is_fn_declarator_target(&decl) {
              names.push(binding.id.sym.clone());
            } else {
              decls.push(decl);
            }
            continue;
          }
          let retained = retain_bindings(&mut decl.name, &mut |ident| {
            if self.is_target(&ident.sym) {
              names.push(ident.sym.clone());
              false
            } else {
              true
            }
          })?;
          if !retained.is_empty {
            decls.push(decl);
          }
        }
        var.decls = decls;
        Ok(!var.decls.is_empty())
      }
      _ => Ok(true),
    }
  }
}

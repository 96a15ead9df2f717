use eliminator_error::{Error, Result};
use swc_core::ecma::ast;

/// Outcome of [retain_bindings].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Retained {
  pub removed: usize,
  /// `true` only when this call removed something and left the pattern with nothing to bind.
  pub is_empty: bool,
}

fn unsupported(pat: &ast::Pat) -> Error {
  let shape = match pat {
    ast::Pat::Expr(_) => "expression pattern",
    ast::Pat::Invalid(_) => "invalid pattern",
    _ => "pattern",
  };
  Error::unsupported_binding_shape(shape)
}

/// Calls `f` with every identifier the declaration pattern binds, left to right.
pub fn for_each_binding(pat: &ast::Pat, f: &mut impl FnMut(&ast::Ident)) -> Result<()> {
  match pat {
    ast::Pat::Ident(binding) => f(&binding.id),
    ast::Pat::Object(obj) => {
      for prop in &obj.props {
        match prop {
          ast::ObjectPatProp::KeyValue(kv) => for_each_binding(&kv.value, f)?,
          ast::ObjectPatProp::Assign(assign) => f(&assign.key),
          ast::ObjectPatProp::Rest(rest) => for_each_binding(&rest.arg, f)?,
        }
      }
    }
    ast::Pat::Array(arr) => {
      for elem in arr.elems.iter().flatten() {
        for_each_binding(elem, f)?;
      }
    }
    ast::Pat::Assign(assign) => for_each_binding(&assign.left, f)?,
    ast::Pat::Rest(rest) => for_each_binding(&rest.arg, f)?,
    ast::Pat::Expr(_) | ast::Pat::Invalid(_) => return Err(unsupported(pat)),
  }
  Ok(())
}

/// Removes every leaf of `pat` for which `keep` returns `false`.
///
/// Object properties are dropped whole. Array elements become holes so the positions of the
/// remaining elements stay put. A default-valued or rest element is removed together with
/// its target. A bare identifier can't be removed from itself; the caller decides what to do
/// with a declarator whose identifier is dead, signalled by `is_empty`.
pub fn retain_bindings(
  pat: &mut ast::Pat,
  keep: &mut impl FnMut(&ast::Ident) -> bool,
) -> Result<Retained> {
  match pat {
    ast::Pat::Ident(binding) => {
      if keep(&binding.id) {
        Ok(Retained::default())
      } else {
        Ok(Retained {
          removed: 1,
          is_empty: true,
        })
      }
    }
    ast::Pat::Object(obj) => {
      let mut removed = 0;
      let mut failure = None;
      obj.props.retain_mut(|prop| {
        if failure.is_some() {
          return true;
        }
        let outcome = match prop {
          ast::ObjectPatProp::KeyValue(kv) => retain_bindings(&mut kv.value, keep),
          ast::ObjectPatProp::Assign(assign) => Ok(if keep(&assign.key) {
            Retained::default()
          } else {
            Retained {
              removed: 1,
              is_empty: true,
            }
          }),
          ast::ObjectPatProp::Rest(rest) => retain_bindings(&mut rest.arg, keep),
        };
        match outcome {
          Ok(retained) => {
            removed += retained.removed;
            !retained.is_empty
          }
          Err(err) => {
            failure = Some(err);
            true
          }
        }
      });
      if let Some(err) = failure {
        return Err(err);
      }
      Ok(Retained {
        removed,
        is_empty: removed > 0 && obj.props.is_empty(),
      })
    }
    ast::Pat::Array(arr) => {
      let mut removed = 0;
      for slot in arr.elems.iter_mut() {
        let Some(elem) = slot else {
          continue;
        };
        let retained = retain_bindings(elem, keep)?;
        removed += retained.removed;
        if retained.is_empty {
          *slot = None;
        }
      }
      Ok(Retained {
        removed,
        is_empty: removed > 0 && arr.elems.iter().all(Option::is_none),
      })
    }
    ast::Pat::Assign(assign) => retain_bindings(&mut assign.left, keep),
    ast::Pat::Rest(rest) => retain_bindings(&mut rest.arg, keep),
    ast::Pat::Expr(_) | ast::Pat::Invalid(_) => Err(unsupported(pat)),
  }
}

#[cfg(test)]
mod tests {
  use eliminator_test_utils::{normalize, parse_resolved, print};
  use swc_core::{
    common::DUMMY_SP,
    ecma::{ast, atoms::JsWord},
  };

  use super::*;

  fn first_pattern(module: &mut ast::Module) -> &mut ast::Pat {
    for item in module.body.iter_mut() {
      if let ast::ModuleItem::Stmt(ast::Stmt::Decl(ast::Decl::Var(var))) = item {
        return &mut var.decls[0].name;
      }
    }
    panic!("no variable declaration found")
  }

  fn drop_names(code: &str, names: &[&str]) -> (String, Retained) {
    let mut module = parse_resolved(code);
    let names: Vec<JsWord> = names.iter().map(|n| JsWord::from(*n)).collect();
    let retained = retain_bindings(first_pattern(&mut module), &mut |ident| {
      !names.contains(&ident.sym)
    })
    .unwrap();
    (print(&module), retained)
  }

  #[test]
  fn collects_nested_and_defaulted_leaves_in_order() {
    let mut module = parse_resolved("const { a, b: [c, , { d }], e = 1, ...f } = obj;");
    let mut seen = vec![];
    for_each_binding(first_pattern(&mut module), &mut |ident| seen.push(ident.sym.to_string()))
      .unwrap();
    assert_eq!(seen, ["a", "c", "d", "e", "f"]);
  }

  fn array_slots(pat: &ast::Pat) -> Vec<Option<String>> {
    let ast::Pat::Array(arr) = pat else {
      panic!("expected an array pattern")
    };
    arr
      .elems
      .iter()
      .map(|elem| {
        elem.as_ref().map(|elem| {
          let mut names = vec![];
          for_each_binding(elem, &mut |ident| names.push(ident.sym.to_string())).unwrap();
          names.join(",")
        })
      })
      .collect()
  }

  #[test]
  fn array_leaves_become_holes() {
    let mut module = parse_resolved("const [a, b, c] = arr;");
    let pat = first_pattern(&mut module);
    let retained = retain_bindings(pat, &mut |ident| &*ident.sym == "b").unwrap();
    assert_eq!(array_slots(pat), [None, Some("b".to_string()), None]);
    assert_eq!(retained.removed, 2);
    assert!(!retained.is_empty);
  }

  #[test]
  fn object_properties_are_dropped() {
    let (code, _) = drop_names("const { a, b: renamed, c = 3 } = obj;", &["renamed", "c"]);
    assert_eq!(code, normalize("const { a } = obj;"));
  }

  #[test]
  fn emptied_nested_pattern_is_removed_from_its_parent() {
    let (code, retained) = drop_names("const { a, b: { c } } = obj;", &["c"]);
    assert_eq!(code, normalize("const { a } = obj;"));
    assert_eq!(retained.removed, 1);
  }

  #[test]
  fn fully_removed_pattern_reports_empty() {
    let (_, retained) = drop_names("const [x, y] = pair;", &["x", "y"]);
    assert!(retained.is_empty);
  }

  #[test]
  fn pattern_that_was_already_empty_is_not_reported() {
    let (_, retained) = drop_names("const {} = obj;", &["x"]);
    assert_eq!(retained, Retained::default());
  }

  #[test]
  fn rest_and_default_elements_go_with_their_target() {
    let mut module = parse_resolved("const [a = 1, b, ...rest] = arr;");
    let pat = first_pattern(&mut module);
    let retained =
      retain_bindings(pat, &mut |ident| !matches!(&*ident.sym, "a" | "rest")).unwrap();
    assert_eq!(array_slots(pat), [None, Some("b".to_string()), None]);
    assert_eq!(retained.removed, 2);
  }

  #[test]
  fn expression_targets_are_rejected() {
    let mut pat = ast::Pat::Invalid(ast::Invalid { span: DUMMY_SP });
    let err = retain_bindings(&mut pat, &mut |_| true).unwrap_err();
    assert_eq!(err.code(), "UNSUPPORTED_BINDING_SHAPE");
    assert!(for_each_binding(&pat, &mut |_| {}).is_err());
  }
}

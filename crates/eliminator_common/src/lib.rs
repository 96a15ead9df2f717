use swc_core::ecma::atoms::JsWord;

mod symbol;
pub use symbol::*;
mod loader;
pub use loader::*;

pub use eliminator_error::StaticStr;

/// The name a module exposes a binding under, e.g. `bar` in `export { foo as bar }`.
pub type ExportName = JsWord;

/// Implements `Default` through serde, so the `#[serde(default = ...)]` attributes of a
/// config struct are the only place its defaults are written down.
#[macro_export]
macro_rules! impl_serde_default {
  ($name:ident) => {
    impl Default for $name {
      fn default() -> Self {
        serde_json::from_str("{}").expect("every field has a serde default")
      }
    }
  };
}

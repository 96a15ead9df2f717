use std::{path::Path, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loader {
  Js,
  Jsx,
  Ts,
  Tsx,
}

impl Loader {
  /// Files without a recognizable extension are treated as plain JavaScript.
  pub fn from_path(path: &Path) -> eliminator_error::Result<Self> {
    match path.extension().and_then(|ext| ext.to_str()) {
      Some(ext) => Self::from_str(ext),
      None => Ok(Self::Js),
    }
  }

  pub fn is_typescript(&self) -> bool {
    matches!(self, Self::Ts | Self::Tsx)
  }
}

impl FromStr for Loader {
  type Err = eliminator_error::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "js" | "mjs" | "cjs" => Ok(Self::Js),
      "jsx" => Ok(Self::Jsx),
      "ts" | "mts" | "cts" => Ok(Self::Ts),
      "tsx" => Ok(Self::Tsx),
      _ => Err(eliminator_error::Error::unknown_loader(s.to_string())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn picks_loader_by_extension() {
    assert_eq!(Loader::from_path(Path::new("pages/index.tsx")).unwrap(), Loader::Tsx);
    assert_eq!(Loader::from_path(Path::new("lib/data.mjs")).unwrap(), Loader::Js);
    assert_eq!(Loader::from_path(Path::new("README")).unwrap(), Loader::Js);
    assert!(Loader::Ts.is_typescript());
  }

  #[test]
  fn rejects_unknown_extension() {
    let err = Loader::from_path(Path::new("styles.css")).unwrap_err();
    assert_eq!(err.code(), "UNKNOWN_LOADER");
  }
}

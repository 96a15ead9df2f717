use std::path::Path;

use eliminator::{transform, EliminateConfig};
use pretty_assertions::assert_eq;
use serde::Deserialize;

fn input_by_default() -> String {
  "input.js".to_string()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FixtureConfig {
  #[serde(default)]
  pub options: EliminateConfig,
  /// Relative to the fixture folder. The extension picks the syntax.
  #[serde(default = "input_by_default")]
  pub input: String,
  /// Code of the error the transform is expected to fail with.
  #[serde(default)]
  pub expected_error: Option<String>,
}

pub fn run_test(config_path: &Path) {
  let fixture_folder = config_path.parent().unwrap();
  let config: FixtureConfig =
    serde_json::from_str(&std::fs::read_to_string(config_path).unwrap()).unwrap();
  let input_path = fixture_folder.join(&config.input);
  let input = std::fs::read_to_string(&input_path).unwrap();

  let result = transform(&input_path, input, &config.options.into());

  if let Some(expected_error) = config.expected_error {
    let err = result.expect_err("Expected error but got success");
    assert_eq!(err.code(), expected_error);
    return;
  }

  let output = result.unwrap();

  // Run the expectation through the same parser and printer, without targets.
  let expected = std::fs::read_to_string(fixture_folder.join("output.js")).unwrap();
  let expected = transform(&input_path, expected, &Default::default())
    .unwrap()
    .code;
  assert_eq!(output.code, expected);

  let removed = output
    .report
    .removed_exports
    .iter()
    .map(|name| name.to_string())
    .collect::<Vec<_>>();
  let summary = format!(
    "removed: {removed:?}\npasses: {}\nremoved bindings: {}",
    output.report.passes, output.report.removed_bindings
  );

  let mut settings = insta::Settings::clone_current();
  settings.set_snapshot_path(fixture_folder);
  settings.set_prepend_module_to_snapshot(false);
  settings.bind(|| {
    insta::assert_snapshot!("report", summary);
  });
}

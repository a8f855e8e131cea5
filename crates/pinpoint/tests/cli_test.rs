use pinpoint::cli;
use pinpoint_core::config::{PinpointConfig, SimplifyConfig};
use pinpoint_core::locator::ActionOptions;
use std::io::Write;
use tempfile::NamedTempFile;

const PAGE: &str = r#"<html><body>
  <form class="login">
    <input name="username">
    <button data-testid="login-submit">Log in</button>
  </form>
  <nav></nav>
</body></html>"#;

fn page_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", PAGE).unwrap();
    file
}

#[test]
fn test_resolve_all_matches() {
    let file = page_file();
    let dom = cli::load_document(file.path()).unwrap();
    let config = PinpointConfig::default();

    let lines = cli::resolve(&dom, "input, button, nav", &config, false).unwrap();
    assert_eq!(
        lines,
        vec![
            r#"[name="username"]"#,
            r#"[data-testid="login-submit"]"#,
            "role=navigation",
        ]
    );

    let lines = cli::resolve(&dom, "nav", &config, true).unwrap();
    assert_eq!(lines, vec!["role=navigation\t[role=\"navigation\"]"]);
}

#[test]
fn test_bad_inputs_are_errors() {
    let file = page_file();
    let dom = cli::load_document(file.path()).unwrap();
    let config = PinpointConfig::default();

    assert!(cli::resolve(&dom, "input[", &config, false).is_err());
    assert!(cli::resolve(&dom, "table", &config, false).is_err());
    assert!(cli::load_document(std::path::Path::new("/nonexistent/page.html")).is_err());
    assert!(
        cli::commands(&dom, "button", &config, "drag", None, &ActionOptions::default()).is_err()
    );
}

#[test]
fn test_commands_and_assertions() {
    let file = page_file();
    let dom = cli::load_document(file.path()).unwrap();
    let config = PinpointConfig::default();

    let commands = cli::commands(
        &dom,
        "input",
        &config,
        "fill",
        Some("alice"),
        &ActionOptions::default(),
    )
    .unwrap();
    assert!(commands.iter().all(|c| c.ends_with(".fill(`alice`);")));
    assert!(commands.contains(&"await page.locator(`[name=\\\"username\\\"]`).fill(`alice`);".to_string()));

    let assertions = cli::assertions(&dom, "button", &config, "toBeEnabled", None).unwrap();
    assert_eq!(
        assertions[0],
        "await expect(page.getByTestId(`login-submit`)).toBeEnabled();"
    );

    assert_eq!(cli::goto("https://example.com").len(), 3);
}

#[test]
fn test_inspect_and_simplify_emit_json() {
    let file = page_file();
    let dom = cli::load_document(file.path()).unwrap();

    let snapshot: serde_json::Value =
        serde_json::from_str(&cli::inspect(&dom, "button", &PinpointConfig::default()).unwrap())
            .unwrap();
    assert_eq!(snapshot["selector"], r#"[data-testid="login-submit"]"#);
    assert_eq!(snapshot["hierarchy"], "form.login > button");

    let tree: serde_json::Value =
        serde_json::from_str(&cli::simplify(&dom, &SimplifyConfig::default()).unwrap()).unwrap();
    assert_eq!(tree["tag"], "body");
    assert_eq!(tree["children"][0]["attrs"]["class"], "login");
}

#[test]
fn test_load_config_from_path() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "locators:\n  max_nth_index: 2").unwrap();

    let config = cli::load_config(Some(file.path())).unwrap();
    assert_eq!(config.locators.max_nth_index, 2);
    assert!(cli::load_config(Some(std::path::Path::new("/nonexistent.yaml"))).is_err());
}

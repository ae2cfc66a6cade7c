use std::sync::Mutex;

use serde::Deserialize;

use crate::config::parse;

// Env vars are process-global, so the tests touching them serialize here.
static ENV_GUARD: Mutex<()> = Mutex::new(());

fn clear_env() {
    for (key, _) in std::env::vars() {
        if key.starts_with("CAD_") {
            std::env::remove_var(key);
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TestConfig {
    foo: String,
    bar: String,
}

#[test]
fn test_parse_file() {
    let _guard = ENV_GUARD.lock().unwrap();
    clear_env();

    let tmp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let config_file = tmp_dir.path().join("config.toml");

    std::fs::write(
        &config_file,
        r#"
foo = "from-file"
bar = "also-from-file"
"#,
    )
    .expect("failed to write config file");

    let config: TestConfig = parse(config_file.to_str().expect("failed to get config path"))
        .expect("failed to parse config");
    assert_eq!(config.foo, "from-file");
    assert_eq!(config.bar, "also-from-file");
}

#[test]
fn test_parse_env() {
    let _guard = ENV_GUARD.lock().unwrap();
    clear_env();

    std::env::set_var("CAD_FOO", "from-env");
    std::env::set_var("CAD_BAR", "bar");

    let config: TestConfig = parse("").expect("failed to parse config");
    assert_eq!(config.foo, "from-env");
    assert_eq!(config.bar, "bar");

    clear_env();
}

#[test]
fn test_parse_env_overrides_file() {
    let _guard = ENV_GUARD.lock().unwrap();
    clear_env();

    let tmp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let config_file = tmp_dir.path().join("config.toml");

    std::fs::write(&config_file, "foo = \"from-file\"\n").expect("failed to write config file");

    std::env::set_var("CAD_FOO", "from-env");

    let config: TestConfig = parse(config_file.to_str().expect("failed to get config path"))
        .expect("failed to parse config");
    assert_eq!(config.foo, "from-env");
    assert_eq!(config.bar, "");

    clear_env();
}

#[test]
fn test_parse_missing_file_uses_defaults() {
    let _guard = ENV_GUARD.lock().unwrap();
    clear_env();

    let config: TestConfig = parse("/does/not/exist/config").expect("failed to parse config");
    assert_eq!(config.foo, "");
    assert_eq!(config.bar, "");
}

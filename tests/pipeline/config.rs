use std::fs;

use crosscut_runtime::{DEFAULT_CONFIG_FILE, GeneratorConfig, Pipeline};

use crate::{bank, read};

#[test]
fn toml_settings_shape_the_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let config_path = dir.path().join(DEFAULT_CONFIG_FILE);
    fs::write(
        &config_path,
        format!(
            r#"
output-dir = "{}"
indent-width = 2
header = "Owned by the build"
release-on-failure = false

[bindings]
lock-registry = "com.acme.locks.Registry"
lock-registry-accessor = "shared"
"#,
            out.display().to_string().replace('\\', "\\\\")
        ),
    )
    .unwrap();

    let config = GeneratorConfig::discover(None, dir.path()).unwrap();
    Pipeline::new(config).run_round(&bank()).unwrap();

    let source = read(&out, "com/acme/bank/AccountStripedLockProxy.java");
    assert!(source.starts_with("// Owned by the build\n"));
    assert!(source.contains("import com.acme.locks.Registry;"));
    assert!(source.contains("\n    Registry.shared().acquire(this.id);\n"));
    assert!(source.contains("\n    boolean result = super.withdraw(amount);\n"));
    assert!(!source.contains("finally"));
}

#[test]
fn release_on_failure_defaults_to_finally() {
    let dir = tempfile::tempdir().unwrap();
    Pipeline::new(GeneratorConfig::default().with_output_dir(dir.path()))
        .run_round(&bank())
        .unwrap();
    let source = read(dir.path(), "com/acme/bank/AccountStripedLockProxy.java");
    assert_eq!(source.matches("} finally {").count(), 2);
}

#[test]
fn bad_config_file_is_reported_with_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "indent-width = \"wide\"").unwrap();
    let err = GeneratorConfig::discover(Some(&path), dir.path()).unwrap_err();
    assert!(err.to_string().contains("broken.toml"));
}

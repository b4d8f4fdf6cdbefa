mod common;

use serde_json::{json, Value};

use common::{assert_success, stderr, stdout, Project};

#[test]
fn test_render_page_blueprint_for_model() {
    let project = Project::new();

    let output = project.run(&[
        "render",
        "blueprints/pages/article.yml",
        "--site",
        "site.yml",
        "--model",
        "blog/first-post",
    ]);

    assert_success(&output);
    let rendered: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rendered["id"], json!("pages/article"));
    assert_eq!(rendered["name"], json!("article"));
    assert_eq!(rendered["tabs"].as_array().unwrap().len(), 2);
}

#[test]
fn test_render_compact_output_is_one_line() {
    let project = Project::new();

    let output = project.run(&[
        "render",
        "blueprints/site.yml",
        "--site",
        "site.yml",
        "--compact",
    ]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim_end().lines().count(), 1);
}

#[test]
fn test_render_unknown_model_fails() {
    let project = Project::new();

    let output = project.run(&[
        "render",
        "blueprints/site.yml",
        "--site",
        "site.yml",
        "--model",
        "nope",
    ]);

    assert!(!output.status.success());
    let stderr = stderr(&output);
    assert!(stderr.contains("model not found: nope"), "stderr: {stderr}");
}

#[test]
fn test_render_uses_configured_locale() {
    let project = Project::new();
    project.write("translations/de.yml", "rename: Umbenennen\n");
    project.write(
        "blueprints/pages/note.yml",
        "title:\n  en: Note\n  de: Notiz\n",
    );
    let config = "[i18n]\nlocale = \"de\"\ndir = \"translations\"\n";
    project.write("folio.toml", config);

    let output = project.run(&["render", "blueprints/pages/note.yml", "--site", "site.yml"]);

    assert_success(&output);
    let rendered: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rendered["title"], json!("Notiz"));

    // the flag wins over the config file
    let output = project.run(&[
        "render",
        "blueprints/pages/note.yml",
        "--site",
        "site.yml",
        "--locale",
        "en",
    ]);
    let rendered: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rendered["title"], json!("Note"));
}

#[test]
fn test_unknown_config_key_warns() {
    let project = Project::new();
    project.write("folio.toml", "[output]\nverbosty = \"debug\"\n");

    let output = project.run(&["render", "blueprints/site.yml", "--site", "site.yml"]);

    assert!(output.status.success());
    let stderr = stderr(&output);
    assert!(stderr.contains("Unknown config key 'verbosty'"), "{stderr}");
    assert!(stderr.contains("Did you mean 'verbosity'?"), "{stderr}");
}

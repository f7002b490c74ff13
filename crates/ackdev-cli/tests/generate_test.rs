//! End-to-end runs of `ackdev generate` driven by key scripts.

use ackdev_testing::{TestWorld, fixtures};
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn s3_world() -> TestWorld {
    TestWorld::new().with_manifest("s3.yaml", fixtures::S3_MANIFEST)
}

fn yaml(content: &str) -> serde_yaml::Value {
    serde_yaml::from_str(content).expect("generator output should be valid YAML")
}

#[test]
fn test_scripted_session_writes_generator_yaml() {
    let world = s3_world().with_script("keys.txt", fixtures::TOGGLE_FLAGS_SCRIPT);

    let mut cmd = cargo_bin_cmd!("ackdev");
    world
        .configure_generate(&mut cmd, Some("s3"))
        .arg("--script")
        .arg(world.script_path("keys.txt"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("wrote"))
        .stdout(predicate::str::contains("s3-generator.yaml"));

    let written = world.read_generator("s3").unwrap();
    insta::assert_snapshot!(written, @r"
    model_name: s3
    resources:
      Bucket:
        fields:
          Name:
            is_required: true
          Region:
            is_immutable: true
    ignore:
      resource_names:
      - Policy
    ");
}

#[test]
fn test_reference_editor_writes_references() {
    let world = s3_world().with_script("keys.txt", fixtures::REFERENCE_SCRIPT);

    let mut cmd = cargo_bin_cmd!("ackdev");
    world
        .configure_generate(&mut cmd, Some("s3"))
        .arg("--script")
        .arg(world.script_path("keys.txt"));
    cmd.assert().success();

    let doc = yaml(&world.read_generator("s3").unwrap());
    let references = &doc["resources"]["Bucket"]["fields"]["Name"]["references"];
    assert_eq!(references["service_name"].as_str(), Some("kms"));
    assert_eq!(references["resource"].as_str(), Some("Key"));
    assert_eq!(
        references["path"].as_str(),
        Some(".status.ackResourceMetadata.arn")
    );
    assert!(doc["resources"]["Bucket"]["fields"]["Name"]["is_required"].is_null());
}

#[test]
fn test_discard_writes_nothing() {
    let world = s3_world().with_script("keys.txt", fixtures::DISCARD_SCRIPT);

    let mut cmd = cargo_bin_cmd!("ackdev");
    world
        .configure_generate(&mut cmd, Some("s3"))
        .arg("--script")
        .arg(world.script_path("keys.txt"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("aborted;"))
        .stdout(predicate::str::contains("not written"));

    assert!(!world.generator_path("s3").exists());
}

#[test]
fn test_exhausted_script_writes_nothing() {
    let world = s3_world().with_script("keys.txt", "enter\nenter\nr\n");

    let mut cmd = cargo_bin_cmd!("ackdev");
    world
        .configure_generate(&mut cmd, Some("s3"))
        .arg("--script")
        .arg(world.script_path("keys.txt"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("not written"));

    assert!(!world.generator_path("s3").exists());
}

#[test]
fn test_existing_generator_is_resumed() {
    let world = s3_world().with_script("keys.txt", fixtures::QUIT_SCRIPT);
    std::fs::create_dir_all(world.output_dir()).unwrap();
    std::fs::write(
        world.generator_path("s3"),
        "model_name: s3\nignore:\n  resource_names: [Policy]\nsdk_names:\n  model_name: s3\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("ackdev");
    world
        .configure_generate(&mut cmd, Some("s3"))
        .arg("--script")
        .arg(world.script_path("keys.txt"));
    cmd.assert().success();

    let doc = yaml(&world.read_generator("s3").unwrap());
    let ignored: Vec<&str> = doc["ignore"]["resource_names"]
        .as_sequence()
        .unwrap()
        .iter()
        .filter_map(|name| name.as_str())
        .collect();
    assert_eq!(ignored, vec!["Policy"]);
    assert_eq!(doc["sdk_names"]["model_name"].as_str(), Some("s3"));
}

#[test]
fn test_include_all_starts_with_nothing_ignored() {
    let world = s3_world().with_script("keys.txt", fixtures::QUIT_SCRIPT);

    let mut cmd = cargo_bin_cmd!("ackdev");
    world
        .configure_generate(&mut cmd, Some("s3"))
        .arg("--include-all")
        .arg("--script")
        .arg(world.script_path("keys.txt"));
    cmd.assert().success();

    let doc = yaml(&world.read_generator("s3").unwrap());
    assert!(
        doc["ignore"]["resource_names"]
            .as_sequence()
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_missing_service_is_an_error() {
    let world = s3_world();

    let mut cmd = cargo_bin_cmd!("ackdev");
    world.configure_generate(&mut cmd, None);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("requires the name of a single service"));
}

#[test]
fn test_unknown_service_is_an_error() {
    let world = s3_world().with_script("keys.txt", fixtures::QUIT_SCRIPT);

    let mut cmd = cargo_bin_cmd!("ackdev");
    world
        .configure_generate(&mut cmd, Some("dynamodb"))
        .arg("--script")
        .arg(world.script_path("keys.txt"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("service dynamodb not found"));
}

#[test]
fn test_all_processes_every_manifest_except_ignored() {
    let world = s3_world()
        .with_manifest("sqs.json", fixtures::SQS_MANIFEST)
        .with_manifest("sns.yaml", "resources: []\n")
        .with_script("keys.txt", fixtures::QUIT_SCRIPT);

    let mut cmd = cargo_bin_cmd!("ackdev");
    world
        .configure_generate(&mut cmd, None)
        .arg("--all")
        .arg("--ignore")
        .arg("sns")
        .arg("--script")
        .arg(world.script_path("keys.txt"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Generate generator.yaml for s3"))
        .stdout(predicate::str::contains("Generate generator.yaml for sqs"))
        .stdout(predicate::str::contains("for sns").not());

    assert!(world.generator_path("s3").exists());
    assert!(world.generator_path("sqs").exists());
    assert!(!world.generator_path("sns").exists());
}

#[test]
fn test_invalid_script_reports_line() {
    let world = s3_world().with_script("keys.txt", "enter\nwarp-speed\n");

    let mut cmd = cargo_bin_cmd!("ackdev");
    world
        .configure_generate(&mut cmd, Some("s3"))
        .arg("--script")
        .arg(world.script_path("keys.txt"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid key script"));
}

#[test]
fn test_custom_key_bindings_apply() {
    let world = s3_world()
        .with_settings("[keys]\nquit = [\"x\"]\n")
        .with_script("keys.txt", "q\nx\n");

    let mut cmd = cargo_bin_cmd!("ackdev");
    world
        .configure_generate(&mut cmd, Some("s3"))
        .arg("--script")
        .arg(world.script_path("keys.txt"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("wrote"));
}

#[test]
fn test_unknown_key_in_settings_is_an_error() {
    let world = s3_world()
        .with_settings("[keys]\nconfirm = [\"hyper+enter\"]\n")
        .with_script("keys.txt", fixtures::QUIT_SCRIPT);

    let mut cmd = cargo_bin_cmd!("ackdev");
    world
        .configure_generate(&mut cmd, Some("s3"))
        .arg("--script")
        .arg(world.script_path("keys.txt"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key 'hyper+enter'"));
}

#[test]
fn test_interrupt_stops_remaining_services() {
    let world = s3_world()
        .with_manifest("sqs.json", fixtures::SQS_MANIFEST)
        .with_script("keys.txt", fixtures::INTERRUPT_SCRIPT);

    let mut cmd = cargo_bin_cmd!("ackdev");
    world
        .configure_generate(&mut cmd, None)
        .arg("--all")
        .arg("--script")
        .arg(world.script_path("keys.txt"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Generate generator.yaml for s3"))
        .stdout(predicate::str::contains("interrupted;"))
        .stdout(predicate::str::contains("for sqs").not());

    assert!(!world.generator_path("s3").exists());
    assert!(!world.generator_path("sqs").exists());
}

#[test]
fn test_discard_moves_on_to_next_service() {
    let world = s3_world()
        .with_manifest("sqs.json", fixtures::SQS_MANIFEST)
        .with_script("keys.txt", fixtures::DISCARD_SCRIPT);

    let mut cmd = cargo_bin_cmd!("ackdev");
    world
        .configure_generate(&mut cmd, None)
        .arg("--all")
        .arg("--script")
        .arg(world.script_path("keys.txt"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Generate generator.yaml for s3"))
        .stdout(predicate::str::contains("Generate generator.yaml for sqs"));

    assert!(!world.generator_path("s3").exists());
    assert!(!world.generator_path("sqs").exists());
}

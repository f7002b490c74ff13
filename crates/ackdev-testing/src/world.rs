//! TestWorld pattern for declarative integration test setup.
//!
//! Every world owns a temp directory with `models/`, `out/` and a settings
//! file path, so no test touches the user's config or working tree.

use anyhow::Result;
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated environment for running `ackdev generate`.
///
/// # Example
/// ```no_run
/// use ackdev_testing::{TestWorld, fixtures};
///
/// let world = TestWorld::new()
///     .with_manifest("s3.yaml", fixtures::S3_MANIFEST)
///     .with_script("keys.txt", fixtures::QUIT_SCRIPT);
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    models_dir: PathBuf,
    output_dir: PathBuf,
    config_path: PathBuf,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let models_dir = temp_dir.path().join("models");
        let output_dir = temp_dir.path().join("out");
        let config_path = temp_dir.path().join("config.toml");

        std::fs::create_dir_all(&models_dir).expect("Failed to create models dir");

        Self {
            temp_dir,
            models_dir,
            output_dir,
            config_path,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Place a model manifest under `models/`.
    pub fn with_manifest(self, file_name: &str, content: &str) -> Self {
        std::fs::write(self.models_dir.join(file_name), content)
            .expect("Failed to write manifest");
        self
    }

    /// Place a key script in the temp root.
    pub fn with_script(self, file_name: &str, content: &str) -> Self {
        std::fs::write(self.script_path(file_name), content).expect("Failed to write script");
        self
    }

    /// Write the wizard settings file.
    pub fn with_settings(self, content: &str) -> Self {
        std::fs::write(&self.config_path, content).expect("Failed to write settings");
        self
    }

    pub fn script_path(&self, file_name: &str) -> PathBuf {
        self.temp_dir.path().join(file_name)
    }

    /// Configure a CLI command with this test environment's settings.
    ///
    /// The caller provides the base command (e.g. from
    /// `cargo_bin_cmd!("ackdev")`) and adds the subcommand arguments.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--config")
            .arg(&self.config_path)
            .current_dir(self.temp_dir.path())
            .env_remove("RUST_LOG")
            .env_remove("ACKDEV_CONFIG")
    }

    /// `generate [service] --models-dir .. --output-dir ..` on top of
    /// [`TestWorld::configure_command`].
    pub fn configure_generate<'a>(
        &self,
        cmd: &'a mut Command,
        service: Option<&str>,
    ) -> &'a mut Command {
        self.configure_command(cmd).arg("generate");
        if let Some(service) = service {
            cmd.arg(service);
        }
        cmd.arg("--models-dir")
            .arg(&self.models_dir)
            .arg("--output-dir")
            .arg(&self.output_dir)
    }

    pub fn generator_path(&self, service: &str) -> PathBuf {
        self.output_dir.join(format!("{}-generator.yaml", service))
    }

    /// Content of `<service>-generator.yaml` in the output dir.
    pub fn read_generator(&self, service: &str) -> Result<String> {
        Ok(std::fs::read_to_string(self.generator_path(service))?)
    }
}

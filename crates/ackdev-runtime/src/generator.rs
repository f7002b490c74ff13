//! Persistence of the generator document.
//!
//! The document is read at most once before a session and written at most
//! once after it. There are no intermediate checkpoints.

use std::path::{Path, PathBuf};

use ackdev_types::{Crd, GeneratorConfig};

use crate::Result;

/// `<output_dir>/<service>-generator.yaml`
pub fn generator_path(output_dir: &Path, service: &str) -> PathBuf {
    output_dir.join(format!("{}-generator.yaml", service))
}

pub fn load_generator(path: &Path) -> Result<GeneratorConfig> {
    let content = std::fs::read_to_string(path)?;
    Ok(GeneratorConfig::from_yaml(&content)?)
}

pub fn write_generator(config: &GeneratorConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let content = config.to_yaml()?;
    std::fs::write(path, content)?;
    tracing::info!("Wrote generator config to {}", path.display());
    Ok(())
}

/// Document a session starts from.
///
/// An existing file at `path` is resumed as-is. Otherwise a fresh document
/// is created; with `seed_ignored` every CRD starts out ignored so that the
/// operator opts resources in.
pub fn initial_generator(
    path: &Path,
    model_name: &str,
    crds: &[Crd],
    seed_ignored: bool,
) -> Result<GeneratorConfig> {
    if path.exists() {
        tracing::info!("Resuming existing generator config {}", path.display());
        return load_generator(path);
    }

    let mut config = GeneratorConfig::new(model_name);
    if seed_ignored {
        config.ignore_all(crds.iter().map(|crd| crd.kind.as_str()));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ackdev_types::FieldFlag;
    use tempfile::TempDir;

    fn sample_crds() -> Vec<Crd> {
        vec![
            Crd::new("Bucket").with_spec_field("Name", "string"),
            Crd::new("Policy"),
        ]
    }

    #[test]
    fn test_generator_path() {
        assert_eq!(
            generator_path(Path::new("/out"), "s3"),
            PathBuf::from("/out/s3-generator.yaml")
        );
    }

    #[test]
    fn test_write_and_reload_preserves_flags() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested/s3-generator.yaml");

        let mut config = GeneratorConfig::new("s3");
        config.toggle_ignore("Policy");
        let bucket = config.upsert_resource("Bucket");
        bucket.field_mut("Name").toggle(FieldFlag::Required);
        bucket.field_mut("Name").toggle(FieldFlag::Immutable);
        bucket.field_mut("Arn").toggle(FieldFlag::Arn);
        let references = bucket.field_mut("KmsKey").references_mut();
        references.service_name = "kms".to_string();
        references.resource = "Key".to_string();
        references.path = ".status.ackResourceMetadata.arn".to_string();
        config.options.insert(
            "sdk_names".to_string(),
            serde_yaml::Value::String("keep-me".to_string()),
        );

        write_generator(&config, &path)?;
        let reloaded = load_generator(&path)?;

        assert_eq!(reloaded, config);
        let bucket = reloaded.resource("Bucket").unwrap();
        assert!(bucket.field_flag("Name", FieldFlag::Required));
        assert!(bucket.field_flag("Name", FieldFlag::Immutable));
        assert!(!bucket.field_flag("Name", FieldFlag::Secret));
        assert!(bucket.field_flag("Arn", FieldFlag::Arn));
        Ok(())
    }

    #[test]
    fn test_initial_generator_seeds_ignore_list() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = generator_path(temp_dir.path(), "s3");

        let seeded = initial_generator(&path, "s3", &sample_crds(), true)?;
        assert_eq!(seeded.model_name, "s3");
        assert_eq!(seeded.ignore.resource_names, vec!["Bucket", "Policy"]);

        let open = initial_generator(&path, "s3", &sample_crds(), false)?;
        assert!(open.ignore.resource_names.is_empty());
        Ok(())
    }

    #[test]
    fn test_initial_generator_resumes_existing_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = generator_path(temp_dir.path(), "s3");
        let existing = "model_name: s3\nignore:\n  resource_names: [Policy]\n";
        std::fs::write(&path, existing)?;

        let resumed = initial_generator(&path, "ignored", &sample_crds(), true)?;
        assert_eq!(resumed.model_name, "s3");
        assert_eq!(resumed.ignore.resource_names, vec!["Policy"]);
        Ok(())
    }
}

//! Model provider
//!
//! The wizard never parses upstream service models itself. It asks a
//! [`ModelProvider`] for the ordered CRDs of one service. The bundled
//! implementation reads a manifest file per service from a models directory:
//!
//! ```yaml
//! service: s3
//! resources:
//!   - kind: Bucket
//!     spec_fields: [{name: Name, type: string}]
//!     status_fields: [{name: ARN, type: string}]
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ackdev_types::{Crd, FieldMeta};
use serde::Deserialize;

use crate::{Error, Result};

const MANIFEST_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

pub trait ModelProvider {
    /// Service alias the CRDs belong to (e.g. `s3`)
    fn service(&self) -> &str;

    /// Model name written into a fresh generator document
    fn model_name(&self) -> &str;

    fn crds(&self) -> Result<Vec<Crd>>;
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    service: Option<String>,
    #[serde(default)]
    model_name: Option<String>,
    #[serde(default)]
    resources: Vec<ManifestResource>,
}

#[derive(Debug, Deserialize)]
struct ManifestResource {
    kind: String,
    #[serde(default)]
    plural: Option<String>,
    #[serde(default)]
    is_arn_primary_key: Option<bool>,
    #[serde(default)]
    spec_fields: Vec<ManifestField>,
    #[serde(default)]
    status_fields: Vec<ManifestField>,
}

#[derive(Debug, Deserialize)]
struct ManifestField {
    name: String,
    #[serde(rename = "type", default)]
    type_name: String,
    #[serde(default)]
    documentation: Option<String>,
}

impl From<ManifestField> for FieldMeta {
    fn from(field: ManifestField) -> Self {
        FieldMeta {
            name: field.name,
            type_name: field.type_name,
            documentation: field.documentation,
        }
    }
}

/// Reads `<models_dir>/<service>.{yaml,yml,json}`
#[derive(Debug)]
pub struct ManifestModelProvider {
    service: String,
    model_name: String,
    path: PathBuf,
    crds: Vec<Crd>,
}

impl ManifestModelProvider {
    pub fn open(models_dir: &Path, service: &str) -> Result<Self> {
        let path = find_manifest(models_dir, service).ok_or_else(|| Error::ModelNotFound {
            service: service.to_string(),
            models_dir: models_dir.to_path_buf(),
        })?;
        Self::from_path(&path, service)
    }

    pub fn from_path(path: &Path, service: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let manifest: Manifest = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        let service = manifest.service.unwrap_or_else(|| service.to_string());
        let model_name = manifest
            .model_name
            .unwrap_or_else(|| service.to_lowercase());
        let crds = build_crds(path, manifest.resources)?;

        tracing::debug!(
            "Loaded {} CRDs for service '{}' from {}",
            crds.len(),
            service,
            path.display()
        );

        Ok(Self {
            service,
            model_name,
            path: path.to_path_buf(),
            crds,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelProvider for ManifestModelProvider {
    fn service(&self) -> &str {
        &self.service
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn crds(&self) -> Result<Vec<Crd>> {
        Ok(self.crds.clone())
    }
}

fn build_crds(path: &Path, resources: Vec<ManifestResource>) -> Result<Vec<Crd>> {
    let mut seen = HashSet::new();
    let mut crds = Vec::with_capacity(resources.len());

    for resource in resources {
        if resource.kind.trim().is_empty() {
            return Err(Error::InvalidManifest {
                path: path.to_path_buf(),
                reason: "resource with empty kind".to_string(),
            });
        }
        if !seen.insert(resource.kind.clone()) {
            return Err(Error::InvalidManifest {
                path: path.to_path_buf(),
                reason: format!("duplicate kind '{}'", resource.kind),
            });
        }

        ensure_unique_fields(path, &resource.kind, "spec", &resource.spec_fields)?;
        ensure_unique_fields(path, &resource.kind, "status", &resource.status_fields)?;

        let mut crd = Crd::new(resource.kind);
        if let Some(plural) = resource.plural {
            crd.plural = plural;
        }
        crd.arn_primary_key = resource.is_arn_primary_key;
        crd.spec_fields = resource.spec_fields.into_iter().map(Into::into).collect();
        crd.status_fields = resource.status_fields.into_iter().map(Into::into).collect();
        crds.push(crd);
    }

    Ok(crds)
}

/// Field names are unique within one field set of a resource
fn ensure_unique_fields(
    path: &Path,
    kind: &str,
    set: &str,
    fields: &[ManifestField],
) -> Result<()> {
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            return Err(Error::InvalidManifest {
                path: path.to_path_buf(),
                reason: format!("duplicate {} field '{}' on {}", set, field.name, kind),
            });
        }
    }
    Ok(())
}

fn find_manifest(models_dir: &Path, service: &str) -> Option<PathBuf> {
    MANIFEST_EXTENSIONS
        .iter()
        .map(|ext| models_dir.join(format!("{}.{}", service, ext)))
        .find(|candidate| candidate.is_file())
}

/// Service names with a manifest in `models_dir`, sorted.
pub fn list_services(models_dir: &Path) -> Result<Vec<String>> {
    let mut services = Vec::new();

    for entry in std::fs::read_dir(models_dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_manifest = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| MANIFEST_EXTENSIONS.contains(&ext));
        if !is_manifest {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            services.push(stem.to_string());
        }
    }

    services.sort();
    services.dedup();
    Ok(services)
}

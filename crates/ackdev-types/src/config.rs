//! Generator configuration document
//!
//! The in-memory form of `generator.yaml`. The wizard edits exactly one
//! instance of [`GeneratorConfig`] per session; it deliberately does not
//! implement `Clone` so that every view works on the same document.
//!
//! Keys the wizard does not understand are kept in the `options` / `extra`
//! maps and written back unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Opaque YAML values carried through a load/write cycle untouched.
pub type PassThrough = BTreeMap<String, serde_yaml::Value>;

fn is_false(value: &bool) -> bool {
    !*value
}

/// Root of `generator.yaml`
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub model_name: String,

    #[serde(default)]
    pub resources: BTreeMap<String, ResourceConfig>,

    #[serde(default)]
    pub ignore: IgnoreSpec,

    /// Global generation options (operations, prefix config, ...)
    #[serde(flatten)]
    pub options: PassThrough,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IgnoreSpec {
    #[serde(default)]
    pub resource_names: Vec<String>,

    #[serde(flatten)]
    pub extra: PassThrough,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Whether the resource's primary key is its identifier field
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_primary_key: bool,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, FieldConfig>,

    #[serde(flatten)]
    pub extra: PassThrough,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_required: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_primary_key: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_secret: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_immutable: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_arn: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<ReferencesConfig>,

    #[serde(flatten)]
    pub extra: PassThrough,
}

/// Cross-resource reference target of a field
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencesConfig {
    #[serde(default)]
    pub service_name: String,

    #[serde(default)]
    pub resource: String,

    #[serde(default)]
    pub path: String,
}

/// Boolean flags of a [`FieldConfig`] that the wizard can toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldFlag {
    Required,
    PrimaryKey,
    Secret,
    Immutable,
    Arn,
}

impl FieldFlag {
    pub const ALL: [FieldFlag; 5] = [
        FieldFlag::Required,
        FieldFlag::PrimaryKey,
        FieldFlag::Secret,
        FieldFlag::Immutable,
        FieldFlag::Arn,
    ];

    /// Column title used by the field table
    pub fn label(self) -> &'static str {
        match self {
            FieldFlag::Required => "Required",
            FieldFlag::PrimaryKey => "Primary Key",
            FieldFlag::Secret => "Secret",
            FieldFlag::Immutable => "Immutable",
            FieldFlag::Arn => "ARN",
        }
    }
}

impl GeneratorConfig {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            ..Self::default()
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn is_ignored(&self, kind: &str) -> bool {
        self.ignore.resource_names.iter().any(|name| name == kind)
    }

    /// Flip `kind`'s membership in the ignore list and return the new
    /// membership. Removal keeps the relative order of the other entries.
    pub fn toggle_ignore(&mut self, kind: &str) -> bool {
        if self.is_ignored(kind) {
            self.ignore.resource_names.retain(|name| name != kind);
            false
        } else {
            self.ignore.resource_names.push(kind.to_string());
            true
        }
    }

    /// Add every kind that is not already ignored, in iteration order.
    pub fn ignore_all<'a>(&mut self, kinds: impl IntoIterator<Item = &'a str>) {
        for kind in kinds {
            if !self.is_ignored(kind) {
                self.ignore.resource_names.push(kind.to_string());
            }
        }
    }

    pub fn resource(&self, kind: &str) -> Option<&ResourceConfig> {
        self.resources.get(kind)
    }

    /// Resource config for `kind`, created on first access.
    pub fn upsert_resource(&mut self, kind: &str) -> &mut ResourceConfig {
        self.resources.entry(kind.to_string()).or_default()
    }
}

impl ResourceConfig {
    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.get(name)
    }

    /// Field config for `name`, created on first access.
    pub fn field_mut(&mut self, name: &str) -> &mut FieldConfig {
        self.fields.entry(name.to_string()).or_default()
    }

    pub fn field_flag(&self, name: &str, flag: FieldFlag) -> bool {
        self.field(name).is_some_and(|field| field.flag(flag))
    }
}

impl FieldConfig {
    pub fn flag(&self, flag: FieldFlag) -> bool {
        match flag {
            FieldFlag::Required => self.is_required,
            FieldFlag::PrimaryKey => self.is_primary_key,
            FieldFlag::Secret => self.is_secret,
            FieldFlag::Immutable => self.is_immutable,
            FieldFlag::Arn => self.is_arn,
        }
    }

    /// Flip `flag` in place and return its new value.
    pub fn toggle(&mut self, flag: FieldFlag) -> bool {
        let slot = match flag {
            FieldFlag::Required => &mut self.is_required,
            FieldFlag::PrimaryKey => &mut self.is_primary_key,
            FieldFlag::Secret => &mut self.is_secret,
            FieldFlag::Immutable => &mut self.is_immutable,
            FieldFlag::Arn => &mut self.is_arn,
        };
        *slot = !*slot;
        *slot
    }

    /// Reference config of the field, created empty if absent.
    pub fn references_mut(&mut self) -> &mut ReferencesConfig {
        self.references.get_or_insert_with(ReferencesConfig::default)
    }
}

impl ReferencesConfig {
    pub fn is_empty(&self) -> bool {
        self.service_name.is_empty() && self.resource.is_empty() && self.path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_ignore_twice_restores_list() {
        let mut doc = GeneratorConfig::new("s3");
        doc.ignore_all(["Bucket", "Object", "Policy"]);
        let before = doc.ignore.resource_names.clone();

        assert!(!doc.toggle_ignore("Object"));
        assert_eq!(doc.ignore.resource_names, vec!["Bucket", "Policy"]);
        assert!(doc.toggle_ignore("Object"));

        let mut after = doc.ignore.resource_names.clone();
        let mut expected = before.clone();
        after.sort();
        expected.sort();
        assert_eq!(after, expected);
    }

    #[test]
    fn test_ignore_all_skips_duplicates() {
        let mut doc = GeneratorConfig::new("s3");
        doc.toggle_ignore("Object");
        doc.ignore_all(["Bucket", "Object"]);
        assert_eq!(doc.ignore.resource_names, vec!["Object", "Bucket"]);
    }

    #[test]
    fn test_upsert_resource_persists() {
        let mut doc = GeneratorConfig::new("s3");
        assert!(doc.resource("Bucket").is_none());

        doc.upsert_resource("Bucket");
        doc.upsert_resource("Bucket");

        assert_eq!(doc.resources.len(), 1);
        assert_eq!(doc.resource("Bucket"), Some(&ResourceConfig::default()));
    }

    #[test]
    fn test_field_flags_toggle_independently() {
        let mut resource = ResourceConfig::default();
        assert!(resource.field_mut("Name").toggle(FieldFlag::Required));
        assert!(resource.field_mut("Name").toggle(FieldFlag::Arn));
        assert!(!resource.field_mut("Name").toggle(FieldFlag::Arn));

        assert!(resource.field_flag("Name", FieldFlag::Required));
        for flag in [
            FieldFlag::PrimaryKey,
            FieldFlag::Secret,
            FieldFlag::Immutable,
            FieldFlag::Arn,
        ] {
            assert!(!resource.field_flag("Name", flag), "{:?}", flag);
        }
        assert!(!resource.field_flag("Region", FieldFlag::Required));
    }

    #[test]
    fn test_references_mut_creates_once() {
        let mut field = FieldConfig::default();
        field.references_mut().path = ".status.arn".to_string();
        field.references_mut().resource = "Bucket".to_string();

        let references = field.references.as_ref().unwrap();
        assert_eq!(references.path, ".status.arn");
        assert_eq!(references.resource, "Bucket");
        assert!(references.service_name.is_empty());
    }

    #[test]
    fn test_serialized_document_omits_defaults() {
        let mut doc = GeneratorConfig::new("s3");
        doc.toggle_ignore("Object");
        doc.upsert_resource("Bucket")
            .field_mut("Name")
            .toggle(FieldFlag::Required);
        doc.upsert_resource("Policy");

        insta::assert_snapshot!(doc.to_yaml().unwrap(), @r"
        model_name: s3
        resources:
          Bucket:
            fields:
              Name:
                is_required: true
          Policy: {}
        ignore:
          resource_names:
          - Object
        ");
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let yaml = r#"
model_name: s3
operations:
  GetBucket:
    output_wrapper_field_path: Bucket
ignore:
  resource_names:
    - Object
  field_names:
    - Bucket.Tags
resources:
  Bucket:
    hooks:
      sdk_create_post_build_request:
        template_path: hooks/bucket.go.tpl
    fields:
      Name:
        is_primary_key: true
        late_initialize: {}
"#;
        let doc = GeneratorConfig::from_yaml(yaml).unwrap();
        assert!(doc.options.contains_key("operations"));
        assert!(doc.ignore.extra.contains_key("field_names"));
        let bucket = doc.resource("Bucket").unwrap();
        assert!(bucket.extra.contains_key("hooks"));
        assert!(bucket.field_flag("Name", FieldFlag::PrimaryKey));
        let name = bucket.field("Name").unwrap();
        assert!(name.extra.contains_key("late_initialize"));

        let reread = GeneratorConfig::from_yaml(&doc.to_yaml().unwrap()).unwrap();
        assert_eq!(reread, doc);
    }
}

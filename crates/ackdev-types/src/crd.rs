//! Read-only resource definitions supplied by the model provider.

/// Which of a CRD's two field groups a view is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSet {
    Spec,
    Status,
}

impl FieldSet {
    pub fn label(self) -> &'static str {
        match self {
            FieldSet::Spec => "Spec",
            FieldSet::Status => "Status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    pub name: String,
    pub type_name: String,
    pub documentation: Option<String>,
}

impl FieldMeta {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            documentation: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crd {
    pub kind: String,
    pub plural: String,
    pub spec_fields: Vec<FieldMeta>,
    pub status_fields: Vec<FieldMeta>,
    /// Explicit override; derived from the spec fields when `None`
    pub arn_primary_key: Option<bool>,
}

impl Crd {
    pub fn new(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        Self {
            plural: default_plural(&kind),
            kind,
            spec_fields: Vec::new(),
            status_fields: Vec::new(),
            arn_primary_key: None,
        }
    }

    pub fn with_spec_field(mut self, name: &str, type_name: &str) -> Self {
        self.spec_fields.push(FieldMeta::new(name, type_name));
        self
    }

    pub fn with_status_field(mut self, name: &str, type_name: &str) -> Self {
        self.status_fields.push(FieldMeta::new(name, type_name));
        self
    }

    pub fn fields(&self, set: FieldSet) -> &[FieldMeta] {
        match set {
            FieldSet::Spec => &self.spec_fields,
            FieldSet::Status => &self.status_fields,
        }
    }

    pub fn field(&self, set: FieldSet, name: &str) -> Option<&FieldMeta> {
        self.fields(set).iter().find(|field| field.name == name)
    }

    /// A resource is identified by its ARN when no spec field names it.
    pub fn is_arn_primary_key(&self) -> bool {
        if let Some(explicit) = self.arn_primary_key {
            return explicit;
        }

        let candidates = [
            "Name".to_string(),
            "ID".to_string(),
            "Id".to_string(),
            format!("{}Name", self.kind),
            format!("{}ID", self.kind),
            format!("{}Id", self.kind),
        ];
        !self
            .spec_fields
            .iter()
            .any(|field| candidates.contains(&field.name))
    }

    /// Kubernetes API group, e.g. `bucket.s3.services.k8s.aws`
    pub fn api_group(&self, service: &str) -> String {
        format!("{}.{}.services.k8s.aws", self.kind, service).to_lowercase()
    }
}

fn default_plural(kind: &str) -> String {
    let lower = kind.to_lowercase();
    if lower.ends_with('s') || lower.ends_with('x') || lower.ends_with("ch") {
        format!("{}es", lower)
    } else if let Some(stem) = lower.strip_suffix('y')
        && !stem.ends_with(['a', 'e', 'i', 'o', 'u'])
    {
        format!("{}ies", stem)
    } else {
        format!("{}s", lower)
    }
}

/// Ordered, kind-addressable set of CRDs for one service
#[derive(Debug, Clone, Default)]
pub struct CrdCatalog {
    crds: Vec<Crd>,
}

impl CrdCatalog {
    pub fn new(crds: Vec<Crd>) -> Self {
        Self { crds }
    }

    /// Lookup by kind. Callers must handle the miss; there is no
    /// zero-value fallback.
    pub fn find(&self, kind: &str) -> Option<&Crd> {
        self.crds.iter().find(|crd| crd.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Crd> {
        self.crds.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.crds.iter().map(|crd| crd.kind.as_str())
    }

    pub fn len(&self) -> usize {
        self.crds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arn_primary_key_is_derived_from_spec_fields() {
        let named = Crd::new("Bucket").with_spec_field("Name", "string");
        assert!(!named.is_arn_primary_key());

        let kind_id = Crd::new("Cluster").with_spec_field("ClusterID", "string");
        assert!(!kind_id.is_arn_primary_key());

        let anonymous = Crd::new("Policy").with_spec_field("Document", "string");
        assert!(anonymous.is_arn_primary_key());

        let mut forced = Crd::new("Bucket").with_spec_field("Name", "string");
        forced.arn_primary_key = Some(true);
        assert!(forced.is_arn_primary_key());
    }

    #[test]
    fn test_default_plural() {
        assert_eq!(Crd::new("Bucket").plural, "buckets");
        assert_eq!(Crd::new("Policy").plural, "policies");
        assert_eq!(Crd::new("Gateway").plural, "gateways");
        assert_eq!(Crd::new("Alias").plural, "aliases");
    }

    #[test]
    fn test_api_group_is_lowercase() {
        let crd = Crd::new("DBCluster");
        assert_eq!(crd.api_group("rds"), "dbcluster.rds.services.k8s.aws");
    }

    #[test]
    fn test_catalog_find_miss_is_none() {
        let catalog = CrdCatalog::new(vec![Crd::new("Bucket")]);
        assert!(catalog.find("Bucket").is_some());
        assert!(catalog.find("Object").is_none());
        assert_eq!(catalog.kinds().collect::<Vec<_>>(), vec!["Bucket"]);
    }

    #[test]
    fn test_fields_by_set_keep_order() {
        let crd = Crd::new("Bucket")
            .with_spec_field("Region", "string")
            .with_spec_field("Name", "string")
            .with_status_field("ARN", "string");
        let names: Vec<_> = crd.fields(FieldSet::Spec).iter().map(|f| &f.name).collect();
        assert_eq!(names, vec!["Region", "Name"]);
        assert!(crd.field(FieldSet::Status, "ARN").is_some());
        assert!(crd.field(FieldSet::Spec, "ARN").is_none());
    }
}

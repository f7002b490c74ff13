//! Sample model manifests and key scripts.

/// Two S3 resources; `Bucket` has two spec fields and one status field.
pub const S3_MANIFEST: &str = r#"service: s3
resources:
  - kind: Bucket
    spec_fields:
      - {name: Name, type: string}
      - {name: Region, type: string}
    status_fields:
      - {name: ARN, type: string}
  - kind: Policy
    spec_fields:
      - {name: Document, type: string}
"#;

/// A single queue resource, used next to [`S3_MANIFEST`] for `--all` runs.
pub const SQS_MANIFEST: &str = r#"{
  "service": "sqs",
  "resources": [
    {
      "kind": "Queue",
      "spec_fields": [{"name": "QueueName", "type": "string"}],
      "status_fields": [{"name": "QueueURL", "type": "string"}]
    }
  ]
}
"#;

/// Un-ignore Bucket, mark `Name` required and `Region` immutable, then quit.
pub const TOGGLE_FLAGS_SCRIPT: &str = "\
# summary: un-ignore and open Bucket
i
enter
# detail: spec fields button
enter
r
down
m
q
";

/// Point `Name` at a KMS key through the reference editor, then quit.
pub const REFERENCE_SCRIPT: &str = "\
size:120x40
enter
enter
enter
text:kms
tab
text:Key
tab
text:.status.ackResourceMetadata.arn
esc
q
";

/// Open the discard dialog and confirm it.
pub const DISCARD_SCRIPT: &str = "\
i
esc
enter
";

/// Cancel the whole run from the detail view.
pub const INTERRUPT_SCRIPT: &str = "\
enter
ctrl+c
";

/// Quit straight from the summary.
pub const QUIT_SCRIPT: &str = "q\n";

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::ValidationError;

/// Standard wrapper for every machine-readable `finx` output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(meta: EnvelopeMeta, data: T) -> Result<Self, ValidationError> {
        meta.validate_schema_compliance()?;
        Ok(Self { meta, data })
    }
}

/// Metadata attached to every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub schema_version: String,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    /// Scorer that produced `data`, e.g. `momentum_b` or `attention`.
    pub component: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    pub fn new(
        request_id: impl Into<String>,
        schema_version: impl Into<String>,
        component: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let meta = Self {
            request_id: request_id.into(),
            schema_version: schema_version.into(),
            generated_at: OffsetDateTime::now_utc(),
            component: component.into(),
            warnings: Vec::new(),
        };
        meta.validate_schema_compliance()?;
        Ok(meta)
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn validate_schema_compliance(&self) -> Result<(), ValidationError> {
        if self.request_id.trim().len() < 8 {
            return Err(ValidationError::InvalidRequestId);
        }

        if !is_valid_schema_version(&self.schema_version) {
            return Err(ValidationError::InvalidSchemaVersion {
                value: self.schema_version.clone(),
            });
        }

        Ok(())
    }
}

fn is_valid_schema_version(value: &str) -> bool {
    let Some(version) = value.strip_prefix('v') else {
        return false;
    };

    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|ch| ch.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_meta() {
        let meta = EnvelopeMeta::new("request-12345", "v1.0.0", "dv").expect("meta");
        assert_eq!(meta.schema_version, "v1.0.0");

        let envelope = Envelope::new(meta, vec![1, 2, 3]).expect("envelope");
        let json = serde_json::to_value(&envelope).expect("json");
        assert_eq!(json["meta"]["component"], "dv");
        assert!(json["meta"].get("warnings").is_none());
    }

    #[test]
    fn rejects_bad_schema_version_and_request_id() {
        let err = EnvelopeMeta::new("request-12345", "1.0.0", "dv").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidSchemaVersion { .. }));

        let err = EnvelopeMeta::new("short", "v1.0.0", "dv").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidRequestId));
    }
}

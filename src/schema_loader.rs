//! Shared JSON Schema loader for catalog and translation files.
//!
//! Both data files declare a `schema_version`; the loader checks it against the
//! const embedded in the schema and compiles a validator so callers report
//! every schema violation in one error.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const SCHEMA_VERSION_POINTER: &str = "/properties/schema_version/const";

/// Compiled schema plus the `schema_version` it accepts.
pub(crate) struct LoadedSchema {
    pub schema_version: String,
    compiled: JSONSchema,
}

impl LoadedSchema {
    /// Validate `instance`, joining every violation into one error.
    pub fn validate(&self, instance: &Value, label: &str) -> Result<()> {
        if let Err(errors) = self.compiled.validate(instance) {
            let details = errors
                .map(|err| format!("{}: {}", err.instance_path, err))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("{label} failed schema validation:\n{details}");
        }
        Ok(())
    }
}

pub(crate) fn load_json_schema(path: &Path) -> Result<LoadedSchema> {
    let schema = read_json(path).with_context(|| format!("loading schema {}", path.display()))?;
    let schema_version = extract_schema_version(&schema)
        .ok_or_else(|| anyhow!("schema {} missing schema_version const", path.display()))?;
    let compiled = JSONSchema::compile(&schema)
        .map_err(|err| anyhow!("compiling schema {}: {err}", path.display()))?;
    Ok(LoadedSchema {
        schema_version,
        compiled,
    })
}

/// Parse a JSON file, validate it against the schema at `schema_path`, and
/// confirm its `schema_version` matches the schema's const.
pub(crate) fn validate_file_against_schema(path: &Path, schema_path: &Path) -> Result<Value> {
    let schema = load_json_schema(schema_path)?;
    let value = read_json(path)?;

    let declared = value
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if declared != schema.schema_version {
        bail!(
            "{} declares schema_version '{}', expected '{}'",
            path.display(),
            declared,
            schema.schema_version
        );
    }

    schema.validate(&value, &path.display().to_string())?;
    Ok(value)
}

pub(crate) fn read_json(path: &Path) -> Result<Value> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))
}

fn extract_schema_version(schema: &Value) -> Option<String> {
    let version = schema.pointer(SCHEMA_VERSION_POINTER).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::NamedTempFile;

    fn write_json(value: &Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        serde_json::to_writer(&mut file, value).unwrap();
        file
    }

    fn sample_schema() -> NamedTempFile {
        write_json(&json!({
            "type": "object",
            "required": ["schema_version", "name"],
            "properties": {
                "schema_version": {"type": "string", "const": "sample_v1"},
                "name": {"type": "string", "minLength": 1}
            }
        }))
    }

    #[test]
    fn accepts_matching_document() {
        let schema = sample_schema();
        let doc = write_json(&json!({"schema_version": "sample_v1", "name": "ok"}));
        let value = validate_file_against_schema(doc.path(), schema.path()).unwrap();
        assert_eq!(value["name"], "ok");
    }

    #[test]
    fn rejects_version_mismatch() {
        let schema = sample_schema();
        let doc = write_json(&json!({"schema_version": "sample_v2", "name": "ok"}));
        let err = validate_file_against_schema(doc.path(), schema.path()).unwrap_err();
        assert!(err.to_string().contains("sample_v2"));
    }

    #[test]
    fn reports_schema_violations() {
        let schema = sample_schema();
        let doc = write_json(&json!({"schema_version": "sample_v1", "name": ""}));
        let err = validate_file_against_schema(doc.path(), schema.path()).unwrap_err();
        assert!(format!("{err:#}").contains("failed schema validation"));
    }

    #[test]
    fn schema_without_version_const_is_rejected() {
        let schema = write_json(&json!({"type": "object"}));
        let err = load_json_schema(schema.path())
            .err()
            .expect("missing const should fail");
        assert!(err.to_string().contains("schema_version"));
    }
}

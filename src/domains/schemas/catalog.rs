//! Schema Catalog - the indexed set of tool schema definitions.
//!
//! The catalog is built exactly once at startup from an ordered JSON array
//! of definitions:
//!
//! ```json
//! [
//!   {
//!     "name": "mt5.get_symbol_tick",
//!     "description": "Latest tick for a symbol",
//!     "parameters": { "type": "object", "required": ["symbol"] }
//!   }
//! ]
//! ```
//!
//! Each definition is kept verbatim (for listing) alongside its compiled
//! parameter contract (for validation). Nothing mutates the catalog after
//! it is built.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use super::error::SchemaError;
use super::validator::{ParameterValidator, ValidationFailure};

/// A single loaded tool schema.
#[derive(Debug)]
pub struct ToolSchema {
    name: String,
    definition: Value,
    validator: ParameterValidator,
}

impl ToolSchema {
    /// Build a schema from one raw definition.
    pub fn from_definition(definition: Value) -> Result<Self, SchemaError> {
        let Some(fields) = definition.as_object() else {
            return Err(SchemaError::malformed("schema definition must be an object"));
        };

        let name = fields
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| SchemaError::malformed("schema definition without a string 'name'"))?
            .to_string();

        let contract = fields
            .get("parameters")
            .filter(|p| p.is_object())
            .ok_or_else(|| {
                SchemaError::malformed(format!(
                    "schema '{}' has no object 'parameters' contract",
                    name
                ))
            })?;

        let validator = ParameterValidator::compile(contract)
            .map_err(|reason| SchemaError::invalid_contract(&name, reason))?;

        Ok(Self {
            name,
            definition,
            validator,
        })
    }

    /// Fully-qualified tool name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The definition exactly as it was loaded.
    pub fn definition(&self) -> &Value {
        &self.definition
    }

    /// Validate a parameter value against this schema's contract.
    pub fn validate(&self, params: &Value) -> Result<(), ValidationFailure> {
        self.validator.validate(params)
    }
}

/// Mapping from fully-qualified tool name to schema, in load order.
#[derive(Debug, Default)]
pub struct SchemaCatalog {
    schemas: Vec<ToolSchema>,
    index: HashMap<String, usize>,
}

impl SchemaCatalog {
    /// Load the catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SchemaError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_json_str(&text)?;
        info!("Loaded {} tool schemas from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Parse the catalog from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(text)?;
        match value {
            Value::Array(definitions) => Self::from_definitions(definitions),
            _ => Err(SchemaError::malformed(
                "schema source must be a JSON array of definitions",
            )),
        }
    }

    /// Build the catalog from already-decoded definitions.
    pub fn from_definitions(definitions: Vec<Value>) -> Result<Self, SchemaError> {
        let mut catalog = Self {
            schemas: Vec::with_capacity(definitions.len()),
            index: HashMap::with_capacity(definitions.len()),
        };

        for definition in definitions {
            let schema = ToolSchema::from_definition(definition)?;
            if catalog.index.contains_key(schema.name()) {
                return Err(SchemaError::Duplicate(schema.name().to_string()));
            }
            debug!("Indexed schema {}", schema.name());
            catalog
                .index
                .insert(schema.name().to_string(), catalog.schemas.len());
            catalog.schemas.push(schema);
        }

        Ok(catalog)
    }

    /// Look up a schema by fully-qualified name.
    pub fn get(&self, name: &str) -> Option<&ToolSchema> {
        self.index.get(name).map(|&i| &self.schemas[i])
    }

    /// Whether a schema with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Raw definitions in load order.
    pub fn definitions(&self) -> impl Iterator<Item = &Value> {
        self.schemas.iter().map(ToolSchema::definition)
    }

    /// Schema names in load order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.iter().map(ToolSchema::name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn sample_definitions() -> Value {
        json!([
            {
                "name": "mt5.get_account_info",
                "description": "Account summary",
                "parameters": { "type": "object", "properties": {} }
            },
            {
                "name": "mt5.get_symbol_tick",
                "parameters": {
                    "type": "object",
                    "properties": { "symbol": { "type": "string" } },
                    "required": ["symbol"]
                }
            }
        ])
    }

    #[test]
    fn test_index_by_name_preserving_order() {
        let catalog = SchemaCatalog::from_json_str(&sample_definitions().to_string()).unwrap();
        assert_eq!(catalog.len(), 2);
        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names, vec!["mt5.get_account_info", "mt5.get_symbol_tick"]);
        assert!(catalog.contains("mt5.get_symbol_tick"));
        assert!(catalog.get("mt5.unknown").is_none());
    }

    #[test]
    fn test_definitions_are_kept_verbatim() {
        let raw = sample_definitions();
        let catalog = SchemaCatalog::from_json_str(&raw.to_string()).unwrap();
        let definitions: Vec<Value> = catalog.definitions().cloned().collect();
        assert_eq!(Value::Array(definitions), raw);
        let tick = catalog.get("mt5.get_symbol_tick").unwrap();
        assert_eq!(tick.parameters()["required"], json!(["symbol"]));
    }

    #[test]
    fn test_schema_validates_parameters() {
        let catalog = SchemaCatalog::from_json_str(&sample_definitions().to_string()).unwrap();
        let tick = catalog.get("mt5.get_symbol_tick").unwrap();
        assert!(tick.validate(&json!({ "symbol": "EURUSD" })).is_ok());
        assert!(tick.validate(&json!({})).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", sample_definitions()).unwrap();

        let catalog = SchemaCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = SchemaCatalog::load(dir.path().join("schemas.json"));
        assert!(matches!(result, Err(SchemaError::Unreadable { .. })));
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let result = SchemaCatalog::from_json_str("[{\"name\": ");
        assert!(matches!(result, Err(SchemaError::Decode(_))));
    }

    #[test]
    fn test_non_array_source_is_malformed() {
        let result = SchemaCatalog::from_json_str("{\"name\": \"mt5.x\"}");
        assert!(matches!(result, Err(SchemaError::Malformed(_))));
    }

    #[test]
    fn test_definition_without_name_is_malformed() {
        let result = SchemaCatalog::from_definitions(vec![json!({ "parameters": {} })]);
        assert!(matches!(result, Err(SchemaError::Malformed(_))));
    }

    #[test]
    fn test_definition_without_contract_is_malformed() {
        let result = SchemaCatalog::from_definitions(vec![json!({ "name": "mt5.x" })]);
        assert!(matches!(result, Err(SchemaError::Malformed(_))));
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let definition = json!({ "name": "mt5.x", "parameters": {} });
        let result = SchemaCatalog::from_definitions(vec![definition.clone(), definition]);
        assert!(matches!(result, Err(SchemaError::Duplicate(name)) if name == "mt5.x"));
    }

    #[test]
    fn test_invalid_contract_is_rejected() {
        let result = SchemaCatalog::from_definitions(vec![json!({
            "name": "mt5.x",
            "parameters": { "type": 12 }
        })]);
        assert!(matches!(result, Err(SchemaError::InvalidContract { .. })));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = SchemaCatalog::from_json_str("[]").unwrap();
        assert!(catalog.is_empty());
    }
}

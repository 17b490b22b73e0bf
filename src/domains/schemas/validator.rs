//! Parameter contract validation.
//!
//! A contract is a JSON Schema document taken from a tool's schema
//! definition. It is compiled once when the catalog is built, then used to
//! check parameter values purely structurally; parameters are never
//! interpreted beyond that.

use std::fmt;

use jsonschema::JSONSchema;
use serde_json::Value;

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer to the offending value (empty for the root).
    pub path: String,

    /// Description of the violated constraint.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// All constraints a parameter value violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    violations: Vec<Violation>,
}

impl ValidationFailure {
    /// Build a failure from a list of violations.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// The individual violations, in the order the validator reported them.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() {
            return write!(f, "parameters do not match the declared schema");
        }
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

/// A compiled parameter contract.
pub struct ParameterValidator {
    compiled: JSONSchema,
}

impl ParameterValidator {
    /// Compile a parameter contract.
    ///
    /// Returns a description of the problem if the contract is not a valid
    /// JSON Schema document.
    pub fn compile(contract: &Value) -> Result<Self, String> {
        let compiled = JSONSchema::compile(contract).map_err(|e| e.to_string())?;
        Ok(Self { compiled })
    }

    /// Check `params` against the contract.
    pub fn validate(&self, params: &Value) -> Result<(), ValidationFailure> {
        match self.compiled.validate(params) {
            Ok(()) => Ok(()),
            Err(errors) => {
                let violations = errors
                    .map(|e| Violation {
                        path: e.instance_path.to_string(),
                        message: e.to_string(),
                    })
                    .collect();
                Err(ValidationFailure::new(violations))
            }
        }
    }
}

impl fmt::Debug for ParameterValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterValidator").finish_non_exhaustive()
    }
}

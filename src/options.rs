use serde::{Deserialize, Serialize};

use crate::ir::InferredTypeKind;

/// Canonical type names used by literal inference and the text fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeNames {
    pub integer: String,
    pub floating_point: String,
    pub boolean: String,
    pub text: String,
    /// Used when neither an annotation nor a literal shape decides the type.
    pub fallback: String,
}

impl Default for TypeNames {
    fn default() -> Self {
        Self {
            integer: "Int".into(),
            floating_point: "Double".into(),
            boolean: "Bool".into(),
            text: "String".into(),
            fallback: "String".into(),
        }
    }
}

impl TypeNames {
    pub fn canonical(&self, kind: InferredTypeKind) -> Option<&str> {
        match kind {
            InferredTypeKind::Integer => Some(&self.integer),
            InferredTypeKind::FloatingPoint => Some(&self.floating_point),
            InferredTypeKind::Boolean => Some(&self.boolean),
            InferredTypeKind::Text => Some(&self.text),
            InferredTypeKind::Unknown => None,
        }
    }
}

/// Knobs for one synthesis pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthOptions {
    /// Spaces per indentation level in emitted code.
    pub indent: usize,
    /// Name of the emitted key enumeration.
    pub keys_name: String,
    pub type_names: TypeNames,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            keys_name: "CodingKeys".into(),
            type_names: TypeNames::default(),
        }
    }
}

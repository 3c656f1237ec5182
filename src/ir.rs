// Field IR shared by the resolver, the default extractor and codegen.
// Type and expression text is carried verbatim, never re-parsed.

use serde::Serialize;

use crate::decl::Expr;

/// One eligible stored field, as produced by the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub declared_type: Option<String>,  // annotation text, verbatim
    pub initializer: Option<Expr>,      // initializer text + literal shape
}

impl FieldDescriptor {
    pub fn initializer_expr(&self) -> Option<&str> {
        self.initializer.as_ref().map(|e| e.text.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InferredTypeKind {
    Integer,
    FloatingPoint,
    Boolean,
    Text,
    Unknown,
}

/// Where a field's effective type came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeSource {
    Annotation,
    Literal,
    Fallback,
}

impl TypeSource {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeSource::Annotation => "annotation",
            TypeSource::Literal => "literal",
            TypeSource::Fallback => "fallback",
        }
    }
}

/// Where a field's effective default came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultSource {
    Initializer,
    Synthesized,
}

/// A field ready for emission: type and default are always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedField {
    pub name: String,
    pub effective_type: String,
    pub effective_default: String,
    pub inferred_type_kind: InferredTypeKind,
    pub type_source: TypeSource,
    pub default_source: DefaultSource,
}

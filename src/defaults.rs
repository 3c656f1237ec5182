// Default-expression extraction.
// The initializer is reused verbatim; without one, `T()` is synthesized and it
// is up to `T` to have a zero-argument initializer.

use crate::ir::{DefaultSource, FieldDescriptor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultResolution {
    pub effective_default: String,
    pub source: DefaultSource,
}

pub fn extract_default(field: &FieldDescriptor, effective_type: &str) -> DefaultResolution {
    match field.initializer_expr() {
        Some(expr) => DefaultResolution {
            effective_default: expr.trim().to_string(),
            source: DefaultSource::Initializer,
        },
        None => DefaultResolution {
            effective_default: zero_arg_construction(effective_type),
            source: DefaultSource::Synthesized,
        },
    }
}

pub fn zero_arg_construction(ty: &str) -> String {
    format!("{}()", ty.trim())
}

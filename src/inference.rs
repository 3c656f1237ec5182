//! Type resolution for eligible fields.
//!
//! Priority is fixed:
//! - explicit annotation, verbatim (generic/optional/collection syntax untouched);
//! - else the literal shape of the initializer (`5` → `Int`, `1.5` → `Double`, ...);
//! - else the text fallback, which is reported as a diagnostic by the caller.
//!
//! Richer initializers (`Section()`, `[1, 2]`, `nil`) are deliberately not
//! inspected: they must be annotated or they resolve to text.
pub mod literal;

pub use literal::LiteralKind;

use crate::ir::{FieldDescriptor, InferredTypeKind, TypeSource};
use crate::options::TypeNames;

/// Outcome of resolving one field's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeResolution {
    pub effective_type: String,
    pub inferred_type_kind: InferredTypeKind,
    pub source: TypeSource,
}

impl From<LiteralKind> for InferredTypeKind {
    fn from(kind: LiteralKind) -> Self {
        match kind {
            LiteralKind::Integer => InferredTypeKind::Integer,
            LiteralKind::Float => InferredTypeKind::FloatingPoint,
            LiteralKind::Boolean => InferredTypeKind::Boolean,
            LiteralKind::String => InferredTypeKind::Text,
            LiteralKind::Other => InferredTypeKind::Unknown,
        }
    }
}

/// Literal-kind inference. Only meaningful when the field has no annotation.
pub fn infer_kind(field: &FieldDescriptor) -> InferredTypeKind {
    match (&field.declared_type, &field.initializer) {
        (Some(_), _) | (None, None) => InferredTypeKind::Unknown,
        (None, Some(expr)) => expr.kind.into(),
    }
}

pub fn resolve_type(field: &FieldDescriptor, names: &TypeNames) -> TypeResolution {
    if let Some(declared) = &field.declared_type {
        return TypeResolution {
            effective_type: declared.trim().to_string(),
            inferred_type_kind: InferredTypeKind::Unknown,
            source: TypeSource::Annotation,
        };
    }
    let kind = infer_kind(field);
    match names.canonical(kind) {
        Some(name) => TypeResolution {
            effective_type: name.to_string(),
            inferred_type_kind: kind,
            source: TypeSource::Literal,
        },
        None => TypeResolution {
            effective_type: names.fallback.clone(),
            inferred_type_kind: kind,
            source: TypeSource::Fallback,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::Expr;

    fn field(declared: Option<&str>, init: Option<&str>) -> FieldDescriptor {
        FieldDescriptor {
            name: "value".into(),
            declared_type: declared.map(str::to_string),
            initializer: init.map(Expr::new),
        }
    }

    #[test]
    fn annotation_wins_over_literal() {
        let names = TypeNames::default();
        let r = resolve_type(&field(Some("String"), Some("\"x\"")), &names);
        assert_eq!(r.effective_type, "String");
        assert_eq!(r.source, TypeSource::Annotation);

        let r = resolve_type(&field(Some("Int64"), Some("5")), &names);
        assert_eq!(r.effective_type, "Int64");
    }

    #[test]
    fn annotation_is_verbatim() {
        let names = TypeNames::default();
        for ty in ["[Int]", "[String: Int]", "Int?", "Set<Tag>", "Result<[Int], Error>"] {
            let r = resolve_type(&field(Some(ty), None), &names);
            assert_eq!(r.effective_type, ty);
        }
        let r = resolve_type(&field(Some("  [Int] "), None), &names);
        assert_eq!(r.effective_type, "[Int]");
    }

    #[test]
    fn literal_inference() {
        let names = TypeNames::default();
        let cases = [
            ("true", "Bool", InferredTypeKind::Boolean),
            ("5", "Int", InferredTypeKind::Integer),
            ("1.5", "Double", InferredTypeKind::FloatingPoint),
            ("\"hi\"", "String", InferredTypeKind::Text),
        ];
        for (init, ty, kind) in cases {
            let r = resolve_type(&field(None, Some(init)), &names);
            assert_eq!(r.effective_type, ty, "{init}");
            assert_eq!(r.inferred_type_kind, kind);
            assert_eq!(r.source, TypeSource::Literal);
        }
    }

    #[test]
    fn unclassifiable_falls_back_to_text() {
        let names = TypeNames::default();
        for init in [Some("Section()"), Some("[1, 2]"), Some("-5"), None] {
            let r = resolve_type(&field(None, init), &names);
            assert_eq!(r.effective_type, "String");
            assert_eq!(r.inferred_type_kind, InferredTypeKind::Unknown);
            assert_eq!(r.source, TypeSource::Fallback);
        }
    }

    #[test]
    fn canonical_names_are_configurable() {
        let names = TypeNames {
            floating_point: "Float".into(),
            fallback: "AnyCodable".into(),
            ..TypeNames::default()
        };
        assert_eq!(resolve_type(&field(None, Some("0.5")), &names).effective_type, "Float");
        assert_eq!(resolve_type(&field(None, Some("nil")), &names).effective_type, "AnyCodable");
    }
}

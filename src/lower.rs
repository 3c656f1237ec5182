use log::{debug, warn};

use crate::classify::classify_members;
use crate::decl::Member;
use crate::defaults::extract_default;
use crate::diagnostics::Diagnostic;
use crate::inference::resolve_type;
use crate::ir::{DefaultSource, FieldDescriptor, ResolvedField, TypeSource};
use crate::options::TypeNames;

/// Fields ready for codegen plus everything noticed on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lowered {
    pub fields: Vec<ResolvedField>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Classify, then resolve type and default for each field independently.
pub fn lower_to_ir(members: &[Member], names: &TypeNames) -> Lowered {
    let classification = classify_members(members);
    let mut diagnostics = classification.diagnostics;

    let fields = classification
        .fields
        .iter()
        .map(|field| resolve_field(field, names, &mut diagnostics))
        .collect();

    Lowered { fields, diagnostics }
}

fn resolve_field(field: &FieldDescriptor, names: &TypeNames, diagnostics: &mut Vec<Diagnostic>) -> ResolvedField {
    let ty = resolve_type(field, names);
    if ty.source == TypeSource::Fallback {
        warn!("`{}`: type inference fell back to `{}`", field.name, ty.effective_type);
        diagnostics.push(Diagnostic::type_fallback(
            &field.name,
            &ty.effective_type,
            field.initializer_expr(),
        ));
    }

    let default = extract_default(field, &ty.effective_type);
    if default.source == DefaultSource::Synthesized {
        diagnostics.push(Diagnostic::synthesized_default(&field.name, &default.effective_default));
    }

    debug!(
        "`{}`: {} ({:?}) ?? {} ({:?})",
        field.name, ty.effective_type, ty.source, default.effective_default, default.source
    );

    ResolvedField {
        name: field.name.clone(),
        effective_type: ty.effective_type,
        effective_default: default.effective_default,
        inferred_type_kind: ty.inferred_type_kind,
        type_source: ty.source,
        default_source: default.source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{Binding, VariableDecl};
    use crate::diagnostics::DiagnosticKind;
    use crate::ir::InferredTypeKind;

    fn var(binding: Binding) -> Member {
        Member::Variable(VariableDecl::var(binding))
    }

    #[test]
    fn every_field_gets_type_and_default() {
        let members = vec![
            var(Binding::named("count").init("5")),
            var(Binding::named("id").typed("String").init("\"x\"")),
            var(Binding::named("tags").typed("[String]")),
            var(Binding::named("section").init("Section()")),
        ];
        let lowered = lower_to_ir(&members, &TypeNames::default());

        let table: Vec<(&str, &str, &str)> = lowered
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.effective_type.as_str(), f.effective_default.as_str()))
            .collect();
        assert_eq!(
            table,
            [
                ("count", "Int", "5"),
                ("id", "String", "\"x\""),
                ("tags", "[String]", "[String]()"),
                ("section", "String", "Section()"),
            ]
        );
        assert_eq!(lowered.fields[0].inferred_type_kind, InferredTypeKind::Integer);
        assert_eq!(lowered.fields[3].type_source, TypeSource::Fallback);
    }

    #[test]
    fn fallbacks_are_diagnosed() {
        let members = vec![
            var(Binding::named("section").init("Section()")),
            var(Binding::named("tags").typed("[String]")),
            var(Binding::named("ok").init("true")),
        ];
        let lowered = lower_to_ir(&members, &TypeNames::default());
        let kinds: Vec<(DiagnosticKind, &str)> = lowered
            .diagnostics
            .iter()
            .map(|d| (d.kind, d.member.as_str()))
            .collect();
        assert_eq!(
            kinds,
            [
                (DiagnosticKind::TypeInferenceFallback, "section"),
                (DiagnosticKind::UnconstructibleDefaultFallback, "tags"),
            ]
        );
    }

    #[test]
    fn bare_declaration_hits_both_fallbacks() {
        let lowered = lower_to_ir(&[var(Binding::named("raw"))], &TypeNames::default());
        assert_eq!(lowered.fields[0].effective_type, "String");
        assert_eq!(lowered.fields[0].effective_default, "String()");
        assert_eq!(lowered.diagnostics.len(), 2);
    }
}

use serde::Serialize;

use crate::codegen::{self, GeneratedOutput};
use crate::decl::DeclGroup;
use crate::diagnostics::Diagnostic;
use crate::ir::ResolvedField;
use crate::lower::lower_to_ir;
use crate::options::SynthOptions;

/// Everything one synthesis pass produces for one declaration group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Synthesis {
    pub name: Option<String>,
    pub fields: Vec<ResolvedField>,
    pub output: GeneratedOutput,
    pub diagnostics: Vec<Diagnostic>,
}

impl Synthesis {
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }
}

/// Derive `CodingKeys` and `init(from:)` for `group`.
///
/// Pure: no I/O, no state shared between calls, so it can run per type in
/// parallel and always yields the same text for the same input.
pub fn synthesize(group: &DeclGroup, options: &SynthOptions) -> Synthesis {
    let lowered = lower_to_ir(&group.members, &options.type_names);
    let output = codegen::emit(&lowered.fields, options);
    Synthesis {
        name: group.name.clone(),
        fields: lowered.fields,
        output,
        diagnostics: lowered.diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{AccessorBlock, AccessorKind, Binding, Member, VariableDecl};

    fn var(binding: Binding) -> Member {
        Member::Variable(VariableDecl::var(binding))
    }

    #[test]
    fn literal_inference_end_to_end() {
        let group = DeclGroup::new(
            "Foo",
            vec![
                var(Binding::named("flag").init("true")),
                var(Binding::named("count").init("5")),
                var(Binding::named("ratio").init("1.5")),
                var(Binding::named("message").init("\"hi\"")),
            ],
        );
        let s = synthesize(&group, &SynthOptions::default());
        let types: Vec<&str> = s.fields.iter().map(|f| f.effective_type.as_str()).collect();
        assert_eq!(types, ["Bool", "Int", "Double", "String"]);
        assert!(s.output.initializer.text.contains(
            "self.message = try container.decodeIfPresent(String.self, forKey: .message) ?? \"hi\""
        ));
        assert!(s.diagnostics.is_empty());
    }

    #[test]
    fn deterministic() {
        let group = DeclGroup::new(
            "Foo",
            vec![
                var(Binding::named("a").typed("[String: Int]").init("[:]")),
                var(Binding::named("b").init("Section()")),
                var(Binding::named("c").init("0").accessor(AccessorBlock::Accessors(vec![AccessorKind::DidSet]))),
            ],
        );
        let options = SynthOptions::default();
        let first = synthesize(&group, &options);
        let second = synthesize(&group, &options);
        assert_eq!(first.output.render(), second.output.render());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_pattern_text_never_reaches_codegen() {
        let group: DeclGroup = serde_json::from_value(serde_json::json!({
            "name": "Foo",
            "members": [{ "kind": "variable", "bindings": [{ "pattern": "", "initializer": "1" }] }]
        }))
        .unwrap();
        let s = synthesize(&group, &SynthOptions::default());

        assert!(s.fields.is_empty());
        assert_eq!(s.output.render(), "enum CodingKeys: String, CodingKey {\n}\n\ninit(from decoder: Decoder) throws {\n}");
        assert_eq!(s.diagnostics.len(), 1);
        assert_eq!(s.diagnostics[0].kind, crate::diagnostics::DiagnosticKind::MalformedDeclarationShape);
        assert!(s.has_warnings());
    }

    #[test]
    fn warnings_filter() {
        let group = DeclGroup::new("Foo", vec![var(Binding::named("tags").typed("[String]"))]);
        let s = synthesize(&group, &SynthOptions::default());
        assert_eq!(s.diagnostics.len(), 1);
        assert!(!s.has_warnings());

        let group = DeclGroup::new("Foo", vec![var(Binding::named("x").init("make()"))]);
        assert!(synthesize(&group, &SynthOptions::default()).has_warnings());
    }
}

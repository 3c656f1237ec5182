//! Member classification: which members are stored, instance-level fields.
//!
//! Exclusion rules, first match wins:
//! 1. not a value binding (functions, nested types, initializers, ...);
//! 2. `static` / `class` modifier;
//! 3. accessor block with a read accessor (computed property).
//!
//! Observer-only accessor blocks (`willSet` / `didSet`) keep the member: it is
//! still stored. Output order is declaration order.
use indexmap::IndexMap;
use log::debug;

use crate::decl::{AccessorClass, Binding, Member, VariableDecl};
use crate::diagnostics::Diagnostic;
use crate::ir::FieldDescriptor;

/// Why a member or binding did not become a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    NotABinding,
    TypeLevel,
    ReadAccessor,
    MalformedPattern,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub fields: Vec<FieldDescriptor>,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn classify_members(members: &[Member]) -> Classification {
    let mut out = Classification::default();

    for member in members {
        let decl = match member {
            Member::Variable(decl) => decl,
            other => {
                debug!("excluding {other:?}: {:?}", Exclusion::NotABinding);
                continue;
            }
        };
        for binding in &decl.bindings {
            match classify_binding(decl, binding) {
                Ok(field) => out.fields.push(field),
                Err(Exclusion::MalformedPattern) => {
                    out.diagnostics
                        .push(Diagnostic::malformed_pattern(&binding.pattern.to_string()));
                }
                Err(reason) => debug!("excluding `{}`: {reason:?}", binding.pattern),
            }
        }
    }

    out.diagnostics.extend(duplicate_names(&out.fields));
    out
}

/// Decide one binding of a variable declaration.
pub fn classify_binding(decl: &VariableDecl, binding: &Binding) -> Result<FieldDescriptor, Exclusion> {
    if decl.is_type_level() {
        return Err(Exclusion::TypeLevel);
    }
    match binding.accessor.as_ref().map(|block| block.classify()) {
        Some(AccessorClass::ReadAccessor) => return Err(Exclusion::ReadAccessor),
        Some(AccessorClass::ObserversOnly) | Some(AccessorClass::Other) | None => {}
    }
    let name = binding.pattern.identifier().ok_or(Exclusion::MalformedPattern)?;
    Ok(FieldDescriptor {
        name: name.to_string(),
        declared_type: binding.type_annotation.clone(),
        initializer: binding.initializer.clone(),
    })
}

/// Same-named fields, reported in first-seen order.
fn duplicate_names(fields: &[FieldDescriptor]) -> Vec<Diagnostic> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for field in fields {
        *counts.entry(field.name.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, count)| Diagnostic::duplicate_name(name, count))
        .collect()
}

//! Already-parsed declaration group, as handed over by the host.
//!
//! Every piece of syntax the engine needs is pre-decomposed: binding pattern,
//! annotation text, initializer text, accessor block and modifiers. The JSON
//! form accepts a few shorthands (bare strings for patterns and initializers)
//! so fixtures stay readable.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::inference::literal::{self, LiteralKind};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// The member list of one annotated type, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeclGroup {
    /// Name of the enclosing type, for reporting only.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Member {
    Variable(VariableDecl),
    Function {
        #[serde(default)]
        name: Option<String>,
    },
    /// Nested struct/enum/class/typealias.
    Type {
        #[serde(default)]
        name: Option<String>,
    },
    Initializer,
    Subscript,
    Other {
        #[serde(default)]
        description: Option<String>,
    },
}

/// `var`/`let` declaration; may hold several comma-separated bindings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableDecl {
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub specifier: BindingSpecifier,
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingSpecifier {
    #[default]
    Var,
    Let,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub pattern: Pattern,
    #[serde(default, rename = "type", alias = "type_annotation")]
    pub type_annotation: Option<String>,
    #[serde(default)]
    pub initializer: Option<Expr>,
    #[serde(default)]
    pub accessor: Option<AccessorBlock>,
}

/// Binding pattern. JSON: `"name"`, `"_"`, or `{"tuple": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PatternRepr", rename_all = "snake_case")]
pub enum Pattern {
    Identifier(String),
    Tuple(Vec<Pattern>),
    Wildcard,
}

/// Expression text plus its literal shape. JSON: `"42"` (shape classified from
/// the text) or `{"text": "42", "kind": "integer"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ExprRepr")]
pub struct Expr {
    pub text: String,
    pub kind: LiteralKind,
}

/// JSON: `"getter"` for an implicit `{ ... }` body, or
/// `{"accessors": ["willSet", "didSet"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorBlock {
    Getter,
    Accessors(Vec<AccessorKind>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessorKind {
    #[serde(rename = "get")]
    Get,
    #[serde(rename = "set")]
    Set,
    #[serde(rename = "willSet")]
    WillSet,
    #[serde(rename = "didSet")]
    DidSet,
    #[serde(rename = "_read", alias = "read")]
    Read,
    #[serde(rename = "_modify", alias = "modify")]
    Modify,
    #[serde(rename = "init")]
    Init,
}

/// What an accessor block means for storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorClass {
    /// Computed: a getter exists, there is no storage slot.
    ReadAccessor,
    /// Stored, with `willSet`/`didSet` hooks.
    ObserversOnly,
    /// No read accessor and not purely observers.
    Other,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl DeclGroup {
    pub fn new(name: impl Into<String>, members: Vec<Member>) -> Self {
        Self { name: Some(name.into()), members }
    }
}

impl VariableDecl {
    /// Single-binding `var`.
    pub fn var(binding: Binding) -> Self {
        Self { bindings: vec![binding], ..Self::default() }
    }

    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    /// `static` / `class` members belong to the type, not to instances.
    pub fn is_type_level(&self) -> bool {
        self.modifiers
            .iter()
            .any(|m| matches!(m.trim(), "static" | "class"))
    }
}

impl Binding {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            pattern: Pattern::Identifier(name.into()),
            type_annotation: None,
            initializer: None,
            accessor: None,
        }
    }

    pub fn typed(mut self, ty: impl Into<String>) -> Self {
        self.type_annotation = Some(ty.into());
        self
    }

    pub fn init(mut self, expr: impl AsRef<str>) -> Self {
        self.initializer = Some(Expr::new(expr));
        self
    }

    pub fn accessor(mut self, block: AccessorBlock) -> Self {
        self.accessor = Some(block);
        self
    }
}

impl Pattern {
    /// The bound name, when the pattern is a single usable identifier.
    ///
    /// Text that could not name a stored property (empty, `_`, spaces, member
    /// paths) is rejected the same way tuples and wildcards are.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Pattern::Identifier(name) if is_identifier(name) => Some(name.as_str()),
            Pattern::Identifier(_) | Pattern::Tuple(_) | Pattern::Wildcard => None,
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pattern::Identifier(name) => f.write_str(name),
            Pattern::Wildcard => f.write_str("_"),
            Pattern::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl Expr {
    /// Expression whose literal shape is classified from its text.
    pub fn new(text: impl AsRef<str>) -> Self {
        let text = text.as_ref().trim().to_string();
        let kind = literal::classify(&text);
        Self { text, kind }
    }

    pub fn with_kind(text: impl AsRef<str>, kind: LiteralKind) -> Self {
        Self { text: text.as_ref().trim().to_string(), kind }
    }
}

impl AccessorBlock {
    pub fn classify(&self) -> AccessorClass {
        match self {
            AccessorBlock::Getter => AccessorClass::ReadAccessor,
            AccessorBlock::Accessors(kinds) => {
                if kinds.iter().any(|k| matches!(k, AccessorKind::Get | AccessorKind::Read)) {
                    AccessorClass::ReadAccessor
                } else if !kinds.is_empty()
                    && kinds.iter().all(|k| matches!(k, AccessorKind::WillSet | AccessorKind::DidSet))
                {
                    AccessorClass::ObserversOnly
                } else {
                    AccessorClass::Other
                }
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[A-Za-z_][A-Za-z0-9_]*|`[A-Za-z_][A-Za-z0-9_]*`)$").unwrap());

fn is_identifier(name: &str) -> bool {
    name != "_" && IDENTIFIER.is_match(name)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PatternRepr {
    Name(String),
    Tagged(TaggedPattern),
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum TaggedPattern {
    Identifier(String),
    Tuple(Vec<Pattern>),
    Wildcard,
}

impl From<PatternRepr> for Pattern {
    fn from(repr: PatternRepr) -> Self {
        match repr {
            PatternRepr::Name(name) if name.trim() == "_" => Pattern::Wildcard,
            PatternRepr::Name(name) => Pattern::Identifier(name.trim().to_string()),
            PatternRepr::Tagged(TaggedPattern::Identifier(name)) => Pattern::Identifier(name),
            PatternRepr::Tagged(TaggedPattern::Tuple(items)) => Pattern::Tuple(items),
            PatternRepr::Tagged(TaggedPattern::Wildcard) => Pattern::Wildcard,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExprRepr {
    Text(String),
    Node {
        text: String,
        #[serde(default)]
        kind: Option<LiteralKind>,
    },
}

impl From<ExprRepr> for Expr {
    fn from(repr: ExprRepr) -> Self {
        match repr {
            ExprRepr::Text(text) => Expr::new(text),
            ExprRepr::Node { text, kind: None } => Expr::new(text),
            ExprRepr::Node { text, kind: Some(kind) } => Expr::with_kind(text, kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn shorthand_json_forms() {
        let group: DeclGroup = serde_json::from_value(json!({
            "name": "Foo",
            "members": [
                { "kind": "variable", "bindings": [{ "pattern": "x", "initializer": "42" }] },
                { "kind": "variable", "modifiers": ["static"], "bindings": [{ "pattern": "shared", "type": "Foo", "initializer": "Foo()" }] },
                { "kind": "variable", "bindings": [{ "pattern": { "tuple": ["a", "_"] }, "initializer": "(1, 2)" }] },
                { "kind": "variable", "bindings": [{ "pattern": "v", "initializer": { "text": "0", "kind": "integer" }, "accessor": { "accessors": ["didSet"] } }] },
                { "kind": "function", "name": "reset" },
                { "kind": "type", "name": "Nested" },
                { "kind": "initializer" }
            ]
        }))
        .unwrap();

        assert_eq!(group.name.as_deref(), Some("Foo"));
        assert_eq!(group.members.len(), 7);

        let Member::Variable(x) = &group.members[0] else { panic!("expected variable") };
        assert_eq!(x.specifier, BindingSpecifier::Var);
        assert_eq!(x.bindings[0].pattern, Pattern::Identifier("x".into()));
        assert_eq!(x.bindings[0].initializer, Some(Expr::with_kind("42", LiteralKind::Integer)));

        let Member::Variable(shared) = &group.members[1] else { panic!("expected variable") };
        assert!(shared.is_type_level());
        assert_eq!(shared.bindings[0].type_annotation.as_deref(), Some("Foo"));

        let Member::Variable(tuple) = &group.members[2] else { panic!("expected variable") };
        assert_eq!(
            tuple.bindings[0].pattern,
            Pattern::Tuple(vec![Pattern::Identifier("a".into()), Pattern::Wildcard])
        );
        assert_eq!(tuple.bindings[0].pattern.to_string(), "(a, _)");

        let Member::Variable(v) = &group.members[3] else { panic!("expected variable") };
        assert_eq!(
            v.bindings[0].accessor.as_ref().map(AccessorBlock::classify),
            Some(AccessorClass::ObserversOnly)
        );

        assert_eq!(group.members[6], Member::Initializer);
    }

    #[test]
    fn identifier_text_must_name_a_property() {
        let ident = |text: &str| Pattern::Identifier(text.into()).identifier().map(str::to_owned);

        assert_eq!(ident("volume").as_deref(), Some("volume"));
        assert_eq!(ident("_private2").as_deref(), Some("_private2"));
        assert_eq!(ident("`default`").as_deref(), Some("`default`"));

        for bad in ["", "_", "a b", "x.y", "9lives", "`open", "self.x"] {
            assert_eq!(ident(bad), None, "{bad:?}");
        }
    }

    #[test]
    fn accessor_classes() {
        use AccessorKind::*;
        let class = |kinds: Vec<AccessorKind>| AccessorBlock::Accessors(kinds).classify();

        assert_eq!(AccessorBlock::Getter.classify(), AccessorClass::ReadAccessor);
        assert_eq!(class(vec![Get]), AccessorClass::ReadAccessor);
        assert_eq!(class(vec![Get, Set]), AccessorClass::ReadAccessor);
        assert_eq!(class(vec![Read, Modify]), AccessorClass::ReadAccessor);
        assert_eq!(class(vec![WillSet]), AccessorClass::ObserversOnly);
        assert_eq!(class(vec![WillSet, DidSet]), AccessorClass::ObserversOnly);
        assert_eq!(class(vec![Set]), AccessorClass::Other);
        assert_eq!(class(vec![]), AccessorClass::Other);
    }

    #[test]
    fn accessor_names_follow_source_spelling() {
        let block: AccessorBlock =
            serde_json::from_value(json!({ "accessors": ["get", "set", "willSet", "didSet", "_modify", "read"] }))
                .unwrap();
        assert_eq!(
            block,
            AccessorBlock::Accessors(vec![
                AccessorKind::Get,
                AccessorKind::Set,
                AccessorKind::WillSet,
                AccessorKind::DidSet,
                AccessorKind::Modify,
                AccessorKind::Read,
            ])
        );
    }

    #[test]
    fn let_specifier_and_class_modifier() {
        let decl: VariableDecl = serde_json::from_value(json!({
            "specifier": "let",
            "modifiers": ["class", "final"],
            "bindings": [{ "pattern": "x", "type": "Int" }]
        }))
        .unwrap();
        assert_eq!(decl.specifier, BindingSpecifier::Let);
        assert!(decl.is_type_level());
        assert!(!VariableDecl::var(Binding::named("y")).with_modifier("private").is_type_level());
    }
}

//! Code emission: the key enumeration and the decoding initializer.
//!
//! Both declarations are always produced, even for zero fields, and both
//! follow field order exactly. Rendering is pure string building, so the same
//! fields always give byte-identical text.
use serde::Serialize;

use crate::ir::ResolvedField;
use crate::options::SynthOptions;

const CONTAINER: &str = "container";

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    KeyEnumeration,
    DecodingInitializer,
}

/// One generated declaration, as source text (no trailing newline).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decl {
    pub kind: DeclKind,
    pub text: String,
}

/// The pair handed back to the host for splicing into the type body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedOutput {
    pub coding_keys: Decl,
    pub initializer: Decl,
}

/// Line-oriented source writer with block indentation.
pub struct Codegen {
    buf: String,
    depth: usize,
    unit: String,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Codegen {
    pub fn new(indent: usize) -> Self {
        Self { buf: String::new(), depth: 0, unit: " ".repeat(indent) }
    }

    pub fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.buf.push_str(&self.unit);
        }
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
    }

    pub fn open(&mut self, header: impl AsRef<str>) {
        self.line(format!("{} {{", header.as_ref()));
        self.depth += 1;
    }

    pub fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    pub fn into_string(self) -> String {
        let mut out = self.buf;
        while out.ends_with('\n') {
            out.pop();
        }
        out
    }
}

impl GeneratedOutput {
    pub fn declarations(&self) -> [&Decl; 2] {
        [&self.coding_keys, &self.initializer]
    }

    /// Both declarations, separated by one blank line.
    pub fn render(&self) -> String {
        format!("{}\n\n{}", self.coding_keys.text, self.initializer.text)
    }
}

impl std::fmt::Display for Decl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

pub fn emit(fields: &[ResolvedField], options: &SynthOptions) -> GeneratedOutput {
    GeneratedOutput {
        coding_keys: emit_key_enumeration(fields, options),
        initializer: emit_decoding_initializer(fields, options),
    }
}

/// `enum CodingKeys: String, CodingKey { case a; case b }`, one case per line.
/// Raw values are implicit, so each key's string equals the field name.
pub fn emit_key_enumeration(fields: &[ResolvedField], options: &SynthOptions) -> Decl {
    let mut cg = Codegen::new(options.indent);
    cg.open(format!("enum {}: String, CodingKey", options.keys_name));
    for field in fields {
        cg.line(format!("case {}", field.name));
    }
    cg.close();
    Decl { kind: DeclKind::KeyEnumeration, text: cg.into_string() }
}

/// `init(from decoder: Decoder) throws`, one decode-if-present statement per field.
/// With no fields the body is empty: no container is opened, so the generated
/// initializer accepts any encoded value, not only a keyed container.
pub fn emit_decoding_initializer(fields: &[ResolvedField], options: &SynthOptions) -> Decl {
    let mut cg = Codegen::new(options.indent);
    cg.open("init(from decoder: Decoder) throws");
    if !fields.is_empty() {
        cg.line(format!(
            "let {CONTAINER} = try decoder.container(keyedBy: {}.self)",
            options.keys_name
        ));
        for field in fields {
            cg.line(decode_statement(field));
        }
    }
    cg.close();
    Decl { kind: DeclKind::DecodingInitializer, text: cg.into_string() }
}

pub fn decode_statement(field: &ResolvedField) -> String {
    format!(
        "self.{name} = try {CONTAINER}.decodeIfPresent({ty}.self, forKey: .{name}) ?? {default}",
        name = field.name,
        ty = field.effective_type,
        default = field.effective_default,
    )
}

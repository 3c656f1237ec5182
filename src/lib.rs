//! Synthesizes `CodingKeys` and a tolerant `init(from:)` for record declarations.
//!
//! Pipeline (single forward pass, no shared state):
//!
//! 1. [`classify`] keeps the stored, instance-level bindings of a [`decl::DeclGroup`].
//! 2. [`inference`] resolves each field's type text (annotation > literal shape > `String`).
//! 3. [`defaults`] resolves each field's fallback expression (initializer > `T()`).
//! 4. [`codegen`] renders the key enumeration and the decoding initializer.
//!
//! [`synth::synthesize`] runs the whole thing.
pub mod classify;
pub mod cli;
pub mod codegen;
pub mod decl;
pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod inference;
pub mod input;
pub mod ir;
pub mod jq_exec;
pub mod lower;
pub mod options;
pub mod path_de;
pub mod synth;

pub use codegen::{Decl, GeneratedOutput};
pub use decl::DeclGroup;
pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use error::{Error, Result};
pub use options::SynthOptions;
pub use synth::{synthesize, Synthesis};

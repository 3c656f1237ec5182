use jaq_core::{compile::Undefined, load, Compiler, Ctx, Filter, Native, RcIter};
use jaq_json::Val;
use serde_json::Value;

use crate::error::{Error, Result};

/// Run a jq filter over one input document; each filter output becomes a value.
///
/// Used to pull declaration groups out of larger JSON dumps before synthesis.
pub fn run_jaq(filter_src: &str, input: &Value) -> Result<Vec<Value>> {
    let filter = compile(filter_src)?;
    let inputs = RcIter::new(core::iter::empty());
    filter
        .run((Ctx::new([], &inputs), Val::from(input.clone())))
        .map(|item| item.map(Value::from).map_err(|e| Error::Jq(format!("{e:?}"))))
        .collect()
}

fn compile(filter_src: &str) -> Result<Filter<Native<Val>>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let modules = loader
        .load(&arena, load::File { code: filter_src, path: () })
        .map_err(format_parse_errors)?;
    Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(format_undefined_errors)
}

fn format_parse_errors(errs: Vec<(load::File<&str, ()>, load::Error<&str>)>) -> Error {
    let mut s = String::new();
    for (file, err) in errs {
        s.push_str(&format!("parse error: {err:?} in `{}`\n", file.code));
    }
    Error::Jq(s)
}

fn format_undefined_errors(errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>) -> Error {
    let mut s = String::new();
    for (file, list) in errs {
        for (name, undef) in list {
            s.push_str(&format!("undefined `{name}`: {undef:?} in `{}`\n", file.code));
        }
    }
    Error::Jq(s)
}

//! Loading declaration groups from JSON files.
//!
//! A file holds one group or an array of groups. With a jq filter, each file is
//! filtered first and every filter output is treated the same way.
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::decl::DeclGroup;
use crate::error::{Error, Result};

/// A group plus a label saying where it came from (`file.json[2]`, `file.json#1`).
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedGroup {
    pub origin: String,
    pub group: DeclGroup,
}

impl LoadedGroup {
    /// Type name when known, else the origin label.
    pub fn label(&self) -> &str {
        self.group.name.as_deref().unwrap_or(self.origin.as_str())
    }
}

pub fn load_file(path: &Path, jq_expr: Option<&str>) -> Result<Vec<LoadedGroup>> {
    let origin = path.display().to_string();
    let source = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_str(&source, &origin, jq_expr)
}

pub fn load_str(source: &str, origin: &str, jq_expr: Option<&str>) -> Result<Vec<LoadedGroup>> {
    let value = serde_json::from_str::<Value>(source).map_err(|source| Error::Json {
        origin: origin.to_string(),
        source,
    })?;
    match jq_expr {
        None => groups_from_value(value, origin),
        Some(jq_expr) => {
            let outputs = crate::jq_exec::run_jaq(jq_expr, &value)?;
            let mut groups = Vec::new();
            for (ix, output) in outputs.into_iter().enumerate() {
                groups.extend(groups_from_value(output, &format!("{origin}#{ix}"))?);
            }
            Ok(groups)
        }
    }
}

/// One object → one group; an array → one group per element.
pub fn groups_from_value(value: Value, origin: &str) -> Result<Vec<LoadedGroup>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(ix, item)| {
                let origin = format!("{origin}[{ix}]");
                let group = crate::path_de::from_value_with_path::<DeclGroup>(item, &origin)?;
                Ok(LoadedGroup { origin, group })
            })
            .collect(),
        value => {
            let group = crate::path_de::from_value_with_path::<DeclGroup>(value, origin)?;
            Ok(vec![LoadedGroup { origin: origin.to_string(), group }])
        }
    }
}

pub fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                return Err(Error::NoMatches(pattern.to_string()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_and_array_documents() {
        let one = load_str(r#"{ "name": "A", "members": [] }"#, "a.json", None).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].origin, "a.json");
        assert_eq!(one[0].label(), "A");

        let many = load_str(r#"[ { "name": "A" }, { "members": [] } ]"#, "m.json", None).unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(many[1].origin, "m.json[1]");
        assert_eq!(many[1].label(), "m.json[1]");
    }

    #[test]
    fn jq_prefilter() {
        let src = r#"{ "module": { "types": [ { "name": "A" }, { "name": "B" } ] } }"#;
        let groups = load_str(src, "dump.json", Some(".module.types[]")).unwrap();
        let labels: Vec<&str> = groups.iter().map(LoadedGroup::label).collect();
        assert_eq!(labels, ["A", "B"]);
        assert_eq!(groups[1].origin, "dump.json#1");
    }

    #[test]
    fn bad_json_is_reported() {
        assert!(matches!(load_str("{", "bad.json", None), Err(Error::Json { .. })));
        assert!(matches!(
            load_str(r#"{ "members": 3 }"#, "bad.json", None),
            Err(Error::Decode { .. })
        ));
    }

    #[test]
    fn glob_patterns() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("c.txt"), "").unwrap();

        let pattern = format!("{}/*.json", dir.path().display());
        let mut found = resolve_file_path_patterns([pattern]).unwrap();
        found.sort();
        assert_eq!(found, vec![dir.path().join("a.json"), dir.path().join("b.json")]);

        let missing = format!("{}/*.swift", dir.path().display());
        assert!(matches!(resolve_file_path_patterns([missing]), Err(Error::NoMatches(_))));

        let literal = resolve_file_path_patterns(["does/not/matter.json"]).unwrap();
        assert_eq!(literal, vec![PathBuf::from("does/not/matter.json")]);
    }
}

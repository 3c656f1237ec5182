//! Golden-output runner: expand every `<name>.json` fixture and compare the
//! result byte-for-byte with `<name>.expected.swift`.
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;
use default_codable::input::load_file;
use default_codable::{synthesize, SynthOptions};
use once_cell::sync::Lazy;
use regex::Regex;

static FIXTURE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<name>[A-Za-z0-9_\-]+)\.json$").expect("fixture name pattern"));

#[derive(Parser, Debug)]
struct Settings {
    /// directory holding `<name>.json` + `<name>.expected.swift` pairs
    #[arg(default_value = "tests/fixtures")]
    dir: PathBuf,

    /// only run fixtures whose name contains this substring
    #[arg(long)]
    filter: Option<String>,

    /// rewrite expected files from the current output instead of comparing
    #[arg(long)]
    bless: bool,

    /// also dump diagnostics as JSON
    #[arg(long)]
    verbose: bool,
}

enum Outcome {
    Pass,
    Blessed,
    Fail { expected: String, actual: String },
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();
    let fixtures = discover(&settings.dir, settings.filter.as_deref())?;
    if fixtures.is_empty() {
        bail!("no fixtures found in {}", settings.dir.display());
    }

    let mut failures = 0usize;
    for (name, input) in &fixtures {
        match run_fixture(&settings, name, input) {
            Ok(Outcome::Pass) => eprintln!("{} {name}", "✅ pass".green()),
            Ok(Outcome::Blessed) => eprintln!("{} {name}", "✍️  blessed".cyan()),
            Ok(Outcome::Fail { expected, actual }) => {
                failures += 1;
                eprintln!("{} {name}", "❌ fail".red().bold());
                print_diff(&expected, &actual);
            }
            Err(error) => {
                failures += 1;
                eprintln!("{} {name}: {error:#}", "❌ error".red().bold());
            }
        }
    }

    eprintln!("—— {} fixture(s), {failures} failure(s) ——", fixtures.len());
    if failures > 0 {
        bail!("{failures} fixture(s) failed");
    }
    Ok(())
}

fn discover(dir: &Path, filter: Option<&str>) -> anyhow::Result<Vec<(String, PathBuf)>> {
    let mut out = Vec::new();
    let entries = std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else { continue };
        let Some(caps) = FIXTURE_NAME.captures(file_name) else { continue };
        let name = caps["name"].to_string();
        if filter.is_some_and(|f| !name.contains(f)) {
            continue;
        }
        out.push((name, path));
    }
    out.sort();
    Ok(out)
}

fn run_fixture(settings: &Settings, name: &str, input: &Path) -> anyhow::Result<Outcome> {
    let groups = load_file(input, None)?;
    let options = SynthOptions::default();
    let actual = groups
        .iter()
        .map(|loaded| {
            let synthesis = synthesize(&loaded.group, &options);
            if settings.verbose {
                let diagnostics = serde_json::to_string_pretty(&synthesis.diagnostics).unwrap_or_default();
                eprintln!("{name} diagnostics: {diagnostics}");
            }
            synthesis.output.render()
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let expected_path = settings.dir.join(format!("{name}.expected.swift"));
    if settings.bless {
        std::fs::write(&expected_path, format!("{actual}\n"))
            .with_context(|| format!("writing {}", expected_path.display()))?;
        return Ok(Outcome::Blessed);
    }

    let expected = std::fs::read_to_string(&expected_path)
        .with_context(|| format!("reading {}", expected_path.display()))?;
    let expected = expected.trim_end().to_string();
    if expected == actual {
        Ok(Outcome::Pass)
    } else {
        Ok(Outcome::Fail { expected, actual })
    }
}

fn print_diff(expected: &str, actual: &str) {
    let expected: Vec<&str> = expected.lines().collect();
    let actual: Vec<&str> = actual.lines().collect();
    for ix in 0..expected.len().max(actual.len()) {
        match (expected.get(ix), actual.get(ix)) {
            (Some(e), Some(a)) if e == a => eprintln!("    {e}"),
            (e, a) => {
                if let Some(e) = e {
                    eprintln!("  {}", format!("- {e}").red());
                }
                if let Some(a) = a {
                    eprintln!("  {}", format!("+ {a}").green());
                }
            }
        }
    }
}

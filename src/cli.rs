//! Minimal CLI: declaration groups (JSON) → (swift | json report | field table)
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::Error;
use crate::input::{self, LoadedGroup};
use crate::options::SynthOptions;
use crate::synth::{synthesize, Synthesis};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// derive `CodingKeys` and a default-tolerant `init(from:)` for parsed record declarations
#[derive(Parser, Debug)]
#[command(name = "default-codable", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit the two generated declarations for every input group
    Expand(ExpandOut),
    /// print the resolved field table (name, type, default) for every input group
    Inspect(InspectOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JQ pre-process filter for each document (e.g. '.module.types[]')
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct SynthSettings {
    /// spaces per indentation level in generated code
    #[arg(long, default_value_t = 4)]
    indent: usize,

    /// name of the generated key enumeration
    #[arg(long, default_value = "CodingKeys")]
    keys_name: String,

    /// type assumed when neither an annotation nor a literal decides it
    #[arg(long, default_value = "String")]
    fallback_type: String,

    /// type name used for floating-point literals
    #[arg(long, default_value = "Double")]
    float_type: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
enum OutputFormat {
    /// generated source text
    #[default]
    Swift,
    /// declarations, resolved fields and diagnostics as JSON
    Json,
}

#[derive(clap::Parser, Debug)]
struct ExpandOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    synth_settings: SynthSettings,

    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// exit with an error when any warning diagnostic was produced
    #[arg(long)]
    deny_warnings: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct InspectOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    synth_settings: SynthSettings,
}

#[derive(Serialize)]
struct Report<'a> {
    origin: &'a str,
    #[serde(flatten)]
    synthesis: &'a Synthesis,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> anyhow::Result<Vec<LoadedGroup>> {
        let source_paths = input::resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        let mut groups = Vec::new();
        for source_path in source_paths {
            groups.extend(input::load_file(&source_path, self.jq_expr.as_deref())?);
        }
        log::debug!("loaded {} declaration group(s)", groups.len());
        Ok(groups)
    }
}

impl SynthSettings {
    fn options(&self) -> SynthOptions {
        let mut options = SynthOptions {
            indent: self.indent,
            keys_name: self.keys_name.clone(),
            ..SynthOptions::default()
        };
        options.type_names.fallback = self.fallback_type.clone();
        options.type_names.floating_point = self.float_type.clone();
        options
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Expand(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                // 1) load groups
                let groups = target.input_settings.load()?;

                // 2) synthesize (independent per group)
                let options = target.synth_settings.options();
                let syntheses = synthesize_all(&groups, &options);
                report_diagnostics(&groups, &syntheses);

                // 3) render & write
                let rendered = match target.format {
                    OutputFormat::Swift => render_swift(&groups, &syntheses),
                    OutputFormat::Json => render_json(&groups, &syntheses)?,
                };
                emit_output(target.out.as_deref(), &rendered)?;

                let warnings: usize = syntheses.iter().map(|s| s.warnings().count()).sum();
                if target.deny_warnings && warnings > 0 {
                    bail!("{warnings} warning(s) emitted and --deny-warnings is set");
                }
                Ok(())
            }
            Command::Inspect(target) => {
                let groups = target.input_settings.load()?;
                let options = target.synth_settings.options();
                let syntheses = synthesize_all(&groups, &options);
                report_diagnostics(&groups, &syntheses);
                println!("{}", render_table(&groups, &syntheses));
                Ok(())
            }
        }
    }
}

/// Groups are independent; `collect` keeps input order.
pub fn synthesize_all(groups: &[LoadedGroup], options: &SynthOptions) -> Vec<Synthesis> {
    groups
        .par_iter()
        .map(|loaded| synthesize(&loaded.group, options))
        .collect()
}

pub fn render_swift(groups: &[LoadedGroup], syntheses: &[Synthesis]) -> String {
    groups
        .iter()
        .zip(syntheses)
        .map(|(loaded, synthesis)| match &loaded.group.name {
            Some(name) => format!("// {name}\n{}", synthesis.output.render()),
            None => synthesis.output.render(),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_json(groups: &[LoadedGroup], syntheses: &[Synthesis]) -> anyhow::Result<String> {
    let reports: Vec<Report<'_>> = groups
        .iter()
        .zip(syntheses)
        .map(|(loaded, synthesis)| Report { origin: &loaded.origin, synthesis })
        .collect();
    Ok(serde_json::to_string_pretty(&reports)?)
}

pub fn render_table(groups: &[LoadedGroup], syntheses: &[Synthesis]) -> String {
    let mut out = Vec::new();
    for (loaded, synthesis) in groups.iter().zip(syntheses) {
        out.push(format!("{} ({})", loaded.label(), loaded.origin));
        let name_w = synthesis.fields.iter().map(|f| f.name.len()).max().unwrap_or(0);
        let type_w = synthesis.fields.iter().map(|f| f.effective_type.len()).max().unwrap_or(0);
        for field in &synthesis.fields {
            out.push(format!(
                "  {:<name_w$}  {:<type_w$}  {:<10}  {}",
                field.name,
                field.effective_type,
                field.type_source.as_str(),
                field.effective_default
            ));
        }
        if synthesis.fields.is_empty() {
            out.push("  (no eligible fields)".to_string());
        }
    }
    out.join("\n")
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn report_diagnostics(groups: &[LoadedGroup], syntheses: &[Synthesis]) {
    for (loaded, synthesis) in groups.iter().zip(syntheses) {
        for diagnostic in &synthesis.diagnostics {
            eprintln!("{}", diagnostic.render_colored(loaded.label()));
        }
    }
}

fn emit_output(out: Option<&Path>, rendered: &str) -> anyhow::Result<()> {
    let Some(out) = out else {
        println!("{rendered}");
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(out, format!("{rendered}\n")).map_err(|source| Error::Write {
        path: out.to_path_buf(),
        source,
    })?;
    Ok(())
}

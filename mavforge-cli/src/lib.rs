/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # mavforge CLI
//!
//! Loads dialect documents (JSON serializations of the schema model), applies
//! command-line configuration and runs the generator.

use anyhow::{Context, Result, bail};
use clap::Args;
use mavforge_codegen::{CodeGenerator, GenerationReport, GeneratorConfig, TypeMap};
use mavforge_dialect::Dialect;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments of a generation run.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Dialect documents in JSON form.
    #[arg(required = true)]
    pub dialects: Vec<PathBuf>,

    /// Root of the generated tree.
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Module directory relative to the output root.
    #[arg(long, default_value = mavforge_codegen::ue4::MODULE_PATH)]
    pub module_path: PathBuf,

    /// Also emit the per-dialect dispatch header.
    #[arg(long)]
    pub dispatch: bool,

    /// JSON object mapping schema types to target types; replaces the built-in table.
    #[arg(long)]
    pub type_map: Option<PathBuf>,

    /// Replacement template for the per-message header.
    #[arg(long)]
    pub header_template: Option<PathBuf>,

    /// Replacement template for the per-message source file.
    #[arg(long)]
    pub source_template: Option<PathBuf>,

    /// Keep a leading newline of rendered templates.
    #[arg(long)]
    pub keep_leading_newline: bool,
}

/// Loads and validates one dialect document.
///
/// The basename defaults to the file stem when the document leaves it empty.
///
/// # Errors
/// Returns an error if the file cannot be read, is not a valid dialect
/// document, or fails schema validation.
pub fn load_dialect(path: &Path) -> Result<Dialect> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut dialect: Dialect =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;

    if dialect.basename.is_empty() {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            bail!("cannot derive a basename from {}", path.display());
        };
        dialect.basename = stem.to_string();
    }
    dialect
        .validate()
        .with_context(|| format!("validating {}", path.display()))?;
    Ok(dialect)
}

/// Loads a type mapping table from a JSON object file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_type_map(path: &Path) -> Result<TypeMap> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn override_template(generator: &mut CodeGenerator, kind: &str, path: &Path) -> Result<()> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    if !generator.override_template(kind, &text)? {
        bail!("no '{kind}' artifact to override");
    }
    Ok(())
}

/// Runs a full generation.
///
/// # Errors
/// Returns the first loading, schema, template or I/O error.
pub fn run(args: &GenerateArgs) -> Result<GenerationReport> {
    let dialects = args
        .dialects
        .iter()
        .map(|path| load_dialect(path))
        .collect::<Result<Vec<_>>>()?;
    info!(count = dialects.len(), "loaded dialects");

    let config = GeneratorConfig::new(&args.output)
        .with_module_path(&args.module_path)
        .with_dispatch(args.dispatch)
        .with_trim_leading_newline(!args.keep_leading_newline);
    let mut generator = CodeGenerator::new(config)?;

    if let Some(path) = &args.type_map {
        generator = generator.with_types(load_type_map(path)?);
    }
    if let Some(path) = &args.header_template {
        override_template(&mut generator, "header", path)?;
    }
    if let Some(path) = &args.source_template {
        override_template(&mut generator, "source", path)?;
    }

    Ok(generator.generate(&dialects)?)
}

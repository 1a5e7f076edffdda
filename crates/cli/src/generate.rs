use clap::Args;
use hookgen_core::{DocumentFormat, ModuleNames, OpenApiSpec, generate_document};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::{CONFIG_FILENAME, Config};

const DOCUMENT_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the config file (defaults to ./hookgen.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Directory holding the OpenAPI documents
    #[arg(long = "source-dir", value_name = "DIR")]
    pub source_dir: Option<PathBuf>,
    /// Directory the generated modules are written to
    #[arg(long = "export-dir", value_name = "DIR")]
    pub export_dir: Option<PathBuf>,
}

/// Outcome of one run over a source directory.
#[derive(Debug, Default)]
pub struct Summary {
    /// Files written, two per generated document.
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
    pub skipped_dirs: Vec<PathBuf>,
}

pub fn run(args: GenerateArgs) -> i32 {
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    match generate_all(&config) {
        Ok(summary) => {
            for (path, err) in &summary.failed {
                eprintln!("Failed to generate {}: {err}", path.display());
            }
            println!(
                "Generated {} document(s) into {}",
                summary.written.len() / 2,
                config.export_dir.display()
            );
            i32::from(!summary.failed.is_empty())
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn load_config(args: &GenerateArgs) -> Result<Config, String> {
    let (path, explicit) = match &args.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(CONFIG_FILENAME), false),
    };
    Ok(Config::load(&path, explicit)?.with_overrides(args.source_dir.clone(), args.export_dir.clone()))
}

/// Generate every document directly inside `config.source_dir`.
///
/// Documents are processed in parallel; a failing document is reported in
/// the summary and does not stop the others.
pub fn generate_all(config: &Config) -> Result<Summary, String> {
    let (documents, skipped_dirs) = collect_documents(&config.source_dir)?;
    debug!(
        source_dir = %config.source_dir.display(),
        documents = documents.len(),
        "Collected OpenAPI documents."
    );

    let results: Vec<(PathBuf, Result<Vec<PathBuf>, String>)> = documents
        .par_iter()
        .map(|path| (path.clone(), generate_file(path, config)))
        .collect();

    let mut summary = Summary {
        skipped_dirs,
        ..Summary::default()
    };
    for (path, result) in results {
        match result {
            Ok(written) => summary.written.extend(written),
            Err(err) => {
                warn!(document = %path.display(), "{err}");
                summary.failed.push((path, err));
            }
        }
    }
    Ok(summary)
}

/// Document files of `source_dir`, sorted by name, and the nested directories that were skipped.
fn collect_documents(source_dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>), String> {
    if !source_dir.is_dir() {
        return Err(format!(
            "Source directory not found: {}",
            source_dir.display()
        ));
    }

    let mut documents = Vec::new();
    let mut skipped = Vec::new();
    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| format!("Failed to read source directory: {err}"))?;
        let path = entry.path();
        if entry.file_type().is_dir() {
            warn!(path = %path.display(), "Skipping nested directory, only top-level documents are generated.");
            skipped.push(path.to_path_buf());
            continue;
        }
        let is_document = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| DOCUMENT_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)));
        if is_document {
            documents.push(path.to_path_buf());
        } else {
            debug!(path = %path.display(), "Skipping non-document file.");
        }
    }
    Ok((documents, skipped))
}

fn generate_file(path: &Path, config: &Config) -> Result<Vec<PathBuf>, String> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("Invalid document file name: {}", path.display()))?;
    let format = DocumentFormat::from_extension(
        path.extension().and_then(|s| s.to_str()).unwrap_or_default(),
    );

    let text = fs::read_to_string(path).map_err(|err| format!("Failed to read document: {err}"))?;
    let spec = OpenApiSpec::parse(&text, format).map_err(|err| err.to_string())?;
    let names = ModuleNames::for_document(stem);
    let document =
        generate_document(&spec, &config.generator, &names).map_err(|err| err.to_string())?;

    let out_dir = config.export_dir.join(&names.directory);
    fs::create_dir_all(&out_dir)
        .map_err(|err| format!("Failed to create {}: {err}", out_dir.display()))?;

    let hooks_path = out_dir.join(&names.hooks_file);
    let schema_path = out_dir.join(&names.schema_file);
    for (target, contents) in [(&hooks_path, &document.hooks), (&schema_path, &document.schemas)] {
        fs::write(target, contents)
            .map_err(|err| format!("Failed to write {}: {err}", target.display()))?;
    }

    info!(
        document = %path.display(),
        hooks = %hooks_path.display(),
        operations = document.operations,
        unsupported = document.unsupported.len(),
        "Generated hooks."
    );
    Ok(vec![hooks_path, schema_path])
}

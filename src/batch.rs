//! Folder-level driver: every `*.json` file in an input folder becomes a
//! `.csv` file of the same name in the output folder.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::convert::convert;

#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

/// Regular files directly inside `dir` with a `json` extension, sorted.
pub fn json_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Cannot read input folder: {}", dir.display()))?;

    let mut inputs = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".csv");
    output_dir.join(name)
}

fn convert_file(input: &Path, output: &Path) -> bool {
    match fs::read_to_string(input) {
        Ok(raw) => convert(&raw, output),
        Err(e) => {
            tracing::error!("Cannot read input file {}: {}", input.display(), e);
            false
        }
    }
}

pub fn run(input_dir: &Path, output_dir: &Path) -> Result<BatchReport> {
    let inputs = json_inputs(input_dir)?;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Cannot create output folder: {}", output_dir.display()))?;

    tracing::debug!(files = inputs.len(), "found JSON inputs");

    let mut report = BatchReport::default();
    for input in inputs {
        let output = output_path_for(&input, output_dir);
        if convert_file(&input, &output) {
            println!("{} successfully converted to csv", input.display());
            report.converted.push(input);
        } else {
            println!("Failed to convert {} (invalid JSON)", input.display());
            report.failed.push(input);
        }
    }
    Ok(report)
}

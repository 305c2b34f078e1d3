//! img2stl: turn images into printable STL meshes.
//!
//! A thin caller around [`mesh_from_image`]. It enforces the input contract
//! (PNG or JPEG, at most 2 MiB), runs one independent pipeline per input in
//! parallel, and writes `<stem>.stl` next to each input.
//!
//! # Usage
//!
//! ```text
//! img2stl cat.png                          # cookie cutter -> cat.stl
//! img2stl --strategy height-map photo.jpg  # relief plate -> photo.stl
//! img2stl -o cutter.stl --layers 4 cat.png
//! RUST_LOG=mesh_from_image=debug img2stl *.png
//! ```

mod cli;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use image::ImageFormat;
use mesh_from_image::{GenerationConfig, generate};
use mesh_io::{StlEncoding, save_stl};
use rayon::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;

/// Largest accepted input file.
const MAX_INPUT_BYTES: u64 = 2 * 1024 * 1024;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outputs = plan_outputs(&cli.inputs, cli.output.as_deref())?;
    let config = cli.config();
    config.validate().context("invalid generation parameters")?;
    let encoding = if cli.binary {
        StlEncoding::Binary
    } else {
        StlEncoding::Ascii
    };

    let failures: Vec<(&PathBuf, anyhow::Error)> = cli
        .inputs
        .par_iter()
        .zip(&outputs)
        .filter_map(|(input, output)| {
            convert(input, output, &config, encoding)
                .err()
                .map(|err| (input, err))
        })
        .collect();

    for (input, err) in &failures {
        error!(input = %input.display(), "{err:#}");
    }
    if failures.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        error!(
            failed = failures.len(),
            total = cli.inputs.len(),
            "Some inputs were not converted"
        );
        Ok(ExitCode::FAILURE)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// `<input stem>.stl` in the input's directory.
fn default_output(input: &Path) -> PathBuf {
    input.with_extension("stl")
}

/// Output path for every input.
///
/// Runs share nothing, so two inputs must never write the same file
/// (`cat.png` and `cat.jpg` both default to `cat.stl`).
fn plan_outputs(inputs: &[PathBuf], output: Option<&Path>) -> Result<Vec<PathBuf>> {
    if output.is_some() && inputs.len() > 1 {
        bail!("--output needs exactly one input, got {}", inputs.len());
    }

    let outputs: Vec<PathBuf> = inputs
        .iter()
        .map(|input| output.map_or_else(|| default_output(input), Path::to_path_buf))
        .collect();

    let mut claimed = HashSet::with_capacity(outputs.len());
    for (input, path) in inputs.iter().zip(&outputs) {
        if !claimed.insert(path) {
            bail!(
                "{} would also write {}; rename one of the inputs",
                input.display(),
                path.display()
            );
        }
    }
    Ok(outputs)
}

/// Read an input file, enforcing the size and format contract.
fn read_image(input: &Path) -> Result<Vec<u8>> {
    let size = fs::metadata(input)
        .with_context(|| format!("cannot stat {}", input.display()))?
        .len();
    if size > MAX_INPUT_BYTES {
        bail!(
            "{} is {size} bytes; the limit is {MAX_INPUT_BYTES}",
            input.display()
        );
    }

    let bytes = fs::read(input).with_context(|| format!("cannot read {}", input.display()))?;
    if !matches!(
        image::guess_format(&bytes),
        Ok(ImageFormat::Png | ImageFormat::Jpeg)
    ) {
        bail!("{} is not a PNG or JPEG image", input.display());
    }
    Ok(bytes)
}

/// Run one pipeline and write its STL.
fn convert(
    input: &Path,
    output: &Path,
    config: &GenerationConfig,
    encoding: StlEncoding,
) -> Result<()> {
    let bytes = read_image(input)?;
    let mesh = generate(&bytes, config)
        .with_context(|| format!("cannot convert {}", input.display()))?;
    save_stl(&mesh, output, encoding, &config.stl)
        .with_context(|| format!("cannot write {}", output.display()))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        triangles = mesh.len(),
        "Wrote STL"
    );
    Ok(())
}

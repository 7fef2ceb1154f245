mod prompt;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressIterator};
use log::info;
use pixelate_lib::{is_pattern, is_supported_extension, Mode, Path, PathBuf, Pixelator, Source};
use prompt::Prompt;
use std::convert::TryFrom;

#[derive(Parser, Debug)]
#[command(name = "pixelate")]
#[command(about = "Replaces each square block of an image with its average color")]
#[command(version)]
struct Args {
    /// Image to pixelate, or a glob pattern matching several images
    input: Option<String>,

    /// Side length of a block, in pixels
    block_size: Option<String>,

    /// S (sequential) or M (parallel, one worker per core)
    mode: Option<String>,

    /// Where to write the result when a single image is processed
    #[arg(short, long, default_value = "result.jpg")]
    output: PathBuf,

    /// Number of workers in parallel mode (defaults to the number of cores)
    #[arg(short = 'j', long)]
    workers: Option<usize>,

    /// Accept any format the decoder understands, not only JPEG
    #[arg(long)]
    any_format: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let mut prompt = Prompt::terminal()?;
    let any_format = args.any_format;

    let input = prompt.resolve(args.input, "Enter the file name: ", |raw| {
        parse_input(raw, any_format)
    })?;

    let block_size = prompt.resolve(
        args.block_size,
        "Enter the square size (positive integer): ",
        parse_block_size,
    )?;

    let mode = prompt.resolve(
        args.mode,
        "Enter the mode (S for single-threaded, M for multi-threaded): ",
        parse_mode,
    )?;

    let mut pixelator = Pixelator::new(block_size, mode)?;

    if let Some(workers) = args.workers {
        pixelator = pixelator.with_workers(workers);
    }

    info!(
        "{} mode, {}px blocks, {} worker(s)",
        pixelator.mode(),
        pixelator.block_size(),
        pixelator.workers()
    );

    let source = load_source(&input, any_format)?;

    if source.len() == 1 {
        for (_, mut img) in source.into_images() {
            pixelator.run(&mut img)?;

            let output = &args.output;
            img.save(output)
                .with_context(|| format!("Couldn't save image: {}", output.display()))?;
        }

        println!(
            "Processing complete. Result saved as {}",
            args.output.display()
        );
    } else {
        let len = source.len() as u64;
        let progress = ProgressBar::new(len);

        for (path, mut img) in source.into_images().progress_with(progress) {
            let stats = pixelator.run(&mut img)?;
            let output = output_path(&path);

            img.save(&output)
                .with_context(|| format!("Couldn't save image: {}", output.display()))?;

            info!("{} -> {} ({:?})", path.display(), output.display(), stats.elapsed);
        }

        println!("Processing complete. Pixelated {} images", len);
    }

    Ok(())
}

fn load_source(input: &str, any_format: bool) -> Result<Source> {
    if is_pattern(input) {
        Source::from_glob_with(input, |path| any_format || is_supported_extension(path))
    } else {
        Source::open(input)
    }
}

fn parse_input(raw: &str, any_format: bool) -> Result<String, String> {
    if is_pattern(raw) {
        return Ok(raw.to_owned());
    }

    let path = Path::new(raw);

    if !path.is_file() {
        Err("File does not exist. Please enter a valid file name.".into())
    } else if !any_format && !is_supported_extension(path) {
        Err("File is not a JPG file. Please enter a valid JPG file.".into())
    } else {
        Ok(raw.to_owned())
    }
}

fn parse_block_size(raw: &str) -> Result<u32, String> {
    let size: i64 = raw
        .parse()
        .map_err(|_| "Invalid input. Please enter a positive integer.".to_string())?;

    if size <= 0 {
        return Err("Square size must be a positive integer.".into());
    }

    u32::try_from(size).map_err(|_| "Square size is too large.".to_string())
}

fn parse_mode(raw: &str) -> Result<Mode, String> {
    raw.parse()
        .map_err(|_| "Invalid mode. Please enter 'S' or 'M'.".to_string())
}

/// `frames/a.jpg` -> `frames/a_pixelated.jpg`
fn output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    input.with_file_name(format!("{}_pixelated.jpg", stem))
}

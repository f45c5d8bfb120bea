use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use zenbmp16::{Diffusion, PixelLayout, Unstoppable};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kernel {
    /// Single-row forward diffusion (rows independent).
    Row,
    /// Two-row Floyd–Steinberg diffusion.
    FloydSteinberg,
}

impl From<Kernel> for Diffusion {
    fn from(k: Kernel) -> Self {
        match k {
            Kernel::Row => Diffusion::Row,
            Kernel::FloydSteinberg => Diffusion::FloydSteinberg,
        }
    }
}

#[derive(Parser)]
#[command(
    version,
    about = "Convert a 24-bit BMP to dithered 16-bit (5:5:5) BMP."
)]
struct Args {
    /// 24-bit input bitmap.
    input: PathBuf,

    /// Destination for the 16-bit bitmap.
    output: PathBuf,

    /// Error-diffusion kernel.
    #[arg(long, value_enum, default_value_t = Kernel::Row)]
    diffusion: Kernel,

    /// Log each stage to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Help and version go to stdout with success; usage errors fail.
            let code = if e.use_stderr() { 2 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` sets the filter (default `warn`); `-v` adds a `debug` directive on top.
fn init_tracing(verbose: bool) {
    let mut filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    if verbose {
        filter = filter.add_directive(LevelFilter::DEBUG.into());
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let file = File::open(&args.input)
        .with_context(|| format!("cannot open {}", args.input.display()))?;
    let image = zenbmp16::read_image(BufReader::new(file))
        .with_context(|| format!("cannot read bitmap from {}", args.input.display()))?;
    debug!(
        width = image.width(),
        height = image.height(),
        bits = image.header().bits_per_pixel,
        "read input"
    );

    if image.layout() != PixelLayout::Bgr888 {
        bail!(
            "{} is {}-bit, only 24-bit input can be converted",
            args.input.display(),
            image.header().bits_per_pixel
        );
    }

    let converted = zenbmp16::to_bgr555_dithered(&image, args.diffusion.into(), Unstoppable)
        .context("conversion to 16-bit failed")?;
    debug!(kernel = ?args.diffusion, bytes = converted.pixels().len(), "converted");

    let out = File::create(&args.output)
        .with_context(|| format!("cannot create {}", args.output.display()))?;
    zenbmp16::write_image(BufWriter::new(out), &converted)
        .with_context(|| format!("cannot write {}", args.output.display()))?;
    info!(output = %args.output.display(), "wrote 16-bit bitmap");
    Ok(())
}

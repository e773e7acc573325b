use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand, ValueEnum};

use featmap::{
    Conv2d, FeatureMap, Padding, Pool2d, PoolKind, conv2d, conv2d_padded, filters, max_pool2d,
};

/// Feature-map demo: convolution, padding and pooling on small 2-D grids.
#[derive(Parser)]
#[command(name = "featmap-demo", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Walk through the worked 5x5 example: convolution, padding, pooling.
    Walkthrough,

    /// Convolve an input grid with a kernel.
    Filter {
        /// Path to a JSON grid file (nested arrays of numbers).
        #[arg(long, conflicts_with = "random")]
        image: Option<PathBuf>,

        /// Generate a uniform random input instead of reading a file.
        #[arg(long, value_name = "ROWSxCOLS")]
        random: Option<String>,

        /// Built-in kernel name (see `kernels`) or path to a JSON grid file.
        #[arg(long, default_value = "vertical-edge")]
        kernel: String,

        /// Edge handling.
        #[arg(long, value_enum, default_value = "valid")]
        padding: PaddingArg,

        /// Window step.
        #[arg(long, default_value_t = 1)]
        stride: usize,

        /// Emit the result as a JSON grid instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Pool an input grid down to its window summaries.
    Pool {
        /// Path to a JSON grid file (nested arrays of numbers).
        #[arg(long, conflicts_with = "random")]
        image: Option<PathBuf>,

        /// Generate a uniform random input instead of reading a file.
        #[arg(long, value_name = "ROWSxCOLS")]
        random: Option<String>,

        /// Pooling window size.
        #[arg(long, default_value_t = 2)]
        size: usize,

        /// Window step; defaults to the window size.
        #[arg(long)]
        stride: Option<usize>,

        /// Reduction applied over each window.
        #[arg(long, value_enum, default_value = "max")]
        kind: KindArg,

        /// Emit the result as a JSON grid instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// List the built-in kernels.
    Kernels,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaddingArg {
    Valid,
    Same,
}

impl From<PaddingArg> for Padding {
    fn from(arg: PaddingArg) -> Self {
        match arg {
            PaddingArg::Valid => Padding::Valid,
            PaddingArg::Same => Padding::Same,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Max,
    Average,
}

impl From<KindArg> for PoolKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Max => PoolKind::Max,
            KindArg::Average => PoolKind::Average,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Walkthrough => walkthrough(),
        Command::Filter {
            image,
            random,
            kernel,
            padding,
            stride,
            json,
        } => {
            let input = load_input(image.as_deref(), random.as_deref())?;
            let kernel = resolve_kernel(&kernel)?;
            let conv = Conv2d::new(kernel)
                .with_padding(padding.into())
                .with_stride(stride);
            let out = conv.apply(&input).context("convolution failed")?;
            log::debug!("filtered {input:?} down to {out:?}");
            emit(&out, json)
        }
        Command::Pool {
            image,
            random,
            size,
            stride,
            kind,
            json,
        } => {
            let input = load_input(image.as_deref(), random.as_deref())?;
            let mut pool = Pool2d::new(kind.into(), size);
            if let Some(stride) = stride {
                pool = pool.with_stride(stride);
            }
            let out = pool.apply(&input).context("pooling failed")?;
            log::debug!("pooled {input:?} down to {out:?}");
            emit(&out, json)
        }
        Command::Kernels => {
            for name in filters::NAMES {
                if let Some(kernel) = filters::by_name(name) {
                    println!("{name} ({}x{})", kernel.rows(), kernel.cols());
                    println!("{kernel}");
                    println!();
                }
            }
            Ok(())
        }
    }
}

/// Prints the worked example: a 5x5 brightness ramp through the three
/// operations, with the reasoning spelled out.
fn walkthrough() -> Result<()> {
    let image = FeatureMap::from_vec((1..=25).map(|v| v as f32).collect(), 5, 5)?;
    let kernel = filters::vertical_edge();

    println!("Input image, a 5x5 brightness ramp:");
    println!("{image}");
    println!();

    println!("Vertical edge kernel:");
    println!("{kernel}");
    println!();

    let edges = conv2d(&image, &kernel)?;
    println!(
        "Valid convolution shrinks the output to {}x{}:",
        edges.rows(),
        edges.cols()
    );
    println!("{edges}");
    println!("Every 3x3 window sees the same left-to-right ramp, so each cell is -6.");
    println!();

    let padded = conv2d_padded(&image, &kernel, 1)?;
    println!("With one ring of zero padding the output keeps the 5x5 shape:");
    println!("{padded}");
    println!("Border cells now mix real pixels with zeros, so the rim values differ.");
    println!();

    let pooled = max_pool2d(&image, 2, 2)?;
    println!("2x2 max pooling with stride 2 keeps the strongest value per window:");
    println!("{pooled}");
    println!("Windows that would hang over the edge are dropped, so 5x5 pools to 2x2.");
    Ok(())
}

fn load_input(image: Option<&Path>, random: Option<&str>) -> Result<FeatureMap> {
    match (image, random) {
        (Some(path), _) => load_grid(path),
        (None, Some(dims)) => {
            let (rows, cols) = parse_dims(dims)?;
            Ok(FeatureMap::random(rows, cols))
        }
        (None, None) => bail!("provide an input with --image <FILE> or --random <ROWSxCOLS>"),
    }
}

fn load_grid(path: &Path) -> Result<FeatureMap> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read grid file: {}", path.display()))?;
    let rows: Vec<Vec<f32>> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse grid file: {}", path.display()))?;
    let map = FeatureMap::from_rows(rows)?;
    log::debug!("loaded {map:?} from {}", path.display());
    Ok(map)
}

fn resolve_kernel(name: &str) -> Result<FeatureMap> {
    if let Some(kernel) = filters::by_name(name) {
        return Ok(kernel);
    }
    let path = Path::new(name);
    if path.exists() {
        return load_grid(path);
    }
    Err(anyhow!(
        "unknown kernel {name:?}; expected one of {} or a JSON grid file",
        filters::NAMES.join(", ")
    ))
}

fn parse_dims(dims: &str) -> Result<(usize, usize)> {
    let (rows, cols) = dims
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("invalid dimensions {dims:?}, expected ROWSxCOLS"))?;
    let rows = rows
        .trim()
        .parse()
        .with_context(|| format!("invalid row count in {dims:?}"))?;
    let cols = cols
        .trim()
        .parse()
        .with_context(|| format!("invalid column count in {dims:?}"))?;
    Ok((rows, cols))
}

fn emit(map: &FeatureMap, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&map.to_rows())?);
    } else {
        println!("{map}");
    }
    Ok(())
}

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::info;
use nalgebra::Vector3;
use serde_json::json;

use periodic_cell::Cell;
use periodic_cell::nucpot::compute_grid_nucpot;

#[derive(Parser)]
#[command(name = "periodic-cell")]
#[command(about = "Periodic cell geometry, image enumeration and point-charge potentials")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print volume, lengths, spacings and parameters of a cell
    Info {
        #[command(flatten)]
        cell: CellArgs,
    },
    /// Count the periodic images of the origin within a cutoff around a point
    Images {
        #[command(flatten)]
        cell: CellArgs,

        /// Point around which images are collected
        #[arg(long, value_parser = parse_vector, default_value = "0,0,0")]
        delta: Vector3<f64>,

        /// Cutoff radius
        #[arg(long)]
        rcut: f64,
    },
    /// Reduce a displacement to its minimum image
    Mic {
        #[command(flatten)]
        cell: CellArgs,

        /// Displacement vector
        #[arg(long, value_parser = parse_vector)]
        delta: Vector3<f64>,
    },
    /// Evaluate the potential of a unit charge along the x-axis
    NucpotDemo {
        /// Number of evaluation points
        #[arg(short, long, default_value = "5")]
        npoint: usize,
    },
}

#[derive(Args)]
struct CellArgs {
    /// Lattice vector as x,y,z (repeat up to three times)
    #[arg(long = "rvec", value_parser = parse_vector, conflicts_with_all = ["lengths", "angles"])]
    rvecs: Vec<Vector3<f64>>,

    /// Lattice lengths, comma separated
    #[arg(long, value_delimiter = ',')]
    lengths: Vec<f64>,

    /// Lattice angles in degrees, comma separated
    #[arg(long, value_delimiter = ',')]
    angles: Vec<f64>,
}

impl CellArgs {
    fn build(&self) -> Result<Cell> {
        let cell = if self.lengths.is_empty() && self.angles.is_empty() {
            Cell::new(&self.rvecs)?
        } else {
            let radians: Vec<f64> = self.angles.iter().map(|a| a.to_radians()).collect();
            Cell::from_parameters(&self.lengths, &radians)?
        };
        Ok(cell)
    }
}

fn parse_vector(s: &str) -> std::result::Result<Vector3<f64>, String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<f64>, _>>()
        .map_err(|e| format!("invalid vector component in '{}': {}", s, e))?;
    match values.as_slice() {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(format!("expected three comma separated values, got '{}'", s)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    info!("Starting periodic-cell v{}", periodic_cell::VERSION);

    match cli.command {
        Commands::Info { cell } => show_info(&cell.build()?),
        Commands::Images { cell, delta, rcut } => count_images(&cell.build()?, &delta, rcut),
        Commands::Mic { cell, delta } => reduce_mic(&cell.build()?, delta),
        Commands::NucpotDemo { npoint } => nucpot_demo(npoint),
    }
}

fn show_info(cell: &Cell) -> Result<()> {
    let report = json!({
        "nvec": cell.nvec(),
        "volume": cell.volume(),
        "rvecs": cell.clone(),
        "rlengths": cell.rlengths(),
        "glengths": cell.glengths(),
        "rspacings": cell.rspacings(),
        "gspacings": cell.gspacings(),
        "parameters": cell.parameters(),
        "orthogonal": cell.is_orthogonal(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn count_images(cell: &Cell, delta: &Vector3<f64>, rcut: f64) -> Result<()> {
    if cell.nvec() == 0 {
        bail!("image enumeration needs at least one lattice vector");
    }
    let ranges = cell.get_ranges_rcut(delta, rcut)?;
    let candidates = ranges.try_len()?;
    info!("Scanning {} candidate images", candidates);

    let nvec = cell.nvec();
    let capacity = candidates
        .checked_mul(nvec)
        .context("too many candidate images")?;
    let mut indexes = vec![0i64; capacity];
    let shape = vec![1i64; nvec];
    let pbc = vec![false; nvec];
    let origin = Vector3::zeros();
    let nselect = cell
        .select_inside(&origin, delta, rcut, &ranges, &shape, &pbc, &mut indexes)
        .context("image selection failed")?;

    let images: Vec<&[i64]> = indexes[..nselect * nvec].chunks(nvec).collect();
    let report = json!({
        "ranges": ranges,
        "candidates": candidates,
        "selected": nselect,
        "images": images,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn reduce_mic(cell: &Cell, mut delta: Vector3<f64>) -> Result<()> {
    cell.mic(&mut delta);
    println!("{}", json!({ "delta": [delta.x, delta.y, delta.z], "norm": delta.norm() }));
    Ok(())
}

fn nucpot_demo(npoint: usize) -> Result<()> {
    let charges = [1.0];
    let coordinates = [Vector3::zeros()];
    let points: Vec<Vector3<f64>> = (1..=npoint)
        .map(|i| Vector3::new(i as f64, 0.0, 0.0))
        .collect();
    let mut output = vec![0.0; npoint];
    compute_grid_nucpot(&charges, &coordinates, &points, &mut output)?;
    for (point, value) in points.iter().zip(&output) {
        println!("{:>8.3} {:>12.6}", point.x, value);
    }
    Ok(())
}

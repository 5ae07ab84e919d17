//! conceptspace: command-line front end for the shape, taste and color
//! conceptual spaces.
//!
//! Generates and inspects meshes, resolves dictionary words to scaled shapes
//! and taste profiles, and voxelizes color regions into RGBA volume textures.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "conceptspace", version, about = "Shape, taste and color conceptual spaces")]
struct Args {
    /// Config file (defaults to ./conceptspace.toml when present).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Dictionary directory, overrides [dictionary] dir.
    #[arg(long, global = true)]
    dictionary: Option<PathBuf>,

    /// Root for asset paths in dictionary entries, overrides [dictionary] asset_root.
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the parametric apple mesh and write it as OBJ.
    Apple {
        #[arg(long)]
        diameter: Option<f32>,
        #[arg(long)]
        segments: Option<usize>,
        #[arg(long)]
        rings: Option<usize>,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print counts and bounds of a mesh file.
    Inspect { mesh: PathBuf },

    /// Load a word's model and scale it to its real-world size.
    Shape {
        word: String,
        /// Write the scaled mesh here.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Voxelize color regions (meshes and RGB box) into an RGBA volume texture.
    Voxelize {
        /// Dictionary word whose color regions are used.
        word: Option<String>,
        /// Additional region meshes, in color-space coordinates.
        #[arg(long = "mesh")]
        meshes: Vec<PathBuf>,
        /// Edge length of the volume in texels.
        #[arg(long)]
        size: Option<usize>,
        /// Fill slices on one thread.
        #[arg(long)]
        sequential: bool,
        /// Raw RGBA output; the descriptor is written next to it as JSON.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Sample the sRGB gamut in LAB, boundary only unless --all.
    Gamut {
        #[arg(long)]
        step: Option<f32>,
        /// Every in-gamut sample with its sRGB color instead of the boundary.
        #[arg(long)]
        all: bool,
        /// Write points as CSV (a,l,b).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a word's taste profile and radar polygon.
    Taste {
        word: String,
        #[arg(long, default_value_t = 1.0)]
        radius: f32,
    },

    /// Test whether a point lies inside a closed mesh.
    Hit {
        mesh: PathBuf,
        #[arg(allow_negative_numbers = true)]
        x: f32,
        #[arg(allow_negative_numbers = true)]
        y: f32,
        #[arg(allow_negative_numbers = true)]
        z: f32,
    },

    /// List the words in the dictionary.
    Words,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "conceptspace=debug"
    } else {
        "conceptspace=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = config::load(args.config.as_deref())?;
    apply_overrides(&mut config, &args);
    tracing::debug!(?config, "effective config");

    match args.command {
        Command::Apple {
            diameter,
            segments,
            rings,
            output,
        } => {
            let mut params = config.shape.apple;
            if let Some(d) = diameter {
                params.diameter = d;
            }
            if let Some(s) = segments {
                params.segments = s;
            }
            if let Some(r) = rings {
                params.rings = r;
            }
            commands::apple(&params, &output)
        }
        Command::Inspect { mesh } => commands::inspect(&mesh),
        Command::Shape { word, output } => commands::shape(&config, &word, output.as_deref()),
        Command::Voxelize {
            word,
            meshes,
            size,
            sequential,
            output,
        } => {
            let mut texture = config.texture;
            if let Some(size) = size {
                texture.size = size;
            }
            if sequential {
                texture.parallel = false;
            }
            commands::voxelize(&config, &texture, word.as_deref(), &meshes, &output)
        }
        Command::Gamut { step, all, output } => {
            let mut sampling = config.gamut;
            if let Some(step) = step {
                sampling.step = step;
            }
            commands::gamut(&sampling, all, output.as_deref())
        }
        Command::Taste { word, radius } => commands::taste(&config, &word, radius),
        Command::Hit { mesh, x, y, z } => commands::hit(&mesh, [x, y, z]).map(|_| ()),
        Command::Words => commands::words(&config),
    }
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(dir) = &args.dictionary {
        config.dictionary.dir = dir.clone();
    }
    if let Some(root) = &args.assets {
        config.dictionary.asset_root = Some(root.clone());
    }
}

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::debug;
use std::path::{Path, PathBuf};

use polyforge::config::FileConfig;
use polyforge::io::{load_polygon, read_polygon_file, save_polygon, to_json_string};
use polyforge::{BufferStyle, Polygon, PolygonFailureType, RendererBackend, create_renderer};

/// Inspect and transform 2D polygons with holes
///
/// Examples:
///   # Check a polygon file
///   polyforge validate shape.json
///
///   # Grow a polygon by 2 units with rounded corners
///   polyforge buffer shape.json --distance 2 --round -o grown.json
///
///   # Extrude a polygon and its outline into an STL
///   polyforge render shape.toml --backend stl --output shape.stl --frame 0.8
#[derive(Parser, Debug)]
#[command(name = "polyforge")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches polyforge.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a polygon file and exit non-zero unless it is valid
    Validate { input: PathBuf },

    /// Print measurements of a polygon
    Info { input: PathBuf },

    /// Write the convex hull
    Hull {
        input: PathBuf,
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Grow (positive) or shrink (negative) a polygon
    Buffer {
        input: PathBuf,
        #[arg(short = 'd', long, allow_hyphen_values = true)]
        distance: f64,
        /// Round corners instead of mitering them
        #[arg(long)]
        round: bool,
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Remove vertices closer than the tolerance to the simplified outline
    Simplify {
        input: PathBuf,
        /// Tolerance (defaults to simplify_max_distance from the config)
        #[arg(long)]
        max_distance: Option<f64>,
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Draw a polygon through a renderer backend
    Render {
        input: PathBuf,
        #[arg(long, value_enum)]
        backend: Option<RendererBackend>,
        /// Output file for the STL backend
        #[arg(long)]
        output: Option<PathBuf>,
        /// Also draw the boundary with this line thickness
        #[arg(long)]
        frame: Option<f64>,
        /// Also draw every triangle edge with this line thickness
        #[arg(long)]
        wireframe: Option<f64>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = if let Some(ref config_path) = args.config {
        FileConfig::from_path(config_path)?
    } else {
        FileConfig::load().unwrap_or_default()
    };

    let verbose = args.verbose || file_config.verbose;
    init_logging(verbose);
    debug!("Configuration: {:?}", file_config);

    match args.command {
        Command::Validate { input } => {
            let (outer, holes) = read_polygon_file(&input)?.rings();
            let result = Polygon::validate(&outer, &holes);
            println!("{}", result);
            if result != PolygonFailureType::Ok {
                bail!("{} is not a valid polygon: {}", input.display(), result);
            }
        }
        Command::Info { input } => {
            let polygon = load_polygon(&input)?;
            print_info(&input, &polygon);
        }
        Command::Hull { input, output } => {
            let polygon = load_polygon(&input)?;
            emit(&polygon.calculate_convex_hull(), output.as_deref())?;
        }
        Command::Buffer {
            input,
            distance,
            round,
            output,
        } => {
            let polygon = load_polygon(&input)?;
            let style = if round {
                BufferStyle::round(distance).with_round_segments(file_config.buffer.round_segments)
            } else {
                BufferStyle::mitered(distance).with_miter_limit(file_config.buffer.miter_limit)
            };
            let buffered = polygon.calculate_buffer_with(&style);
            if buffered.is_empty() {
                bail!("Buffer distance {} leaves nothing of the polygon", distance);
            }
            emit(&buffered, output.as_deref())?;
        }
        Command::Simplify {
            input,
            max_distance,
            output,
        } => {
            let polygon = load_polygon(&input)?;
            let max_distance = max_distance.unwrap_or(file_config.simplify_max_distance);
            if max_distance < 0.0 {
                bail!("--max-distance must not be negative");
            }
            let simplified = polygon.simplified(max_distance);
            debug!(
                "Simplified {} -> {} outer points",
                polygon.outer().len(),
                simplified.outer().len()
            );
            emit(&simplified, output.as_deref())?;
        }
        Command::Render {
            input,
            backend,
            output,
            frame,
            wireframe,
        } => {
            let polygon = load_polygon(&input)?;

            let mut render_config = file_config.render.clone();
            if let Some(backend) = backend {
                render_config.backend = backend;
            }
            if let Some(output) = output {
                render_config.output = output;
            }

            let mut renderer = create_renderer(&render_config);
            polygon.draw(renderer.as_mut(), &render_config.fill_color);
            if let Some(thickness) = frame {
                polygon.draw_frame(renderer.as_mut(), thickness, &render_config.frame_color);
            }
            if let Some(thickness) = wireframe {
                polygon.draw_wireframe(renderer.as_mut(), thickness, &render_config.frame_color);
            }
            renderer.flush().context("Failed to flush renderer")?;

            println!(
                "Rendered {} triangles with the {:?} backend",
                polygon.num_triangles(),
                render_config.backend
            );
            if render_config.backend == RendererBackend::Stl {
                println!("Output: {}", render_config.output.display());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn print_info(input: &Path, polygon: &Polygon) {
    let rect = polygon.bounding_rect();
    let centroid = polygon.centroid();

    println!("Polygon: {}", input.display());
    println!("  Empty: {}", polygon.is_empty());
    println!("  Holes: {}", polygon.num_holes());
    println!("  Area: {:.4}", polygon.area());
    println!("  Perimeter: {:.4}", polygon.perimeter());
    println!("  Centroid: ({:.4}, {:.4})", centroid.x, centroid.y);
    println!(
        "  Bounding rect: x={:.4} y={:.4} w={:.4} h={:.4}",
        rect.x,
        rect.y,
        rect.width(),
        rect.height()
    );
    println!("  Triangles: {}", polygon.num_triangles());
}

/// Write a polygon to `output`, or print it to stdout
fn emit(polygon: &Polygon, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            save_polygon(path, polygon)?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", to_json_string(polygon)?),
    }
    Ok(())
}

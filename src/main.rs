use std::path::{Path, PathBuf};

use chrono::Local;
use clap::{Parser, Subcommand};
use macroquad::math::{Vec3, vec3};
use plotters::prelude::*;
use teleport_parable::core::parable::Parable;
use teleport_parable::core::projection::flat_distance;
use teleport_parable::core::sampling::{SideViewPoint, sample_arc, side_view};
use teleport_parable::core::window::SideViewWindow;
use teleport_parable::core::ParableError;
use thiserror::Error;
use tracing::{Level, debug};

const PLOT_SIZE: (u32, u32) = (1280, 640);

#[derive(Debug, Error)]
enum CliError {
    #[error("Invalid launch configuration: {0}")]
    Config(#[from] ParableError),
    #[error("Invalid {name}: '{value}'. Expected a finite number.")]
    InvalidDistance { name: &'static str, value: f32 },
    #[error("Could not draw plot '{path}': {message}")]
    Plot { path: String, message: String },
}

#[derive(Parser, Debug)]
#[command(name = "teleport_parable")]
#[command(about = "Samples a teleport arc and resolves distances along it", long_about = None)]
struct Cli {
    /// Start position of the arc (x,y,z)
    #[arg(long, default_value = "0,0,0", value_parser = parse_vec3, allow_hyphen_values = true)]
    start: Vec3,

    /// Launch direction (x,y,z)
    #[arg(long, default_value = "0,0,1", value_parser = parse_vec3, allow_hyphen_values = true)]
    forward: Vec3,

    /// Up axis used for gravity and the flat plane (x,y,z)
    #[arg(long, default_value = "0,1,0", value_parser = parse_vec3, allow_hyphen_values = true)]
    up: Vec3,

    /// Launch speed (m/s)
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    speed: f32,

    /// Acceleration along up (m/s^2), negative pulls the arc down
    #[arg(long, default_value_t = -9.8, allow_negative_numbers = true)]
    gravity: f32,

    /// Distance covered by one step at launch speed (m)
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    step_length: f32,

    /// Log configuration and query details to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Position after a number of steps
    Position {
        #[arg(long)]
        step: u32,
    },
    /// Arc distance travelled after a number of steps
    Distance {
        #[arg(long)]
        step: u32,
    },
    /// Last step still below an arc distance
    Index {
        #[arg(long)]
        distance: f32,
    },
    /// Point at an exact arc distance
    AtDistance {
        #[arg(long)]
        distance: f32,
    },
    /// Arc distance and landing point for a flat (horizontal) distance
    Flat {
        #[arg(long)]
        flat_distance: f32,
        #[arg(long)]
        max_distance: f32,
    },
    /// Flat distance reached at an arc distance
    FlatOf {
        #[arg(long)]
        distance: f32,
    },
    /// Step by step table of the arc
    Table {
        #[arg(long, default_value_t = 20)]
        steps: u32,
    },
    /// Draw a side view of the arc to a PNG file
    Plot {
        #[arg(long, default_value_t = 10.0)]
        max_distance: f32,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_f32(value: &str, label: &str) -> Result<f32, String> {
    value
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("Invalid {label}: '{value}'. Expected a number."))
}

fn parse_vec3(value: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = value.split(',').collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!(
            "Invalid vector: '{value}'. Expected three comma separated numbers, e.g. 0,1,0."
        ));
    };

    Ok(vec3(parse_f32(x, "x")?, parse_f32(y, "y")?, parse_f32(z, "z")?))
}

fn format_vec3(value: Vec3) -> String {
    format!("({:.4}, {:.4}, {:.4})", value.x, value.y, value.z)
}

fn build_parable(cli: &Cli) -> Result<Parable, ParableError> {
    let mut parable = Parable::new();
    parable.set_start_position(cli.start);
    parable.set_forward(cli.forward);
    parable.set_up(cli.up);
    parable.set_speed(cli.speed);
    parable.set_gravity(cli.gravity);
    parable.set_step_length(cli.step_length);

    parable.validate()?;
    Ok(parable)
}

fn distance_arguments(command: &Command) -> Vec<(&'static str, f32)> {
    match *command {
        Command::Index { distance }
        | Command::AtDistance { distance }
        | Command::FlatOf { distance } => vec![("distance", distance)],
        Command::Flat {
            flat_distance,
            max_distance,
        } => vec![("flat-distance", flat_distance), ("max-distance", max_distance)],
        Command::Plot { max_distance, .. } => vec![("max-distance", max_distance)],
        Command::Position { .. } | Command::Distance { .. } | Command::Table { .. } => vec![],
    }
}

fn check_distances(command: &Command) -> Result<(), CliError> {
    for (name, value) in distance_arguments(command) {
        if !value.is_finite() {
            return Err(CliError::InvalidDistance { name, value });
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn default_plot_path() -> PathBuf {
    PathBuf::from(format!("parable_{}.png", Local::now().format("%Y%m%d_%H%M%S")))
}

fn draw_side_view(
    parable: &Parable,
    max_distance: f32,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut points = Vec::new();
    sample_arc(parable, max_distance, &mut points);
    let side: Vec<SideViewPoint> = side_view(parable, &points).collect();
    let window = SideViewWindow::fit(side.iter().copied());
    debug!(samples = side.len(), ?window, "drawing side view");

    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Teleport arc, {max_distance:.2} m ({})",
                Local::now().format("%Y-%m-%d %H:%M:%S")
            ),
            ("sans-serif", 24),
        )
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(0f32..window.x_max, window.y_min..window.y_max)?;

    chart
        .configure_mesh()
        .x_desc("Flat distance (m)")
        .y_desc("Height (m)")
        .draw()?;

    chart.draw_series(LineSeries::new(
        side.iter().map(|point| (point.flat, point.height)),
        &BLUE,
    ))?;

    if let Some(landing) = side.last() {
        chart.draw_series(std::iter::once(Circle::new(
            (landing.flat, landing.height),
            5,
            RED.filled(),
        )))?;
    }

    root.present()?;
    Ok(())
}

fn print_table(parable: &Parable, steps: u32) {
    println!(
        "{:>6}  {:>32}  {:>10}  {:>10}",
        "step", "position", "distance", "flat"
    );
    println!(
        "{:>6}  {:>32}  {:>10.4}  {:>10.4}",
        0,
        format_vec3(parable.start_position()),
        0.0,
        0.0
    );

    for segment in parable.segments().take(steps as usize) {
        println!(
            "{:>6}  {:>32}  {:>10.4}  {:>10.4}",
            segment.index,
            format_vec3(segment.to),
            segment.distance,
            flat_distance(parable.start_position(), segment.to, parable.up())
        );
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    check_distances(&cli.command)?;
    let parable = build_parable(&cli)?;
    debug!(?parable, "configured parable");

    match cli.command {
        Command::Position { step } => {
            println!("Position at step {step}: {}", format_vec3(parable.position(step)));
        }
        Command::Distance { step } => {
            println!("Distance at step {step}: {:.4} m", parable.distance(step));
        }
        Command::Index { distance } => {
            let index = parable.position_index_by_distance(distance);
            println!("Last step below {distance:.4} m: {index}");
        }
        Command::AtDistance { distance } => {
            let position = parable.position_by_distance(distance);
            println!("Position at {distance:.4} m: {}", format_vec3(position));
        }
        Command::Flat {
            flat_distance,
            max_distance,
        } => {
            let distance = parable.distance_over_flat_distance(flat_distance, max_distance);
            let landing = parable.position_by_distance(distance);
            debug!(flat_distance, max_distance, distance, "resolved flat distance");

            println!("Arc distance for {flat_distance:.4} m flat: {distance:.4} m");
            println!("Landing point: {}", format_vec3(landing));
        }
        Command::FlatOf { distance } => {
            let flat = parable.flat_distance_over_distance(distance);
            println!("Flat distance at {distance:.4} m: {flat:.4} m");
        }
        Command::Table { steps } => print_table(&parable, steps),
        Command::Plot {
            max_distance,
            output,
        } => {
            let path = output.unwrap_or_else(default_plot_path);
            draw_side_view(&parable, max_distance, &path).map_err(|err| CliError::Plot {
                path: path.display().to_string(),
                message: err.to_string(),
            })?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

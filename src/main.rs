use clap::{Parser, Subcommand};
use geodesic_area::api::{self, Response};
use geodesic_area::{AreaCalculator, Ellipsoid, read_polygon};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "geodesic-area", about = "Geodesic polygon area on a reference ellipsoid")]
struct Cli {
    /// Reference ellipsoid: wgs84, grs80 or "<semi-major axis>,<flattening>"
    #[arg(long, env = "GEOAREA_ELLIPSOID", default_value = "wgs84")]
    ellipsoid: Ellipsoid,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer a {"coordinates": [[lat, lng], ...]} request with a GeoJSON FeatureCollection
    Calculate {
        /// Request file (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Answer a {"geojson": {...}} request with the first polygon in [lat, lng] order
    Verify {
        /// Request file (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Print the area of the first polygon in a .geojson, .kml or .gpx file
    Area { path: PathBuf },
}

fn read_body(input: Option<PathBuf>) -> std::io::Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}

fn respond(response: Response) -> ExitCode {
    println!("{}", response.body);
    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        log::debug!("status: {}", response.status);
        ExitCode::FAILURE
    }
}

fn area(calculator: &AreaCalculator, path: &Path) -> geodesic_area::Result<()> {
    let coordinates = read_polygon::read_ring(path)?;
    let result = calculator.calculate(&coordinates)?;
    result.ring.info();
    println!(" ellipsoid: {}", calculator.ellipsoid());
    println!("  vertices: {}", result.coordinate_count);
    println!("      area: {:.2} m2", result.area_m2);
    println!("  hectares: {:.4} ha", result.area_ha);
    println!(" perimeter: {:.2} m", result.perimeter_m);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Cli::parse();
    let calculator = AreaCalculator::new(args.ellipsoid);
    log::info!("using {}", calculator.ellipsoid());

    match args.command {
        Command::Calculate { input } => match read_body(input) {
            Ok(body) => respond(api::handle_calculate(&body, &calculator)),
            Err(e) => {
                log::error!("reading request: {}", e);
                ExitCode::FAILURE
            }
        },
        Command::Verify { input } => match read_body(input) {
            Ok(body) => respond(api::handle_verify(&body)),
            Err(e) => {
                log::error!("reading request: {}", e);
                ExitCode::FAILURE
            }
        },
        Command::Area { path } => match area(&calculator, &path) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{}: {}", path.display(), e);
                eprintln!("error: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

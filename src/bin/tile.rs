use clap::{App, Arg, ArgMatches};
use failure::Fail;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use mandeltiles::encoder::{PngTileEncoder, TileEncoder};
use mandeltiles::logging::init_logging;
use mandeltiles::render::render_tile;
use mandeltiles::{Result, TileConfig, TileCoord, TileLayout};

fn validate_number<T: FromStr>(s: &str, err: &str) -> std::result::Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

const ZOOM: &str = "zoom";
const COLUMN: &str = "x";
const ROW: &str = "y";
const OUTPUT: &str = "output";

fn args<'a>() -> ArgMatches<'a> {
    App::new("tile")
        .version("0.1.0")
        .about("Renders a single Mandelbrot tile")
        .arg(
            Arg::with_name(ZOOM)
                .required(true)
                .index(1)
                .validator(|s| validate_number::<u32>(&s, "Could not parse zoom level"))
                .help("Zoom level of the tile"),
        )
        .arg(
            Arg::with_name(COLUMN)
                .required(true)
                .index(2)
                .validator(|s| validate_number::<u64>(&s, "Could not parse tile column"))
                .help("Tile column"),
        )
        .arg(
            Arg::with_name(ROW)
                .required(true)
                .index(3)
                .validator(|s| validate_number::<u64>(&s, "Could not parse tile row"))
                .help("Tile row"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("tile.png")
                .help("Output file"),
        )
        .get_matches()
}

fn render(matches: &ArgMatches) -> Result<()> {
    let z = u32::from_str(matches.value_of(ZOOM).unwrap_or_default()).unwrap_or(0);
    let x = u64::from_str(matches.value_of(COLUMN).unwrap_or_default()).unwrap_or(0);
    let y = u64::from_str(matches.value_of(ROW).unwrap_or_default()).unwrap_or(0);
    let output = Path::new(matches.value_of(OUTPUT).unwrap_or("tile.png"));

    let coord = TileCoord::new(z, x, y)?;
    let config = TileConfig::default();
    let layout = TileLayout::new(".", config.clone());
    let bounds = layout.bounds(coord);
    let tile = render_tile(&config, bounds);
    PngTileEncoder.encode(output, &tile)?;
    info!(
        z,
        x,
        y,
        re = bounds.start.re,
        im = bounds.start.im,
        "wrote {}",
        output.display()
    );
    Ok(())
}

fn main() {
    let matches = args();
    init_logging();
    if let Err(e) = render(&matches) {
        eprintln!("Error: {}", e);
        for cause in (&e as &dyn Fail).iter_causes() {
            eprintln!("Caused by: {}", cause);
        }
        std::process::exit(1);
    }
}

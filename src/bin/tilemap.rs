use clap::{App, Arg, ArgMatches};
use failure::Fail;
use std::str::FromStr;
use tracing::warn;

use mandeltiles::logging::init_logging;
use mandeltiles::{TileConfig, TileGenerator, TileLayout, MAX_ZOOM};

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const ZOOM: &str = "zoom";
const THREADS: &str = "threads";
const OUTPUT: &str = "output";

fn args<'a>() -> ArgMatches<'a> {
    App::new("tilemap")
        .version("0.1.0")
        .about("Renders a zoomable pyramid of Mandelbrot tiles")
        .arg(
            Arg::with_name(ZOOM)
                .required(true)
                .index(1)
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        MAX_ZOOM,
                        "Could not parse zoom level",
                        &format!("Zoom level must be at most {}", MAX_ZOOM),
                    )
                })
                .help("Deepest zoom level to generate"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(true)
                .index(2)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        usize::max_value(),
                        "Could not parse thread count",
                        "Thread count must be at least 1",
                    )
                })
                .help("Number of worker threads"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("map")
                .help("Output directory; its previous tiles are deleted"),
        )
        .get_matches()
}

fn main() {
    let matches = args();
    init_logging();

    // The validators have already vetted both values.
    let zoom = u32::from_str(matches.value_of(ZOOM).unwrap_or_default()).unwrap_or(0);
    let threads = usize::from_str(matches.value_of(THREADS).unwrap_or_default()).unwrap_or(1);
    let output = matches.value_of(OUTPUT).unwrap_or("map");

    let cpus = num_cpus::get();
    if threads > cpus {
        warn!(threads, cpus, "more worker threads than CPUs");
    }

    let generator = TileGenerator::new(TileLayout::new(output, TileConfig::default()));
    if let Err(e) = generator.run(zoom, threads) {
        eprintln!("Error: {}", e);
        for cause in (&e as &dyn Fail).iter_causes() {
            eprintln!("Caused by: {}", cause);
        }
        std::process::exit(1);
    }
}

//! Extract a themed palette from an image file
//!
//! Decodes the image with the `image` crate, hands the RGBA bytes to the
//! extractor and prints each entry with its role and CVD collisions.
//!
//! Set `RUST_LOG=theme_colors=debug` to see pipeline logging.

use std::{env, path::Path, process};
use theme_colors::{
    analyze_palette, EngineConfig, PixelBuffer, ThemeColorError, ThemeEngine,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <image> [config.json]", args[0]);
        process::exit(1);
    }

    let config = match args.get(2) {
        Some(path) => match EngineConfig::from_json_file(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e.user_message());
                process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    let engine = match ThemeEngine::new(&config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            process::exit(1);
        }
    };

    let image = match image::open(&args[1]) {
        Ok(image) => image.to_rgba8(),
        Err(e) => {
            eprintln!("Error loading {}: {}", args[1], e);
            process::exit(1);
        }
    };
    let (width, height) = image.dimensions();

    let palette = match PixelBuffer::rgba(image.as_raw(), width, height)
        .and_then(|buffer| engine.extract_palette(&buffer))
    {
        Ok(palette) => palette,
        Err(e @ ThemeColorError::InsufficientColorVariety { .. }) => {
            eprintln!("{}", e.user_message());
            process::exit(2);
        }
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            process::exit(1);
        }
    };

    println!("{} ({}x{})", args[1], width, height);
    for entry in &palette {
        println!(
            "  {:<10} {}  {}  luminance {:.3}  pixels {}",
            entry.role,
            entry.display_hex(),
            entry.canonical_string(),
            entry.luminance,
            entry.pixel_count
        );
    }

    let colors: Vec<_> = palette.iter().map(|entry| entry.color).collect();
    for (cvd, report) in analyze_palette(&colors) {
        if report.accessible {
            continue;
        }
        let pairs: Vec<String> = report
            .issues
            .iter()
            .map(|(i, j)| format!("{}/{}", palette[*i].display_hex(), palette[*j].display_hex()))
            .collect();
        println!("  {}: {}", cvd, pairs.join(", "));
    }
}

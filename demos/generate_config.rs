//! Generate a default engine configuration file
//!
//! Creates a JSON config with all default parameters

use std::{env, path::Path, process};
use theme_colors::EngineConfig;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_config.json>", args[0]);
        process::exit(1);
    }

    let output_path = Path::new(&args[1]);

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = EngineConfig::default();

    match config.to_json_file(output_path) {
        Ok(()) => {
            let extraction = &config.extraction;
            let accessibility = &config.accessibility;
            eprintln!("Configuration saved to {}", output_path.display());
            eprintln!();
            eprintln!("Config summary:");
            eprintln!(
                "  Extraction: {} samples, depth {}, up to {} colors",
                extraction.sample_limit, extraction.max_depth, extraction.max_colors
            );
            eprintln!(
                "  Filters: alpha >= {}, luminance {:.2}-{:.2}",
                extraction.alpha_threshold,
                extraction.luminance_bounds.min,
                extraction.luminance_bounds.max
            );
            eprintln!(
                "  Accessibility: target {:.1}:1, CVD threshold {:.2}",
                accessibility.default_target_ratio, accessibility.distinguish_threshold
            );
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}

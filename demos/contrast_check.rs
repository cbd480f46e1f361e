//! Check a foreground/background pair against WCAG 2.1
//!
//! Accepts hex, `rgb(...)` or `oklch(...)` text for either color and prints
//! the ratio, compliance level, suggested fixes and CVD simulations.

use std::{env, process};
use theme_colors::{
    check_compliance, minimal_contrast_fix, parse, simulate, suggest_accessible_color,
    CanonicalColor, CvdType,
};

fn parse_or_exit(text: &str) -> CanonicalColor {
    match parse(text) {
        Some(color) => color,
        None => {
            eprintln!("Error: could not parse color {:?}", text);
            process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <foreground> <background> [target_ratio]", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} '#777777' 'oklch(0.98 0.01 90)' 7", args[0]);
        process::exit(1);
    }

    let fg = parse_or_exit(&args[1]);
    let bg = parse_or_exit(&args[2]);
    let target = match args.get(3).map(|t| t.parse::<f64>()) {
        None => 4.5,
        Some(Ok(t)) if t >= 1.0 => t,
        Some(_) => {
            eprintln!("Error: target ratio must be a number >= 1");
            process::exit(1);
        }
    };

    let result = check_compliance(&fg, &bg);
    println!("{} on {}", fg.to_display_hex(), bg.to_display_hex());
    println!("  ratio {:.2}:1  level {}", result.ratio, result.level);

    if result.ratio < target {
        let coarse = suggest_accessible_color(&fg, &bg, target);
        let minimal = minimal_contrast_fix(&fg, &bg, target);
        println!("  suggested {}  ({})", coarse.to_display_hex(), coarse);
        println!(
            "  minimal   {}  ({:.2}:1)",
            minimal.to_display_hex(),
            check_compliance(&minimal, &bg).ratio
        );
    }

    for cvd in CvdType::ALL {
        let sim_fg = simulate(&fg, cvd);
        let sim_bg = simulate(&bg, cvd);
        println!(
            "  {:<14} {} on {}  {:.2}:1",
            cvd.name(),
            sim_fg.to_display_hex(),
            sim_bg.to_display_hex(),
            check_compliance(&sim_fg, &sim_bg).ratio
        );
    }
}

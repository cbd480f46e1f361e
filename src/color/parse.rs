//! Color text parsing
//!
//! Accepted grammars (surrounding whitespace is ignored):
//!
//! * `#RRGGBB`: six hex digits, any case
//! * `rgb(R, G, B)`: integers 0-255, comma-separated
//! * `oklch(L C H)` or `oklch(L C H / A)`: space-separated floats with
//!   L in [0, 1], C >= 0, H in [0, 360) and A in [0, 1]
//!
//! Anything else, including components outside their domain, is rejected
//! with `None`. Parsing never panics.

use super::canonical::{CanonicalColor, DisplayColor};

/// Parse color text into its canonical representation
pub fn parse(text: &str) -> Option<CanonicalColor> {
    let text = text.trim();

    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex).map(DisplayColor::to_canonical);
    }
    if let Some(args) = function_args(text, "rgb") {
        return parse_rgb_args(args).map(DisplayColor::to_canonical);
    }
    if let Some(args) = function_args(text, "oklch") {
        return parse_oklch_args(args);
    }

    None
}

/// Parse the digits of a `#RRGGBB` color (without the `#`)
pub fn parse_hex(hex: &str) -> Option<DisplayColor> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(DisplayColor::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Strip `name(` and `)` and return what is between them
fn function_args<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    text.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_rgb_args(args: &str) -> Option<DisplayColor> {
    let mut channels = args.split(',').map(parse_channel);
    let r = channels.next()??;
    let g = channels.next()??;
    let b = channels.next()??;
    if channels.next().is_some() {
        return None;
    }
    Some(DisplayColor::new(r, g, b))
}

fn parse_channel(text: &str) -> Option<u8> {
    let text = text.trim();
    // u8::from_str accepts a leading '+', which is not part of the grammar
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<u8>().ok()
}

fn parse_oklch_args(args: &str) -> Option<CanonicalColor> {
    if args.contains(',') {
        return None;
    }

    let (components, alpha) = match args.split_once('/') {
        Some((components, alpha)) => (components, Some(alpha)),
        None => (args, None),
    };

    let mut values = components.split_whitespace().map(parse_number);
    let lightness = values.next()??;
    let chroma = values.next()??;
    let hue = values.next()??;
    if values.next().is_some() {
        return None;
    }

    let alpha = match alpha {
        Some(text) => {
            let mut parts = text.split_whitespace();
            let value = parse_number(parts.next()?)?;
            if parts.next().is_some() {
                return None;
            }
            value
        }
        None => 1.0,
    };

    let in_domain = (0.0..=1.0).contains(&lightness)
        && chroma >= 0.0
        && (0.0..360.0).contains(&hue)
        && (0.0..=1.0).contains(&alpha);
    if !in_domain {
        return None;
    }

    Some(CanonicalColor {
        lightness,
        chroma,
        hue,
        alpha,
    })
}

fn parse_number(text: &str) -> Option<f64> {
    let value = text.parse::<f64>().ok()?;
    // "inf" and "NaN" parse as f64 but are not colors
    value.is_finite().then_some(value)
}

//! Formatting utilities for CLI outputs.

use ansi_term::Colour;

/// Format an hours value with one decimal, optionally with an explicit sign.
pub fn hours2readable(hours: f64, want_sign: bool) -> String {
    let sign = if hours > 0.0 && want_sign {
        "+"
    } else if hours < 0.0 {
        "-"
    } else {
        "" // zero → nessun segno
    };
    format!("{}{:.1}", sign, hours.abs())
}

/// Color a balance figure the way the balance card does: green when
/// positive, red when negative, plain when zero.
pub fn paint_balance(hours: f64) -> String {
    let txt = format!("{} hrs", hours2readable(hours, true));
    if hours > 0.0 {
        Colour::Green.paint(txt).to_string()
    } else if hours < 0.0 {
        Colour::Red.paint(txt).to_string()
    } else {
        txt
    }
}

/// Color credited hours in entry listings.
pub fn paint_credited(hours: f64) -> String {
    let txt = hours2readable(hours, true);
    if hours > 0.0 {
        Colour::Green.paint(txt).to_string()
    } else if hours < 0.0 {
        Colour::Red.paint(txt).to_string()
    } else {
        txt
    }
}

//! ASCII banner with a vertical gradient (CALLSHIELD).

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::ExecutableCommand;
use figlet_rs::FIGfont;
use std::io::{stdout, Write};

/// Guard Amber (#f5a623).
const GUARD_AMBER: (u8, u8, u8) = (0xf5, 0xa6, 0x23);
/// Shield Teal (#1abc9c).
const SHIELD_TEAL: (u8, u8, u8) = (0x1a, 0xbc, 0x9c);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints the welcome banner: "CALLSHIELD" in figlet ASCII with a gradient
/// from Guard Amber to Shield Teal, then version and tagline.
pub fn print_welcome() {
    let mut out = stdout();
    let Ok(font) = FIGfont::standard() else {
        println!("CALLSHIELD v{}", env!("CARGO_PKG_VERSION"));
        return;
    };
    let Some(figure) = font.convert("CALLSHIELD") else {
        println!("CALLSHIELD v{}", env!("CARGO_PKG_VERSION"));
        return;
    };
    let art = figure.to_string();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(GUARD_AMBER, SHIELD_TEAL, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: SHIELD_TEAL.0,
        g: SHIELD_TEAL.1,
        b: SHIELD_TEAL.2,
    }));
    let _ = out.execute(Print(format!("v{}\r\n", version)));
    let _ = out.execute(Print("Scam-call screening for seniors\r\n"));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

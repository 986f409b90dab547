//! Print area and vertex count over a few erode/dilate ticks.
//!
//! Usage:
//!   cargo run -p shapejam --example jam_frames -- in
//!   cargo run -p shapejam --example jam_frames -- out 7
//!
//! Seeds whose draw is not sequenceable are reported; pick another seed.

use shapejam::api::{area, is_simple, SceneCfg, Session};

fn main() {
    let mut args = std::env::args().skip(1);
    let mode = args.next().unwrap_or_else(|| "in".to_string());
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);

    let cfg = SceneCfg::default();
    let mut session = match Session::new(cfg, seed) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("seed {seed}: {e}; try another seed");
            return;
        }
    };
    match mode.as_str() {
        "in" => session.toggle_erode(),
        "out" => session.toggle_dilate(),
        _ => {
            eprintln!("usage: jam_frames [in|out] [seed]");
            return;
        }
    };
    for _ in 0..=20 {
        if session.ticks() % 5 == 0 {
            let poly = session.polygon();
            println!(
                "tick {:>2}: n={}, area={:.1}, simple={}",
                session.ticks(),
                poly.len(),
                area(poly),
                is_simple(poly, cfg.geom.eps)
            );
        }
        if let Err(e) = session.tick() {
            eprintln!("tick failed: {e}");
            return;
        }
    }
}

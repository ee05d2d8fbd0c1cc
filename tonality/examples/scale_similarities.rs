//! Rank the twelve transpositions of a scale by how many tones they share
//! with the untransposed scale.
//!
//! Usage: `cargo run --example scale_similarities -- [tonic] [scale]`
//! e.g. `cargo run --example scale_similarities -- c major`

use tonality::{Scale, ScaleKind, Tone};

fn main() {
    let mut args = std::env::args().skip(1);
    let glyph = args.next().unwrap_or_else(|| "c".to_string());
    let name  = args.next().unwrap_or_else(|| "major".to_string());

    let tonic = match Tone::from_glyph(&glyph, 5) {
        Ok(t)  => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let kind: ScaleKind = match name.parse() {
        Ok(k)  => k,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let base = Scale::new(tonic, kind);
    println!("\nScales most similar to {}:\n", base);

    let mut similarities: Vec<(usize, Scale)> = (0..12)
        .map(|i| {
            let shifted = Scale::new(tonic.transposed(i), kind);
            (base.intersect(&shifted).len(), shifted)
        })
        .collect();
    similarities.sort_by(|a, b| b.0.cmp(&a.0));

    for (shared, scale) in similarities {
        let tones: Vec<String> =
            scale.tones().iter().map(|t| t.glyph().to_string()).collect();
        println!("  {:<14} {} shared   [{}]", scale.to_string(), shared, tones.join(" "));
    }
    println!();
}

use std::fmt::Write as _;

use anyhow::{Context, Result};

const LOW_E: f64 = 0.0;
const HIGH_E: f64 = 0.8;
const STEP: f64 = 0.002;
const SCAN_RATE: f64 = 0.05;
const SENSITIVITY: f64 = 1e-5;
/// Double-layer current (A) of an ideal capacitor at `SCAN_RATE`.
const DOUBLE_LAYER: f64 = 2e-5;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// One sweep from `from` to `to`. Anodic sweeps carry a positive
/// double-layer current plus a redox peak, cathodic ones the mirror image.
fn generate_sweep(
    from: f64,
    to: f64,
    scale: f64,
    noise: f64,
    rng: &mut SimpleRng,
) -> Vec<(f64, f64)> {
    let n = ((to - from).abs() / STEP).round() as usize;
    let dir = (to - from).signum();
    (0..=n)
        .map(|i| {
            let e = from + dir * i as f64 * STEP;
            let peak = if dir > 0.0 {
                gaussian(e, 0.45, 0.05, 1.5e-5)
            } else {
                -gaussian(e, 0.38, 0.05, 1.2e-5)
            };
            let current = scale * (dir * DOUBLE_LAYER + peak) + rng.gauss(0.0, noise);
            (e, current)
        })
        .collect()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Usage: `generate_sample [output.txt] [cycles] [saturated-cycle]`
fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output_path = args.next().unwrap_or_else(|| "sample_cv.txt".to_string());
    let cycles: usize = match args.next() {
        Some(s) => s.parse().context("cycle count must be an integer")?,
        None => 5,
    };
    let saturated: Option<usize> = args
        .next()
        .map(|s| s.parse())
        .transpose()
        .context("saturated cycle must be an integer")?;

    let mut rng = SimpleRng::new(42);
    let mut text = String::new();
    writeln!(text, "Oct. 17, 2026   10:00:00")?;
    writeln!(text, "Cyclic Voltammetry")?;
    writeln!(text, "File: synthetic.bin")?;
    writeln!(text, "Init E (V) = {LOW_E}")?;
    writeln!(text, "High E (V) = {HIGH_E}")?;
    writeln!(text, "Low E (V) = {LOW_E}")?;
    writeln!(text, "Init P/N = P")?;
    writeln!(text, "Scan Rate (V/s) = {SCAN_RATE}")?;
    writeln!(text, "Segment = {}", cycles * 2)?;
    writeln!(text, "Sample Interval (V) = {STEP}")?;
    writeln!(text, "Quiet Time (sec) = 2")?;
    writeln!(text, "Sensitivity (A/V) = {SENSITIVITY:e}")?;
    writeln!(text)?;
    writeln!(text, "Potential/V, Current/A")?;

    for cycle in 1..=cycles {
        // slow drift plus a larger random spread so the outlier pass has work
        let scale = 1.0 + 0.01 * cycle as f64 + rng.gauss(0.0, 0.03);
        let scale = if saturated == Some(cycle) { 8.0 } else { scale };
        let sweeps = [(LOW_E, HIGH_E), (HIGH_E, LOW_E)];
        for (k, &(from, to)) in sweeps.iter().enumerate() {
            writeln!(text, "Segment {}:", 2 * (cycle - 1) + k + 1)?;
            for (e, i) in generate_sweep(from, to, scale, 2e-7, &mut rng) {
                writeln!(text, "{e:.3}, {i:.4e}")?;
            }
        }
    }

    std::fs::write(&output_path, text).with_context(|| format!("writing {output_path}"))?;
    println!("Wrote {cycles} cycles ({} segments) to {output_path}", cycles * 2);
    Ok(())
}

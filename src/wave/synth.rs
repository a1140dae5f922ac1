use std::f64::consts::PI;

use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg32;

use super::Waveform;

/// What to synthesize; one variant per supported wave shape, each carrying
/// only the parameters that shape actually uses.
#[derive(Debug, Clone)]
pub enum WaveShape {
    Sine {
        amp: f64,
        freq: f64,
        phase: f64,
    },
    Cosine {
        amp: f64,
        freq: f64,
        phase: f64,
    },
    /// Gaussian noise scaled so its largest sample magnitude equals `amp`.
    WhiteNoise {
        amp: f64,
        mu: f64,
        sigma: f64,
        seed: u64,
    },
    /// Wake-on-voice fixture: a quiet tone, a silence gap, then a loud tone.
    WovPattern {
        low_amp: f64,
        high_amp: f64,
        low_freq: f64,
        high_freq: f64,
        gap_secs: f64,
    },
}

impl WaveShape {
    /// Short name used to derive default output file names.
    pub fn name(&self) -> &'static str {
        match self {
            WaveShape::Sine { .. } => "sine",
            WaveShape::Cosine { .. } => "cosine",
            WaveShape::WhiteNoise { .. } => "white_noise",
            WaveShape::WovPattern { .. } => "wov_pattern",
        }
    }
}

/// Synthesize `duration` seconds of `shape`, replicating the same data
/// across `channels` channels.
pub fn generate(shape: &WaveShape, sample_rate: u32, channels: usize, duration: f64) -> Waveform {
    let total = (duration * sample_rate as f64) as usize;
    let mono = match *shape {
        WaveShape::Sine { amp, freq, phase } => tone(f64::sin, amp, freq, phase, sample_rate, total),
        WaveShape::Cosine { amp, freq, phase } => {
            tone(f64::cos, amp, freq, phase, sample_rate, total)
        }
        WaveShape::WhiteNoise {
            amp,
            mu,
            sigma,
            seed,
        } => white_noise(amp, mu, sigma, seed, total),
        WaveShape::WovPattern {
            low_amp,
            high_amp,
            low_freq,
            high_freq,
            gap_secs,
        } => wov_pattern(
            low_amp,
            high_amp,
            low_freq,
            high_freq,
            gap_secs,
            sample_rate,
            total,
        ),
    };
    Waveform::new(vec![mono; channels], sample_rate)
}

fn tone(
    osc: fn(f64) -> f64,
    amp: f64,
    freq: f64,
    phase: f64,
    sample_rate: u32,
    total: usize,
) -> Vec<f64> {
    (0..total)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            amp * osc(2.0 * PI * freq * t + phase)
        })
        .collect()
}

fn white_noise(amp: f64, mu: f64, sigma: f64, seed: u64, total: usize) -> Vec<f64> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let normal = Normal::new(mu, sigma.abs()).expect("sigma must be finite");
    let data: Vec<f64> = normal.sample_iter(&mut rng).take(total).collect();
    let peak = data.iter().fold(0.0f64, |acc, s| acc.max(s.abs()));
    if peak == 0.0 {
        return data;
    }
    data.iter().map(|s| amp / peak * s).collect()
}

/// Quiet tone, silence, loud tone; the two tone segments split the
/// remaining duration evenly.
fn wov_pattern(
    low_amp: f64,
    high_amp: f64,
    low_freq: f64,
    high_freq: f64,
    gap_secs: f64,
    sample_rate: u32,
    total: usize,
) -> Vec<f64> {
    let gap = ((gap_secs * sample_rate as f64) as usize).min(total);
    let segment = (total - gap) / 2;

    let mut data = tone(f64::sin, low_amp, low_freq, 0.0, sample_rate, segment);
    data.extend(std::iter::repeat(0.0).take(gap));
    data.extend(tone(f64::sin, high_amp, high_freq, 0.0, sample_rate, segment));
    data.resize(total, 0.0);
    data
}

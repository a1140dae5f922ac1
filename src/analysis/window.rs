use std::f64::consts::PI;

use serde::Deserialize;

/// Analysis window applied to a frame before the FFT.
///
/// These are the periodic (DFT-even) forms used for spectral analysis,
/// with the divisor N rather than the symmetric N-1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    Blackman,
    Hamming,
    Hann,
    Rectangular,
}

impl WindowKind {
    pub fn coefficients(self, size: usize) -> Vec<f64> {
        let n = size as f64;
        (0..size)
            .map(|i| {
                let x = 2.0 * PI * i as f64 / n;
                match self {
                    WindowKind::Blackman => 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos(),
                    WindowKind::Hamming => 0.54 - 0.46 * x.cos(),
                    WindowKind::Hann => 0.5 * (1.0 - x.cos()),
                    WindowKind::Rectangular => 1.0,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blackman_endpoints_and_center() {
        let w = WindowKind::Blackman.coefficients(512);
        assert!(w[0].abs() < 1e-12);
        assert!((w[256] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn hann_starts_at_zero() {
        let w = WindowKind::Hann.coefficients(256);
        assert!(w[0].abs() < 1e-12);
        assert!((w[128] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn hamming_has_nonzero_pedestal() {
        let w = WindowKind::Hamming.coefficients(256);
        assert!((w[0] - 0.08).abs() < 1e-12);
    }

    #[test]
    fn rectangular_is_all_ones() {
        let w = WindowKind::Rectangular.coefficients(64);
        assert!(w.iter().all(|&c| c == 1.0));
    }
}

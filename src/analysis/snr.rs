use crate::wave::EPS;

/// Signal-to-noise ratio between a reference and a measured spectrum, in dB.
///
/// Operates on the *linear* normalized magnitudes, never the dB form. The
/// factor 2 folds the negative-frequency half of a real signal's bilateral
/// spectrum back into the sum.
pub fn snr_db(reference: &[f64], measured: &[f64]) -> f64 {
    debug_assert_eq!(reference.len(), measured.len());

    let signal_power: f64 = reference.iter().map(|r| 2.0 * r * r).sum();
    let noise_power: f64 = reference
        .iter()
        .zip(measured)
        .map(|(r, m)| {
            let noise = m - r;
            2.0 * noise * noise
        })
        .sum();

    10.0 * (signal_power / (noise_power + EPS)).log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spectrum() -> Vec<f64> {
        (0..1_024).map(|i| (i as f64 * 0.013).sin().abs()).collect()
    }

    #[test]
    fn identical_spectra_hit_the_epsilon_ceiling() {
        let reference = spectrum();
        let snr = snr_db(&reference, &reference);
        // noise power is exactly zero, so only EPS bounds the ratio
        assert!(snr > 90.0);
    }

    #[test]
    fn snr_decreases_as_noise_grows() {
        let reference = spectrum();
        let mut previous = f64::INFINITY;
        for noise_amp in [1e-4, 1e-3, 1e-2, 1e-1] {
            let measured: Vec<f64> = reference
                .iter()
                .enumerate()
                .map(|(i, r)| r + noise_amp * if i % 2 == 0 { 1.0 } else { -1.0 })
                .collect();
            let snr = snr_db(&reference, &measured);
            assert!(snr < previous);
            previous = snr;
        }
    }

    #[test]
    fn tenfold_noise_costs_twenty_db() {
        let reference = spectrum();
        let noisy = |amp: f64| -> Vec<f64> { reference.iter().map(|r| r + amp).collect() };
        let low = snr_db(&reference, &noisy(1e-3));
        let high = snr_db(&reference, &noisy(1e-2));
        assert!((low - high - 20.0).abs() < 0.1);
    }
}

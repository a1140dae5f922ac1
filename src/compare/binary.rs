use crate::wave::Waveform;

use super::Verdict;

/// Exact element-wise comparison: channel count, length and every sample
/// value must match. No tolerance, float rounding included.
pub fn compare(wave: &Waveform, reference: &Waveform) -> Verdict {
    if wave.channels() == reference.channels() {
        println!("Recorded wave is binary same as reference wave");
        Verdict::Passed
    } else {
        println!("Recorded wave is not binary same as reference wave");
        Verdict::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::synth::{self, WaveShape};

    fn noise() -> Waveform {
        synth::generate(
            &WaveShape::WhiteNoise {
                amp: 1.0,
                mu: 0.0,
                sigma: 0.2,
                seed: 3,
            },
            48_000,
            2,
            0.2,
        )
    }

    #[test]
    fn identical_waves_pass() {
        let wave = noise();
        assert_eq!(compare(&wave.clone(), &wave), Verdict::Passed);
    }

    #[test]
    fn single_sample_deviation_fails() {
        let reference = noise();
        let mut channels: Vec<Vec<f64>> = reference.channels().to_vec();
        channels[1][1_234] += 1e-9;
        let wave = Waveform::new(channels, reference.sample_rate());
        assert_eq!(compare(&wave, &reference), Verdict::Failed);
    }

    #[test]
    fn different_length_fails() {
        let reference = noise();
        let wave = reference.slice(0, reference.len() - 1);
        assert_eq!(compare(&wave, &reference), Verdict::Failed);
    }
}

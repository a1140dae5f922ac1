mod binary;
mod dsm;
mod freq;
mod wov;

use std::path::Path;

use crate::analysis::window::WindowKind;
use crate::error::WaveError;
use crate::wave::{codec, Waveform};

/// Comparison protocol to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CompareMode {
    /// Spectral comparison: peak consistency plus SNR per channel
    Freq,
    /// Exact element-wise sample equality
    Binary,
    /// Channel-pair equality with a delay-skew budget
    Dsm,
    /// Wake-on-voice timing and frequency extraction
    Wov,
}

/// Knobs shared by the comparison modes.
#[derive(Debug, Clone, Copy)]
pub struct CompareSettings {
    pub fft_size: usize,
    pub peak_threshold_db: f64,
    pub snr_threshold_db: f64,
    pub window: WindowKind,
    pub history_buffer_secs: f64,
}

/// Outcome of one comparison run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed,
    /// Measurements were printed without judging them (wov mode).
    Report,
}

/// Load both waves and run one comparison to its verdict.
pub fn run(
    mode: CompareMode,
    recorded: &Path,
    reference: &Path,
    settings: &CompareSettings,
) -> Result<Verdict, WaveError> {
    let wave = codec::read_wave(recorded)?;
    let reference = codec::read_wave(reference)?;
    compare_waves(mode, &wave, &reference, settings)
}

/// Dispatch on the comparison mode and print the final verdict line.
pub fn compare_waves(
    mode: CompareMode,
    wave: &Waveform,
    reference: &Waveform,
    settings: &CompareSettings,
) -> Result<Verdict, WaveError> {
    if wave.sample_rate() != reference.sample_rate() {
        return Err(WaveError::SampleRateMismatch {
            recorded: wave.sample_rate(),
            reference: reference.sample_rate(),
        });
    }

    let verdict = match mode {
        CompareMode::Binary => binary::compare(wave, reference),
        CompareMode::Freq => freq::compare(wave, reference, settings)?,
        CompareMode::Dsm => dsm::compare(wave, reference)?,
        CompareMode::Wov => wov::compare(wave, reference, settings)?,
    };

    match verdict {
        Verdict::Passed => println!("Wave comparison result: PASSED"),
        Verdict::Failed => println!("Wave comparison result: FAILED"),
        Verdict::Report => {}
    }

    Ok(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::codec::PcmFormat;
    use crate::wave::synth::{self, WaveShape};

    fn settings() -> CompareSettings {
        CompareSettings {
            fft_size: 8_192,
            peak_threshold_db: -50.0,
            snr_threshold_db: 65.0,
            window: WindowKind::Blackman,
            history_buffer_secs: 2.1,
        }
    }

    #[test]
    fn sample_rate_mismatch_is_fatal() {
        let a = synth::generate(
            &WaveShape::Sine {
                amp: 1.0,
                freq: 440.0,
                phase: 0.0,
            },
            48_000,
            2,
            0.1,
        );
        let b = synth::generate(
            &WaveShape::Sine {
                amp: 1.0,
                freq: 440.0,
                phase: 0.0,
            },
            44_100,
            2,
            0.1,
        );
        let err = compare_waves(CompareMode::Binary, &a, &b, &settings()).unwrap_err();
        assert!(matches!(
            err,
            WaveError::SampleRateMismatch {
                recorded: 48_000,
                reference: 44_100
            }
        ));
    }

    #[test]
    fn file_compared_against_its_copy_passes_binary() {
        let wave = synth::generate(
            &WaveShape::Sine {
                amp: 1.0,
                freq: 1_000.0,
                phase: 0.0,
            },
            48_000,
            2,
            0.5,
        );
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("original.wav");
        let copy = dir.path().join("copy.wav");
        codec::write_wave(&original, &wave, PcmFormat::S16).unwrap();
        codec::write_wave(&copy, &wave, PcmFormat::S16).unwrap();

        let verdict = run(CompareMode::Binary, &copy, &original, &settings()).unwrap();
        assert_eq!(verdict, Verdict::Passed);
    }
}

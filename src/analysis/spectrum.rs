use rustfft::{num_complex::Complex, FftPlanner};

use crate::error::WaveError;
use crate::wave::normalize;

use super::window::WindowKind;

/// Half-spectrum of one analysis frame.
///
/// `linear` and `db` are derived independently from the same windowed FFT:
/// SNR works on the linear magnitudes, peak detection on the dB ones.
#[derive(Debug, Clone)]
pub struct Spectrum {
    /// Magnitudes normalized so the strongest bin sits at 1.0.
    pub linear: Vec<f64>,
    /// The same bins as 20·log10 decibels.
    pub db: Vec<f64>,
    /// Width of one FFT bin in Hz.
    pub bin_width: f64,
}

/// A spectral local maximum above the height threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub bin: usize,
    pub height_db: f64,
}

impl Peak {
    pub fn frequency(&self, bin_width: f64) -> f64 {
        self.bin as f64 * bin_width
    }
}

/// Window the first `fft_size` samples of `frame` and compute its
/// normalized half-spectrum.
pub fn analyze_frame(
    frame: &[f64],
    window: WindowKind,
    fft_size: usize,
    sample_rate: u32,
) -> Result<Spectrum, WaveError> {
    if frame.len() < fft_size {
        return Err(WaveError::InsufficientData {
            got: frame.len(),
            fftsize: fft_size,
        });
    }

    let coefficients = window.coefficients(fft_size);
    let mut buffer: Vec<Complex<f64>> = frame[..fft_size]
        .iter()
        .zip(&coefficients)
        .map(|(&s, &w)| Complex::new(s * w, 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_forward(fft_size).process(&mut buffer);

    // real input: the upper half mirrors the lower, keep fft_size/2 bins
    let magnitude: Vec<f64> = buffer[..fft_size / 2].iter().map(|c| c.norm()).collect();
    let linear = normalize(&magnitude);
    let db: Vec<f64> = linear.iter().map(|&m| 20.0 * m.log10()).collect();

    Ok(Spectrum {
        linear,
        db,
        bin_width: sample_rate as f64 / fft_size as f64,
    })
}

/// Local maxima of `values` with height ≥ `min_height`.
///
/// A plateau of equal values counts once, at its midpoint; the first and
/// last samples are never peaks. Matches the detection rule the comparison
/// thresholds were tuned against.
pub fn find_peaks(values: &[f64], min_height: f64) -> Vec<Peak> {
    let mut peaks = Vec::new();
    if values.len() < 3 {
        return peaks;
    }

    let mut i = 1;
    while i < values.len() - 1 {
        if values[i - 1] < values[i] {
            // skip over a possible plateau of equal values
            let mut ahead = i + 1;
            while ahead < values.len() - 1 && values[ahead] == values[i] {
                ahead += 1;
            }
            if values[ahead] < values[i] {
                let bin = (i + ahead - 1) / 2;
                if values[bin] >= min_height {
                    peaks.push(Peak {
                        bin,
                        height_db: values[bin],
                    });
                }
            }
            i = ahead;
        } else {
            i += 1;
        }
    }
    peaks
}

use crate::analysis::boundary::{self, ScanDirection, ZeroRange};
use crate::analysis::spectrum;
use crate::error::WaveError;
use crate::wave::Waveform;

use super::{CompareSettings, Verdict};

/// Measurements extracted from one side of a wake-on-voice capture: the
/// silence gap between the two tone segments, the segment durations, and
/// one frequency estimate per segment.
#[derive(Debug)]
struct WovReadout {
    gap: ZeroRange,
    low_secs: f64,
    high_secs: f64,
    low_freq: f64,
    high_freq: f64,
}

/// Locate the silence gap on both sides and print the timing and tone
/// frequencies of the segments around it. Descriptive only; there is no
/// pass/fail judgement in this mode.
pub fn compare(
    wave: &Waveform,
    reference: &Waveform,
    settings: &CompareSettings,
) -> Result<Verdict, WaveError> {
    if wave.channel_count() < 2 {
        return Err(WaveError::NotEnoughChannels {
            name: "recorded",
            required: 2,
            found: wave.channel_count(),
        });
    }
    if reference.channel_count() < 2 {
        return Err(WaveError::NotEnoughChannels {
            name: "reference",
            required: 2,
            found: reference.channel_count(),
        });
    }

    println!("Analyze reference wave:");
    let readout = analyze_reference(reference, settings)?;
    report(&readout, reference.sample_rate());

    println!("Analyze recorded wave:");
    let sample_rate = wave.sample_rate();
    let (trimmed, delay) = boundary::trim(wave)?;
    println!(
        "Leading silence: {} samples ({:.3}ms)",
        delay,
        delay as f64 / sample_rate as f64 * 1000.0
    );
    let readout = analyze_recorded(&trimmed, settings)?;
    report(&readout, sample_rate);

    Ok(Verdict::Report)
}

/// The reference is aligned, so the gap search starts at the beginning.
fn analyze_reference(
    reference: &Waveform,
    settings: &CompareSettings,
) -> Result<WovReadout, WaveError> {
    let channel = reference.channel(1);
    let gap = boundary::find_zero_range(channel, 0, ScanDirection::Forward)?;
    extract(channel, reference.sample_rate(), gap, settings)
}

/// A capture holds up to the history buffer of audio before the detection
/// point, so the gap is searched backward from that offset.
fn analyze_recorded(
    trimmed: &Waveform,
    settings: &CompareSettings,
) -> Result<WovReadout, WaveError> {
    let channel = trimmed.channel(1);
    let origin = (trimmed.sample_rate() as f64 * settings.history_buffer_secs) as usize;
    let gap = boundary::find_zero_range(channel, origin, ScanDirection::Backward)?;
    extract(channel, trimmed.sample_rate(), gap, settings)
}

fn extract(
    channel: &[f64],
    sample_rate: u32,
    gap: ZeroRange,
    settings: &CompareSettings,
) -> Result<WovReadout, WaveError> {
    // each segment's tone is estimated independently from its own frame
    let low_freq = segment_tone(channel, 0, gap.start, sample_rate, settings)?;
    let high_freq = segment_tone(channel, gap.end, channel.len(), sample_rate, settings)?;
    Ok(WovReadout {
        gap,
        low_secs: gap.start as f64 / sample_rate as f64,
        high_secs: (channel.len() - gap.end) as f64 / sample_rate as f64,
        low_freq,
        high_freq,
    })
}

/// Estimate the tone frequency of `[start, end)` from a single FFT frame
/// centered in the segment. Anything but exactly one detected peak reports
/// a frequency of 0.
fn segment_tone(
    channel: &[f64],
    start: usize,
    end: usize,
    sample_rate: u32,
    settings: &CompareSettings,
) -> Result<f64, WaveError> {
    if channel.len() < settings.fft_size {
        return Err(WaveError::InsufficientData {
            got: channel.len(),
            fftsize: settings.fft_size,
        });
    }
    let center = start + (end - start) / 2;
    let frame_start = center
        .saturating_sub(settings.fft_size / 2)
        .min(channel.len() - settings.fft_size);
    let spectrum = spectrum::analyze_frame(
        &channel[frame_start..],
        settings.window,
        settings.fft_size,
        sample_rate,
    )?;
    let peaks = spectrum::find_peaks(&spectrum.db, settings.peak_threshold_db);
    if peaks.len() == 1 {
        Ok(peaks[0].frequency(spectrum.bin_width))
    } else {
        Ok(0.0)
    }
}

fn report(readout: &WovReadout, sample_rate: u32) {
    let gap_secs = readout.gap.len() as f64 / sample_rate as f64;
    println!(
        "Silence gap at [{}:{}] ({:.3}s)",
        readout.gap.start, readout.gap.end, gap_secs
    );
    println!(
        "Low-volume sine: {:.3}s at {:.3}Hz",
        readout.low_secs, readout.low_freq
    );
    println!(
        "High-volume sine: {:.3}s at {:.3}Hz",
        readout.high_secs, readout.high_freq
    );
}

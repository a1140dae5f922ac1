use crate::error::WaveError;
use crate::wave::Waveform;

/// Amplitude at or below which a sample counts as silence, in the
/// normalized domain. Equivalent to a magnitude of 100 at 16-bit scale,
/// so float and dithered captures still trim sanely.
pub const SILENCE_FLOOR: f64 = 100.0 / 32768.0;

/// Coarse step of the silence-gap scan, in samples.
const SCAN_STEP: usize = 100;

/// Contiguous near-silent region, half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroRange {
    pub start: usize,
    pub end: usize,
}

impl ZeroRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    Forward,
    Backward,
}

fn is_silent(sample: f64) -> bool {
    sample.abs() <= SILENCE_FLOOR
}

/// Cut leading and trailing silence off `wave`, scanning channel 0.
///
/// Returns the trimmed waveform and the left offset in samples; the offset
/// doubles as a delay measurement for the capture path.
pub fn trim(wave: &Waveform) -> Result<(Waveform, usize), WaveError> {
    let mono = wave.channel(0);
    let left = mono
        .iter()
        .position(|&s| !is_silent(s))
        .ok_or(WaveError::AllSilent)?;
    let right = mono
        .iter()
        .rposition(|&s| !is_silent(s))
        .ok_or(WaveError::AllSilent)?;
    Ok((wave.slice(left, right + 1), left))
}

/// Locate a silence gap in `channel`, starting the coarse scan at `origin`.
///
/// Scans [`SCAN_STEP`]-sample windows forward (or backward, toward
/// decreasing indices) until one is entirely silent, then widens both edges
/// sample-by-sample to the tightest enclosing `[start, end)` range.
pub fn find_zero_range(
    channel: &[f64],
    origin: usize,
    direction: ScanDirection,
) -> Result<ZeroRange, WaveError> {
    let window = match direction {
        ScanDirection::Forward => scan_forward(channel, origin),
        ScanDirection::Backward => scan_backward(channel, origin),
    }
    .ok_or(WaveError::NoZeroRange)?;

    let mut start = window;
    while start > 0 && is_silent(channel[start - 1]) {
        start -= 1;
    }
    let mut end = window + SCAN_STEP;
    while end < channel.len() && is_silent(channel[end]) {
        end += 1;
    }
    Ok(ZeroRange { start, end })
}

fn scan_forward(channel: &[f64], origin: usize) -> Option<usize> {
    let mut start = origin;
    while start + SCAN_STEP <= channel.len() {
        if channel[start..start + SCAN_STEP].iter().all(|&s| is_silent(s)) {
            return Some(start);
        }
        start += SCAN_STEP;
    }
    None
}

fn scan_backward(channel: &[f64], origin: usize) -> Option<usize> {
    let mut end = origin.min(channel.len());
    while end >= SCAN_STEP {
        let start = end - SCAN_STEP;
        if channel[start..end].iter().all(|&s| is_silent(s)) {
            return Some(start);
        }
        end = start;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::synth::{self, WaveShape};

    fn padded_tone(leading: usize, trailing: usize) -> Waveform {
        let tone = synth::generate(
            &WaveShape::Cosine {
                amp: 0.5,
                freq: 440.0,
                phase: 0.0,
            },
            8_000,
            2,
            0.5,
        );
        let channels = tone
            .channels()
            .iter()
            .map(|c| {
                let mut padded = vec![0.0; leading];
                padded.extend_from_slice(c);
                padded.extend(std::iter::repeat(0.0).take(trailing));
                padded
            })
            .collect();
        Waveform::new(channels, 8_000)
    }

    #[test]
    fn trim_reports_leading_silence_as_delay() {
        let wave = padded_tone(750, 300);
        let (trimmed, delay) = trim(&wave).unwrap();
        assert_eq!(delay, 750);
        assert_eq!(trimmed.len(), 4_000);
        assert_eq!(trimmed.channel_count(), 2);
    }

    #[test]
    fn trim_is_idempotent() {
        let wave = padded_tone(123, 456);
        let (once, _) = trim(&wave).unwrap();
        let (twice, delay) = trim(&once).unwrap();
        assert_eq!(delay, 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn trim_without_leading_silence_has_zero_offset() {
        let wave = padded_tone(0, 200);
        let (_, delay) = trim(&wave).unwrap();
        assert_eq!(delay, 0);
    }

    #[test]
    fn trim_of_pure_silence_fails() {
        let wave = Waveform::new(vec![vec![0.0; 1_000]], 8_000);
        assert!(matches!(trim(&wave), Err(WaveError::AllSilent)));
    }

    fn gapped_channel() -> Vec<f64> {
        // tone, 2000 samples of silence, tone; the phase offset keeps every
        // tone sample well above the silence floor
        let tone = synth::generate(
            &WaveShape::Sine {
                amp: 0.9,
                freq: 1_000.0,
                phase: 0.25,
            },
            8_000,
            1,
            1.0,
        );
        let mut channel = tone.channel(0).to_vec();
        channel.extend(std::iter::repeat(0.0).take(2_000));
        channel.extend_from_slice(tone.channel(0));
        channel
    }

    #[test]
    fn forward_scan_finds_the_gap() {
        let channel = gapped_channel();
        let range = find_zero_range(&channel, 0, ScanDirection::Forward).unwrap();
        assert_eq!(range.start, 8_000);
        assert_eq!(range.end, 10_000);
        assert_eq!(range.len(), 2_000);
    }

    #[test]
    fn backward_scan_finds_the_gap_behind_the_origin() {
        let channel = gapped_channel();
        let range = find_zero_range(&channel, 15_000, ScanDirection::Backward).unwrap();
        assert_eq!(range.start, 8_000);
        assert_eq!(range.end, 10_000);
    }

    #[test]
    fn scan_without_gap_fails() {
        let tone = synth::generate(
            &WaveShape::Sine {
                amp: 0.9,
                freq: 1_000.0,
                phase: 0.0,
            },
            8_000,
            1,
            1.0,
        );
        let result = find_zero_range(tone.channel(0), 0, ScanDirection::Forward);
        assert!(matches!(result, Err(WaveError::NoZeroRange)));
    }
}

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::WaveError;

use super::Waveform;

/// PCM sample formats supported on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PcmFormat {
    S8,
    S16,
    S32,
    F32,
}

impl PcmFormat {
    fn spec(self, channels: u16, sample_rate: u32) -> WavSpec {
        let (bits_per_sample, sample_format) = match self {
            PcmFormat::S8 => (8, SampleFormat::Int),
            PcmFormat::S16 => (16, SampleFormat::Int),
            PcmFormat::S32 => (32, SampleFormat::Int),
            PcmFormat::F32 => (32, SampleFormat::Float),
        };
        WavSpec {
            channels,
            sample_rate,
            bits_per_sample,
            sample_format,
        }
    }
}

/// Read a PCM WAV file into normalized per-channel buffers.
///
/// Integer samples are divided by their format's full-scale maximum, the
/// inverse of the scaling [`write_wave`] applies.
pub fn read_wave(path: &Path) -> Result<Waveform, WaveError> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    let interleaved: Vec<f64> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 8) => reader
            .samples::<i8>()
            .map(|s| s.map(|v| v as f64 / i8::MAX as f64))
            .collect::<Result<_, _>>()?,
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f64 / i16::MAX as f64))
            .collect::<Result<_, _>>()?,
        (SampleFormat::Int, 32) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f64 / i32::MAX as f64))
            .collect::<Result<_, _>>()?,
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()?,
        (format, bits) => {
            return Err(WaveError::UnsupportedFormat(format!(
                "{bits}-bit {format:?} PCM"
            )))
        }
    };

    let channel_count = spec.channels as usize;
    let frames = interleaved.len() / channel_count;
    let mut channels: Vec<Vec<f64>> = (0..channel_count)
        .map(|_| Vec::with_capacity(frames))
        .collect();
    for frame in interleaved.chunks_exact(channel_count) {
        for (channel, &sample) in channels.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }

    log::debug!(
        "read {}: {} channels, {} samples, {} Hz",
        path.display(),
        channel_count,
        frames,
        spec.sample_rate
    );

    Ok(Waveform::new(channels, spec.sample_rate))
}

/// Write a waveform as PCM WAV, quantizing to the requested format.
///
/// Integer quantization multiplies the [-1, 1] buffer by the full-scale
/// integer maximum and truncates toward zero.
pub fn write_wave(path: &Path, wave: &Waveform, format: PcmFormat) -> Result<(), WaveError> {
    let spec = format.spec(wave.channel_count() as u16, wave.sample_rate());
    let mut writer = WavWriter::create(path, spec)?;

    for frame in 0..wave.len() {
        for channel in wave.channels() {
            let sample = channel[frame];
            match format {
                PcmFormat::S8 => writer.write_sample((sample * i8::MAX as f64) as i8)?,
                PcmFormat::S16 => writer.write_sample((sample * i16::MAX as f64) as i16)?,
                PcmFormat::S32 => writer.write_sample((sample * i32::MAX as f64) as i32)?,
                PcmFormat::F32 => writer.write_sample(sample as f32)?,
            }
        }
    }

    writer.finalize()?;
    Ok(())
}

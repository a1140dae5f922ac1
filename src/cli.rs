use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::analysis::window::WindowKind;
use crate::compare::CompareMode;
use crate::wave::codec::PcmFormat;

#[derive(Parser, Debug)]
#[command(name = "wavecheck")]
#[command(about = "Generate and verify reference waveforms for audio regression tests")]
pub struct Cli {
    /// Config file (defaults to ./wavecheck.toml or the user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synthesize a test waveform and write it as PCM WAV
    Generate {
        /// Wave shape to synthesize
        #[arg(long, value_enum)]
        wave: WaveType,

        /// Peak amplitude, 0.0-1.0
        #[arg(long, default_value_t = 1.0)]
        amp: f64,

        /// Tone frequency in Hz (mean of the distribution for white noise)
        #[arg(long, default_value_t = 1000.0)]
        freq: f64,

        /// Frequency of the loud wov segment in Hz
        #[arg(long, default_value_t = 2000.0)]
        freq2: f64,

        /// Phase offset in radians (standard deviation for white noise)
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        phase: f64,

        /// Sample rate in Hz
        #[arg(long, default_value_t = 48000)]
        rate: u32,

        /// Channel count; every channel carries the same data
        #[arg(long, default_value_t = 2)]
        channels: usize,

        /// On-disk sample format
        #[arg(long, value_enum, default_value = "s16")]
        format: PcmFormat,

        /// Duration in seconds
        #[arg(long, default_value_t = 10.0)]
        duration: f64,

        /// Silence gap length for the wov pattern, seconds
        #[arg(long, default_value_t = 0.5)]
        gap: f64,

        /// PRNG seed for white noise
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Output .wav path, or a directory to use a derived file name
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Write one of the commonly used fixture waveforms
    Preset {
        #[arg(value_enum)]
        name: PresetName,

        /// Directory to store the generated file
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Compare a recorded wave against a reference wave
    Compare {
        /// Comparison protocol
        #[arg(value_enum)]
        mode: CompareMode,

        /// Recorded (candidate) wave
        recorded: PathBuf,

        /// Reference wave
        reference: PathBuf,

        /// FFT length used by spectral analysis
        #[arg(short, long, default_value_t = 8192)]
        fftsize: usize,

        /// Minimum height for a spectral peak, dB
        #[arg(short, long, default_value_t = -50.0, allow_hyphen_values = true)]
        threshold: f64,

        /// Acceptable SNR threshold, dB
        #[arg(short = 'T', long, default_value_t = 65.0)]
        snr_threshold: f64,

        /// Window function used in the FFT transform
        #[arg(short, long, value_enum, default_value = "blackman")]
        window: WindowKind,

        /// Wake-on-voice history buffer size, seconds
        #[arg(long, default_value_t = 2.1)]
        history_buffer: f64,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum WaveType {
    Sine,
    Cosine,
    WhiteNoise,
    WovPattern,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum PresetName {
    /// 1 kHz stereo sine, 48 kHz S16, 10 seconds
    #[value(name = "sine-1k-10s")]
    Sine1k10s,
    /// Gaussian white noise, sigma 0.2, 48 kHz stereo S16, 10 seconds
    #[value(name = "white-noise")]
    WhiteNoise,
}

mod analysis;
mod cli;
mod compare;
mod config;
mod error;
mod wave;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use analysis::window::WindowKind;
use cli::{Cli, Command, PresetName, WaveType};
use compare::CompareSettings;
use wave::codec::{self, PcmFormat};
use wave::synth::{self, WaveShape};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    // Load config: explicit --config path, or auto-detect wavecheck.toml / global config
    let config_path = cli.config.clone().or_else(|| {
        let local = PathBuf::from("wavecheck.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(home) = dirs::home_dir() {
            let xdg = home.join(".config").join("wavecheck").join("config.toml");
            if xdg.exists() {
                return Some(xdg);
            }
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("wavecheck").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });
    let file_config = config_path.as_ref().and_then(|path| match config::load_config(path) {
        Some(cfg) => {
            log::info!("Loaded config from {}", path.display());
            Some(cfg)
        }
        None => {
            log::warn!("Failed to load config from {}", path.display());
            None
        }
    });

    match cli.command {
        Command::Generate {
            wave,
            amp,
            freq,
            freq2,
            phase,
            rate,
            channels,
            format,
            duration,
            gap,
            seed,
            output,
        } => {
            let shape = match wave {
                WaveType::Sine => WaveShape::Sine { amp, freq, phase },
                WaveType::Cosine => WaveShape::Cosine { amp, freq, phase },
                WaveType::WhiteNoise => WaveShape::WhiteNoise {
                    amp,
                    mu: freq,
                    sigma: phase,
                    seed,
                },
                WaveType::WovPattern => WaveShape::WovPattern {
                    low_amp: 0.1 * amp,
                    high_amp: amp,
                    low_freq: freq,
                    high_freq: freq2,
                    gap_secs: gap,
                },
            };
            generate_wave(&shape, rate, channels, duration, format, &output)
        }
        Command::Preset { name, output } => {
            let (shape, rate, channels, duration, format) = preset(name);
            generate_wave(&shape, rate, channels, duration, format, &output)
        }
        Command::Compare {
            mode,
            recorded,
            reference,
            mut fftsize,
            mut threshold,
            mut snr_threshold,
            mut window,
            mut history_buffer,
        } => {
            if let Some(cfg) = file_config {
                // Merge: config values apply only when the CLI is at its default
                if fftsize == 8192 {
                    fftsize = cfg.analysis.fftsize;
                }
                if threshold == -50.0 {
                    threshold = cfg.analysis.peak_threshold_db;
                }
                if snr_threshold == 65.0 {
                    snr_threshold = cfg.analysis.snr_threshold_db;
                }
                if window == WindowKind::Blackman {
                    window = cfg.analysis.window;
                }
                if history_buffer == 2.1 {
                    history_buffer = cfg.wov.history_buffer_secs;
                }
            }

            if !recorded.exists() {
                anyhow::bail!("Recorded wave path not exist: {}", recorded.display());
            }
            if !reference.exists() {
                anyhow::bail!("Reference wave path not exist: {}", reference.display());
            }

            let settings = CompareSettings {
                fft_size: fftsize,
                peak_threshold_db: threshold,
                snr_threshold_db: snr_threshold,
                window,
                history_buffer_secs: history_buffer,
            };
            log::info!(
                "Comparing {} against {}",
                recorded.display(),
                reference.display()
            );
            compare::run(mode, &recorded, &reference, &settings)
                .context("wave comparison failed")?;
            Ok(())
        }
    }
}

fn preset(name: PresetName) -> (WaveShape, u32, usize, f64, PcmFormat) {
    match name {
        PresetName::Sine1k10s => (
            WaveShape::Sine {
                amp: 1.0,
                freq: 1000.0,
                phase: 0.0,
            },
            48_000,
            2,
            10.0,
            PcmFormat::S16,
        ),
        PresetName::WhiteNoise => (
            WaveShape::WhiteNoise {
                amp: 1.0,
                mu: 0.0,
                sigma: 0.2,
                seed: 0,
            },
            48_000,
            2,
            10.0,
            PcmFormat::S16,
        ),
    }
}

fn generate_wave(
    shape: &WaveShape,
    rate: u32,
    channels: usize,
    duration: f64,
    format: PcmFormat,
    output: &Path,
) -> Result<()> {
    let wave = synth::generate(shape, rate, channels, duration);
    let path = resolve_output(shape, rate, channels, output);
    codec::write_wave(&path, &wave, format)
        .with_context(|| format!("Path specified not valid: {}", path.display()))?;
    log::info!(
        "Wrote {} ({:.1}s, {} channels, {} Hz)",
        path.display(),
        wave.duration_secs(),
        channels,
        rate
    );
    Ok(())
}

/// A directory output gets a file name derived from the wave parameters.
fn resolve_output(shape: &WaveShape, rate: u32, channels: usize, output: &Path) -> PathBuf {
    if output.extension().map_or(false, |ext| ext == "wav") {
        return output.to_path_buf();
    }
    let name = match *shape {
        WaveShape::Sine { freq, .. } | WaveShape::Cosine { freq, .. } => {
            format!("{}{}ch{}Hz{}.wav", shape.name(), channels, freq, rate)
        }
        WaveShape::WhiteNoise { mu, sigma, .. } => {
            format!("{}{}ch{}mean{}std{}.wav", shape.name(), channels, mu, sigma, rate)
        }
        WaveShape::WovPattern {
            low_freq,
            high_freq,
            ..
        } => {
            format!(
                "{}{}ch{}Hz{}Hz{}.wav",
                shape.name(),
                channels,
                low_freq,
                high_freq,
                rate
            )
        }
    };
    output.join(name)
}

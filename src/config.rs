use serde::Deserialize;
use std::path::PathBuf;

use crate::analysis::window::WindowKind;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub wov: WovConfig,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_fftsize")]
    pub fftsize: usize,
    #[serde(default = "default_peak_threshold")]
    pub peak_threshold_db: f64,
    #[serde(default = "default_snr_threshold")]
    pub snr_threshold_db: f64,
    #[serde(default = "default_window")]
    pub window: WindowKind,
}

#[derive(Debug, Deserialize)]
pub struct WovConfig {
    #[serde(default = "default_history_buffer")]
    pub history_buffer_secs: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fftsize: default_fftsize(),
            peak_threshold_db: default_peak_threshold(),
            snr_threshold_db: default_snr_threshold(),
            window: default_window(),
        }
    }
}

impl Default for WovConfig {
    fn default() -> Self {
        Self {
            history_buffer_secs: default_history_buffer(),
        }
    }
}

fn default_fftsize() -> usize { 8192 }
fn default_peak_threshold() -> f64 { -50.0 }
fn default_snr_threshold() -> f64 { 65.0 }
fn default_window() -> WindowKind { WindowKind::Blackman }
fn default_history_buffer() -> f64 { 2.1 }

pub fn load_config(path: &PathBuf) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.analysis.fftsize, 8192);
        assert_eq!(config.analysis.peak_threshold_db, -50.0);
        assert_eq!(config.analysis.snr_threshold_db, 65.0);
        assert_eq!(config.analysis.window, WindowKind::Blackman);
        assert_eq!(config.wov.history_buffer_secs, 2.1);
    }

    #[test]
    fn partial_config_overrides_only_named_fields() {
        let config: Config =
            toml::from_str("[analysis]\nfftsize = 4096\nwindow = \"hann\"\n").unwrap();
        assert_eq!(config.analysis.fftsize, 4096);
        assert_eq!(config.analysis.window, WindowKind::Hann);
        assert_eq!(config.analysis.snr_threshold_db, 65.0);
    }
}

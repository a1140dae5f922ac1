use thiserror::Error;

/// Errors that abort a comparison or generation run before a verdict exists.
///
/// Peak mismatches and low SNR are not errors; they are negative evidence
/// folded into the printed verdict, and the process still exits 0.
#[derive(Debug, Error)]
pub enum WaveError {
    /// On-disk sample format the codec does not handle.
    #[error("unsupported wave format: {0}")]
    UnsupportedFormat(String),

    #[error("sample rate of recorded wave ({recorded} Hz) and reference wave ({reference} Hz) is not the same")]
    SampleRateMismatch { recorded: u32, reference: u32 },

    #[error("{name} wave data should be longer than {min_secs} seconds")]
    TooShort { name: &'static str, min_secs: u32 },

    #[error("{name} wave has {found} channels, mode needs at least {required}")]
    NotEnoughChannels {
        name: &'static str,
        required: usize,
        found: usize,
    },

    /// A boundary scan ran over the whole channel without finding signal.
    #[error("channel contains only silence, nothing to trim")]
    AllSilent,

    /// A silence-gap scan exhausted the channel without finding a gap.
    #[error("no silence gap found in channel")]
    NoZeroRange,

    #[error("frame of {got} samples is shorter than fftsize {fftsize}")]
    InsufficientData { got: usize, fftsize: usize },

    #[error("wav codec error: {0}")]
    Codec(#[from] hound::Error),
}

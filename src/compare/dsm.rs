use crate::analysis::boundary;
use crate::error::WaveError;
use crate::wave::Waveform;

use super::Verdict;

/// The capture rigs this mode serves run at 48 kHz, so the skew budget is
/// expressed against that rate regardless of the file header.
const SKEW_RATE_HZ: f64 = 48_000.0;

/// Maximum allowed skew between the two channel pairs, in milliseconds.
/// The comparison is signed: a pair-two lead of any size passes.
const MAX_SKEW_MS: f64 = 5.0;

/// Trim both candidate channel pairs and the reference to their active
/// regions, then require bit-exact pair content and a small delay skew.
pub fn compare(wave: &Waveform, reference: &Waveform) -> Result<Verdict, WaveError> {
    if wave.channel_count() < 4 {
        return Err(WaveError::NotEnoughChannels {
            name: "recorded",
            required: 4,
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

    // the reference content lives in its first channel pair
    let (trimmed_ref, _) = boundary::trim(&reference.channel_range(0, 2))?;

    let (pair_a, delay_a) = boundary::trim(&wave.channel_range(0, 2))?;
    let equal_a = matches_reference(&trimmed_ref, &pair_a);
    let (pair_b, delay_b) = boundary::trim(&wave.channel_range(2, 4))?;
    let equal_b = matches_reference(&trimmed_ref, &pair_b);

    let skew_ms = (delay_b as f64 - delay_a as f64) / SKEW_RATE_HZ * 1000.0;
    println!("DSM delay is {:.3}ms", skew_ms);

    if equal_a && equal_b && skew_ms < MAX_SKEW_MS {
        println!("Recorded wave is binary same as reference wave");
        Ok(Verdict::Passed)
    } else {
        println!("Recorded wave is not binary same as reference wave");
        Ok(Verdict::Failed)
    }
}

/// Compare a trimmed channel pair against the reference, cut to the pair's
/// length.
fn matches_reference(reference: &Waveform, pair: &Waveform) -> bool {
    if reference.len() < pair.len() {
        return false;
    }
    reference.slice(0, pair.len()).channels() == pair.channels()
}

//! Audio-energy scalar and the smoothing that produces it.
//!
//! Frontends feed byte-scaled frequency bins (WebAudio's
//! `getByteFrequencyData` layout) into an [`AudioMeter`]; the animation loop
//! reads the published level through an [`AudioLevel`] handle.

use crate::constants::*;
use crate::smoother::SharedScalar;
use std::sync::Arc;

/// Shared, continuously updated audio energy. Readers never mutate it.
#[derive(Clone, Debug, Default)]
pub struct AudioLevel(Arc<SharedScalar>);

impl AudioLevel {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.0.load()
    }

    #[inline]
    fn set(&self, value: f32) {
        self.0.store(value);
    }
}

/// Mean of the bins divided by [`AUDIO_BYTE_NORMALIZER`].
pub fn normalized_byte_average(bins: &[u8]) -> Option<f32> {
    if bins.is_empty() {
        return None;
    }
    let sum: u32 = bins.iter().map(|b| u32::from(*b)).sum();
    Some(sum as f32 / bins.len() as f32 / AUDIO_BYTE_NORMALIZER)
}

/// Exponential moving average over frames of frequency data.
#[derive(Debug)]
pub struct AudioMeter {
    level: AudioLevel,
    smoothing: f32,
    current: f32,
}

impl AudioMeter {
    pub fn new(level: AudioLevel) -> Self {
        Self::with_smoothing(level, AUDIO_SMOOTHING_GAIN)
    }

    pub fn with_smoothing(level: AudioLevel, smoothing: f32) -> Self {
        let current = level.get();
        Self {
            level,
            smoothing: smoothing.clamp(0.0, 1.0),
            current,
        }
    }

    pub fn level(&self) -> &AudioLevel {
        &self.level
    }

    /// Fold one frame of byte bins into the level and publish it.
    pub fn update_from_bytes(&mut self, bins: &[u8]) -> f32 {
        if let Some(normalized) = normalized_byte_average(bins) {
            self.current += (normalized - self.current) * self.smoothing;
            self.level.set(self.current);
        }
        self.current
    }

    /// Silence the level, e.g. when the microphone is switched off.
    pub fn reset(&mut self) {
        self.current = 0.0;
        self.level.set(0.0);
    }
}

/// Turns raw FFT magnitudes into the byte bins a WebAudio `AnalyserNode`
/// would report, including its inter-frame smoothing.
#[derive(Debug, Clone)]
pub struct ByteSpectrum {
    fft_size: usize,
    smoothing: f32,
    smoothed: Vec<f32>,
    bytes: Vec<u8>,
}

impl Default for ByteSpectrum {
    fn default() -> Self {
        Self::new(ANALYSER_FFT_SIZE)
    }
}

impl ByteSpectrum {
    pub fn new(fft_size: usize) -> Self {
        let bins = fft_size / 2;
        Self {
            fft_size: fft_size.max(2),
            smoothing: ANALYSER_SMOOTHING,
            smoothed: vec![0.0; bins],
            bytes: vec![0; bins],
        }
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn bin_count(&self) -> usize {
        self.smoothed.len()
    }

    /// `magnitudes` are `|X[k]|` for `k` in `0..bin_count()`; extra entries
    /// are ignored.
    pub fn update(&mut self, magnitudes: &[f32]) -> &[u8] {
        let scale = 1.0 / self.fft_size as f32;
        for (k, m) in magnitudes.iter().take(self.smoothed.len()).enumerate() {
            let s = self.smoothing * self.smoothed[k] + (1.0 - self.smoothing) * m * scale;
            self.smoothed[k] = s;
            self.bytes[k] = db_to_byte(amplitude_to_db(s));
        }
        &self.bytes
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[inline]
pub fn amplitude_to_db(amplitude: f32) -> f32 {
    if amplitude <= 0.0 {
        f32::NEG_INFINITY
    } else {
        20.0 * amplitude.log10()
    }
}

/// Linear map of \[min_db, max_db\] onto 0..=255, clamped.
#[inline]
pub fn db_to_byte(db: f32) -> u8 {
    let t = (db - ANALYSER_MIN_DB) / (ANALYSER_MAX_DB - ANALYSER_MIN_DB);
    if t.is_nan() {
        return 0;
    }
    (t.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_average_normalizes_by_128() {
        assert_eq!(normalized_byte_average(&[]), None);
        assert_eq!(normalized_byte_average(&[128, 128]), Some(1.0));
        let loud = normalized_byte_average(&[255; 8]).unwrap_or_default();
        assert!((loud - 255.0 / 128.0).abs() < 1e-6);
    }

    #[test]
    fn meter_eases_toward_input_and_publishes() {
        let level = AudioLevel::new();
        let mut meter = AudioMeter::new(level.clone());
        let first = meter.update_from_bytes(&[128; 16]);
        assert!((first - 0.2).abs() < 1e-6);
        assert_eq!(level.get(), first);
        for _ in 0..100 {
            meter.update_from_bytes(&[128; 16]);
        }
        assert!((level.get() - 1.0).abs() < 1e-3);
        meter.reset();
        assert_eq!(level.get(), 0.0);
    }

    #[test]
    fn empty_frame_keeps_level() {
        let level = AudioLevel::new();
        let mut meter = AudioMeter::new(level.clone());
        meter.update_from_bytes(&[64; 4]);
        let before = level.get();
        meter.update_from_bytes(&[]);
        assert_eq!(level.get(), before);
    }

    #[test]
    fn db_mapping_matches_analyser_range() {
        assert_eq!(db_to_byte(-120.0), 0);
        assert_eq!(db_to_byte(ANALYSER_MIN_DB), 0);
        assert_eq!(db_to_byte(ANALYSER_MAX_DB), 255);
        assert_eq!(db_to_byte(0.0), 255);
        assert_eq!(db_to_byte(f32::NEG_INFINITY), 0);
        assert_eq!(db_to_byte(-65.0), 128);
    }

    #[test]
    fn spectrum_smooths_between_frames() {
        let mut spectrum = ByteSpectrum::new(8);
        assert_eq!(spectrum.bin_count(), 4);
        // 0.08 / 8 = 0.01 settles at -40 dB
        let tone = [0.08; 4];
        let first = spectrum.update(&tone)[0];
        let mut last = first;
        for _ in 0..30 {
            last = spectrum.update(&tone)[0];
        }
        assert!(last > first, "{first} -> {last}");
        assert!((217..=220).contains(&last), "{last}");
        for _ in 0..200 {
            spectrum.update(&[0.0; 4]);
        }
        assert_eq!(spectrum.bytes()[0], 0);
    }
}

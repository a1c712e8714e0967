use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use kinetic_core::{AudioLevel, AudioMeter, ByteSpectrum, ANALYSER_FFT_SIZE};
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

/// How often the analyser runs, to match a browser sampling once per frame.
const ANALYSES_PER_SEC: u32 = 60;

/// Rolling 256-sample window analysed the way a WebAudio `AnalyserNode`
/// would be, feeding an [`AudioMeter`].
pub struct SpectrumAnalyser {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    history: Vec<f32>,
    write_pos: usize,
    hop: usize,
    since_last: usize,
    scratch: Vec<Complex<f32>>,
    magnitudes: Vec<f32>,
    spectrum: ByteSpectrum,
    meter: AudioMeter,
}

impl SpectrumAnalyser {
    pub fn new(sample_rate: u32, level: AudioLevel) -> Self {
        let n = ANALYSER_FFT_SIZE;
        let fft = FftPlanner::<f32>::new().plan_fft_forward(n);
        let spectrum = ByteSpectrum::new(n);
        Self {
            fft,
            window: (0..n).map(|i| hann_window(i, n)).collect(),
            history: vec![0.0; n],
            write_pos: 0,
            hop: (sample_rate / ANALYSES_PER_SEC).max(1) as usize,
            since_last: 0,
            scratch: vec![Complex::new(0.0, 0.0); n],
            magnitudes: vec![0.0; spectrum.bin_count()],
            spectrum,
            meter: AudioMeter::new(level),
        }
    }

    pub fn level(&self) -> &AudioLevel {
        self.meter.level()
    }

    /// Feed mono samples; runs one analysis every `hop` samples.
    pub fn push(&mut self, samples: impl IntoIterator<Item = f32>) {
        let n = self.history.len();
        for s in samples {
            self.history[self.write_pos] = if s.is_finite() { s } else { 0.0 };
            self.write_pos = (self.write_pos + 1) % n;
            self.since_last += 1;
            if self.since_last >= self.hop {
                self.since_last = 0;
                self.analyse();
            }
        }
    }

    fn analyse(&mut self) {
        let n = self.history.len();
        // oldest sample first
        for i in 0..n {
            let s = self.history[(self.write_pos + i) % n];
            self.scratch[i] = Complex::new(s * self.window[i], 0.0);
        }
        self.fft.process(&mut self.scratch);
        for (m, c) in self.magnitudes.iter_mut().zip(&self.scratch) {
            *m = c.norm();
        }
        let bytes = self.spectrum.update(&self.magnitudes);
        self.meter.update_from_bytes(bytes);
    }
}

pub fn hann_window(index: usize, size: usize) -> f32 {
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}

/// Open microphone stream. Dropping it stops capture.
pub struct MicInput {
    _stream: cpal::Stream,
    level: AudioLevel,
}

impl MicInput {
    pub fn level(&self) -> AudioLevel {
        self.level.clone()
    }
}

pub fn start_microphone() -> anyhow::Result<MicInput> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| anyhow::anyhow!("no input device"))?;
    let config = device.default_input_config()?;
    let sample_rate = config.sample_rate().0;
    let channels = config.channels() as usize;
    log::info!(
        "[audio] input {} at {} Hz, {} ch, {:?}",
        device.name().unwrap_or_else(|_| "<unnamed>".into()),
        sample_rate,
        channels,
        config.sample_format()
    );

    let level = AudioLevel::new();
    let analyser = SpectrumAnalyser::new(sample_rate, level.clone());
    let err_fn = |err: cpal::StreamError| log::error!("[audio] input stream error: {err}");

    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => {
            build_input::<f32>(&device, &config.into(), channels, analyser, err_fn)?
        }
        cpal::SampleFormat::I16 => {
            build_input::<i16>(&device, &config.into(), channels, analyser, err_fn)?
        }
        cpal::SampleFormat::U16 => {
            build_input::<u16>(&device, &config.into(), channels, analyser, err_fn)?
        }
        other => anyhow::bail!("unsupported sample format {other:?}"),
    };
    stream.play()?;
    Ok(MicInput {
        _stream: stream,
        level,
    })
}

fn build_input<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    mut analyser: SpectrumAnalyser,
    err_fn: impl FnMut(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: cpal::SizedSample,
    f32: cpal::FromSample<T>,
{
    let channels = channels.max(1);
    device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            let mono = data.chunks(channels).map(|frame| {
                frame
                    .iter()
                    .map(|s| cpal::Sample::to_sample::<f32>(*s))
                    .sum::<f32>()
                    / channels as f32
            });
            analyser.push(mono);
        },
        err_fn,
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hann_window_shape() {
        let size = 256;
        assert!(hann_window(0, size).abs() < 0.01);
        assert!(hann_window(size - 1, size).abs() < 0.01);
        assert!((hann_window(size / 2, size) - 1.0).abs() < 0.01);
    }

    #[test]
    fn silence_keeps_level_at_zero() {
        let mut a = SpectrumAnalyser::new(48_000, AudioLevel::new());
        a.push(std::iter::repeat(0.0).take(48_000));
        assert_eq!(a.level().get(), 0.0);
    }

    #[test]
    fn loud_tone_raises_level() {
        let mut a = SpectrumAnalyser::new(48_000, AudioLevel::new());
        let tone = (0..48_000).map(|i| (2.0 * PI * 1_000.0 * i as f32 / 48_000.0).sin());
        a.push(tone);
        let level = a.level().get();
        assert!(level > 0.0, "level {level}");
        assert!(level.is_finite());
    }

    #[test]
    fn non_finite_samples_are_ignored() {
        let mut a = SpectrumAnalyser::new(48_000, AudioLevel::new());
        a.push([f32::NAN, f32::INFINITY].into_iter().cycle().take(4_000));
        assert_eq!(a.level().get(), 0.0);
    }

    #[test]
    fn analysis_runs_once_per_hop() {
        let mut a = SpectrumAnalyser::new(6_000, AudioLevel::new());
        assert_eq!(a.hop, 100);
        a.push(std::iter::repeat(0.5).take(99));
        assert_eq!(a.since_last, 99);
        a.push(std::iter::once(0.5));
        assert_eq!(a.since_last, 0);
    }
}

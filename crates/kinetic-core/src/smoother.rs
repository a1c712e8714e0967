use crate::constants::EXPANSION_SMOOTHING_GAIN;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// An `f32` shared between one writer and one reader.
///
/// Stores are last-write-wins and reads see some recent value. Nothing reading
/// these scalars needs more than eventual visibility, so relaxed atomics are
/// enough and no lock is taken.
#[derive(Debug, Default)]
pub struct SharedScalar(AtomicU32);

impl SharedScalar {
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Cloneable writer for the expansion target, safe to hand to any callback.
#[derive(Clone, Debug)]
pub struct ExpansionHandle(Arc<SharedScalar>);

impl ExpansionHandle {
    /// Clamp `value` to \[0, 1\] and publish it. NaN is dropped.
    pub fn set_target(&self, value: f32) {
        if value.is_nan() {
            log::debug!("[expansion] ignoring NaN target");
            return;
        }
        self.0.store(value.clamp(0.0, 1.0));
    }

    pub fn target(&self) -> f32 {
        self.0.load()
    }
}

/// Single-pole low-pass filter between sparse controller updates and the
/// per-frame expansion value.
#[derive(Debug)]
pub struct ExpansionSmoother {
    target: Arc<SharedScalar>,
    current: f32,
    gain: f32,
}

impl Default for ExpansionSmoother {
    fn default() -> Self {
        Self::new(EXPANSION_SMOOTHING_GAIN)
    }
}

impl ExpansionSmoother {
    /// `gain` is the fraction of the remaining distance covered per tick and
    /// is clamped to (0, 1].
    pub fn new(gain: f32) -> Self {
        let gain = if gain.is_finite() && gain > 0.0 {
            gain.min(1.0)
        } else {
            EXPANSION_SMOOTHING_GAIN
        };
        Self {
            target: Arc::new(SharedScalar::new(0.0)),
            current: 0.0,
            gain,
        }
    }

    pub fn handle(&self) -> ExpansionHandle {
        ExpansionHandle(Arc::clone(&self.target))
    }

    pub fn set_target(&self, value: f32) {
        self.handle().set_target(value);
    }

    pub fn target(&self) -> f32 {
        self.target.load()
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Advance once toward the target. Call exactly once per animation frame.
    pub fn tick(&mut self) -> f32 {
        let target = self.target.load();
        self.current += (target - self.current) * self.gain;
        self.current
    }
}

use crate::color::{initial_color, Rgb};
use crate::constants::{EXPANSION_SMOOTHING_GAIN, MAX_PARTICLE_COUNT, PARTICLE_COUNT};
use crate::error::{KineticError, Result};
use crate::shape::ShapeKind;

/// Startup configuration for a [`crate::ParticleEngine`].
#[derive(Clone, Debug, PartialEq)]
pub struct EngineParams {
    pub particle_count: usize,
    /// Fixed seed for reproducible clouds; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub initial_shape: ShapeKind,
    pub color: Rgb,
    pub smoothing_gain: f32,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            seed: None,
            initial_shape: ShapeKind::default(),
            color: initial_color(),
            smoothing_gain: EXPANSION_SMOOTHING_GAIN,
        }
    }
}

impl EngineParams {
    /// Apply `key=value` overrides on top of `self`.
    ///
    /// Recognised keys: `shape`, `count`, `seed`, `color`, `smoothing`.
    pub fn with_pairs<'a, I>(mut self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, value) in pairs {
            let value = value.trim();
            match key.trim() {
                "shape" => self.initial_shape = value.parse()?,
                "count" => {
                    let count = value.parse().map_err(|_| invalid("count", value))?;
                    self.particle_count = validate_count(count)?;
                }
                "seed" => self.seed = Some(value.parse().map_err(|_| invalid("seed", value))?),
                "color" | "colour" => self.color = Rgb::from_hex(value)?,
                "smoothing" => {
                    let gain: f32 = value.parse().map_err(|_| invalid("smoothing", value))?;
                    if !(gain > 0.0 && gain <= 1.0) {
                        return Err(invalid("smoothing", value));
                    }
                    self.smoothing_gain = gain;
                }
                other => return Err(KineticError::UnknownParam(other.to_string())),
            }
        }
        Ok(self)
    }

    /// Parse a URL query string such as `?shape=galaxy&count=8000`.
    ///
    /// Keys this crate does not know are skipped with a warning so a page
    /// can carry unrelated parameters.
    pub fn from_query(query: &str) -> Result<Self> {
        let known = ["shape", "count", "seed", "color", "colour", "smoothing"];
        let pairs = query
            .trim_start_matches('?')
            .split('&')
            .filter(|p| !p.is_empty())
            .map(|p| p.split_once('=').unwrap_or((p, "")))
            .filter(|(k, _)| {
                let keep = known.contains(k);
                if !keep {
                    log::warn!("[config] ignoring query parameter '{}'", k);
                }
                keep
            });
        Self::default().with_pairs(pairs)
    }
}

pub fn validate_count(count: usize) -> Result<usize> {
    if (1..=MAX_PARTICLE_COUNT).contains(&count) {
        Ok(count)
    } else {
        Err(KineticError::ParticleCount {
            count,
            max: MAX_PARTICLE_COUNT,
        })
    }
}

fn invalid(key: &str, value: &str) -> KineticError {
    KineticError::InvalidParam {
        key: key.to_string(),
        value: value.to_string(),
    }
}

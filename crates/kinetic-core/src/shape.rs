use crate::constants::{CHAOS_CALM, CHAOS_EXPLOSIVE, SPIN_BOOST};
use crate::error::KineticError;
use std::fmt;
use std::str::FromStr;

/// The closed set of shapes the particle cloud can take.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    #[default]
    Heart,
    Flower,
    Saturn,
    Meditate,
    Fireworks,
    Galaxy,
    BlackHole,
    Dna,
    Cube,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 9] = [
        ShapeKind::Heart,
        ShapeKind::Flower,
        ShapeKind::Saturn,
        ShapeKind::Meditate,
        ShapeKind::Fireworks,
        ShapeKind::Galaxy,
        ShapeKind::BlackHole,
        ShapeKind::Dna,
        ShapeKind::Cube,
    ];

    /// Stable identifier used by the JS bridge, query strings and the CLI.
    pub fn id(self) -> &'static str {
        match self {
            ShapeKind::Heart => "HEART",
            ShapeKind::Flower => "FLOWER",
            ShapeKind::Saturn => "SATURN",
            ShapeKind::Meditate => "MEDITATE",
            ShapeKind::Fireworks => "FIREWORKS",
            ShapeKind::Galaxy => "GALAXY",
            ShapeKind::BlackHole => "BLACKHOLE",
            ShapeKind::Dna => "DNA",
            ShapeKind::Cube => "CUBE",
        }
    }

    /// Human-facing name for buttons and status text.
    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Heart => "Heart",
            ShapeKind::Flower => "Rose",
            ShapeKind::Saturn => "Saturn",
            ShapeKind::Meditate => "Meditate",
            ShapeKind::Fireworks => "Big Bang",
            ShapeKind::Galaxy => "Galaxy",
            ShapeKind::BlackHole => "Black Hole",
            ShapeKind::Dna => "DNA",
            ShapeKind::Cube => "Cube",
        }
    }

    /// 1-based position in [`ShapeKind::ALL`], used for digit hotkeys.
    pub fn hotkey(self) -> u8 {
        ShapeKind::ALL
            .iter()
            .position(|k| *k == self)
            .map(|i| i as u8 + 1)
            .unwrap_or(0)
    }

    pub fn from_hotkey(digit: u8) -> Option<ShapeKind> {
        let index = usize::from(digit).checked_sub(1)?;
        ShapeKind::ALL.get(index).copied()
    }

    /// Parse an identifier, falling back to [`ShapeKind::Fireworks`] for
    /// anything unrecognised.
    pub fn from_id_or_fallback(id: &str) -> ShapeKind {
        id.parse().unwrap_or_else(|e: KineticError| {
            log::warn!("{e}; falling back to {}", ShapeKind::Fireworks.id());
            ShapeKind::Fireworks
        })
    }

    /// Multiplier applied to expansion to get the drift displacement.
    #[inline]
    pub fn chaos_gain(self) -> f32 {
        match self {
            ShapeKind::Fireworks => CHAOS_EXPLOSIVE,
            _ => CHAOS_CALM,
        }
    }

    /// Extra base spin for the shapes that read better rotating faster.
    #[inline]
    pub fn spin_boost(self) -> f32 {
        match self {
            ShapeKind::Galaxy | ShapeKind::BlackHole => SPIN_BOOST,
            _ => 0.0,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ShapeKind {
    type Err = KineticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ShapeKind::ALL
            .iter()
            .copied()
            .find(|k| k.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| KineticError::UnknownShape(s.to_string()))
    }
}

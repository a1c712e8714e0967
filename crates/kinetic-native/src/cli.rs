use clap::Parser;
use kinetic_core::{
    EngineParams, EXPANSION_SMOOTHING_GAIN, INITIAL_COLOR_HEX, PARTICLE_COUNT,
};

#[derive(Parser, Debug)]
#[command(name = "kinetic")]
#[command(about = "Audio-reactive particle shapes in a desktop window", long_about = None)]
pub struct Args {
    /// Shape shown at startup (HEART, FLOWER, SATURN, MEDITATE, FIREWORKS,
    /// GALAXY, BLACKHOLE, DNA, CUBE)
    #[arg(long, value_name = "SHAPE", default_value = "HEART")]
    pub shape: String,

    /// Number of particles in the cloud
    #[arg(long, value_name = "N", default_value_t = PARTICLE_COUNT)]
    pub count: usize,

    /// Seed for reproducible clouds (random when omitted)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Particle colour as #rgb or #rrggbb
    #[arg(long, value_name = "HEX", default_value = INITIAL_COLOR_HEX)]
    pub color: String,

    /// Per-frame gain of the expansion smoother, in (0, 1]
    #[arg(long, value_name = "GAIN", default_value_t = EXPANSION_SMOOTHING_GAIN)]
    pub smoothing: f32,

    /// Do not open the microphone
    #[arg(long)]
    pub no_audio: bool,
}

impl Args {
    /// Validate the flags through the same path the web query string uses.
    pub fn engine_params(&self) -> kinetic_core::error::Result<EngineParams> {
        let count = self.count.to_string();
        let smoothing = self.smoothing.to_string();
        let seed = self.seed.map(|s| s.to_string());
        let mut pairs = vec![
            ("shape", self.shape.as_str()),
            ("count", count.as_str()),
            ("color", self.color.as_str()),
            ("smoothing", smoothing.as_str()),
        ];
        if let Some(seed) = &seed {
            pairs.push(("seed", seed.as_str()));
        }
        EngineParams::default().with_pairs(pairs)
    }
}

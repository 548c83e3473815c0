//! Headless client configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Settings for one scripted session.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Content directory; `None` uses the data bundled with `game-content`.
    pub data_dir: Option<PathBuf>,
    pub seed: u64,
    /// Simulated session length in seconds.
    pub duration_secs: u64,
    pub tick_ms: u64,
    pub spawn_interval_secs: f32,
    /// Distance from the hero at which enemies appear.
    pub spawn_radius: f32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed: 0,
            duration_secs: 120,
            tick_ms: 50,
            spawn_interval_secs: 1.0,
            spawn_radius: 8.0,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BLIGHT_DATA_DIR` - Content directory (default: bundled data)
    /// - `BLIGHT_SEED` - Random seed (default: 0)
    /// - `BLIGHT_DURATION_SECS` - Simulated seconds to play (default: 120)
    /// - `BLIGHT_TICK_MS` - Step length in milliseconds (default: 50)
    /// - `BLIGHT_SPAWN_INTERVAL_SECS` - Seconds between spawns (default: 1.0)
    /// - `BLIGHT_SPAWN_RADIUS` - Spawn distance from the hero (default: 8.0)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("BLIGHT_DATA_DIR").ok().map(PathBuf::from);

        if let Some(seed) = read_env::<u64>("BLIGHT_SEED") {
            config.seed = seed;
        }
        if let Some(duration) = read_env::<u64>("BLIGHT_DURATION_SECS") {
            config.duration_secs = duration;
        }
        if let Some(tick_ms) = read_env::<u64>("BLIGHT_TICK_MS") {
            config.tick_ms = tick_ms.max(1);
        }
        if let Some(interval) =
            read_env::<f32>("BLIGHT_SPAWN_INTERVAL_SECS").filter(|interval| *interval > 0.0)
        {
            config.spawn_interval_secs = interval;
        }
        if let Some(radius) = read_env::<f32>("BLIGHT_SPAWN_RADIUS") {
            config.spawn_radius = radius.max(0.0);
        }

        config
    }

    /// Number of ticks the session runs for.
    pub fn total_ticks(&self) -> u64 {
        (self.duration_secs * 1_000).div_ceil(self.tick_ms.max(1))
    }

    /// Ticks between two spawns, at least one.
    pub fn spawn_every(&self) -> u64 {
        let ticks = (self.spawn_interval_secs * 1_000.0 / self.tick_ms.max(1) as f32).round();
        (ticks as u64).max(1)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

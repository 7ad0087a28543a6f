use std::env;

use anyhow::{Context, Result};

use crate::registry::DemoId;

static ENV_SEED: &str = "DEMODECK_SEED";

/// Process-wide settings resolved at startup. There is no on-disk state;
/// the seed exists so a whole session can be replayed deterministically.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppConfig {
    start_panel: Option<DemoId>,
    seed: Option<u64>,
}

impl AppConfig {
    pub fn new(start_panel: Option<DemoId>, seed: Option<u64>) -> Self {
        Self { start_panel, seed }
    }

    /// Resolve the configuration from CLI overrides, then the environment.
    pub fn discover(start_panel: Option<DemoId>, seed_override: Option<u64>) -> Result<Self> {
        let seed = match seed_override {
            Some(seed) => Some(seed),
            None => resolve_env_seed()?,
        };
        Ok(Self { start_panel, seed })
    }

    pub fn start_panel(&self) -> Option<DemoId> {
        self.start_panel
    }

    /// Fixed RNG seed, or `None` to draw from entropy.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

fn resolve_env_seed() -> Result<Option<u64>> {
    match env::var(ENV_SEED) {
        Ok(value) => {
            let seed = value
                .parse::<u64>()
                .with_context(|| format!("{} must be an unsigned integer, got '{}'", ENV_SEED, value))?;
            Ok(Some(seed))
        }
        Err(_) => Ok(None),
    }
}

//! Runtime configuration for the terminal game.
//!
//! Defaults, then `BLOCKS_*` environment variables, then command-line flags.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};

use crate::core::SessionConfig;
use crate::types::{
    RotationMode, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_DIMENSION, MIN_DIMENSION, TICK_MS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub tick_ms: u64,
    pub seed: u32,
    pub rotation: RotationMode,
    /// Write a replay log of the game to this path
    pub record: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_ms: TICK_MS as u64,
            seed: 1,
            rotation: RotationMode::Fixed,
            record: None,
        }
    }
}

impl GameConfig {
    /// Load from the process environment and arguments (program name skipped).
    pub fn load() -> Result<Self> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_sources(|key| std::env::var(key).ok(), &args)
    }

    /// Build from an environment lookup and an argument list.
    pub fn from_sources(env: impl Fn(&str) -> Option<String>, args: &[String]) -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(env)?;
        config.apply_args(args)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<()> {
        let var = |key: &str| {
            env(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = var("BLOCKS_WIDTH") {
            self.width = parse_value("BLOCKS_WIDTH", &v)?;
        }
        if let Some(v) = var("BLOCKS_HEIGHT") {
            self.height = parse_value("BLOCKS_HEIGHT", &v)?;
        }
        if let Some(v) = var("BLOCKS_TICK_MS") {
            self.tick_ms = parse_value("BLOCKS_TICK_MS", &v)?;
        }
        if let Some(v) = var("BLOCKS_SEED") {
            self.seed = parse_value("BLOCKS_SEED", &v)?;
        }
        if let Some(v) = var("BLOCKS_ROTATION") {
            self.rotation = parse_rotation("BLOCKS_ROTATION", &v)?;
        }
        Ok(())
    }

    fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut i = 0usize;
        while i < args.len() {
            let flag = args[i].as_str();
            let mut value = || {
                i += 1;
                args.get(i)
                    .ok_or_else(|| anyhow!("missing value for {}", flag))
            };
            match flag {
                "--width" => self.width = parse_value(flag, value()?)?,
                "--height" => self.height = parse_value(flag, value()?)?,
                "--tick-ms" => self.tick_ms = parse_value(flag, value()?)?,
                "--seed" => self.seed = parse_value(flag, value()?)?,
                "--rotation" => self.rotation = parse_rotation(flag, value()?)?,
                "--record" => self.record = Some(PathBuf::from(value()?)),
                other => bail!("unknown argument: {}", other),
            }
            i += 1;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        check_dimensions(self.width, self.height)?;
        if self.tick_ms == 0 {
            bail!("tick interval must be at least 1 ms");
        }
        Ok(())
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            width: self.width,
            height: self.height,
            seed: self.seed,
            rotation: self.rotation,
        }
    }
}

/// Width and height must each lie in `MIN_DIMENSION..=MAX_DIMENSION`.
pub fn check_dimensions(width: u16, height: u16) -> Result<()> {
    for (name, value) in [("width", width), ("height", height)] {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
            bail!(
                "{} must be between {} and {} (got {})",
                name,
                MIN_DIMENSION,
                MAX_DIMENSION,
                value
            );
        }
    }
    Ok(())
}

fn parse_value<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", name, value))
}

fn parse_rotation(name: &str, value: &str) -> Result<RotationMode> {
    RotationMode::from_str(value)
        .ok_or_else(|| anyhow!("invalid {} value: {} (expected fixed|geometric)", name, value))
}

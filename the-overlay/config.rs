use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Overlay slots kept allocated after a commit.
pub const DEFAULT_OVERLAY_CAPACITY: usize = 16;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
  #[error("failed to parse mutable string config: {0}")]
  Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct MutableStringConfig {
  pub overlay_capacity: usize,
}

impl Default for MutableStringConfig {
  fn default() -> Self {
    Self {
      overlay_capacity: DEFAULT_OVERLAY_CAPACITY,
    }
  }
}

impl MutableStringConfig {
  pub fn from_toml(source: &str) -> Result<Self> {
    Ok(toml::from_str(source)?)
  }
}

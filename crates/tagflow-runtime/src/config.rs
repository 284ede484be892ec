// crates/tagflow-runtime/src/config.rs
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tagflow_core::{Result, TagflowError};
use tagflow_layout::DEFAULT_PADDING;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Gap between chips and between chips and the container edges.
    pub padding: i32,
    pub animations_enabled: bool,
    pub move_duration_ms: u64,
    pub fade_in_ms: u64,
    pub fade_out_ms: u64,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            animations_enabled: false,
            move_duration_ms: 400,
            fade_in_ms: 300,
            fade_out_ms: 300,
        }
    }
}

impl ContainerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.padding < 0 {
            return Err(TagflowError::InvalidConfig(format!(
                "padding must not be negative, got {}",
                self.padding
            )));
        }
        Ok(())
    }

    pub fn move_duration(&self) -> Duration {
        Duration::from_millis(self.move_duration_ms)
    }

    pub fn fade_in_duration(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }

    pub fn fade_out_duration(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }
}

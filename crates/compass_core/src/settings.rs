use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::{CompassError, Result};
use crate::fade::FadeTiming;
use crate::projector::{CullPolicy, ProjectionConfig};

/// User-facing compass options, as stored in the settings file.
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompassSettings {
    /// Width of the compass window in pixels.
    pub strip_width: f32,
    /// Degrees of the world visible across the window.
    pub fov: f32,
    pub tick_interval: u16,
    pub label_interval: u16,
    pub cull_policy: CullPolicy,
    /// Fixed heading for previewing the strip without a live viewer.
    pub simulated_heading: Option<f32>,
    pub distance_unit: String,
    pub fade: FadeTiming,
}

impl CompassSettings {
    /// Validate the settings and build the strip geometry from them.
    pub fn projection(&self) -> Result<ProjectionConfig> {
        if let Some(heading) = self.simulated_heading.filter(|h| !h.is_finite()) {
            return Err(CompassError::ConfigurationInvalid {
                field: "simulated_heading",
                value: heading,
            });
        }
        ProjectionConfig::new(
            self.strip_width,
            self.fov,
            self.tick_interval,
            self.label_interval,
        )
    }
}

impl Default for CompassSettings {
    fn default() -> Self {
        let projection = ProjectionConfig::default();
        Self {
            strip_width: projection.strip_width(),
            fov: projection.fov(),
            tick_interval: projection.tick_interval(),
            label_interval: projection.label_interval(),
            cull_policy: CullPolicy::default(),
            simulated_heading: None,
            distance_unit: "m".to_string(),
            fade: FadeTiming::default(),
        }
    }
}

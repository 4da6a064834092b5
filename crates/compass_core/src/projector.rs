use serde::{Deserialize, Serialize};

use crate::angle::{normalize_degrees, shortest_signed_delta};
use crate::error::{CompassError, Result};

/// Span covered by the generated strip, from -180 to 540 degrees.
pub const STRIP_SPAN_DEGREES: f32 = 720.0;
/// Distance from the strip's left edge to its 0 degree mark.
pub const STRIP_LEAD_DEGREES: f32 = 180.0;

/// What to do with a marker that falls outside the field of view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CullPolicy {
    #[default]
    Hide,
    ClampToEdge,
}

impl CullPolicy {
    pub fn toggled(self) -> Self {
        match self {
            CullPolicy::Hide => CullPolicy::ClampToEdge,
            CullPolicy::ClampToEdge => CullPolicy::Hide,
        }
    }
}

/// Validated strip geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionConfig {
    strip_width: f32,
    fov: f32,
    tick_interval: u16,
    label_interval: u16,
}

impl ProjectionConfig {
    pub fn new(strip_width: f32, fov: f32, tick_interval: u16, label_interval: u16) -> Result<Self> {
        positive("strip_width", strip_width)?;
        positive("fov", fov)?;
        positive("tick_interval", tick_interval as f32)?;
        positive("label_interval", label_interval as f32)?;
        Ok(Self {
            strip_width,
            fov,
            tick_interval,
            label_interval,
        })
    }

    pub fn strip_width(&self) -> f32 {
        self.strip_width
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn half_fov(&self) -> f32 {
        self.fov * 0.5
    }

    pub fn tick_interval(&self) -> u16 {
        self.tick_interval
    }

    pub fn label_interval(&self) -> u16 {
        self.label_interval
    }

    pub fn pixels_per_degree(&self) -> f32 {
        self.strip_width / self.fov
    }

    /// Left position of the scrolling strip that centers `heading` in the window.
    pub fn strip_left(&self, heading: f32) -> f32 {
        let ppd = self.pixels_per_degree();
        -normalize_degrees(heading) * ppd - STRIP_LEAD_DEGREES * ppd + self.strip_width * 0.5
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            strip_width: 800.0,
            fov: 150.0,
            tick_interval: 5,
            label_interval: 15,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CompassError::ConfigurationInvalid { field, value })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Signed angle from the heading to the target, after clamping.
    pub relative: f32,
    /// Pixel offset from the window's left edge. `None` when hidden.
    pub offset: Option<f32>,
    /// Set when the marker was pinned to an edge.
    pub clamped: bool,
}

impl Projection {
    pub fn is_visible(&self) -> bool {
        self.offset.is_some()
    }
}

/// Map a bearing onto the strip as seen from `heading`.
pub fn project(heading: f32, bearing: f32, config: &ProjectionConfig, policy: CullPolicy) -> Projection {
    let half_fov = config.half_fov();
    let mut relative = shortest_signed_delta(normalize_degrees(heading), normalize_degrees(bearing));
    let mut clamped = false;

    if !relative.is_finite() {
        return Projection {
            relative,
            offset: None,
            clamped,
        };
    }

    if relative.abs() > half_fov {
        match policy {
            CullPolicy::Hide => {
                return Projection {
                    relative,
                    offset: None,
                    clamped,
                };
            }
            CullPolicy::ClampToEdge => {
                relative = relative.clamp(-half_fov, half_fov);
                clamped = true;
            }
        }
    }

    Projection {
        relative,
        offset: Some(relative * config.pixels_per_degree() + config.strip_width * 0.5),
        clamped,
    }
}

use bevy::math::Vec3;

use crate::angle::{normalize_degrees, yaw_from_forward};

/// Where the compass reads its heading from.
///
/// A simulated heading wins over the live viewer, which lets the strip be
/// previewed without a camera in the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeadingSource {
    pub simulated: Option<f32>,
}

impl HeadingSource {
    pub fn simulated(heading: f32) -> Self {
        Self {
            simulated: Some(heading),
        }
    }

    /// Heading in [0, 360), or `None` with neither a simulation nor a usable viewer.
    ///
    /// A non-finite simulated heading resolves to `None` rather than falling
    /// back to the viewer.
    pub fn resolve(&self, viewer_forward: Option<Vec3>) -> Option<f32> {
        match self.simulated {
            Some(heading) if heading.is_finite() => Some(normalize_degrees(heading)),
            Some(_) => None,
            None => viewer_forward.and_then(yaw_from_forward),
        }
    }
}

use bevy::prelude::*;

use crate::error::Result;
use crate::fade::FadeTiming;
use crate::heading::HeadingSource;
use crate::marker::{FrameInput, Marker, MarkerId, MarkerSet, MarkerSpec};
use crate::projector::{CullPolicy, ProjectionConfig};
use crate::settings::CompassSettings;
use crate::strip::Strip;

/// The compass model: strip layout, heading and registered markers.
#[derive(Resource, Debug)]
pub struct Compass {
    config: ProjectionConfig,
    policy: CullPolicy,
    timing: FadeTiming,
    unit: String,
    source: HeadingSource,
    strip: Strip,
    heading: Option<f32>,
    markers: MarkerSet,
    /// Settings as last applied.
    applied: CompassSettings,
}

impl Compass {
    pub fn new(settings: &CompassSettings) -> Result<Self> {
        let config = settings.projection()?;
        Ok(Self {
            config,
            policy: settings.cull_policy,
            timing: settings.fade,
            unit: settings.distance_unit.clone(),
            source: HeadingSource {
                simulated: settings.simulated_heading,
            },
            strip: Strip::generate(&config),
            heading: None,
            markers: MarkerSet::default(),
            applied: settings.clone(),
        })
    }

    /// Apply new settings, keeping registered markers.
    ///
    /// The cull policy and simulated heading are only taken from `settings`
    /// when they differ from the previously applied settings; otherwise the
    /// values set at runtime stay. On error the compass is left unchanged.
    pub fn reconfigure(&mut self, settings: &CompassSettings) -> Result<()> {
        let config = settings.projection()?;
        if config != self.config {
            self.strip = Strip::generate(&config);
            self.config = config;
        }
        if settings.cull_policy != self.applied.cull_policy {
            self.policy = settings.cull_policy;
        }
        if settings.simulated_heading != self.applied.simulated_heading {
            self.source.simulated = settings.simulated_heading;
        }
        self.timing = settings.fade;
        if self.unit != settings.distance_unit {
            self.unit = settings.distance_unit.clone();
            self.markers.invalidate_labels();
        }
        self.applied = settings.clone();
        Ok(())
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    pub fn strip(&self) -> &Strip {
        &self.strip
    }

    pub fn policy(&self) -> CullPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: CullPolicy) {
        self.policy = policy;
    }

    pub fn simulated_heading(&self) -> Option<f32> {
        self.source.simulated
    }

    pub fn set_simulated_heading(&mut self, heading: Option<f32>) {
        self.source.simulated = heading;
    }

    /// Heading resolved by the last update.
    pub fn heading(&self) -> Option<f32> {
        self.heading
    }

    /// Left position of the scrolling strip for the current heading.
    pub fn strip_left(&self) -> Option<f32> {
        self.heading.map(|heading| self.config.strip_left(heading))
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn markers_mut(&mut self) -> &mut MarkerSet {
        &mut self.markers
    }

    pub fn add_marker(&mut self, key: impl Into<String>, spec: MarkerSpec) -> Result<MarkerId> {
        self.markers.insert(key, spec)
    }

    pub fn remove_marker(&mut self, id: MarkerId) -> Result<Marker> {
        self.markers.remove(id)
    }

    pub fn remove_key(&mut self, key: &str) -> Option<Marker> {
        self.markers.remove_key(key)
    }

    pub fn clear_markers(&mut self) {
        self.markers.clear();
    }

    /// Advance one frame. `viewer_forward` is ignored while a simulated heading is set.
    pub fn update(&mut self, dt: f32, viewer_forward: Option<Vec3>, viewer: Vec3) {
        self.heading = self.source.resolve(viewer_forward);
        let frame = FrameInput {
            dt,
            heading: self.heading,
            viewer,
            config: &self.config,
            policy: self.policy,
            timing: &self.timing,
            unit: &self.unit,
        };
        self.markers.update(&frame);
    }
}

impl Default for Compass {
    fn default() -> Self {
        let config = ProjectionConfig::default();
        Self {
            config,
            policy: CullPolicy::default(),
            timing: FadeTiming::default(),
            unit: "m".to_string(),
            source: HeadingSource::default(),
            strip: Strip::generate(&config),
            heading: None,
            markers: MarkerSet::default(),
            applied: CompassSettings::default(),
        }
    }
}

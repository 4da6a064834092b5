use std::collections::{BTreeMap, HashMap};

use bevy::color::Color;
use bevy::log::debug;
use bevy::math::Vec3;
use bevy::prelude::{Handle, Image};

use crate::angle::bearing_between;
use crate::distance::{format_distance, rounded_distance};
use crate::error::{CompassError, Result};
use crate::fade::{Fade, FadeTiming};
use crate::projector::{project, CullPolicy, Projection, ProjectionConfig};

/// Stable handle returned on registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(u64);

#[derive(Clone, Debug)]
pub struct MarkerSpec {
    pub target: Option<Vec3>,
    pub icon: Option<Handle<Image>>,
    pub color: Color,
}

impl MarkerSpec {
    pub fn at(target: Vec3) -> Self {
        Self {
            target: Some(target),
            ..Default::default()
        }
    }

    pub fn with_icon(mut self, icon: Handle<Image>) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for MarkerSpec {
    fn default() -> Self {
        Self {
            target: None,
            icon: None,
            color: Color::WHITE,
        }
    }
}

/// Everything a marker needs from the current frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput<'a> {
    pub dt: f32,
    pub heading: Option<f32>,
    pub viewer: Vec3,
    pub config: &'a ProjectionConfig,
    pub policy: CullPolicy,
    pub timing: &'a FadeTiming,
    pub unit: &'a str,
}

#[derive(Clone, Debug)]
pub struct Marker {
    id: MarkerId,
    key: String,
    target: Option<Vec3>,
    icon: Option<Handle<Image>>,
    color: Color,
    projection: Option<Projection>,
    distance: Option<u32>,
    label: String,
    label_changed: bool,
    fade: Fade,
}

impl Marker {
    fn new(id: MarkerId, key: String, spec: MarkerSpec) -> Self {
        Self {
            id,
            key,
            target: spec.target,
            icon: spec.icon,
            color: spec.color,
            projection: None,
            distance: None,
            label: String::new(),
            label_changed: false,
            fade: Fade::hidden(),
        }
    }

    pub fn id(&self) -> MarkerId {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    pub fn icon(&self) -> Option<&Handle<Image>> {
        self.icon.as_ref()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }

    /// Pixel offset inside the compass window, when on screen.
    pub fn offset(&self) -> Option<f32> {
        self.projection.and_then(|p| p.offset)
    }

    pub fn is_visible(&self) -> bool {
        self.offset().is_some()
    }

    pub fn distance(&self) -> Option<u32> {
        self.distance
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the last update produced new label text.
    pub fn label_changed(&self) -> bool {
        self.label_changed
    }

    pub fn alpha(&self) -> f32 {
        self.fade.alpha()
    }

    fn update(&mut self, frame: &FrameInput) -> Result<()> {
        self.label_changed = false;
        let result = self.project(frame);
        if result.is_err() {
            self.projection = None;
        }
        self.fade.show(self.is_visible());
        self.fade.step(frame.dt, frame.timing);
        result
    }

    fn project(&mut self, frame: &FrameInput) -> Result<()> {
        let target = self
            .target
            .ok_or_else(|| CompassError::TargetMissing(self.key.clone()))?;

        let Some(heading) = frame.heading else {
            self.projection = None;
            return Ok(());
        };

        let projection = project(
            heading,
            bearing_between(frame.viewer, target),
            frame.config,
            frame.policy,
        );
        self.projection = Some(projection);

        if projection.is_visible() {
            let distance = rounded_distance(frame.viewer, target);
            if self.distance != Some(distance) {
                self.distance = Some(distance);
                self.label = format_distance(distance, frame.unit);
                self.label_changed = true;
            }
        }
        Ok(())
    }

    /// Drop the cached distance so the label is rebuilt on the next update.
    fn invalidate_label(&mut self) {
        self.distance = None;
    }
}

/// Registered markers, keyed by a unique string.
///
/// A key maps to exactly one marker for as long as that marker is registered;
/// inserting an existing key fails and leaves the set untouched.
#[derive(Debug, Default)]
pub struct MarkerSet {
    next_id: u64,
    keys: HashMap<String, MarkerId>,
    markers: BTreeMap<MarkerId, Marker>,
}

impl MarkerSet {
    pub fn insert(&mut self, key: impl Into<String>, spec: MarkerSpec) -> Result<MarkerId> {
        let key = key.into();
        if self.keys.contains_key(&key) {
            return Err(CompassError::DuplicateKey(key));
        }
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.keys.insert(key.clone(), id);
        self.markers.insert(id, Marker::new(id, key, spec));
        Ok(id)
    }

    pub fn remove(&mut self, id: MarkerId) -> Result<Marker> {
        let marker = self
            .markers
            .remove(&id)
            .ok_or(CompassError::UnknownMarker(id))?;
        self.keys.remove(&marker.key);
        Ok(marker)
    }

    pub fn remove_key(&mut self, key: &str) -> Option<Marker> {
        let id = self.keys.remove(key)?;
        self.markers.remove(&id)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.markers.clear();
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(&id)
    }

    pub fn id_of(&self, key: &str) -> Option<MarkerId> {
        self.keys.get(key).copied()
    }

    pub fn contains(&self, id: MarkerId) -> bool {
        self.markers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Markers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    pub fn set_target(&mut self, id: MarkerId, target: Option<Vec3>) -> Result<()> {
        self.get_mut(id)?.target = target;
        Ok(())
    }

    pub fn set_color(&mut self, id: MarkerId, color: Color) -> Result<()> {
        self.get_mut(id)?.color = color;
        Ok(())
    }

    pub fn set_icon(&mut self, id: MarkerId, icon: Option<Handle<Image>>) -> Result<()> {
        self.get_mut(id)?.icon = icon;
        Ok(())
    }

    pub(crate) fn invalidate_labels(&mut self) {
        self.markers.values_mut().for_each(Marker::invalidate_label);
    }

    /// Recompute every marker's projection, distance label and fade.
    pub fn update(&mut self, frame: &FrameInput) {
        for marker in self.markers.values_mut() {
            if let Err(e) = marker.update(frame) {
                debug!("Skipping compass marker: {e}");
            }
        }
    }

    fn get_mut(&mut self, id: MarkerId) -> Result<&mut Marker> {
        self.markers
            .get_mut(&id)
            .ok_or(CompassError::UnknownMarker(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Frame {
        config: ProjectionConfig,
        timing: FadeTiming,
    }

    impl Frame {
        fn new() -> Self {
            Self {
                config: ProjectionConfig::default(),
                timing: FadeTiming::default(),
            }
        }

        fn input(&self, heading: f32, viewer: Vec3) -> FrameInput<'_> {
            FrameInput {
                dt: 0.1,
                heading: Some(heading),
                viewer,
                config: &self.config,
                policy: CullPolicy::Hide,
                timing: &self.timing,
                unit: "m",
            }
        }
    }

    #[test]
    fn duplicate_keys_rejected() {
        let mut set = MarkerSet::default();
        let id = set.insert("camp", MarkerSpec::at(Vec3::X)).unwrap();
        assert_eq!(
            set.insert("camp", MarkerSpec::at(Vec3::Z)).unwrap_err(),
            CompassError::DuplicateKey("camp".to_string())
        );
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(id).unwrap().target(), Some(Vec3::X));
    }

    #[test]
    fn remove_frees_key() {
        let mut set = MarkerSet::default();
        let first = set.insert("camp", MarkerSpec::default()).unwrap();
        assert!(set.remove(first).is_ok());
        assert_eq!(set.remove(first).unwrap_err(), CompassError::UnknownMarker(first));

        let second = set.insert("camp", MarkerSpec::default()).unwrap();
        assert_ne!(first, second);
        assert_eq!(set.id_of("camp"), Some(second));
        assert!(set.remove_key("camp").is_some());
        assert!(set.remove_key("camp").is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn clear_removes_everything() {
        let mut set = MarkerSet::default();
        set.insert("a", MarkerSpec::default()).unwrap();
        set.insert("b", MarkerSpec::default()).unwrap();
        set.clear();
        assert!(set.is_empty());
        assert!(set.insert("a", MarkerSpec::default()).is_ok());
    }

    #[test]
    fn update_projects_and_labels() {
        let frame = Frame::new();
        let mut set = MarkerSet::default();
        let ahead = set.insert("ahead", MarkerSpec::at(Vec3::new(0.0, 0.0, -120.0))).unwrap();
        let east = set.insert("east", MarkerSpec::at(Vec3::new(50.0, 0.0, 0.0))).unwrap();

        set.update(&frame.input(0.0, Vec3::ZERO));

        let ahead = set.get(ahead).unwrap();
        assert!((ahead.offset().unwrap() - 400.0).abs() < 1e-3);
        assert_eq!(ahead.label(), "120m");
        assert!(ahead.label_changed());
        assert!(ahead.alpha() > 0.0);

        let east = set.get(east).unwrap();
        assert!(!east.is_visible());
        assert_eq!(east.label(), "");
    }

    #[test]
    fn update_is_idempotent() {
        let frame = Frame::new();
        let mut set = MarkerSet::default();
        let id = set.insert("a", MarkerSpec::at(Vec3::new(10.0, 0.0, -30.0))).unwrap();
        let input = FrameInput {
            dt: 0.0,
            ..frame.input(10.0, Vec3::ONE)
        };

        set.update(&input);
        let first = set.get(id).cloned().unwrap();
        set.update(&input);
        let second = set.get(id).unwrap();

        assert_eq!(first.projection(), second.projection());
        assert_eq!(first.label(), second.label());
        assert_eq!(first.alpha(), second.alpha());
        // unchanged distance does not touch the label
        assert!(!second.label_changed());
    }

    #[test]
    fn label_only_changes_with_rounded_distance() {
        let frame = Frame::new();
        let mut set = MarkerSet::default();
        let id = set.insert("a", MarkerSpec::at(Vec3::new(0.0, 0.0, -10.0))).unwrap();

        set.update(&frame.input(0.0, Vec3::ZERO));
        assert!(set.get(id).unwrap().label_changed());

        set.update(&frame.input(0.0, Vec3::new(0.0, 0.0, -0.2)));
        assert!(!set.get(id).unwrap().label_changed());

        set.update(&frame.input(0.0, Vec3::new(0.0, 0.0, -1.0)));
        let marker = set.get(id).unwrap();
        assert!(marker.label_changed());
        assert_eq!(marker.label(), "9m");
    }

    #[test]
    fn missing_target_hides_but_keeps_marker() {
        let frame = Frame::new();
        let mut set = MarkerSet::default();
        let id = set.insert("a", MarkerSpec::at(Vec3::NEG_Z)).unwrap();
        set.update(&frame.input(0.0, Vec3::ZERO));
        assert!(set.get(id).unwrap().is_visible());

        set.set_target(id, None).unwrap();
        set.update(&frame.input(0.0, Vec3::ZERO));
        assert!(!set.get(id).unwrap().is_visible());
        assert_eq!(set.len(), 1);

        set.set_target(id, Some(Vec3::NEG_Z)).unwrap();
        set.update(&frame.input(0.0, Vec3::ZERO));
        assert!(set.get(id).unwrap().is_visible());
    }

    #[test]
    fn no_heading_hides() {
        let frame = Frame::new();
        let mut set = MarkerSet::default();
        let id = set.insert("a", MarkerSpec::at(Vec3::NEG_Z)).unwrap();
        let input = FrameInput {
            heading: None,
            ..frame.input(0.0, Vec3::ZERO)
        };
        set.update(&input);
        assert!(!set.get(id).unwrap().is_visible());
    }
}

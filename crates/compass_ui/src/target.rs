use bevy::prelude::*;
use bevy::utils::HashMap;

use compass_core::prelude::*;

use crate::CompassSystems;

/// Puts the entity on the compass while the component is present.
#[derive(Component, Clone, Debug)]
pub struct CompassTarget {
    pub key: String,
    pub icon: Option<Handle<Image>>,
    pub color: Color,
}

impl CompassTarget {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            icon: None,
            color: Color::WHITE,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Markers that follow an entity rather than a fixed point.
#[derive(Resource, Default, Deref, DerefMut)]
pub(crate) struct TrackedTargets(HashMap<MarkerId, Entity>);

fn register_target(
    trigger: Trigger<OnAdd, CompassTarget>,
    q_targets: Query<&CompassTarget>,
    mut compass: ResMut<Compass>,
    mut tracked: ResMut<TrackedTargets>,
) {
    let Ok(target) = q_targets.get(trigger.entity()) else {
        return;
    };
    let mut spec = MarkerSpec::default().with_color(target.color);
    spec.icon = target.icon.clone();
    match compass.add_marker(target.key.clone(), spec) {
        Ok(id) => {
            tracked.insert(id, trigger.entity());
        }
        Err(e) => warn!("Compass target {:?} not registered: {e}", trigger.entity()),
    }
}

fn unregister_target(
    trigger: Trigger<OnRemove, CompassTarget>,
    q_targets: Query<&CompassTarget>,
    mut compass: ResMut<Compass>,
    mut tracked: ResMut<TrackedTargets>,
) {
    let Ok(target) = q_targets.get(trigger.entity()) else {
        return;
    };
    // A duplicate key may belong to another entity.
    let Some(id) = compass.markers().id_of(&target.key) else {
        return;
    };
    if tracked.get(&id) == Some(&trigger.entity()) {
        tracked.remove(&id);
        compass.remove_key(&target.key);
    }
}

fn track_system(
    mut compass: ResMut<Compass>,
    mut tracked: ResMut<TrackedTargets>,
    q_transforms: Query<&GlobalTransform>,
) {
    tracked.retain(|id, _| compass.markers().contains(*id));
    for (id, entity) in tracked.iter() {
        let position = q_transforms.get(*entity).ok().map(GlobalTransform::translation);
        if let Err(e) = compass.markers_mut().set_target(*id, position) {
            warn!("{e}");
        }
    }
}

pub(crate) struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrackedTargets>();
        app.add_systems(Update, track_system.in_set(CompassSystems::Track));
        app.observe(register_target);
        app.observe(unregister_target);
    }
}

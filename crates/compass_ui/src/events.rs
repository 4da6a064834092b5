use bevy::prelude::*;

use compass_core::prelude::*;

use crate::target::TrackedTargets;
use crate::CompassSystems;

/// What a marker follows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TargetRef {
    /// Follows the entity's `GlobalTransform`. Hidden while the entity is gone.
    Entity(Entity),
    Point(Vec3),
}

#[derive(Event, Clone, Debug)]
pub enum CompassEvent {
    Add {
        key: String,
        target: TargetRef,
        icon: Option<Handle<Image>>,
        color: Color,
    },
    Remove(String),
    Clear,
    SetColor {
        key: String,
        color: Color,
    },
    SetCullPolicy(CullPolicy),
    SetSimulatedHeading(Option<f32>),
}

impl CompassEvent {
    pub fn add(key: impl Into<String>, target: TargetRef) -> Self {
        Self::Add {
            key: key.into(),
            target,
            icon: None,
            color: Color::WHITE,
        }
    }
}

fn event_system(
    mut events: EventReader<CompassEvent>,
    mut compass: ResMut<Compass>,
    mut tracked: ResMut<TrackedTargets>,
) {
    for event in events.read() {
        match event {
            CompassEvent::Add {
                key,
                target,
                icon,
                color,
            } => {
                let mut spec = MarkerSpec::default().with_color(*color);
                spec.icon = icon.clone();
                if let TargetRef::Point(point) = target {
                    spec.target = Some(*point);
                }
                match compass.add_marker(key.clone(), spec) {
                    Ok(id) => {
                        if let TargetRef::Entity(entity) = target {
                            tracked.insert(id, *entity);
                        }
                        debug!("Added compass marker `{key}`.");
                    }
                    Err(e) => warn!("{e}"),
                }
            }
            CompassEvent::Remove(key) => {
                if compass.remove_key(key).is_none() {
                    warn!("No compass marker `{key}` to remove.");
                }
            }
            CompassEvent::Clear => {
                compass.clear_markers();
            }
            CompassEvent::SetColor { key, color } => {
                let Some(id) = compass.markers().id_of(key) else {
                    warn!("No compass marker `{key}` to recolor.");
                    continue;
                };
                if let Err(e) = compass.markers_mut().set_color(id, *color) {
                    warn!("{e}");
                }
            }
            CompassEvent::SetCullPolicy(policy) => {
                compass.set_policy(*policy);
            }
            CompassEvent::SetSimulatedHeading(Some(heading)) if !heading.is_finite() => {
                warn!("Ignoring simulated compass heading {heading}.");
            }
            CompassEvent::SetSimulatedHeading(heading) => {
                compass.set_simulated_heading(*heading);
            }
        }
    }
}

pub(crate) struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CompassEvent>();
        app.add_systems(
            Update,
            event_system
                .run_if(on_event::<CompassEvent>())
                .in_set(CompassSystems::Configure),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.init_resource::<Compass>();
        app.init_resource::<TrackedTargets>();
        app.add_plugins(Plugin);
        app
    }

    #[test]
    fn add_and_remove() {
        let mut app = app();
        let entity = app.world_mut().spawn(GlobalTransform::default()).id();
        app.world_mut()
            .send_event(CompassEvent::add("tower", TargetRef::Entity(entity)));
        app.world_mut()
            .send_event(CompassEvent::add("camp", TargetRef::Point(Vec3::X)));
        app.update();

        let compass = app.world().resource::<Compass>();
        assert_eq!(compass.markers().len(), 2);
        let tower = compass.markers().id_of("tower").unwrap();
        assert_eq!(app.world().resource::<TrackedTargets>().get(&tower), Some(&entity));
        let camp = compass.markers().id_of("camp").unwrap();
        assert_eq!(compass.markers().get(camp).unwrap().target(), Some(Vec3::X));

        app.world_mut()
            .send_event(CompassEvent::Remove("camp".to_string()));
        app.update();
        assert_eq!(app.world().resource::<Compass>().markers().len(), 1);
    }

    #[test]
    fn duplicate_key_keeps_first() {
        let mut app = app();
        app.world_mut()
            .send_event(CompassEvent::add("camp", TargetRef::Point(Vec3::X)));
        app.world_mut()
            .send_event(CompassEvent::add("camp", TargetRef::Point(Vec3::Z)));
        app.update();

        let markers = app.world().resource::<Compass>().markers();
        assert_eq!(markers.len(), 1);
        let id = markers.id_of("camp").unwrap();
        assert_eq!(markers.get(id).unwrap().target(), Some(Vec3::X));
    }

    #[test]
    fn settings_events() {
        let mut app = app();
        app.world_mut()
            .send_event(CompassEvent::SetCullPolicy(CullPolicy::ClampToEdge));
        app.world_mut()
            .send_event(CompassEvent::SetSimulatedHeading(Some(90.0)));
        app.update();

        let compass = app.world().resource::<Compass>();
        assert_eq!(compass.policy(), CullPolicy::ClampToEdge);
        assert_eq!(compass.simulated_heading(), Some(90.0));
    }

    #[test]
    fn non_finite_heading_ignored() {
        let mut app = app();
        app.world_mut()
            .send_event(CompassEvent::SetSimulatedHeading(Some(45.0)));
        app.update();
        app.world_mut()
            .send_event(CompassEvent::SetSimulatedHeading(Some(f32::NAN)));
        app.update();
        assert_eq!(app.world().resource::<Compass>().simulated_heading(), Some(45.0));
    }
}

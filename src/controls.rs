use bevy::prelude::*;

use compass_core::prelude::*;
use compass_input::{Action, ActionEvent};
use compass_ui::prelude::*;

use crate::settings::TurnSpeed;

const WAYPOINT_DISTANCE: f32 = 25.0;

#[derive(Resource, Default)]
struct Turning {
    left: bool,
    right: bool,
}

impl Turning {
    /// -1 turns left, 1 turns right.
    fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Keys of waypoints dropped by the player, oldest first.
#[derive(Resource, Default, Deref, DerefMut)]
struct Waypoints(Vec<String>);

fn action_system(
    mut actions: EventReader<ActionEvent>,
    mut turning: ResMut<Turning>,
    mut waypoints: ResMut<Waypoints>,
    mut compass_events: EventWriter<CompassEvent>,
    mut next_waypoint: Local<u32>,
    compass: Res<Compass>,
    q_viewer: Query<&GlobalTransform, With<CompassViewer>>,
) {
    for event in actions.read() {
        match event.action {
            Action::TurnLeft => turning.left = event.pressed,
            Action::TurnRight => turning.right = event.pressed,
            _ if !event.pressed => {}
            Action::ToggleCullPolicy => {
                let policy = compass.policy().toggled();
                info!("Compass cull policy: {policy:?}");
                compass_events.send(CompassEvent::SetCullPolicy(policy));
            }
            Action::TogglePreview => {
                let preview = match compass.simulated_heading() {
                    Some(_) => None,
                    None => Some(compass.heading().unwrap_or_default()),
                };
                info!("Compass preview heading: {preview:?}");
                compass_events.send(CompassEvent::SetSimulatedHeading(preview));
            }
            Action::DropWaypoint => {
                let Ok(viewer) = q_viewer.get_single() else {
                    warn!("No viewer to drop a waypoint from.");
                    continue;
                };
                let mut forward = viewer.forward().as_vec3();
                forward.y = 0.0;
                let position = viewer.translation() + forward.normalize_or_zero() * WAYPOINT_DISTANCE;

                *next_waypoint += 1;
                let key = format!("waypoint-{}", *next_waypoint);
                compass_events.send(CompassEvent::Add {
                    key: key.clone(),
                    target: TargetRef::Point(position),
                    icon: None,
                    color: Color::srgb(0.2, 0.9, 0.9),
                });
                waypoints.push(key);
            }
            Action::ClearWaypoints => {
                compass_events.send_batch(waypoints.drain(..).map(CompassEvent::Remove));
            }
        }
    }
}

fn turn_system(
    time: Res<Time>,
    turning: Res<Turning>,
    speed: Res<TurnSpeed>,
    mut q_viewer: Query<&mut Transform, With<CompassViewer>>,
) {
    let direction = turning.direction();
    if direction == 0.0 {
        return;
    }
    // Turning right is clockwise seen from above, which is negative around +Y.
    let angle = -direction * speed.to_radians() * time.delta_seconds();
    for mut transform in &mut q_viewer {
        transform.rotate_y(angle);
    }
}

pub(crate) struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Turning>();
        app.init_resource::<Waypoints>();
        app.add_systems(
            Update,
            (action_system, turn_system)
                .chain()
                .before(CompassSystems::Configure),
        );
    }
}

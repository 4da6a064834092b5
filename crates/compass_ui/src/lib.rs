pub mod events;
pub mod marker;
pub mod target;
pub mod window;

use bevy::prelude::*;

use compass_core::prelude::*;
use sickle_ui::SickleUiPlugin;

pub mod prelude {
    pub use crate::events::{CompassEvent, TargetRef};
    pub use crate::target::CompassTarget;
    pub use crate::{CompassPlayer, CompassSystems, CompassViewer};
}

/// Camera (or any entity) whose facing drives the compass heading.
#[derive(Component, Default)]
pub struct CompassViewer;

/// Optional entity distances are measured from. Falls back to the viewer.
#[derive(Component, Default)]
pub struct CompassPlayer;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompassSystems {
    Configure,
    Track,
    Project,
    Present,
}

fn apply_settings(settings: Res<CompassSettings>, mut compass: ResMut<Compass>) {
    match compass.reconfigure(&settings) {
        Ok(()) => info!(
            "Compass configured: {}px, {} degree field of view, {:?}.",
            settings.strip_width, settings.fov, settings.cull_policy
        ),
        Err(e) => error!("Keeping previous compass settings: {e}"),
    }
}

fn project_system(
    time: Res<Time>,
    mut compass: ResMut<Compass>,
    q_viewer: Query<&GlobalTransform, With<CompassViewer>>,
    q_player: Query<&GlobalTransform, With<CompassPlayer>>,
) {
    let viewer = q_viewer.get_single().ok();
    let forward = viewer.map(|transform| transform.forward().as_vec3());
    let position = q_player
        .get_single()
        .ok()
        .or(viewer)
        .map(GlobalTransform::translation)
        .unwrap_or_default();

    compass.update(time.delta_seconds(), forward, position);
}

pub struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CompassSettings>();
        app.init_resource::<Compass>();

        if !app.is_plugin_added::<SickleUiPlugin>() {
            app.add_plugins(SickleUiPlugin);
        }
        app.add_plugins(events::Plugin);
        app.add_plugins(target::Plugin);
        app.add_plugins(window::Plugin);
        app.add_plugins(marker::Plugin);

        app.configure_sets(
            Update,
            (
                CompassSystems::Configure,
                CompassSystems::Track,
                CompassSystems::Project,
                CompassSystems::Present,
            )
                .chain(),
        );
        app.add_systems(
            Update,
            apply_settings
                .run_if(resource_changed::<CompassSettings>)
                .in_set(CompassSystems::Configure),
        );
        app.add_systems(Update, project_system.in_set(CompassSystems::Project));
    }
}

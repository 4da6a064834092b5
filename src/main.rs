mod controls;
mod scene;
mod settings;

use bevy::prelude::*;
use bevy::window::WindowResolution;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Compass HUD".to_string(),
            resolution: WindowResolution::new(1280., 720.),
            ..default()
        }),
        ..default()
    }));

    app.add_plugins(settings::Plugin);
    app.add_plugins(compass_input::Plugin);
    app.add_plugins(compass_ui::Plugin);
    app.add_plugins(scene::Plugin);
    app.add_plugins(controls::Plugin);

    app.run();
}

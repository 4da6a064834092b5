use bevy::prelude::*;

use compass_ui::prelude::*;

const PILLARS: [(&str, Vec3, Color); 4] = [
    ("tower", Vec3::new(0.0, 0.0, -60.0), Color::srgb(0.9, 0.3, 0.2)),
    ("camp", Vec3::new(45.0, 0.0, -20.0), Color::srgb(0.3, 0.8, 0.3)),
    ("ruins", Vec3::new(-80.0, 0.0, 35.0), Color::srgb(0.3, 0.5, 0.95)),
    ("harbor", Vec3::new(20.0, 0.0, 140.0), Color::srgb(0.95, 0.8, 0.2)),
];

fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_xyz(0.0, 2.0, 0.0).looking_to(Vec3::NEG_Z, Vec3::Y),
            ..default()
        },
        CompassViewer,
    ));

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    commands.spawn(PbrBundle {
        mesh: meshes.add(Plane3d::default().mesh().size(400.0, 400.0)),
        material: materials.add(Color::srgb(0.25, 0.3, 0.25)),
        ..default()
    });

    let pillar = meshes.add(Cuboid::new(2.0, 12.0, 2.0));
    for (key, position, color) in PILLARS {
        commands.spawn((
            PbrBundle {
                mesh: pillar.clone(),
                material: materials.add(color),
                transform: Transform::from_translation(position + Vec3::Y * 6.0),
                ..default()
            },
            CompassTarget::new(key).with_color(color),
            Name::new(key),
        ));
    }
}

pub(crate) struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.55, 0.7, 0.85)));
        app.add_systems(Startup, spawn_scene);
    }
}

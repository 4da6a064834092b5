use bevy::color::Alpha;
use bevy::prelude::*;
use bevy::utils::HashSet;
use sickle_ui::prelude::*;

use compass_core::prelude::*;

use crate::window::CompassMarkerLayer;
use crate::CompassSystems;

const MARKER_WIDTH: f32 = 48.;
const ICON_SIZE: f32 = 14.;

#[derive(Component)]
pub struct CompassMarker(pub MarkerId);

#[derive(Component)]
struct CompassMarkerIcon(MarkerId);

#[derive(Component)]
struct CompassMarkerLabel(MarkerId);

impl CompassMarker {
    fn frame() -> impl Bundle {
        NodeBundle {
            style: Style {
                position_type: PositionType::Absolute,
                top: Val::Px(34.),
                width: Val::Px(MARKER_WIDTH),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                ..default()
            },
            visibility: Visibility::Hidden,
            ..default()
        }
    }
}

pub trait UiCompassMarkerExt {
    fn compass_marker(&mut self, id: MarkerId);
}

impl UiCompassMarkerExt for UiBuilder<'_, Entity> {
    fn compass_marker(&mut self, id: MarkerId) {
        let mut builder = self.container(CompassMarker::frame(), |parent| {
            parent.spawn((
                ImageBundle {
                    style: Style {
                        width: Val::Px(ICON_SIZE),
                        height: Val::Px(ICON_SIZE),
                        ..default()
                    },
                    ..default()
                },
                CompassMarkerIcon(id),
            ));
            parent.spawn((
                TextBundle::from_section(
                    "",
                    TextStyle {
                        font_size: 11.,
                        color: Color::WHITE,
                        ..default()
                    },
                ),
                CompassMarkerLabel(id),
            ));
        });
        builder.insert(CompassMarker(id));
    }
}

/// Spawn nodes for new markers and despawn nodes whose marker is gone.
fn sync_system(
    mut commands: Commands,
    compass: Res<Compass>,
    q_markers: Query<(Entity, &CompassMarker)>,
    q_layer: Query<Entity, With<CompassMarkerLayer>>,
) {
    let markers = compass.markers();
    let mut existing = HashSet::new();
    for (entity, marker) in &q_markers {
        if markers.contains(marker.0) {
            existing.insert(marker.0);
        } else {
            commands.entity(entity).despawn_recursive();
        }
    }

    let Ok(layer) = q_layer.get_single() else {
        return;
    };
    for marker in markers.iter().filter(|m| !existing.contains(&m.id())) {
        commands.ui_builder(layer).compass_marker(marker.id());
    }
}

fn position_system(
    compass: Res<Compass>,
    mut q_markers: Query<(&CompassMarker, &mut Style, &mut Visibility)>,
) {
    for (node, mut style, mut visibility) in &mut q_markers {
        let Some(marker) = compass.markers().get(node.0) else {
            continue;
        };
        // Hidden markers keep their last offset while fading out.
        if let Some(offset) = marker.offset() {
            style.left = Val::Px(offset - MARKER_WIDTH * 0.5);
        }
        let shown = if marker.alpha() > 0.0 {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != shown {
            *visibility = shown;
        }
    }
}

fn appearance_system(
    compass: Res<Compass>,
    mut q_icons: Query<(&CompassMarkerIcon, &mut UiImage, &mut BackgroundColor)>,
    mut q_labels: Query<(Ref<CompassMarkerLabel>, &mut Text)>,
) {
    for (icon, mut image, mut background) in &mut q_icons {
        let Some(marker) = compass.markers().get(icon.0) else {
            continue;
        };
        let tint = marker.color().with_alpha(marker.alpha());
        match marker.icon() {
            Some(handle) => {
                if &image.texture != handle {
                    image.texture = handle.clone();
                }
                image.color = tint;
                background.0 = Color::NONE;
            }
            None => {
                image.color = Color::NONE;
                background.0 = tint;
            }
        }
    }

    for (label, mut text) in &mut q_labels {
        let Some(marker) = compass.markers().get(label.0) else {
            continue;
        };
        let Some(section) = text.sections.first_mut() else {
            continue;
        };
        // New nodes missed the update that produced the current label.
        if label.is_added() || marker.label_changed() {
            section.value = marker.label().to_string();
        }
        section.style.color.set_alpha(marker.alpha());
    }
}

pub(crate) struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (sync_system, position_system, appearance_system)
                .chain()
                .in_set(CompassSystems::Present),
        );
    }
}

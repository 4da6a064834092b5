use bevy::prelude::*;
use sickle_ui::prelude::*;

use compass_core::prelude::*;
use compass_core::strip::{StripLabel, Tick};

use crate::CompassSystems;

const WINDOW_HEIGHT: f32 = 64.0;
const LABEL_WIDTH: f32 = 40.0;
const TICK_WIDTH: f32 = 2.0;

/// Fixed-width window the strip scrolls behind.
#[derive(Component)]
pub struct CompassWindow;

#[derive(Component)]
pub struct CompassStrip;

/// Parent of the per-marker nodes, sized to the window.
#[derive(Component)]
pub struct CompassMarkerLayer;

impl CompassWindow {
    fn frame(width: f32) -> impl Bundle {
        NodeBundle {
            style: Style {
                width: Val::Px(width),
                height: Val::Px(WINDOW_HEIGHT),
                overflow: Overflow::clip(),
                ..default()
            },
            background_color: Color::srgba(0.05, 0.05, 0.08, 0.6).into(),
            ..default()
        }
    }
}

impl CompassStrip {
    fn frame() -> impl Bundle {
        NodeBundle {
            style: Style {
                position_type: PositionType::Absolute,
                top: Val::Px(0.),
                height: Val::Percent(100.),
                ..default()
            },
            ..default()
        }
    }
}

fn full_size() -> NodeBundle {
    NodeBundle {
        style: Style {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.),
            height: Val::Percent(100.),
            ..default()
        },
        ..default()
    }
}

fn needle() -> NodeBundle {
    NodeBundle {
        style: Style {
            position_type: PositionType::Absolute,
            left: Val::Percent(50.),
            margin: UiRect::left(Val::Px(-TICK_WIDTH * 0.5)),
            width: Val::Px(TICK_WIDTH),
            height: Val::Percent(100.),
            ..default()
        },
        background_color: Color::srgb(1.0, 0.3, 0.2).into(),
        ..default()
    }
}

trait UiCompassStripExt {
    fn strip_tick(&mut self, tick: &Tick);
    fn strip_label(&mut self, label: &StripLabel);
}

impl UiCompassStripExt for UiBuilder<'_, Entity> {
    fn strip_tick(&mut self, tick: &Tick) {
        let height = match tick.size {
            TickSize::Large => 18.,
            TickSize::Medium => 12.,
            TickSize::Small => 6.,
        };
        self.spawn(NodeBundle {
            style: Style {
                position_type: PositionType::Absolute,
                left: Val::Px(tick.x - TICK_WIDTH * 0.5),
                top: Val::Px(0.),
                width: Val::Px(TICK_WIDTH),
                height: Val::Px(height),
                ..default()
            },
            background_color: Color::srgba(1.0, 1.0, 1.0, 0.8).into(),
            ..default()
        });
    }

    fn strip_label(&mut self, label: &StripLabel) {
        let (font_size, color, top) = match label.kind {
            LabelKind::Cardinal => (18., Color::srgb(1.0, 0.85, 0.4), 18.),
            LabelKind::Degree => (12., Color::srgba(1.0, 1.0, 1.0, 0.7), 20.),
        };
        let text = label.text.clone();
        self.container(
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    left: Val::Px(label.x - LABEL_WIDTH * 0.5),
                    top: Val::Px(top),
                    width: Val::Px(LABEL_WIDTH),
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                ..default()
            },
            |parent| {
                parent.spawn(TextBundle::from_section(
                    text,
                    TextStyle {
                        font_size,
                        color,
                        ..default()
                    },
                ));
            },
        );
    }
}

pub(super) trait UiCompassWindowExt {
    fn compass(&mut self, width: f32);
}

impl UiCompassWindowExt for UiBuilder<'_, Entity> {
    fn compass(&mut self, width: f32) {
        self.container(CompassWindow::frame(width), |window| {
            window.container(CompassStrip::frame(), |_| {}).insert(CompassStrip);
            window.container(full_size(), |_| {}).insert(CompassMarkerLayer);
            window.spawn(needle());
        })
        .insert(CompassWindow);
    }
}

fn spawn_ui(mut commands: Commands, compass: Res<Compass>) {
    let width = compass.config().strip_width();
    commands.ui_builder(UiRoot).container(
        NodeBundle {
            style: Style {
                width: Val::Percent(100.),
                justify_content: JustifyContent::Center,
                padding: UiRect::top(Val::Px(16.)),
                ..default()
            },
            ..default()
        },
        |container| {
            container.compass(width);
        },
    );
}

/// Rebuild ticks and labels for the current strip layout.
fn rebuild_strip(
    mut commands: Commands,
    compass: Res<Compass>,
    q_strip: Query<Entity, With<CompassStrip>>,
    q_window: Query<Entity, With<CompassWindow>>,
) {
    let Ok(strip_entity) = q_strip.get_single() else {
        return;
    };
    let strip = compass.strip();

    commands.entity(strip_entity).despawn_descendants();
    commands
        .ui_builder(strip_entity)
        .style()
        .width(Val::Px(strip.width));

    let mut builder = commands.ui_builder(strip_entity);
    for tick in &strip.ticks {
        builder.strip_tick(tick);
    }
    for label in &strip.labels {
        builder.strip_label(label);
    }

    for window in &q_window {
        commands
            .ui_builder(window)
            .style()
            .width(Val::Px(compass.config().strip_width()));
    }
    debug!(
        "Compass strip rebuilt with {} ticks and {} labels.",
        strip.ticks.len(),
        strip.labels.len()
    );
}

fn scroll_system(compass: Res<Compass>, mut q_strip: Query<&mut Style, With<CompassStrip>>) {
    let Some(left) = compass.strip_left() else {
        return;
    };
    for mut style in &mut q_strip {
        style.left = Val::Px(left);
    }
}

pub(crate) struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_ui);
        app.add_systems(
            Update,
            (
                rebuild_strip.run_if(resource_changed::<CompassSettings>),
                scroll_system,
            )
                .chain()
                .in_set(CompassSystems::Present),
        );
    }
}

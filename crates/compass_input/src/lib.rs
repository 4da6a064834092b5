//! Keyboard actions for driving the compass viewer.

use std::collections::HashMap;

use bevy::prelude::*;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    TurnLeft,
    TurnRight,
    ToggleCullPolicy,
    TogglePreview,
    DropWaypoint,
    ClearWaypoints,
}

/// Key to action table, loaded from the settings file.
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keybinds(pub HashMap<KeyCode, Action>);

impl Keybinds {
    /// Event for a key transition, if the key is bound.
    pub fn event(&self, key: &KeyCode, pressed: bool) -> Option<ActionEvent> {
        let action = *self.0.get(key)?;
        Some(ActionEvent { action, pressed })
    }
}

impl Default for Keybinds {
    fn default() -> Self {
        Self(HashMap::from_iter([
            (KeyCode::KeyA, Action::TurnLeft),
            (KeyCode::ArrowLeft, Action::TurnLeft),
            (KeyCode::KeyD, Action::TurnRight),
            (KeyCode::ArrowRight, Action::TurnRight),
            (KeyCode::KeyC, Action::ToggleCullPolicy),
            (KeyCode::KeyP, Action::TogglePreview),
            (KeyCode::Space, Action::DropWaypoint),
            (KeyCode::Backspace, Action::ClearWaypoints),
        ]))
    }
}

fn input_system(
    input: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
    mut events: EventWriter<ActionEvent>,
) {
    let pressed = input
        .get_just_pressed()
        .filter_map(|key| keybinds.event(key, true));
    let released = input
        .get_just_released()
        .filter_map(|key| keybinds.event(key, false));

    events.send_batch(pressed.chain(released));
}

/// A bound key went down (`pressed`) or came back up.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionEvent {
    pub action: Action,
    pub pressed: bool,
}

pub struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ActionEvent>();
        app.init_resource::<Keybinds>();
        app.add_systems(PreUpdate, input_system.after(bevy::input::InputSystem));
    }
}

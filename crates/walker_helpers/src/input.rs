use bevy::input::ButtonState;
use bevy::input::keyboard::{KeyboardFocusLost, KeyboardInput};
use bevy::prelude::*;
use strum::{Display, EnumIter};

/// One of the four directions the hero can step in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit offset in canvas coordinates (y grows downward).
    pub const fn offset(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Arrow keys and WASD. Key codes are physical keys, so letter case never matters.
    pub const fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::ArrowUp | KeyCode::KeyW => Some(Self::Up),
            KeyCode::ArrowDown | KeyCode::KeyS => Some(Self::Down),
            KeyCode::ArrowLeft | KeyCode::KeyA => Some(Self::Left),
            KeyCode::ArrowRight | KeyCode::KeyD => Some(Self::Right),
            _ => None,
        }
    }
}

/// Directions currently held down, most recent press first.
///
/// A direction is stored at most once. With only four directions a small
/// vector beats any set structure, and the head is always `keys[0]`.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct HeldDirections {
    keys: Vec<Direction>,
}

impl HeldDirections {
    /// Returns `true` when the direction was not held before.
    pub fn key_pressed(&mut self, direction: Direction) -> bool {
        if self.keys.contains(&direction) {
            return false;
        }
        self.keys.insert(0, direction);
        true
    }

    /// Returns `true` when the direction was held.
    pub fn key_released(&mut self, direction: Direction) -> bool {
        let Some(index) = self.keys.iter().position(|held| *held == direction) else {
            return false;
        };
        self.keys.remove(index);
        true
    }

    /// Returns `true` when the held set changed.
    pub fn apply(&mut self, direction: Direction, state: ButtonState) -> bool {
        match state {
            ButtonState::Pressed => self.key_pressed(direction),
            ButtonState::Released => self.key_released(direction),
        }
    }

    pub fn release_all(&mut self) {
        self.keys.clear();
    }

    pub fn last_key(&self) -> Option<Direction> {
        self.keys.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.keys.iter().copied()
    }
}

/// Replays keyboard events into [`HeldDirections`] in the order they arrived.
///
/// A release and a press landing in the same frame must not be reordered, or a
/// direction still held by its twin key would be dropped.
pub fn track_direction_keys(
    mut keyboard_events: EventReader<KeyboardInput>,
    mut focus_events: EventReader<KeyboardFocusLost>,
    mut held: ResMut<HeldDirections>,
) {
    for event in keyboard_events.read() {
        let Some(direction) = Direction::from_key(event.key_code) else {
            continue;
        };
        if held.apply(direction, event.state) {
            debug!("{direction} {:?}, held {:?}", event.state, held.keys);
        }
    }

    // Key releases are never delivered once the window loses focus
    if !focus_events.is_empty() {
        focus_events.clear();
        if !held.is_empty() {
            held.release_all();
            debug!("Keyboard focus lost, released every direction");
        }
    }
}

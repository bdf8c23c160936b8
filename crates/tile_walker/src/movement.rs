use bevy::prelude::*;

/// Position and tile-aligned destination, both in canvas pixels (y grows downward).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Movable {
    pub position: Vec2,
    pub destination: Vec2,
}

impl Movable {
    /// At rest on `position`.
    pub const fn at(position: Vec2) -> Self {
        Self {
            position,
            destination: position,
        }
    }

    pub fn is_at_destination(&self) -> bool {
        self.position == self.destination
    }

    /// Steps `speed` pixels toward `destination` and returns what is left to travel.
    ///
    /// Lands exactly on `destination` once the remaining distance is within
    /// `speed`, so the position never overshoots and oscillates.
    pub fn move_towards(&mut self, destination: Vec2, speed: f32) -> f32 {
        let to_travel = destination - self.position;
        let distance = travel_metric(to_travel);

        if distance <= speed {
            self.position = destination;
            return distance;
        }

        self.position += to_travel / distance * speed;
        travel_metric(destination - self.position)
    }

    pub fn step_towards_destination(&mut self, speed: f32) -> f32 {
        self.move_towards(self.destination, speed)
    }
}

/// Magnitude of the summed axis deltas, `hypot(dx + dy)`.
///
/// This is not the Euclidean length: it matches it for axis-aligned travel and
/// is zero for diagonals where `dx == -dy`. Every step of [`Movable::move_towards`]
/// shrinks it by exactly `speed`, which is what bounds the number of steps.
pub fn travel_metric(delta: Vec2) -> f32 {
    (delta.x + delta.y).abs()
}

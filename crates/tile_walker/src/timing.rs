use bevy::prelude::*;

/// Opens for a single frame once enough frame time has accumulated.
///
/// Throttles sprite animation to a fixed cadence whatever the render frame rate.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EventGate {
    timer_ms: f32,
    interval_ms: f32,
    open: bool,
}

impl EventGate {
    pub const fn new(interval_ms: f32) -> Self {
        Self {
            timer_ms: 0.0,
            interval_ms,
            open: false,
        }
    }

    pub fn tick(&mut self, delta_ms: f32) {
        if self.timer_ms < self.interval_ms {
            self.timer_ms += delta_ms;
            self.open = false;
        } else {
            self.timer_ms = 0.0;
            self.open = true;
        }
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }
}

pub fn tick_event_gate(time: Res<Time>, mut gate: ResMut<EventGate>) {
    gate.tick(time.delta_secs() * 1000.0);
}

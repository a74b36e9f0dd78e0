//! Pointer tracking for the rig tilt

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Region of the window in which the pointer steers the rig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackingZone {
    /// Follow the pointer anywhere on the page
    Everywhere,
    /// Follow only while the pointer is over the right half
    #[default]
    RightHalf,
    /// Follow only while the pointer is over the left half
    LeftHalf,
}

impl TrackingZone {
    /// Whether a pointer at `client_x` is inside the zone of a window `width` wide
    pub fn contains(&self, client_x: f32, width: f32) -> bool {
        let half = width * 0.5;
        match self {
            TrackingZone::Everywhere => true,
            TrackingZone::RightHalf => client_x >= half,
            TrackingZone::LeftHalf => client_x < half,
        }
    }
}

/// What the animation loop reads once per frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    /// Pointer position relative to the window centre, in CSS pixels
    pub offset: Vec2,
    /// Whether the pointer is inside the tracking zone
    pub engaged: bool,
}

/// Last known pointer state, written by event listeners
#[derive(Debug, Clone)]
pub struct InteractionTracker {
    zone: TrackingZone,
    window: Vec2,
    sample: PointerSample,
}

impl InteractionTracker {
    /// Create a tracker for a window of the given size
    pub fn new(zone: TrackingZone, window_width: f32, window_height: f32) -> Self {
        Self {
            zone,
            window: Vec2::new(window_width, window_height),
            sample: PointerSample {
                offset: Vec2::ZERO,
                engaged: zone == TrackingZone::Everywhere,
            },
        }
    }

    /// Window was resized
    pub fn set_window_size(&mut self, width: f32, height: f32) {
        self.window = Vec2::new(width, height);
    }

    /// Pointer moved to client coordinates `(x, y)`
    pub fn pointer_moved(&mut self, client_x: f32, client_y: f32) {
        self.sample = PointerSample {
            offset: Vec2::new(client_x, client_y) - self.window * 0.5,
            engaged: self.zone.contains(client_x, self.window.x),
        };
    }

    /// Pointer left the document; an unzoned tracker keeps following the last position
    pub fn pointer_left(&mut self) {
        self.sample.engaged = self.zone == TrackingZone::Everywhere;
    }

    /// Latest sample
    pub fn sample(&self) -> PointerSample {
        self.sample
    }
}

//! Interpreter state threaded through a minification pass.

use serde::{Deserialize, Serialize};

/// Modal machine state
///
/// Only the minifier mutates this. It is serializable so the final state of
/// one pass can seed the next one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Extrusion reference: the absolute E position in absolute mode,
    /// reset to 0 when relative extrusion is switched on
    pub e: f64,
    /// Running absolute extrusion, tracked in both extrusion modes
    pub e_absolute: f64,
    pub feedrate: f64,
    pub relative_extrusion: bool,
    pub relative_coordinates: bool,
    pub is_homed: bool,
}

impl MachineState {
    /// Fresh state for a machine that has just been homed
    pub fn homed() -> Self {
        Self {
            is_homed: true,
            ..Self::default()
        }
    }

    /// Home all axes
    pub fn home(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
        self.z = 0.0;
        self.is_homed = true;
    }

    pub fn set_relative_extrusion(&mut self, relative: bool) {
        self.relative_extrusion = relative;
        self.e = if relative { 0.0 } else { self.e_absolute };
    }

    /// Euclidean distance from the current position to `(x, y, z)`
    pub fn distance_to(&self, x: f64, y: f64, z: f64) -> f64 {
        let (dx, dy, dz) = (x - self.x, y - self.y, z - self.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Circular parametric orbits: pure math, no engine dependencies.
///
/// Angles are evaluated in f64 so long-running sessions keep their precision
/// as the clock grows. Convert to f32 only at the scene boundary.

use glam::Vec3;
use std::f64::consts::TAU;

/// Offset from the orbit center at clock `t`:
/// `(d·cos(t·ω), 0, d·sin(t·ω))` in the XZ plane.
pub fn circular_offset(distance: f32, speed: f32, t: f64) -> Vec3 {
    let angle = t * speed as f64;
    let d = distance as f64;
    Vec3::new((d * angle.cos()) as f32, 0.0, (d * angle.sin()) as f32)
}

/// Clock time for one full revolution at angular speed `speed`.
pub fn period(speed: f32) -> f64 {
    TAU / speed as f64
}

/// The global animation clock. Advanced by a fixed step once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimClock {
    t: f64,
    step: f64,
}

impl SimClock {
    pub fn new(step: f64) -> Self {
        Self { t: 0.0, step }
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn advance(&mut self) {
        self.t += self.step;
    }

    pub fn reset(&mut self) {
        self.t = 0.0;
    }
}

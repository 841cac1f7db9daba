/// How host frames map onto game updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickPolicy {
    /// Exactly one update per host frame, whatever the frame time.
    Lockstep,
    /// Fixed-size steps accumulated from variable frame deltas.
    Fixed { dt: f32 },
}

/// Turns host frame callbacks into a number of update steps.
pub struct FixedTimestep {
    policy: TickPolicy,
    /// Accumulated time from variable frame deltas (fixed policy only).
    accumulator: f32,
}

impl FixedTimestep {
    /// Most steps a single frame may run before the backlog is dropped.
    const MAX_STEPS: u32 = 10;

    pub fn new(policy: TickPolicy) -> Self {
        Self {
            policy,
            accumulator: 0.0,
        }
    }

    /// Add frame time. Returns the number of updates to run this frame.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        match self.policy {
            TickPolicy::Lockstep => 1,
            TickPolicy::Fixed { dt } => {
                self.accumulator += frame_dt.max(0.0);
                // Cap to prevent a spiral of death after a long stall
                self.accumulator = self.accumulator.min(dt * Self::MAX_STEPS as f32);
                let steps = (self.accumulator / dt) as u32;
                self.accumulator -= steps as f32 * dt;
                steps
            }
        }
    }

    pub fn policy(&self) -> TickPolicy {
        self.policy
    }
}

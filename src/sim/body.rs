//! Gravity-driven kinematics for jumping actors

/// Vertical state of an actor that falls under constant gravity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Top edge (y grows downward)
    pub y: f32,
    pub height: f32,
    pub vel_y: f32,
    pub airborne: bool,
}

/// What happened against the ground this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundContact {
    /// Still in the air
    None,
    /// Standing on (or pushed back up to) the ground line
    Grounded,
    /// Was airborne, touched down this tick
    Landed,
}

impl Body {
    pub fn new(y: f32, height: f32) -> Self {
        Self {
            y,
            height,
            vel_y: 0.0,
            airborne: false,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Apply a jump impulse; ignored while airborne. Returns whether it fired.
    pub fn jump(&mut self, impulse: f32) -> bool {
        if self.airborne {
            return false;
        }
        self.vel_y = impulse;
        self.airborne = true;
        true
    }

    /// Advance one tick scaled by `factor` and resolve the ground line.
    ///
    /// Afterwards `bottom() <= ground_y` always holds.
    pub fn step(&mut self, gravity: f32, ground_y: f32, factor: f32) -> GroundContact {
        self.vel_y += gravity * factor;
        self.y += self.vel_y * factor;

        if self.bottom() > ground_y {
            let was_airborne = self.airborne;
            self.y = ground_y - self.height;
            self.vel_y = 0.0;
            self.airborne = false;
            if was_airborne {
                GroundContact::Landed
            } else {
                GroundContact::Grounded
            }
        } else {
            GroundContact::None
        }
    }
}

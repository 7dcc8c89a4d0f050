use bevy::math::Vec2;

/// Latest reported pointer location in page coordinates (origin top-left, y down)
///
/// One writer (the host's pointer handler) and any number of readers. Starts at
/// the origin and stays there until the first movement is reported.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerSignal {
    position: Vec2,
}

impl PointerSignal {
    #[cfg(test)]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
        }
    }

    /// Record a pointer movement; last report wins
    pub fn set(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }
}

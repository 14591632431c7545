use serde::{Deserialize, Serialize};

/// Axis-aligned box in stage coordinates. The origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Transform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point of the box.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Euclidean distance between the centers of two boxes.
    pub fn distance_between(&self, other: &Transform) -> f32 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        (bx - ax).hypot(by - ay)
    }
}

/// Direction of travel plus a scalar speed multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub velocity_x: f32,
    pub velocity_y: f32,
    /// Distance per 60 Hz reference frame at unit direction.
    pub speed: f32,
}

impl Velocity {
    /// A stationary velocity with the given speed multiplier.
    pub fn new(speed: f32) -> Self {
        Self {
            velocity_x: 0.0,
            velocity_y: 0.0,
            speed,
        }
    }

    /// Set the direction from an arbitrary vector, normalizing it to unit
    /// length. A zero vector stops the entity.
    pub fn set_direction(&mut self, dx: f32, dy: f32) {
        let (x, y) = normalize(dx, dy);
        self.velocity_x = x;
        self.velocity_y = y;
    }

    /// Current direction as a tuple.
    pub fn direction(&self) -> (f32, f32) {
        (self.velocity_x, self.velocity_y)
    }

    /// Zero the direction, keeping `speed`.
    pub fn stop(&mut self) {
        self.velocity_x = 0.0;
        self.velocity_y = 0.0;
    }
}

/// Scale `(dx, dy)` to unit length; `(0, 0)` maps to `(0, 0)`.
pub fn normalize(dx: f32, dy: f32) -> (f32, f32) {
    let len = dx.hypot(dy);
    if len > 0.0 && len.is_finite() {
        (dx / len, dy / len)
    } else {
        (0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn center_is_midpoint() {
        let t = Transform::new(10.0, 20.0, 32.0, 16.0);
        assert_eq!(t.center(), (26.0, 28.0));
    }

    #[test]
    fn distance_uses_centers() {
        let a = Transform::new(0.0, 0.0, 10.0, 10.0);
        let b = Transform::new(30.0, 40.0, 10.0, 10.0);
        assert!((a.distance_between(&b) - 50.0).abs() < EPS);
    }

    #[test]
    fn diagonal_direction_is_unit_length() {
        let mut v = Velocity::new(1.0);
        v.set_direction(1.0, 1.0);
        let (x, y) = v.direction();
        assert!((x.hypot(y) - 1.0).abs() < EPS);
        assert!((x - y).abs() < EPS);
    }

    #[test]
    fn zero_direction_stays_zero() {
        let mut v = Velocity::new(2.0);
        v.set_direction(3.0, 4.0);
        v.set_direction(0.0, 0.0);
        assert_eq!(v.direction(), (0.0, 0.0));
        assert_eq!(v.speed, 2.0);
    }
}

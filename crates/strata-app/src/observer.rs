//! Scripted observer for headless runs.

use glam::DVec3;
use strata_terrain::Observer;

/// Walks a circle around `center` at a constant speed.
#[derive(Clone, Debug)]
pub struct PatrolObserver {
    center: DVec3,
    radius: f64,
    /// Blocks per second along the circle.
    speed: f64,
    angle: f64,
    position: DVec3,
}

impl PatrolObserver {
    pub fn new(center: DVec3, radius: f64, speed: f64) -> Self {
        let mut observer = Self {
            center,
            radius,
            speed,
            angle: 0.0,
            position: center,
        };
        observer.place();
        observer
    }

    /// Moves along the circle by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        if self.radius > 0.0 {
            self.angle = (self.angle + self.speed * dt / self.radius) % std::f64::consts::TAU;
        }
        self.place();
    }

    /// Sets the observer's height, e.g. to stand on the terrain below it.
    pub fn set_height(&mut self, y: f64) {
        self.position.y = y;
    }

    fn place(&mut self) {
        let y = self.position.y;
        self.position = DVec3::new(
            self.center.x + self.radius * self.angle.cos(),
            y,
            self.center.z + self.radius * self.angle.sin(),
        );
    }
}

impl Observer for PatrolObserver {
    fn position(&self) -> DVec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stays_on_circle() {
        let mut observer = PatrolObserver::new(DVec3::new(5.0, 40.0, -5.0), 20.0, 3.0);
        for _ in 0..100 {
            observer.step(1.7);
            let p = observer.position();
            let r = ((p.x - 5.0).powi(2) + (p.z + 5.0).powi(2)).sqrt();
            assert!((r - 20.0).abs() < 1e-9);
            assert_eq!(p.y, 40.0);
        }
    }

    #[test]
    fn test_zero_radius_stands_still() {
        let mut observer = PatrolObserver::new(DVec3::new(1.0, 2.0, 3.0), 0.0, 10.0);
        observer.step(5.0);
        assert_eq!(observer.position(), DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_set_height() {
        let mut observer = PatrolObserver::new(DVec3::ZERO, 10.0, 1.0);
        observer.set_height(77.0);
        observer.step(1.0);
        assert_eq!(observer.position().y, 77.0);
    }
}

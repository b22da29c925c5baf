#[derive(Debug, Clone, Copy, PartialEq, derive_more::Add, derive_more::Sub)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}
impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
    pub fn magnitude(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
    /// Euclidean distance; symmetric, and zero exactly when the points coincide.
    pub fn distance_to(self, other: Point) -> f64 {
        (other - self).magnitude()
    }
}

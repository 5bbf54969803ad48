use std::ops::Sub;

/// A point in container-local pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pixel offset between two points (pointer grab offset, container origin shift)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl Sub for Point {
    type Output = Offset;

    fn sub(self, rhs: Point) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub<Offset> for Point {
    type Output = Point;

    fn sub(self, rhs: Offset) -> Point {
        Point::new(self.x - rhs.dx, self.y - rhs.dy)
    }
}

/// Rectangle for geometry calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rectangle {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build the rectangle spanned by two opposite corners (rubber-band gesture)
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        let width = (a.x - b.x).unsigned_abs();
        let height = (a.y - b.y).unsigned_abs();
        Self::new(x, y, width, height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width as i32
            && point.y >= self.y
            && point.y < self.y + self.height as i32
    }

    /// Axis-aligned bounding-box intersection test
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.x < other.x + other.width as i32
            && other.x < self.x + self.width as i32
            && self.y < other.y + other.height as i32
            && other.y < self.y + self.height as i32
    }
}

/// Measurement boundary to the rendering collaborator.
///
/// The coordinator never touches a real rendering surface; it asks this
/// provider for the container origin and per-panel on-screen rectangles.
/// A panel without a renderable handle reports `None`.
pub trait BoundsProvider {
    /// Current bounding box of the panel container, in screen coordinates.
    /// Queried fresh at every drag start to tolerate layout shifts.
    fn container_bounds(&self) -> Rectangle;

    /// Current on-screen bounding box of a panel's render target
    fn panel_bounds(&self, id: &str) -> Option<Rectangle>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_sub() {
        let offset = Point::new(150, 140) - Point::new(100, 100);
        assert_eq!(offset, Offset::new(50, 40));

        let moved = Point::new(200, 200) - offset;
        assert_eq!(moved, Point::new(150, 160));
    }

    #[test]
    fn test_contains_point() {
        let rect = Rectangle::new(10, 10, 100, 50);
        assert!(rect.contains_point(Point::new(10, 10)));
        assert!(rect.contains_point(Point::new(109, 59)));
        assert!(!rect.contains_point(Point::new(110, 30)));
        assert!(!rect.contains_point(Point::new(9, 30)));
    }

    #[test]
    fn test_from_corners() {
        // Drag up-left: corners in any order produce the same rectangle
        let a = Rectangle::from_corners(Point::new(50, 80), Point::new(10, 20));
        let b = Rectangle::from_corners(Point::new(10, 20), Point::new(50, 80));
        assert_eq!(a, b);
        assert_eq!(a, Rectangle::new(10, 20, 40, 60));
    }

    #[test]
    fn test_intersects() {
        let base = Rectangle::new(0, 0, 100, 100);
        assert!(base.intersects(&Rectangle::new(50, 50, 100, 100)));
        assert!(base.intersects(&Rectangle::new(-10, -10, 20, 20)));
        // Touching edges do not intersect
        assert!(!base.intersects(&Rectangle::new(100, 0, 10, 10)));
        assert!(!base.intersects(&Rectangle::new(0, 100, 10, 10)));
        assert!(!base.intersects(&Rectangle::new(200, 200, 10, 10)));
    }
}

//! Geometric primitives for diagram layout.
//!
//! This module provides the small set of geometric types the layout solver
//! works with.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Bounds`] - An axis-aligned box enclosing a set of points
//!
//! # Coordinate System
//!
//! erdify emits coordinates in Graphviz units (inches), in the coordinate
//! system Graphviz uses for pinned `pos` attributes:
//!
//! ```text
//!    +Y
//!     ▲
//!     │
//!     │
//!   (0,0) ────────► +X
//! ```
//!
//! Angles are measured in degrees, counter-clockwise from the positive X axis,
//! and normalized into `[0, 360)`.

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use erdify_core::geometry::Point;
/// let p1 = Point::new(0.0, 0.0);
/// let p2 = Point::new(4.0, 2.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 2.0);
/// assert_eq!(mid.y(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Adds an offset to this point, returning a new point.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Returns the direction from this point towards `other`, in degrees.
    ///
    /// The result is normalized into `[0, 360)`. Coincident points yield `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use erdify_core::geometry::Point;
    /// let origin = Point::new(0.0, 0.0);
    /// assert_eq!(origin.angle_to(Point::new(1.0, 0.0)), 0.0);
    /// assert!((origin.angle_to(Point::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
    /// assert!((origin.angle_to(Point::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
    /// ```
    pub fn angle_to(self, other: Point) -> f64 {
        let degrees = (other.y - self.y).atan2(other.x - self.x).to_degrees();
        normalize_degrees(degrees)
    }

    /// Returns the point at `radius` units from this one along `degrees`.
    pub fn polar_offset(self, radius: f64, degrees: f64) -> Self {
        let radians = degrees.to_radians();
        Self {
            x: self.x + radius * radians.cos(),
            y: self.y + radius * radians.sin(),
        }
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Normalizes an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// An axis-aligned bounding box defined by minimum and maximum coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates a zero-sized bounds located at `point`.
    pub fn from_point(point: Point) -> Self {
        Self {
            min_x: point.x,
            min_y: point.y,
            max_x: point.x,
            max_y: point.y,
        }
    }

    /// Computes the bounds enclosing every point, or `None` for an empty input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use erdify_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::enclosing([Point::new(-4.0, 1.0), Point::new(2.0, -3.0)]).unwrap();
    /// assert_eq!(bounds.min_x(), -4.0);
    /// assert_eq!(bounds.max_y(), 1.0);
    ///
    /// assert!(Bounds::enclosing(std::iter::empty()).is_none());
    /// ```
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc, point| match acc {
            None => Some(Self::from_point(point)),
            Some(bounds) => Some(bounds.include(point)),
        })
    }

    /// Returns bounds grown to include `point`.
    pub fn include(self, point: Point) -> Self {
        Self {
            min_x: self.min_x.min(point.x),
            min_y: self.min_y.min(point.y),
            max_x: self.max_x.max(point.x),
            max_y: self.max_y.max(point.y),
        }
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }
}

//! # World Geometry
//!
//! Integer geometry used by the world and persisted by the codec. Wire
//! packets quantize coordinates further (16-bit x/y, 8-bit z); these types
//! carry the authoritative 32-bit values.

/// A point on the map surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point2D {
    /// East-west coordinate.
    pub x: i32,
    /// North-south coordinate.
    pub y: i32,
}

impl Point2D {
    /// Creates a new 2D point.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A point in the world, including elevation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point3D {
    /// East-west coordinate.
    pub x: i32,
    /// North-south coordinate.
    pub y: i32,
    /// Elevation.
    pub z: i32,
}

impl Point3D {
    /// Creates a new 3D point.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Drops the elevation component.
    #[inline]
    #[must_use]
    pub const fn flatten(self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// An axis-aligned rectangle on the map surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect2D {
    /// Inclusive start corner.
    pub start: Point2D,
    /// Exclusive end corner.
    pub end: Point2D,
}

impl Rect2D {
    /// Creates a rectangle from two corners.
    #[inline]
    #[must_use]
    pub const fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }
}

/// An axis-aligned box in the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect3D {
    /// Inclusive start corner.
    pub start: Point3D,
    /// Exclusive end corner.
    pub end: Point3D,
}

impl Rect3D {
    /// Creates a box from two corners.
    #[inline]
    #[must_use]
    pub const fn new(start: Point3D, end: Point3D) -> Self {
        Self { start, end }
    }
}

/// Facing direction of a mobile.
///
/// The low three bits select one of eight compass points; the high bit
/// (`0x80`) marks the mobile as running and is preserved through
/// [`Direction::as_byte`] / [`Direction::from_byte`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Facing north.
    #[default]
    North = 0x0,
    /// Facing northeast.
    Right = 0x1,
    /// Facing east.
    East = 0x2,
    /// Facing southeast.
    Down = 0x3,
    /// Facing south.
    South = 0x4,
    /// Facing southwest.
    Left = 0x5,
    /// Facing west.
    West = 0x6,
    /// Facing northwest.
    Up = 0x7,
}

impl Direction {
    /// Decodes a direction from its wire byte, ignoring the running flag.
    #[inline]
    #[must_use]
    pub const fn from_byte(value: u8) -> Self {
        match value & 0x7 {
            0x1 => Self::Right,
            0x2 => Self::East,
            0x3 => Self::Down,
            0x4 => Self::South,
            0x5 => Self::Left,
            0x6 => Self::West,
            0x7 => Self::Up,
            _ => Self::North,
        }
    }

    /// Encodes this direction as its wire byte.
    #[inline]
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}

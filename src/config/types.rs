//! Data types for zone definitions.
//!
//! Defines screen points, zone rectangles, the fixed-size command stack
//! and the zone map the dispatcher matches against.

use super::error::ConfigError;
use super::keycodes::KeyCode;
use std::fmt;

/// Maximum number of keys bound to a single zone.
pub const COMMAND_STACK_SIZE: usize = 5;

/// A pointer location in virtual-screen pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned screen zone.
///
/// Always normalized: `x0 <= x1` and `y0 <= y1`. Both edges are part of
/// the zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rectangle {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl Rectangle {
    /// Creates the bounding box of two corner points, in any order.
    pub fn from_corners(p0: Point, p1: Point) -> Self {
        Self {
            x0: p0.x.min(p1.x),
            y0: p0.y.min(p1.y),
            x1: p0.x.max(p1.x),
            y1: p0.y.max(p1.y),
        }
    }

    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::from_corners(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x0, self.y0)
    }

    /// Bottom-right corner.
    pub fn extent(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn width(&self) -> i64 {
        i64::from(self.x1) - i64::from(self.x0)
    }

    pub fn height(&self) -> i64 {
        i64::from(self.y1) - i64::from(self.y0)
    }

    /// Closed containment test.
    pub fn contains(&self, point: Point) -> bool {
        (self.x0..=self.x1).contains(&point.x) && (self.y0..=self.y1).contains(&point.y)
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{} - {},{}]", self.x0, self.y0, self.x1, self.y1)
    }
}

/// The ordered keys bound to a zone, padded with [`KeyCode::UNDEFINED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyCodeSequence([KeyCode; COMMAND_STACK_SIZE]);

impl KeyCodeSequence {
    /// Builds a sequence from at most [`COMMAND_STACK_SIZE`] codes.
    pub fn from_codes(codes: &[KeyCode]) -> Result<Self, ConfigError> {
        if codes.len() > COMMAND_STACK_SIZE {
            return Err(ConfigError::TooManyCommands { count: codes.len() });
        }

        let mut slots = [KeyCode::UNDEFINED; COMMAND_STACK_SIZE];
        slots[..codes.len()].copy_from_slice(codes);
        Ok(Self(slots))
    }

    /// All slots, including undefined padding.
    pub fn slots(&self) -> &[KeyCode; COMMAND_STACK_SIZE] {
        &self.0
    }

    /// Defined codes in press order.
    pub fn keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.0.iter().copied().filter(|code| !code.is_undefined())
    }

    /// Returns `true` when no slot holds a defined key.
    pub fn is_empty(&self) -> bool {
        self.keys().next().is_none()
    }
}

impl fmt::Display for KeyCodeSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.keys().map(KeyCode::name).collect();
        write!(f, "{}", names.join(" + "))
    }
}

/// Zones and their bound key sequences, in insertion order.
///
/// Rectangles are unique; inserting an equal rectangle replaces the
/// sequence in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneMap {
    zones: Vec<(Rectangle, KeyCodeSequence)>,
}

impl ZoneMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a zone, returning the sequence it replaced.
    pub fn insert(
        &mut self,
        area: Rectangle,
        sequence: KeyCodeSequence,
    ) -> Option<KeyCodeSequence> {
        match self.zones.iter_mut().find(|(existing, _)| *existing == area) {
            Some((_, slot)) => Some(std::mem::replace(slot, sequence)),
            None => {
                self.zones.push((area, sequence));
                None
            }
        }
    }

    pub fn get(&self, area: &Rectangle) -> Option<&KeyCodeSequence> {
        self.zones
            .iter()
            .find(|(existing, _)| existing == area)
            .map(|(_, sequence)| sequence)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Rectangle, &KeyCodeSequence)> {
        self.zones.iter().map(|(area, sequence)| (area, sequence))
    }

    /// Zones containing `point`, in insertion order.
    pub fn matching(&self, point: Point) -> impl Iterator<Item = (&Rectangle, &KeyCodeSequence)> {
        self.iter().filter(move |(area, _)| area.contains(point))
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

//! Cell-grid geometry: Offset, Size, Region, Placement.
//!
//! Windows on a terminal surface are rectangles of character cells. Rows and
//! columns are `i32` so that relative moves can go negative before clamping.

use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A position or displacement in terminal cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Offset {
    type Output = Offset;
    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Offset {
    type Output = Offset;
    #[inline]
    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// Width x height in terminal cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size { width: 0, height: 0 };

    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero or negative.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// The full surface as a region anchored at the origin.
    #[inline]
    pub const fn to_region(self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangle of cells: top-left corner plus size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Exclusive right edge.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub const fn origin(self) -> Offset {
        Offset::new(self.x, self.y)
    }

    #[inline]
    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the absolute point (x, y) is inside the region.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether `other` lies entirely inside this region.
    #[inline]
    pub const fn contains_region(self, other: Region) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Overlapping part of two regions, or [`Region::EMPTY`].
    pub fn intersection(self, other: Region) -> Region {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x2 <= x1 || y2 <= y1 {
            Region::EMPTY
        } else {
            Region::new(x1, y1, x2 - x1, y2 - y1)
        }
    }

    /// Smallest region covering both. An empty region contributes nothing.
    pub fn union(self, other: Region) -> Region {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = self.right().max(other.right());
        let y2 = self.bottom().max(other.bottom());
        Region::new(x1, y1, x2 - x1, y2 - y1)
    }

    #[inline]
    pub const fn translate(self, offset: Offset) -> Region {
        Region::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Shrink by `n` cells on every side (the interior of a box border).
    pub fn inset(self, n: i32) -> Region {
        Region::new(
            self.x + n,
            self.y + n,
            (self.width - 2 * n).max(0),
            (self.height - 2 * n).max(0),
        )
    }

    /// Position a `size` box inside `self` using a placement per axis.
    ///
    /// The result is clamped so it never starts before `self`'s origin; a
    /// box larger than the container still overhangs on the right/bottom,
    /// which the surface rejects when the window is created.
    pub fn place(self, size: Size, x: Placement, y: Placement) -> Region {
        let px = x.resolve(self.x, self.width, size.width);
        let py = y.resolve(self.y, self.height, size.height);
        Region::new(px, py, size.width, size.height)
    }
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Where a widget sits along one axis of its parent surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Absolute cell coordinate relative to the parent's origin.
    At(i32),
    /// Flush against the left/top edge.
    Start,
    /// Centered.
    Center,
    /// Flush against the right/bottom edge.
    End,
}

impl Default for Placement {
    fn default() -> Self {
        Placement::At(0)
    }
}

impl Placement {
    fn resolve(self, origin: i32, extent: i32, length: i32) -> i32 {
        let free = (extent - length).max(0);
        let pos = match self {
            Placement::At(n) => n.clamp(0, free),
            Placement::Start => 0,
            Placement::Center => free / 2,
            Placement::End => free,
        };
        origin + pos
    }
}

// ===========================================================================
// Tests
// ===========================================================================

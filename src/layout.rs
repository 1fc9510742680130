//! Geometry primitives used by widget layout and hit testing.

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Zero size constant.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::ZERO
    }
}

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Zero-sized bounds at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check whether the given point lies inside these bounds.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    /// Right edge coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Area in square pixels.
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Compute the overlapping region of two rectangles.
    /// Returns a zero-sized rectangle when they do not overlap.
    pub fn intersect(&self, other: &Bounds) -> Bounds {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        Bounds::new(x1, y1, (x2 - x1).max(0.0), (y2 - y1).max(0.0))
    }
}

/// Defines how a widget's dimension should be sized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Shrink to fit content
    Shrink,
    /// Fill available space with relative weight (1.0 = equal share)
    Fill(f32),
    /// Fixed size in pixels
    Units(f32),
}

impl Length {
    /// Resolve the length to a concrete size given the available space
    /// and the content's intrinsic size.
    pub fn resolve(&self, available: f32, intrinsic: f32) -> f32 {
        match self {
            Length::Shrink => intrinsic,
            Length::Fill(_) => available,
            Length::Units(px) => *px,
        }
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::Shrink
    }
}

impl From<f32> for Length {
    fn from(px: f32) -> Self {
        Length::Units(px)
    }
}

/// Alignment used by [`crate::TableContentController::scroll_to_index_offset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Keeps the current offset when the item is fully visible, otherwise scrolls the minimum
    /// distance.
    Auto,
}

/// Selects which host axis is the scroll (main) axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Main axis is `y`, cross axis is `x`.
    #[default]
    Vertical,
    /// Main axis is `x`, cross axis is `y`.
    Horizontal,
}

impl Orientation {
    pub fn main_of(self, p: Point) -> f32 {
        match self {
            Self::Vertical => p.y,
            Self::Horizontal => p.x,
        }
    }

    pub fn cross_of(self, p: Point) -> f32 {
        match self {
            Self::Vertical => p.x,
            Self::Horizontal => p.y,
        }
    }

    pub fn main_len(self, s: Size) -> f32 {
        match self {
            Self::Vertical => s.height,
            Self::Horizontal => s.width,
        }
    }

    pub fn cross_len(self, s: Size) -> f32 {
        match self {
            Self::Vertical => s.width,
            Self::Horizontal => s.height,
        }
    }

    pub fn point(self, main: f32, cross: f32) -> Point {
        match self {
            Self::Vertical => Point { x: cross, y: main },
            Self::Horizontal => Point { x: main, y: cross },
        }
    }

    pub fn size(self, main: f32, cross: f32) -> Size {
        match self {
            Self::Vertical => Size {
                width: cross,
                height: main,
            },
            Self::Horizontal => Size {
                width: main,
                height: cross,
            },
        }
    }

    /// Builds a host rectangle from main/cross coordinates.
    pub fn rect(self, main: f32, cross: f32, main_len: f32, cross_len: f32) -> Rect {
        Rect::from_origin_size(self.point(main, cross), self.size(main_len, cross_len))
    }
}

/// A point (or offset) in host content coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in host content coordinates (`y` grows downwards).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Grows the rectangle outwards by `insets`.
    pub fn outset(&self, insets: Insets) -> Self {
        Self::new(
            self.x - insets.left,
            self.y - insets.top,
            self.width + insets.left + insets.right,
            self.height + insets.top + insets.bottom,
        )
    }

    /// Half-open overlap test (touching edges do not intersect).
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.max_x()
            && other.x < self.max_x()
            && self.y < other.max_y()
            && other.y < self.max_y()
    }
}

/// Per-edge distances, used for the auto-scroll selection margin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Insets {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(v: f32) -> Self {
        Self::new(v, v, v, v)
    }
}

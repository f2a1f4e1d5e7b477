//! Window and frame AST types.

use super::node::Node;

/// Whether a frame counts rows or value ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameMode {
    Rows,
    Range,
}

impl FrameMode {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rows => "ROWS",
            Self::Range => "RANGE",
        }
    }
}

/// One edge of a window frame.
///
/// A missing offset on `Preceding` or `Following` means UNBOUNDED.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameBound {
    Preceding(Option<Box<Node>>),
    Following(Option<Box<Node>>),
    CurrentRow,
}

impl FrameBound {
    /// `<offset> PRECEDING`.
    #[must_use]
    pub fn preceding(offset: impl Into<Node>) -> Self {
        Self::Preceding(Some(Box::new(offset.into())))
    }

    /// `UNBOUNDED PRECEDING`.
    #[must_use]
    pub const fn unbounded_preceding() -> Self {
        Self::Preceding(None)
    }

    /// `<offset> FOLLOWING`.
    #[must_use]
    pub fn following(offset: impl Into<Node>) -> Self {
        Self::Following(Some(Box::new(offset.into())))
    }

    /// `UNBOUNDED FOLLOWING`.
    #[must_use]
    pub const fn unbounded_following() -> Self {
        Self::Following(None)
    }

    /// `CURRENT ROW`.
    #[must_use]
    pub const fn current_row() -> Self {
        Self::CurrentRow
    }
}

/// The extent of a frame: a single start edge, or BETWEEN two edges.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameExtent {
    Bound(FrameBound),
    Between(FrameBound, FrameBound),
}

impl FrameExtent {
    /// `BETWEEN <start> AND <end>`.
    #[must_use]
    pub const fn between(start: FrameBound, end: FrameBound) -> Self {
        Self::Between(start, end)
    }
}

impl From<FrameBound> for FrameExtent {
    fn from(bound: FrameBound) -> Self {
        Self::Bound(bound)
    }
}

/// A window frame clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// ROWS or RANGE.
    pub mode: FrameMode,
    /// The frame extent.
    pub extent: FrameExtent,
}

impl Frame {
    /// A ROWS frame.
    #[must_use]
    pub fn rows(extent: impl Into<FrameExtent>) -> Self {
        Self {
            mode: FrameMode::Rows,
            extent: extent.into(),
        }
    }

    /// A RANGE frame.
    #[must_use]
    pub fn range(extent: impl Into<FrameExtent>) -> Self {
        Self {
            mode: FrameMode::Range,
            extent: extent.into(),
        }
    }
}

/// A window definition: partitioning, ordering and framing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Window {
    /// PARTITION BY expressions.
    pub partitions: Vec<Node>,
    /// ORDER BY entries.
    pub orders: Vec<Node>,
    /// Frame clause.
    pub frame: Option<Frame>,
}

impl Window {
    /// Creates an empty window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends PARTITION BY expressions.
    #[must_use]
    pub fn partition<I>(mut self, exprs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.partitions.extend(exprs.into_iter().map(Into::into));
        self
    }

    /// Appends ORDER BY entries.
    #[must_use]
    pub fn order<I>(mut self, exprs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.orders.extend(exprs.into_iter().map(Into::into));
        self
    }

    /// Sets the frame clause.
    #[must_use]
    pub fn frame(mut self, frame: Frame) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Sets a ROWS frame.
    #[must_use]
    pub fn rows(self, extent: impl Into<FrameExtent>) -> Self {
        self.frame(Frame::rows(extent))
    }

    /// Sets a RANGE frame.
    #[must_use]
    pub fn range(self, extent: impl Into<FrameExtent>) -> Self {
        self.frame(Frame::range(extent))
    }
}

/// A window declared in a core's WINDOW clause.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedWindow {
    /// Window name, rendered as a quoted identifier.
    pub name: String,
    /// The definition.
    pub window: Window,
}

// SPDX-License-Identifier: PMPL-1.0-or-later
//! Screen-space bounding boxes.

use serde::{Deserialize, Serialize};

/// Axis-aligned integer rectangle, origin top-left.
///
/// `right` and `bottom` are exclusive. A rect is empty when
/// `left >= right || top >= bottom`; width and height can be negative for
/// malformed captures and are reported as-is. Both are `i64` so that any
/// pair of `i32` edges has a representable extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> i64 {
        self.right as i64 - self.left as i64
    }

    pub fn height(&self) -> i64 {
        self.bottom as i64 - self.top as i64
    }

    pub fn center_x(&self) -> i32 {
        // Always lies between left and right, so it fits back into i32
        (self.left as i64 + self.width() / 2) as i32
    }

    pub fn center_y(&self) -> i32 {
        (self.top as i64 + self.height() / 2) as i32
    }

    /// Center point as `(x, y)`
    pub fn center(&self) -> (i32, i32) {
        (self.center_x(), self.center_y())
    }

    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Half-open containment test. Always false for empty rects.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        !self.is_empty() && x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{}][{},{}]", self.left, self.top, self.right, self.bottom)
    }
}

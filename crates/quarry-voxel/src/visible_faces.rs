//! Bitmask for tracking which of a block's six faces are visible.

use crate::face::Face;

/// Bitmask indicating which of a block's 6 faces are visible.
///
/// Bit `i` corresponds to [`Face`] with index `i`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VisibleFaces(pub u8);

impl VisibleFaces {
    /// No faces visible.
    pub const NONE: Self = Self(0);
    /// All six faces visible.
    pub const ALL: Self = Self(0b0011_1111);

    /// Returns `true` if the given face is visible.
    pub fn is_visible(self, face: Face) -> bool {
        self.0 & (1 << face as u8) != 0
    }

    /// Marks the face as visible or hidden.
    pub fn set(&mut self, face: Face, visible: bool) {
        if visible {
            self.0 |= 1 << face as u8;
        } else {
            self.0 &= !(1 << face as u8);
        }
    }

    /// Returns `true` if at least one face is visible.
    pub fn any(self) -> bool {
        self.0 != 0
    }

    /// Returns the number of visible faces (0–6).
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates the visible faces in index order.
    pub fn iter(self) -> impl Iterator<Item = Face> {
        Face::ALL.into_iter().filter(move |f| self.is_visible(*f))
    }
}

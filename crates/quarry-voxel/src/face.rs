//! Block faces and horizontal chunk-neighbour directions.

use glam::{IVec3, Vec3};

/// One of the six faces bounding a block.
///
/// The discriminant is the face index used by the raycaster and the edit API,
/// and doubles as the bit index inside [`crate::VisibleFaces`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Face {
    /// +Y.
    Top = 0,
    /// −Y.
    Bottom = 1,
    /// +Z.
    Back = 2,
    /// −Z.
    Front = 3,
    /// −X.
    Left = 4,
    /// +X.
    Right = 5,
}

impl Face {
    /// All six faces in index order.
    pub const ALL: [Face; 6] = [
        Self::Top,
        Self::Bottom,
        Self::Back,
        Self::Front,
        Self::Left,
        Self::Right,
    ];

    /// Face for a raw index, or `None` outside `0..6`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the face index (0–5).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Grid offset from a block to its neighbour across this face.
    pub fn offset(self) -> IVec3 {
        match self {
            Self::Top => IVec3::Y,
            Self::Bottom => IVec3::NEG_Y,
            Self::Back => IVec3::Z,
            Self::Front => IVec3::NEG_Z,
            Self::Left => IVec3::NEG_X,
            Self::Right => IVec3::X,
        }
    }

    /// Outward unit normal.
    pub fn normal(self) -> Vec3 {
        self.offset().as_vec3()
    }

    /// The face pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Back => Self::Front,
            Self::Front => Self::Back,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Corner offsets of this face's quad relative to the block centre, for a
    /// unit cube, wound counter-clockwise when viewed from outside.
    pub fn corner_offsets(self) -> [Vec3; 4] {
        let h = 0.5;
        match self {
            Self::Top => [
                Vec3::new(-h, h, h),
                Vec3::new(h, h, h),
                Vec3::new(h, h, -h),
                Vec3::new(-h, h, -h),
            ],
            Self::Bottom => [
                Vec3::new(-h, -h, -h),
                Vec3::new(h, -h, -h),
                Vec3::new(h, -h, h),
                Vec3::new(-h, -h, h),
            ],
            Self::Back => [
                Vec3::new(-h, -h, h),
                Vec3::new(h, -h, h),
                Vec3::new(h, h, h),
                Vec3::new(-h, h, h),
            ],
            Self::Front => [
                Vec3::new(h, -h, -h),
                Vec3::new(-h, -h, -h),
                Vec3::new(-h, h, -h),
                Vec3::new(h, h, -h),
            ],
            Self::Left => [
                Vec3::new(-h, -h, -h),
                Vec3::new(-h, -h, h),
                Vec3::new(-h, h, h),
                Vec3::new(-h, h, -h),
            ],
            Self::Right => [
                Vec3::new(h, -h, h),
                Vec3::new(h, -h, -h),
                Vec3::new(h, h, -h),
                Vec3::new(h, h, h),
            ],
        }
    }
}

/// One of the four edge-adjacent chunk directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EdgeDirection {
    /// −Z neighbour.
    NegZ = 0,
    /// +Z neighbour.
    PosZ = 1,
    /// −X neighbour.
    NegX = 2,
    /// +X neighbour.
    PosX = 3,
}

impl EdgeDirection {
    /// All four edge directions.
    pub const ALL: [EdgeDirection; 4] = [Self::NegZ, Self::PosZ, Self::NegX, Self::PosX];

    /// Returns the direction index (0–3).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Grid step `(dx, dz)` in chunk units.
    pub fn grid_offset(self) -> (i32, i32) {
        match self {
            Self::NegZ => (0, -1),
            Self::PosZ => (0, 1),
            Self::NegX => (-1, 0),
            Self::PosX => (1, 0),
        }
    }

    /// The direction pointing back from the neighbour.
    pub fn opposite(self) -> Self {
        match self {
            Self::NegZ => Self::PosZ,
            Self::PosZ => Self::NegZ,
            Self::NegX => Self::PosX,
            Self::PosX => Self::NegX,
        }
    }

    /// Edge direction crossed by a local coordinate that left the chunk
    /// horizontally, or `None` when it is inside on X/Z.
    ///
    /// A coordinate outside on both X and Z is a corner, which no single face
    /// offset can produce; it also yields `None`.
    pub fn from_overflow(p: IVec3, width: usize) -> Option<Self> {
        let w = width as i32;
        let x_out = p.x < 0 || p.x >= w;
        let z_out = p.z < 0 || p.z >= w;
        match (x_out, z_out) {
            (true, false) if p.x < 0 => Some(Self::NegX),
            (true, false) => Some(Self::PosX),
            (false, true) if p.z < 0 => Some(Self::NegZ),
            (false, true) => Some(Self::PosZ),
            _ => None,
        }
    }
}

/// One of the four corner-adjacent (diagonal) chunk directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CornerDirection {
    /// +X +Z.
    PosXPosZ = 0,
    /// +X −Z.
    PosXNegZ = 1,
    /// −X +Z.
    NegXPosZ = 2,
    /// −X −Z.
    NegXNegZ = 3,
}

impl CornerDirection {
    /// All four corner directions.
    pub const ALL: [CornerDirection; 4] = [
        Self::PosXPosZ,
        Self::PosXNegZ,
        Self::NegXPosZ,
        Self::NegXNegZ,
    ];

    /// Returns the direction index (0–3).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Grid step `(dx, dz)` in chunk units.
    pub fn grid_offset(self) -> (i32, i32) {
        match self {
            Self::PosXPosZ => (1, 1),
            Self::PosXNegZ => (1, -1),
            Self::NegXPosZ => (-1, 1),
            Self::NegXNegZ => (-1, -1),
        }
    }

    /// The diagonal pointing back from the neighbour.
    pub fn opposite(self) -> Self {
        match self {
            Self::PosXPosZ => Self::NegXNegZ,
            Self::PosXNegZ => Self::NegXPosZ,
            Self::NegXPosZ => Self::PosXNegZ,
            Self::NegXNegZ => Self::PosXPosZ,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_faces_unique() {
        for (i, a) in Face::ALL.iter().enumerate() {
            for (j, b) in Face::ALL.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b);
                    assert_ne!(a.offset(), b.offset());
                }
            }
        }
    }

    #[test]
    fn test_face_index_roundtrip() {
        for face in Face::ALL {
            assert_eq!(Face::from_index(face.index()), Some(face));
        }
        assert_eq!(Face::from_index(6), None);
    }

    #[test]
    fn test_opposite_offsets_cancel() {
        for face in Face::ALL {
            assert_eq!(face.offset() + face.opposite().offset(), IVec3::ZERO);
        }
    }

    #[test]
    fn test_corners_lie_on_face_plane() {
        for face in Face::ALL {
            let n = face.normal();
            for c in face.corner_offsets() {
                assert!((c.dot(n) - 0.5).abs() < 1e-6, "{face:?} corner {c}");
            }
        }
    }

    #[test]
    fn test_edge_direction_from_overflow() {
        assert_eq!(
            EdgeDirection::from_overflow(IVec3::new(16, 3, 4), 16),
            Some(EdgeDirection::PosX)
        );
        assert_eq!(
            EdgeDirection::from_overflow(IVec3::new(2, 3, -1), 16),
            Some(EdgeDirection::NegZ)
        );
        assert_eq!(EdgeDirection::from_overflow(IVec3::new(2, 30, 4), 16), None);
        assert_eq!(EdgeDirection::from_overflow(IVec3::new(-1, 0, 16), 16), None);
    }

    #[test]
    fn test_edge_and_corner_opposites_cancel() {
        for dir in EdgeDirection::ALL {
            let (ax, az) = dir.grid_offset();
            let (bx, bz) = dir.opposite().grid_offset();
            assert_eq!((ax + bx, az + bz), (0, 0));
        }
        for dir in CornerDirection::ALL {
            let (ax, az) = dir.grid_offset();
            let (bx, bz) = dir.opposite().grid_offset();
            assert_eq!((ax + bx, az + bz), (0, 0));
        }
    }
}

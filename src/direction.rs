/**
 * A face direction on a `D`-dimensional Cartesian cell. The `2 * D`
 * directions are linearized so that direction `2k` is the lower side of
 * axis `k` and direction `2k + 1` the upper side; the opposite direction
 * flips the orientation bit while preserving the axis.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Direction(usize);




// ============================================================================
impl Direction {


    /**
     * Construct a direction from its linear index in `[0, 2D)`.
     */
    pub fn from_linear(index: usize) -> Self {
        Self(index)
    }


    /**
     * Construct the direction on the lower (`positive = false`) or upper
     * (`positive = true`) side of the given axis.
     */
    pub fn along(axis: usize, positive: bool) -> Self {
        Self(2 * axis + positive as usize)
    }


    /**
     * Return the linear index of this direction.
     */
    pub fn to_linear(self) -> usize {
        self.0
    }


    /**
     * Return the axis this direction lies along.
     */
    pub fn axis(self) -> usize {
        self.0 >> 1
    }


    /**
     * Determine whether this direction points to the upper side of its axis.
     */
    pub fn is_positive(self) -> bool {
        self.0 & 1 == 1
    }


    /**
     * Return the antipodal direction along the same axis.
     */
    pub fn opposite(self) -> Self {
        Self(self.0 ^ 1)
    }


    /**
     * Return an iterator over all `2 * D` directions for the given
     * dimension.
     */
    pub fn all<const D: usize>() -> impl Iterator<Item = Self> {
        (0..2 * D).map(Self)
    }
}




/**
 * Determine whether the child octant with the given index lies on the upper
 * side of the given axis. Octant indexes have bit `k` set when the child
 * occupies the upper half of axis `k`.
 */
pub fn octant_is_upper(octant: usize, axis: usize) -> bool {
    octant >> axis & 1 == 1
}




/**
 * Return the octant index mirrored across the given axis. The mirrored
 * octant is the sibling sharing the face normal to that axis, or, across a
 * parent face, the facing child of the parent's neighbor.
 */
pub fn mirror_octant(octant: usize, axis: usize) -> usize {
    octant ^ (1 << axis)
}

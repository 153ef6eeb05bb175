use std::error;
use std::fmt;

/**
 * Error to represent an invalid structural operation on the mesh tree: a
 * growth request that would overflow the arena, or a node id / range
 * argument outside its required bound. Operations validate completely
 * before mutating, so observing one of these means the tree is unchanged.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Required number of slots, and the fixed arena capacity.
    CapacityExceeded(usize, usize),

    /// Offending index, and the (inclusive) upper bound it must satisfy.
    IndexOutOfRange(usize, usize),
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        use Error::*;

        match self {
            CapacityExceeded(required, capacity) => {
                write!(fmt, "required {} slots but the arena capacity is {}", required, capacity)
            }
            IndexOutOfRange(index, bound) => {
                write!(fmt, "index {} is out of range (bound is {})", index, bound)
            }
        }
    }
}

impl error::Error for Error {}

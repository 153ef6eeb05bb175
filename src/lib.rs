//! Dendron is the mesh backbone of a discontinuous-Galerkin solver for
//! time-dependent conservation laws on adaptively refined Cartesian grids.
//! It provides a fixed-capacity, arena-allocated quadtree (2D) or octree
//! (3D) over a recursively subdivided square/cubic domain, with explicit
//! parent/child/neighbor adjacency, in-place growth, shrinkage, and
//! compaction, and O(1) cell geometry queries. The numerical side of the
//! solver (fluxes, polynomial bases, time integration) consumes the node
//! ids and geometry exposed here but lives elsewhere; this crate performs
//! no floating-point PDE computation.

pub mod arena;
pub mod direction;
pub mod error;
pub mod geometry;
pub mod meshing;
pub mod tree;

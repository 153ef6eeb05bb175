use crate::arena::{Arena, NodeId, NIL};
use crate::direction::Direction;
use crate::error::Error;
use crate::geometry;




/**
 * A fixed-capacity quadtree (`D = 2`) or octree (`D = 3`) over a recursively
 * subdivided square/cubic domain. Nodes live in an arena of parallel
 * attribute tables and reference each other through plain integer ids: ids
 * `[1, size]` are the live nodes (no holes), id 0 is nil, and id
 * `capacity + 1` is the scratch slot used only during swaps. The root is id
 * 1, at level 0, centered on the domain center.
 *
 * The tree manages structure, adjacency, and geometry only; it performs no
 * PDE arithmetic. Structural operations validate their arguments completely
 * before the first write, so a returned error means the tree is unchanged.
 *
 * The tree is not internally synchronized. Structural mutations must be
 * serialized by the caller; read-only queries may run from many threads as
 * long as no mutation is in flight.
 */
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(bound(
    serialize = "[f64; D]: serde::Serialize",
    deserialize = "[f64; D]: serde::Deserialize<'de>"))]
pub struct Tree<const D: usize> {
    arena: Arena<D>,
    size: usize,
    domain_center: [f64; D],
    domain_length: f64,
}




// ============================================================================
impl<const D: usize> Tree<D> {


    /// The number of children of a refined node.
    pub const NUM_CHILDREN: usize = 1 << D;


    /**
     * Create a tree with the given arena capacity and domain geometry,
     * holding a single root node. The capacity is fixed until an explicit
     * `reset`.
     */
    pub fn new(capacity: usize, domain_center: [f64; D], domain_length: f64) -> Self {
        assert!(capacity >= 1, "tree capacity must hold at least the root");

        let mut tree = Self {
            arena: Arena::new(capacity),
            size: 0,
            domain_center,
            domain_length,
        };
        tree.init_root();
        tree
    }

    fn init_root(&mut self) {
        self.size = 1;
        self.arena.set_level(1, 0);
        self.arena.set_center(1, self.domain_center);
    }


    /**
     * Return the number of live nodes. Live ids are exactly `[1, size()]`.
     */
    pub fn size(&self) -> usize {
        self.size
    }


    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }


    /**
     * Return the id of the scratch slot, `capacity + 1`. The scratch slot
     * is never live; it only holds a node transiently inside `swap`.
     */
    pub fn scratch_id(&self) -> NodeId {
        self.arena.scratch_id()
    }


    pub fn domain_center(&self) -> [f64; D] {
        self.domain_center
    }


    pub fn domain_length(&self) -> f64 {
        self.domain_length
    }


    /**
     * Determine whether the given slot holds a live node.
     */
    pub fn is_used(&self, id: NodeId) -> bool {
        self.arena.is_used(id)
    }


    /**
     * Determine whether the given node is a leaf (an active computational
     * cell with no children).
     */
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.arena.is_used(id) && !self.has_children(id)
    }


    pub fn level(&self, id: NodeId) -> i32 {
        self.arena.level(id)
    }


    /**
     * Return the geometric center of the given node's cell.
     */
    pub fn center(&self, id: NodeId) -> [f64; D] {
        self.arena.center(id)
    }


    /**
     * Return the edge length of the given node's cell.
     */
    pub fn length(&self, id: NodeId) -> f64 {
        geometry::cell_length(self.domain_length, self.arena.level(id))
    }


    pub fn parent(&self, id: NodeId) -> NodeId {
        self.arena.parent(id)
    }


    pub fn has_parent(&self, id: NodeId) -> bool {
        self.arena.parent(id) != NIL
    }


    pub fn child(&self, id: NodeId, octant: usize) -> NodeId {
        self.arena.child(id, octant)
    }


    pub fn has_child(&self, id: NodeId, octant: usize) -> bool {
        self.arena.child(id, octant) != NIL
    }


    pub fn has_children(&self, id: NodeId) -> bool {
        self.arena.children(id).iter().any(|&c| c != NIL)
    }


    pub fn n_children(&self, id: NodeId) -> usize {
        self.arena.children(id).iter().filter(|&&c| c != NIL).count()
    }


    /**
     * Return the child list of the given node, in octant order.
     */
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.arena.children(id)
    }


    pub fn neighbor(&self, id: NodeId, direction: Direction) -> NodeId {
        self.arena.neighbor(id, direction)
    }


    pub fn has_neighbor(&self, id: NodeId, direction: Direction) -> bool {
        self.arena.neighbor(id, direction) != NIL
    }


    /**
     * Determine whether the given node has a same-level neighbor in the
     * given direction, or a neighbor across a coarser boundary (the parent
     * has a neighbor there).
     */
    pub fn has_any_neighbor(&self, id: NodeId, direction: Direction) -> bool {
        if self.has_neighbor(id, direction) {
            return true
        }
        let parent = self.arena.parent(id);
        parent != NIL && self.arena.neighbor(parent, direction) != NIL
    }


    /**
     * Return an iterator over all live node ids.
     */
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        1..self.size + 1
    }


    /**
     * Return an iterator over the ids of all leaf nodes.
     */
    pub fn leaf_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_ids().filter(move |&id| self.is_leaf(id))
    }


    /**
     * Set the level of a node. Part of the raw fill surface used by the
     * refinement driver to populate slots opened by `insert`; the driver is
     * responsible for restoring the structural invariants before the next
     * query phase.
     */
    pub fn set_level(&mut self, id: NodeId, level: i32) {
        self.arena.set_level(id, level)
    }


    pub fn set_center(&mut self, id: NodeId, center: [f64; D]) {
        self.arena.set_center(id, center)
    }


    pub fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        self.arena.set_parent(id, parent)
    }


    pub fn set_child(&mut self, id: NodeId, octant: usize, child: NodeId) {
        self.arena.set_child(id, octant, child)
    }


    pub fn set_neighbor(&mut self, id: NodeId, direction: Direction, neighbor: NodeId) {
        self.arena.set_neighbor(id, direction, neighbor)
    }


    /**
     * Grow the tree by `count` nodes at the tail. The newly exposed slots
     * are initialized to the unused state and must be filled by the caller.
     * Fails with `CapacityExceeded` if the tree would outgrow its arena.
     */
    pub fn append(&mut self, count: usize) -> Result<(), Error> {
        if self.size + count > self.capacity() {
            return Err(Error::CapacityExceeded(self.size + count, self.capacity()))
        }
        self.arena.invalidate(self.size + 1, self.size + count);
        self.size += count;
        Ok(())
    }


    /**
     * Remove the trailing `count` nodes, connectivity-aware. Fails with
     * `IndexOutOfRange` if fewer than `count` nodes are live.
     */
    pub fn shrink(&mut self, count: usize) -> Result<(), Error> {
        if count > self.size {
            return Err(Error::IndexOutOfRange(count, self.size));
        }
        if count == 0 {
            return Ok(())
        }
        self.remove_shift(self.size - count + 1, self.size)
    }


    /**
     * Reserve `count` new ids at `position` by growing the tree and sliding
     * `[position, size]` right by `count`. The opened slots
     * `[position, position + count - 1]` are left in the unused state; the
     * caller (the refinement driver) fills in their level, center, and
     * links. Fails with `IndexOutOfRange` for a position outside
     * `[1, size + 1]` and with `CapacityExceeded` if the tree would outgrow
     * its arena.
     */
    pub fn insert(&mut self, position: NodeId, count: usize) -> Result<(), Error> {
        if position < 1 || position > self.size + 1 {
            return Err(Error::IndexOutOfRange(position, self.size + 1));
        }
        if self.size + count > self.capacity() {
            return Err(Error::CapacityExceeded(self.size + count, self.capacity()));
        }
        if count == 0 {
            return Ok(())
        }
        let old_size = self.size;
        self.size += count;

        if position <= old_size {
            self.relocate(position, old_size, position + count)
        }
        Ok(())
    }


    /**
     * Delete the connectivity of the inclusive id range and put its slots
     * into the unused state. Neither `size` nor the positions of other
     * nodes change, so a gap is left behind; this is for callers that
     * compact separately, and for clearing the scratch slot. Bounds are
     * `[1, capacity + 1]`.
     */
    pub fn erase(&mut self, first: NodeId, last: NodeId) -> Result<(), Error> {
        if last < first {
            return Ok(())
        }
        if first < 1 {
            return Err(Error::IndexOutOfRange(first, 1));
        }
        if last > self.scratch_id() {
            return Err(Error::IndexOutOfRange(last, self.scratch_id()));
        }
        self.delete_connectivity(first, last);
        self.arena.invalidate(first, last);
        Ok(())
    }


    /**
     * Remove the inclusive id range `[first, last]`, then slide every node
     * after `last` down to `first`. The relative order of all surviving
     * nodes is preserved, at the cost of relocating the full tail. Bounds
     * are `[1, size]`.
     */
    pub fn remove_shift(&mut self, first: NodeId, last: NodeId) -> Result<(), Error> {
        self.check_live_range(first, last)?;

        if last < first {
            return Ok(())
        }
        self.delete_connectivity(first, last);
        self.arena.invalidate(first, last);

        if last < self.size {
            self.relocate(last + 1, self.size, first)
        }
        self.size -= last - first + 1;
        Ok(())
    }


    /**
     * Remove the inclusive id range `[first, last]`, then move the trailing
     * nodes into the freed slots. Costs O(count) instead of O(tail length),
     * but does not preserve node order: surviving ids are not stable across
     * this call, so collaborators caching ids must revalidate. Bounds are
     * `[1, size]`.
     */
    pub fn remove_fill(&mut self, first: NodeId, last: NodeId) -> Result<(), Error> {
        self.check_live_range(first, last)?;

        if last < first {
            return Ok(())
        }
        let count = last - first + 1;
        self.delete_connectivity(first, last);
        self.arena.invalidate(first, last);

        if last < self.size {
            let tail = (self.size - count + 1).max(last + 1);
            self.relocate(tail, self.size, first)
        }
        self.size -= count;
        Ok(())
    }


    /**
     * Relocate the inclusive id range `[first, last]` to start at
     * `destination`, repairing connectivity and invalidating the vacated
     * slots. Destination slots outside the source range must be unused, or
     * their contents (and any links to them) are lost. Bounds are
     * `[1, capacity]`.
     */
    pub fn move_block(&mut self, first: NodeId, last: NodeId, destination: NodeId) -> Result<(), Error> {
        if last < first {
            return Ok(())
        }
        if first < 1 || destination < 1 {
            return Err(Error::IndexOutOfRange(first.min(destination), 1));
        }
        if last > self.capacity() {
            return Err(Error::IndexOutOfRange(last, self.capacity()));
        }
        if destination + (last - first) > self.capacity() {
            return Err(Error::IndexOutOfRange(destination + (last - first), self.capacity()));
        }
        self.relocate(first, last, destination);
        Ok(())
    }


    /**
     * Exchange the nodes at ids `a` and `b`, repairing all connectivity.
     * The exchange is a three-hop relocation through the scratch slot, so
     * no id is ever transiently duplicated; the scratch slot is invalidated
     * afterwards. Bounds are `[1, size]`.
     */
    pub fn swap(&mut self, a: NodeId, b: NodeId) -> Result<(), Error> {
        for id in [a, b] {
            if id < 1 || id > self.size {
                return Err(Error::IndexOutOfRange(id, self.size));
            }
        }
        if a == b {
            return Ok(())
        }
        let scratch = self.arena.scratch_id();

        self.hop(a, scratch);
        self.hop(b, a);
        self.hop(scratch, b);
        self.arena.invalidate(scratch, scratch);
        Ok(())
    }


    /**
     * Reinitialize the arena with a new capacity and no live nodes. The
     * caller replays the mesh afterwards (this is the grow-and-retry path
     * for a driver that hit `CapacityExceeded`).
     */
    pub fn reset(&mut self, capacity: usize) {
        self.arena.reset(capacity);
        self.size = 0;
    }


    /**
     * Invalidate every slot and drop all live nodes, keeping the capacity.
     */
    pub fn clear(&mut self) {
        let scratch = self.arena.scratch_id();
        self.arena.invalidate(1, scratch);
        self.size = 0;
    }


    fn check_live_range(&self, first: NodeId, last: NodeId) -> Result<(), Error> {
        if last < first {
            return Ok(())
        }
        if first < 1 {
            return Err(Error::IndexOutOfRange(first, 1));
        }
        if last > self.size {
            return Err(Error::IndexOutOfRange(last, self.size));
        }
        Ok(())
    }


    /**
     * Clear every link pointing at a node in the inclusive id range: the
     * slot in its parent's child list, the parent id of each of its
     * children (orphaning them), and the backlink on each same-level
     * neighbor. Must run before a slot is invalidated or overwritten.
     */
    fn delete_connectivity(&mut self, first: NodeId, last: NodeId) {
        for id in first..=last {
            let parent = self.arena.parent(id);

            if parent != NIL {
                for octant in 0..Self::NUM_CHILDREN {
                    if self.arena.child(parent, octant) == id {
                        self.arena.set_child(parent, octant, NIL)
                    }
                }
            }
            for octant in 0..Self::NUM_CHILDREN {
                let child = self.arena.child(id, octant);

                if child != NIL {
                    self.arena.set_parent(child, NIL)
                }
            }
            for direction in Direction::all::<D>() {
                let neighbor = self.arena.neighbor(id, direction);

                if neighbor != NIL {
                    self.arena.set_neighbor(neighbor, direction.opposite(), NIL)
                }
            }
        }
    }


    /**
     * Repair connectivity after the id range `[first, last]` has been
     * bulk-copied to start at `destination`. Walks the target slots: a
     * referenced id inside the moved range is itself relocated, so the
     * reference is shifted by the offset; a referenced id outside the range
     * is stationary, so its backlink is patched to the new location. The
     * stationary parent's child slot is identified geometrically (by the
     * octant containing the moved node's center), which stays unambiguous
     * even when source and target ranges overlap.
     */
    fn move_connectivity(&mut self, first: NodeId, last: NodeId, destination: NodeId) {
        if last < first || destination == first {
            return
        }
        let offset = destination as i64 - first as i64;
        let moved = |id: NodeId| id >= first && id <= last;
        let shifted = |id: NodeId| (id as i64 + offset) as NodeId;

        for source in first..=last {
            let target = shifted(source);
            let parent = self.arena.parent(target);

            if parent != NIL {
                if moved(parent) {
                    self.arena.set_parent(target, shifted(parent))
                } else {
                    let octant = geometry::containing_octant(
                        self.arena.center(parent),
                        self.arena.center(target));
                    debug_assert_eq!(self.arena.child(parent, octant), source);
                    self.arena.set_child(parent, octant, target)
                }
            }
            for octant in 0..Self::NUM_CHILDREN {
                let child = self.arena.child(target, octant);

                if child != NIL {
                    if moved(child) {
                        self.arena.set_child(target, octant, shifted(child))
                    } else {
                        self.arena.set_parent(child, target)
                    }
                }
            }
            for direction in Direction::all::<D>() {
                let neighbor = self.arena.neighbor(target, direction);

                if neighbor != NIL {
                    if moved(neighbor) {
                        self.arena.set_neighbor(target, direction, shifted(neighbor))
                    } else {
                        self.arena.set_neighbor(neighbor, direction.opposite(), target)
                    }
                }
            }
        }
    }


    /**
     * Copy the id range to its destination, repair connectivity, and
     * invalidate whatever part of the source range the target does not
     * cover.
     */
    fn relocate(&mut self, first: NodeId, last: NodeId, destination: NodeId) {
        if last < first || destination == first {
            return
        }
        let count = last - first + 1;
        self.arena.copy_block(first, last, destination);
        self.move_connectivity(first, last, destination);

        if destination > last || destination + count <= first {
            self.arena.invalidate(first, last)
        } else if destination > first {
            self.arena.invalidate(first, destination - 1)
        } else {
            self.arena.invalidate(destination + count, last)
        }
    }


    /**
     * Single-node relocation hop used by `swap`: copy one slot and repair
     * its links.
     */
    fn hop(&mut self, from: NodeId, to: NodeId) {
        self.arena.copy_block(from, from, to);
        self.move_connectivity(from, from, to);
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use crate::direction::Direction;
    use crate::arena::{NodeId, NIL};
    use crate::error::Error;
    use crate::geometry;
    use super::Tree;


    /// Fill the slots [first, first + 3] as the four children of a 2D leaf,
    /// the way a refinement driver fills slots opened by `insert`.
    fn fill_children(tree: &mut Tree<2>, parent: NodeId, first: NodeId) {
        let level = tree.level(parent) + 1;

        for octant in 0..4 {
            let id = first + octant;
            tree.set_level(id, level);
            tree.set_center(id, geometry::child_center(
                tree.center(parent),
                tree.domain_length(),
                level,
                octant));
            tree.set_parent(id, parent);
            tree.set_child(parent, octant, id);

            // Sibling (inner-face) neighbors
            for axis in 0..2 {
                let sibling = first + crate::direction::mirror_octant(octant, axis);
                let upper = crate::direction::octant_is_upper(octant, axis);
                tree.set_neighbor(id, Direction::along(axis, !upper), sibling);
            }
        }
    }


    fn assert_used_nodes_match(a: &Tree<2>, b: &Tree<2>) {
        assert_eq!(a.size(), b.size());

        for id in 1..=a.size() {
            assert_eq!(a.level(id), b.level(id));
            assert_eq!(a.center(id), b.center(id));
            assert_eq!(a.parent(id), b.parent(id));
            assert_eq!(a.children(id), b.children(id));

            for d in Direction::all::<2>() {
                assert_eq!(a.neighbor(id, d), b.neighbor(id, d));
            }
        }
    }


    #[test]
    fn new_tree_has_a_root_and_nothing_else() {
        let tree = Tree::<2>::new(10, [0.0, 0.0], 1.0);

        assert_eq!(tree.size(), 1);
        assert_eq!(tree.capacity(), 10);
        assert_eq!(tree.scratch_id(), 11);
        assert_eq!(tree.level(1), 0);
        assert_eq!(tree.center(1), [0.0, 0.0]);
        assert!(!tree.has_parent(1));
        assert!(tree.is_leaf(1));
        assert!(!tree.is_used(2));
    }


    #[test]
    fn insert_then_erase_restores_the_initial_state() {
        // The full refinement round trip on the raw structural surface:
        // open four slots for the root's children, fill them, then tear
        // them down again.
        let fresh = Tree::<2>::new(10, [0.0, 0.0], 1.0);
        let mut tree = fresh.clone();

        tree.insert(2, 4).unwrap();
        assert_eq!(tree.size(), 5);
        assert!(!tree.is_used(2));

        fill_children(&mut tree, 1, 2);
        assert_eq!(tree.n_children(1), 4);
        assert!(!tree.is_leaf(1));
        assert_eq!(tree.parent(3), 1);

        tree.erase(2, 5).unwrap();
        assert_eq!(tree.n_children(1), 0);
        tree.remove_shift(2, 5).unwrap();

        assert_eq!(tree.size(), 1);
        assert!(tree.is_leaf(1));
        assert_used_nodes_match(&tree, &fresh);
    }


    #[test]
    fn append_past_capacity_fails_without_mutation() {
        let mut tree = Tree::<2>::new(4, [0.0, 0.0], 1.0);
        tree.append(3).unwrap();
        assert_eq!(tree.size(), 4);

        let snapshot = tree.clone();
        assert_eq!(tree.append(1), Err(Error::CapacityExceeded(5, 4)));
        assert_used_nodes_match(&tree, &snapshot);
    }


    #[test]
    fn insert_validates_before_mutating() {
        let mut tree = Tree::<2>::new(4, [0.0, 0.0], 1.0);

        assert_eq!(tree.insert(3, 1), Err(Error::IndexOutOfRange(3, 2)));
        assert_eq!(tree.insert(1, 9), Err(Error::CapacityExceeded(10, 4)));
        assert_eq!(tree.size(), 1);
    }


    #[test]
    fn remove_shift_preserves_survivor_order() {
        let mut tree = Tree::<2>::new(20, [0.0, 0.0], 1.0);
        tree.insert(2, 4).unwrap();
        fill_children(&mut tree, 1, 2);

        // Refine the (-,-) child too, so there is a tail to slide down.
        tree.insert(6, 4).unwrap();
        fill_children(&mut tree, 2, 6);
        assert_eq!(tree.size(), 9);

        let tail: Vec<_> = (6..=9).map(|id| tree.center(id)).collect();

        // Remove the first sibling group except its refined first member.
        tree.remove_shift(3, 5).unwrap();
        assert_eq!(tree.size(), 6);

        for (id, center) in (3..=6).zip(tail) {
            assert_eq!(tree.center(id), center);
            assert_eq!(tree.parent(id), 2);
        }
        assert_eq!(tree.children(2), [3, 4, 5, 6]);
    }


    #[test]
    fn remove_fill_preserves_the_survivor_set() {
        let mut tree = Tree::<2>::new(20, [0.0, 0.0], 1.0);
        tree.insert(2, 4).unwrap();
        fill_children(&mut tree, 1, 2);
        tree.insert(6, 4).unwrap();
        fill_children(&mut tree, 3, 6);
        assert_eq!(tree.size(), 9);

        let mut survivors: Vec<_> = tree
            .node_ids()
            .filter(|id| !(4..=5).contains(id))
            .map(|id| (tree.level(id), tree.center(id).map(f64::to_bits)))
            .collect();

        tree.remove_fill(4, 5).unwrap();
        assert_eq!(tree.size(), 7);

        let mut remaining: Vec<_> = tree
            .node_ids()
            .map(|id| (tree.level(id), tree.center(id).map(f64::to_bits)))
            .collect();

        survivors.sort_by(|a, b| a.partial_cmp(b).unwrap());
        remaining.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(survivors, remaining);

        // The relocated tail nodes still point at their parent, and the
        // parent's child list found them at their new ids.
        for octant in 0..4 {
            let child = tree.child(3, octant);
            assert_ne!(child, NIL);
            assert_eq!(tree.parent(child), 3);
        }
    }


    #[test]
    fn swap_repairs_all_adjacency() {
        let mut tree = Tree::<2>::new(20, [0.0, 0.0], 1.0);
        tree.insert(2, 4).unwrap();
        fill_children(&mut tree, 1, 2);

        let center_a = tree.center(2);
        let center_b = tree.center(5);

        tree.swap(2, 5).unwrap();

        assert_eq!(tree.center(2), center_b);
        assert_eq!(tree.center(5), center_a);
        assert_eq!(tree.children(1), [5, 3, 4, 2]);
        assert!(!tree.is_used(tree.scratch_id()));

        // Also exchange two nodes that are mutual face neighbors, which
        // routes every hop through the backlink repair.
        tree.swap(2, 3).unwrap();
        assert!(!tree.is_used(tree.scratch_id()));

        // Neighbor symmetry must hold for every pair after the exchanges.
        for id in tree.node_ids() {
            for d in Direction::all::<2>() {
                let n = tree.neighbor(id, d);
                if n != NIL {
                    assert_eq!(tree.neighbor(n, d.opposite()), id);
                }
            }
        }
    }


    #[test]
    fn neighbor_across_a_coarser_boundary_is_detected() {
        let mut tree = Tree::<2>::new(20, [0.0, 0.0], 1.0);
        tree.insert(2, 4).unwrap();
        fill_children(&mut tree, 1, 2);
        tree.insert(6, 4).unwrap();
        fill_children(&mut tree, 2, 6);

        // Child 6 is the (-,-) grandchild; its upper-x neighbor is its
        // sibling, but its lower-x side faces the domain boundary.
        let east = Direction::along(0, true);
        let west = Direction::along(0, false);
        let north = Direction::along(1, true);

        assert!(tree.has_neighbor(6, east));
        assert!(!tree.has_neighbor(6, west));
        assert!(!tree.has_any_neighbor(6, west));

        // Grandchild 7 faces cell 3 across a coarser boundary on its upper
        // x side: no same-level neighbor, but the parent has one.
        assert!(!tree.has_neighbor(7, east));
        assert!(tree.has_any_neighbor(7, east));
        assert!(tree.has_any_neighbor(7, north));
    }


    #[test]
    fn shrink_and_clear_reduce_to_expected_sizes() {
        let mut tree = Tree::<2>::new(10, [0.0, 0.0], 1.0);
        tree.insert(2, 4).unwrap();
        fill_children(&mut tree, 1, 2);

        tree.shrink(2).unwrap();
        assert_eq!(tree.size(), 3);
        assert_eq!(tree.n_children(1), 2);
        assert_eq!(tree.shrink(7), Err(Error::IndexOutOfRange(7, 3)));

        tree.clear();
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.capacity(), 10);

        tree.reset(25);
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.capacity(), 25);
    }


    #[test]
    fn serde_round_trip_reproduces_the_tree() {
        let mut tree = Tree::<2>::new(10, [0.5, 0.5], 2.0);
        tree.insert(2, 4).unwrap();
        fill_children(&mut tree, 1, 2);

        let mut buffer = Vec::new();
        ciborium::ser::into_writer(&tree, &mut buffer).unwrap();
        let copy: Tree<2> = ciborium::de::from_reader(buffer.as_slice()).unwrap();

        assert_eq!(copy.capacity(), tree.capacity());
        assert_eq!(copy.domain_center(), tree.domain_center());
        assert_eq!(copy.domain_length(), tree.domain_length());
        assert_used_nodes_match(&tree, &copy);
    }
}

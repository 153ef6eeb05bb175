use crate::direction::Direction;




/// Type alias for a node id: an index into the arena's attribute tables.
pub type NodeId = usize;




/// The nil id, marking an absent parent, child, or neighbor.
pub const NIL: NodeId = 0;




/**
 * Fixed-capacity parallel attribute tables for the nodes of a mesh tree,
 * indexed directly by node id. Slot 0 is a permanently-invalid sentinel (the
 * nil id), slots `[1, capacity]` hold nodes, and slot `capacity + 1` is the
 * scratch slot used as temporary storage during swaps. All tables are
 * allocated up front; no reallocation happens during structural edits.
 *
 * The child list is a flat table with stride `2^D` (octant order: bit `k`
 * set means the upper side of axis `k`) and the neighbor list has stride
 * `2 * D` (directions linearized as in [`Direction`]). An unused slot has
 * level `-1`, all-NaN center, and nil adjacency everywhere.
 */
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(bound(
    serialize = "[f64; D]: serde::Serialize",
    deserialize = "[f64; D]: serde::Deserialize<'de>"))]
pub struct Arena<const D: usize> {
    capacity: usize,
    parent: Vec<NodeId>,
    children: Vec<NodeId>,
    neighbors: Vec<NodeId>,
    level: Vec<i32>,
    center: Vec<[f64; D]>,
}




// ============================================================================
impl<const D: usize> Arena<D> {


    /// The number of children of a refined node.
    pub const NUM_CHILDREN: usize = 1 << D;


    /// The number of face directions.
    pub const NUM_DIRECTIONS: usize = 2 * D;


    /**
     * Allocate tables for the given capacity: the nil sentinel, `capacity`
     * node slots, and the scratch slot. Every slot starts out invalid.
     */
    pub fn new(capacity: usize) -> Self {
        let num_slots = capacity + 2;

        Self {
            capacity,
            parent: vec![NIL; num_slots],
            children: vec![NIL; num_slots * Self::NUM_CHILDREN],
            neighbors: vec![NIL; num_slots * Self::NUM_DIRECTIONS],
            level: vec![-1; num_slots],
            center: vec![[f64::NAN; D]; num_slots],
        }
    }


    /**
     * Reinitialize all tables with a new capacity. Every slot, including
     * the scratch slot, is invalid afterwards.
     */
    pub fn reset(&mut self, capacity: usize) {
        *self = Self::new(capacity)
    }


    pub fn capacity(&self) -> usize {
        self.capacity
    }


    /**
     * Return the id of the scratch slot, one past the last node slot.
     */
    pub fn scratch_id(&self) -> NodeId {
        self.capacity + 1
    }


    /**
     * Determine whether the given slot holds a live node.
     */
    pub fn is_used(&self, id: NodeId) -> bool {
        self.level[id] >= 0
    }


    pub fn parent(&self, id: NodeId) -> NodeId {
        self.parent[id]
    }


    pub fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        self.parent[id] = parent
    }


    pub fn child(&self, id: NodeId, octant: usize) -> NodeId {
        self.children[id * Self::NUM_CHILDREN + octant]
    }


    pub fn set_child(&mut self, id: NodeId, octant: usize, child: NodeId) {
        self.children[id * Self::NUM_CHILDREN + octant] = child
    }


    /**
     * Return the child list of the given node, in octant order.
     */
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.children[id * Self::NUM_CHILDREN..(id + 1) * Self::NUM_CHILDREN]
    }


    pub fn neighbor(&self, id: NodeId, direction: Direction) -> NodeId {
        self.neighbors[id * Self::NUM_DIRECTIONS + direction.to_linear()]
    }


    pub fn set_neighbor(&mut self, id: NodeId, direction: Direction, neighbor: NodeId) {
        self.neighbors[id * Self::NUM_DIRECTIONS + direction.to_linear()] = neighbor
    }


    /**
     * Return the neighbor list of the given node, in linear direction order.
     */
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.neighbors[id * Self::NUM_DIRECTIONS..(id + 1) * Self::NUM_DIRECTIONS]
    }


    pub fn level(&self, id: NodeId) -> i32 {
        self.level[id]
    }


    pub fn set_level(&mut self, id: NodeId, level: i32) {
        self.level[id] = level
    }


    pub fn center(&self, id: NodeId) -> [f64; D] {
        self.center[id]
    }


    pub fn set_center(&mut self, id: NodeId, center: [f64; D]) {
        self.center[id] = center
    }


    /**
     * Put every slot in the inclusive id range into the unused state: nil
     * parent, children, and neighbors, level `-1`, NaN center. This is the
     * only primitive that marks a slot unused; callers must have deleted
     * the slot's connectivity first or dangling links will remain.
     */
    pub fn invalidate(&mut self, first: NodeId, last: NodeId) {
        if last < first {
            return
        }
        self.parent[first..=last].fill(NIL);
        self.children[first * Self::NUM_CHILDREN..(last + 1) * Self::NUM_CHILDREN].fill(NIL);
        self.neighbors[first * Self::NUM_DIRECTIONS..(last + 1) * Self::NUM_DIRECTIONS].fill(NIL);
        self.level[first..=last].fill(-1);
        self.center[first..=last].fill([f64::NAN; D]);
    }


    /**
     * Bulk-copy every attribute column for the inclusive id range `[first,
     * last]` to the slots starting at `destination`. Source and destination
     * may overlap; each column is moved with memmove semantics (forward
     * when the destination precedes or fully follows the source, backward
     * when it overlaps from below), so no slot is read after it has been
     * overwritten.
     */
    pub fn copy_block(&mut self, first: NodeId, last: NodeId, destination: NodeId) {
        if last < first || destination == first {
            return
        }
        let count = last - first + 1;
        let c = Self::NUM_CHILDREN;
        let n = Self::NUM_DIRECTIONS;

        self.parent.copy_within(first..first + count, destination);
        self.children.copy_within(first * c..(first + count) * c, destination * c);
        self.neighbors.copy_within(first * n..(first + count) * n, destination * n);
        self.level.copy_within(first..first + count, destination);
        self.center.copy_within(first..first + count, destination);
    }
}

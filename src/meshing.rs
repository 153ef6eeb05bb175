use crate::arena::{NodeId, NIL};
use crate::direction::{mirror_octant, octant_is_upper, Direction};
use crate::error::Error;
use crate::geometry;
use crate::tree::Tree;
use rayon::prelude::*;
use std::ops::Range;




/**
 * Verdict of a refinement criterion on a single leaf cell.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdaptFlag {
    Refine,
    Coarsen,
    Keep,
}




/**
 * Replace a leaf with a full sibling group of `2^D` children at the next
 * level: append the children at the tail, derive their geometry, and wire
 * parent/child links, sibling neighbors across the inner faces, and
 * same-level neighbors (with backlinks) across the outer faces against the
 * children of the parent's neighbors. Outer faces toward a coarser or
 * absent region stay unlinked, per the tree's adjacency convention.
 *
 * Returns the contiguous id range of the new children, or
 * `CapacityExceeded` (with the tree unchanged) if they do not fit.
 * Panics if the target is not a leaf.
 */
pub fn split_leaf<const D: usize>(tree: &mut Tree<D>, id: NodeId) -> Result<Range<NodeId>, Error> {
    assert!(tree.is_leaf(id), "split target must be a leaf");

    let first = tree.size() + 1;
    let child_level = tree.level(id) + 1;
    tree.append(Tree::<D>::NUM_CHILDREN)?;

    for octant in 0..Tree::<D>::NUM_CHILDREN {
        let child = first + octant;

        tree.set_level(child, child_level);
        tree.set_center(child, geometry::child_center(
            tree.center(id),
            tree.domain_length(),
            child_level,
            octant));
        tree.set_parent(child, id);
        tree.set_child(id, octant, child);

        for direction in Direction::all::<D>() {
            let axis = direction.axis();

            if octant_is_upper(octant, axis) != direction.is_positive() {
                // The face is interior to the parent cell: the neighbor is
                // the sibling mirrored across this axis.
                tree.set_neighbor(child, direction, first + mirror_octant(octant, axis));
            } else {
                // The face lies on the parent's boundary: the neighbor is
                // the facing child of the parent's neighbor, if that
                // neighbor is refined.
                let adjacent = tree.neighbor(id, direction);

                if adjacent != NIL {
                    let facing = tree.child(adjacent, mirror_octant(octant, axis));

                    if facing != NIL {
                        tree.set_neighbor(child, direction, facing);
                        tree.set_neighbor(facing, direction.opposite(), child);
                    }
                }
            }
        }
    }
    Ok(first..first + Tree::<D>::NUM_CHILDREN)
}




/**
 * Remove a complete sibling group of leaf children and reactivate the
 * parent as a leaf. The children are removed with the order-preserving
 * `remove_shift`, one contiguous id run at a time from the highest run
 * down, so the ids of nodes below the group are unaffected.
 *
 * Panics if the target has no children or if any child is not a leaf.
 */
pub fn merge_children<const D: usize>(tree: &mut Tree<D>, parent: NodeId) -> Result<(), Error> {
    assert!(tree.has_children(parent), "merge target must have children");

    let mut ids: Vec<NodeId> = tree
        .children(parent)
        .iter()
        .copied()
        .filter(|&c| c != NIL)
        .collect();

    assert!(
        ids.iter().all(|&c| tree.is_leaf(c)),
        "merge target requires a sibling group of leaves");

    ids.sort_unstable();

    while let Some(last) = ids.pop() {
        let mut first = last;
        while ids.last() == Some(&(first - 1)) {
            first = ids.pop().unwrap();
        }
        tree.remove_shift(first, last)?;
    }
    Ok(())
}




/**
 * Run one mesh adaptation cycle: evaluate the criterion on every leaf (in
 * parallel; the criterion only reads the tree), then apply the verdicts
 * serially. Leaves flagged `Refine` are split; a sibling group is merged
 * only when all of its members are leaves flagged `Coarsen`. Children
 * created by this cycle are never merged by it, so the mesh moves at most
 * one level per cycle at any location.
 *
 * Returns the number of splits and merges performed.
 */
pub fn adapt<const D: usize, F>(tree: &mut Tree<D>, criterion: F) -> Result<(usize, usize), Error>
where
    F: Fn(&Tree<D>, NodeId) -> AdaptFlag + Sync,
{
    let leaves: Vec<NodeId> = tree.leaf_ids().collect();
    let verdicts: Vec<AdaptFlag> = {
        let shared: &Tree<D> = tree;
        leaves.par_iter().map(|&id| criterion(shared, id)).collect()
    };

    // Verdicts keyed by id; kept aligned with the id space through every
    // structural edit below.
    let mut flags = vec![AdaptFlag::Keep; tree.size() + 1];
    for (&id, &flag) in leaves.iter().zip(&verdicts) {
        flags[id] = flag;
    }

    let mut refined = 0;
    for id in 1..flags.len() {
        if flags[id] == AdaptFlag::Refine {
            split_leaf(tree, id)?;
            refined += 1;
        }
    }
    flags.resize(tree.size() + 1, AdaptFlag::Keep);

    // Merge one family at a time; remove_shift renumbers the tail, so
    // rescan from the start after each merge and drain the removed ids
    // from the verdict table to keep it aligned.
    let mut coarsened = 0;
    'scan: loop {
        for parent in tree.node_ids() {
            if !tree.has_children(parent) {
                continue
            }
            let eligible = tree
                .children(parent)
                .iter()
                .all(|&c| c != NIL && tree.is_leaf(c) && flags[c] == AdaptFlag::Coarsen);

            if eligible {
                let mut ids: Vec<NodeId> = tree.children(parent).to_vec();
                ids.sort_unstable();

                while let Some(last) = ids.pop() {
                    let mut first = last;
                    while ids.last() == Some(&(first - 1)) {
                        first = ids.pop().unwrap();
                    }
                    tree.remove_shift(first, last)?;
                    flags.drain(first..=last);
                }
                coarsened += 1;
                continue 'scan;
            }
        }
        break;
    }

    log::debug!(
        "adapt cycle split {} and merged {} families ({} cells, {} leaves)",
        refined,
        coarsened,
        tree.size(),
        tree.leaf_ids().count());

    Ok((refined, coarsened))
}

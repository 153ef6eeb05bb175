use crate::direction::octant_is_upper;




/**
 * Return the edge length of a cell at the given refinement level, for a
 * level-0 root cell of the given domain length. Each level halves the edge.
 */
pub fn cell_length(domain_length: f64, level: i32) -> f64 {
    domain_length / (1 << level) as f64
}




/**
 * Return the center of the child cell with the given octant index, for a
 * parent with the given center whose children sit at `child_level`. The
 * child center is displaced from the parent center by a quarter of the
 * parent's edge length along each axis, toward the upper or lower side
 * according to the octant bits.
 */
pub fn child_center<const D: usize>(
    parent_center: [f64; D],
    domain_length: f64,
    child_level: i32,
    octant: usize) -> [f64; D]
{
    let offset = domain_length / (1 << (child_level + 1)) as f64;
    let mut center = parent_center;

    for (axis, x) in center.iter_mut().enumerate() {
        if octant_is_upper(octant, axis) {
            *x += offset
        } else {
            *x -= offset
        }
    }
    center
}




/**
 * Return the octant of the parent cell containing the given point, given
 * the parent's center. Points exactly on a dividing plane belong to the
 * upper octant.
 */
pub fn containing_octant<const D: usize>(parent_center: [f64; D], point: [f64; D]) -> usize {
    let mut octant = 0;

    for axis in 0..D {
        if point[axis] >= parent_center[axis] {
            octant |= 1 << axis
        }
    }
    octant
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::*;


    #[test]
    fn edge_length_halves_per_level() {
        assert_eq!(cell_length(1.0, 0), 1.0);
        assert_eq!(cell_length(1.0, 1), 0.5);
        assert_eq!(cell_length(2.0, 3), 0.25);
    }


    #[test]
    fn children_of_unit_root_sit_at_quarter_points() {
        let centers: Vec<_> = (0..4)
            .map(|octant| child_center([0.0, 0.0], 1.0, 1, octant))
            .collect();

        assert_eq!(centers[0], [-0.25, -0.25]);
        assert_eq!(centers[1], [ 0.25, -0.25]);
        assert_eq!(centers[2], [-0.25,  0.25]);
        assert_eq!(centers[3], [ 0.25,  0.25]);
    }


    #[test]
    fn octant_lookup_inverts_subdivision() {
        for octant in 0..8 {
            let center = child_center([0.5, 0.5, 0.5], 1.0, 1, octant);
            assert_eq!(containing_octant([0.5, 0.5, 0.5], center), octant);
        }
    }
}

use super::samples::{SampleSpace, SENTINEL};

/// Marker for samples not yet (or never) inserted into the forest.
pub(super) const UNSET: u32 = u32::MAX;

/// Edgel-connected real neighbors of a pixel.
const REAL_NEIGHBORS: [(isize, isize); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Top-left corners of the dual pixels containing a given pixel.
const CONTAINING_SQUARES: [(isize, isize); 4] = [(0, 0), (-1, 0), (0, -1), (-1, -1)];

/// Corners of a dual pixel relative to its top-left corner.
const SQUARE_CORNERS: [(isize, isize); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];

/// Find the root of `i`, compressing the visited path onto it.
pub(super) fn find_root(zparent: &mut [u32], i: u32) -> u32 {
    let mut root = i;
    while zparent[root as usize] != root {
        root = zparent[root as usize];
    }
    let mut cur = i;
    while cur != root {
        let next = zparent[cur as usize];
        zparent[cur as usize] = root;
        cur = next;
    }
    root
}

/// Build the component-merging forest over `order`-sorted samples.
///
/// Each sample becomes its own component, then absorbs the components of
/// its already-processed neighbors, so a component's representative is
/// always its latest sample. Real samples see their 4 edgel neighbors
/// plus the virtual samples of the squares containing them; virtual
/// samples see the 4 corners of their square. Virtual samples carrying
/// the sentinel never take part.
pub(super) fn merge(
    space: SampleSpace,
    values: &[f32],
    order: &[u32],
    parent: &mut [u32],
) {
    let mut zparent = vec![UNSET; space.len()];
    for &p in order {
        let pid = p as usize;
        if !space.is_real(pid) && values[pid] == SENTINEL {
            continue;
        }
        parent[pid] = p;
        zparent[pid] = p;
        let (x, y) = space.coords(pid);
        if space.is_real(pid) {
            for (dx, dy) in REAL_NEIGHBORS {
                if let Some((nx, ny)) = offset(space, x, y, dx, dy) {
                    link(space.real_id(nx, ny), p, parent, &mut zparent);
                }
            }
            for (dx, dy) in CONTAINING_SQUARES {
                if let Some((nx, ny)) = offset(space, x, y, dx, dy) {
                    link(space.virtual_id(nx, ny), p, parent, &mut zparent);
                }
            }
        } else {
            for (dx, dy) in SQUARE_CORNERS {
                if let Some((nx, ny)) = offset(space, x, y, dx, dy) {
                    link(space.real_id(nx, ny), p, parent, &mut zparent);
                }
            }
        }
    }
}

#[inline]
fn offset(
    space: SampleSpace,
    x: usize,
    y: usize,
    dx: isize,
    dy: isize,
) -> Option<(usize, usize)> {
    let nx = x as isize + dx;
    let ny = y as isize + dy;
    (nx >= 0 && ny >= 0 && (nx as usize) < space.w && (ny as usize) < space.h)
        .then_some((nx as usize, ny as usize))
}

/// Union the component of neighbor `q` into the current sample `p`.
#[inline]
fn link(q: usize, p: u32, parent: &mut [u32], zparent: &mut [u32]) {
    if zparent[q] == UNSET {
        return; // unprocessed neighbor
    }
    let root = find_root(zparent, q as u32);
    if root != p {
        parent[root as usize] = p;
        zparent[root as usize] = p;
    }
}

/// Fold every plateau onto its canonical element.
///
/// Walking the sorted samples in reverse, a sample whose parent and
/// grandparent share a level is re-pointed at the grandparent; after one
/// pass each non-canonical sample points directly at the canonical root
/// of its plateau.
pub(super) fn canonicalize(values: &[f32], parent: &mut [u32], order: &[u32]) {
    for &id in order.iter().rev() {
        let p = parent[id as usize];
        if p == UNSET {
            continue; // sentinel sample, never inserted
        }
        let q = parent[p as usize];
        if values[p as usize] == values[q as usize] {
            parent[id as usize] = q;
        }
    }
}

/// A sample is canonical iff it roots its plateau: it is a forest root,
/// or its parent carries a strictly different level.
pub(super) fn is_canonical(values: &[f32], parent: &[u32], id: u32) -> bool {
    let p = parent[id as usize];
    if p == UNSET {
        return false;
    }
    p == id || values[p as usize] != values[id as usize]
}

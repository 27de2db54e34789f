//! Persistence engine: per-pixel topological contrast of the bilinear
//! surface.
//!
//! Overview
//! - Augments the pixel grid with one virtual sample per saddle-bearing
//!   dual pixel; the virtual sample carries the saddle level. This lifts
//!   the monotone union-find from the integer grid to the continuous
//!   bilinear surface without further geometric computation.
//! - Processes all samples in increasing value order, merging each into
//!   the components of its already-processed neighbors; the resulting
//!   forest records, per component, the level at which it was absorbed.
//! - Folds plateaus onto canonical representatives, builds an index-based
//!   node tree over them, and propagates a contrast attribute up (maximal
//!   level drop along descending paths) then down (dominant subtrees
//!   inherit their ancestor's contrast).
//! - Emits, for every pixel, the contrast of its canonical component.
//!
//! Running the engine on the input yields the minima-oriented map; on the
//! inverted input, the maxima-oriented map.

mod forest;
mod samples;

use crate::error::Error;
use crate::image::ImageF32;
use forest::{canonicalize, is_canonical, merge, UNSET};
use log::debug;
use samples::{fill_virtual_samples, sorted_order, SampleSpace};

/// One node per canonical sample of the merge forest.
#[derive(Clone, Debug)]
struct Node {
    parent: Option<u32>,
    children: Vec<u32>,
    level: f32,
    contrast: f32,
}

/// Compute the persistence map of `im`.
///
/// The output holds, for each pixel, the contrast of the component of the
/// merge forest that canonically contains it; it is a deterministic
/// function of the image alone.
pub fn persistence(im: &ImageF32) -> Result<ImageF32, Error> {
    if im.w < 2 || im.h < 2 {
        return Err(Error::InvalidInput("image must be at least 2x2"));
    }
    let space = SampleSpace { w: im.w, h: im.h };
    let n = space.real_count();

    let mut values = vec![0.0f32; space.len()];
    values[..n].copy_from_slice(&im.data);
    fill_virtual_samples(im, &mut values[n..]);

    let order = sorted_order(&values);
    let mut parent = vec![UNSET; space.len()];
    merge(space, &values, &order, &mut parent);
    canonicalize(&values, &mut parent, &order);

    let (nodes, node_of, root) = build_node_tree(space, &values, &parent);
    debug!(
        "persistence: {} canonical components over {} samples",
        nodes.len(),
        space.len()
    );
    let nodes = fill_contrast(nodes, root);

    let mut out = ImageF32::new(im.w, im.h);
    for y in 0..im.h {
        for x in 0..im.w {
            let mut id = space.real_id(x, y) as u32;
            if !is_canonical(&values, &parent, id) {
                id = parent[id as usize];
            }
            debug_assert_ne!(node_of[id as usize], UNSET);
            out.set(x, y, nodes[node_of[id as usize] as usize].contrast);
        }
    }
    Ok(out)
}

/// Enumerate canonical samples in id order and wire parent/child links.
fn build_node_tree(
    space: SampleSpace,
    values: &[f32],
    parent: &[u32],
) -> (Vec<Node>, Vec<u32>, usize) {
    let mut node_of = vec![UNSET; space.len()];
    let mut nodes = Vec::new();
    for id in 0..space.len() as u32 {
        if is_canonical(values, parent, id) {
            node_of[id as usize] = nodes.len() as u32;
            nodes.push(Node {
                parent: None,
                children: Vec::new(),
                level: values[id as usize],
                contrast: 0.0,
            });
        }
    }

    let mut root = 0usize;
    for id in 0..space.len() as u32 {
        let n = node_of[id as usize];
        if n == UNSET {
            continue;
        }
        let p = parent[id as usize];
        if p == id {
            root = n as usize;
        } else {
            let pn = node_of[p as usize];
            debug_assert_ne!(pn, UNSET, "canonical parent expected");
            nodes[pn as usize].children.push(n);
            nodes[n as usize].parent = Some(pn);
        }
    }
    (nodes, node_of, root)
}

/// Two-pass contrast propagation over the node tree.
///
/// Up pass (leaves to root): `contrast(n) = max over children c of
/// (contrast(c) + level(n) − level(c))`, zero at leaves. Down pass (root
/// to leaves): every child whose contrast equals the maximal child
/// contrast inherits its parent's contrast; the others keep their up-pass
/// value.
fn fill_contrast(mut nodes: Vec<Node>, root: usize) -> Vec<Node> {
    if nodes.is_empty() {
        return nodes;
    }
    let mut preorder = Vec::with_capacity(nodes.len());
    let mut stack = vec![root];
    while let Some(i) = stack.pop() {
        preorder.push(i);
        stack.extend(nodes[i].children.iter().map(|&c| c as usize));
    }
    debug_assert_eq!(preorder.len(), nodes.len(), "node tree must be connected");

    for &i in preorder.iter().rev() {
        let mut contrast = 0.0f32;
        for &c in &nodes[i].children {
            let c = c as usize;
            let v = nodes[c].contrast + nodes[i].level - nodes[c].level;
            if contrast < v {
                contrast = v;
            }
        }
        nodes[i].contrast = contrast;
    }

    for &i in &preorder {
        let mut best = 0.0f32;
        for &c in &nodes[i].children {
            let v = nodes[c as usize].contrast;
            if best < v {
                best = v;
            }
        }
        let inherited = nodes[i].contrast;
        for ci in 0..nodes[i].children.len() {
            let c = nodes[i].children[ci] as usize;
            debug_assert_eq!(nodes[c].parent, Some(i as u32));
            if nodes[c].contrast == best {
                nodes[c].contrast = inherited;
            }
        }
    }
    nodes
}

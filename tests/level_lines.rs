mod common;

use bilevel::prelude::*;
use bilevel::DELTA_LEVEL;
use common::synthetic_image::{constant_u8, ramp, ring_with_hole5, saddle_pair4, single_peak3};
use std::collections::HashSet;

fn view(data: &[u8], w: usize, h: usize) -> ImageU8<'_> {
    ImageU8 {
        w,
        h,
        stride: w,
        data,
    }
}

fn assert_closed(line: &LevelLine) {
    assert!(line.points.len() >= 2, "degenerate line");
    let first = line.points[0];
    let last = *line.points.last().unwrap();
    assert!(
        (first - last).norm() < 1e-4,
        "line at level {} does not close: {:?} vs {:?}",
        line.level,
        first,
        last
    );
}

#[test]
fn constant_image_yields_no_lines() {
    let data = constant_u8(8, 6, 5);
    let result = extract_level_lines(&view(&data, 8, 6), 0, false).unwrap();
    assert!(result.lines.is_empty());
    assert!(result.row_intersections.is_none());
}

#[test]
fn ramp_has_no_interior_extrema_and_no_saddles() {
    let data = ramp(6, 4);
    let result = extract_level_lines(&view(&data, 6, 4), 0, true).unwrap();
    assert!(
        result.lines.is_empty(),
        "all plateaus touch the border: {:?}",
        result.lines
    );
}

#[test]
fn single_peak_produces_one_closed_max_line() {
    let data = single_peak3();
    let result = extract_level_lines(&view(&data, 3, 3), 0, true).unwrap();
    assert_eq!(result.lines.len(), 1);
    let line = &result.lines[0];
    assert_eq!(line.kind, LineType::Max);
    assert_eq!(line.level, 9.0 - DELTA_LEVEL);
    assert_closed(line);
    assert_eq!(line.points.len(), 5, "four edgel crossings plus closure");
}

#[test]
fn saddle_pair_extraction_and_tree() {
    let data = saddle_pair4();
    let result = extract_level_lines(&view(&data, 4, 4), 0, true).unwrap();
    let kinds: Vec<LineType> = result.lines.iter().map(|l| l.kind).collect();
    assert_eq!(
        kinds,
        [
            LineType::Max,
            LineType::Max,
            LineType::Saddle,
            LineType::Saddle
        ],
        "extrema first, then the saddle group"
    );
    assert_eq!(result.lines[0].level, 8.0 - DELTA_LEVEL);
    assert_eq!(result.lines[1].level, 8.0 - DELTA_LEVEL);
    let saddle_level = 5.0 + 2.0 * DELTA_LEVEL;
    assert_eq!(result.lines[2].level, saddle_level);
    assert_eq!(result.lines[3].level, saddle_level);
    for line in &result.lines {
        assert_closed(line);
    }

    let tree = build_tree(result.lines, result.row_intersections.unwrap());
    // Each saddle lobe strictly encloses the peak line it surrounds.
    assert_eq!(tree.parent(0), Some(2));
    assert_eq!(tree.parent(1), Some(3));
    assert_eq!(tree.roots(), &[2, 3]);
    assert_eq!(tree.children(2), &[0]);
    assert_eq!(tree.children(3), &[1]);
}

#[test]
fn ring_plateau_with_hole_nests_three_lines() {
    let data = ring_with_hole5();
    let result = extract_level_lines(&view(&data, 5, 5), 0, true).unwrap();
    let kinds: Vec<LineType> = result.lines.iter().map(|l| l.kind).collect();
    assert_eq!(
        kinds,
        [LineType::Max, LineType::Max, LineType::Min],
        "outer ring boundary, hole boundary, then the inner minimum"
    );
    assert_eq!(result.lines[0].level, 8.0 - DELTA_LEVEL);
    assert_eq!(result.lines[1].level, 8.0 - DELTA_LEVEL);
    assert_eq!(result.lines[2].level, 2.0 + DELTA_LEVEL);
    for line in &result.lines {
        assert_closed(line);
    }

    let tree = build_tree(result.lines, result.row_intersections.unwrap());
    assert_eq!(tree.roots(), &[0]);
    assert_eq!(tree.parent(1), Some(0));
    assert_eq!(tree.parent(2), Some(1));
}

#[test]
fn each_line_crosses_an_edgel_at_most_once() {
    for (data, w, h) in [
        (single_peak3(), 3, 3),
        (saddle_pair4(), 4, 4),
        (ring_with_hole5(), 5, 5),
    ] {
        let result = extract_level_lines(&view(&data, w, h), 0, true).unwrap();
        let rows = result.row_intersections.unwrap();
        let mut seen = HashSet::new();
        for (row, crossings) in rows.iter().enumerate() {
            for &(x, idx) in crossings {
                let edgel = (row, x.floor() as i64, idx);
                assert!(
                    seen.insert(edgel),
                    "line {idx} crosses edgel {edgel:?} twice"
                );
            }
        }
    }
}

#[test]
fn sampling_density_only_adds_interior_points() {
    let data = saddle_pair4();
    let sparse = extract_level_lines(&view(&data, 4, 4), 0, false).unwrap();
    let dense = extract_level_lines(&view(&data, 4, 4), 4, false).unwrap();
    assert_eq!(sparse.lines.len(), dense.lines.len());
    for (s, d) in sparse.lines.iter().zip(&dense.lines) {
        assert_eq!(s.level, d.level);
        assert_eq!(s.kind, d.kind);
        assert!(d.points.len() >= s.points.len());
        assert_closed(d);
        // Edgel crossings are preserved: first points coincide.
        assert!((s.points[0] - d.points[0]).norm() < 1e-6);
    }
}

#[test]
fn extraction_is_deterministic() {
    let data = saddle_pair4();
    let a = extract_level_lines(&view(&data, 4, 4), 2, true).unwrap();
    let b = extract_level_lines(&view(&data, 4, 4), 2, true).unwrap();
    assert_eq!(a.lines.len(), b.lines.len());
    for (la, lb) in a.lines.iter().zip(&b.lines) {
        assert_eq!(la.level, lb.level);
        assert_eq!(la.points, lb.points);
    }
    assert_eq!(a.row_intersections, b.row_intersections);
}

//! Grow/shrink regression test - run-length dilation and erosion
//!
//! Tests disk and diamond growth of single pixels and small shapes,
//! monotonicity in the radius, the zero-radius identity, shrinking boxes,
//! growing then shrinking back, directional operations and peak handling.

use footprint_core::{Box2I, Footprint, Point2I};
use footprint_morph::{
    Directions, Metric, grow_footprint, grow_footprint_directional, shrink_footprint,
    shrink_footprint_directional,
};
use footprint_test::{RegParams, footprint_from_pattern};

fn is_subset(small: &Footprint, big: &Footprint) -> bool {
    small
        .spans()
        .iter()
        .all(|s| (s.x0()..=s.x1()).all(|x| big.contains(Point2I::new(x, s.y()))))
}

#[test]
fn grow_shrink_reg() {
    let mut rp = RegParams::new("grow_shrink");

    let dot = Footprint::from_box(Box2I::new_unchecked(5, 5, 1, 1), Box2I::default());

    // --- Test 1: growing a single pixel ---
    let grown = grow_footprint(&dot, 1, Metric::Isotropic).expect("grow");
    rp.compare_values(5.0, grown.area() as f64, 0.0);
    let expected_box = Box2I::from_corners(Point2I::new(4, 4), Point2I::new(6, 6));
    rp.compare_values(1.0, if grown.bbox() == expected_box { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if grown.is_normalized() { 1.0 } else { 0.0 }, 0.0);
    for (n, disk, diamond) in [(2, 13.0, 13.0), (3, 29.0, 25.0)] {
        let d = grow_footprint(&dot, n, Metric::Isotropic).expect("grow");
        rp.compare_values(disk, d.area() as f64, 0.0);
        let d = grow_footprint(&dot, n, Metric::Manhattan).expect("grow");
        rp.compare_values(diamond, d.area() as f64, 0.0);
    }

    // --- Test 2: growing a two-pixel bar by a diamond ---
    let bar = footprint_from_pattern(&["##"], 0, 0).expect("pattern");
    let plus = grow_footprint(&bar, 1, Metric::Manhattan).expect("grow");
    let expected = footprint_from_pattern(&[".##.", "####", ".##."], -1, -1).expect("pattern");
    rp.compare_footprints(&expected, &plus);

    // --- Test 3: growth is monotonic in the radius ---
    let shape = footprint_from_pattern(&["##...", "#..##", "..###"], 10, 10).expect("pattern");
    let mut previous = shape.clone();
    for n in 1..=4 {
        let g = grow_footprint(&shape, n, Metric::Isotropic).expect("grow");
        rp.compare_values(1.0, if is_subset(&previous, &g) { 1.0 } else { 0.0 }, 0.0);
        rp.compare_values(1.0, if g.area() > previous.area() { 1.0 } else { 0.0 }, 0.0);
        previous = g;
    }

    // --- Test 4: zero radius returns an equal copy ---
    let same = grow_footprint(&shape, 0, Metric::Isotropic).expect("grow");
    rp.compare_footprints(&shape, &same);
    let same = shrink_footprint(&shape, 0, Metric::Manhattan).expect("shrink");
    rp.compare_footprints(&shape, &same);
    let same = grow_footprint_directional(&shape, Directions::default()).expect("grow");
    rp.compare_footprints(&shape, &same);

    // --- Test 5: shrinking boxes ---
    let square = Footprint::from_box(Box2I::new_unchecked(0, 0, 5, 5), Box2I::default());
    let inner = shrink_footprint(&square, 1, Metric::Isotropic).expect("shrink");
    let inner_box = Footprint::from_box(Box2I::new_unchecked(1, 1, 3, 3), Box2I::default());
    rp.compare_footprints(&inner_box, &inner);
    let gone = shrink_footprint(&square, 3, Metric::Manhattan).expect("shrink");
    rp.compare_values(1.0, if gone.is_empty() { 1.0 } else { 0.0 }, 0.0);
    let shrunk = shrink_footprint(&shape, 1, Metric::Isotropic).expect("shrink");
    rp.compare_values(1.0, if is_subset(&shrunk, &shape) { 1.0 } else { 0.0 }, 0.0);

    // --- Test 6: a box grown then shrunk comes back ---
    for metric in [Metric::Isotropic, Metric::Manhattan] {
        let big = grow_footprint(&square, 2, metric).expect("grow");
        let back = shrink_footprint(&big, 2, metric).expect("shrink");
        rp.compare_footprints(&square, &back);
    }

    // --- Test 7: directional operations ---
    let arm = grow_footprint_directional(&dot, Directions::new(2, 0, 0, 1)).expect("grow");
    let expected = footprint_from_pattern(&["..#", "###"], 3, 4).expect("pattern");
    rp.compare_footprints(&expected, &arm);
    let left_only = Directions::from_flags(1, true, false, false, false);
    let wide = grow_footprint_directional(&square, left_only).expect("grow");
    rp.compare_values(30.0, wide.area() as f64, 0.0);
    let right_only = Directions::from_flags(1, false, true, false, false);
    let narrow = shrink_footprint_directional(&square, right_only).expect("shrink");
    let left_part = Footprint::from_box(Box2I::new_unchecked(0, 0, 4, 5), Box2I::default());
    rp.compare_footprints(&left_part, &narrow);
    let bad = grow_footprint_directional(&dot, Directions::new(-1, 1, 0, 0));
    rp.compare_values(1.0, if bad.is_err() { 1.0 } else { 0.0 }, 0.0);

    // --- Test 8: peaks ---
    let mut peaked = square.clone();
    peaked.add_peak(2.0, 2.0, 10.0);
    peaked.add_peak(0.0, 4.0, 5.0);
    let g = grow_footprint(&peaked, 1, Metric::Isotropic).expect("grow");
    rp.compare_values(2.0, g.peaks().len() as f64, 0.0);
    let s = shrink_footprint(&peaked, 1, Metric::Isotropic).expect("shrink");
    rp.compare_values(1.0, s.peaks().len() as f64, 0.0);
    rp.compare_values(10.0, s.peaks().get(0).map_or(0.0, |p| p.peak_value) as f64, 0.0);

    assert!(rp.cleanup());
}

//! Include regression test - union of a footprint with many others
//!
//! Tests inclusion with and without the footprint's own pixels, agreement
//! with pairwise merging, and that peaks and region are left alone.

use footprint_core::{Box2I, Footprint, Point2I};
use footprint_region::{FootprintIncludeExt, merge_footprints};
use footprint_test::{RegParams, footprint_from_pattern};

#[test]
fn include_reg() {
    let mut rp = RegParams::new("include");

    let base = footprint_from_pattern(&["###.", "#...", "#..."], 0, 0).expect("pattern");
    let others = [
        footprint_from_pattern(&["##", "##"], 2, 1).expect("pattern"),
        footprint_from_pattern(&["#####"], -3, 6).expect("pattern"),
        footprint_from_pattern(&["#"], 1, 1).expect("pattern"),
    ];

    // --- Test 1: union including self ---
    let mut all = base.clone();
    all.include(&others, false).expect("include");
    rp.compare_values(5.0 + 4.0 + 5.0 + 1.0, all.area() as f64, 0.0);
    rp.compare_values(1.0, if all.is_normalized() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if all.check_normalized() { 1.0 } else { 0.0 }, 0.0);

    // --- Test 2: agrees with pairwise merging ---
    let mut merged = base.clone();
    for other in &others {
        merged = merge_footprints(&merged, other).expect("merge");
    }
    rp.compare_footprints(&merged, &all);

    // --- Test 3: ignoring self ---
    let mut without = base.clone();
    without.include(&others, true).expect("include");
    rp.compare_values(4.0 + 5.0 + 1.0, without.area() as f64, 0.0);
    rp.compare_values(
        0.0,
        if without.contains(Point2I::new(0, 0)) { 1.0 } else { 0.0 },
        0.0,
    );

    // --- Test 4: nothing to include leaves the footprint alone ---
    let mut alone = base.clone();
    alone.include(&[], true).expect("include");
    rp.compare_footprints(&base, &alone);

    // --- Test 5: peaks and region are kept ---
    let region = Box2I::new_unchecked(-10, -10, 30, 30);
    let mut peaked = base.clone();
    peaked.set_region(region);
    peaked.add_peak(0.0, 0.0, 4.0);
    peaked.include(&others, false).expect("include");
    rp.compare_values(1.0, peaked.peaks().len() as f64, 0.0);
    rp.compare_values(1.0, if peaked.region() == region { 1.0 } else { 0.0 }, 0.0);

    // --- Test 6: including an overlapping copy changes nothing ---
    let mut twice = base.clone();
    twice.include(std::slice::from_ref(&base), false).expect("include");
    rp.compare_footprints(&base, &twice);
    let empty = Footprint::default();
    let mut with_empty = base.clone();
    with_empty.include(&[empty], false).expect("include");
    rp.compare_footprints(&base, &with_empty);

    assert!(rp.cleanup());
}

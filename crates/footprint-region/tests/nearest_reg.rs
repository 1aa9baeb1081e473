//! Nearest footprint regression test - Manhattan distance maps
//!
//! Checks the distance map against a brute-force search over every
//! footprint pixel, and the index map against the distances it implies.

use footprint_core::{Box2I, Footprint, Image, Point2I};
use footprint_region::{NO_FOOTPRINT, nearest_footprint};
use footprint_test::{RegParams, footprint_from_pattern};

fn brute_force_distance(foots: &[Footprint], p: Point2I) -> i32 {
    foots
        .iter()
        .flat_map(|f| f.spans().iter())
        .flat_map(|s| (s.x0()..=s.x1()).map(move |x| (x, s.y())))
        .map(|(x, y)| (x - p.x).abs() + (y - p.y).abs())
        .min()
        .unwrap_or(i32::MAX)
}

#[test]
fn nearest_reg() {
    let mut rp = RegParams::new("nearest");

    let foots = vec![
        footprint_from_pattern(&["##", "#."], 2, 2).expect("pattern"),
        footprint_from_pattern(&["###"], 9, 1).expect("pattern"),
        footprint_from_pattern(&["#", "#", "#"], 5, 8).expect("pattern"),
    ];
    let bbox = Box2I::new_unchecked(0, 0, 14, 12);
    let mut argmin: Image<u16> = Image::new(bbox);
    let mut dist: Image<u16> = Image::new(bbox);
    nearest_footprint(&foots, &mut argmin, &mut dist).expect("nearest");

    // --- Test 1: distances match a brute-force search ---
    let mut mismatches = 0;
    let mut bad_index = 0;
    for y in bbox.min_y()..=bbox.max_y() {
        for x in bbox.min_x()..=bbox.max_x() {
            let p = Point2I::new(x, y);
            let d = dist.get_pixel(x, y).unwrap_or(u16::MAX) as i32;
            if d != brute_force_distance(&foots, p) {
                mismatches += 1;
            }
            // the chosen footprint must be at that distance
            let k = argmin.get_pixel(x, y).unwrap_or(NO_FOOTPRINT) as usize;
            match foots.get(k) {
                Some(f) if brute_force_distance(std::slice::from_ref(f), p) == d => {}
                _ => bad_index += 1,
            }
        }
    }
    rp.compare_values(0.0, mismatches as f64, 0.0);
    rp.compare_values(0.0, bad_index as f64, 0.0);

    // --- Test 2: footprint pixels are at distance zero ---
    rp.compare_values(0.0, dist.get_pixel(3, 2).unwrap_or(1) as f64, 0.0);
    rp.compare_values(1.0, argmin.get_pixel(10, 1).unwrap_or(0) as f64, 0.0);
    rp.compare_values(2.0, argmin.get_pixel(5, 10).unwrap_or(0) as f64, 0.0);

    // --- Test 3: mismatched or empty inputs ---
    let mut short: Image<u16> = Image::new(Box2I::new_unchecked(0, 0, 14, 11));
    let mismatch = nearest_footprint(&foots, &mut argmin, &mut short);
    rp.compare_values(1.0, if mismatch.is_err() { 1.0 } else { 0.0 }, 0.0);
    let empty = nearest_footprint(&[], &mut argmin, &mut dist);
    rp.compare_values(1.0, if empty.is_err() { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup());
}

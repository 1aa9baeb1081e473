//! footprint-test - Regression test framework for the footprint crates
//!
//! This crate provides the `RegParams` harness used by the `*_reg.rs`
//! integration tests, supporting three modes:
//!
//! - **Generate**: Write golden files for serialized outputs
//! - **Compare**: Compare results with golden files when they exist (default)
//! - **Display**: Run tests without comparison
//!
//! It also builds footprints and masks from ASCII-art patterns, so tests
//! can state shapes the way they would draw them.
//!
//! # Usage
//!
//! ```ignore
//! use footprint_test::{RegParams, footprint_from_pattern};
//!
//! let mut rp = RegParams::new("merge");
//! let foot = footprint_from_pattern(&["##.", ".##"], 0, 0).unwrap();
//! rp.compare_values(4.0, foot.area() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use footprint_core::{Box2I, Footprint, Mask};

/// Build a normalized footprint from rows of `#` (set) and `.` (unset).
///
/// The first pattern row is parent row `y0` and the first column is
/// parent column `x0`; later rows have increasing `y`.
pub fn footprint_from_pattern(rows: &[&str], x0: i32, y0: i32) -> TestResult<Footprint> {
    let mut foot = Footprint::new(rows.len() as i32, Box2I::default())?;
    for (dy, row) in rows.iter().enumerate() {
        let y = y0 + dy as i32;
        let mut start: Option<i32> = None;
        for (dx, c) in row.chars().chain(std::iter::once('.')).enumerate() {
            let x = x0 + dx as i32;
            match (c, start) {
                ('#', None) => start = Some(x),
                ('#', Some(_)) => {}
                ('.', Some(s)) => {
                    foot.add_span(y, s, x - 1);
                    start = None;
                }
                ('.', None) => {}
                (other, _) => {
                    return Err(TestError::InvalidPattern(format!(
                        "unexpected character '{other}' in row {dy}"
                    )));
                }
            }
        }
    }
    foot.normalize();
    Ok(foot)
}

/// Render a footprint as rows of `#` and `.` over `bbox`.
pub fn footprint_to_pattern(foot: &Footprint, bbox: Box2I) -> Vec<String> {
    if bbox.is_empty() {
        return Vec::new();
    }
    (bbox.min_y()..=bbox.max_y())
        .map(|y| {
            (bbox.min_x()..=bbox.max_x())
                .map(|x| {
                    if foot.contains((x, y).into()) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect()
        })
        .collect()
}

/// Build a mask with `bits` set where the pattern has `#`.
///
/// All rows must have the same length.
pub fn mask_from_pattern(rows: &[&str], x0: i32, y0: i32, bits: u16) -> TestResult<Mask<u16>> {
    let width = rows.first().map_or(0, |r| r.len());
    if rows.iter().any(|r| r.len() != width) {
        return Err(TestError::InvalidPattern("rows differ in length".into()));
    }
    let mut data = Vec::with_capacity(width * rows.len());
    for row in rows {
        for c in row.chars() {
            data.push(match c {
                '#' => bits,
                '.' => 0,
                other => {
                    return Err(TestError::InvalidPattern(format!(
                        "unexpected character '{other}'"
                    )));
                }
            });
        }
    }
    let bbox = Box2I::new(x0, y0, width as i32, rows.len() as i32)?;
    Ok(Mask::from_vec(bbox, data)?)
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // footprint-test is at crates/footprint-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_roundtrip() {
        let rows = ["#.##", "....", ".###"];
        let foot = footprint_from_pattern(&rows, 2, -1).unwrap();
        assert_eq!(foot.area(), 6);
        assert_eq!(foot.spans().len(), 3);
        let back = footprint_to_pattern(&foot, Box2I::new_unchecked(2, -1, 4, 3));
        assert_eq!(back, rows);
    }

    #[test]
    fn test_mask_pattern() {
        let mask = mask_from_pattern(&["#.", ".#"], 5, 5, 0x4).unwrap();
        assert_eq!(mask.get_pixel(5, 5), Some(0x4));
        assert_eq!(mask.get_pixel(6, 5), Some(0));
        assert!(mask_from_pattern(&["#.", "#"], 0, 0, 1).is_err());
        assert!(footprint_from_pattern(&["#x"], 0, 0).is_err());
    }
}

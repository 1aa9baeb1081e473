//! Connected component detection on masks
//!
//! Pixels whose value shares a bit with the requested bit mask are
//! grouped into connected components, each returned as a normalized
//! [`Footprint`]. Labeling works on row runs rather than single pixels:
//! every run is joined with the runs it touches on the row above using a
//! union-find table, so the cost is linear in the number of runs.

use crate::error::RegionResult;
use footprint_core::{Footprint, Mask, MaskPixel};
use log::debug;

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

/// A maximal run of set pixels on one row, in parent coordinates
#[derive(Debug, Clone, Copy)]
struct Run {
    y: i32,
    x0: i32,
    x1: i32,
}

fn find_root(parent: &mut [usize], label: usize) -> usize {
    let mut current = label;
    while current != parent[current] {
        parent[current] = parent[parent[current]];
        current = parent[current];
    }
    current
}

fn union_labels(parent: &mut [usize], a: usize, b: usize) {
    let ra = find_root(parent, a);
    let rb = find_root(parent, b);
    // keep the smaller label as root so components come out in scan order
    if ra < rb {
        parent[rb] = ra;
    } else if rb < ra {
        parent[ra] = rb;
    }
}

/// Collect the runs of pixels with any of `bits` set, row by row.
fn collect_runs<T: MaskPixel>(mask: &Mask<T>, bits: T) -> Vec<Run> {
    let mut runs = Vec::new();
    let x0 = mask.x0();
    for y in mask.y0()..mask.y0() + mask.height() {
        let Some(row) = mask.row_data(y) else {
            continue;
        };
        let mut start: Option<usize> = None;
        for (i, &p) in row.iter().enumerate() {
            let on = !(p & bits).is_zero();
            match (on, start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    runs.push(Run {
                        y,
                        x0: x0 + s as i32,
                        x1: x0 + i as i32 - 1,
                    });
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push(Run {
                y,
                x0: x0 + s as i32,
                x1: x0 + row.len() as i32 - 1,
            });
        }
    }
    runs
}

/// Find the connected components of the pixels of `mask` that have any
/// of `bits` set.
///
/// Components are returned in the order of their first pixel in a
/// row-major scan. Each footprint is normalized, has the mask's extent
/// as its region and carries no peaks.
///
/// # Example
///
/// ```
/// use footprint_core::{Box2I, Mask};
/// use footprint_region::{ConnectivityType, find_footprints};
///
/// let mut mask: Mask<u16> = Mask::new(Box2I::new_unchecked(0, 0, 4, 2));
/// mask.set_pixel(0, 0, 1).unwrap();
/// mask.set_pixel(1, 1, 1).unwrap();
/// mask.set_pixel(3, 0, 2).unwrap();
///
/// let four = find_footprints(&mask, 1, ConnectivityType::FourWay).unwrap();
/// assert_eq!(four.len(), 2);
/// let eight = find_footprints(&mask, 1, ConnectivityType::EightWay).unwrap();
/// assert_eq!(eight.len(), 1);
/// ```
pub fn find_footprints<T: MaskPixel>(
    mask: &Mask<T>,
    bits: T,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<Footprint>> {
    let runs = collect_runs(mask, bits);
    let reach = match connectivity {
        ConnectivityType::FourWay => 0,
        ConnectivityType::EightWay => 1,
    };

    let mut parent: Vec<usize> = (0..runs.len()).collect();
    // runs[prev_start..cur_start] are on the row above the current row
    let mut prev_start = 0;
    let mut cur_start = 0;
    for i in 0..runs.len() {
        if i > 0 && runs[i].y != runs[i - 1].y {
            prev_start = if runs[i].y == runs[i - 1].y + 1 {
                cur_start
            } else {
                i
            };
            cur_start = i;
        }
        let r = runs[i];
        for j in prev_start..cur_start {
            let p = runs[j];
            if p.x1 + reach >= r.x0 && p.x0 - reach <= r.x1 {
                union_labels(&mut parent, i, j);
            }
        }
    }

    let mut index_of_root: Vec<Option<usize>> = vec![None; runs.len()];
    let mut foots: Vec<Footprint> = Vec::new();
    for (i, r) in runs.iter().enumerate() {
        let root = find_root(&mut parent, i);
        let k = match index_of_root[root] {
            Some(k) => k,
            None => {
                foots.push(Footprint::new(0, mask.bbox())?);
                index_of_root[root] = Some(foots.len() - 1);
                foots.len() - 1
            }
        };
        foots[k].add_span_in_series(r.y, r.x0, r.x1)?;
    }
    debug!(
        "find_footprints: {} runs -> {} footprints in {:?}",
        runs.len(),
        foots.len(),
        mask.bbox()
    );
    Ok(foots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint_core::Box2I;

    fn mask_from(rows: &[&str]) -> Mask<u16> {
        let h = rows.len() as i32;
        let w = rows[0].len() as i32;
        let data = rows
            .iter()
            .flat_map(|r| r.bytes().map(|b| if b == b'#' { 1 } else { 0 }))
            .collect();
        Mask::from_vec(Box2I::new_unchecked(10, 20, w, h), data).unwrap()
    }

    #[test]
    fn test_empty_mask() {
        let mask: Mask<u16> = Mask::new(Box2I::new_unchecked(0, 0, 5, 5));
        assert!(find_footprints(&mask, 1, ConnectivityType::FourWay).unwrap().is_empty());
    }

    #[test]
    fn test_u_shape_is_one_component() {
        let mask = mask_from(&["#...#", "#...#", "#####"]);
        let foots = find_footprints(&mask, 1, ConnectivityType::FourWay).unwrap();
        assert_eq!(foots.len(), 1);
        assert_eq!(foots[0].area(), 9);
        assert!(foots[0].is_normalized());
        assert_eq!(foots[0].region(), mask.bbox());
        assert_eq!(foots[0].bbox(), Box2I::new_unchecked(10, 20, 5, 3));
    }

    #[test]
    fn test_diagonal_connectivity() {
        let mask = mask_from(&["#..", ".#.", "..#"]);
        assert_eq!(find_footprints(&mask, 1, ConnectivityType::FourWay).unwrap().len(), 3);
        assert_eq!(find_footprints(&mask, 1, ConnectivityType::EightWay).unwrap().len(), 1);
    }

    #[test]
    fn test_gap_row_separates() {
        let mask = mask_from(&["###", "...", "###"]);
        let foots = find_footprints(&mask, 1, ConnectivityType::EightWay).unwrap();
        assert_eq!(foots.len(), 2);
        assert_eq!(foots[0].bbox().min_y(), 20);
        assert_eq!(foots[1].bbox().min_y(), 22);
    }

    #[test]
    fn test_bits_select_pixels() {
        let mut mask: Mask<u16> = Mask::new(Box2I::new_unchecked(0, 0, 3, 1));
        mask.set_pixel(0, 0, 0x2).unwrap();
        mask.set_pixel(1, 0, 0x4).unwrap();
        mask.set_pixel(2, 0, 0x6).unwrap();
        let foots = find_footprints(&mask, 0x2, ConnectivityType::FourWay).unwrap();
        assert_eq!(foots.len(), 2);
        let foots = find_footprints(&mask, 0x6, ConnectivityType::FourWay).unwrap();
        assert_eq!(foots.len(), 1);
        assert_eq!(foots[0].area(), 3);
    }

    #[test]
    fn test_late_join_keeps_scan_order() {
        // two arms that only meet on the last row
        let mask = mask_from(&["#.#", "#.#", "###", "..."]);
        let foots = find_footprints(&mask, 1, ConnectivityType::FourWay).unwrap();
        assert_eq!(foots.len(), 1);
        assert_eq!(foots[0].area(), 7);
    }
}

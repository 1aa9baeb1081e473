//! Edge pixel extraction

use super::Footprint;
use crate::error::{Error, Result};
use crate::span::Span;

impl Footprint {
    /// The pixels on the boundary of the footprint.
    ///
    /// A pixel is an edge pixel if it starts or ends its span, lies on the
    /// first or last row, or lacks a footprint pixel directly above or
    /// below it. Footprints at most two rows high, or with at most two
    /// spans, are returned whole.
    ///
    /// # Errors
    ///
    /// Returns an error if the footprint is not normalized.
    pub fn find_edge_pixels(&self) -> Result<Footprint> {
        if !self.normalized {
            return Err(Error::InvalidParameter(
                "footprint isn't normalized".into(),
            ));
        }
        if self.bbox.height() <= 2 || self.spans.len() <= 2 {
            return Ok(self.clone());
        }

        let x_start = self.bbox.min_x();
        let width = self.bbox.width() as usize;
        let y_start = self.bbox.min_y();
        let y_end = self.bbox.max_y();

        // Spans grouped by row; rows are in increasing y.
        let rows: Vec<&[Span]> = self.spans.chunk_by(|a, b| a.y == b.y).collect();

        let mut edges = self.empty_like();
        let mut above = vec![false; width];
        let mut below = vec![false; width];
        let fill = |buf: &mut Vec<bool>, row: Option<&[Span]>| {
            buf.fill(false);
            for s in row.into_iter().flatten() {
                buf[(s.x0 - x_start) as usize..=(s.x1 - x_start) as usize].fill(true);
            }
        };

        for (k, row) in rows.iter().enumerate() {
            let y = row[0].y;
            if y == y_start || y == y_end {
                for s in row.iter() {
                    edges.add_span_in_series(y, s.x0, s.x1)?;
                }
                continue;
            }
            let prev = k.checked_sub(1).map(|i| rows[i]).filter(|r| r[0].y == y - 1);
            let next = rows.get(k + 1).copied().filter(|r| r[0].y == y + 1);
            fill(&mut below, prev);
            fill(&mut above, next);

            for s in row.iter() {
                let mut x0 = s.x0;
                let mut on_edge = true;
                for x in s.x0 + 1..s.x1 {
                    let i = (x - x_start) as usize;
                    let interior = below[i] && above[i];
                    if on_edge && interior {
                        on_edge = false;
                        edges.add_span_in_series(y, x0, x - 1)?;
                    } else if !on_edge && !interior {
                        on_edge = true;
                        x0 = x;
                    }
                }
                if on_edge {
                    edges.add_span_in_series(y, x0, s.x1)?;
                } else {
                    edges.add_span_in_series(y, s.x1, s.x1)?;
                }
            }
        }
        edges.normalize();
        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use crate::geom::Box2I;
    use crate::{Footprint, Span};

    fn spans_of(f: &Footprint) -> Vec<(i32, i32, i32)> {
        f.spans().iter().map(|s| (s.y(), s.x0(), s.x1())).collect()
    }

    #[test]
    fn test_square_edges() {
        let f = Footprint::from_box(Box2I::new_unchecked(0, 0, 5, 5), Box2I::default());
        let e = f.find_edge_pixels().unwrap();
        assert_eq!(e.area(), 16);
        assert_eq!(
            spans_of(&e),
            vec![
                (0, 0, 4),
                (1, 0, 0),
                (1, 4, 4),
                (2, 0, 0),
                (2, 4, 4),
                (3, 0, 0),
                (3, 4, 4),
                (4, 0, 4)
            ]
        );
    }

    #[test]
    fn test_notch_is_edge() {
        // row 1 of a 3x5 block has its neighbours above missing at x = 2
        let mut f = Footprint::from_spans(
            [
                Span::new(0, 0, 4),
                Span::new(1, 0, 4),
                Span::new(2, 0, 1),
                Span::new(2, 3, 4),
                Span::new(3, 0, 4),
            ],
            Box2I::default(),
        );
        f.normalize();
        let e = f.find_edge_pixels().unwrap();
        assert!(e.contains((2, 1).into()));
        assert!(!e.contains((1, 1).into()));
        assert!(!e.contains((3, 1).into()));
    }

    #[test]
    fn test_gap_rows_are_edges() {
        let mut f = Footprint::from_spans(
            [
                Span::new(0, 0, 4),
                Span::new(1, 0, 4),
                Span::new(2, 0, 4),
                Span::new(4, 0, 4),
                Span::new(5, 0, 4),
                Span::new(6, 0, 4),
            ],
            Box2I::default(),
        );
        f.normalize();
        let e = f.find_edge_pixels().unwrap();
        // rows 2 and 4 border the gap, so they are entirely edge
        assert!(e.contains((2, 2).into()));
        assert!(e.contains((2, 4).into()));
        assert!(!e.contains((2, 1).into()));
        assert!(!e.contains((2, 5).into()));
    }

    #[test]
    fn test_small_footprint_is_its_own_edge() {
        let f = Footprint::from_box(Box2I::new_unchecked(0, 0, 5, 2), Box2I::default());
        assert_eq!(f.find_edge_pixels().unwrap().area(), 10);
    }

    #[test]
    fn test_requires_normalized() {
        let f = Footprint::from_spans([Span::new(0, 0, 1)], Box2I::default());
        assert!(f.find_edge_pixels().is_err());
    }
}

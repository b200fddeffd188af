use std::collections::BTreeMap;

use derive_new::new;

/// Number of tick marks generated per axis.
const TICK_COUNT: usize = 10;

/// Axis-aligned bounding box of the cached points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    fn around(point: [f64; 2]) -> Self {
        let [x, y] = point;
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn include(&mut self, point: [f64; 2]) {
        let [x, y] = point;
        if x < self.min_x {
            self.min_x = x;
        }
        if x > self.max_x {
            self.max_x = x;
        }
        if y < self.min_y {
            self.min_y = y;
        }
        if y > self.max_y {
            self.max_y = y;
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A straight line segment in data coordinates.
#[derive(new, Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: [f64; 2],
    pub end: [f64; 2],
}

/// The renderable scene derived from the point cache: one connected
/// polyline, two axis segments, the tick marks along both axes and the
/// viewport the display surface should fit.
///
/// Fully recomputed on every change; nothing in here is patched
/// incrementally.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotGeometry {
    pub bounds: Bounds,
    /// Points in ascending x order. Points sharing an x coordinate are
    /// kept, in row order.
    pub polyline: Vec<[f64; 2]>,
    /// X axis from `(min_x, 0)` to `(max_x, 0)`, then the y axis.
    pub axes: [Segment; 2],
    pub x_ticks: Vec<Segment>,
    pub y_ticks: Vec<Segment>,
    /// `(min_x, min_y, width, height)` of the data bounding box.
    pub viewport: [f64; 4],
}

impl PlotGeometry {
    /// Rebuild the scene from the row-indexed point cache. An empty cache
    /// yields `None`, the empty plot state.
    pub fn rebuild(cache: &BTreeMap<usize, [f64; 2]>) -> Option<Self> {
        let mut points = cache.values();
        let mut bounds = Bounds::around(*points.next()?);
        for point in points {
            bounds.include(*point);
        }

        // Stable sort: row order decides ties, so equal-x points survive.
        let mut polyline: Vec<[f64; 2]> = cache.values().copied().collect();
        polyline.sort_by(|a, b| a[0].total_cmp(&b[0]));

        let axes = [
            Segment::new([bounds.min_x, 0.0], [bounds.max_x, 0.0]),
            Segment::new([0.0, bounds.min_y], [0.0, bounds.max_y]),
        ];
        let (x_ticks, y_ticks) = ticks(&bounds);
        let viewport = [bounds.min_x, bounds.min_y, bounds.width(), bounds.height()];

        Some(Self {
            bounds,
            polyline,
            axes,
            x_ticks,
            y_ticks,
            viewport,
        })
    }
}

/// Evenly spaced tick marks, perpendicular to their axis, half-length a
/// tenth of the opposite axis step. An axis with zero span gets no ticks,
/// which also keeps the step arithmetic away from a zero increment.
fn ticks(bounds: &Bounds) -> (Vec<Segment>, Vec<Segment>) {
    let step_h = bounds.width() / TICK_COUNT as f64;
    let step_v = bounds.height() / TICK_COUNT as f64;

    let mut x_ticks = Vec::new();
    if step_h > 0.0 {
        let half = step_v / 10.0;
        for i in 0..TICK_COUNT {
            let pos = bounds.min_x + i as f64 * step_h;
            x_ticks.push(Segment::new([pos, -half], [pos, half]));
        }
    }

    let mut y_ticks = Vec::new();
    if step_v > 0.0 {
        let half = step_h / 10.0;
        for i in 0..TICK_COUNT {
            let pos = bounds.min_y + i as f64 * step_v;
            y_ticks.push(Segment::new([-half, pos], [half, pos]));
        }
    }

    (x_ticks, y_ticks)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn cache_of(points: &[[f64; 2]]) -> BTreeMap<usize, [f64; 2]> {
        points.iter().copied().enumerate().collect()
    }

    #[test]
    fn empty_cache_yields_no_geometry() {
        assert_eq!(PlotGeometry::rebuild(&BTreeMap::new()), None);
    }

    #[test]
    fn scenario_bounds_and_polyline_order() {
        let cache = cache_of(&[[0.0, 0.0], [1.0, 2.0], [2.0, 1.0]]);
        let geometry = PlotGeometry::rebuild(&cache).unwrap();

        assert_eq!(
            geometry.bounds,
            Bounds {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 2.0,
                max_y: 2.0,
            }
        );
        assert_eq!(
            geometry.polyline,
            vec![[0.0, 0.0], [1.0, 2.0], [2.0, 1.0]]
        );
        assert_eq!(geometry.viewport, [0.0, 0.0, 2.0, 2.0]);
        assert_eq!(
            geometry.axes[0],
            Segment::new([0.0, 0.0], [2.0, 0.0])
        );
        assert_eq!(
            geometry.axes[1],
            Segment::new([0.0, 0.0], [0.0, 2.0])
        );
        assert_eq!(geometry.x_ticks.len(), 10);
        assert_eq!(geometry.y_ticks.len(), 10);
    }

    #[test]
    fn unsorted_input_is_sorted_by_x() {
        let cache = cache_of(&[[2.0, 1.0], [0.0, 3.0], [1.0, 2.0]]);
        let geometry = PlotGeometry::rebuild(&cache).unwrap();
        assert_eq!(
            geometry.polyline,
            vec![[0.0, 3.0], [1.0, 2.0], [2.0, 1.0]]
        );
    }

    #[test]
    fn equal_x_points_are_kept_in_row_order() {
        let cache = cache_of(&[[1.0, 5.0], [0.0, 0.0], [1.0, -5.0]]);
        let geometry = PlotGeometry::rebuild(&cache).unwrap();
        assert_eq!(
            geometry.polyline,
            vec![[0.0, 0.0], [1.0, 5.0], [1.0, -5.0]]
        );
    }

    #[test]
    fn zero_x_span_suppresses_x_ticks() {
        let cache = cache_of(&[[1.0, 0.0], [1.0, 5.0]]);
        let geometry = PlotGeometry::rebuild(&cache).unwrap();
        assert!(geometry.x_ticks.is_empty());
        assert_eq!(geometry.y_ticks.len(), 10);
        assert_eq!(geometry.viewport, [1.0, 0.0, 0.0, 5.0]);
    }

    #[test]
    fn single_point_has_no_ticks_and_empty_viewport() {
        let cache = cache_of(&[[3.0, 4.0]]);
        let geometry = PlotGeometry::rebuild(&cache).unwrap();
        assert!(geometry.x_ticks.is_empty());
        assert!(geometry.y_ticks.is_empty());
        assert_eq!(geometry.polyline, vec![[3.0, 4.0]]);
        assert_eq!(geometry.viewport, [3.0, 4.0, 0.0, 0.0]);
    }

    #[test]
    fn tick_half_length_is_a_hundredth_of_the_opposite_span() {
        let cache = cache_of(&[[0.0, 0.0], [10.0, 20.0]]);
        let geometry = PlotGeometry::rebuild(&cache).unwrap();
        // y span 20 → x ticks reach 20/100 above and below the axis.
        let tick = geometry.x_ticks[0];
        assert_eq!(tick.start[1], -0.2);
        assert_eq!(tick.end[1], 0.2);
        // x span 10 → y ticks reach 10/100 left and right.
        let tick = geometry.y_ticks[0];
        assert_eq!(tick.start[0], -0.1);
        assert_eq!(tick.end[0], 0.1);
    }

    proptest! {
        #[test]
        fn bounding_box_contains_every_point(
            points in prop::collection::vec(
                (-1.0e6_f64..1.0e6, -1.0e6_f64..1.0e6),
                1..50,
            )
        ) {
            let cache: BTreeMap<usize, [f64; 2]> = points
                .iter()
                .map(|&(x, y)| [x, y])
                .enumerate()
                .collect();
            let geometry = PlotGeometry::rebuild(&cache).unwrap();
            let bounds = geometry.bounds;
            for &(x, y) in points.iter() {
                prop_assert!(bounds.min_x <= x && x <= bounds.max_x);
                prop_assert!(bounds.min_y <= y && y <= bounds.max_y);
            }
            // The polyline keeps every point and ascends in x.
            prop_assert_eq!(geometry.polyline.len(), points.len());
            for pair in geometry.polyline.windows(2) {
                prop_assert!(pair[0][0] <= pair[1][0]);
            }
        }
    }
}

//! Precomputed easing tables for curved timelines.
//!
//! Each segment between two keyframes stores a tag followed, for Bezier segments, by nine
//! `(x, y)` samples of the cubic `(0,0) -> (cx1,cy1) -> (cx2,cy2) -> (1,1)`. Sampling walks the
//! table instead of solving the cubic, so a lookup is a short linear scan.

/// Floats per segment: one tag plus nine `(x, y)` points.
pub const BEZIER_SIZE: usize = 10 * 2 - 1;

/// Segment easing as authored, before it is baked into a [`CurveTable`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub enum Curve {
    #[default]
    Linear,
    Stepped,
    Bezier {
        cx1: f32,
        cy1: f32,
        cx2: f32,
        cy2: f32,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CurveType {
    Linear,
    Stepped,
    Bezier,
}

impl CurveType {
    fn tag(self) -> f32 {
        match self {
            Self::Linear => 0.0,
            Self::Stepped => 1.0,
            Self::Bezier => 2.0,
        }
    }

    fn from_tag(tag: f32) -> Self {
        if tag == 1.0 {
            Self::Stepped
        } else if tag == 2.0 {
            Self::Bezier
        } else {
            Self::Linear
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurveTable {
    curves: Vec<f32>,
}

impl CurveTable {
    /// Creates a table for `frame_count` keyframes with every segment linear.
    pub fn new(frame_count: usize) -> Self {
        Self {
            curves: vec![0.0; frame_count.saturating_sub(1) * BEZIER_SIZE],
        }
    }

    /// Number of segments (`frame_count - 1`).
    pub fn segment_count(&self) -> usize {
        self.curves.len() / BEZIER_SIZE
    }

    pub fn set_linear(&mut self, frame_index: usize) {
        self.curves[frame_index * BEZIER_SIZE] = CurveType::Linear.tag();
    }

    pub fn set_stepped(&mut self, frame_index: usize) {
        self.curves[frame_index * BEZIER_SIZE] = CurveType::Stepped.tag();
    }

    /// Bakes a cubic Bezier for the segment starting at `frame_index` using forward
    /// differencing. `cx1`/`cx2` are expected in `[0, 1]` so sample `x` stays non-decreasing.
    pub fn set_curve(&mut self, frame_index: usize, cx1: f32, cy1: f32, cx2: f32, cy2: f32) {
        let tmpx = (-cx1 * 2.0 + cx2) * 0.03;
        let tmpy = (-cy1 * 2.0 + cy2) * 0.03;
        let dddfx = ((cx1 - cx2) * 3.0 + 1.0) * 0.006;
        let dddfy = ((cy1 - cy2) * 3.0 + 1.0) * 0.006;
        let mut ddfx = tmpx * 2.0 + dddfx;
        let mut ddfy = tmpy * 2.0 + dddfy;
        let mut dfx = cx1 * 0.3 + tmpx + dddfx * 0.16666667;
        let mut dfy = cy1 * 0.3 + tmpy + dddfy * 0.16666667;
        let mut x = dfx;
        let mut y = dfy;

        let start = frame_index * BEZIER_SIZE;
        let segment = &mut self.curves[start..start + BEZIER_SIZE];
        segment[0] = CurveType::Bezier.tag();
        for point in segment[1..].chunks_exact_mut(2) {
            point[0] = x;
            point[1] = y;
            dfx += ddfx;
            dfy += ddfy;
            ddfx += dddfx;
            ddfy += dddfy;
            x += dfx;
            y += dfy;
        }
    }

    pub fn set(&mut self, frame_index: usize, curve: Curve) {
        match curve {
            Curve::Linear => self.set_linear(frame_index),
            Curve::Stepped => self.set_stepped(frame_index),
            Curve::Bezier { cx1, cy1, cx2, cy2 } => {
                self.set_curve(frame_index, cx1, cy1, cx2, cy2)
            }
        }
    }

    pub fn curve_type(&self, frame_index: usize) -> CurveType {
        CurveType::from_tag(self.curves[frame_index * BEZIER_SIZE])
    }

    /// Maps a linear `percent` through the segment's easing.
    pub fn curve_percent(&self, frame_index: usize, percent: f32) -> f32 {
        let percent = percent.clamp(0.0, 1.0);
        let start = frame_index * BEZIER_SIZE;
        let Some(&tag) = self.curves.get(start) else {
            return percent;
        };
        match CurveType::from_tag(tag) {
            CurveType::Linear => return percent,
            CurveType::Stepped => return 0.0,
            CurveType::Bezier => {}
        }

        let points = &self.curves[start + 1..start + BEZIER_SIZE];
        let mut prev = (0.0f32, 0.0f32);
        for point in points.chunks_exact(2) {
            let (x, y) = (point[0], point[1]);
            if x >= percent {
                return prev.1 + (y - prev.1) * (percent - prev.0) / (x - prev.0);
            }
            prev = (x, y);
        }
        // Implicit last point is (1, 1).
        let (x, y) = prev;
        y + (1.0 - y) * (percent - x) / (1.0 - x)
    }
}

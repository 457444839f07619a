//! Chart geometry: linear interpolation of samples into SVG coordinates.
//!
//! Degenerate inputs never fail. An empty series has no points, a single
//! sample sits at the left edge, and a flat series is drawn on the vertical
//! midline of the plotting band.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Maps samples into a `width`-wide band whose lowest value sits at
/// `baseline` and highest at `baseline - band`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub left: f64,
    pub width: f64,
    pub baseline: f64,
    pub band: f64,
}

impl Frame {
    pub fn project(&self, data: &[f64]) -> Vec<Point> {
        let Some((min, max)) = bounds(data) else {
            return Vec::new();
        };
        let range = max - min;
        let last = data.len().saturating_sub(1);

        data.iter()
            .enumerate()
            .map(|(i, &value)| {
                let x = if last > 0 {
                    self.left + (i as f64 / last as f64) * self.width
                } else {
                    self.left
                };
                let t = if range > 0.0 {
                    (value - min) / range
                } else {
                    0.5
                };
                Point {
                    x,
                    y: self.baseline - t * self.band,
                }
            })
            .collect()
    }
}

pub const SPARKLINE_WIDTH: f64 = 60.0;
pub const SPARKLINE_HEIGHT: f64 = 20.0;
pub const DETAIL_WIDTH: f64 = 280.0;
pub const DETAIL_HEIGHT: f64 = 80.0;
pub const PERFORMANCE_WIDTH: f64 = 350.0;
pub const PERFORMANCE_HEIGHT: f64 = 200.0;

/// Card sparkline: 60x20 with a 15-unit band.
pub fn sparkline(data: &[f64]) -> Vec<Point> {
    Frame {
        left: 0.0,
        width: SPARKLINE_WIDTH,
        baseline: SPARKLINE_HEIGHT,
        band: 15.0,
    }
    .project(data)
}

/// Strategy detail chart: 280x80 with a 60-unit band.
pub fn detail(data: &[f64]) -> Vec<Point> {
    Frame {
        left: 0.0,
        width: DETAIL_WIDTH,
        baseline: DETAIL_HEIGHT,
        band: 60.0,
    }
    .project(data)
}

/// Laid-out holding-value chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceLayout {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub points: Vec<Point>,
    pub min_value: f64,
    pub max_value: f64,
}

impl PerformanceLayout {
    pub fn new(data: &[f64], width: f64, height: f64) -> Self {
        let padding = (width * 0.08).max(20.0);
        let points = Frame {
            left: padding,
            width: width - 2.0 * padding,
            baseline: height - padding,
            band: height - 2.0 * padding,
        }
        .project(data);
        let (min_value, max_value) = bounds(data).unwrap_or((0.0, 0.0));
        Self {
            width,
            height,
            padding,
            points,
            min_value,
            max_value,
        }
    }

    /// Closed polygon for the gradient fill under the line.
    pub fn area(&self) -> Vec<Point> {
        if self.points.is_empty() {
            return Vec::new();
        }
        let floor = self.height - self.padding;
        let mut area = Vec::with_capacity(self.points.len() + 2);
        area.push(Point {
            x: self.padding,
            y: floor,
        });
        area.extend(self.points.iter().copied());
        area.push(Point {
            x: self.width - self.padding,
            y: floor,
        });
        area
    }
}

/// `"x,y x,y ..."` for SVG `points` attributes.
pub fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.1},{:.1}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn bounds(data: &[f64]) -> Option<(f64, f64)> {
    if data.is_empty() {
        return None;
    }
    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

//! Inline SVG rendering for sparklines and the holding-value chart.

use crate::domain::chart::{
    self, DETAIL_HEIGHT, DETAIL_WIDTH, PERFORMANCE_HEIGHT, PERFORMANCE_WIDTH, PerformanceLayout,
    SPARKLINE_HEIGHT, SPARKLINE_WIDTH, points_attr,
};
use crate::domain::format::whole_currency;
use crate::domain::portfolio::MonthlyValue;

const ACCENT: &str = "#00FFAB";

/// 60x20 card sparkline.
pub fn sparkline_svg(data: &[f64]) -> String {
    let points = chart::sparkline(data);
    let line = if points.is_empty() {
        String::new()
    } else {
        format!(
            r#"<polyline points="{}" fill="none" stroke="{ACCENT}" stroke-width="1.5" stroke-linecap="round" stroke-linejoin="round" class="sparkline-path"/>"#,
            points_attr(&points)
        )
    };
    format!(
        r#"<svg class="sparkline" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">{line}</svg>"#,
        w = SPARKLINE_WIDTH,
        h = SPARKLINE_HEIGHT,
    )
}

/// 280x80 strategy detail chart with the latest sample marked.
pub fn detail_svg(data: &[f64]) -> String {
    let points = chart::detail(data);
    let mut body = String::new();
    if let Some(last) = points.last() {
        body.push_str(&format!(
            r#"<polyline points="{}" fill="none" stroke="{ACCENT}" stroke-width="2" class="sparkline-path"/>"#,
            points_attr(&points)
        ));
        body.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{ACCENT}"/>"#,
            last.x, last.y
        ));
    }
    format!(
        r#"<svg class="detail-chart" width="100%" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">{body}</svg>"#,
        w = DETAIL_WIDTH,
        h = DETAIL_HEIGHT,
    )
}

/// Holding-value chart with gradient fill, point markers, min/max value
/// labels and month labels along the bottom.
pub fn performance_svg(history: &[MonthlyValue]) -> String {
    let values: Vec<f64> = history.iter().map(|m| m.value).collect();
    let layout = PerformanceLayout::new(&values, PERFORMANCE_WIDTH, PERFORMANCE_HEIGHT);
    let (w, h, p) = (layout.width, layout.height, layout.padding);

    let mut svg = format!(
        r#"<svg class="performance-chart" width="100%" viewBox="0 0 {w:.0} {total:.0}" preserveAspectRatio="none">"#,
        total = h + 20.0,
    );
    svg.push_str(&format!(
        r#"<defs><linearGradient id="chartGradient" x1="0%" y1="0%" x2="0%" y2="100%"><stop offset="0%" stop-color="{ACCENT}" stop-opacity="0.2"/><stop offset="50%" stop-color="{ACCENT}" stop-opacity="0.1"/><stop offset="100%" stop-color="{ACCENT}" stop-opacity="0"/></linearGradient></defs>"#
    ));

    if layout.points.is_empty() {
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" class="chart-label">No data</text></svg>"#,
            w / 2.0,
            h / 2.0
        ));
        return svg;
    }

    svg.push_str(&format!(
        r#"<polygon points="{}" fill="url(#chartGradient)"/>"#,
        points_attr(&layout.area())
    ));
    svg.push_str(&format!(
        r#"<polyline points="{}" fill="none" stroke="{ACCENT}" stroke-width="{:.1}" stroke-linecap="round" stroke-linejoin="round" class="sparkline-path"/>"#,
        points_attr(&layout.points),
        (w * 0.007).max(2.0)
    ));

    let radius = (w * 0.006).max(2.0);
    let last = layout.points.len() - 1;
    for (i, point) in layout.points.iter().enumerate() {
        if i == last {
            svg.push_str(&format!(
                r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{ACCENT}" fill-opacity="0.3"/>"#,
                point.x,
                point.y,
                (w * 0.012).max(4.0)
            ));
        }
        let r = if i == last { radius * 1.5 } else { radius };
        svg.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{ACCENT}"/>"#,
            point.x, point.y, r
        ));
    }

    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" class="chart-label">{}</text>"#,
        p * 0.5,
        h - p * 0.5,
        whole_currency(layout.min_value)
    ));
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="end" class="chart-label">{}</text>"#,
        w - p * 0.5,
        p * 0.5 + 10.0,
        whole_currency(layout.max_value)
    ));
    for (month, point) in history.iter().zip(&layout.points) {
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" class="chart-label month">{}</text>"#,
            point.x,
            h + 14.0,
            month.month.to_uppercase()
        ));
    }

    svg.push_str("</svg>");
    svg
}

// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use crate::im::MaskBuffer;

/// Draw a one pixel wide line between two points using Bresenham's algorithm
///
/// # Arguments
///
/// * `canvas` - Mask to draw on, pixels off the canvas are clipped
/// * `start` - First (x, y) endpoint
/// * `end` - Second (x, y) endpoint
/// * `value` - Pixel value written along the line
///
/// # Examples
///
/// ```
/// use maskit_core::im::MaskBuffer;
/// use maskit_core::cv::draw_line;
///
/// let mut canvas = MaskBuffer::zeros(4, 4);
/// draw_line(&mut canvas, [0, 0], [3, 3], 255);
/// assert_eq!(canvas.count_foreground(), 4);
/// ```
pub fn draw_line(canvas: &mut MaskBuffer, start: [i32; 2], end: [i32; 2], value: u8) {
    let bounds = canvas_bounds(canvas, 0);
    line_points(start, end, bounds, |x, y| canvas.put(x, y, value));
}

/// Draw an open path through consecutive points with a given stroke thickness
///
/// Each rasterized line pixel is stamped with a disc of diameter `thickness`
/// so joints and endpoints are rounded.
///
/// # Arguments
///
/// * `canvas` - Mask to draw on
/// * `points` - Ordered (x, y) vertices, the last point is not joined to the first
/// * `thickness` - Stroke width in pixels
/// * `value` - Pixel value written along the path
pub fn draw_polyline(canvas: &mut MaskBuffer, points: &[[i32; 2]], thickness: u32, value: u8) {
    let radius = thickness.max(1) as f64 / 2.0;
    let reach = radius.floor() as i64;
    let bounds = canvas_bounds(canvas, reach);

    let mut stamp = |x: i64, y: i64| {
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if ((dx * dx + dy * dy) as f64) <= radius * radius {
                    canvas.put(x + dx, y + dy, value);
                }
            }
        }
    };

    if points.len() == 1 {
        stamp(points[0][0] as i64, points[0][1] as i64);
        return;
    }

    for segment in points.windows(2) {
        line_points(segment[0], segment[1], bounds, &mut stamp);
    }
}

/// Fill the interior and boundary of a closed polygon
///
/// Rows are scanned at integer pixel positions using the even-odd rule and
/// every edge is traced afterwards so boundary and vertex pixels are always
/// part of the fill.
///
/// # Arguments
///
/// * `canvas` - Mask to draw on
/// * `points` - Ordered (x, y) vertices, implicitly closed
/// * `value` - Pixel value written inside the polygon
///
/// # Examples
///
/// ```
/// use maskit_core::im::MaskBuffer;
/// use maskit_core::cv::fill_polygon;
///
/// let mut canvas = MaskBuffer::zeros(10, 10);
/// fill_polygon(&mut canvas, &[[2, 2], [5, 2], [5, 5], [2, 5]], 255);
/// assert_eq!(canvas.count_foreground(), 16);
/// ```
pub fn fill_polygon(canvas: &mut MaskBuffer, points: &[[i32; 2]], value: u8) {
    if points.is_empty() {
        return;
    }

    let n = points.len();

    let (min_y, max_y) = points
        .iter()
        .fold((i64::MAX, i64::MIN), |(lo, hi), p| {
            (lo.min(p[1] as i64), hi.max(p[1] as i64))
        });

    let min_y = min_y.max(0);
    let max_y = max_y.min(canvas.height() as i64 - 1);

    let mut crossings: Vec<f64> = Vec::with_capacity(n);

    for y in min_y..=max_y {
        crossings.clear();

        for i in 0..n {
            let [x0, y0] = points[i];
            let [x1, y1] = points[(i + 1) % n];
            let (x0, y0, x1, y1) = (x0 as f64, y0 as f64, x1 as f64, y1 as f64);
            let row = y as f64;

            // Half-open rule so shared vertices are only counted once
            if (y0 <= row && row < y1) || (y1 <= row && row < y0) {
                crossings.push(x0 + (row - y0) * (x1 - x0) / (y1 - y0));
            }
        }

        crossings.sort_by(|a, b| a.total_cmp(b));

        for pair in crossings.chunks_exact(2) {
            canvas.put_span(y, pair[0].ceil() as i64, pair[1].floor() as i64, value);
        }
    }

    for i in 0..n {
        draw_line(canvas, points[i], points[(i + 1) % n], value);
    }
}

/// Fill a rotated ellipse
///
/// # Arguments
///
/// * `canvas` - Mask to draw on
/// * `center` - Ellipse center (x, y)
/// * `axes` - Half-lengths along the ellipse's own x and y axes
/// * `angle` - Clockwise rotation in degrees (image coordinates, y pointing down)
/// * `value` - Pixel value written inside the ellipse
///
/// # Examples
///
/// ```
/// use maskit_core::im::MaskBuffer;
/// use maskit_core::cv::fill_ellipse;
///
/// let mut canvas = MaskBuffer::zeros(11, 11);
/// fill_ellipse(&mut canvas, [5, 5], [3, 1], 90.0, 255);
/// assert_eq!(canvas.get(5, 8), Some(255));
/// assert_eq!(canvas.get(8, 5), Some(0));
/// ```
pub fn fill_ellipse(canvas: &mut MaskBuffer, center: [i32; 2], axes: [i32; 2], angle: f64, value: u8) {
    // Degenerate axes still cover the pixels along the remaining axis
    let a = (axes[0] as f64).max(0.5);
    let b = (axes[1] as f64).max(0.5);

    let (sin, cos) = angle.to_radians().sin_cos();

    let extent_x = ((a * cos).powi(2) + (b * sin).powi(2)).sqrt().ceil() as i64;
    let extent_y = ((a * sin).powi(2) + (b * cos).powi(2)).sqrt().ceil() as i64;

    let cx = center[0] as i64;
    let cy = center[1] as i64;

    let x_start = (cx - extent_x).max(0);
    let x_end = (cx + extent_x).min(canvas.width() as i64 - 1);
    let y_start = (cy - extent_y).max(0);
    let y_end = (cy + extent_y).min(canvas.height() as i64 - 1);

    for y in y_start..=y_end {
        for x in x_start..=x_end {
            let dx = (x - cx) as f64;
            let dy = (y - cy) as f64;

            let u = dx * cos + dy * sin;
            let v = -dx * sin + dy * cos;

            if (u / a).powi(2) + (v / b).powi(2) <= 1.0 {
                canvas.put(x, y, value);
            }
        }
    }
}

/// Inclusive pixel rectangle of a canvas grown by `pad` on every side
fn canvas_bounds(canvas: &MaskBuffer, pad: i64) -> [[i64; 2]; 2] {
    [
        [-pad, -pad],
        [canvas.width() as i64 - 1 + pad, canvas.height() as i64 - 1 + pad],
    ]
}

/// Clip a segment to an inclusive rectangle with Liang-Barsky
///
/// Returns None when the segment misses the rectangle. Clipped endpoints are
/// rounded to the nearest pixel inside the rectangle.
fn clip_segment(
    start: [i64; 2],
    end: [i64; 2],
    bounds: [[i64; 2]; 2],
) -> Option<([i64; 2], [i64; 2])> {
    let [[x_min, y_min], [x_max, y_max]] = bounds;

    if x_max < x_min || y_max < y_min {
        return None;
    }

    let inside = |p: [i64; 2]| p[0] >= x_min && p[0] <= x_max && p[1] >= y_min && p[1] <= y_max;

    if inside(start) && inside(end) {
        return Some((start, end));
    }

    let (x0, y0) = (start[0] as f64, start[1] as f64);
    let dx = end[0] as f64 - x0;
    let dy = end[1] as f64 - y0;

    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    for (p, q) in [
        (-dx, x0 - x_min as f64),
        (dx, x_max as f64 - x0),
        (-dy, y0 - y_min as f64),
        (dy, y_max as f64 - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }

        let r = q / p;

        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let point = |t: f64| {
        [
            (x0 + t * dx).round().clamp(x_min as f64, x_max as f64) as i64,
            (y0 + t * dy).round().clamp(y_min as f64, y_max as f64) as i64,
        ]
    };

    Some((point(t0), point(t1)))
}

/// Visit every pixel on the Bresenham line between two points
///
/// The segment is clipped to `bounds` first so the walk never leaves the
/// rectangle however far away the endpoints are.
fn line_points<F>(start: [i32; 2], end: [i32; 2], bounds: [[i64; 2]; 2], mut visit: F)
where
    F: FnMut(i64, i64),
{
    let start = [start[0] as i64, start[1] as i64];
    let end = [end[0] as i64, end[1] as i64];

    let Some((start, end)) = clip_segment(start, end, bounds) else {
        return;
    };

    let (mut x, mut y) = (start[0], start[1]);
    let (x1, y1) = (end[0], end[1]);

    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };

    let mut error = dx + dy;

    loop {
        visit(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * error;

        if e2 >= dy {
            error += dy;
            x += sx;
        }

        if e2 <= dx {
            error += dx;
            y += sy;
        }
    }
}

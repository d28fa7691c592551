// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Rect, Vec2};

use crate::types::DisplayProps;

/// Transform from a node's local space into its parent's space.
///
/// Scale is applied first, then rotation, then the `(x, y)` offset.
pub(crate) fn local_transform(props: &DisplayProps) -> Affine {
    let mut tf = Affine::scale_non_uniform(props.scale_x, props.scale_y);
    if props.rotation != 0.0 {
        tf = Affine::rotate(props.rotation) * tf;
    }
    Affine::translate(Vec2::new(props.x, props.y)) * tf
}

/// Transform an axis-aligned `Rect` by an `Affine` and return a conservative
/// axis-aligned bounding box in world space.
pub(crate) fn transform_rect_bbox(affine: Affine, rect: Rect) -> Rect {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    let min_x = (a * rect.x0).min(a * rect.x1) + (c * rect.y0).min(c * rect.y1);
    let max_x = (a * rect.x0).max(a * rect.x1) + (c * rect.y0).max(c * rect.y1);
    let min_y = (b * rect.x0).min(b * rect.x1) + (d * rect.y0).min(d * rect.y1);
    let max_y = (b * rect.x0).max(b * rect.x1) + (d * rect.y0).max(d * rect.y1);
    Rect::new(min_x + e, min_y + f, max_x + e, max_y + f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn translate_and_scale() {
        let props = DisplayProps {
            x: 10.0,
            y: 20.0,
            scale_x: 2.0,
            scale_y: 3.0,
            ..DisplayProps::default()
        };
        let tf = local_transform(&props);
        assert_eq!(tf * Point::new(1.0, 1.0), Point::new(12.0, 23.0));
    }

    #[test]
    fn bbox_of_scaled_rect() {
        let r = transform_rect_bbox(
            Affine::scale_non_uniform(-1.0, 2.0),
            Rect::new(0.0, 0.0, 10.0, 10.0),
        );
        assert_eq!(r, Rect::new(-10.0, 0.0, 0.0, 20.0));
    }
}

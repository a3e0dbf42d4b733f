use macroquad::math::Vec3;

use crate::core::parable::Parable;
use crate::core::projection::{flat_distance, height_along};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SideViewPoint {
    pub flat: f32,
    pub height: f32,
}

/// `max_distance` must be finite, the scan stops only once it is reached.
pub fn sample_arc(parable: &Parable, max_distance: f32, out: &mut Vec<Vec3>) {
    out.clear();
    out.push(parable.start_position());

    if max_distance.is_nan() || max_distance <= 0.0 {
        return;
    }

    for segment in parable.segments() {
        if segment.distance >= max_distance {
            let along = max_distance - segment.distance_before;
            out.push(segment.from + ((segment.to - segment.from).normalize_or_zero() * along));
            return;
        }
        out.push(segment.to);
    }
}

pub fn side_view(parable: &Parable, points: &[Vec3]) -> impl Iterator<Item = SideViewPoint> {
    let start = parable.start_position();
    let up = parable.up();
    points.iter().map(move |&point| SideViewPoint {
        flat: flat_distance(start, point, up),
        height: height_along(point, start, up),
    })
}

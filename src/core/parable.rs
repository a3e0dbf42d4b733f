use macroquad::math::Vec3;
use tracing::trace;

use crate::core::error::{ParableError, Result};
use crate::core::projection::{cosine_between, remove_component_along_axis};

pub const MIN_FLAT_DISTANCE: f32 = 0.00001;

const PERPENDICULAR_COSINE: f32 = 1e-6;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Parable {
    start_position: Vec3,
    forward: Vec3,
    up: Vec3,
    speed: f32,
    gravity: f32,
    step_length: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub index: u32,
    pub from: Vec3,
    pub to: Vec3,
    pub length: f32,
    pub distance_before: f32,
    pub distance: f32,
}

/// The iterator only ends once the step index would overflow `u32`.
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    parable: &'a Parable,
    index: u32,
    from: Vec3,
    travelled: f32,
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let index = self.index.checked_add(1)?;
        let to = self.parable.position(index);
        let length = to.distance(self.from);
        let segment = Segment {
            index,
            from: self.from,
            to,
            length,
            distance_before: self.travelled,
            distance: self.travelled + length,
        };

        self.index = index;
        self.from = to;
        self.travelled = segment.distance;
        Some(segment)
    }
}

impl Parable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_start_position(&mut self, start_position: Vec3) {
        self.start_position = start_position;
    }

    pub fn set_forward(&mut self, forward: Vec3) {
        self.forward = forward;
    }

    pub fn set_up(&mut self, up: Vec3) {
        self.up = up;
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = gravity;
    }

    pub fn set_step_length(&mut self, step_length: f32) {
        self.step_length = step_length;
    }

    pub fn start_position(&self) -> Vec3 {
        self.start_position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn step_length(&self) -> f32 {
        self.step_length
    }

    /// Setters never validate. Callers building a parable from untrusted input should call
    /// this before querying.
    pub fn validate(&self) -> Result<()> {
        self.check_progress()?;
        if self.up == Vec3::ZERO {
            return Err(ParableError::ZeroUp);
        }

        Ok(())
    }

    fn check_progress(&self) -> Result<()> {
        let scalars = [
            ("speed", self.speed),
            ("gravity", self.gravity),
            ("step_length", self.step_length),
        ];
        for (parameter, value) in scalars {
            if !value.is_finite() {
                return Err(ParableError::NonFinite { parameter });
            }
        }

        let vectors = [
            ("start_position", self.start_position),
            ("forward", self.forward),
            ("up", self.up),
        ];
        for (parameter, value) in vectors {
            if !value.is_finite() {
                return Err(ParableError::NonFinite { parameter });
            }
        }

        if self.speed == 0.0 {
            return Err(ParableError::ZeroSpeed);
        }
        if self.step_length == 0.0 {
            return Err(ParableError::ZeroStepLength);
        }
        if self.position(1) == self.start_position {
            return Err(ParableError::Stalled);
        }

        Ok(())
    }

    pub fn position(&self, step_index: u32) -> Vec3 {
        if step_index == 0 {
            return self.start_position;
        }

        let delta_time_per_step = self.step_length / self.speed;
        let elapsed_time = delta_time_per_step * step_index as f32;

        let forward_position = self.start_position + (self.forward * (self.speed * elapsed_time));
        let up_position = self.up * (self.gravity * elapsed_time * elapsed_time / 2.0);

        forward_position + up_position
    }

    pub fn position_into(&self, step_index: u32, out_position: &mut Vec3) {
        *out_position = self.position(step_index);
    }

    pub fn segments(&self) -> Segments<'_> {
        Segments {
            parable: self,
            index: 0,
            from: self.start_position,
            travelled: 0.0,
        }
    }

    pub fn distance(&self, step_index: u32) -> f32 {
        self.segments()
            .take(step_index as usize)
            .last()
            .map_or(0.0, |segment| segment.distance)
    }

    /// The scan has no upper bound: speed and step length must be non-zero, the arc must
    /// move, and `distance` must be finite.
    pub fn position_index_by_distance(&self, distance: f32) -> u32 {
        if distance.is_nan() || distance <= 0.0 {
            return 0;
        }
        debug_assert!(distance.is_finite(), "distance must be finite");
        debug_assert_eq!(self.check_progress(), Ok(()));

        self.segments()
            .find(|segment| segment.distance >= distance)
            .map_or(u32::MAX - 1, |segment| segment.index - 1)
    }

    /// Unbounded like [`Parable::position_index_by_distance`], with the same preconditions.
    pub fn position_by_distance(&self, distance: f32) -> Vec3 {
        debug_assert!(distance.is_finite(), "distance must be finite");
        debug_assert_eq!(self.check_progress(), Ok(()));

        let mut last_position = self.start_position;
        for segment in self.segments() {
            if segment.distance > distance {
                let length_to_remove = segment.distance - distance;
                let prev_to_current = segment.to - segment.from;
                let length_to_add = prev_to_current.length() - length_to_remove;

                return segment.from + (prev_to_current.normalize_or_zero() * length_to_add);
            }
            last_position = segment.to;
        }

        last_position
    }

    pub fn position_by_distance_into(&self, distance: f32, out_position: &mut Vec3) {
        *out_position = self.position_by_distance(distance);
    }

    pub fn distance_over_flat_distance(&self, flat_distance: f32, max_parable_distance: f32) -> f32 {
        if flat_distance < MIN_FLAT_DISTANCE {
            return 0.0;
        }

        let flat_start_position = remove_component_along_axis(self.start_position, self.up);
        let mut distance_over_flat_distance = 0.0;

        for segment in self
            .segments()
            .take_while(|segment| segment.distance_before <= max_parable_distance)
        {
            let flat_current_position = remove_component_along_axis(segment.to, self.up);
            let start_to_current_flat = flat_current_position - flat_start_position;
            let current_flat_distance = start_to_current_flat.length();

            if current_flat_distance >= flat_distance {
                let flat_difference = current_flat_distance - flat_distance;
                let length_to_remove =
                    overshoot_length(flat_difference, segment.to - segment.from, start_to_current_flat);

                distance_over_flat_distance = segment.distance - length_to_remove;
                break;
            }

            distance_over_flat_distance = segment.distance;
        }

        max_parable_distance.min(distance_over_flat_distance)
    }

    pub fn flat_distance_over_distance(&self, distance: f32) -> f32 {
        let position_by_distance = self.position_by_distance(distance);

        let flat_position_by_distance = remove_component_along_axis(position_by_distance, self.up);
        let flat_start_position = remove_component_along_axis(self.start_position, self.up);

        flat_start_position.distance(flat_position_by_distance)
    }
}

fn overshoot_length(flat_difference: f32, segment: Vec3, start_to_current_flat: Vec3) -> f32 {
    let cos = cosine_between(segment, start_to_current_flat);
    if cos.abs() <= PERPENDICULAR_COSINE {
        trace!("segment perpendicular to the flat plane, dropping flat overshoot {flat_difference}");
        return segment.length();
    }

    flat_difference / cos
}

#[cfg(test)]
mod tests {
    use macroquad::math::{Vec3, vec3};

    use super::{Parable, overshoot_length};
    use crate::core::error::ParableError;
    use crate::core::projection::height_along;

    fn assert_close(actual: f32, expected: f32, tolerance: f32) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    fn parable(start: Vec3, forward: Vec3, speed: f32, gravity: f32, step_length: f32) -> Parable {
        let mut parable = Parable::new();
        parable.set_start_position(start);
        parable.set_forward(forward);
        parable.set_up(Vec3::Y);
        parable.set_speed(speed);
        parable.set_gravity(gravity);
        parable.set_step_length(step_length);
        parable
    }

    fn teleport_arc() -> Parable {
        parable(Vec3::ZERO, Vec3::Z, 5.0, -9.8, 0.1)
    }

    fn aimed_upwards() -> Parable {
        parable(
            vec3(2.0, 1.6, -3.0),
            vec3(0.6, 0.5, 0.8).normalize(),
            12.0,
            -9.8,
            0.15,
        )
    }

    #[test]
    fn unconfigured_parable_is_zeroed() {
        let parable = Parable::new();
        assert_eq!(parable.start_position(), Vec3::ZERO);
        assert_eq!(parable.forward(), Vec3::ZERO);
        assert_eq!(parable.up(), Vec3::ZERO);
        assert_eq!(parable.speed(), 0.0);
        assert_eq!(parable.gravity(), 0.0);
        assert_eq!(parable.step_length(), 0.0);
    }

    #[test]
    fn setters_copy_their_values() {
        let mut start = vec3(1.0, 2.0, 3.0);
        let mut parable = Parable::new();
        parable.set_start_position(start);
        start.x = 100.0;

        assert_eq!(parable.start_position(), vec3(1.0, 2.0, 3.0));
        assert_eq!(start.x, 100.0);
    }

    #[test]
    fn step_zero_is_start_position() {
        let start = vec3(4.0, -2.0, 7.5);
        assert_eq!(parable(start, Vec3::X, 3.0, -9.8, 0.2).position(0), start);
        assert_eq!(aimed_upwards().position(0), aimed_upwards().start_position());
        assert_eq!(parable(start, Vec3::X, 0.0, -9.8, 0.2).position(0), start);
    }

    #[test]
    fn concrete_scenario_falls_while_advancing() {
        let parable = teleport_arc();
        assert_eq!(parable.position(0), Vec3::ZERO);

        let position = parable.position(10);
        assert!(position.z > 0.0);
        assert!(position.y < 0.0);
        assert_close(position.x, 0.0, 1e-6);
        assert_close(position.z, 1.0, 1e-5);
        assert_close(position.y, -0.196, 1e-5);
    }

    #[test]
    fn position_into_matches_position() {
        let parable = aimed_upwards();
        let mut out = Vec3::splat(99.0);
        parable.position_into(17, &mut out);
        assert_eq!(out, parable.position(17));
    }

    #[test]
    fn distance_starts_at_zero_and_never_decreases() {
        let parable = teleport_arc();
        assert_eq!(parable.distance(0), 0.0);
        assert!(parable.distance(10) > 0.0);

        let mut previous = 0.0;
        for step in 1..60 {
            let distance = parable.distance(step);
            assert!(distance >= previous, "step {step}: {distance} < {previous}");
            previous = distance;
        }
    }

    #[test]
    fn distance_is_sum_of_segment_lengths() {
        let parable = aimed_upwards();
        let expected: f32 = (1..=25)
            .map(|step| parable.position(step).distance(parable.position(step - 1)))
            .sum();
        assert_close(parable.distance(25), expected, 1e-4);
    }

    #[test]
    fn flat_motion_advances_one_step_length_per_step() {
        let parable = parable(vec3(1.0, 2.0, 3.0), Vec3::Z, 5.0, 0.0, 0.1);
        for step in [1, 5, 10, 40] {
            assert_close(parable.distance(step), step as f32 * 0.1, 1e-4);
        }
    }

    #[test]
    fn zero_gravity_stays_in_start_plane() {
        let start = vec3(1.0, 2.0, 3.0);
        let parable = parable(start, vec3(1.0, 0.0, 1.0).normalize(), 7.0, 0.0, 0.25);
        for step in 0..50 {
            let height = height_along(parable.position(step), start, Vec3::Y);
            assert_close(height, 0.0, 1e-5);
        }
    }

    #[test]
    fn reconfiguring_changes_later_queries() {
        let mut parable = teleport_arc();
        let before = parable.position(10);

        parable.set_gravity(0.0);
        let after = parable.position(10);

        assert!(before.y < 0.0);
        assert_close(after.y, 0.0, 1e-6);
        assert_close(after.z, before.z, 1e-6);
    }

    #[test]
    fn index_by_distance_never_overshoots() {
        let parable = teleport_arc();
        for step in 1..40 {
            let index = parable.position_index_by_distance(parable.distance(step));
            assert!(index <= step, "index {index} overshoots step {step}");
            assert!(index + 1 >= step, "index {index} too far behind step {step}");
        }
    }

    #[test]
    fn index_by_distance_floors_inside_a_segment() {
        let parable = aimed_upwards();
        for step in 1..30 {
            let middle = (parable.distance(step - 1) + parable.distance(step)) / 2.0;
            assert_eq!(parable.position_index_by_distance(middle), step - 1);
        }
    }

    #[test]
    fn index_by_distance_handles_empty_targets() {
        let parable = teleport_arc();
        assert_eq!(parable.position_index_by_distance(0.0), 0);
        assert_eq!(parable.position_index_by_distance(-3.0), 0);
        assert_eq!(parable.position_index_by_distance(f32::NAN), 0);
    }

    #[test]
    fn position_by_distance_lies_on_the_crossing_segment() {
        let parable = aimed_upwards();
        for step in 1..30 {
            let before = parable.distance(step - 1);
            let after = parable.distance(step);
            let distance = before + (after - before) * 0.3;

            let from = parable.position(step - 1);
            let to = parable.position(step);
            let position = parable.position_by_distance(distance);

            let off_line = (position - from).cross(to - from).length() / (to - from).length();
            assert_close(off_line, 0.0, 1e-4);
            assert_close(position.distance(from), distance - before, 1e-4);
        }
    }

    #[test]
    fn position_by_distance_zero_is_start() {
        let parable = aimed_upwards();
        let position = parable.position_by_distance(0.0);
        assert_close(position.distance(parable.start_position()), 0.0, 1e-5);
    }

    #[test]
    fn position_by_distance_into_matches() {
        let parable = teleport_arc();
        let mut out = Vec3::ZERO;
        parable.position_by_distance_into(2.5, &mut out);
        assert_eq!(out, parable.position_by_distance(2.5));
    }

    #[test]
    fn flat_distance_round_trips() {
        for parable in [teleport_arc(), aimed_upwards()] {
            for flat_distance in [0.05, 0.5, 1.0, 2.0, 3.7] {
                let distance = parable.distance_over_flat_distance(flat_distance, 30.0);
                assert!(distance <= 30.0);
                assert_close(parable.flat_distance_over_distance(distance), flat_distance, 1e-3);
            }
        }
    }

    #[test]
    fn flat_distance_on_level_arc_equals_arc_distance() {
        let parable = parable(Vec3::ZERO, Vec3::X, 4.0, 0.0, 0.2);
        assert_close(parable.distance_over_flat_distance(3.3, 10.0), 3.3, 1e-4);
    }

    #[test]
    fn tiny_flat_distance_is_no_displacement() {
        let parable = teleport_arc();
        assert_eq!(parable.distance_over_flat_distance(0.0, 10.0), 0.0);
        assert_eq!(parable.distance_over_flat_distance(0.000001, 10.0), 0.0);
    }

    #[test]
    fn flat_distance_is_clamped_to_max_distance() {
        let parable = teleport_arc();
        assert_eq!(parable.distance_over_flat_distance(1000.0, 5.0), 5.0);

        for flat_distance in [0.1, 1.0, 10.0, 100.0] {
            assert!(parable.distance_over_flat_distance(flat_distance, 2.0) <= 2.0);
        }
    }

    #[test]
    fn unreachable_flat_distance_without_flat_motion_stops_at_max() {
        let parable = parable(Vec3::ZERO, Vec3::Y, 6.0, -9.8, 0.1);
        assert_eq!(parable.distance_over_flat_distance(1.0, 4.0), 4.0);
    }

    #[test]
    fn perpendicular_segment_removes_whole_length() {
        let segment = vec3(0.0, -0.4, 0.0);
        let flat = vec3(2.0, 0.0, 0.0);
        assert_close(overshoot_length(0.25, segment, flat), 0.4, 1e-6);
    }

    #[test]
    fn oblique_segment_scales_overshoot_by_cosine() {
        let segment = vec3(1.0, -1.0, 0.0);
        let flat = vec3(3.0, 0.0, 0.0);
        assert_close(overshoot_length(0.5, segment, flat), 0.5 * 2.0f32.sqrt(), 1e-5);
    }

    #[test]
    fn validate_accepts_configured_arc() {
        assert_eq!(teleport_arc().validate(), Ok(()));
        assert_eq!(aimed_upwards().validate(), Ok(()));
    }

    #[test]
    fn validate_reports_degenerate_configurations() {
        let mut zero_speed = teleport_arc();
        zero_speed.set_speed(0.0);
        assert_eq!(zero_speed.validate(), Err(ParableError::ZeroSpeed));

        let mut zero_step = teleport_arc();
        zero_step.set_step_length(0.0);
        assert_eq!(zero_step.validate(), Err(ParableError::ZeroStepLength));

        let mut zero_up = teleport_arc();
        zero_up.set_up(Vec3::ZERO);
        assert_eq!(zero_up.validate(), Err(ParableError::ZeroUp));

        let mut infinite_gravity = teleport_arc();
        infinite_gravity.set_gravity(f32::INFINITY);
        assert_eq!(
            infinite_gravity.validate(),
            Err(ParableError::NonFinite {
                parameter: "gravity"
            })
        );

        assert_eq!(Parable::new().validate(), Err(ParableError::ZeroSpeed));

        let mut stalled = teleport_arc();
        stalled.set_forward(Vec3::ZERO);
        stalled.set_gravity(0.0);
        assert_eq!(stalled.validate(), Err(ParableError::Stalled));

        let mut no_up_no_forward = teleport_arc();
        no_up_no_forward.set_forward(Vec3::ZERO);
        no_up_no_forward.set_up(Vec3::ZERO);
        assert_eq!(no_up_no_forward.validate(), Err(ParableError::Stalled));
    }

    #[test]
    fn falling_straight_down_is_not_stalled() {
        let mut dropped = teleport_arc();
        dropped.set_forward(Vec3::ZERO);
        assert_eq!(dropped.validate(), Ok(()));
        assert!(dropped.position_by_distance(0.5).y < 0.0);
    }

    #[test]
    fn distance_scans_work_without_up_axis() {
        let mut parable = teleport_arc();
        parable.set_up(Vec3::ZERO);
        assert_eq!(parable.validate(), Err(ParableError::ZeroUp));

        let position = parable.position_by_distance(1.0);
        assert_close(position.x, 0.0, 1e-6);
        assert_close(position.y, 0.0, 1e-6);
        assert_close(position.z, 1.0, 1e-4);
        assert_eq!(parable.position_index_by_distance(1.05), 10);
    }

    #[test]
    fn tilted_up_round_trips_flat_distance() {
        let up = vec3(1.0, 1.0, 0.0).normalize();
        let mut parable = parable(
            vec3(0.5, 2.0, -1.0),
            vec3(0.2, 0.3, 1.0).normalize(),
            9.0,
            -9.8,
            0.1,
        );
        parable.set_up(up);

        for flat_distance in [0.05, 0.8, 2.5, 4.0] {
            let distance = parable.distance_over_flat_distance(flat_distance, 30.0);
            assert!(distance <= 30.0);
            assert_close(parable.flat_distance_over_distance(distance), flat_distance, 1e-3);
        }
    }

    #[test]
    fn tilted_up_without_gravity_stays_in_start_plane() {
        let up = vec3(1.0, 1.0, 0.0).normalize();
        let start = vec3(1.0, 2.0, 3.0);
        let mut parable = parable(start, vec3(1.0, -1.0, 1.0).normalize(), 6.0, 0.0, 0.2);
        parable.set_up(up);

        for step in 0..50 {
            let height = height_along(parable.position(step), start, up);
            assert_close(height, 0.0, 1e-4);
        }
    }

    #[test]
    fn tilted_up_gravity_pulls_along_that_axis() {
        let up = vec3(1.0, 1.0, 0.0).normalize();
        let start = vec3(1.0, 2.0, 3.0);
        let mut parable = parable(start, Vec3::Z, 5.0, -9.8, 0.1);
        parable.set_up(up);

        let position = parable.position(10);
        assert_close(height_along(position, start, up), -0.196, 1e-5);
        assert_close(position.z - start.z, 1.0, 1e-5);
    }

    #[test]
    fn segments_chain_end_to_start() {
        let parable = aimed_upwards();
        let segments: Vec<_> = parable.segments().take(5).collect();

        assert_eq!(segments[0].index, 1);
        assert_eq!(segments[0].from, parable.start_position());
        assert_eq!(segments[0].distance_before, 0.0);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
            assert_eq!(pair[0].distance, pair[1].distance_before);
        }
    }

    #[test]
    fn parable_can_be_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Parable>();
    }
}

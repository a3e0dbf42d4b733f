use macroquad::prelude::*;
use teleport_parable::core::parable::Parable;
use teleport_parable::core::projection::height_along;

use crate::constants::{
    DEFAULT_FLAT_TARGET_M, DEFAULT_GRAVITY_MPS2, DEFAULT_PITCH_DEG, DEFAULT_SPEED_MPS,
    DEFAULT_STEP_LENGTH_M, DEFAULT_YAW_DEG, EYE_HEIGHT_M, GROUND_HEIGHT_M, MAX_PARABLE_DISTANCE_M,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AimMode {
    Ground,
    FlatTarget,
}

impl AimMode {
    pub(crate) fn toggled(self) -> Self {
        match self {
            Self::Ground => Self::FlatTarget,
            Self::FlatTarget => Self::Ground,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Ground => "Land on ground",
            Self::FlatTarget => "Flat target",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct AimConfig {
    pub(crate) yaw_deg: f32,
    pub(crate) pitch_deg: f32,
    pub(crate) speed_mps: f32,
    pub(crate) gravity_mps2: f32,
    pub(crate) step_length_m: f32,
    pub(crate) flat_target_m: f32,
}

impl AimConfig {
    pub(crate) fn new() -> Self {
        Self {
            yaw_deg: DEFAULT_YAW_DEG,
            pitch_deg: DEFAULT_PITCH_DEG,
            speed_mps: DEFAULT_SPEED_MPS,
            gravity_mps2: DEFAULT_GRAVITY_MPS2,
            step_length_m: DEFAULT_STEP_LENGTH_M,
            flat_target_m: DEFAULT_FLAT_TARGET_M,
        }
    }

    // yaw 0 looks down +Z
    pub(crate) fn forward(&self) -> Vec3 {
        let yaw = self.yaw_deg.to_radians();
        let pitch = self.pitch_deg.to_radians();
        vec3(
            yaw.sin() * pitch.cos(),
            pitch.sin(),
            yaw.cos() * pitch.cos(),
        )
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Landing {
    pub(crate) distance_m: f32,
    pub(crate) flat_distance_m: f32,
    pub(crate) position: Vec3,
    pub(crate) target: Vec3,
    pub(crate) valid: bool,
}

pub(crate) fn build_parable(player_feet: Vec3, config: &AimConfig) -> Parable {
    let mut parable = Parable::new();
    parable.set_start_position(player_feet + (Vec3::Y * EYE_HEIGHT_M));
    parable.set_forward(config.forward());
    parable.set_up(Vec3::Y);
    parable.set_speed(config.speed_mps);
    parable.set_gravity(config.gravity_mps2);
    parable.set_step_length(config.step_length_m);
    parable
}

pub(crate) fn ground_distance(parable: &Parable, ground_height: f32, max_distance: f32) -> Option<f32> {
    let height = |point: Vec3| height_along(point, Vec3::ZERO, parable.up()) - ground_height;

    parable
        .segments()
        .take_while(|segment| segment.distance_before <= max_distance)
        .find(|segment| height(segment.to) <= 0.0)
        .map(|segment| {
            let above = height(segment.from);
            let drop = above - height(segment.to);
            let fraction = if drop > f32::EPSILON {
                (above / drop).clamp(0.0, 1.0)
            } else {
                1.0
            };
            segment.distance_before + (segment.length * fraction)
        })
        .filter(|distance| *distance <= max_distance)
}

pub(crate) fn resolve_landing(parable: &Parable, config: &AimConfig, mode: AimMode) -> Landing {
    let ground = ground_distance(parable, GROUND_HEIGHT_M, MAX_PARABLE_DISTANCE_M);
    let max_distance = ground.unwrap_or(MAX_PARABLE_DISTANCE_M);

    let distance_m = match mode {
        AimMode::Ground => max_distance,
        AimMode::FlatTarget => {
            parable.distance_over_flat_distance(config.flat_target_m, max_distance)
        }
    };
    let position = parable.position_by_distance(distance_m);

    Landing {
        distance_m,
        flat_distance_m: parable.flat_distance_over_distance(distance_m),
        position,
        target: vec3(position.x, GROUND_HEIGHT_M, position.z),
        valid: ground.is_some(),
    }
}

use macroquad::prelude::*;

use crate::constants::{
    FLAT_TARGET_KEY_RATE_M, GRAVITY_KEY_RATE_MPS2, MAX_FLAT_TARGET_M, MAX_PITCH_DEG,
    MAX_SPEED_MPS, MIN_GRAVITY_MPS2, MIN_PITCH_DEG, MIN_SPEED_MPS, PITCH_KEY_RATE_DEG,
    SPEED_KEY_RATE_MPS, YAW_KEY_RATE_DEG,
};
use crate::model::AimConfig;

#[derive(Default, Clone, Copy)]
pub(crate) struct FrameActions {
    pub(crate) teleport: bool,
    pub(crate) toggle_mode: bool,
    pub(crate) reset: bool,
}

pub(crate) fn hotkey_actions() -> FrameActions {
    FrameActions {
        teleport: is_key_pressed(KeyCode::Space),
        toggle_mode: is_key_pressed(KeyCode::Tab),
        reset: is_key_pressed(KeyCode::R),
    }
}

// yaw, pitch, speed, gravity, flat target
fn held_axes() -> [f32; 5] {
    let axis = |negative: KeyCode, positive: KeyCode| {
        f32::from(u8::from(is_key_down(positive))) - f32::from(u8::from(is_key_down(negative)))
    };
    [
        axis(KeyCode::Left, KeyCode::Right),
        axis(KeyCode::Down, KeyCode::Up),
        axis(KeyCode::S, KeyCode::W),
        axis(KeyCode::A, KeyCode::D),
        axis(KeyCode::Q, KeyCode::E),
    ]
}

pub(crate) fn apply_axes(config: &mut AimConfig, axes: [f32; 5], frame_dt: f32) -> bool {
    let before = (
        config.yaw_deg,
        config.pitch_deg,
        config.speed_mps,
        config.gravity_mps2,
        config.flat_target_m,
    );
    let [yaw, pitch, speed, gravity, flat_target] = axes;

    config.yaw_deg = (config.yaw_deg + (yaw * YAW_KEY_RATE_DEG * frame_dt)).rem_euclid(360.0);
    config.pitch_deg = (config.pitch_deg + (pitch * PITCH_KEY_RATE_DEG * frame_dt))
        .clamp(MIN_PITCH_DEG, MAX_PITCH_DEG);
    config.speed_mps = (config.speed_mps + (speed * SPEED_KEY_RATE_MPS * frame_dt))
        .clamp(MIN_SPEED_MPS, MAX_SPEED_MPS);
    config.gravity_mps2 = (config.gravity_mps2 + (gravity * GRAVITY_KEY_RATE_MPS2 * frame_dt))
        .clamp(MIN_GRAVITY_MPS2, 0.0);
    config.flat_target_m = (config.flat_target_m
        + (flat_target * FLAT_TARGET_KEY_RATE_M * frame_dt))
        .clamp(0.0, MAX_FLAT_TARGET_M);

    before
        != (
            config.yaw_deg,
            config.pitch_deg,
            config.speed_mps,
            config.gravity_mps2,
            config.flat_target_m,
        )
}

pub(crate) fn apply_keyboard_adjustments(config: &mut AimConfig, frame_dt: f32) -> bool {
    apply_axes(config, held_axes(), frame_dt)
}

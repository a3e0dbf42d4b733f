use macroquad::prelude::*;

use crate::constants::{CONTROLS_Y, HUD_LEFT, TITLE_Y};
use crate::render::draw_ui_text;
use crate::state::AppRuntime;

pub(crate) fn draw_hud(state: &AppRuntime, screen_h: f32, font: Option<&Font>) {
    draw_header_block(state, font);
    draw_status_block(state, screen_h, font);
}

fn draw_header_block(state: &AppRuntime, font: Option<&Font>) {
    let header_color = Color::from_rgba(30, 30, 35, 255);
    draw_ui_text(
        "Teleport Parable - Preview",
        HUD_LEFT,
        TITLE_Y,
        30,
        header_color,
        font,
    );
    draw_ui_text(
        "Controls: arrows aim | W/S speed | A/D gravity | Q/E flat target | Tab mode | Space teleport | R reset",
        HUD_LEFT,
        CONTROLS_Y,
        20,
        DARKGRAY,
        font,
    );
    draw_ui_text(
        &format!("Mode: {}", state.mode.label()),
        HUD_LEFT,
        CONTROLS_Y + 28.0,
        22,
        DARKGRAY,
        font,
    );
}

fn draw_status_block(state: &AppRuntime, screen_h: f32, font: Option<&Font>) {
    let header_color = Color::from_rgba(30, 30, 35, 255);
    let config = state.config;
    let landing = state.landing;
    let last_step = state.parable.position_index_by_distance(landing.distance_m);

    draw_ui_text(
        &format!(
            "Yaw: {:.1} deg | Pitch: {:.1} deg | Speed: {:.1} m/s | Gravity: {:.1} m/s^2 | Flat target: {:.2} m",
            config.yaw_deg,
            config.pitch_deg,
            config.speed_mps,
            config.gravity_mps2,
            config.flat_target_m
        ),
        HUD_LEFT,
        screen_h - 76.0,
        22,
        header_color,
        font,
    );
    draw_ui_text(
        &format!(
            "Arc: {:.2} m over {} steps | Flat: {:.2} m | Landing: ({:.2}, {:.2}, {:.2})",
            landing.distance_m,
            last_step,
            landing.flat_distance_m,
            landing.target.x,
            landing.target.y,
            landing.target.z
        ),
        HUD_LEFT,
        screen_h - 45.0,
        20,
        if landing.valid { BLUE } else { RED },
        font,
    );
    draw_ui_text(
        &format!("Teleports: {} | {}", state.teleports, state.status_line),
        HUD_LEFT,
        screen_h - 14.0,
        18,
        DARKGRAY,
        font,
    );
}

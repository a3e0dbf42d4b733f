use macroquad::prelude::*;

use crate::constants::{
    ARC_COLOR, CAMERA_BACK_M, CAMERA_UP_M, EYE_HEIGHT_M, GROUND_GRID_SLICES,
    GROUND_GRID_SPACING_M, LANDING_COLOR, MISS_ARC_COLOR,
};
use crate::state::AppRuntime;

pub(crate) fn draw_ui_text(
    text: &str,
    x: f32,
    y: f32,
    font_size: u16,
    color: Color,
    font: Option<&Font>,
) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font,
            font_size,
            color,
            ..Default::default()
        },
    );
}

pub(crate) fn follow_camera(state: &AppRuntime) -> Camera3D {
    let forward = state.config.forward();
    let behind = vec3(forward.x, 0.0, forward.z).normalize_or_zero();
    let eye = state.parable.start_position();

    Camera3D {
        position: eye - (behind * CAMERA_BACK_M) + (Vec3::Y * CAMERA_UP_M),
        target: state.landing.position,
        up: Vec3::Y,
        ..Default::default()
    }
}

pub(crate) fn draw_arc(points: &[Vec3], color: Color) {
    for pair in points.windows(2) {
        draw_line_3d(pair[0], pair[1], color);
    }
}

pub(crate) fn draw_world(state: &AppRuntime) {
    draw_grid(
        GROUND_GRID_SLICES,
        GROUND_GRID_SPACING_M,
        Color::from_rgba(160, 166, 175, 255),
        Color::from_rgba(205, 210, 216, 255),
    );

    let body_center = state.player_feet + (Vec3::Y * (EYE_HEIGHT_M * 0.5));
    draw_cube_wires(body_center, vec3(0.4, EYE_HEIGHT_M, 0.4), DARKGRAY);

    let landing = state.landing;
    let arc_color = if landing.valid { ARC_COLOR } else { MISS_ARC_COLOR };
    draw_arc(&state.arc_points, arc_color);

    if landing.valid {
        draw_line_3d(landing.position, landing.target, LANDING_COLOR);
        draw_sphere(landing.target, 0.25, None, LANDING_COLOR);
    } else {
        draw_sphere(landing.position, 0.12, None, MISS_ARC_COLOR);
    }
}

use macroquad::prelude::*;
use tracing::{debug, warn};

use crate::constants::{
    INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, MSAA_SAMPLES, SKY_COLOR, UI_FONT_PATH,
};
use crate::controls::{apply_keyboard_adjustments, hotkey_actions};
use crate::gameplay::apply_actions;
use crate::hud::draw_hud;
use crate::render::{draw_world, follow_camera};
use crate::state::AppRuntime;

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Teleport Parable Preview".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

pub(crate) async fn run() {
    tracing_subscriber::fmt().init();

    let ui_font = match load_ttf_font(UI_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(err) => {
            warn!("Could not load '{UI_FONT_PATH}': {err}. Falling back to default font.");
            None
        }
    };

    let mut state = AppRuntime::new();

    loop {
        let frame_dt = get_frame_time();

        apply_actions(&mut state, hotkey_actions());
        if apply_keyboard_adjustments(&mut state.config, frame_dt) {
            state.refresh_preview();
            debug!(
                distance = state.landing.distance_m,
                valid = state.landing.valid,
                "aim changed"
            );
        }

        clear_background(SKY_COLOR);

        set_camera(&follow_camera(&state));
        draw_world(&state);

        set_default_camera();
        draw_hud(&state, screen_height(), ui_font.as_ref());

        next_frame().await;
    }
}

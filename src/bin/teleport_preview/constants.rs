use macroquad::prelude::Color;

pub const INITIAL_WINDOW_WIDTH: i32 = 1920;
pub const INITIAL_WINDOW_HEIGHT: i32 = 1080;
pub const MSAA_SAMPLES: i32 = 4;
pub const UI_FONT_PATH: &str = "assets/fonts/Lato-Regular.ttf";

pub const HUD_LEFT: f32 = 30.0;
pub const TITLE_Y: f32 = 46.0;
pub const CONTROLS_Y: f32 = 80.0;

pub const EYE_HEIGHT_M: f32 = 1.6;
pub const GROUND_HEIGHT_M: f32 = 0.0;
pub const MAX_PARABLE_DISTANCE_M: f32 = 30.0;

pub const DEFAULT_YAW_DEG: f32 = 0.0;
pub const DEFAULT_PITCH_DEG: f32 = 25.0;
pub const DEFAULT_SPEED_MPS: f32 = 8.0;
pub const DEFAULT_GRAVITY_MPS2: f32 = -9.8;
pub const DEFAULT_STEP_LENGTH_M: f32 = 0.25;
pub const DEFAULT_FLAT_TARGET_M: f32 = 5.0;

pub const YAW_KEY_RATE_DEG: f32 = 90.0;
pub const PITCH_KEY_RATE_DEG: f32 = 40.0;
pub const SPEED_KEY_RATE_MPS: f32 = 6.0;
pub const GRAVITY_KEY_RATE_MPS2: f32 = 6.0;
pub const FLAT_TARGET_KEY_RATE_M: f32 = 4.0;

pub const MIN_PITCH_DEG: f32 = -60.0;
pub const MAX_PITCH_DEG: f32 = 80.0;
pub const MIN_SPEED_MPS: f32 = 0.5;
pub const MAX_SPEED_MPS: f32 = 30.0;
pub const MIN_GRAVITY_MPS2: f32 = -30.0;
pub const MAX_FLAT_TARGET_M: f32 = 25.0;

pub const GROUND_GRID_SLICES: u32 = 60;
pub const GROUND_GRID_SPACING_M: f32 = 1.0;
pub const CAMERA_BACK_M: f32 = 6.0;
pub const CAMERA_UP_M: f32 = 4.0;

pub const SKY_COLOR: Color = Color::new(0.92, 0.93, 0.95, 1.0);
pub const ARC_COLOR: Color = Color::new(0.14, 0.45, 0.95, 1.0);
pub const MISS_ARC_COLOR: Color = Color::new(0.85, 0.25, 0.2, 1.0);
pub const LANDING_COLOR: Color = Color::new(0.1, 0.7, 0.35, 1.0);

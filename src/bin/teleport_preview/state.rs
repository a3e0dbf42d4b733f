use macroquad::prelude::*;
use teleport_parable::core::parable::Parable;
use teleport_parable::core::sampling::sample_arc;

use crate::model::{AimConfig, AimMode, Landing, build_parable, resolve_landing};

pub(crate) struct AppRuntime {
    pub(crate) player_feet: Vec3,
    pub(crate) config: AimConfig,
    pub(crate) mode: AimMode,
    pub(crate) parable: Parable,
    pub(crate) landing: Landing,
    pub(crate) arc_points: Vec<Vec3>,
    pub(crate) teleports: u32,
    pub(crate) status_line: String,
}

impl AppRuntime {
    pub(crate) fn new() -> Self {
        let player_feet = Vec3::ZERO;
        let config = AimConfig::new();
        let mode = AimMode::Ground;
        let parable = build_parable(player_feet, &config);
        let landing = resolve_landing(&parable, &config, mode);

        let mut state = Self {
            player_feet,
            config,
            mode,
            parable,
            landing,
            arc_points: Vec::new(),
            teleports: 0,
            status_line: "Ready".to_string(),
        };
        state.refresh_preview();
        state
    }

    pub(crate) fn refresh_preview(&mut self) {
        self.parable = build_parable(self.player_feet, &self.config);
        self.landing = resolve_landing(&self.parable, &self.config, self.mode);
        sample_arc(&self.parable, self.landing.distance_m, &mut self.arc_points);
    }

    pub(crate) fn teleport(&mut self) {
        if !self.landing.valid {
            self.status_line = "No ground in reach, teleport cancelled".to_string();
            return;
        }

        let travelled = self.landing.flat_distance_m;
        self.player_feet = self.landing.target;
        self.teleports += 1;
        self.status_line = format!("Teleported {travelled:.2} m");
        self.refresh_preview();
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::new();
        self.status_line = "Reset".to_string();
    }
}

use crate::controls::FrameActions;
use crate::state::AppRuntime;

pub(crate) fn apply_actions(state: &mut AppRuntime, actions: FrameActions) {
    if actions.toggle_mode {
        state.mode = state.mode.toggled();
        state.status_line = format!("Mode: {}", state.mode.label());
        state.refresh_preview();
    }

    if actions.teleport {
        state.teleport();
    }

    if actions.reset {
        state.reset();
    }
}

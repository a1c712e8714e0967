// Browser-shell constants. Engine and scene values live in
// `kinetic_core::constants`.

// Element ids expected in index.html
pub const CANVAS_ID: &str = "app-canvas";
pub const STATUS_ID: &str = "status";
pub const TENSION_ID: &str = "tension";
pub const SHAPE_LABEL_ID: &str = "shape-label";
pub const HELP_OVERLAY_ID: &str = "help-overlay";
pub const AUDIO_BUTTON_ID: &str = "audio-toggle";
pub const COLOR_INPUT_ID: &str = "color-input";
pub const SHAPE_BUTTON_PREFIX: &str = "shape-"; // followed by the shape id, e.g. shape-GALAXY
pub const ACTIVE_CLASS: &str = "active";
pub const HIDDEN_CLASS: &str = "hidden";

// Keyboard expansion nudge per key press
pub const EXPANSION_KEY_STEP: f32 = 0.1;

// Wheel delta normalisation (WheelEvent.deltaMode)
pub const WHEEL_LINE_PX: f32 = 16.0;
pub const WHEEL_PAGE_PX: f32 = 800.0;

// Longest frame step fed to camera auto-rotate
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Library surface for the binary and for headless/integration tests.
pub mod app_dirs;
pub mod config;
pub mod game;
pub mod keymap;
pub mod runtime;
pub mod session;
pub mod texts;
pub mod typing_policy;
pub mod ui;
pub mod util;

/// Seconds shown on the countdown screen before typing starts.
pub const COUNTDOWN_SECS: u32 = 3;

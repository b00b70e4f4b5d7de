//! Pixel Hero core crate.
//!
//! A lane-based scrolling-note rhythm game played on a fixed 16x8 pixel grid:
//! a precomputed chart scrolls across the grid one column per beat, and the
//! player presses lane keys to hit notes as they cross the scoring zone.
//!
//! The note-scheduling and scoring engine lives in the `game` child modules
//! (`chart`, `scroll`, `judge`, `round`, `colour`) and is pure Rust with no
//! browser APIs, so it runs under `cargo test` on the host. The canvas
//! front-end in `game` itself drives the engine from the browser via
//! `start_game()`.

use wasm_bindgen::prelude::*;

pub mod game;

pub use game::chart::{Chart, NOTE_CHART};
pub use game::judge::PressOutcome;
pub use game::round::Round;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Launch the round loop against the compiled-in chart.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    game::start_round_mode()
}

//! Canvas front-end and round loop for the scrolling-note game.
//!
//! Everything that touches the browser lives in this file: canvas and
//! overlay setup, keyboard lane input, and the animation-frame loop that
//! feeds ticks to the core engine. The child modules (`chart`, `scroll`,
//! `judge`, `round`, `colour`) are pure Rust — the renderer here only pulls
//! colours out of `Round` and paints them.
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, window};

pub mod chart;
pub mod colour;
pub mod judge;
pub mod round;
pub mod scroll;

use chart::{LANE_COUNT, NOTE_CHART};
use colour::Colour;
use judge::{COMBO_BONUS_AT, HitTier, PressOutcome};
use round::Round;
use scroll::GRID_WIDTH;

/// Pixel size of one grid cell on the canvas; each lane is two cells tall.
const CELL_PX: f64 = 40.0;
const GRID_ROWS: u8 = 2 * LANE_COUNT;

/// Full beat period in milliseconds per speed setting; the chart advances
/// every fifth of it.
const SPEED_NORMAL_MS: f64 = 1000.0;
const SPEED_FAST_MS: f64 = 500.0;
const SPEED_EXTREME_MS: f64 = 250.0;

/// Runtime state for one round loop.
struct RoundMode {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    round: Round,
    game_speed_ms: f64,
    /// When set, the chart advances only on an explicit 'n' key press.
    manual_mode: bool,
    last_advance_ms: f64,
    last_judgment: String,
}

thread_local! {
    static ROUND_MODE: std::cell::RefCell<Option<RoundMode>> = std::cell::RefCell::new(None);
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub fn start_round_mode() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Create / reuse the grid canvas
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("ph-grid-canvas") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("ph-grid-canvas");
        c.set_width((f64::from(GRID_WIDTH) * CELL_PX) as u32);
        c.set_height((f64::from(GRID_ROWS) * CELL_PX) as u32);
        c.set_attribute("style", "position:fixed; left:50%; top:42%; transform:translate(-50%,-50%); box-shadow:0 0 32px 0 rgba(0,0,0,0.18); border-radius:12px; border:2px solid #222; background:#181818; z-index:20;").ok();
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    ctx.set_text_align("center");

    let now = win
        .performance()
        .map(|p| p.now())
        .unwrap_or(0.0);
    let mode = RoundMode {
        canvas,
        ctx,
        round: Round::new(&NOTE_CHART),
        game_speed_ms: SPEED_NORMAL_MS,
        manual_mode: false,
        last_advance_ms: now,
        last_judgment: String::new(),
    };
    ROUND_MODE.with(|m| m.replace(Some(mode)));

    ensure_overlay(&doc, "ph-score", "Score: 0",
        "position:fixed; top:10px; left:12px; font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; z-index:45; letter-spacing:0.5px;")?;
    ensure_overlay(&doc, "ph-combo", "Combo: 0",
        "position:fixed; top:10px; left:170px; font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#cccccc; z-index:45; letter-spacing:0.5px;")?;
    ensure_overlay(&doc, "ph-status", "Speed: Normal | keys a/s/d/f",
        "position:fixed; bottom:24px; left:50%; transform:translateX(-50%); font-family:'Fira Code', monospace; font-size:14px; padding:4px 10px; background:rgba(0,0,0,0.35); border:1px solid #333; border-radius:6px; color:#ffd166; z-index:45;")?;

    // Keyboard listener for lane presses and loop controls
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            ROUND_MODE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    handle_key(state, &evt.key());
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_round_loop();
    Ok(())
}

fn ensure_overlay(doc: &Document, id: &str, text: &str, style: &str) -> Result<(), JsValue> {
    if doc.get_element_by_id(id).is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id(id);
            div.set_text_content(Some(text));
            div.set_attribute("style", style).ok();
            body.append_child(&div)?;
        }
    }
    Ok(())
}

fn handle_key(state: &mut RoundMode, key: &str) {
    if state.round.is_over() {
        if key == "Enter" {
            state.round.start();
            state.last_judgment.clear();
            state.last_advance_ms = window()
                .and_then(|w| w.performance())
                .map(|p| p.now())
                .unwrap_or(0.0);
        }
        return;
    }
    let lane = match key {
        "a" | "A" => Some(0),
        "s" | "S" => Some(1),
        "d" | "D" => Some(2),
        "f" | "F" => Some(3),
        _ => None,
    };
    if let Some(lane) = lane {
        let outcome = state.round.on_input(lane);
        state.last_judgment = judgment_text(outcome);
        return;
    }
    match key {
        "1" => state.game_speed_ms = SPEED_NORMAL_MS,
        "2" => state.game_speed_ms = SPEED_FAST_MS,
        "3" => state.game_speed_ms = SPEED_EXTREME_MS,
        "m" | "M" => state.manual_mode = !state.manual_mode,
        "n" | "N" => {
            if state.manual_mode {
                state.round.on_tick();
            }
        }
        _ => {}
    }
}

fn judgment_text(outcome: PressOutcome) -> String {
    match outcome {
        PressOutcome::Hit { tier, .. } => match tier {
            HitTier::Centre => "Centre hit!".to_string(),
            HitTier::Near => "Near hit".to_string(),
            HitTier::Edge => "Edge hit".to_string(),
        },
        PressOutcome::Repeat { .. } => "Already played (-1)".to_string(),
        PressOutcome::Miss => "Miss (-1)".to_string(),
    }
}

fn start_round_loop() {
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        ROUND_MODE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                round_frame(state, ts);
            }
        });
        if let Some(w) = window() {
            let _ =
                w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

/// One loop iteration: at most one tick, then a full repaint. Pausing the
/// loop (or manual mode) simply withholds ticks; beat, score, and combo do
/// not move without them.
fn round_frame(state: &mut RoundMode, now: f64) {
    let tick_period = state.game_speed_ms / f64::from(scroll::STEP_SPACING);
    if !state.round.is_over()
        && !state.manual_mode
        && now - state.last_advance_ms >= tick_period
    {
        state.round.on_tick();
        state.last_advance_ms = now;
    }
    render_grid(state);
    update_overlays(state);
}

fn render_grid(state: &RoundMode) {
    let ctx = &state.ctx;
    let w = f64::from(state.canvas.width());
    let h = f64::from(state.canvas.height());

    ctx.set_fill_style_str(Colour::Black.css());
    ctx.fill_rect(0.0, 0.0, w, h);

    // Scoring-zone underlay, brightest at the centre column
    for col in 0..GRID_WIDTH {
        if let Some(marker) = Colour::zone_marker(col) {
            ctx.set_global_alpha(0.35);
            ctx.set_fill_style_str(marker.css());
            ctx.fill_rect(f64::from(col) * CELL_PX, 0.0, CELL_PX, h);
            ctx.set_global_alpha(1.0);
        }
    }

    // Grid lines
    ctx.set_stroke_style_str("#222");
    ctx.set_line_width(2.0);
    for x in 0..=GRID_WIDTH {
        let fx = f64::from(x) * CELL_PX;
        line(ctx, fx, 0.0, fx, h);
    }
    for y in 0..=GRID_ROWS {
        let fy = f64::from(y) * CELL_PX;
        line(ctx, 0.0, fy, w, fy);
    }

    // Ghost preview at the entry column
    for (lane, c) in state.round.ghost_colours() {
        fill_note_cell(ctx, 0, lane, c);
    }

    // Visible notes, coloured by the core's projection
    for (note, c) in state.round.note_colours() {
        fill_note_cell(ctx, note.column, note.lane, c);
    }

    if state.round.is_over() {
        ctx.set_fill_style_str("rgba(0,0,0,0.55)");
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str("#ffffff");
        ctx.set_font("56px 'Fira Code', monospace");
        ctx.fill_text("GAME OVER", w / 2.0, h / 2.0 - 12.0).ok();
        ctx.set_font("18px 'Fira Code', monospace");
        ctx.fill_text(
            &format!("Final Score: {}", state.round.current_score()),
            w / 2.0,
            h / 2.0 + 28.0,
        )
        .ok();
        ctx.fill_text("Press Enter to play again", w / 2.0, h / 2.0 + 56.0)
            .ok();
    }
}

/// A note occupies the two pixel rows of its lane.
fn fill_note_cell(ctx: &CanvasRenderingContext2d, column: u8, lane: u8, colour: Colour) {
    let x = f64::from(column) * CELL_PX;
    let y = f64::from(lane) * 2.0 * CELL_PX;
    ctx.set_fill_style_str(colour.css());
    ctx.fill_rect(x + 2.0, y + 2.0, CELL_PX - 4.0, 2.0 * CELL_PX - 4.0);
}

fn update_overlays(state: &RoundMode) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(el) = doc.get_element_by_id("ph-score") {
        el.set_text_content(Some(&format!("Score: {}", state.round.current_score())));
    }
    if let Some(el) = doc.get_element_by_id("ph-combo") {
        el.set_text_content(Some(&format!("Combo: {}", state.round.current_combo())));
        // Celebration colour once the combo bonus is live
        let colour = if state.round.current_combo() >= COMBO_BONUS_AT {
            "#ffd166"
        } else {
            "#cccccc"
        };
        el.set_attribute("style", &format!("position:fixed; top:10px; left:170px; font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:{colour}; z-index:45; letter-spacing:0.5px;")).ok();
    }
    if let Some(el) = doc.get_element_by_id("ph-status") {
        let speed = speed_label(state.game_speed_ms);
        let manual = if state.manual_mode { " | Manual (n advances)" } else { "" };
        let judgment = if state.last_judgment.is_empty() {
            String::new()
        } else {
            format!(" | {}", state.last_judgment)
        };
        el.set_text_content(Some(&format!("Speed: {speed}{manual}{judgment}")));
    }
}

fn speed_label(game_speed_ms: f64) -> &'static str {
    if game_speed_ms <= SPEED_EXTREME_MS {
        "Extreme"
    } else if game_speed_ms <= SPEED_FAST_MS {
        "Fast"
    } else {
        "Normal"
    }
}

fn line(ctx: &CanvasRenderingContext2d, x1: f64, y1: f64, x2: f64, y2: f64) {
    ctx.begin_path();
    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    ctx.stroke();
}

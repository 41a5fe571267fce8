pub mod runner;

pub use runner::SceneRunner;

use std::cell::RefCell;

use parallax_engine::{InputEvent, SceneConfig, StarId};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut SceneRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Scene not initialized. Call scene_init() first.");
        f(runner)
    })
}

fn install(runner: SceneRunner) {
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
}

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Start the reference scene.
#[wasm_bindgen]
pub fn scene_init() {
    init_logging();
    install(SceneRunner::reference());
    log::info!("parallax: initialized");
}

/// Start a scene variant described by JSON. Falls back to the reference
/// scene when the JSON is rejected; returns whether the variant was used.
#[wasm_bindgen]
pub fn scene_init_with_config(json: &str) -> bool {
    init_logging();
    let runner = SceneConfig::from_json(json).and_then(SceneRunner::new);
    match runner {
        Ok(runner) => {
            install(runner);
            log::info!("parallax: initialized from config");
            true
        }
        Err(e) => {
            log::warn!("parallax: bad scene config ({e}), using reference scene");
            install(SceneRunner::reference());
            false
        }
    }
}

/// One animation frame at page time `now_ms` (the rAF timestamp).
#[wasm_bindgen]
pub fn scene_tick(now_ms: f64) {
    with_runner(|r| {
        r.tick(now_ms);
    });
}

#[wasm_bindgen]
pub fn scene_pointer_down(x: f64, y: f64) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn scene_pointer_move(x: f64, y: f64) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn scene_pointer_up(x: f64, y: f64) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn scene_drag_earth(x: f64, y: f64) {
    with_runner(|r| r.push_input(InputEvent::DragEarth { x, y }));
}

#[wasm_bindgen]
pub fn scene_drag_background_star(id: u32, y: f64) {
    with_runner(|r| r.push_input(InputEvent::DragBackgroundStar { id: StarId(id), y }));
}

#[wasm_bindgen]
pub fn scene_drag_foreground_star(id: u32, x: f64, y: f64) {
    with_runner(|r| r.push_input(InputEvent::DragForegroundStar { id: StarId(id), x, y }));
}

#[wasm_bindgen]
pub fn scene_trigger_animation() {
    with_runner(|r| r.push_input(InputEvent::TriggerAnimation));
}

#[wasm_bindgen]
pub fn scene_cancel_animation() {
    with_runner(|r| r.push_input(InputEvent::CancelAnimation));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_buffer_ptr() -> *const f32 {
    with_runner(|r| r.buffer_ptr())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}

#[wasm_bindgen]
pub fn get_local_instances_ptr() -> *const f32 {
    with_runner(|r| r.local_instances_ptr())
}

#[wasm_bindgen]
pub fn get_local_instance_count() -> u32 {
    with_runner(|r| r.local_instance_count())
}

#[wasm_bindgen]
pub fn get_panel_instances_ptr() -> *const f32 {
    with_runner(|r| r.panel_instances_ptr())
}

#[wasm_bindgen]
pub fn get_panel_instance_count() -> u32 {
    with_runner(|r| r.panel_instance_count())
}

#[wasm_bindgen]
pub fn get_is_animating() -> bool {
    with_runner(|r| r.is_animating())
}

#[wasm_bindgen]
pub fn get_earth_angle() -> f64 {
    with_runner(|r| r.earth_angle())
}

// ---- Vector accessors (only when vectors feature is enabled) ----

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn get_local_vectors_ptr() -> *const f32 {
    with_runner(|r| r.local_vectors_ptr())
}

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn get_local_vector_count() -> u32 {
    with_runner(|r| r.local_vector_count())
}

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn get_panel_vectors_ptr() -> *const f32 {
    with_runner(|r| r.panel_vectors_ptr())
}

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn get_panel_vector_count() -> u32 {
    with_runner(|r| r.panel_vector_count())
}

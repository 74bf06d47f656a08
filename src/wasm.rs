//! Browser bindings
//!
//! JavaScript owns the camera, the face-landmark model, rendering and audio.
//! Each animation frame it hands detections in as JSON and reads back a
//! state snapshot plus the queued sound cues.

use wasm_bindgen::prelude::*;

use crate::game::{FrameInput, Game};
use crate::logging;
use crate::settings::Settings;
use crate::tracking::Detection;
use crate::tuning::Tuning;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    logging::init(false);
    log::info!("Mouth King wasm module loaded");
}

#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// All arguments are optional JSON blobs; missing ones use defaults
    #[wasm_bindgen(constructor)]
    pub fn new(
        tuning_json: Option<String>,
        settings_json: Option<String>,
    ) -> Result<WasmGame, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(to_js)?,
            None => Tuning::default(),
        };
        let settings = match settings_json {
            Some(json) => Settings::from_json(&json).map_err(to_js)?,
            None => Settings::default(),
        };
        let seed = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
        Ok(WasmGame {
            game: Game::new(tuning, settings, seed),
        })
    }

    /// Run tracker + tick for one animation frame
    pub fn frame(&mut self, video_time: f64, detections_json: &str, width: f32, height: f32) -> Result<(), JsValue> {
        let detections: Vec<Detection> = serde_json::from_str(detections_json).map_err(to_js)?;
        let mut detections = Some(detections);
        let mut source = || detections.take().unwrap_or_default();
        let input = FrameInput {
            video_time,
            width,
            height,
        };
        self.game.frame(&input, &mut source);
        Ok(())
    }

    /// Full game state as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.game.state()).map_err(to_js)
    }

    /// Queued sound cues as a JSON array, emptying the queue
    pub fn drain_sfx(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.drain_sfx()).map_err(to_js)
    }

    pub fn standings(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.standings()).map_err(to_js)
    }

    pub fn settings(&self) -> Result<String, JsValue> {
        self.game.settings().to_json().map_err(to_js)
    }

    pub fn apply_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let settings = Settings::from_json(json).map_err(to_js)?;
        self.game.apply_settings(settings);
        Ok(())
    }

    pub fn title(&self) -> String {
        self.game.catalog().theme.title().to_string()
    }

    pub fn headline(&self) -> String {
        self.game.catalog().theme.headline().to_string()
    }

    pub fn finish_loading(&mut self) {
        self.game.finish_loading();
    }

    pub fn start(&mut self) -> bool {
        self.game.start()
    }

    pub fn reset_all(&mut self) -> bool {
        self.game.reset_all()
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.game.toggle_pause()
    }

    pub fn resume(&mut self) -> bool {
        self.game.resume()
    }
}

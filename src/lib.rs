use wasm_bindgen::prelude::*;

pub mod animation;
pub mod color;
pub mod data;
pub mod growth;
pub mod math;
pub mod metrics;
pub mod particles;
pub mod render;

use animation::Driver;
use data::CommitFeed;
use render::Viewport;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Main engine state exposed to JavaScript
#[wasm_bindgen]
pub struct CommitRush {
    driver: Option<Driver>,
    viewport: Viewport,
    seed: u32,
}

#[wasm_bindgen]
impl CommitRush {
    /// Create a new engine instance for a viewport of the given size
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> CommitRush {
        Self {
            driver: None,
            viewport: Viewport::new(width, height),
            seed: 0x9E3779B9,
        }
    }

    /// Load commit history from a JSON feed and start a fresh session
    #[wasm_bindgen]
    pub fn load_commits(&mut self, json: &str) -> Result<(), JsValue> {
        let feed = CommitFeed::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;

        if feed.len() < feed.total_commits() {
            web_sys::console::log_1(
                &format!(
                    "massive repository: sampled {} of {} commits",
                    feed.len(),
                    feed.total_commits()
                )
                .into(),
            );
        }

        self.driver = Some(Driver::new(feed, self.viewport, self.seed));
        Ok(())
    }

    /// Advance against the host's timestamp (milliseconds). Returns
    /// whether a simulation tick ran, i.e. whether a redraw is due.
    #[wasm_bindgen]
    pub fn advance(&mut self, now_ms: f64) -> bool {
        match &mut self.driver {
            Some(driver) => driver.advance(now_ms),
            None => false,
        }
    }

    /// Current frame as a JSON scene description
    #[wasm_bindgen]
    pub fn scene_json(&self) -> Result<String, JsValue> {
        let Some(driver) = &self.driver else {
            return Err(JsValue::from_str("no commit data loaded"));
        };
        serde_json::to_string(&driver.scene()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current session summary as JSON (for the host's stats panel)
    #[wasm_bindgen]
    pub fn stats_json(&self) -> Result<String, JsValue> {
        let Some(driver) = &self.driver else {
            return Err(JsValue::from_str("no commit data loaded"));
        };
        serde_json::to_string(&driver.stats()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn toggle_pause(&mut self) {
        if let Some(driver) = &mut self.driver {
            driver.toggle_pause();
        }
    }

    #[wasm_bindgen]
    pub fn toggle_mode(&mut self) {
        if let Some(driver) = &mut self.driver {
            driver.toggle_mode();
        }
    }

    #[wasm_bindgen]
    pub fn restart(&mut self) {
        if let Some(driver) = &mut self.driver {
            driver.restart();
        }
    }

    #[wasm_bindgen]
    pub fn set_speed(&mut self, speed: f32) {
        if let Some(driver) = &mut self.driver {
            driver.set_speed(speed);
        }
    }

    #[wasm_bindgen]
    pub fn change_speed(&mut self, delta: f32) {
        if let Some(driver) = &mut self.driver {
            driver.change_speed(delta);
        }
    }

    /// Permanently stop the session (page teardown)
    #[wasm_bindgen]
    pub fn stop(&mut self) {
        if let Some(driver) = &mut self.driver {
            driver.stop();
        }
    }

    #[wasm_bindgen]
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        if let Some(driver) = &mut self.driver {
            driver.resize(width, height);
        }
    }

    #[wasm_bindgen(getter)]
    pub fn speed(&self) -> f32 {
        self.driver.as_ref().map_or(1.0, |d| d.speed())
    }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.driver
            .as_ref()
            .map_or("standard", |d| d.mode().as_str())
            .to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn run_state(&self) -> String {
        self.driver
            .as_ref()
            .map_or("running", |d| d.state().as_str())
            .to_string()
    }
}

#![warn(clippy::all)]

//! Nozzle Viewer - A web-based particle visualization of nozzle simulation timesteps.
//!
//! This application renders precomputed particle positions as a 3D point
//! cloud over the nozzle model, steps through the simulation's timesteps
//! with a play/pause slider, and shows a small force-directed taxonomy graph
//! alongside.

mod assets;
mod graph;
mod particles;
mod scene;
mod state;
mod ui;

use assets::AssetPaths;
use eframe::egui;
use particles::{DatasetLoadChannel, Timestep};
use scene::{ModelLoadChannel, ModelLoadResult};
use state::{url_state, AppState, ViewerSettings};
use std::time::Duration;

/// Minimum time between writes of the displayed step to the URL.
const URL_PUSH_INTERVAL: Duration = Duration::from_secs(1);

/// Repaint cadence while the graph layout is moving.
const GRAPH_FRAME_INTERVAL: Duration = Duration::from_millis(16);

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Nozzle Viewer",
        native_options,
        Box::new(|cc| Ok(Box::new(ViewerApp::new(cc)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("app_canvas")
            .expect("Failed to find app_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("app_canvas was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(ViewerApp::new(cc)))),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Main application state and logic.
pub struct ViewerApp {
    /// Application state containing all sub-states
    state: AppState,

    /// Channel for on-demand particle dataset loads
    load_channel: DatasetLoadChannel,

    /// Channel for the startup model load
    model_channel: ModelLoadChannel,

    /// Where datasets and the model are served from
    asset_paths: AssetPaths,

    /// Origin of the app clock handed to timers and the graph
    started_at: web_time::Instant,

    /// `play` from the page URL, carried into later URL writes
    url_play: Option<bool>,

    /// Step last written to the URL, and when
    pushed_step: Option<Timestep>,
    last_url_push: Option<Duration>,
}

impl ViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings = ViewerSettings::load();
        let params = url_state::parse_from_url();
        let autoplay = params.play.unwrap_or(settings.autoplay);
        let asset_paths = settings.asset_paths();

        let mut state = AppState::new(settings);

        // Startup dataset: the URL's step if given, else the first one
        let initial = params.step.unwrap_or_else(|| state.playback.slider_value());
        state.playback.seek(initial);
        if autoplay {
            state.playback.play(Duration::ZERO);
        }
        log::info!(
            "Starting at {:.2} ({})",
            state.playback.slider_value(),
            if autoplay { "playing" } else { "paused" }
        );

        let mut model_channel = ModelLoadChannel::new();
        model_channel.load(cc.egui_ctx.clone(), &asset_paths);

        Self {
            state,
            load_channel: DatasetLoadChannel::new(),
            model_channel,
            asset_paths,
            started_at: web_time::Instant::now(),
            url_play: params.play,
            pushed_step: None,
            last_url_push: None,
        }
    }

    /// Issues the coalesced dataset load queued by playback, if any.
    fn process_load_requests(&mut self, ctx: &egui::Context) {
        let Some(step) = self.state.playback.take_load_request() else {
            return;
        };

        let issued = self.load_channel.load(
            ctx.clone(),
            &self.asset_paths,
            self.state.playback.timeline(),
            step,
        );
        if issued && !self.state.revealed {
            self.state.status_message = format!("Loading particles {}...", step);
        }
    }

    fn process_dataset_results(&mut self, now: Duration) {
        if let Some(result) = self.load_channel.try_recv() {
            self.state.apply_dataset_result(result, now);
        }
    }

    fn process_model_results(&mut self) {
        match self.model_channel.try_recv() {
            Some(ModelLoadResult::Success(model)) => {
                self.state.viewport.set_model(model);
            }
            Some(ModelLoadResult::Error(msg)) => {
                self.state.status_message = format!("Failed to load model: {}", msg);
            }
            None => {}
        }
    }

    fn process_render_burst(&mut self, now: Duration) {
        if let Some(pass) = self.state.render_burst.poll(now) {
            if pass.reveal && !self.state.revealed {
                log::info!("Startup dataset on screen after {:.1}s", now.as_secs_f64());
                self.state.revealed = true;
            }
            log::trace!("Render burst pass {}", pass.pass);
            self.state.viewport.render();
        }
    }

    /// Mirrors the displayed step into the URL, at most once per interval.
    fn sync_url(&mut self, now: Duration) {
        let current = self.state.playback.current_step();
        if current.is_none() || current == self.pushed_step {
            return;
        }
        if let Some(last) = self.last_url_push {
            if now.saturating_sub(last) < URL_PUSH_INTERVAL {
                return;
            }
        }

        if let Some(step) = current {
            url_state::push_to_url(&step.label(), self.url_play);
        }
        self.pushed_step = current;
        self.last_url_push = Some(now);
    }

    fn schedule_repaint(&mut self, ctx: &egui::Context, now: Duration) {
        if self.state.viewport.take_render_request() {
            ctx.request_repaint();
        }

        if self.state.graph.is_active(now) {
            ctx.request_repaint_after(GRAPH_FRAME_INTERVAL);
        }

        let url_deadline = match (self.state.playback.current_step(), self.last_url_push) {
            (step, Some(last)) if step != self.pushed_step => Some(last + URL_PUSH_INTERVAL),
            _ => None,
        };

        let next_deadline = [
            self.state.playback.next_deadline(),
            self.state.render_burst.next_deadline(),
            url_deadline,
        ]
        .into_iter()
        .flatten()
        .min();

        if let Some(due) = next_deadline {
            ctx.request_repaint_after(due.saturating_sub(now));
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = self.started_at.elapsed();
        self.state.frame_time = now;

        // Window blur/focus edges drive auto-pause
        let focused = ctx.input(|i| i.focused);
        self.state
            .focus
            .observe(focused, &mut self.state.playback, now);

        if !ctx.wants_keyboard_input() && ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.state.user_toggle_playback();
        }

        self.state.playback.tick(now);
        self.process_load_requests(ctx);
        self.process_dataset_results(now);
        self.process_model_results();
        self.process_render_burst(now);
        self.state.graph.advance(now);
        self.state.loading_step = self.load_channel.pending_step();

        // Render UI panels
        ui::render_top_bar(ctx, &mut self.state);
        ui::render_bottom_panel(ctx, &mut self.state);
        ui::render_graph_panel(ctx, &mut self.state);
        ui::render_canvas(ctx, &mut self.state);

        // Loads queued by the slider or play button this frame
        self.process_load_requests(ctx);
        self.state.loading_step = self.load_channel.pending_step();
        self.sync_url(now);

        self.schedule_repaint(ctx, now);
    }
}

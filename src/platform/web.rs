//! Browser host: mount/unmount, input listeners, animation-frame loop and
//! DOM overlay updates.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlCanvasElement, KeyboardEvent};

use super::MountGeneration;
use crate::game::Game;
use crate::hud::HudView;
use crate::persistence::LocalStorageStore;
use crate::renderer::{RenderError, RenderState};
use crate::settings::Settings;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Game plus the browser-side resources it draws into
struct WebGame {
    game: Game<LocalStorageStore>,
    render_state: RenderState,
    document: Document,
    /// Last overlay written to the DOM
    shown_hud: Option<HudView>,
    shown_fps: Option<u32>,
}

impl WebGame {
    fn frame(&mut self, time: f64) {
        self.game.frame(time);

        let vertices = self.game.scene(time);
        match self.render_state.render(&vertices) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = self.render_state.size;
                self.render_state.resize(w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }

        self.update_hud();
    }

    /// Touch the DOM only when the overlay actually changes
    fn update_hud(&mut self) {
        let view = self.game.hud();
        if self.shown_hud != Some(view) {
            apply_hud(&self.document, view);
            self.shown_hud = Some(view);
        }

        let fps = self.game.settings().show_fps.then(|| self.game.fps());
        if self.shown_fps != fps {
            if let Some(el) = self.document.get_element_by_id("hud-fps") {
                set_visible(&el, fps.is_some());
                if let Some(fps) = fps {
                    el.set_text_content(Some(&format!("{} FPS", fps)));
                }
            }
            self.shown_fps = fps;
        }
    }

    fn toggle_fps(&mut self) {
        let settings = Settings {
            show_fps: !self.game.settings().show_fps,
            ..self.game.settings().clone()
        };
        self.game.update_settings(settings);
    }
}

fn set_visible(el: &Element, visible: bool) {
    let _ = el.class_list().toggle_with_force("hidden", !visible);
}

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

fn apply_hud(document: &Document, view: HudView) {
    let show = |id: &str, visible: bool| {
        if let Some(el) = document.get_element_by_id(id) {
            set_visible(&el, visible);
        }
    };
    show("idle-screen", matches!(view, HudView::Idle { .. }));
    show("score-overlay", matches!(view, HudView::Playing { .. }));
    show("gameover-screen", matches!(view, HudView::GameOver { .. }));

    match view {
        HudView::Idle { best } => {
            show("idle-best", best.is_some());
            if let Some(best) = best {
                set_text(document, "idle-best", &format!("Best: {}", best));
            }
        }
        HudView::Playing { score } => {
            set_text(document, "live-score", &score.to_string());
        }
        HudView::GameOver { score, best } => {
            set_text(document, "final-score", &score.to_string());
            set_text(document, "final-best", &best.to_string());
        }
    }
}

/// Self-rescheduling `requestAnimationFrame` loop
struct FrameLoop {
    callback: FrameCallback,
    handle: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    fn start(game: Rc<RefCell<WebGame>>) -> Self {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));

        let f = callback.clone();
        let h = handle.clone();
        *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
            h.set(None);
            game.borrow_mut().frame(time);
            h.set(schedule(&f));
        }));
        handle.set(schedule(&callback));

        Self { callback, handle }
    }
}

fn schedule(callback: &FrameCallback) -> Option<i32> {
    let window = web_sys::window()?;
    let callback = callback.borrow();
    let closure = callback.as_ref()?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(id) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        // Break the closure's reference to itself
        self.callback.borrow_mut().take();
    }
}

/// Event listener that detaches itself when dropped
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Everything alive while the game is mounted
struct Mounted {
    // Listeners go first so no input lands after the loop stops
    _listeners: Vec<Listener>,
    _frame_loop: FrameLoop,
}

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
    static GENERATION: MountGeneration = const { MountGeneration::new() };
}

fn setup_input_handlers(
    window: &web_sys::Window,
    document: &Document,
    canvas: &HtmlCanvasElement,
    game: &Rc<RefCell<WebGame>>,
) -> Result<Vec<Listener>, JsValue> {
    let mut listeners = Vec::new();

    // Keyboard
    {
        let game = game.clone();
        listeners.push(Listener::attach(window, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            match event.code().as_str() {
                "Space" | "ArrowUp" => {
                    event.prevent_default();
                    game.borrow_mut().game.activate();
                }
                "KeyF" => game.borrow_mut().toggle_fps(),
                _ => {}
            }
        })?);
    }

    // Pointer on the canvas
    {
        let game = game.clone();
        listeners.push(Listener::attach(canvas, "click", move |_event| {
            game.borrow_mut().game.activate();
        })?);
    }

    // Overlay buttons
    for id in ["play-btn", "restart-btn"] {
        if let Some(button) = document.get_element_by_id(id) {
            let game = game.clone();
            listeners.push(Listener::attach(&button, "click", move |event| {
                event.stop_propagation();
                game.borrow_mut().game.activate();
            })?);
        }
    }

    Ok(listeners)
}

async fn init_renderer(
    canvas: &HtmlCanvasElement,
    width: u32,
    height: u32,
) -> Result<RenderState, RenderError> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
        ..Default::default()
    });

    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await?;

    log::info!("Using adapter: {:?}", adapter.get_info().name);

    RenderState::new(surface, &adapter, width, height).await
}

/// Mount the game into the canvas with id `canvas_id`.
///
/// Mounting again replaces the running instance.
#[wasm_bindgen]
pub async fn mount(canvas_id: String) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // Already set on a second mount
    let _ = console_log::init_with_level(log::Level::Info);

    unmount();
    let ticket = GENERATION.with(|g| g.ticket());
    log::info!("Flap Gap starting...");

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(&canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element #{}", canvas_id)))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("#{} is not a canvas", canvas_id)))?;

    // Backing store follows CSS size and pixel ratio
    let dpr = window.device_pixel_ratio();
    let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
    let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
    canvas.set_width(width);
    canvas.set_height(height);

    let render_state = init_renderer(&canvas, width, height)
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    // Nothing is installed if the page unmounted while the GPU was coming up
    if !GENERATION.with(|g| g.is_current(ticket)) {
        log::info!("Mount cancelled before start");
        return Ok(());
    }

    let store = LocalStorageStore::new();
    let settings = Settings::load(&store);
    let seed = js_sys::Date::now() as u64;
    log::info!("Game initialized with seed: {}", seed);

    let game = Rc::new(RefCell::new(WebGame {
        game: Game::new(seed, store, settings),
        render_state,
        document: document.clone(),
        shown_hud: None,
        shown_fps: None,
    }));

    let listeners = setup_input_handlers(&window, &document, &canvas, &game)?;
    let frame_loop = FrameLoop::start(game);

    MOUNTED.with(|m| {
        *m.borrow_mut() = Some(Mounted {
            _listeners: listeners,
            _frame_loop: frame_loop,
        })
    });

    log::info!("Flap Gap running!");
    Ok(())
}

/// Stop the frame loop and detach every listener
#[wasm_bindgen]
pub fn unmount() {
    GENERATION.with(|g| g.invalidate());
    let mounted = MOUNTED.with(|m| m.borrow_mut().take());
    if mounted.is_some() {
        drop(mounted);
        log::info!("Flap Gap unmounted");
    }
}

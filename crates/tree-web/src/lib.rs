#![cfg(target_arch = "wasm32")]
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::{OrbitCamera, SceneConfig, TreeSession};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod controls;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;
mod timer;

use constants::{CANVAS_ID, TOGGLE_AUTO_ID, TOGGLE_MODE_ID};
use controls::Controls;

/// Everything that must be cancelled when the page goes away.
struct Mount {
    _frame_loop: frame::FrameLoop,
    controls: Rc<Controls>,
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.controls.shutdown();
        log::info!("[mount] scene torn down");
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tree-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn scene_config(query: &str) -> SceneConfig {
    let mut config = SceneConfig::default();
    let applied = config.apply_query(query);
    if applied > 0 {
        log::info!("[config] {} query override(s) applied", applied);
    }
    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            log::error!("[config] {}; using defaults", e);
            SceneConfig {
                seed: config.seed,
                ..SceneConfig::default()
            }
        }
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", CANVAS_ID, e))?;

    // Keep the backing store at CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);
    events::wire_resize(canvas.clone());

    let config = scene_config(&dom::query_string());
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let session = TreeSession::new(config, &mut rng)?;

    let gpu = frame::init_gpu(&canvas, &session).await;
    let session = Rc::new(RefCell::new(session));
    let camera = Rc::new(RefCell::new(OrbitCamera::default()));
    let drag = Rc::new(RefCell::new(input::DragState::default()));

    let controls = Controls::new(session.clone(), document.clone());
    {
        let c = controls.clone();
        dom::add_click_listener(&document, TOGGLE_MODE_ID, move || c.toggle_mode());
    }
    {
        let c = controls.clone();
        dom::add_click_listener(&document, TOGGLE_AUTO_ID, move || c.toggle_auto_shift());
    }
    events::wire_global_keydown(controls.clone(), camera.clone(), document.clone());
    events::wire_pointer_handlers(events::PointerWiring {
        canvas: canvas.clone(),
        camera: camera.clone(),
        drag: drag.clone(),
    });

    let now = Instant::now();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        camera,
        drag,
        canvas,
        gpu,
        start_instant: now,
        last_instant: now,
        warned_no_gpu: false,
    }));
    let mount = Rc::new(RefCell::new(Some(Mount {
        _frame_loop: frame::start_loop(frame_ctx),
        controls,
    })));

    {
        let mount = mount.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PageTransitionEvent| {
            match input::page_hide_kind(ev.persisted()) {
                input::PageHide::Frozen => log::info!("[mount] page cached; keeping scene"),
                input::PageHide::Unloading => {
                    mount.borrow_mut().take();
                }
            }
        }) as Box<dyn FnMut(_)>);
        window
            .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }
    Ok(())
}

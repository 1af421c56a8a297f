use crate::constants::MAX_FRAME_DT_SEC;
use crate::input;
use crate::render;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tree_core::{OrbitCamera, TreeSession};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub session: Rc<RefCell<TreeSession>>,
    pub camera: Rc<RefCell<OrbitCamera>>,
    pub drag: Rc<RefCell<input::DragState>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState>,
    pub start_instant: Instant,
    pub last_instant: Instant,
    pub warned_no_gpu: bool,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;
        let time_sec = (now - self.start_instant).as_secs_f32();

        // Advance progress and rebuild display buffers even when we cannot draw,
        // so the morph stays in step if the GPU comes back.
        self.session.borrow_mut().frame(dt_sec, time_sec);

        let interacting = self.drag.borrow().active;
        let mut camera = self.camera.borrow_mut();
        camera.update(dt_sec, interacting);

        let Some(gpu) = self.gpu.as_mut() else {
            if !self.warned_no_gpu {
                log::warn!("[frame] no GPU state; skipping draw");
                self.warned_no_gpu = true;
            }
            return;
        };

        let w = self.canvas.width();
        let h = self.canvas.height();
        gpu.resize_if_needed(w, h);
        camera.set_viewport(w, h);

        let session = self.session.borrow();
        match gpu.render(&session, &camera, time_sec) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                log::warn!("[frame] surface lost; reconfiguring");
                gpu.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    session: &TreeSession,
) -> Option<render::GpuState> {
    match render::GpuState::new(canvas.clone(), session).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Owns the `requestAnimationFrame` chain; dropping it stops the loop.
pub struct FrameLoop {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: Rc<Cell<Option<i32>>>,
    stopped: Rc<Cell<bool>>,
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) -> Option<i32> {
    let window = web::window()?;
    let slot = tick.borrow();
    let cb = slot.as_ref()?;
    window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .ok()
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let pending = Rc::new(Cell::new(None));
    let stopped = Rc::new(Cell::new(false));

    let tick_clone = tick.clone();
    let pending_tick = pending.clone();
    let stopped_tick = stopped.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_tick.set(None);
        if stopped_tick.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        pending_tick.set(request_frame(&tick_clone));
    }) as Box<dyn FnMut()>));
    pending.set(request_frame(&tick));

    FrameLoop {
        tick,
        pending,
        stopped,
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stopped.set(true);
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            let _ = w.cancel_animation_frame(id);
        }
        // Break the closure's self-reference so the frame context is freed.
        self.tick.borrow_mut().take();
        log::info!("[frame] loop stopped");
    }
}

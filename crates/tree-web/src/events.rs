use crate::constants::DRAG_DEADZONE_PX;
use crate::controls::Controls;
use crate::dom;
use crate::input::{self, DragState, KeyAction};
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::OrbitCamera;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    controls: &Rc<Controls>,
    camera: &Rc<RefCell<OrbitCamera>>,
    document: &web::Document,
) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let key = ev.key();
    let Some(action) = input::key_action(&key) else {
        return;
    };
    match action {
        KeyAction::ToggleMode => {
            // Space would otherwise scroll or re-click a focused button.
            ev.prevent_default();
            controls.toggle_mode();
        }
        KeyAction::ToggleAutoShift => controls.toggle_auto_shift(),
        KeyAction::ToggleHint => match overlay::toggle_hint(document) {
            Some(visible) => log::debug!("[hint] visible={}", visible),
            None => log::warn!("[hint] no hint element"),
        },
        KeyAction::ResetCamera => camera.borrow_mut().reset(),
    }
}

pub fn wire_global_keydown(
    controls: Rc<Controls>,
    camera: Rc<RefCell<OrbitCamera>>,
    document: web::Document,
) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &controls, &camera, &document);
    }) as Box<dyn FnMut(_)>);
    let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub camera: Rc<RefCell<OrbitCamera>>,
    pub drag: Rc<RefCell<DragState>>,
}

/// Drag to orbit, wheel to zoom.
pub fn wire_pointer_handlers(w: PointerWiring) {
    // pointerdown
    {
        let drag = w.drag.clone();
        let canvas = w.canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if ev.button() != 0 {
                return;
            }
            let (x, y) = dom::pointer_canvas_px(&ev, &canvas);
            drag.borrow_mut().begin(x, y);
            let _ = canvas.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointermove
    {
        let drag = w.drag.clone();
        let camera = w.camera.clone();
        let canvas = w.canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let (x, y) = dom::pointer_canvas_px(&ev, &canvas);
            if let Some((dx, dy)) = drag.borrow_mut().move_to(x, y, DRAG_DEADZONE_PX) {
                camera.borrow_mut().orbit(dx, dy);
            }
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerup / pointercancel
    for name in ["pointerup", "pointercancel"] {
        let drag = w.drag.clone();
        let canvas = w.canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            drag.borrow_mut().end();
            let _ = canvas.release_pointer_capture(ev.pointer_id());
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // wheel
    {
        let camera = w.camera.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            ev.prevent_default();
            let delta = input::wheel_zoom_delta(ev.delta_y(), ev.delta_mode());
            if delta != 0.0 {
                camera.borrow_mut().zoom(delta);
            }
        }) as Box<dyn FnMut(_)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(false);
        let _ = w.canvas.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            closure.as_ref().unchecked_ref(),
            &opts,
        );
        closure.forget();
    }
}

pub fn wire_resize(canvas: web::HtmlCanvasElement) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas);
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

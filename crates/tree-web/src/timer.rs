use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A running `setInterval`; dropping it clears the interval.
///
/// The callback closure lives exactly as long as the guard, so a cleared
/// timer can never call into a torn-down scene.
pub struct AutoShiftTimer {
    window: web::Window,
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl AutoShiftTimer {
    pub fn start(interval_ms: i32, mut on_tick: impl FnMut() + 'static) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let callback = Closure::wrap(Box::new(move || on_tick()) as Box<dyn FnMut()>);
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                interval_ms,
            )
            .map_err(|e| anyhow::anyhow!("setInterval failed: {:?}", e))?;
        log::debug!("[timer] auto-shift every {} ms (handle {})", interval_ms, handle);
        Ok(Self {
            window,
            handle,
            _callback: callback,
        })
    }
}

impl Drop for AutoShiftTimer {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.handle);
        log::debug!("[timer] cleared handle {}", self.handle);
    }
}

use crate::constants::{TOGGLE_AUTO_ID, TOGGLE_MODE_ID};
use crate::dom;
use crate::input;
use crate::timer::AutoShiftTimer;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tree_core::TreeSession;
use web_sys as web;

/// User-facing mode controls and the auto-shift timer they own.
///
/// The timer exists only while auto-shift is enabled; turning auto-shift off
/// or shutting the scene down drops it, which clears the interval.
pub struct Controls {
    session: Rc<RefCell<TreeSession>>,
    document: web::Document,
    interval_ms: i32,
    timer: RefCell<Option<AutoShiftTimer>>,
    shut_down: Cell<bool>,
}

impl Controls {
    pub fn new(session: Rc<RefCell<TreeSession>>, document: web::Document) -> Rc<Self> {
        let interval_ms = session
            .borrow()
            .config()
            .auto_shift_interval
            .as_millis()
            .min(i32::MAX as u128) as i32;
        let controls = Rc::new(Self {
            session,
            document,
            interval_ms,
            timer: RefCell::new(None),
            shut_down: Cell::new(false),
        });
        controls.sync_timer();
        controls.refresh_labels();
        controls
    }

    /// Manual flip; independent of auto-shift and of the interval phase.
    pub fn toggle_mode(&self) {
        if self.shut_down.get() {
            return;
        }
        let mode = self.session.borrow_mut().toggle_mode();
        log::info!("[controls] mode -> {}", mode);
        self.refresh_labels();
    }

    pub fn toggle_auto_shift(self: &Rc<Self>) {
        if self.shut_down.get() {
            return;
        }
        let enabled = self.session.borrow_mut().toggle_auto_shift();
        log::info!("[controls] auto-shift {}", if enabled { "on" } else { "off" });
        self.sync_timer();
        self.refresh_labels();
    }

    fn on_interval(&self) {
        if self.shut_down.get() {
            return;
        }
        if self.session.borrow_mut().on_interval_tick() {
            self.refresh_labels();
        }
    }

    /// Start or stop the interval to match the session's auto-shift flag.
    fn sync_timer(self: &Rc<Self>) {
        let wanted = !self.shut_down.get() && self.session.borrow().auto_shift();
        let mut slot = self.timer.borrow_mut();
        match (wanted, slot.is_some()) {
            (true, false) => {
                let weak: Weak<Self> = Rc::downgrade(self);
                let started = AutoShiftTimer::start(self.interval_ms, move || {
                    if let Some(c) = weak.upgrade() {
                        c.on_interval();
                    }
                });
                match started {
                    Ok(t) => *slot = Some(t),
                    Err(e) => log::error!("[controls] auto-shift timer: {:?}", e),
                }
            }
            (false, true) => {
                slot.take();
            }
            _ => {}
        }
    }

    pub fn refresh_labels(&self) {
        let session = self.session.borrow();
        let mode = session.mode();
        dom::set_control_state(
            &self.document,
            TOGGLE_MODE_ID,
            &format!("Mode: {}", mode.label()),
            mode.label(),
        );
        let auto = session.auto_shift();
        dom::set_control_state(
            &self.document,
            TOGGLE_AUTO_ID,
            input::auto_shift_label(auto),
            if auto { "on" } else { "off" },
        );
    }

    /// Scene teardown: cancel the timer and ignore any late input.
    pub fn shutdown(&self) {
        self.shut_down.set(true);
        if self.timer.borrow_mut().take().is_some() {
            log::info!("[controls] auto-shift timer cancelled");
        }
    }
}

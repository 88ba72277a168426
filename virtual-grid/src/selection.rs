/// An adapter-driven one-shot timer.
///
/// The grid never reads a clock. Hosts pass `now_ms` on the events that start it and call
/// [`DebounceTimer::tick`] from their timer/frame loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceTimer {
    interval_ms: u64,
    started_at: Option<u64>,
}

impl DebounceTimer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            started_at: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn set_interval_ms(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
    }

    pub fn start(&mut self, now_ms: u64) {
        self.started_at = Some(now_ms);
    }

    pub fn stop(&mut self) {
        self.started_at = None;
    }

    pub fn restart(&mut self, now_ms: u64) {
        self.stop();
        self.start(now_ms);
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Stops the timer once the interval has elapsed. Returns `true` on that tick.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(started_at) = self.started_at else {
            return false;
        };
        if now_ms.saturating_sub(started_at) >= self.interval_ms {
            self.started_at = None;
            return true;
        }
        false
    }
}

/// What a pointer move should turn into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerIntent {
    None,
    /// A leftward swipe past the threshold: start dragging the selection.
    BeginDrag,
}

/// Decides when row selection is allowed and when a gesture becomes a drag.
///
/// A multi-selection arms a debounce timer. While it runs, clicks do not reach the host so
/// the selection survives long enough to be dragged away with a leftward swipe.
#[derive(Clone, Debug)]
pub struct SelectionCoordinator {
    timer: DebounceTimer,
    allow_select: bool,
    drag_threshold: i32,
    mouse_down_x: i32,
    mouse_delta_x: i32,
}

impl SelectionCoordinator {
    pub fn new(debounce_ms: u64, drag_threshold: i32) -> Self {
        Self {
            timer: DebounceTimer::new(debounce_ms),
            allow_select: true,
            drag_threshold,
            mouse_down_x: 0,
            mouse_delta_x: 0,
        }
    }

    pub fn timer(&self) -> &DebounceTimer {
        &self.timer
    }

    pub fn is_multi_select_armed(&self) -> bool {
        self.timer.is_running()
    }

    pub fn allow_select(&self) -> bool {
        self.allow_select
    }

    pub fn set_allow_select(&mut self, allow: bool) {
        self.allow_select = allow;
    }

    pub fn mouse_delta_x(&self) -> i32 {
        self.mouse_delta_x
    }

    pub fn on_selection_changed(&mut self, selected: usize, now_ms: u64) {
        self.timer.stop();
        if selected > 1 {
            self.timer.start(now_ms);
        }
    }

    /// Re-arms the timer after a multi-row drag so the rows can be dragged again.
    pub fn rearm(&mut self, now_ms: u64) {
        self.timer.restart(now_ms);
    }

    pub fn stop_timer(&mut self) {
        self.timer.stop();
    }

    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.timer.tick(now_ms)
    }

    /// Returns `true` if the host should process the press as a normal click.
    pub fn mouse_down(&mut self, x: i32) -> bool {
        self.mouse_down_x = x;
        self.mouse_delta_x = 0;
        !self.timer.is_running()
    }

    pub fn mouse_move(&mut self, x: i32, left_button: bool) -> PointerIntent {
        if !left_button {
            return PointerIntent::None;
        }
        self.mouse_delta_x = x.saturating_sub(self.mouse_down_x);
        if self.mouse_delta_x < -self.drag_threshold {
            PointerIntent::BeginDrag
        } else {
            PointerIntent::None
        }
    }

    pub fn reset_gesture(&mut self) {
        self.mouse_delta_x = 0;
    }

    /// Filters a host request to change a row's selected state.
    pub fn filter_select(&self, selected: bool, dragging: bool) -> bool {
        selected && self.mouse_delta_x >= 0 && !dragging && self.allow_select
    }
}

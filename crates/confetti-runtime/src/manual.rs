//! Explicitly driven frame scheduler

use crate::scheduler::{FrameCallback, FrameHandle, FrameScheduler};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// A `FrameScheduler` whose display ticks are issued by calling [`ManualScheduler::tick`].
///
/// Each tick runs the callbacks that were pending when the tick began, in
/// request order. Callbacks requested during a tick wait for the next one.
pub struct ManualScheduler {
    queue: RefCell<Vec<(FrameHandle, FrameCallback)>>,
    /// Callbacks due in the tick currently being dispatched
    running: RefCell<VecDeque<(FrameHandle, FrameCallback)>>,
    next_id: Cell<u64>,
    viewport_height: Cell<f64>,
    frame_count: Cell<u64>,
}

impl ManualScheduler {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            queue: RefCell::new(Vec::new()),
            running: RefCell::new(VecDeque::new()),
            next_id: Cell::new(1),
            viewport_height: Cell::new(viewport_height),
            frame_count: Cell::new(0),
        }
    }

    /// Issue one display tick. Returns the number of callbacks that ran.
    pub fn tick(&self) -> usize {
        let due = std::mem::take(&mut *self.queue.borrow_mut());
        self.running.borrow_mut().extend(due);
        self.frame_count.set(self.frame_count.get() + 1);

        let mut ran = 0;
        loop {
            // Release the borrow before invoking: callbacks re-enter the scheduler.
            let next = self.running.borrow_mut().pop_front();
            let Some((handle, callback)) = next else {
                break;
            };
            log::trace!("frame {} dispatching {:?}", self.frame_count.get(), handle);
            callback();
            ran += 1;
        }
        ran
    }

    /// Tick until nothing is pending or `max_ticks` ticks have been issued.
    /// Returns the number of ticks issued.
    pub fn run_until_idle(&self, max_ticks: u64) -> u64 {
        let mut ticks = 0;
        while self.pending() > 0 && ticks < max_ticks {
            self.tick();
            ticks += 1;
        }
        ticks
    }

    /// Number of callbacks waiting for the next tick
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Number of ticks issued so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count.get()
    }

    pub fn set_viewport_height(&self, height: f64) {
        self.viewport_height.set(height);
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new(800.0)
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.next_id.get());
        self.next_id.set(handle.0 + 1);
        self.queue.borrow_mut().push((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.queue.borrow_mut().retain(|(h, _)| *h != handle);
        self.running.borrow_mut().retain(|(h, _)| *h != handle);
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height.get()
    }
}

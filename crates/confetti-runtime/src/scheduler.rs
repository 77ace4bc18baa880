//! Display-tick provider trait

use std::fmt;

/// Callback run once on the next display tick
pub type FrameCallback = Box<dyn FnOnce() + 'static>;

/// Identifies one scheduled frame callback so it can be cancelled
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct FrameHandle(pub u64);

impl fmt::Debug for FrameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameHandle({})", self.0)
    }
}

/// A host that runs callbacks synchronized to display refresh.
///
/// Methods take `&self`: a frame callback usually schedules its successor
/// while the scheduler is dispatching it, so implementations keep their
/// queues behind interior mutability and must never hold a borrow across
/// a callback invocation.
pub trait FrameScheduler {
    /// Schedule `callback` to run before the next repaint
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Drop a scheduled callback. Unknown or already-run handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);

    /// Current viewport height in pixels
    fn viewport_height(&self) -> f64;
}

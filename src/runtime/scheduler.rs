/// Opaque token for a requested frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Per-frame callback scheduler with request/cancel semantics.
///
/// `request_frame` asks for one callback at the next display refresh; `cancel_frame` revokes a
/// previously requested callback so it never fires.
pub trait FrameScheduler {
    /// Schedule a callback for the next refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Revoke a scheduled callback.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler driven by hand, one frame at a time.
///
/// Holds at most one due handle. Drivers and tests call [`ManualScheduler::next_due`] to take
/// the pending callback and deliver it to the animation.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    due: Option<FrameHandle>,
    requested: u64,
    cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    /// Idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the due callback, if any.
    pub fn next_due(&mut self) -> Option<FrameHandle> {
        self.due.take()
    }

    /// Whether a callback is waiting.
    pub fn has_due(&self) -> bool {
        self.due.is_some()
    }

    /// Total `request_frame` calls.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Handles passed to `cancel_frame`, in call order.
    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.requested += 1;
        self.due = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.due == Some(handle) {
            self.due = None;
        }
        self.cancelled.push(handle);
    }
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for &mut S {
    fn request_frame(&mut self) -> FrameHandle {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        (**self).cancel_frame(handle)
    }
}

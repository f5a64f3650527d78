//! Frame scheduling
//!
//! The host asks for "one more frame" after each frame it draws and cancels the
//! outstanding request on teardown. In the browser that maps onto
//! `requestAnimationFrame`; tests use [`ManualScheduler`] and fire frames by hand.

/// Opaque id of a scheduled frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Something that can run the host's frame callback later.
///
/// The callback is always [`SceneHost::on_animation_frame`](crate::SceneHost::on_animation_frame),
/// so it is bound once when the scheduler is built (see
/// `platform::web::WebScheduler::set_callback`) instead of being passed on every
/// request. [`ManualScheduler`] has no callback at all: the caller fires the
/// pending request and invokes the host itself.
pub trait Scheduler {
    /// Request one future run of the host's frame callback
    fn schedule_next(&mut self) -> FrameHandle;
    /// Drop a pending request; unknown or already-fired handles are ignored
    fn cancel(&mut self, handle: FrameHandle);
}

/// Scheduler driven by the caller, one frame at a time
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    pending: Option<FrameHandle>,
    /// Every handle ever passed to `cancel`
    pub cancelled: Vec<FrameHandle>,
    /// Total `schedule_next` calls
    pub scheduled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The request waiting to fire, if any
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Consume the pending request, as the frame clock would when it fires
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_next(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        self.scheduled += 1;
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.cancelled.push(handle);
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_fire_cycle() {
        let mut scheduler = ManualScheduler::new();
        assert_eq!(scheduler.fire(), None);

        let first = scheduler.schedule_next();
        assert_eq!(scheduler.pending(), Some(first));
        assert_eq!(scheduler.fire(), Some(first));
        assert_eq!(scheduler.pending(), None);

        let second = scheduler.schedule_next();
        assert_ne!(first, second);
    }

    #[test]
    fn test_cancel_clears_pending() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule_next();
        scheduler.cancel(handle);
        assert_eq!(scheduler.pending(), None);
        assert_eq!(scheduler.cancelled, vec![handle]);

        // A stale handle does not disturb a newer request
        let newer = scheduler.schedule_next();
        scheduler.cancel(handle);
        assert_eq!(scheduler.pending(), Some(newer));
    }
}

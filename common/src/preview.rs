//! Holder of the single live preview.
//!
//! Every regeneration opens a new generation and receives a token. Results are
//! published only for the most recently opened generation, whatever order they
//! complete in. The slot owns at most one displayable handle; replacing it or
//! dropping the slot releases the previous one exactly once.

use log::debug;

/// A displayable reference backed by a resource that must be given back
/// (a Blob object URL in the browser).
pub trait Release {
    fn release(self);
}

/// Identifies one preview generation. Ordered by initiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenerationToken(u64);

impl GenerationToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// The latest generation is being rendered.
    Rendering,
    /// The latest generation is displayed.
    Ready,
    /// The latest generation failed; the previous preview, if any, stays displayed.
    Failed(String),
}

/// What `PreviewSlot::publish` did with a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Publish {
    /// The handle is now the current preview.
    Published,
    /// A newer generation was opened meanwhile; the handle was released.
    Stale,
}

pub struct PreviewSlot<H: Release> {
    latest: u64,
    current: Option<H>,
    status: PreviewStatus,
}

impl<H: Release> Default for PreviewSlot<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Release> PreviewSlot<H> {
    pub fn new() -> Self {
        Self {
            latest: 0,
            current: None,
            status: PreviewStatus::Idle,
        }
    }

    /// Opens a new generation; any earlier token becomes stale.
    pub fn begin(&mut self) -> GenerationToken {
        self.latest += 1;
        self.status = PreviewStatus::Rendering;
        GenerationToken(self.latest)
    }

    /// Closes the open generation without a result. Late results for it become
    /// stale; whatever is displayed stays.
    pub fn cancel(&mut self) {
        if self.status != PreviewStatus::Rendering {
            return;
        }
        self.latest += 1;
        self.status = if self.current.is_some() {
            PreviewStatus::Ready
        } else {
            PreviewStatus::Idle
        };
    }

    pub fn is_current(&self, token: GenerationToken) -> bool {
        token.0 == self.latest
    }

    /// Makes `handle` the current preview if `token` is still the latest generation.
    pub fn publish(&mut self, token: GenerationToken, handle: H) -> Publish {
        if !self.is_current(token) {
            debug!(
                "discarding preview {} (latest is {})",
                token.0, self.latest
            );
            handle.release();
            return Publish::Stale;
        }
        if let Some(previous) = self.current.replace(handle) {
            previous.release();
        }
        self.status = PreviewStatus::Ready;
        Publish::Published
    }

    /// Records a failed generation. Returns `false` if the token was stale and ignored.
    pub fn fail(&mut self, token: GenerationToken, message: impl Into<String>) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.status = PreviewStatus::Failed(message.into());
        true
    }

    pub fn current(&self) -> Option<&H> {
        self.current.as_ref()
    }

    pub fn status(&self) -> &PreviewStatus {
        &self.status
    }
}

impl<H: Release> Drop for PreviewSlot<H> {
    fn drop(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.release();
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::tracker;
    use super::*;

    #[test]
    fn later_generation_wins_regardless_of_completion_order() {
        let (released, handle) = tracker();
        let mut slot = PreviewSlot::new();

        let a = slot.begin();
        let b = slot.begin();
        assert_eq!(slot.publish(b, handle("b")), Publish::Published);
        assert_eq!(slot.publish(a, handle("a")), Publish::Stale);

        assert_eq!(slot.current().map(|h| h.id), Some("b"));
        assert_eq!(*released.borrow(), vec!["a"]);
        assert_eq!(slot.status(), &PreviewStatus::Ready);
    }

    #[test]
    fn each_replacement_releases_previous_exactly_once() {
        let (released, handle) = tracker();
        let mut slot = PreviewSlot::new();

        for id in ["first", "second", "third"] {
            let token = slot.begin();
            slot.publish(token, handle(id));
        }
        assert_eq!(*released.borrow(), vec!["first", "second"]);

        drop(slot);
        assert_eq!(*released.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn failure_keeps_previous_preview() {
        let (released, handle) = tracker();
        let mut slot = PreviewSlot::new();

        let first = slot.begin();
        slot.publish(first, handle("first"));
        let second = slot.begin();
        assert!(slot.fail(second, "out of memory"));

        assert_eq!(slot.current().map(|h| h.id), Some("first"));
        assert_eq!(
            slot.status(),
            &PreviewStatus::Failed("out of memory".to_string())
        );
        assert!(released.borrow().is_empty());
    }

    #[test]
    fn stale_failure_is_ignored() {
        let mut slot: PreviewSlot<super::testing::TrackedHandle> = PreviewSlot::new();
        let a = slot.begin();
        let _b = slot.begin();
        assert!(!slot.fail(a, "late"));
        assert_eq!(slot.status(), &PreviewStatus::Rendering);
    }

    #[test]
    fn cancelled_generation_cannot_publish() {
        let (released, handle) = tracker();
        let mut slot = PreviewSlot::new();

        let shown = slot.begin();
        slot.publish(shown, handle("shown"));
        let late = slot.begin();
        slot.cancel();
        assert_eq!(slot.status(), &PreviewStatus::Ready);

        assert_eq!(slot.publish(late, handle("late")), Publish::Stale);
        assert_eq!(slot.current().map(|h| h.id), Some("shown"));
        assert_eq!(*released.borrow(), vec!["late"]);
    }

    #[test]
    fn cancel_without_preview_returns_to_idle() {
        let mut slot: PreviewSlot<super::testing::TrackedHandle> = PreviewSlot::new();
        let token = slot.begin();
        slot.cancel();
        assert_eq!(slot.status(), &PreviewStatus::Idle);
        assert!(!slot.fail(token, "late"));
        assert_eq!(slot.status(), &PreviewStatus::Idle);
    }
}

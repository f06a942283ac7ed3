use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeferredHandle(pub u64);

/// One-shot deferred actions. The host calls `App::on_deferred` with the
/// handle when the delay elapses; a cancelled handle must never fire.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration) -> DeferredHandle;

    fn cancel(&mut self, handle: DeferredHandle);
}

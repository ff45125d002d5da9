//! Serial execution context port

/// Unit of work posted to a [`SerialExecutor`]
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// A single serial execution context.
///
/// Jobs run one at a time, in submission order, never concurrently with
/// each other.
pub trait SerialExecutor: Send + Sync {
    /// Queue `job` behind everything already submitted. Never blocks.
    fn dispatch(&self, job: Job);

    /// Block until every job submitted before this call has finished.
    /// Returns immediately when called from the context itself.
    fn flush(&self);

    /// True when the calling thread is this context
    fn is_current(&self) -> bool;
}

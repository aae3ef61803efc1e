//! Thread pools for running remote calls off the caller's thread

mod naive;
mod rayon;
mod shared_queue;

pub use self::naive::NaiveThreadPool;
pub use self::rayon::RayonThreadPool;
pub use self::shared_queue::SharedQueueThreadPool;
use crate::Result;

/// Runs jobs on background threads.
#[allow(clippy::module_name_repetitions)]
pub trait ThreadPool: Sized {
    /// Create a pool of `threads` threads.
    fn new(threads: u32) -> Result<Self>;

    /// Run `job` on the pool. A panicking job must not take the pool down with it.
    ///
    /// An error means the job was dropped without running.
    fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static;
}

/// Errors which can be thrown by a thread pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, failure::Fail)]
#[allow(missing_docs)]
pub enum Error {
    #[fail(display = "Thread pool needs at least one thread")]
    NoThreads,

    #[fail(display = "Thread pool has no workers left")]
    Closed,
}

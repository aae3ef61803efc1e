use super::ThreadPool;
use crate::Result;
use std::thread;

/// Not really a pool, spawns a named thread for every job.
///
/// Suits a session with a handful of calls in flight; `threads` is ignored.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, Copy)]
pub struct NaiveThreadPool;

impl ThreadPool for NaiveThreadPool {
    fn new(_threads: u32) -> Result<Self> {
        Ok(NaiveThreadPool)
    }

    fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        thread::Builder::new()
            .name("kvs-view-call".to_owned())
            .spawn(job)?;
        Ok(())
    }
}

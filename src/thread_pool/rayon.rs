use super::{Error, ThreadPool};
use crate::Result;

/// Wraps a `rayon` thread pool.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct RayonThreadPool {
    pool: ::rayon::ThreadPool,
}

impl ThreadPool for RayonThreadPool {
    fn new(threads: u32) -> Result<Self> {
        if threads == 0 {
            return Err(Error::NoThreads.into());
        }
        let pool = ::rayon::ThreadPoolBuilder::new()
            .num_threads(threads as usize)
            .panic_handler(|_| {})
            .build()?;
        Ok(RayonThreadPool { pool })
    }

    fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.pool.spawn(job);
        Ok(())
    }
}

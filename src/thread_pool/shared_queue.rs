use super::{Error, ThreadPool};
use crate::Result;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::panic::{self, AssertUnwindSafe};
use std::thread;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A fixed set of worker threads pulling jobs from one shared queue.
///
/// Workers catch panicking jobs, so the pool keeps its size.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone)]
pub struct SharedQueueThreadPool {
    sender: Sender<Job>,
}

impl ThreadPool for SharedQueueThreadPool {
    fn new(threads: u32) -> Result<Self> {
        if threads == 0 {
            return Err(Error::NoThreads.into());
        }

        let (sender, receiver) = unbounded::<Job>();
        for i in 0..threads {
            let worker = Worker(receiver.clone());
            thread::Builder::new()
                .name(format!("kvs-view-worker-{}", i))
                .spawn(move || worker.run())?;
        }
        Ok(SharedQueueThreadPool { sender })
    }

    fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.sender
            .send(Box::new(job))
            .map_err(|_| Error::Closed.into())
    }
}

struct Worker(Receiver<Job>);

impl Worker {
    fn run(self) {
        while let Ok(job) = self.0.recv() {
            // A panicking job is discarded; the worker keeps serving the queue.
            drop(panic::catch_unwind(AssertUnwindSafe(job)));
        }
    }
}

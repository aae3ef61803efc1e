use super::{Controller, Intent, Report};
use crate::errors::{InvocationError, RemoteError};
use crate::network::{Request, Response, Transport};
use crate::thread_pool::ThreadPool;
use crate::Result;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::panic::{self, AssertUnwindSafe};
use std::result;

/// Identifies one submitted invocation. Tickets increase in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

/// The result of one invocation, once it has been applied.
#[derive(Debug)]
pub struct Settled {
    #[allow(missing_docs)]
    pub ticket: Ticket,
    #[allow(missing_docs)]
    pub result: result::Result<Report, InvocationError>,
}

#[derive(Debug)]
struct Completion {
    ticket: Ticket,
    request: Request,
    outcome: Result<Response>,
}

/// Runs remote calls on a thread pool without blocking the caller.
///
/// Any number of invocations may be outstanding at once. Their completions come back over a
/// channel and are applied by whichever of the `settle` methods the owner calls, one at a
/// time and in arrival order. Nothing is coalesced or cancelled, so a late completion is
/// still applied.
#[derive(Debug)]
pub struct Dispatcher<T: Transport, P: ThreadPool> {
    controller: Controller<T>,
    pool: P,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
    next_ticket: u64,
    outstanding: usize,
}

impl<T, P> Dispatcher<T, P>
where
    T: Transport,
    P: ThreadPool,
{
    #[allow(missing_docs)]
    pub fn new(controller: Controller<T>, pool: P) -> Dispatcher<T, P> {
        let (sender, receiver) = unbounded();
        Dispatcher {
            controller,
            pool,
            sender,
            receiver,
            next_ticket: 0,
            outstanding: 0,
        }
    }

    /// Validate `intent` and start its remote call.
    ///
    /// Invalid input is rejected here and never reaches the pool. A call the pool refuses to
    /// run fails as a transport error and is never counted as outstanding.
    pub fn submit(&mut self, intent: Intent) -> result::Result<Ticket, InvocationError> {
        let request = self.controller.prepare(&intent)?;
        let ticket = Ticket(self.next_ticket);

        let transport = self.controller.transport().clone();
        let sender = self.sender.clone();
        let spawned = self.pool.spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| transport.send(&request)))
                .unwrap_or_else(|_| Err(failure::err_msg("Transport panicked")));

            // The dispatcher holds the receiver for as long as it can settle anything.
            let _ = sender.send(Completion {
                ticket,
                request,
                outcome,
            });
        });

        if let Err(e) = spawned {
            let log = self.controller.logger();
            warn!(log, "Remote call never started"; "op" => intent.op(), "error" => %e);
            return Err(RemoteError::Transport {
                cause: e.to_string(),
            }
            .into());
        }

        self.next_ticket += 1;
        self.outstanding += 1;
        Ok(ticket)
    }

    /// Number of submitted invocations that have not been settled yet.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Apply one finished invocation, if any has finished.
    pub fn try_settle(&mut self) -> Option<Settled> {
        match self.receiver.try_recv() {
            Ok(completion) => Some(self.apply(completion)),
            Err(_) => None,
        }
    }

    /// Wait for the next invocation to finish and apply it.
    ///
    /// Returns `None` straight away when nothing is outstanding.
    pub fn settle(&mut self) -> Option<Settled> {
        if self.outstanding == 0 {
            return None;
        }
        match self.receiver.recv() {
            Ok(completion) => Some(self.apply(completion)),
            Err(_) => None,
        }
    }

    /// Wait for every outstanding invocation, applying each as it finishes.
    pub fn settle_all(&mut self) -> Vec<Settled> {
        let mut settled = Vec::with_capacity(self.outstanding);
        while let Some(s) = self.settle() {
            settled.push(s);
        }
        settled
    }

    #[allow(missing_docs)]
    pub fn controller(&self) -> &Controller<T> {
        &self.controller
    }

    /// Give back the controller, dropping any completion not yet settled.
    pub fn into_controller(self) -> Controller<T> {
        self.controller
    }

    fn apply(&mut self, completion: Completion) -> Settled {
        self.outstanding -= 1;
        let Completion {
            ticket,
            request,
            outcome,
        } = completion;

        Settled {
            ticket,
            result: self.controller.complete(request, outcome),
        }
    }
}

//! Turns user intents into remote calls, and remote outcomes into snapshot updates

mod dispatch;
mod input;

pub use self::dispatch::{Dispatcher, Settled, Ticket};
pub use self::input::{parse_key, parse_set_input};
use crate::errors::{InvocationError, RemoteError};
use crate::network::{Op, Request, Response, Transport};
use crate::snapshot::{Entry, SnapshotStore};
use crate::Result;
use slog::Logger;
use std::fmt;
use std::fmt::Display;
use std::result;

/// Settings for a `Controller`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Separates the key from the value in raw Set input.
    pub separator: char,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig { separator: ',' }
    }
}

/// Raw user input for one invocation.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Set(String),
    Get(String),
    Delete(String),
}

impl Intent {
    #[allow(missing_docs)]
    pub fn op(&self) -> Op {
        match self {
            Intent::Set(_) => Op::Set,
            Intent::Get(_) => Op::Get,
            Intent::Delete(_) => Op::Delete,
        }
    }
}

/// Confirmation of a successful invocation.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Set { message: String },
    Get { key: String, value: String },
    Delete { message: String },
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Set { message } | Report::Delete { message } => {
                write!(f, "Message: {}", message)
            }
            Report::Get { key, value } => write!(f, "Key: {} Value: {}", key, value),
        }
    }
}

/// Owns the snapshot, and is the only thing that mutates it.
///
/// Each invocation runs through the same stages: `prepare` validates raw input into a
/// `Request`, the transport carries it, and `complete` applies the outcome. A failed
/// invocation leaves the snapshot exactly as it was.
#[derive(Debug)]
pub struct Controller<T: Transport> {
    log: Logger,
    transport: T,
    store: SnapshotStore,
    config: ControllerConfig,
}

impl<T> Controller<T>
where
    T: Transport,
{
    /// Create a controller with an empty snapshot.
    pub fn new(log: Logger, transport: T) -> Controller<T> {
        Controller::with_store(log, transport, SnapshotStore::new())
    }

    /// Create a controller around an existing snapshot.
    pub fn with_store(log: Logger, transport: T, store: SnapshotStore) -> Controller<T> {
        Controller {
            log,
            transport,
            store,
            config: ControllerConfig::default(),
        }
    }

    /// Replace the controller's settings.
    pub fn configure(mut self, config: ControllerConfig) -> Controller<T> {
        self.config = config;
        self
    }

    /// The current entries, in display order.
    pub fn snapshot(&self) -> &[Entry] {
        self.store.entries()
    }

    #[allow(missing_docs)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The logger invocations are recorded to.
    pub fn logger(&self) -> &Logger {
        &self.log
    }

    /// Upsert from raw `key<separator>value` input.
    pub fn set(&mut self, raw: &str) -> result::Result<Report, InvocationError> {
        self.invoke(Intent::Set(raw.to_owned()))
    }

    /// Look up a key, recording the remote answer.
    pub fn get(&mut self, raw: &str) -> result::Result<Report, InvocationError> {
        self.invoke(Intent::Get(raw.to_owned()))
    }

    /// Delete a key remotely, then drop it from the snapshot.
    pub fn delete(&mut self, raw: &str) -> result::Result<Report, InvocationError> {
        self.invoke(Intent::Delete(raw.to_owned()))
    }

    /// Run one invocation to completion on the calling thread.
    pub fn invoke(&mut self, intent: Intent) -> result::Result<Report, InvocationError> {
        let request = self.prepare(&intent)?;
        let outcome = self.transport.send(&request);
        self.complete(request, outcome)
    }

    /// Validate raw input into the request to send. No remote call is made here.
    pub fn prepare(&self, intent: &Intent) -> result::Result<Request, InvocationError> {
        let request = match intent {
            Intent::Set(raw) => {
                parse_set_input(raw, self.config.separator).map(|(key, value)| Request::Set {
                    key,
                    value,
                })
            }
            Intent::Get(raw) => parse_key(raw).map(|key| Request::Get { key }),
            Intent::Delete(raw) => parse_key(raw).map(|key| Request::Delete { key }),
        };

        match request {
            Ok(request) => {
                debug!(self.log, "Dispatching"; "op" => intent.op(), "key" => request.key());
                Ok(request)
            }
            Err(e) => {
                warn!(self.log, "Rejected input"; "op" => intent.op(), "error" => %e);
                Err(e.into())
            }
        }
    }

    /// Apply the outcome of a remote call for `request`.
    ///
    /// Set and Get record the key and value echoed by the remote side. Delete removes the
    /// requested key. Any failure, including a response missing a required field, leaves
    /// the snapshot untouched.
    pub fn complete(
        &mut self,
        request: Request,
        outcome: Result<Response>,
    ) -> result::Result<Report, InvocationError> {
        let op = request.op();
        match Controller::<T>::interpret(request, outcome) {
            Ok(applied) => {
                let report = self.apply(applied);
                info!(self.log, "Completed"; "op" => op, "report" => %report);
                Ok(report)
            }
            Err(e) => {
                warn!(self.log, "Remote call failed"; "op" => op, "error" => %e);
                Err(e.into())
            }
        }
    }

    fn interpret(
        request: Request,
        outcome: Result<Response>,
    ) -> result::Result<Applied, RemoteError> {
        let response = outcome.map_err(|e| RemoteError::Transport {
            cause: e.to_string(),
        })?;

        if let Some(error) = response.failure() {
            return Err(RemoteError::Status {
                error: error.to_owned(),
            });
        }

        let Response {
            key,
            value,
            message,
            ..
        } = response;

        match request {
            Request::Set { .. } => Ok(Applied::Set {
                key: non_empty(key, "key")?,
                value: required(value, "value")?,
                message: required(message, "message")?,
            }),
            Request::Get { .. } => Ok(Applied::Get {
                key: non_empty(key, "key")?,
                value: required(value, "value")?,
            }),
            Request::Delete { key } => Ok(Applied::Delete {
                key,
                message: required(message, "message")?,
            }),
        }
    }

    fn apply(&mut self, applied: Applied) -> Report {
        match applied {
            Applied::Set {
                key,
                value,
                message,
            } => {
                self.upsert(&key, &value);
                Report::Set { message }
            }
            Applied::Get { key, value } => {
                self.upsert(&key, &value);
                Report::Get { key, value }
            }
            Applied::Delete { key, message } => {
                let before = self.store.len();
                self.store.remove(&key);
                debug!(self.log, "Removed"; "key" => &key, "found" => before != self.store.len());
                Report::Delete { message }
            }
        }
    }

    fn upsert(&mut self, key: &str, value: &str) {
        self.store.upsert(key, value);
        debug!(self.log, "Upserted"; "key" => key, "entries" => self.store.len());
    }
}

/// A remote outcome that passed validation and can be applied.
enum Applied {
    Set {
        key: String,
        value: String,
        message: String,
    },
    Get {
        key: String,
        value: String,
    },
    Delete {
        key: String,
        message: String,
    },
}

fn required(field: Option<String>, name: &'static str) -> result::Result<String, RemoteError> {
    field.ok_or(RemoteError::Malformed { field: name })
}

fn non_empty(field: Option<String>, name: &'static str) -> result::Result<String, RemoteError> {
    required(field, name).and_then(|f| {
        if f.is_empty() {
            Err(RemoteError::Malformed { field: name })
        } else {
            Ok(f)
        }
    })
}

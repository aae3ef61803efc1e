//! The `kvs_view` crate keeps a local, ordered view of key-value pairs in step with a
//! remote key-value store.
//!
//! A [`Controller`] turns raw user input into one remote call, and applies the remote
//! outcome to its [`SnapshotStore`]. A [`Dispatcher`] runs those calls on a thread pool
//! and applies their completions one at a time on the owning thread.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::module_name_repetitions, missing_docs)]

#[macro_use]
extern crate slog;

mod controller;
mod errors;
mod network;
mod snapshot;
pub mod thread_pool;

pub use self::controller::{
    parse_key, parse_set_input, Controller, ControllerConfig, Dispatcher, Intent, Report, Settled,
    Ticket,
};
pub use self::errors::{InvocationError, RemoteError, Result, ValidationError};
pub use self::network::{Error as TransportError, Op, Request, Response, TcpTransport, Transport};
pub use self::snapshot::{Entry, SnapshotStore};

#![allow(dead_code)]

use crossbeam_channel::{bounded, Receiver, Sender};
use kvs_view::{Request, Response, Transport};
use std::collections::{HashMap, VecDeque};
use std::io::Write;
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

pub fn logger() -> slog::Logger {
    slog::Logger::root(slog::Discard, slog::o!())
}

pub fn response(key: &str, value: &str, message: &str) -> Response {
    Response {
        key: Some(key.to_owned()),
        value: Some(value.to_owned()),
        message: Some(message.to_owned()),
        error: None,
    }
}

pub fn message(message: &str) -> Response {
    Response {
        message: Some(message.to_owned()),
        ..Response::default()
    }
}

/// Answers requests from a queue of canned outcomes and records what was sent.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    replies: Arc<Mutex<VecDeque<Result<Response, String>>>>,
    sent: Arc<Mutex<Vec<Request>>>,
}

impl ScriptedTransport {
    pub fn new() -> ScriptedTransport {
        ScriptedTransport::default()
    }

    pub fn reply(self, response: Response) -> ScriptedTransport {
        self.replies.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn fail(self, cause: &str) -> ScriptedTransport {
        self.replies.lock().unwrap().push_back(Err(cause.to_owned()));
        self
    }

    pub fn sent(&self) -> Vec<Request> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &Request) -> kvs_view::Result<Response> {
        self.sent.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(cause)) => Err(failure::err_msg(cause)),
            None => Err(failure::err_msg("no reply scripted")),
        }
    }
}

/// Holds each request until the test releases the reply for it.
///
/// Gates are looked up by the request's display form, e.g. `Set 'a' to '1'`.
#[derive(Debug, Clone, Default)]
pub struct GatedTransport {
    gates: Arc<Mutex<HashMap<String, Receiver<Result<Response, String>>>>>,
}

impl GatedTransport {
    pub fn new() -> GatedTransport {
        GatedTransport::default()
    }

    pub fn gate(&self, request: &str) -> Sender<Result<Response, String>> {
        let (sender, receiver) = bounded(1);
        self.gates
            .lock()
            .unwrap()
            .insert(request.to_owned(), receiver);
        sender
    }
}

impl Transport for GatedTransport {
    fn send(&self, request: &Request) -> kvs_view::Result<Response> {
        let gate = self.gates.lock().unwrap().remove(&request.to_string());
        match gate.map(|g| g.recv()) {
            Some(Ok(Ok(response))) => Ok(response),
            Some(Ok(Err(cause))) => Err(failure::err_msg(cause)),
            _ => Err(failure::err_msg("no gate for request")),
        }
    }
}

/// Always panics while sending.
#[derive(Debug, Clone, Copy)]
pub struct PanickingTransport;

impl Transport for PanickingTransport {
    fn send(&self, _request: &Request) -> kvs_view::Result<Response> {
        panic!("transport blew up")
    }
}

/// Serves one connection per reply, in order, writing each reply verbatim.
///
/// The handle yields the requests that were received.
pub fn responder(replies: Vec<&'static str>) -> (SocketAddr, JoinHandle<Vec<Request>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        replies
            .into_iter()
            .map(|reply| {
                let (mut stream, _) = listener.accept().unwrap();
                let request = serde_json::Deserializer::from_reader(&stream)
                    .into_iter::<Request>()
                    .next()
                    .unwrap()
                    .unwrap();
                stream.write_all(reply.as_bytes()).unwrap();
                stream.flush().unwrap();
                request
            })
            .collect()
    });

    (addr, handle)
}

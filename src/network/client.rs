use super::data::{Request, Response};
use super::Transport;
use crate::Result;
use std::io::Write;
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};

/// Sends each request as one JSON object over a fresh TCP connection.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, Copy)]
pub struct TcpTransport {
    addr: SocketAddr,
}

impl TcpTransport {
    /// Resolve the address of the remote store. No connection is made until a request is sent.
    pub fn new<A: ToSocketAddrs>(addr: A) -> Result<TcpTransport> {
        match addr.to_socket_addrs()?.next() {
            Some(addr) => Ok(TcpTransport { addr }),
            None => Err(Error::UnresolvedAddress.into()),
        }
    }

    #[allow(missing_docs)]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Transport for TcpTransport {
    fn send(&self, request: &Request) -> Result<Response> {
        let mut connection = TcpStream::connect(self.addr)?;
        serde_json::to_writer(&connection, request)?;
        connection.flush()?;
        connection.shutdown(Shutdown::Write)?;

        let mut responses =
            serde_json::Deserializer::from_reader(&connection).into_iter::<Response>();

        match responses.next() {
            Some(Ok(response)) => Ok(response),
            Some(Err(_e)) => Err(Error::ResponseDeserialisation.into()),
            None => Err(Error::NoResponse.into()),
        }
    }
}

/// Errors which can be thrown in the client.
#[derive(Debug, Clone, Copy, failure::Fail)]
#[allow(missing_docs)]
pub enum Error {
    #[fail(display = "Failed to deserialise response")]
    ResponseDeserialisation,

    #[fail(display = "No response from server")]
    NoResponse,

    #[fail(display = "Address did not resolve")]
    UnresolvedAddress,
}

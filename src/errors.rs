use std::result;

/// Convenience Result type.
pub type Result<T> = result::Result<T, failure::Error>;

/// Input rejected before any remote call was made.
#[derive(Debug, failure::Fail, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The key was empty, or only whitespace
    #[fail(display = "Key must not be empty")]
    EmptyKey,
}

/// A remote call did not produce a usable result.
#[derive(Debug, failure::Fail, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The transport failed to deliver the request or a response
    #[fail(display = "Transport failure: {}", cause)]
    Transport {
        /// Diagnostic provided by the transport
        cause: String,
    },

    /// The remote side reported that the operation failed
    #[fail(display = "Remote failure: {}", error)]
    Status {
        /// Error text sent by the remote side
        error: String,
    },

    /// The response did not carry a field the operation requires
    #[fail(display = "Malformed response: missing or empty field '{}'", field)]
    Malformed {
        /// Name of the offending field
        field: &'static str,
    },
}

/// Why an invocation ended without applying anything to the snapshot.
#[derive(Debug, failure::Fail, Clone, PartialEq, Eq)]
pub enum InvocationError {
    #[allow(missing_docs)]
    #[fail(display = "{}", _0)]
    Validation(#[cause] ValidationError),

    #[allow(missing_docs)]
    #[fail(display = "{}", _0)]
    Remote(#[cause] RemoteError),
}

impl InvocationError {
    /// Was the invocation rejected locally, without remote traffic?
    pub fn is_validation(&self) -> bool {
        match self {
            InvocationError::Validation(_) => true,
            InvocationError::Remote(_) => false,
        }
    }
}

impl From<ValidationError> for InvocationError {
    fn from(e: ValidationError) -> Self {
        InvocationError::Validation(e)
    }
}

impl From<RemoteError> for InvocationError {
    fn from(e: RemoteError) -> Self {
        InvocationError::Remote(e)
    }
}

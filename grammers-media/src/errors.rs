// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors produced while locating and downloading media.
use std::{fmt, io};

/// The error type reported by the server when a request is misused.
#[derive(Clone, Debug, PartialEq)]
pub struct RpcError {
    /// A numerical value similar to HTTP response status codes.
    pub code: i32,

    /// The ASCII error name, normally in screaming snake case.
    ///
    /// Digit words are removed from the name and put in the [`RpcError::value`] instead.
    /// ```
    /// use grammers_media::errors::RpcError;
    /// let rpc_error = RpcError::new(420, "FLOOD_WAIT_31");
    /// assert_eq!(rpc_error.name, "FLOOD_WAIT");
    /// assert_eq!(rpc_error.value, Some(31));
    /// ```
    pub name: String,

    /// If the error contained an additional integer value, it will be present here and removed
    /// from the [`RpcError::name`].
    pub value: Option<u32>,
}

impl RpcError {
    /// Build the error from the code and raw message the server responded with.
    pub fn new(code: i32, message: &str) -> Self {
        if let Some((value, parsed_value)) = message
            .split(|c: char| !c.is_ascii_digit())
            .flat_map(|value| {
                value
                    .parse::<u32>()
                    .map(|parsed_value| (value, parsed_value))
            })
            .next()
        {
            let mut to_remove = String::with_capacity(1 + value.len());
            to_remove.push('_');
            to_remove.push_str(value);
            Self {
                code,
                name: message.replace(&to_remove, ""),
                value: Some(parsed_value),
            }
        } else {
            Self {
                code,
                name: message.to_string(),
                value: None,
            }
        }
    }

    /// Matches on the name of the RPC error (case-sensitive).
    ///
    /// A single trailing or leading asterisk (`'*'`) is allowed, and will instead check if the
    /// error name starts (or ends with) the input parameter.
    pub fn is(&self, rpc_error: &str) -> bool {
        if let Some(rpc_error) = rpc_error.strip_suffix('*') {
            self.name.starts_with(rpc_error)
        } else if let Some(rpc_error) = rpc_error.strip_prefix('*') {
            self.name.ends_with(rpc_error)
        } else {
            self.name == rpc_error
        }
    }
}

impl std::error::Error for RpcError {}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rpc error {}: {}", self.code, self.name)?;
        if let Some(value) = self.value {
            write!(f, " (value: {value})")?;
        }
        Ok(())
    }
}

/// This error occurs when a call to the [`crate::Remote`] was unsuccessful.
#[derive(Debug)]
pub enum InvocationError {
    /// The server could not process the request, e.g. because the container is not known
    /// yet or the file reference expired.
    Rpc(RpcError),

    /// Standard I/O error while talking to the server.
    Io(io::Error),

    /// The request was cancelled or dropped, and the results won't arrive.
    Dropped,
}

impl std::error::Error for InvocationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rpc(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Dropped => None,
        }
    }
}

impl fmt::Display for InvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rpc(err) => write!(f, "request error: {err}"),
            Self::Io(err) => write!(f, "request error: {err}"),
            Self::Dropped => write!(f, "request error: dropped (cancelled)"),
        }
    }
}

impl From<RpcError> for InvocationError {
    fn from(error: RpcError) -> Self {
        Self::Rpc(error)
    }
}

impl From<io::Error> for InvocationError {
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}

impl InvocationError {
    /// Matches on the name of the RPC error, see [`RpcError::is`].
    ///
    /// If the error is not a RPC error, returns `false`.
    #[inline]
    pub fn is(&self, rpc_error: &str) -> bool {
        match self {
            Self::Rpc(rpc) => rpc.is(rpc_error),
            _ => false,
        }
    }
}

/// This error occurs when an encoded `"<container>_<message>"` identifier is malformed.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseRefError {
    /// The input did not consist of exactly two parts separated by `_`.
    Malformed,
    /// The container part was not a positive integer.
    InvalidContainer,
    /// The message part was not a positive integer.
    InvalidMessage,
}

impl std::error::Error for ParseRefError {}

impl fmt::Display for ParseRefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "invalid identifier, expected <container>_<message>"),
            Self::InvalidContainer => write!(f, "invalid identifier, bad container id"),
            Self::InvalidMessage => write!(f, "invalid identifier, bad message id"),
        }
    }
}

/// This error occurs when [`crate::Client::resolve_media`] fails.
#[derive(Debug)]
pub enum ResolveError {
    /// The encoded identifier could not be parsed. No request was made.
    InvalidIdentifier(ParseRefError),

    /// The lookup failed even after resolving the container by name (or the resolution
    /// itself failed). The error returned by the last request is kept as-is.
    EntityUnresolved {
        container: String,
        source: InvocationError,
    },
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidIdentifier(err) => Some(err),
            Self::EntityUnresolved { source, .. } => Some(source),
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIdentifier(err) => write!(f, "resolve error: {err}"),
            Self::EntityUnresolved { container, source } => {
                write!(f, "resolve error, {container:?} unresolved: {source}")
            }
        }
    }
}

impl From<ParseRefError> for ResolveError {
    fn from(error: ParseRefError) -> Self {
        Self::InvalidIdentifier(error)
    }
}

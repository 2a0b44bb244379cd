// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The connection to Telegram, as seen by this crate.
//!
//! Authorization, reconnection and flood handling are all responsibility of the
//! [`Remote`] implementation. A [`MemoryRemote`] is provided for offline use.

mod memory;

use futures_util::future::BoxFuture;

use crate::errors::InvocationError;
use crate::types::{GetFile, Message};

pub use memory::MemoryRemote;

/// The requests the [`crate::Client`] needs to make against Telegram.
///
/// Implementations must be safe to share between tasks. Every method performs a single
/// round-trip and reports failures as-is; the client decides what to retry.
pub trait Remote: Send + Sync {
    /// Fetch a single message by its identifier from a channel or group.
    ///
    /// `Ok(None)` means the container is reachable but the message does not exist.
    /// Telegram refuses lookups into containers the session has not seen before, in
    /// which case an error should be returned.
    fn get_message(
        &self,
        container_id: i64,
        message_id: i32,
    ) -> BoxFuture<'_, Result<Option<Message>, InvocationError>>;

    /// Resolve a container by its public name, so that later lookups by identifier succeed.
    ///
    /// Calling this more than once for the same container must have no further effect.
    fn resolve_container<'a>(&'a self, name: &'a str)
    -> BoxFuture<'a, Result<(), InvocationError>>;

    /// Download a single chunk of a file. An empty chunk signals the end of the file.
    fn get_file<'a>(&'a self, request: GetFile<'a>) -> BoxFuture<'a, Result<Vec<u8>, InvocationError>>;
}

// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Contains client-specific configuration and types.

#[allow(clippy::module_inception)]
mod client;
mod files;
mod messages;

pub use client::{Client, ClientConfiguration};
pub use files::{DownloadIter, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE, chunk_size};
pub use messages::MAX_RESOLVE_RETRIES;

// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This library finds and downloads the media that messages in Telegram channels and groups
//! carry, such as photos, videos and other documents, along with their previews.
//!
//! # Remote
//!
//! The connection to Telegram itself (authorization, reconnection, flood waits) is not handled
//! here. Instead, the [`Client`] is given an implementation of the [`Remote`] trait, which
//! performs the handful of requests the client needs. A [`MemoryRemote`] is provided to work
//! without a connection.
//!
//! # Finding media
//!
//! Media is addressed by an identifier of the form `"<container_id>_<message_id>"`, along with
//! the public name of the container. See [`Client::resolve_media`].
//!
//! # Downloading
//!
//! Files are downloaded in chunks, one request at a time, through a [`DownloadIter`].
//! Chunk sizes are picked to satisfy Telegram's requirements (see [`client::chunk_size`]).
//!
//! Photos and documents often carry several previews ("thumbs"). The largest one can be
//! downloaded with [`Client::iter_thumbnail`]. Tiny previews are embedded in the media itself,
//! in which case no request is made; stripped previews are expanded into a complete JPEG
//! (see [`types::photo_sizes::expand_stripped`]).

#![deny(unsafe_code)]

pub mod client;
pub mod errors;
pub mod remote;
pub mod types;

pub use client::{Client, ClientConfiguration, DownloadIter};
pub use errors::{InvocationError, ResolveError};
pub use remote::{MemoryRemote, Remote};

/// Alias for [`std::result::Result`] with the error set to [`InvocationError`].
pub type Result<T> = std::result::Result<T, InvocationError>;

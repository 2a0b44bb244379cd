// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Whether a [`FileLocation`] refers to a photo or to a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationKind {
    Photo,
    Document,
}

/// Address of a file (or of one of its thumbs) in Telegram's storage.
///
/// A location is only valid for as long as its `file_reference` is. Once it expires, the
/// media has to be fetched again to obtain a fresh one.
#[derive(Clone, Debug, PartialEq)]
pub struct FileLocation {
    pub kind: LocationKind,
    pub id: i64,
    pub access_hash: i64,
    pub file_reference: Vec<u8>,
    /// Datacenter that holds the file contents.
    pub dc_id: i32,
    /// Size tag of the thumb to download. Empty for the complete document.
    pub thumb_size: String,
}

/// A request for a single chunk of a [`FileLocation`].
///
/// A new request is built for every chunk; they are never changed once created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GetFile<'a> {
    pub location: &'a FileLocation,
    pub offset: i64,
    pub limit: i32,
}

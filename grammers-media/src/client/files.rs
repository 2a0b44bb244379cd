// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use futures_util::stream::{self, Stream};
use log::{debug, trace};

use crate::Client;
use crate::errors::InvocationError;
use crate::types::photo_sizes::{PhotoSize, VecExt};
use crate::types::{FileLocation, GetFile, Media};

pub const MIN_CHUNK_SIZE: i32 = 4 * 1024;
pub const MAX_CHUNK_SIZE: i32 = 512 * 1024;

/// Chunk size used when the size of the file is not known.
const UNKNOWN_SIZE_CHUNK_SIZE: i32 = 64 * 1024;

/// Chunk size to use for files smaller than the given size (in bytes).
/// Larger files use [`MAX_CHUNK_SIZE`].
const CHUNK_SIZES: [(i64, i32); 2] = [
    (100 * 1024 * 1024, 128 * 1024),
    (786_432_000, 256 * 1024),
];

/// Requests can't span across blocks of this size.
const BLOCK_SIZE: i32 = 1024 * 1024;

/// Returns the chunk size, in bytes, that should be used to download a file of `total_size`
/// bytes. A `total_size` of zero (or less) means the size is unknown.
///
/// Every value returned is accepted by Telegram: a multiple of [`MIN_CHUNK_SIZE`] that
/// evenly divides one mebibyte.
pub fn chunk_size(total_size: i64) -> i32 {
    if total_size <= 0 {
        return UNKNOWN_SIZE_CHUNK_SIZE;
    }

    CHUNK_SIZES
        .iter()
        .find(|(below, _)| total_size < *below)
        .map(|(_, size)| *size)
        .unwrap_or(MAX_CHUNK_SIZE)
}

enum Source {
    /// Content already known, yielded as a single chunk.
    Inline(Option<Vec<u8>>),
    Remote(FileLocation),
}

/// Iterator over the contents of a file, one chunk at a time.
///
/// Only one request is made at a time, with strictly increasing offsets. Once the iterator
/// has finished (including because of an error) it cannot be restarted. To resume, open a
/// new iterator with [`DownloadIter::offset`] set to [`DownloadIter::position`].
pub struct DownloadIter {
    client: Client,
    source: Source,
    chunk_size: i32,
    offset: i64,
    limit: Option<i64>,
    /// Offset of the next request.
    cursor: i64,
    /// Bytes to drop from the start of the next chunk to honor an unaligned `offset`.
    skip: usize,
    yielded: i64,
    started: bool,
    done: bool,
}

impl DownloadIter {
    fn new(client: &Client, source: Source, chunk_size: i32) -> Self {
        Self {
            client: client.clone(),
            source,
            chunk_size,
            offset: 0,
            limit: None,
            cursor: 0,
            skip: 0,
            yielded: 0,
            started: false,
            done: false,
        }
    }

    fn assert_not_started(&self) {
        assert!(
            !self.started,
            "download options must be set before fetching the first chunk"
        );
    }

    /// Changes the chunk size, in bytes, used to make requests. Useful if you only need to get a
    /// small part of a file. By default, it depends on the size of the file (see [`chunk_size`]).
    ///
    /// # Panics
    ///
    /// Panics if `size` is not divisible by `MIN_CHUNK_SIZE`, if `size` is not contained in
    /// the range `MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE`, or if a mebibyte is not divisible by `size`.
    /// Also panics if the first chunk was already fetched.
    pub fn chunk_size(mut self, size: i32) -> Self {
        self.assert_not_started();
        assert!(
            (MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&size)
                && size % MIN_CHUNK_SIZE == 0
                && BLOCK_SIZE % size == 0
        );
        self.chunk_size = size;
        self
    }

    /// Starts downloading at `offset` bytes into the file instead of at the beginning.
    ///
    /// The offset does not need to be aligned to anything.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is negative, or if the first chunk was already fetched.
    pub fn offset(mut self, offset: i64) -> Self {
        self.assert_not_started();
        assert!(offset >= 0);
        self.offset = offset;
        self
    }

    /// Stops after `n` bytes have been returned.
    ///
    /// # Panics
    ///
    /// Panics if `n` is negative, or if the first chunk was already fetched.
    pub fn limit(mut self, n: i64) -> Self {
        self.assert_not_started();
        assert!(n >= 0);
        self.limit = Some(n);
        self
    }

    /// Offset in the file of the next byte that would be returned.
    pub fn position(&self) -> i64 {
        self.offset + self.yielded
    }

    /// Fetch and return the next chunk.
    pub async fn next(&mut self) -> Result<Option<Vec<u8>>, InvocationError> {
        if self.done {
            return Ok(None);
        }

        let location = match &mut self.source {
            Source::Inline(bytes) => {
                let bytes = bytes.take();
                self.done = true;
                let chunk = bytes.and_then(|bytes| self.slice_inline(bytes));
                if let Some(chunk) = &chunk {
                    self.yielded += chunk.len() as i64;
                }
                return Ok(chunk);
            }
            Source::Remote(location) => &*location,
        };

        let remaining = self.limit.map(|limit| limit - self.yielded);
        if remaining.is_some_and(|n| n <= 0) {
            self.done = true;
            return Ok(None);
        }

        if !self.started {
            self.started = true;
            let chunk_size = self.chunk_size as i64;
            self.cursor = self.offset - self.offset % chunk_size;
            self.skip = (self.offset - self.cursor) as usize;
        }

        let request = GetFile {
            location,
            offset: self.cursor,
            limit: self.chunk_size,
        };
        let mut chunk = match self.client.get_file(request).await {
            Ok(chunk) => chunk,
            Err(err) => {
                self.done = true;
                return Err(err);
            }
        };
        trace!(
            "got {} bytes at offset {} of file {}",
            chunk.len(),
            self.cursor,
            location.id
        );

        // Telegram only returns less than requested at the end of the file.
        if chunk.len() < self.chunk_size as usize {
            self.done = true;
        }
        self.cursor += chunk.len() as i64;

        if self.skip > 0 {
            let n = self.skip.min(chunk.len());
            chunk.drain(..n);
            self.skip -= n;
        }
        if let Some(remaining) = remaining {
            chunk.truncate(remaining as usize);
        }

        if chunk.is_empty() {
            self.done = true;
            return Ok(None);
        }

        self.yielded += chunk.len() as i64;
        Ok(Some(chunk))
    }

    /// Apply the `offset` and `limit` to content that is already known.
    fn slice_inline(&self, bytes: Vec<u8>) -> Option<Vec<u8>> {
        let start = (self.offset as usize).min(bytes.len());
        let end = match self.limit {
            Some(limit) => start.saturating_add(limit as usize).min(bytes.len()),
            None => bytes.len(),
        };

        if start == end {
            None
        } else if start == 0 && end == bytes.len() {
            Some(bytes)
        } else {
            Some(bytes[start..end].to_vec())
        }
    }

    /// Turn this iterator into a [`Stream`] of chunks, for example to use it as a response body.
    ///
    /// The stream ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<u8>, InvocationError>> + Send {
        stream::unfold(self, |mut iter| async move {
            match iter.next().await {
                Ok(Some(chunk)) => Some((Ok(chunk), iter)),
                Ok(None) => None,
                Err(err) => Some((Err(err), iter)),
            }
        })
    }
}

impl Client {
    async fn get_file(&self, request: GetFile<'_>) -> Result<Vec<u8>, InvocationError> {
        let _permit = self
            .0
            .download_permits
            .acquire()
            .await
            .map_err(|_| InvocationError::Dropped)?;

        self.0.remote.get_file(request).await
    }

    /// Returns a new iterator over the contents of the file at `location`.
    ///
    /// `total_size` is only used to pick the [`chunk_size`] and may be zero if unknown.
    pub fn open(&self, location: FileLocation, total_size: i64) -> DownloadIter {
        let chunk_size = chunk_size(total_size);
        debug!(
            "opening file {} (thumb {:?}) on dc {} with {} byte chunks",
            location.id, location.thumb_size, location.dc_id, chunk_size
        );
        DownloadIter::new(self, Source::Remote(location), chunk_size)
    }

    /// Returns a new iterator over the contents of a media document that will be downloaded.
    ///
    /// Photos are downloaded in their largest size.
    ///
    /// # Examples
    ///
    /// ```
    /// # async fn f(media: grammers_media::types::Media, client: grammers_media::Client) -> Result<(), Box<dyn std::error::Error>> {
    /// let mut download = client.iter_download(&media);
    /// let mut bytes = Vec::new();
    /// while let Some(chunk) = download.next().await? {
    ///     bytes.extend(chunk);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn iter_download(&self, media: &Media) -> DownloadIter {
        self.open(media.to_location(), media.size())
    }

    /// Returns a new iterator over the contents of the given thumb of a media.
    ///
    /// Thumbs with inline content produce a single chunk without making any request.
    /// Stripped thumbs are expanded into a complete image first; if they cannot be expanded,
    /// the iterator produces nothing.
    pub fn iter_thumb(&self, media: &Media, thumb: &PhotoSize) -> DownloadIter {
        match thumb.inline_bytes() {
            Some(bytes) => DownloadIter::new(self, Source::Inline(Some(bytes)), MAX_CHUNK_SIZE),
            None => self.open(media.to_thumb_location(thumb), thumb.size() as i64),
        }
    }

    /// Returns a new iterator over the contents of the largest thumb of a media, or `None`
    /// if it has no thumbs.
    pub fn iter_thumbnail(&self, media: &Media) -> Option<DownloadIter> {
        let thumb = media.thumbs().largest()?;
        Some(self.iter_thumb(media, thumb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_size_tiers() {
        assert_eq!(chunk_size(0), 64 * 1024);
        assert_eq!(chunk_size(-1), 64 * 1024);
        assert_eq!(chunk_size(1), 128 * 1024);
        assert_eq!(chunk_size(104_857_599), 128 * 1024);
        assert_eq!(chunk_size(104_857_600), 256 * 1024);
        assert_eq!(chunk_size(786_431_999), 256 * 1024);
        assert_eq!(chunk_size(786_432_000), 512 * 1024);
        assert_eq!(chunk_size(4 * 1024 * 1024 * 1024), 512 * 1024);
    }

    #[test]
    fn chunk_size_is_monotonic() {
        let mut sizes = vec![0, 1, 4096, 1 << 20, 786_432_000, i64::MAX];
        for &(below, _) in CHUNK_SIZES.iter() {
            sizes.extend([below - 1, below, below + 1]);
        }
        sizes.sort();

        let chunks = sizes.iter().map(|&size| chunk_size(size)).collect::<Vec<_>>();
        assert!(chunks.windows(2).all(|w| w[0] <= w[1]), "{chunks:?}");
    }

    #[test]
    fn chunk_sizes_are_accepted_by_telegram() {
        let sizes = CHUNK_SIZES
            .iter()
            .map(|(_, size)| *size)
            .chain([UNKNOWN_SIZE_CHUNK_SIZE, MAX_CHUNK_SIZE]);

        for size in sizes {
            assert!((MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&size));
            assert_eq!(size % MIN_CHUNK_SIZE, 0);
            assert_eq!(BLOCK_SIZE % size, 0);
        }
    }
}

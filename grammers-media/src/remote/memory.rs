// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::collections::{HashMap, HashSet};
use std::future;
use std::sync::Mutex;

use futures_util::future::BoxFuture;

use crate::errors::{InvocationError, RpcError};
use crate::types::{FileLocation, GetFile, Message};

use super::Remote;

const MIN_CHUNK_SIZE: i64 = 4 * 1024;
const MAX_CHUNK_SIZE: i64 = 1024 * 1024;

#[derive(Default)]
struct MemoryData {
    containers: HashMap<String, i64>,
    resolved: HashSet<i64>,
    messages: HashMap<(i64, i32), Message>,
    files: HashMap<(i64, String), Vec<u8>>,
}

/// In-memory remote.
///
/// Behaves like Telegram for the requests in [`Remote`]: containers must be resolved by name
/// before their messages can be fetched, and file requests must respect the same offset and
/// limit alignment that the real server enforces.
#[derive(Default)]
pub struct MemoryRemote(Mutex<MemoryData>);

impl MemoryRemote {
    /// Register a container, reachable by `name` once resolved.
    pub fn add_container(&self, name: &str, container_id: i64) {
        self.0
            .lock()
            .unwrap()
            .containers
            .insert(name.to_string(), container_id);
    }

    /// Store a message in its container.
    pub fn add_message(&self, message: Message) {
        self.0
            .lock()
            .unwrap()
            .messages
            .insert((message.container_id, message.id), message);
    }

    /// Store the contents of the file (or file thumb) at `location`.
    pub fn add_file(&self, location: &FileLocation, bytes: Vec<u8>) {
        self.0
            .lock()
            .unwrap()
            .files
            .insert((location.id, location.thumb_size.clone()), bytes);
    }

    fn get_message_now(
        &self,
        container_id: i64,
        message_id: i32,
    ) -> Result<Option<Message>, InvocationError> {
        let data = self.0.lock().unwrap();
        if !data.resolved.contains(&container_id) {
            return Err(RpcError::new(400, "CHANNEL_INVALID").into());
        }
        Ok(data.messages.get(&(container_id, message_id)).cloned())
    }

    fn resolve_container_now(&self, name: &str) -> Result<(), InvocationError> {
        let mut data = self.0.lock().unwrap();
        match data.containers.get(name).copied() {
            Some(container_id) => {
                data.resolved.insert(container_id);
                Ok(())
            }
            None => Err(RpcError::new(400, "USERNAME_NOT_OCCUPIED").into()),
        }
    }

    fn get_file_now(&self, request: GetFile<'_>) -> Result<Vec<u8>, InvocationError> {
        let GetFile {
            location,
            offset,
            limit,
        } = request;
        let limit = limit as i64;

        if location.file_reference.is_empty() {
            return Err(RpcError::new(400, "FILE_REFERENCE_EMPTY").into());
        }
        let end = match offset.checked_add(limit) {
            Some(end) if offset >= 0 && offset % MIN_CHUNK_SIZE == 0 => end,
            _ => return Err(RpcError::new(400, "OFFSET_INVALID").into()),
        };
        if limit <= 0
            || limit % MIN_CHUNK_SIZE != 0
            || MAX_CHUNK_SIZE % limit != 0
            || offset / MAX_CHUNK_SIZE != (end - 1) / MAX_CHUNK_SIZE
        {
            return Err(RpcError::new(400, "LIMIT_INVALID").into());
        }

        let data = self.0.lock().unwrap();
        let file = data
            .files
            .get(&(location.id, location.thumb_size.clone()))
            .ok_or_else(|| RpcError::new(400, "FILE_ID_INVALID"))?;

        let start = (offset as usize).min(file.len());
        let end = end.min(file.len() as i64) as usize;
        Ok(file[start..end].to_vec())
    }
}

impl Remote for MemoryRemote {
    fn get_message(
        &self,
        container_id: i64,
        message_id: i32,
    ) -> BoxFuture<'_, Result<Option<Message>, InvocationError>> {
        Box::pin(future::ready(self.get_message_now(container_id, message_id)))
    }

    fn resolve_container<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<(), InvocationError>> {
        Box::pin(future::ready(self.resolve_container_now(name)))
    }

    fn get_file<'a>(&'a self, request: GetFile<'a>) -> BoxFuture<'a, Result<Vec<u8>, InvocationError>> {
        Box::pin(future::ready(self.get_file_now(request)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocationKind;

    fn location() -> FileLocation {
        FileLocation {
            kind: LocationKind::Document,
            id: 1,
            access_hash: 2,
            file_reference: vec![3],
            dc_id: 4,
            thumb_size: String::new(),
        }
    }

    #[test]
    fn containers_need_resolving() {
        let remote = MemoryRemote::default();
        remote.add_container("chan", 10);

        assert!(remote.get_message_now(10, 1).unwrap_err().is("CHANNEL_INVALID"));
        assert!(remote
            .resolve_container_now("other")
            .unwrap_err()
            .is("USERNAME_NOT_OCCUPIED"));
        remote.resolve_container_now("chan").unwrap();
        remote.resolve_container_now("chan").unwrap();
        assert_eq!(remote.get_message_now(10, 1).unwrap(), None);
    }

    #[test]
    fn file_requests_are_validated() {
        let remote = MemoryRemote::default();
        let location = location();
        remote.add_file(&location, vec![7; 10_000]);

        let get = |offset, limit| {
            remote.get_file_now(GetFile {
                location: &location,
                offset,
                limit,
            })
        };

        assert_eq!(get(0, 4096).unwrap().len(), 4096);
        assert_eq!(get(8192, 4096).unwrap().len(), 10_000 - 8192);
        assert!(get(12288, 4096).unwrap().is_empty());
        assert!(get(100, 4096).unwrap_err().is("OFFSET_INVALID"));
        assert!(get(0, 1000).unwrap_err().is("LIMIT_INVALID"));
        assert!(get(0, 3 * 4096).unwrap_err().is("LIMIT_INVALID"));
        assert!(get(1024 * 1024 - 4096, 8192).unwrap_err().is("LIMIT_INVALID"));

        let last_block = i64::MAX - i64::MAX % 4096;
        assert!(get(last_block, 4096).unwrap_err().is("OFFSET_INVALID"));

        let expired = FileLocation {
            file_reference: Vec::new(),
            ..location.clone()
        };
        assert!(remote
            .get_file_now(GetFile {
                location: &expired,
                offset: 0,
                limit: 4096,
            })
            .unwrap_err()
            .is("FILE_REFERENCE_EMPTY"));
    }
}

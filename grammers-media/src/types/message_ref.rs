// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseRefError;

/// Reference to a message inside a container (channel or group), encoded as
/// `"<container_id>_<message_id>"`.
///
/// # Examples
///
/// ```
/// use grammers_media::types::MessageRef;
///
/// let msg_ref: MessageRef = "1234567_89".parse().unwrap();
/// assert_eq!(msg_ref.container_id, 1234567);
/// assert_eq!(msg_ref.message_id, 89);
/// assert_eq!(msg_ref.to_string(), "1234567_89");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub container_id: i64,
    pub message_id: i32,
}

impl MessageRef {
    pub fn new(container_id: i64, message_id: i32) -> Self {
        Self {
            container_id,
            message_id,
        }
    }
}

fn parse_positive<T: FromStr + PartialOrd + Default>(value: &str) -> Option<T> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<T>().ok().filter(|n| n > &T::default())
}

impl FromStr for MessageRef {
    type Err = ParseRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (container, message) = s.split_once('_').ok_or(ParseRefError::Malformed)?;
        if message.contains('_') {
            return Err(ParseRefError::Malformed);
        }

        let container_id = parse_positive(container).ok_or(ParseRefError::InvalidContainer)?;
        let message_id = parse_positive(message).ok_or(ParseRefError::InvalidMessage)?;
        Ok(Self::new(container_id, message_id))
    }
}

impl fmt::Display for MessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.container_id, self.message_id)
    }
}

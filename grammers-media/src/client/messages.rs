// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Methods related to finding messages and their media.

use log::debug;

use crate::Client;
use crate::errors::ResolveError;
use crate::types::{Media, Message, MessageRef};

/// How many times a failed lookup is retried after resolving its container.
pub const MAX_RESOLVE_RETRIES: usize = 1;

impl Client {
    /// Fetch the message referenced by `encoded_id` (`"<container_id>_<message_id>"`).
    ///
    /// Telegram only allows fetching messages by identifier from containers that the session
    /// already knows about. Resolving the container by name is expensive, so it is only done
    /// after the lookup fails, and then the lookup is retried once.
    ///
    /// Returns `Ok(None)` if the container is reachable but the message does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// # async fn f(client: grammers_media::Client) -> Result<(), Box<dyn std::error::Error>> {
    /// if let Some(message) = client.resolve_message("some_channel", "1234567_89").await? {
    ///     println!("Message {} has media: {}", message.id, message.media.is_some());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn resolve_message(
        &self,
        container: &str,
        encoded_id: &str,
    ) -> Result<Option<Message>, ResolveError> {
        let msg_ref = encoded_id.parse::<MessageRef>()?;

        let mut retries = 0;
        loop {
            let source = match self
                .0
                .remote
                .get_message(msg_ref.container_id, msg_ref.message_id)
                .await
            {
                Ok(message) => return Ok(message),
                Err(err) => err,
            };

            if retries >= MAX_RESOLVE_RETRIES {
                return Err(ResolveError::EntityUnresolved {
                    container: container.to_string(),
                    source,
                });
            }
            retries += 1;

            debug!("message {msg_ref} not reachable; resolving {container:?} before retrying");
            if let Err(source) = self.0.remote.resolve_container(container).await {
                return Err(ResolveError::EntityUnresolved {
                    container: container.to_string(),
                    source,
                });
            }
        }
    }

    /// Fetch the media attached to the message referenced by `encoded_id`.
    ///
    /// Returns `Ok(None)` if the message does not exist or has no media.
    /// See [`Client::resolve_message`] for details on how the message is found.
    pub async fn resolve_media(
        &self,
        container: &str,
        encoded_id: &str,
    ) -> Result<Option<Media>, ResolveError> {
        Ok(self
            .resolve_message(container, encoded_id)
            .await?
            .and_then(|message| message.media))
    }
}

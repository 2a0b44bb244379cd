// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::remote::Remote;

pub(crate) struct ClientInner {
    pub(crate) remote: Arc<dyn Remote>,
    pub(crate) configuration: ClientConfiguration,
    pub(crate) download_permits: Semaphore,
}

/// Wrapper around a [`Remote`] to locate and download media.
///
/// This structure is the "entry point" of the library, from which you can start using the rest.
/// It is cheap to clone, and all clones share the same [`Remote`] and download limits.
///
/// The client keeps no state of its own between calls: nothing is cached, and identical
/// requests will reach the remote again.
#[derive(Clone)]
pub struct Client(pub(crate) Arc<ClientInner>);

/// Configuration that controls the [`Client`] behaviour when making requests.
#[derive(Clone, Debug)]
pub struct ClientConfiguration {
    /// How many file chunks may be requested at the same time, across all downloads made
    /// through the same client.
    ///
    /// Each download only ever has one request in flight. This limit applies when several
    /// downloads run concurrently. A value of zero is treated as one.
    pub max_concurrent_downloads: usize,
}

impl Default for ClientConfiguration {
    /// Returns an instance that allows up to 10 concurrent chunk requests.
    fn default() -> Self {
        Self {
            max_concurrent_downloads: 10,
        }
    }
}

impl Client {
    /// Creates a new client using the default [`ClientConfiguration`].
    pub fn new(remote: Arc<dyn Remote>) -> Self {
        Self::with_configuration(remote, ClientConfiguration::default())
    }

    /// Creates a new client with the given configuration.
    pub fn with_configuration(remote: Arc<dyn Remote>, configuration: ClientConfiguration) -> Self {
        let permits = configuration
            .max_concurrent_downloads
            .clamp(1, Semaphore::MAX_PERMITS);

        Self(Arc::new(ClientInner {
            remote,
            configuration,
            download_permits: Semaphore::new(permits),
        }))
    }

    /// The remote used by this client.
    pub fn remote(&self) -> &Arc<dyn Remote> {
        &self.0.remote
    }

    /// The configuration used by this client.
    pub fn configuration(&self) -> &ClientConfiguration {
        &self.0.configuration
    }
}

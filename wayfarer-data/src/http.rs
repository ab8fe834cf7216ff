//! Blocking bridge over an async `reqwest` client.
//!
//! The collaborator traits are synchronous so the core stays embeddable.
//! Each HTTP adapter owns a [`BlockingClient`] that drives requests on its
//! own current-thread runtime, or on the caller's runtime when called from
//! inside a multi-threaded Tokio runtime.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

/// Error type for HTTP adapter construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// A fetched response body with its status.
#[derive(Debug)]
pub(crate) struct Fetched {
    pub(crate) status: StatusCode,
    pub(crate) body: String,
}

pub(crate) struct BlockingClient {
    client: Client,
    runtime: Runtime,
}

impl std::fmt::Debug for BlockingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingClient")
            .field("client", &self.client)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl BlockingClient {
    pub(crate) fn new(user_agent: &str, timeout: Duration) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self { client, runtime })
    }

    /// Fetch `url` and return the body whatever the status.
    ///
    /// Routing services report domain failures such as "no route" as JSON
    /// bodies on 4xx statuses, so the status is left for the caller to judge.
    pub(crate) fn get(&self, url: &str) -> Result<Fetched, reqwest::Error> {
        self.block_on(async {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok(Fetched { status, body })
        })
    }

    /// Run `future` to completion from synchronous code.
    ///
    /// Inside a multi-threaded runtime the caller's handle is used with
    /// `block_in_place`; otherwise the owned current-thread runtime is used.
    /// Calling from a `current_thread` runtime blocks that runtime until the
    /// request completes.
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn builds_outside_a_runtime() {
        let client = BlockingClient::new("wayfarer-test/0.1", Duration::from_secs(1));
        assert!(client.is_ok());
    }

    #[rstest]
    fn block_on_uses_the_owned_runtime_outside_tokio() {
        let client = BlockingClient::new("wayfarer-test/0.1", Duration::from_secs(1))
            .expect("client should build");
        assert_eq!(client.block_on(async { 21 * 2 }), 42);
    }
}

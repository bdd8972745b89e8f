//! # Teardown
//!
//! Teardown deletes single cloud resources: CodeDeploy deployment groups and
//! applications, SNS subscriptions and topics, CloudWatch alarms and Lambda
//! functions.
//!
//! Every deletion has the same shape regardless of the kind of resource:
//!
//! 1. the [`DeletionRequest`] is validated into a typed [`Target`],
//! 2. the [`Administration`] service is asked whether the target exists,
//! 3. if it does, the target is deleted exactly once,
//! 4. a [`DeletionResult`] reports what happened.
//!
//! The [`Orchestrator`] drives these steps and is generic over the
//! administration service, so it can be exercised without a network. The
//! production service lives in [`aws`].
//!
//! ## Error Handling
//!
//! Problems with the request itself (a missing identifier, a region that does
//! not match the client) are returned as [`Error`] before anything is sent to
//! the provider. Problems reported by the provider become a
//! [`Outcome::Failed`] result, which [`DeletionResult::into_result`] turns
//! back into an [`Error`] for callers that want to propagate it.
use std::future::Future;

use snafu::prelude::*;

pub mod aws;
pub mod config;
mod request;

pub use request::{DeletionRequest, DeletionResult, Outcome, ResourceKind, Target};

/// Marker trait for errors coming out of an administration service.
pub trait UserError: core::fmt::Display + core::fmt::Debug + 'static {}
impl<T: core::fmt::Display + core::fmt::Debug + 'static> UserError for T {}

/// Top-level error enum that encompasses all errors.
#[derive(snafu::Snafu, Debug)]
pub enum Error {
    #[snafu(display("Invalid arguments to {}: {reason}", kind.command()))]
    InvalidArgument { kind: ResourceKind, reason: String },

    #[snafu(display(
        "Request is for region '{requested}' but the client is configured for '{configured}'"
    ))]
    RegionMismatch {
        requested: String,
        configured: String,
    },

    #[snafu(display("{subject} does not exist"))]
    NotFound { kind: ResourceKind, subject: String },

    #[snafu(display("Could not delete {subject}: {reason}"))]
    Provider {
        kind: ResourceKind,
        subject: String,
        reason: String,
    },
}

type Result<T, E = Error> = core::result::Result<T, E>;

/// A service that can look up and delete cloud resources.
///
/// Implementations map each [`Target`] variant onto the platform call that
/// looks up or deletes it.
pub trait Administration {
    /// Errors that may occur talking to the service.
    type Error: UserError;

    /// The region this service is bound to, if known.
    ///
    /// When this returns `Some`, requests for any other region are rejected
    /// before a call is made.
    fn region(&self) -> Option<&str> {
        None
    }

    /// Returns whether the target currently exists.
    fn exists(&self, target: &Target<'_>) -> impl Future<Output = Result<bool, Self::Error>>;

    /// Deletes the target.
    fn delete(&self, target: &Target<'_>) -> impl Future<Output = Result<(), Self::Error>>;
}

/// Runs check-then-delete against an [`Administration`] service.
pub struct Orchestrator<A> {
    admin: A,
    apply: bool,
}

impl<A: Administration> Orchestrator<A> {
    /// Creates an orchestrator that deletes what it finds.
    pub fn new(admin: A) -> Self {
        Orchestrator { admin, apply: true }
    }

    /// Whether deletes are actually sent.
    ///
    /// With `apply` set to `false` targets are only looked up, and existing
    /// targets are reported as [`Outcome::Skipped`].
    pub fn with_apply(mut self, apply: bool) -> Self {
        self.apply = apply;
        self
    }

    pub fn admin(&self) -> &A {
        &self.admin
    }

    /// Deletes the resource named by `request` if it exists.
    pub async fn delete(&self, request: &DeletionRequest) -> Result<DeletionResult> {
        let target = request.target()?;
        if let Some(configured) = self.admin.region() {
            ensure!(
                configured == request.region,
                RegionMismatchSnafu {
                    requested: request.region.clone(),
                    configured: configured.to_owned(),
                }
            );
        }

        log::debug!("checking that {target} exists in {}", request.region);
        let outcome = match self.admin.exists(&target).await {
            Err(error) => {
                log::debug!("could not look up {target}: {error}");
                Outcome::Failed(error.to_string())
            }
            Ok(false) => {
                log::info!("{target} does not exist, nothing to delete");
                Outcome::NotFound
            }
            Ok(true) if !self.apply => {
                log::warn!("not deleting {target} because changes are not being applied");
                Outcome::Skipped
            }
            Ok(true) => {
                log::info!("deleting {target}");
                match self.admin.delete(&target).await {
                    Ok(()) => {
                        log::info!("  success!");
                        Outcome::Succeeded
                    }
                    Err(error) => {
                        log::debug!("could not delete {target}: {error}");
                        Outcome::Failed(error.to_string())
                    }
                }
            }
        };

        Ok(DeletionResult::new(&target, outcome))
    }
}

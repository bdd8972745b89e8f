//! Teardown for AWS.
//!
//! [`Aws`] holds one SDK client per service, all built from the same
//! [`SdkConfig`]. Each [`Target`] variant is routed to the service module
//! that knows how to look up and delete it.
pub use aws_config::SdkConfig;
// Every service crate re-exports these from `aws-smithy-types`.
use aws_sdk_lambda::error::{DisplayErrorContext, ProvideErrorMetadata};

use crate::{config::Config, Administration, Target};

pub mod cloudwatch;
pub mod codedeploy;
pub mod lambda;
pub mod sns;

/// An error returned by an AWS service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderError {
    /// The service's error code, eg "AccessDeniedException".
    pub code: Option<String>,
    pub message: String,
}

impl core::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{code}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ProviderError {}

impl ProviderError {
    /// Captures the service error code and message, falling back to the
    /// full error chain for errors that never reached the service.
    pub(crate) fn from_sdk<E>(error: E) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error,
    {
        let code = error.code().map(str::to_owned);
        let message = match error.message() {
            Some(message) => message.to_owned(),
            None => DisplayErrorContext(&error).to_string(),
        };
        ProviderError { code, message }
    }
}

/// The AWS administration service.
#[derive(Clone, Debug)]
pub struct Aws {
    region: Option<String>,
    codedeploy: aws_sdk_codedeploy::Client,
    sns: aws_sdk_sns::Client,
    cloudwatch: aws_sdk_cloudwatch::Client,
    lambda: aws_sdk_lambda::Client,
}

impl Aws {
    pub fn new(cfg: &SdkConfig) -> Self {
        Aws {
            region: cfg.region().map(|region| region.as_ref().to_owned()),
            codedeploy: aws_sdk_codedeploy::Client::new(cfg),
            sns: aws_sdk_sns::Client::new(cfg),
            cloudwatch: aws_sdk_cloudwatch::Client::new(cfg),
            lambda: aws_sdk_lambda::Client::new(cfg),
        }
    }

    /// Loads the SDK configuration described by `config` and builds the
    /// service clients from it.
    pub async fn connect(config: &Config) -> Self {
        let cfg = config.load().await;
        Aws::new(&cfg)
    }
}

impl Administration for Aws {
    type Error = ProviderError;

    fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    async fn exists(&self, target: &Target<'_>) -> Result<bool, Self::Error> {
        match *target {
            Target::DeploymentGroup {
                application,
                deployment_group,
            } => {
                codedeploy::deployment_group_exists(&self.codedeploy, application, deployment_group)
                    .await
            }
            Target::Application { application } => {
                codedeploy::application_exists(&self.codedeploy, application).await
            }
            Target::SnsSubscription { subscription_arn } => {
                sns::subscription_exists(&self.sns, subscription_arn).await
            }
            Target::SnsTopic { topic_arn } => sns::topic_exists(&self.sns, topic_arn).await,
            Target::CloudWatchAlarm { alarm_name } => {
                cloudwatch::alarm_exists(&self.cloudwatch, alarm_name).await
            }
            Target::LambdaFunction { function } => {
                lambda::function_exists(&self.lambda, function).await
            }
        }
    }

    async fn delete(&self, target: &Target<'_>) -> Result<(), Self::Error> {
        match *target {
            Target::DeploymentGroup {
                application,
                deployment_group,
            } => {
                codedeploy::delete_deployment_group(&self.codedeploy, application, deployment_group)
                    .await
            }
            Target::Application { application } => {
                codedeploy::delete_application(&self.codedeploy, application).await
            }
            Target::SnsSubscription { subscription_arn } => {
                sns::unsubscribe(&self.sns, subscription_arn).await
            }
            Target::SnsTopic { topic_arn } => sns::delete_topic(&self.sns, topic_arn).await,
            Target::CloudWatchAlarm { alarm_name } => {
                cloudwatch::delete_alarm(&self.cloudwatch, alarm_name).await
            }
            Target::LambdaFunction { function } => {
                lambda::delete_function(&self.lambda, function).await
            }
        }
    }
}

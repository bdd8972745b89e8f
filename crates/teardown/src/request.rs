//! Deletion requests, the targets they validate into, and their results.
use snafu::prelude::*;

use crate::{Error, InvalidArgumentSnafu, NotFoundSnafu, ProviderSnafu};

/// The category of cloud resource being deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    DeploymentGroup,
    Application,
    SnsSubscription,
    SnsTopic,
    CloudWatchAlarm,
    LambdaFunction,
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ResourceKind::DeploymentGroup => "CodeDeploy deployment group",
            ResourceKind::Application => "CodeDeploy application",
            ResourceKind::SnsSubscription => "SNS subscription",
            ResourceKind::SnsTopic => "SNS topic",
            ResourceKind::CloudWatchAlarm => "CloudWatch alarm",
            ResourceKind::LambdaFunction => "Lambda function",
        })
    }
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::DeploymentGroup,
        ResourceKind::Application,
        ResourceKind::SnsSubscription,
        ResourceKind::SnsTopic,
        ResourceKind::CloudWatchAlarm,
        ResourceKind::LambdaFunction,
    ];

    /// The name of the command that deletes this kind of resource.
    pub fn command(&self) -> &'static str {
        match self {
            ResourceKind::DeploymentGroup => "delete_deployment_group",
            ResourceKind::Application => "delete_application",
            ResourceKind::SnsSubscription => "unsubscribe_sns",
            ResourceKind::SnsTopic => "delete_sns_topic",
            ResourceKind::CloudWatchAlarm => "delete_cloudwatch_alarm",
            ResourceKind::LambdaFunction => "delete_lambda",
        }
    }

    /// What the primary identifier names.
    pub fn primary_label(&self) -> &'static str {
        match self {
            ResourceKind::DeploymentGroup | ResourceKind::Application => "application name",
            ResourceKind::SnsSubscription => "subscription ARN",
            ResourceKind::SnsTopic => "topic ARN",
            ResourceKind::CloudWatchAlarm => "alarm name",
            ResourceKind::LambdaFunction => "function name or ARN",
        }
    }

    /// Only deployment groups are addressed by two names.
    pub fn requires_secondary(&self) -> bool {
        matches!(self, ResourceKind::DeploymentGroup)
    }

    fn requires_arn(&self) -> bool {
        matches!(self, ResourceKind::SnsSubscription | ResourceKind::SnsTopic)
    }
}

/// A request to delete one resource.
#[derive(Clone, Debug, PartialEq)]
pub struct DeletionRequest {
    pub kind: ResourceKind,
    /// The resource's name or ARN. For deployment groups this is the
    /// application name.
    pub primary_id: String,
    /// The deployment group name. Unused by every other kind.
    pub secondary_id: Option<String>,
    pub region: String,
}

impl DeletionRequest {
    pub fn new(kind: ResourceKind, primary_id: impl Into<String>, region: impl Into<String>) -> Self {
        DeletionRequest {
            kind,
            primary_id: primary_id.into(),
            secondary_id: None,
            region: region.into(),
        }
    }

    pub fn with_secondary(mut self, secondary_id: impl Into<String>) -> Self {
        self.secondary_id = Some(secondary_id.into());
        self
    }

    /// Validates the request, returning the typed target it names.
    ///
    /// Identifiers are passed through exactly as given. Blank identifiers are
    /// rejected, as are SNS identifiers that are not ARNs.
    pub fn target(&self) -> Result<Target<'_>, Error> {
        let kind = self.kind;
        ensure!(
            !self.region.trim().is_empty(),
            InvalidArgumentSnafu {
                kind,
                reason: "missing region",
            }
        );

        let primary = self.primary_id.as_str();
        ensure!(
            !primary.trim().is_empty(),
            InvalidArgumentSnafu {
                kind,
                reason: format!("missing {}", kind.primary_label()),
            }
        );

        let secondary = match self.secondary_id.as_deref() {
            Some(name) if kind.requires_secondary() => {
                ensure!(
                    !name.trim().is_empty(),
                    InvalidArgumentSnafu {
                        kind,
                        reason: "missing deployment group name",
                    }
                );
                name
            }
            None if kind.requires_secondary() => {
                return InvalidArgumentSnafu {
                    kind,
                    reason: "missing deployment group name",
                }
                .fail();
            }
            Some(name) => {
                return InvalidArgumentSnafu {
                    kind,
                    reason: format!("unexpected second identifier '{name}'"),
                }
                .fail();
            }
            None => "",
        };

        if kind.requires_arn() {
            ensure!(
                primary.starts_with("arn:"),
                InvalidArgumentSnafu {
                    kind,
                    reason: format!("'{primary}' is not a {}", kind.primary_label()),
                }
            );
        }

        Ok(match kind {
            ResourceKind::DeploymentGroup => Target::DeploymentGroup {
                application: primary,
                deployment_group: secondary,
            },
            ResourceKind::Application => Target::Application {
                application: primary,
            },
            ResourceKind::SnsSubscription => Target::SnsSubscription {
                subscription_arn: primary,
            },
            ResourceKind::SnsTopic => Target::SnsTopic { topic_arn: primary },
            ResourceKind::CloudWatchAlarm => Target::CloudWatchAlarm { alarm_name: primary },
            ResourceKind::LambdaFunction => Target::LambdaFunction { function: primary },
        })
    }
}

fn subject(kind: ResourceKind, primary: &str, secondary: Option<&str>) -> String {
    match secondary {
        Some(group) => format!("{kind} '{group}' in application '{primary}'"),
        None => format!("{kind} '{primary}'"),
    }
}

/// A validated deletion target, carrying exactly the identifiers its kind
/// needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target<'a> {
    DeploymentGroup {
        application: &'a str,
        deployment_group: &'a str,
    },
    Application {
        application: &'a str,
    },
    SnsSubscription {
        subscription_arn: &'a str,
    },
    SnsTopic {
        topic_arn: &'a str,
    },
    CloudWatchAlarm {
        alarm_name: &'a str,
    },
    LambdaFunction {
        /// Name, ARN or partial ARN.
        function: &'a str,
    },
}

impl core::fmt::Display for Target<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&subject(self.kind(), self.primary(), self.secondary()))
    }
}

impl<'a> Target<'a> {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Target::DeploymentGroup { .. } => ResourceKind::DeploymentGroup,
            Target::Application { .. } => ResourceKind::Application,
            Target::SnsSubscription { .. } => ResourceKind::SnsSubscription,
            Target::SnsTopic { .. } => ResourceKind::SnsTopic,
            Target::CloudWatchAlarm { .. } => ResourceKind::CloudWatchAlarm,
            Target::LambdaFunction { .. } => ResourceKind::LambdaFunction,
        }
    }

    pub fn primary(&self) -> &'a str {
        match *self {
            Target::DeploymentGroup { application, .. } => application,
            Target::Application { application } => application,
            Target::SnsSubscription { subscription_arn } => subscription_arn,
            Target::SnsTopic { topic_arn } => topic_arn,
            Target::CloudWatchAlarm { alarm_name } => alarm_name,
            Target::LambdaFunction { function } => function,
        }
    }

    pub fn secondary(&self) -> Option<&'a str> {
        match *self {
            Target::DeploymentGroup {
                deployment_group, ..
            } => Some(deployment_group),
            _ => None,
        }
    }
}

/// What happened to a deletion target.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    /// The target existed and was deleted.
    Succeeded,
    /// The target did not exist, so nothing was deleted.
    NotFound,
    /// The target exists but changes were not applied.
    Skipped,
    /// The provider returned an error, carried here as its message.
    Failed(String),
}

/// The report of a single deletion.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DeletionResult {
    pub kind: ResourceKind,
    pub primary_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_id: Option<String>,
    pub outcome: Outcome,
}

impl core::fmt::Display for DeletionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let subject = self.subject();
        match &self.outcome {
            Outcome::Succeeded => write!(f, "{subject} deleted successfully"),
            Outcome::NotFound => write!(f, "{subject} does not exist"),
            Outcome::Skipped => write!(f, "{subject} exists and would be deleted"),
            Outcome::Failed(reason) => write!(f, "Could not delete {subject}: {reason}"),
        }
    }
}

impl DeletionResult {
    pub fn new(target: &Target<'_>, outcome: Outcome) -> Self {
        DeletionResult {
            kind: target.kind(),
            primary_id: target.primary().to_owned(),
            secondary_id: target.secondary().map(str::to_owned),
            outcome,
        }
    }

    /// Describes the resource this result is about.
    pub fn subject(&self) -> String {
        subject(self.kind, &self.primary_id, self.secondary_id.as_deref())
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Succeeded | Outcome::Skipped)
    }

    /// Converts a missing or failed deletion into an [`Error`].
    pub fn into_result(self) -> Result<Self, Error> {
        match &self.outcome {
            Outcome::Succeeded | Outcome::Skipped => Ok(self),
            Outcome::NotFound => NotFoundSnafu {
                kind: self.kind,
                subject: self.subject(),
            }
            .fail(),
            Outcome::Failed(reason) => ProviderSnafu {
                kind: self.kind,
                subject: self.subject(),
                reason: reason.clone(),
            }
            .fail(),
        }
    }
}

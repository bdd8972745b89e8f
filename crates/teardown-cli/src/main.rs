//! Deletes a single AWS resource, checking that it exists first.
//!
//! ```sh
//! teardown delete_application MyApp --region us-east-1
//! teardown delete_deployment_group MyApp MyDeploymentGroup --region us-east-1 --dry-run
//! teardown -vv delete_lambda my-function --region eu-west-1 --output json
//! ```
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use teardown::{
    aws::Aws, config::Config, DeletionRequest, DeletionResult, Orchestrator, Outcome, ResourceKind,
};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Delete AWS resources, one at a time")]
struct Cli {
    /// Sets the verbosity level
    #[clap(short, action = clap::ArgAction::Count, global = true)]
    verbosity: u8,

    /// How to print the result.
    #[clap(long, value_enum, default_value_t = Output::Human, global = true)]
    output: Output,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum Output {
    Human,
    Json,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "snake_case")]
enum Command {
    /// Delete a CodeDeploy deployment group.
    DeleteDeploymentGroup {
        /// Name of the CodeDeploy application.
        application_name: String,
        /// Name of the deployment group.
        deployment_group_name: String,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Delete a CodeDeploy application.
    DeleteApplication {
        /// Name of the CodeDeploy application.
        application_name: String,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Delete an SNS subscription.
    UnsubscribeSns {
        /// ARN of the subscription.
        subscription_arn: String,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Delete a CloudWatch alarm.
    DeleteCloudwatchAlarm {
        /// Name of the alarm.
        alarm_name: String,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Delete an SNS topic and its subscriptions.
    DeleteSnsTopic {
        /// ARN of the topic.
        topic_arn: String,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Delete a Lambda function.
    DeleteLambda {
        /// Name or ARN of the function.
        function_arn: String,
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, PartialEq)]
struct TargetArgs {
    /// AWS region the resource lives in.
    #[clap(long)]
    region: String,

    /// Named profile to take credentials from.
    #[clap(long, env = "AWS_PROFILE")]
    profile: Option<String>,

    /// Send requests to this endpoint instead of AWS, eg a local emulator.
    #[clap(long, env = "AWS_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    /// Only check that the resource exists, don't delete it.
    #[clap(long)]
    dry_run: bool,

    /// Exit successfully when the resource does not exist.
    #[clap(long)]
    ignore_missing: bool,
}

impl Command {
    fn into_parts(self) -> (DeletionRequest, TargetArgs) {
        let (kind, primary, secondary, target) = match self {
            Command::DeleteDeploymentGroup {
                application_name,
                deployment_group_name,
                target,
            } => (
                ResourceKind::DeploymentGroup,
                application_name,
                Some(deployment_group_name),
                target,
            ),
            Command::DeleteApplication {
                application_name,
                target,
            } => (ResourceKind::Application, application_name, None, target),
            Command::UnsubscribeSns {
                subscription_arn,
                target,
            } => (ResourceKind::SnsSubscription, subscription_arn, None, target),
            Command::DeleteCloudwatchAlarm { alarm_name, target } => {
                (ResourceKind::CloudWatchAlarm, alarm_name, None, target)
            }
            Command::DeleteSnsTopic { topic_arn, target } => {
                (ResourceKind::SnsTopic, topic_arn, None, target)
            }
            Command::DeleteLambda {
                function_arn,
                target,
            } => (ResourceKind::LambdaFunction, function_arn, None, target),
        };
        let request = DeletionRequest {
            kind,
            primary_id: primary,
            secondary_id: secondary,
            region: target.region.clone(),
        };
        (request, target)
    }
}

/// Renders the result as a colored line or as pretty JSON.
fn render(result: &DeletionResult, output: Output) -> anyhow::Result<String> {
    Ok(match output {
        Output::Json => serde_json::to_string_pretty(result)?,
        Output::Human => {
            let line = result.to_string();
            let line = match result.outcome {
                Outcome::Succeeded => line.green(),
                Outcome::Skipped => line.cyan(),
                Outcome::NotFound => line.yellow(),
                Outcome::Failed(_) => line.red(),
            };
            line.to_string()
        }
    })
}

/// Decides the exit status: failures are errors, and so are missing
/// resources unless `ignore_missing` is set.
fn finish(result: DeletionResult, ignore_missing: bool) -> anyhow::Result<()> {
    if ignore_missing && result.outcome == Outcome::NotFound {
        log::debug!("{} does not exist, ignoring", result.subject());
        return Ok(());
    }
    let _ = result.into_result()?;
    Ok(())
}

#[::tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli {
        verbosity,
        output,
        command,
    } = Cli::parse();

    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::default()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("teardown", level)
        .filter_module("teardown_cli", level)
        .init();

    let (request, target) = command.into_parts();
    log::info!("{} {}", request.kind.command(), request.primary_id);
    log::debug!("dry run: {}", target.dry_run);

    let config = Config::new(target.region)
        .with_profile(target.profile)
        .with_endpoint_url(target.endpoint_url);
    let aws = Aws::connect(&config).await;
    let orchestrator = Orchestrator::new(aws).with_apply(!target.dry_run);

    let result = orchestrator.delete(&request).await?;
    println!("{}", render(&result, output)?);
    finish(result, target.ignore_missing)
}

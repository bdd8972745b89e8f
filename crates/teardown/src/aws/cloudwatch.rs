//! AWS CloudWatch alarms.
use aws_sdk_cloudwatch::{types::AlarmType, Client};

use super::ProviderError;

/// Returns whether a metric or composite alarm by this name exists.
///
/// `DescribeAlarms` has no not-found error, an unknown name simply
/// matches nothing.
pub async fn alarm_exists(client: &Client, alarm_name: &str) -> Result<bool, ProviderError> {
    log::debug!("describing alarm {alarm_name}");
    let out = client
        .describe_alarms()
        .alarm_names(alarm_name)
        .alarm_types(AlarmType::MetricAlarm)
        .alarm_types(AlarmType::CompositeAlarm)
        .send()
        .await
        .map_err(ProviderError::from_sdk)?;
    log::trace!(
        "found {} metric and {} composite alarms",
        out.metric_alarms().len(),
        out.composite_alarms().len()
    );
    Ok(!out.metric_alarms().is_empty() || !out.composite_alarms().is_empty())
}

pub async fn delete_alarm(client: &Client, alarm_name: &str) -> Result<(), ProviderError> {
    let _ = client
        .delete_alarms()
        .alarm_names(alarm_name)
        .send()
        .await
        .map_err(ProviderError::from_sdk)?;
    Ok(())
}

//! AWS SNS subscriptions and topics.
use aws_sdk_sns::Client;

use super::ProviderError;

pub async fn subscription_exists(
    client: &Client,
    subscription_arn: &str,
) -> Result<bool, ProviderError> {
    log::debug!("getting attributes of subscription {subscription_arn}");
    match client
        .get_subscription_attributes()
        .subscription_arn(subscription_arn)
        .send()
        .await
    {
        Ok(_) => Ok(true),
        Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found_exception()) => {
            Ok(false)
        }
        Err(err) => Err(ProviderError::from_sdk(err)),
    }
}

pub async fn unsubscribe(client: &Client, subscription_arn: &str) -> Result<(), ProviderError> {
    let _ = client
        .unsubscribe()
        .subscription_arn(subscription_arn)
        .send()
        .await
        .map_err(ProviderError::from_sdk)?;
    Ok(())
}

pub async fn topic_exists(client: &Client, topic_arn: &str) -> Result<bool, ProviderError> {
    log::debug!("getting attributes of topic {topic_arn}");
    match client.get_topic_attributes().topic_arn(topic_arn).send().await {
        Ok(_) => Ok(true),
        Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found_exception()) => {
            Ok(false)
        }
        Err(err) => Err(ProviderError::from_sdk(err)),
    }
}

/// Deletes the topic along with all of its subscriptions.
pub async fn delete_topic(client: &Client, topic_arn: &str) -> Result<(), ProviderError> {
    let _ = client
        .delete_topic()
        .topic_arn(topic_arn)
        .send()
        .await
        .map_err(ProviderError::from_sdk)?;
    Ok(())
}

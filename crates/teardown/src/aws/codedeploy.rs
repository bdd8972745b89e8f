//! AWS CodeDeploy applications and deployment groups.
use aws_sdk_codedeploy::Client;

use super::ProviderError;

/// Returns whether the deployment group exists within the application.
///
/// A missing application counts as a missing deployment group.
pub async fn deployment_group_exists(
    client: &Client,
    application: &str,
    deployment_group: &str,
) -> Result<bool, ProviderError> {
    log::debug!("getting deployment group {deployment_group} of {application}");
    match client
        .get_deployment_group()
        .application_name(application)
        .deployment_group_name(deployment_group)
        .send()
        .await
    {
        Ok(_) => Ok(true),
        Err(err)
            if err.as_service_error().is_some_and(|e| {
                e.is_application_does_not_exist_exception()
                    || e.is_deployment_group_does_not_exist_exception()
            }) =>
        {
            Ok(false)
        }
        Err(err) => Err(ProviderError::from_sdk(err)),
    }
}

pub async fn delete_deployment_group(
    client: &Client,
    application: &str,
    deployment_group: &str,
) -> Result<(), ProviderError> {
    let out = client
        .delete_deployment_group()
        .application_name(application)
        .deployment_group_name(deployment_group)
        .send()
        .await
        .map_err(ProviderError::from_sdk)?;
    // Auto Scaling lifecycle hooks CodeDeploy could not remove stay behind
    // on the groups and have to be cleaned up by hand.
    for group in out.hooks_not_cleaned_up() {
        log::warn!(
            "lifecycle hook {} was not removed from auto scaling group {}",
            group.hook().unwrap_or("unknown"),
            group.name().unwrap_or("unknown")
        );
    }
    Ok(())
}

pub async fn application_exists(client: &Client, application: &str) -> Result<bool, ProviderError> {
    log::debug!("getting application {application}");
    match client
        .get_application()
        .application_name(application)
        .send()
        .await
    {
        Ok(_) => Ok(true),
        Err(err)
            if err
                .as_service_error()
                .is_some_and(|e| e.is_application_does_not_exist_exception()) =>
        {
            Ok(false)
        }
        Err(err) => Err(ProviderError::from_sdk(err)),
    }
}

pub async fn delete_application(client: &Client, application: &str) -> Result<(), ProviderError> {
    let _ = client
        .delete_application()
        .application_name(application)
        .send()
        .await
        .map_err(ProviderError::from_sdk)?;
    Ok(())
}

//! AWS Lambda functions.
use aws_sdk_lambda::Client;

use super::ProviderError;

/// Returns whether the function exists.
///
/// `function` may be a function name, a full ARN or a partial ARN.
pub async fn function_exists(client: &Client, function: &str) -> Result<bool, ProviderError> {
    log::debug!("getting function {function}");
    match client.get_function().function_name(function).send().await {
        Ok(_) => Ok(true),
        Err(err)
            if err
                .as_service_error()
                .is_some_and(|e| e.is_resource_not_found_exception()) =>
        {
            Ok(false)
        }
        Err(err) => Err(ProviderError::from_sdk(err)),
    }
}

pub async fn delete_function(client: &Client, function: &str) -> Result<(), ProviderError> {
    let _ = client
        .delete_function()
        .function_name(function)
        .send()
        .await
        .map_err(ProviderError::from_sdk)?;
    Ok(())
}

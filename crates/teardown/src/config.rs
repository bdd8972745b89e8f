//! Connection settings for the administration service.
use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Where and as whom to connect.
///
/// Credentials are always resolved by the SDK's default provider chain,
/// optionally narrowed to a named profile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub region: String,
    pub profile: Option<String>,
    /// Overrides every service endpoint, eg to point at a local emulator.
    pub endpoint_url: Option<String>,
}

impl Config {
    pub fn new(region: impl Into<String>) -> Self {
        Config {
            region: region.into(),
            ..Default::default()
        }
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_endpoint_url(mut self, endpoint_url: Option<String>) -> Self {
        self.endpoint_url = endpoint_url;
        self
    }

    /// Loads the SDK configuration, pinned to this region.
    pub async fn load(&self) -> SdkConfig {
        log::debug!("loading AWS configuration for {}", self.region);
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(self.region.clone()));
        if let Some(profile) = &self.profile {
            log::debug!("  using profile {profile}");
            loader = loader.profile_name(profile);
        }
        if let Some(url) = &self.endpoint_url {
            log::debug!("  using endpoint {url}");
            loader = loader.endpoint_url(url);
        }
        loader.load().await
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builder_keeps_optional_settings() {
        let config = Config::new("us-west-2")
            .with_profile(Some("ops".to_owned()))
            .with_endpoint_url(None);
        assert_eq!(
            Config {
                region: "us-west-2".to_owned(),
                profile: Some("ops".to_owned()),
                endpoint_url: None,
            },
            config
        );
    }

    #[tokio::test]
    async fn loaded_config_is_pinned_to_region() {
        let _ = env_logger::builder().is_test(true).try_init();
        let cfg = Config::new("ap-southeast-2")
            .with_endpoint_url(Some("http://localhost:4566".to_owned()))
            .load()
            .await;
        assert_eq!(Some("ap-southeast-2"), cfg.region().map(|r| r.as_ref()));
        assert_eq!(Some("http://localhost:4566"), cfg.endpoint_url());
    }
}

use crate::credentials::TemporaryCredentials;
use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Lade AWS SDK Config für die Region.
///
/// Ohne Credentials greift die Default-Chain (Env, Profile, Instance Role).
pub async fn load_sdk_config(
    region: &str,
    credentials: Option<TemporaryCredentials>,
) -> SdkConfig {
    let loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));

    match credentials {
        Some(credentials) => loader.credentials_provider(credentials.into_provider()).load().await,
        None => loader.load().await,
    }
}

use aws_config::{BehaviorVersion, ConfigLoader};
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;
use bytes::Bytes;
use tracing::debug;

use super::{FetchError, FetchErrorKind, ObjectStore};
use crate::config::StaticCredentials;

/// Reads objects from S3.
///
/// Credentials, region, retries and timeouts are whatever the AWS SDK
/// configuration provides.
#[derive(Clone)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// Builds a store from the ambient AWS configuration (env vars, profile,
    /// instance metadata), or from `credentials` when they are given.
    pub async fn connect(credentials: Option<&StaticCredentials>) -> Self {
        let config = config_loader(credentials).load().await;
        Self::new(aws_sdk_s3::Client::new(&config))
    }
}

/// SDK configuration loader: the default chain, or static credentials with an
/// optional fixed region.
pub fn config_loader(credentials: Option<&StaticCredentials>) -> ConfigLoader {
    let loader = aws_config::defaults(BehaviorVersion::latest());
    let Some(creds) = credentials else {
        return loader;
    };

    debug!(access_key_id = %creds.access_key_id, "Using static credentials");
    let provider = Credentials::new(
        &creds.access_key_id,
        &creds.secret_access_key,
        creds.session_token.clone(),
        None,
        "environment",
    );
    let loader = loader.credentials_provider(provider);
    match &creds.region {
        Some(region) => loader.region(Region::new(region.clone())),
        None => loader,
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3Store {
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, FetchError> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                FetchError::new(classify(&e), bucket, key, DisplayErrorContext(&e).to_string())
            })?;

        let data = output.body.collect().await.map_err(|e| {
            FetchError::new(FetchErrorKind::Transport, bucket, key, e.to_string())
        })?;

        Ok(data.into_bytes())
    }
}

fn classify(err: &SdkError<GetObjectError>) -> FetchErrorKind {
    match err {
        SdkError::ServiceError(service) => {
            if service.err().is_no_such_key() {
                return FetchErrorKind::NotFound;
            }
            FetchErrorKind::from_service(
                service.err().code(),
                Some(service.raw().status().as_u16()),
            )
        }
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) | SdkError::ResponseError(_) => {
            FetchErrorKind::Transport
        }
        _ => FetchErrorKind::Service,
    }
}

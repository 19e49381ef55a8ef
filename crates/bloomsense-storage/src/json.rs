use aws_sdk_s3::Client;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::objects;

const JSON: &str = "application/json";

/// Load and deserialize a JSON object from S3.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<T, StorageError> {
    let output = objects::get_object(client, bucket, key).await?;
    Ok(serde_json::from_slice(&output.body)?)
}

/// Serialize `value` and write it to a key that must not exist yet.
/// Returns the new ETag.
pub async fn put_json_if_absent<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    objects::put_object_if_absent(client, bucket, key, body, Some(JSON)).await
}

/// Serialize `value` and write it to `key`, replacing whatever is there.
pub async fn put_json<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    objects::put_object(client, bucket, key, body, Some(JSON)).await
}

use std::future::Future;

use aws_sdk_s3::Client;
use uuid::Uuid;

use bloomsense_core::keys;
use bloomsense_core::models::assessment::{AssessmentRecord, NewAssessment};
use bloomsense_storage::error::StorageError;
use bloomsense_storage::{json, objects};

use crate::error::SinkError;

/// Where scored assessments are written. The sink assigns the record id.
pub trait AssessmentSink: Send + Sync {
    fn insert_assessment(
        &self,
        assessment: &NewAssessment,
    ) -> impl Future<Output = Result<Uuid, SinkError>> + Send;
}

/// Stores each assessment as `assessments/{id}.json` in the bucket.
#[derive(Clone)]
pub struct S3AssessmentSink {
    client: Client,
    bucket: String,
}

impl S3AssessmentSink {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub async fn get_assessment(&self, id: Uuid) -> Result<AssessmentRecord, StorageError> {
        json::get_json(&self.client, &self.bucket, &keys::assessment(id)).await
    }

    /// Every readable stored assessment, oldest first. Objects that cannot
    /// be read or parsed are logged and left out.
    pub async fn list_assessments(&self) -> Result<Vec<AssessmentRecord>, StorageError> {
        let stored = objects::list_objects(&self.client, &self.bucket, keys::ASSESSMENTS_PREFIX).await?;

        let mut loaded = Vec::with_capacity(stored.len());
        for key in stored {
            let id = match keys::assessment_id(&key) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "skipping unexpected object");
                    continue;
                }
            };
            let record = self.get_assessment(id).await;
            loaded.push((key, record));
        }

        Ok(readable_assessments(loaded))
    }

    pub async fn list_patient_assessments(
        &self,
        patient_id: &str,
    ) -> Result<Vec<AssessmentRecord>, StorageError> {
        let mut records = self.list_assessments().await?;
        records.retain(|r| r.assessment.patient_id == patient_id);
        Ok(records)
    }
}

/// Keep the records that loaded, oldest first; warn about the rest.
pub fn readable_assessments(
    loaded: impl IntoIterator<Item = (String, Result<AssessmentRecord, StorageError>)>,
) -> Vec<AssessmentRecord> {
    let mut records: Vec<AssessmentRecord> = loaded
        .into_iter()
        .filter_map(|(key, record)| match record {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "skipping unreadable assessment");
                None
            }
        })
        .collect();

    records.sort_by_key(|r| r.created_at);
    records
}

impl AssessmentSink for S3AssessmentSink {
    async fn insert_assessment(&self, assessment: &NewAssessment) -> Result<Uuid, SinkError> {
        let record = AssessmentRecord {
            id: Uuid::new_v4(),
            assessment: assessment.clone(),
            created_at: jiff::Timestamp::now(),
        };

        let key = keys::assessment(record.id);
        json::put_json_if_absent(&self.client, &self.bucket, &key, &record).await?;
        Ok(record.id)
    }
}

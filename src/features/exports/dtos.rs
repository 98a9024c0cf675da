use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::exports::services::{ExportJob, ExportStatus};

/// One export job as returned by the API
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExportJobResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub status: ExportStatus,
    pub created_at: DateTime<Utc>,
}

impl From<ExportJob> for ExportJobResponse {
    fn from(job: ExportJob) -> Self {
        Self {
            id: job.id,
            status: job.status,
            created_at: job.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_flattened_into_the_response() {
        let response = ExportJobResponse {
            id: Uuid::new_v4(),
            status: ExportStatus::Succeeded { report_count: 3 },
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "succeeded");
        assert_eq!(json["report_count"], 3);
    }

    #[test]
    fn test_failed_status_carries_the_error() {
        let response = ExportJobResponse {
            id: Uuid::new_v4(),
            status: ExportStatus::Failed {
                error: "Export webhook returned HTTP 500".to_string(),
            },
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "Export webhook returned HTTP 500");
    }
}

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{HeatmapPoint, StatsResponse};
use crate::features::reports::models::{NewReport, Report, ReportKind};
use crate::shared::constants::{HEATMAP_SCAN_LIMIT, MAX_REPORT_LIMIT, STATS_SCAN_LIMIT};

/// Column list for the `reports` table
const COLUMNS: &str = "id, user_id, report_type, analysis, image_url, \
    latitude, longitude, location_accuracy, location_is_default, created_at";

/// Service for report persistence.
///
/// Every read and write is scoped to one user; rows belonging to anyone else
/// are invisible to the caller.
pub struct ReportService {
    pool: PgPool,
}

impl ReportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a report row. The id is a fresh UUIDv7, `created_at` is
    /// stamped by the database, `user_id` by the caller's session.
    pub async fn save(&self, data: NewReport) -> Result<Report> {
        let query = format!(
            "INSERT INTO reports \
                (id, user_id, report_type, analysis, image_url, \
                 latitude, longitude, location_accuracy, location_is_default) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );

        let report = sqlx::query_as::<_, Report>(&query)
            .bind(Uuid::now_v7())
            .bind(&data.user_id)
            .bind(data.analysis.kind())
            .bind(Json(&data.analysis))
            .bind(&data.image_url)
            .bind(data.latitude)
            .bind(data.longitude)
            .bind(data.location_accuracy)
            .bind(data.location_is_default)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to save report: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!(
            "Saved {} report {} for user {}",
            report.report_type,
            report.id,
            report.user_id
        );

        Ok(report)
    }

    /// The caller's reports, newest first, optionally filtered by kind
    pub async fn list(
        &self,
        user_id: &str,
        limit: i64,
        kind: Option<ReportKind>,
    ) -> Result<Vec<Report>> {
        let limit = limit.clamp(1, MAX_REPORT_LIMIT);

        let result = match kind {
            Some(kind) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM reports \
                     WHERE user_id = $1 AND report_type = $2 \
                     ORDER BY created_at DESC LIMIT $3"
                );
                sqlx::query_as::<_, Report>(&query)
                    .bind(user_id)
                    .bind(kind)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM reports \
                     WHERE user_id = $1 \
                     ORDER BY created_at DESC LIMIT $2"
                );
                sqlx::query_as::<_, Report>(&query)
                    .bind(user_id)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await
            }
        };

        result.map_err(|e| {
            tracing::error!("Failed to list reports: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Delete one of the caller's reports. Rows owned by other users look
    /// like a missing row.
    pub async fn delete(&self, user_id: &str, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete report {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Report {} not found", id)));
        }

        tracing::info!("Deleted report {} for user {}", id, user_id);
        Ok(())
    }

    /// Map projection of the caller's recent located reports
    pub async fn heatmap(&self, user_id: &str) -> Result<Vec<HeatmapPoint>> {
        let reports = self.list(user_id, HEATMAP_SCAN_LIMIT, None).await?;
        Ok(reports.iter().filter_map(HeatmapPoint::from_report).collect())
    }

    /// Summary statistics over the caller's recent reports
    pub async fn stats(&self, user_id: &str) -> Result<StatsResponse> {
        let reports = self.list(user_id, STATS_SCAN_LIMIT, None).await?;
        Ok(StatsResponse::from_reports(&reports))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use fake::{Fake, Faker};
    use sqlx::types::Json;
    use uuid::Uuid;

    use crate::features::reports::dtos::{HeatmapPoint, StatsResponse};
    use crate::features::reports::models::{
        Report, ReportAnalysis, ReportKind, StreetAnalysis, WasteAnalysis,
    };
    use crate::shared::constants::HEATMAP_DEFAULT_SCORE;

    fn waste_report(latitude: Option<f64>, longitude: Option<f64>) -> Report {
        let analysis = WasteAnalysis {
            category: "Plastic".to_string(),
            confidence: 90,
            ..Default::default()
        };

        Report {
            id: Uuid::new_v4(),
            user_id: Faker.fake(),
            report_type: ReportKind::Waste,
            analysis: Json(ReportAnalysis::Waste(analysis)),
            image_url: "http://cdn.example.com/waste-images/waste/1_a.jpg".to_string(),
            latitude,
            longitude,
            location_accuracy: None,
            location_is_default: false,
            created_at: Utc::now(),
        }
    }

    fn street_report(score: i32) -> Report {
        let analysis = StreetAnalysis {
            cleanliness_score: score,
            status: "moderate".to_string(),
            ..Default::default()
        };

        Report {
            id: Uuid::new_v4(),
            user_id: Faker.fake(),
            report_type: ReportKind::Street,
            analysis: Json(ReportAnalysis::Street(analysis)),
            image_url: "http://cdn.example.com/waste-images/street/2_b.jpg".to_string(),
            latitude: Some(28.7041),
            longitude: Some(77.1025),
            location_accuracy: Some(20.0),
            location_is_default: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_heatmap_skips_reports_without_location() {
        let located = waste_report(Some(28.70), Some(77.10));
        let missing_lat = waste_report(None, Some(77.10));
        let missing_both = waste_report(None, None);

        assert!(HeatmapPoint::from_report(&located).is_some());
        assert!(HeatmapPoint::from_report(&missing_lat).is_none());
        assert!(HeatmapPoint::from_report(&missing_both).is_none());
    }

    #[test]
    fn test_heatmap_defaults_score_for_waste_reports() {
        let report = waste_report(Some(28.70), Some(77.10));
        let point = HeatmapPoint::from_report(&report).unwrap();
        assert_eq!(point.score, HEATMAP_DEFAULT_SCORE);
        assert_eq!(point.report_type, ReportKind::Waste);
    }

    #[test]
    fn test_heatmap_keeps_street_scores_even_zero() {
        let point = HeatmapPoint::from_report(&street_report(0)).unwrap();
        assert_eq!(point.score, 0);

        let point = HeatmapPoint::from_report(&street_report(85)).unwrap();
        assert_eq!(point.score, 85);
        assert_eq!(point.color.hex, "#10b981");
    }

    #[test]
    fn test_stats_counts_by_kind() {
        let reports = vec![
            waste_report(Some(1.0), Some(2.0)),
            waste_report(None, None),
            street_report(80),
            street_report(61),
        ];
        let stats = StatsResponse::from_reports(&reports);
        assert_eq!(stats.total_reports, 4);
        assert_eq!(stats.waste_reports, 2);
        assert_eq!(stats.street_reports, 2);
    }

    #[test]
    fn test_stats_average_is_rounded_over_street_scores_only() {
        let reports = vec![
            waste_report(None, None),
            street_report(80),
            street_report(61),
        ];
        // (80 + 61) / 2 = 70.5, rounds to 71
        let stats = StatsResponse::from_reports(&reports);
        assert_eq!(stats.avg_score, 71);
    }

    #[test]
    fn test_stats_average_includes_zero_scores() {
        let reports = vec![street_report(0), street_report(100)];
        let stats = StatsResponse::from_reports(&reports);
        assert_eq!(stats.avg_score, 50);
    }

    #[test]
    fn test_stats_average_is_zero_without_street_reports() {
        let reports = vec![waste_report(None, None)];
        let stats = StatsResponse::from_reports(&reports);
        assert_eq!(stats.avg_score, 0);

        let empty: Vec<Report> = Vec::new();
        assert_eq!(StatsResponse::from_reports(&empty).avg_score, 0);
    }
}

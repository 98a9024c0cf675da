use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::{Report, ReportAnalysis, ReportKind};
use crate::shared::constants::{DEFAULT_REPORT_LIMIT, HEATMAP_DEFAULT_SCORE};
use crate::shared::presentation::{
    score_color, waste_category_color, waste_icon, CategoryColor, ScoreColor,
};

/// Multipart form accepted by the submission endpoints.
///
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct SubmitReportForm {
    /// The report photo (JPEG, PNG or WebP, at most 10 MiB)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: String,
    /// Latitude supplied by the client; when present the server skips its
    /// own position resolution
    #[schema(example = 28.7041)]
    pub latitude: Option<f64>,
    /// Longitude supplied by the client
    #[schema(example = 77.1025)]
    pub longitude: Option<f64>,
    /// Reported accuracy of the client-supplied coordinates, in meters
    #[schema(example = 15.0)]
    pub accuracy: Option<f64>,
}

/// Query params for listing reports
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct ListReportsQuery {
    /// Maximum rows returned, newest first
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000, message = "Limit must be between 1 and 1000"))]
    #[param(minimum = 1, maximum = 1000)]
    pub limit: i64,
    /// Filter by report kind
    #[serde(default, rename = "type")]
    pub kind: Option<ReportKind>,
}

fn default_limit() -> i64 {
    DEFAULT_REPORT_LIMIT
}

impl Default for ListReportsQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_REPORT_LIMIT,
            kind: None,
        }
    }
}

/// Location stored with a report
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LocationResponse {
    pub latitude: f64,
    pub longitude: f64,
    /// Accuracy in meters when the position was resolved, if reported
    pub accuracy: Option<f64>,
    /// Whether this is the fallback coordinate rather than a real fix
    pub is_default: bool,
}

/// Display derivations for a report's analysis, precomputed so clients
/// render without duplicating the bucketing tables
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportPresentation {
    /// Category color tokens (waste reports)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_color: Option<CategoryColor>,
    /// Category icon (waste reports)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_icon: Option<&'static str>,
    /// Score band color tokens (street reports)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_color: Option<ScoreColor>,
}

impl ReportPresentation {
    pub fn for_analysis(analysis: &ReportAnalysis) -> Self {
        match analysis {
            ReportAnalysis::Waste(waste) => Self {
                category_color: Some(waste_category_color(&waste.category)),
                category_icon: Some(waste_icon(&waste.category)),
                score_color: None,
            },
            ReportAnalysis::Street(street) => Self {
                category_color: None,
                category_icon: None,
                score_color: Some(score_color(street.cleanliness_score)),
            },
        }
    }
}

/// Response DTO for a report
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub report_type: ReportKind,
    pub analysis: ReportAnalysis,
    pub image_url: String,
    pub location: Option<LocationResponse>,
    pub presentation: ReportPresentation,
    pub created_at: DateTime<Utc>,
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        let analysis = report.analysis.0;
        let presentation = ReportPresentation::for_analysis(&analysis);
        let location = match (report.latitude, report.longitude) {
            (Some(latitude), Some(longitude)) => Some(LocationResponse {
                latitude,
                longitude,
                accuracy: report.location_accuracy,
                is_default: report.location_is_default,
            }),
            _ => None,
        };

        Self {
            id: report.id,
            report_type: report.report_type,
            analysis,
            image_url: report.image_url,
            location,
            presentation,
            created_at: report.created_at,
        }
    }
}

/// One pin on the report heatmap
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HeatmapPoint {
    pub id: Uuid,
    pub lat: f64,
    pub lng: f64,
    /// Cleanliness score, defaulting to 50 for reports without one
    pub score: i32,
    #[serde(rename = "type")]
    pub report_type: ReportKind,
    pub timestamp: DateTime<Utc>,
    /// Pin color derived from the score bands
    pub color: ScoreColor,
}

impl HeatmapPoint {
    /// Project a report onto the map, or nothing when it has no location
    pub fn from_report(report: &Report) -> Option<Self> {
        let (lat, lng) = match (report.latitude, report.longitude) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => return None,
        };
        let score = report
            .analysis
            .cleanliness_score()
            .unwrap_or(HEATMAP_DEFAULT_SCORE);

        Some(Self {
            id: report.id,
            lat,
            lng,
            score,
            report_type: report.report_type,
            timestamp: report.created_at,
            color: score_color(score),
        })
    }
}

/// Aggregate statistics over the caller's reports
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatsResponse {
    pub total_reports: i64,
    pub waste_reports: i64,
    pub street_reports: i64,
    /// Rounded mean cleanliness score over street reports, 0 when there are
    /// none
    pub avg_score: i32,
}

impl StatsResponse {
    /// Fold a report listing into summary counts
    pub fn from_reports(reports: &[Report]) -> Self {
        let total_reports = reports.len() as i64;
        let waste_reports = reports
            .iter()
            .filter(|r| r.report_type == ReportKind::Waste)
            .count() as i64;
        let street_reports = total_reports - waste_reports;

        let street_scores: Vec<i32> = reports
            .iter()
            .filter_map(|r| r.analysis.cleanliness_score())
            .collect();
        let avg_score = if street_scores.is_empty() {
            0
        } else {
            let sum: i64 = street_scores.iter().map(|&s| s as i64).sum();
            (sum as f64 / street_scores.len() as f64).round() as i32
        };

        Self {
            total_reports,
            waste_reports,
            street_reports,
            avg_score,
        }
    }
}

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::llm::{default_true, LlmResponse};

/// Report kind enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Waste,
    Street,
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Waste => write!(f, "waste"),
            ReportKind::Street => write!(f, "street"),
        }
    }
}

/// Model output for a waste classification.
///
/// Parsed leniently: every field the model omits takes the type default and
/// `normalize` fills in the user-facing guidance strings. The struct-level
/// `Default` is the distinct "unanalyzable" payload used when parsing fails
/// outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, ToSchema)]
pub struct WasteAnalysis {
    /// One of: Plastic, Paper, Organic, Metal, Glass, Electronic, Hazardous, Other
    #[serde(default)]
    pub category: String,
    /// Confidence percentage, 0-100
    #[serde(default)]
    pub confidence: i32,
    /// Individual items recognized in the image
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub recyclable: bool,
    /// How to dispose of this waste properly
    #[serde(default)]
    pub disposal_method: String,
    /// Environmental impact of improper disposal
    #[serde(default)]
    pub environmental_impact: String,

    #[serde(default = "default_true", skip_serializing)]
    #[schemars(skip)]
    pub is_llm_success: bool,
    #[serde(default, skip_serializing)]
    #[schemars(skip)]
    pub llm_error_message: Option<String>,
}

impl WasteAnalysis {
    /// Fill the blanks a lenient parse leaves behind so downstream consumers
    /// always see a category and guidance text.
    pub fn normalize(&mut self) {
        if self.category.is_empty() {
            self.category = "Unknown".to_string();
        }
        self.confidence = self.confidence.clamp(0, 100);
        if self.disposal_method.is_empty() {
            self.disposal_method = "Please consult local waste management guidelines.".to_string();
        }
        if self.environmental_impact.is_empty() {
            self.environmental_impact = "Improper disposal can harm the environment.".to_string();
        }
    }
}

impl Default for WasteAnalysis {
    fn default() -> Self {
        Self {
            category: "Unknown".to_string(),
            confidence: 0,
            items: Vec::new(),
            recyclable: false,
            disposal_method: "Unable to analyze. Please check local waste guidelines.".to_string(),
            environmental_impact: "Unable to determine environmental impact.".to_string(),
            is_llm_success: true,
            llm_error_message: None,
        }
    }
}

impl LlmResponse for WasteAnalysis {
    fn mark_as_fallback(&mut self, error_message: String) {
        self.is_llm_success = false;
        self.llm_error_message = Some(error_message);
    }

    fn is_success(&self) -> bool {
        self.is_llm_success
    }
}

/// Model output for a street cleanliness analysis.
///
/// Same parsing contract as [`WasteAnalysis`]: lenient field defaults, a
/// `normalize` pass for the success path and a struct-level `Default`
/// carrying the "unanalyzable" payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, ToSchema)]
pub struct StreetAnalysis {
    /// Cleanliness score, 0-100
    #[serde(default, alias = "cleanlinessScore")]
    pub cleanliness_score: i32,
    /// One of: clean, moderate, dirty, very_dirty
    #[serde(default)]
    pub status: String,
    /// Number of visible litter items
    #[serde(default)]
    pub litter_count: i32,
    /// Kinds of litter present
    #[serde(default)]
    pub litter_types: Vec<String>,
    /// Observed cleanliness issues
    #[serde(default)]
    pub issues: Vec<String>,
    /// Suggested improvements
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Severity of the situation; falls back to `status` when omitted
    #[serde(default)]
    pub severity: String,

    #[serde(default = "default_true", skip_serializing)]
    #[schemars(skip)]
    pub is_llm_success: bool,
    #[serde(default, skip_serializing)]
    #[schemars(skip)]
    pub llm_error_message: Option<String>,
}

impl StreetAnalysis {
    pub fn normalize(&mut self) {
        self.cleanliness_score = self.cleanliness_score.clamp(0, 100);
        if self.status.is_empty() {
            self.status = "unknown".to_string();
        }
        if self.severity.is_empty() {
            self.severity = self.status.clone();
        }
    }
}

impl Default for StreetAnalysis {
    fn default() -> Self {
        Self {
            cleanliness_score: 0,
            status: "unknown".to_string(),
            litter_count: 0,
            litter_types: Vec::new(),
            issues: vec!["Unable to analyze image".to_string()],
            recommendations: Vec::new(),
            severity: "unknown".to_string(),
            is_llm_success: true,
            llm_error_message: None,
        }
    }
}

impl LlmResponse for StreetAnalysis {
    fn mark_as_fallback(&mut self, error_message: String) {
        self.is_llm_success = false;
        self.llm_error_message = Some(error_message);
    }

    fn is_success(&self) -> bool {
        self.is_llm_success
    }
}

/// Kind-specific analysis payload stored with each report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReportAnalysis {
    Waste(WasteAnalysis),
    Street(StreetAnalysis),
}

impl ReportAnalysis {
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportAnalysis::Waste(_) => ReportKind::Waste,
            ReportAnalysis::Street(_) => ReportKind::Street,
        }
    }

    /// Cleanliness score where one applies (street reports only)
    pub fn cleanliness_score(&self) -> Option<i32> {
        match self {
            ReportAnalysis::Waste(_) => None,
            ReportAnalysis::Street(street) => Some(street.cleanliness_score),
        }
    }

    /// Whether the payload came from a successful model parse
    pub fn is_success(&self) -> bool {
        match self {
            ReportAnalysis::Waste(waste) => waste.is_llm_success,
            ReportAnalysis::Street(street) => street.is_llm_success,
        }
    }

    /// The parse or request error behind a fallback payload
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ReportAnalysis::Waste(waste) => waste.llm_error_message.as_deref(),
            ReportAnalysis::Street(street) => street.llm_error_message.as_deref(),
        }
    }
}

/// Database model for a report row
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub user_id: String,
    pub report_type: ReportKind,
    pub analysis: Json<ReportAnalysis>,
    pub image_url: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_accuracy: Option<f64>,
    pub location_is_default: bool,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new report row.
///
/// The id (a UUIDv7) and `created_at` are assigned at insert; `user_id`
/// always comes from the session, never from client input.
#[derive(Debug)]
pub struct NewReport {
    pub user_id: String,
    pub analysis: ReportAnalysis,
    pub image_url: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_accuracy: Option<f64>,
    pub location_is_default: bool,
}

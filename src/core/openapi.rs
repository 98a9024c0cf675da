use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::exports::{
    dtos as exports_dtos, handlers as exports_handlers, services as exports_services,
};
use crate::features::location::{dtos as location_dtos, handlers as location_handlers};
use crate::features::location::services as location_services;
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::shared::presentation::{CategoryColor, ScoreColor};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::get_me,
        // Reports
        reports_handlers::submit_waste_report,
        reports_handlers::submit_street_report,
        reports_handlers::list_reports,
        reports_handlers::get_heatmap,
        reports_handlers::get_stats,
        reports_handlers::delete_report,
        // Location
        location_handlers::get_address,
        location_handlers::get_position,
        // Exports
        exports_handlers::create_export,
        exports_handlers::get_export,
    ),
    components(
        schemas(
            // Shared
            Meta,
            ScoreColor,
            CategoryColor,
            // Auth
            auth::model::AuthenticatedUser,
            ApiResponse<auth::model::AuthenticatedUser>,
            // Reports
            reports_models::ReportKind,
            reports_models::WasteAnalysis,
            reports_models::StreetAnalysis,
            reports_models::ReportAnalysis,
            reports_dtos::SubmitReportForm,
            reports_dtos::LocationResponse,
            reports_dtos::ReportPresentation,
            reports_dtos::ReportResponse,
            reports_dtos::HeatmapPoint,
            reports_dtos::StatsResponse,
            ApiResponse<reports_dtos::ReportResponse>,
            ApiResponse<Vec<reports_dtos::ReportResponse>>,
            ApiResponse<Vec<reports_dtos::HeatmapPoint>>,
            ApiResponse<reports_dtos::StatsResponse>,
            // Location
            location_dtos::AddressResponse,
            location_dtos::PositionMode,
            location_services::ResolvedLocation,
            ApiResponse<location_dtos::AddressResponse>,
            ApiResponse<location_services::ResolvedLocation>,
            // Exports
            exports_services::ExportStatus,
            exports_dtos::ExportJobResponse,
            ApiResponse<exports_dtos::ExportJobResponse>,
        )
    ),
    tags(
        (name = "auth", description = "Session context endpoints"),
        (name = "reports", description = "Waste and street report submission and retrieval"),
        (name = "location", description = "Position resolution and reverse geocoding"),
        (name = "exports", description = "Spreadsheet export jobs"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "CleanCity API",
        version = "0.1.0",
        description = "API documentation for CleanCity",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

//! Display mappings derived from stored report fields.
//!
//! These are total functions: any score and any category string, including
//! unknown values, map to a defined token set. They are embedded in response
//! DTOs so every client colors scores and categories the same way.

use serde::Serialize;
use utoipa::ToSchema;

/// Color tokens for one score band (utility classes plus the raw hex used by
/// map markers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ScoreColor {
    pub text: &'static str,
    pub bg: &'static str,
    pub border: &'static str,
    pub hex: &'static str,
}

/// Color tokens for a waste category badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CategoryColor {
    pub bg: &'static str,
    pub text: &'static str,
    pub border: &'static str,
}

/// Buckets a 0-100 score into one of five fixed bands. Boundary values (20,
/// 40, 60, 80) resolve to the higher band; out-of-range input clamps into the
/// outer bands.
pub fn score_color(score: i32) -> ScoreColor {
    if score >= 80 {
        ScoreColor {
            text: "text-green-600",
            bg: "bg-green-100",
            border: "border-green-500",
            hex: "#10b981",
        }
    } else if score >= 60 {
        ScoreColor {
            text: "text-blue-600",
            bg: "bg-blue-100",
            border: "border-blue-500",
            hex: "#3b82f6",
        }
    } else if score >= 40 {
        ScoreColor {
            text: "text-yellow-600",
            bg: "bg-yellow-100",
            border: "border-yellow-500",
            hex: "#f59e0b",
        }
    } else if score >= 20 {
        ScoreColor {
            text: "text-orange-600",
            bg: "bg-orange-100",
            border: "border-orange-500",
            hex: "#f97316",
        }
    } else {
        ScoreColor {
            text: "text-red-600",
            bg: "bg-red-100",
            border: "border-red-500",
            hex: "#ef4444",
        }
    }
}

/// Badge colors keyed by the classification prompt's category set. Unknown
/// categories get the neutral gray entry.
pub fn waste_category_color(category: &str) -> CategoryColor {
    match category {
        "Plastic" => CategoryColor {
            bg: "bg-blue-100",
            text: "text-blue-700",
            border: "border-blue-500",
        },
        "Paper" => CategoryColor {
            bg: "bg-amber-100",
            text: "text-amber-700",
            border: "border-amber-500",
        },
        "Organic" => CategoryColor {
            bg: "bg-green-100",
            text: "text-green-700",
            border: "border-green-500",
        },
        "Metal" => CategoryColor {
            bg: "bg-gray-100",
            text: "text-gray-700",
            border: "border-gray-500",
        },
        "Glass" => CategoryColor {
            bg: "bg-cyan-100",
            text: "text-cyan-700",
            border: "border-cyan-500",
        },
        "Electronic" => CategoryColor {
            bg: "bg-purple-100",
            text: "text-purple-700",
            border: "border-purple-500",
        },
        "Hazardous" => CategoryColor {
            bg: "bg-red-100",
            text: "text-red-700",
            border: "border-red-500",
        },
        "Other" => CategoryColor {
            bg: "bg-indigo-100",
            text: "text-indigo-700",
            border: "border-indigo-500",
        },
        _ => CategoryColor {
            bg: "bg-gray-100",
            text: "text-gray-700",
            border: "border-gray-500",
        },
    }
}

/// Icon keyed by the classification prompt's category set, with a neutral
/// fallback for unknown categories.
pub fn waste_icon(category: &str) -> &'static str {
    match category {
        "Plastic" => "🥤",
        "Paper" => "📄",
        "Organic" => "🍎",
        "Metal" => "🔧",
        "Glass" => "🍾",
        "Electronic" => "💻",
        "Hazardous" => "☢️",
        "Other" => "🗑️",
        _ => "🗑️",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bands_are_contiguous_and_exhaustive() {
        let mut seen = Vec::new();
        let mut last_hex = "";
        for score in 0..=100 {
            let band = score_color(score);
            if band.hex != last_hex {
                seen.push((score, band.hex));
                last_hex = band.hex;
            }
        }
        // Exactly five bands, switching at the documented boundaries
        assert_eq!(
            seen,
            vec![
                (0, "#ef4444"),
                (20, "#f97316"),
                (40, "#f59e0b"),
                (60, "#3b82f6"),
                (80, "#10b981"),
            ]
        );
    }

    #[test]
    fn test_boundary_scores_resolve_to_higher_band() {
        assert_eq!(score_color(20).hex, "#f97316");
        assert_eq!(score_color(40).hex, "#f59e0b");
        assert_eq!(score_color(60).hex, "#3b82f6");
        assert_eq!(score_color(80).hex, "#10b981");
    }

    #[test]
    fn test_out_of_range_scores_clamp_to_outer_bands() {
        assert_eq!(score_color(-5).hex, "#ef4444");
        assert_eq!(score_color(250).hex, "#10b981");
    }

    #[test]
    fn test_known_categories_have_distinct_colors() {
        let known = [
            "Plastic",
            "Paper",
            "Organic",
            "Metal",
            "Glass",
            "Electronic",
            "Hazardous",
            "Other",
        ];
        for category in known {
            // Every known category resolves without panicking
            let _ = waste_category_color(category);
            let _ = waste_icon(category);
        }
        assert_ne!(
            waste_category_color("Plastic"),
            waste_category_color("Hazardous")
        );
    }

    #[test]
    fn test_unknown_category_gets_neutral_fallback() {
        let fallback = waste_category_color("definitely-not-a-category");
        assert_eq!(fallback.bg, "bg-gray-100");
        assert_eq!(waste_icon("definitely-not-a-category"), "🗑️");
        assert_eq!(waste_icon(""), "🗑️");
    }

    #[test]
    fn test_metal_shares_fallback_colors_but_not_icon() {
        // Metal legitimately uses the gray palette; the icon tells it apart
        assert_eq!(waste_category_color("Metal").bg, "bg-gray-100");
        assert_eq!(waste_icon("Metal"), "🔧");
    }
}

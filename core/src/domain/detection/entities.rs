use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Class label used when the upstream record carries no `class`.
pub const UNKNOWN_CLASS: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One detection in canonical form, whatever shape the upstream used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DetectionRecord {
    pub class: String,
    pub confidence: Option<f64>,
    pub bounding_box: Option<BoundingBox>,
    pub detection_id: Option<String>,
}

impl DetectionRecord {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            confidence: None,
            bounding_box: None,
            detection_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedDetectionOutput {
    /// Base64 of the upstream-rendered image, when one was returned.
    pub annotated_image: Option<String>,
    pub predictions: Vec<DetectionRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClassDetail {
    #[schema(example = "apple")]
    pub class: String,
    #[schema(example = 2)]
    pub count: usize,
}

/// Compatibility field kept for older clients: a sentence when a single class
/// was detected, a breakdown otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum LegacyResult {
    Summary(String),
    Breakdown {
        ingredients: usize,
        details: Vec<ClassDetail>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionSummary {
    pub detected_ingredients: Vec<String>,
    pub ingredients: usize,
    pub details: Vec<ClassDetail>,
    pub result: LegacyResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DetectionResult {
    #[schema(example = "https://example.com/processed/processed_20250101120000000000_1a2b3c4d_meal.jpg")]
    pub processed_image_url: String,
    /// Distinct classes, sorted ascending.
    pub detected_ingredients: Vec<String>,
    /// Total number of detections.
    pub ingredients: usize,
    pub details: Vec<ClassDetail>,
    pub result: LegacyResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_image_base64: Option<String>,
}

impl DetectionResult {
    pub fn new(
        processed_image_url: String,
        summary: DetectionSummary,
        processed_image_base64: Option<String>,
    ) -> Self {
        Self {
            processed_image_url,
            detected_ingredients: summary.detected_ingredients,
            ingredients: summary.ingredients,
            details: summary.details,
            result: summary.result,
            processed_image_base64,
        }
    }
}

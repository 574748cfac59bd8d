use serde::Deserialize;
use serde_json::Value;

use crate::domain::{
    common::entities::app_errors::CoreError,
    detection::entities::{
        BoundingBox, DetectionRecord, NormalizedDetectionOutput, UNKNOWN_CLASS,
    },
};

/// `output_image` as the workflow has been seen to return it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OutputImage {
    Bare(String),
    Wrapped { value: Option<String> },
    Unrecognized(Value),
}

impl OutputImage {
    fn into_base64(self) -> Option<String> {
        let encoded = match self {
            OutputImage::Bare(encoded) => encoded,
            OutputImage::Wrapped { value } => value?,
            OutputImage::Unrecognized(other) => {
                tracing::debug!(shape = %json_kind(&other), "ignoring unrecognized output_image");
                return None;
            }
        };

        let trimmed = encoded.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// `predictions` as the workflow has been seen to return it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictionsBlock {
    Bare(Vec<Value>),
    Nested { predictions: Option<Vec<Value>> },
    Unrecognized(Value),
}

impl PredictionsBlock {
    fn into_entries(self) -> Vec<Value> {
        match self {
            PredictionsBlock::Bare(entries) => entries,
            PredictionsBlock::Nested { predictions } => predictions.unwrap_or_default(),
            PredictionsBlock::Unrecognized(other) => {
                tracing::debug!(shape = %json_kind(&other), "ignoring unrecognized predictions block");
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct WorkflowOutput {
    #[serde(default)]
    output_image: Option<OutputImage>,
    #[serde(default)]
    predictions: Option<PredictionsBlock>,
}

/// Maps any observed workflow response into [`NormalizedDetectionOutput`].
///
/// Only the first entry of `outputs` is read. The call fails when `outputs`
/// is missing, is not a list, is empty, or its first entry is not an object.
/// Every other irregularity degrades to "no image" or "no predictions".
pub fn normalize_workflow_response(raw: &Value) -> Result<NormalizedDetectionOutput, CoreError> {
    let outputs = raw
        .get("outputs")
        .and_then(Value::as_array)
        .ok_or_else(|| CoreError::MalformedUpstreamResponse("outputs missing".to_string()))?;

    let first = outputs
        .first()
        .ok_or_else(|| CoreError::MalformedUpstreamResponse("outputs missing".to_string()))?;

    if !first.is_object() {
        return Err(CoreError::MalformedUpstreamResponse(format!(
            "first output is {}, expected an object",
            json_kind(first)
        )));
    }

    let output: WorkflowOutput = serde_json::from_value(first.clone())
        .map_err(|e| CoreError::MalformedUpstreamResponse(e.to_string()))?;

    let annotated_image = output.output_image.and_then(OutputImage::into_base64);
    let predictions = output
        .predictions
        .map(PredictionsBlock::into_entries)
        .unwrap_or_default()
        .iter()
        .filter_map(to_record)
        .collect();

    Ok(NormalizedDetectionOutput {
        annotated_image,
        predictions,
    })
}

fn to_record(entry: &Value) -> Option<DetectionRecord> {
    let object = entry.as_object()?;

    let class = match object.get("class") {
        None | Some(Value::Null) => UNKNOWN_CLASS.to_string(),
        Some(Value::String(class)) => class.clone(),
        Some(other) => other.to_string(),
    };

    let number = |key: &str| object.get(key).and_then(Value::as_f64);
    let bounding_box = match (number("x"), number("y"), number("width"), number("height")) {
        (Some(x), Some(y), Some(width), Some(height)) => Some(BoundingBox {
            x,
            y,
            width,
            height,
        }),
        _ => None,
    };

    Some(DetectionRecord {
        class,
        confidence: number("confidence"),
        bounding_box,
        detection_id: object
            .get("detection_id")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn classes(output: &NormalizedDetectionOutput) -> Vec<&str> {
        output.predictions.iter().map(|p| p.class.as_str()).collect()
    }

    #[test]
    fn test_missing_or_empty_outputs_is_malformed() {
        for raw in [
            json!({}),
            json!({ "outputs": [] }),
            json!({ "outputs": "nope" }),
            json!({ "outputs": { "predictions": [] } }),
            json!({ "outputs": [42] }),
            json!([]),
        ] {
            let err = normalize_workflow_response(&raw).unwrap_err();
            assert!(
                matches!(err, CoreError::MalformedUpstreamResponse(_)),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_wrapped_image_and_nested_predictions() {
        let raw = json!({
            "outputs": [{
                "output_image": { "type": "base64", "value": "aGVsbG8=" },
                "predictions": {
                    "image": { "width": 640, "height": 480 },
                    "predictions": [
                        { "class": "apple", "confidence": 0.91, "x": 10.0, "y": 20.0, "width": 30.0, "height": 40.0, "detection_id": "d-1" },
                        { "class": "banana", "confidence": 0.5 }
                    ]
                }
            }]
        });

        let output = normalize_workflow_response(&raw).unwrap();
        assert_eq!(output.annotated_image.as_deref(), Some("aGVsbG8="));
        assert_eq!(classes(&output), vec!["apple", "banana"]);

        let apple = &output.predictions[0];
        assert_eq!(apple.confidence, Some(0.91));
        assert_eq!(apple.detection_id.as_deref(), Some("d-1"));
        assert_eq!(
            apple.bounding_box,
            Some(BoundingBox {
                x: 10.0,
                y: 20.0,
                width: 30.0,
                height: 40.0
            })
        );
        assert_eq!(output.predictions[1].bounding_box, None);
    }

    #[test]
    fn test_bare_image_string_and_bare_prediction_list() {
        let raw = json!({
            "outputs": [{
                "output_image": "  aGVsbG8=\n",
                "predictions": [{ "class": "egg" }]
            }]
        });

        let output = normalize_workflow_response(&raw).unwrap();
        assert_eq!(output.annotated_image.as_deref(), Some("aGVsbG8="));
        assert_eq!(classes(&output), vec!["egg"]);
    }

    #[test]
    fn test_absent_or_odd_fields_degrade_to_empty() {
        let cases = [
            json!({ "outputs": [{}] }),
            json!({ "outputs": [{ "output_image": "", "predictions": null }] }),
            json!({ "outputs": [{ "output_image": "   ", "predictions": "many" }] }),
            json!({ "outputs": [{ "output_image": { "value": null }, "predictions": {} }] }),
            json!({ "outputs": [{ "output_image": { "value": 12 }, "predictions": { "predictions": "x" } }] }),
            json!({ "outputs": [{ "output_image": 7, "predictions": 3 }] }),
            json!({ "outputs": [{ "output_image": [], "predictions": { "predictions": null } }] }),
        ];

        for raw in cases {
            let output = normalize_workflow_response(&raw).unwrap();
            assert_eq!(output.annotated_image, None, "{raw}");
            assert!(output.predictions.is_empty(), "{raw}");
        }
    }

    #[test]
    fn test_records_without_class_become_unknown() {
        let raw = json!({
            "outputs": [{
                "predictions": [
                    { "confidence": 0.4 },
                    { "class": null },
                    { "class": 3 },
                    "not-a-record",
                    { "class": "rice" }
                ]
            }]
        });

        let output = normalize_workflow_response(&raw).unwrap();
        assert_eq!(classes(&output), vec!["Unknown", "Unknown", "3", "rice"]);
    }

    #[test]
    fn test_only_first_output_is_read() {
        let raw = json!({
            "outputs": [
                { "predictions": [{ "class": "first" }] },
                { "predictions": [{ "class": "second" }] }
            ]
        });

        let output = normalize_workflow_response(&raw).unwrap();
        assert_eq!(classes(&output), vec!["first"]);
    }
}

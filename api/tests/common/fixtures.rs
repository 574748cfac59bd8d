use axum_test::multipart::{MultipartForm, Part};
use base64::{Engine as _, engine::general_purpose};
use serde_json::{Value, json};

/// Stand-in bytes for an uploaded photo. Only the extension is validated.
pub const MEAL_JPEG: &[u8] = b"\xff\xd8\xff\xe0fake-jpeg-meal";

/// Bytes the mock workflow returns as its annotated image.
pub const ANNOTATED_PNG: &[u8] = b"\x89PNGfake-annotated-image";

pub fn annotated_base64() -> String {
    general_purpose::STANDARD.encode(ANNOTATED_PNG)
}

pub fn image_form(file_name: &str, data: &[u8]) -> MultipartForm {
    MultipartForm::new().add_part(
        "image",
        Part::bytes(data.to_vec())
            .file_name(file_name.to_string())
            .mime_type("image/jpeg"),
    )
}

pub fn meal_form() -> MultipartForm {
    image_form("meal.jpg", MEAL_JPEG)
}

fn prediction(class: &str, detection_id: &str) -> Value {
    json!({
        "class": class,
        "confidence": 0.91,
        "x": 120.0,
        "y": 80.5,
        "width": 40.0,
        "height": 32.0,
        "detection_id": detection_id
    })
}

/// Wrapped output image and nested predictions: two apples and a banana.
pub fn fruit_bowl_response() -> Value {
    json!({
        "outputs": [{
            "count_objects": 3,
            "output_image": { "type": "base64", "value": annotated_base64() },
            "predictions": {
                "image": { "width": 640, "height": 480 },
                "predictions": [
                    prediction("apple", "d1"),
                    prediction("apple", "d2"),
                    prediction("banana", "d3")
                ]
            }
        }]
    })
}

/// Bare output image string and a bare prediction list with one egg.
pub fn single_egg_response() -> Value {
    json!({
        "outputs": [{
            "output_image": annotated_base64(),
            "predictions": [prediction("egg", "e1")]
        }]
    })
}

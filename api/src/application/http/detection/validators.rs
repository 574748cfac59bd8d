use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DetectIngredientsParams {
    /// Echo the annotated image as base64. Anything but `false` means yes.
    #[param(example = "true")]
    pub include_base64: Option<String>,
}

impl DetectIngredientsParams {
    pub fn include_base64(&self) -> bool {
        self.include_base64
            .as_deref()
            .map(|value| !value.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true)
    }
}

/// Multipart body of `POST /api/detect`.
#[derive(Debug, ToSchema)]
pub struct DetectIngredientsForm {
    /// PNG or JPEG photo, at most 10 MiB
    #[schema(format = Binary)]
    pub image: String,
}

use crate::domain::upload::entities::UploadedImage;

#[derive(Debug, Clone)]
pub struct DetectIngredientsInput {
    pub image: UploadedImage,
    pub origin: RequestOrigin,
    pub include_base64: bool,
}

/// Where the client reached us, as seen through the reverse proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub scheme: String,
    pub host: String,
    pub root_path: String,
}

impl RequestOrigin {
    pub fn new(scheme: &str, host: &str, root_path: &str) -> Self {
        let scheme = scheme.trim().to_ascii_lowercase();
        let host = host.trim();

        Self {
            scheme: if scheme.is_empty() {
                "http".to_string()
            } else {
                scheme
            },
            host: if host.is_empty() {
                "localhost".to_string()
            } else {
                host.to_string()
            },
            root_path: root_path.trim_end_matches('/').to_string(),
        }
    }

    /// `{scheme}://{host}{root_path}/processed/{filename}`
    pub fn processed_image_url(&self, filename: &str) -> String {
        format!(
            "{}://{}{}/processed/{}",
            self.scheme,
            self.host,
            self.root_path,
            urlencoding::encode(filename)
        )
    }
}

use crate::domain::poem::entity::GeneratedPoem;
use serde::Serialize;

/// Success body of `POST /generate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePoemResponse {
    pub success: bool,
    pub poem: String,
    pub image_url: String,
}

impl From<GeneratedPoem> for GeneratePoemResponse {
    fn from(generated: GeneratedPoem) -> Self {
        Self {
            success: true,
            poem: generated.poem,
            image_url: generated.image_url,
        }
    }
}

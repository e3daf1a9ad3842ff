use serde::Deserialize;

/// The `error` object the Roads API returns in place of a result.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorDetail {
    pub status: String,
    pub message: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ErrorEnvelope {
    pub error: ApiErrorDetail,
}

use crate::models::{Category, CategoryId, Memo, MemoId, MemoPayload};
use reqwest::Method;
use serde::de::DeserializeOwned;

pub(crate) const ACCESS_TOKEN_HEADER: &str = "X-ACCESS-TOKEN";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("Error while fetching API ({status}){}", body_suffix(.body))]
    Request { status: u16, body: String },

    /// The request never produced a response (DNS, CORS, connection reset...).
    #[error("Network error: {0}")]
    Transport(String),

    /// A 2xx response whose body is not the expected JSON shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

fn body_suffix(body: &str) -> String {
    if body.trim().is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

impl ApiError {
    fn transport(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }

    fn decode(e: impl std::fmt::Display) -> Self {
        Self::Decode(e.to_string())
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

pub(crate) fn memos_path(category_id: CategoryId) -> String {
    format!("/memo?category_id={category_id}")
}

pub(crate) fn memo_path(memo_id: MemoId) -> String {
    format!("/memo/{memo_id}")
}

/// Build the PUT body for a save.
///
/// The server rejects an empty `content`, so an empty one is sent as a single space.
pub(crate) fn save_payload(category_id: CategoryId, title: &str, content: &str) -> MemoPayload {
    MemoPayload {
        category_id,
        title: title.to_string(),
        content: if content.is_empty() {
            " ".to_string()
        } else {
            content.to_string()
        },
    }
}

/// Thin REST client. Every call sends the session token; there are no retries here.
#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&MemoPayload>,
    ) -> ApiResult<reqwest::Response> {
        let client = reqwest::Client::new();
        let mut req = client
            .request(method, self.url(path))
            .header("Content-Type", "application/json")
            .header(ACCESS_TOKEN_HEADER, &self.token);

        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::transport)?;

        if res.status().is_success() {
            Ok(res)
        } else {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::Request { status, body })
        }
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&MemoPayload>,
    ) -> ApiResult<T> {
        let res = self.send(method, path, body).await?;
        let text = res.text().await.map_err(ApiError::transport)?;
        serde_json::from_str(&text).map_err(ApiError::decode)
    }

    pub async fn get_categories(&self) -> ApiResult<Vec<Category>> {
        self.request(Method::GET, "/category", None).await
    }

    pub async fn get_memos(&self, category_id: CategoryId) -> ApiResult<Vec<Memo>> {
        self.request(Method::GET, &memos_path(category_id), None).await
    }

    pub async fn get_memo(&self, memo_id: MemoId) -> ApiResult<Memo> {
        self.request(Method::GET, &memo_path(memo_id), None).await
    }

    pub async fn save_memo(
        &self,
        memo_id: MemoId,
        category_id: CategoryId,
        title: &str,
        content: &str,
    ) -> ApiResult<Memo> {
        let payload = save_payload(category_id, title, content);
        self.request(Method::PUT, &memo_path(memo_id), Some(&payload))
            .await
    }

    pub async fn add_memo(
        &self,
        category_id: CategoryId,
        title: &str,
        content: &str,
    ) -> ApiResult<Memo> {
        let payload = MemoPayload {
            category_id,
            title: title.to_string(),
            content: content.to_string(),
        };
        self.request(Method::POST, "/memo", Some(&payload)).await
    }

    /// The response body is empty or a bare boolean; only the status matters.
    pub async fn delete_memo(&self, memo_id: MemoId) -> ApiResult<bool> {
        self.send(Method::DELETE, &memo_path(memo_id), None).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(memos_path(2), "/memo?category_id=2");
        assert_eq!(memo_path(11), "/memo/11");
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let c = ApiClient::new("http://localhost:8000", "t");
        assert_eq!(c.url("/category"), "http://localhost:8000/category");
        assert_eq!(c.token, "t");
    }

    #[test]
    fn test_save_payload_substitutes_space_for_empty_content() {
        let p = save_payload(2, "Title", "");
        assert_eq!(p.content, " ");

        let p = save_payload(2, "★ Daily Grill", "15 Newcastle Ave. Woodbridge, VA 22222");
        let v = serde_json::to_value(p).expect("should serialize");
        assert_eq!(
            v,
            serde_json::json!({
                "category_id": 2,
                "title": "★ Daily Grill",
                "content": "15 Newcastle Ave. Woodbridge, VA 22222"
            })
        );
    }

    #[test]
    fn test_request_error_message_carries_status_and_body() {
        let e = ApiError::Request {
            status: 404,
            body: "not found".to_string(),
        };
        assert_eq!(e.to_string(), "Error while fetching API (404): not found");

        let e = ApiError::Request {
            status: 500,
            body: String::new(),
        };
        assert_eq!(e.to_string(), "Error while fetching API (500)");
    }

    #[test]
    fn test_transport_and_decode_messages() {
        assert_eq!(
            ApiError::Transport("connection refused".to_string()).to_string(),
            "Network error: connection refused"
        );
        assert!(ApiError::decode("expected value").to_string().contains("expected value"));
    }
}

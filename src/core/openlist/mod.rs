use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::Error;

/// Status code OpenList reports for a successful call.
pub const CODE_OK: u16 = 200;

/// Optional knobs of `/api/fs/list`; `Default` lists the first page unfiltered.
#[derive(Debug, Clone, Default)]
pub struct FsListOptions {
    pub password: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub refresh: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[allow(unused)]
pub struct FsEntry {
    pub name: String,
    #[serde(default)]
    pub is_dir: bool,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub sign: Option<String>,
}

#[cfg(test)]
impl FsEntry {
    pub fn dir(name: &str) -> Self {
        Self::new(name, true)
    }

    pub fn file(name: &str) -> Self {
        Self::new(name, false)
    }

    fn new(name: &str, is_dir: bool) -> Self {
        Self {
            name: name.to_string(),
            is_dir,
            size: None,
            modified: None,
            sign: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FsListResponse {
    pub code: u16,
    pub message: String,
    pub entries: Vec<FsEntry>,
}

impl FsListResponse {
    pub fn is_success(&self) -> bool {
        self.code == CODE_OK
    }
}

/// Anything that can list a directory of the storage backend.
#[async_trait]
pub trait FsLister: Send + Sync {
    async fn fetch_fs_list(
        &self,
        path: &str,
        options: Option<FsListOptions>,
    ) -> Result<FsListResponse, Error>;
}

#[derive(Debug, Clone)]
pub struct OpenlistClient {
    host: String,
    token: String,
    client: reqwest::Client,
}

impl OpenlistClient {
    pub fn new(host: String, token: String) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(config.openlist.host.clone(), config.openlist.token.clone())
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.host, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl FsLister for OpenlistClient {
    async fn fetch_fs_list(
        &self,
        path: &str,
        options: Option<FsListOptions>,
    ) -> Result<FsListResponse, Error> {
        let url = self.api_url("fs/list");
        let body = FsListRequest::new(path, options.unwrap_or_default());

        let resp = self
            .client
            .post(url)
            .header("Accept", "application/json")
            .header("Authorization", &self.token)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        debug!(target: "emby2openlist::openlist", status = %status, path = %path, "fs list response");

        if !status.is_success() {
            return Ok(FsListResponse {
                code: status.as_u16(),
                message: format!("HTTP {status} body={text}"),
                entries: Vec::new(),
            });
        }

        let api: ApiResponse<FsListData> = serde_json::from_str(&text)?;
        Ok(api.into())
    }
}

// ===============================================================================
// Wire types
// ===============================================================================

#[derive(Debug, Serialize)]
struct FsListRequest<'a> {
    path: &'a str,
    password: String,
    page: u32,
    per_page: u32,
    refresh: bool,
}

impl<'a> FsListRequest<'a> {
    fn new(path: &'a str, options: FsListOptions) -> Self {
        Self {
            path,
            password: options.password.unwrap_or_default(),
            page: options.page.unwrap_or(1),
            // 0 asks OpenList for every entry
            per_page: options.per_page.unwrap_or(0),
            refresh: options.refresh,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    code: u16,
    #[serde(default)]
    message: String,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct FsListData {
    #[serde(default)]
    content: Option<Vec<FsEntry>>,
    #[serde(default)]
    #[allow(unused)]
    total: i64,
}

impl From<ApiResponse<FsListData>> for FsListResponse {
    fn from(api: ApiResponse<FsListData>) -> Self {
        let entries = api.data.and_then(|d| d.content).unwrap_or_default();
        Self {
            code: api.code,
            message: api.message,
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_fs_list_payload() {
        let raw = r#"{
            "code": 200,
            "message": "success",
            "data": {
                "content": [
                    {"name": "115", "is_dir": true, "size": 0, "modified": "2024-01-01T00:00:00Z"},
                    {"name": "readme", "is_dir": false, "size": 12, "sign": ""}
                ],
                "total": 2,
                "provider": "Local"
            }
        }"#;
        let api: ApiResponse<FsListData> = serde_json::from_str(raw).unwrap();
        let resp = FsListResponse::from(api);

        assert!(resp.is_success());
        assert_eq!(resp.entries.len(), 2);
        assert_eq!(resp.entries[0].name, "115");
        assert!(resp.entries[0].is_dir);
        assert!(!resp.entries[1].is_dir);
        assert_eq!(resp.entries[0].modified.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(resp.entries[1].size, Some(12));
        assert_eq!(resp.entries[1].sign.as_deref(), Some(""));
    }

    #[test]
    fn null_content_is_empty() {
        let raw = r#"{"code": 200, "message": "success", "data": {"content": null, "total": 0}}"#;
        let api: ApiResponse<FsListData> = serde_json::from_str(raw).unwrap();
        assert!(FsListResponse::from(api).entries.is_empty());
    }

    #[test]
    fn error_code_keeps_message() {
        let raw = r#"{"code": 401, "message": "token is invalidated", "data": null}"#;
        let api: ApiResponse<FsListData> = serde_json::from_str(raw).unwrap();
        let resp = FsListResponse::from(api);
        assert!(!resp.is_success());
        assert_eq!(resp.message, "token is invalidated");
    }

    #[test]
    fn request_defaults_list_everything() {
        let req = FsListRequest::new("/", FsListOptions::default());
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "path": "/",
                "password": "",
                "page": 1,
                "per_page": 0,
                "refresh": false
            })
        );
    }

    #[test]
    fn api_url_joins_host() {
        let c = OpenlistClient::new("http://localhost:5244/".into(), "t".into());
        assert_eq!(c.api_url("/fs/list"), "http://localhost:5244/api/fs/list");
    }
}

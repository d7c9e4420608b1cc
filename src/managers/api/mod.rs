mod form;
mod headers;
mod response;
mod urls;

pub use form::{build_form, FormField};
pub use headers::{build_headers, to_header_map};
pub use response::ApiResponse;
pub use urls::build_url;

use response::{flatten_headers, ResponseData};

use crate::constants::http::{CONTENT_TYPE, USER_AGENT};
use crate::errors::ToolError;
use crate::services::config_store::{ApiConfig, ConfigStore};
use crate::services::logger::Logger;
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::Validation;
use crate::utils::headers::remove_header;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

pub const API_TOOLS: &[&str] = &[
    "api_get",
    "api_post",
    "api_put",
    "api_delete",
    "api_post_form",
];

/// Issues requests against stored configs. Holds no per-request state.
#[derive(Clone)]
pub struct ApiManager {
    logger: Logger,
    validation: Validation,
    store: Arc<ConfigStore>,
    client: Client,
}

impl ApiManager {
    pub fn new(
        logger: &Logger,
        validation: Validation,
        store: Arc<ConfigStore>,
    ) -> Result<Self, ToolError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| ToolError::internal(format!("Failed to build HTTP client: {}", err)))?;
        Ok(Self {
            logger: logger.child("api"),
            validation,
            store,
            client,
        })
    }

    pub async fn handle_tool(&self, tool: &str, args: &Value) -> Result<String, ToolError> {
        let response = match tool {
            "api_get" => self.request_from_args(Method::GET, args).await?,
            "api_post" => self.request_from_args(Method::POST, args).await?,
            "api_put" => self.request_from_args(Method::PUT, args).await?,
            "api_delete" => self.request_from_args(Method::DELETE, args).await?,
            "api_post_form" => self.request_form_from_args(args).await?,
            other => {
                return Err(ToolError::unhandled(format!(
                    "ApiManager cannot serve tool {}",
                    other
                )))
            }
        };
        response.render()
    }

    async fn request_from_args(&self, method: Method, args: &Value) -> Result<ApiResponse, ToolError> {
        let config_name = self
            .validation
            .ensure_string(args.get("configName"), "configName")?;
        let endpoint = self
            .validation
            .ensure_string_allow_empty(args.get("endpoint"), "endpoint")?;
        let query = if method == Method::GET {
            self.validation
                .ensure_string_map(args.get("queryParams"), "queryParams")?
        } else {
            None
        };
        let additional = self.validation.ensure_string_map(args.get("headers"), "headers")?;
        let config = self.store.get(&config_name)?;
        self.request(
            method,
            &config,
            &endpoint,
            args.get("body"),
            query.as_ref(),
            additional.as_ref(),
        )
        .await
    }

    async fn request_form_from_args(&self, args: &Value) -> Result<ApiResponse, ToolError> {
        let config_name = self
            .validation
            .ensure_string(args.get("configName"), "configName")?;
        let endpoint = self
            .validation
            .ensure_string_allow_empty(args.get("endpoint"), "endpoint")?;
        let fields: Vec<FormField> = self
            .validation
            .ensure_typed(args.get("fields").unwrap_or(&Value::Null), "fields")?;
        let additional = self.validation.ensure_string_map(args.get("headers"), "headers")?;
        let config = self.store.get(&config_name)?;
        self.request_form(&config, &endpoint, &fields, additional.as_ref())
            .await
    }

    /// Plain request. A body is only sent for POST and PUT. Non-2xx statuses
    /// come back as ordinary responses; only transport failures are errors.
    pub async fn request(
        &self,
        method: Method,
        config: &ApiConfig,
        endpoint: &str,
        body: Option<&Value>,
        query: Option<&BTreeMap<String, String>>,
        additional: Option<&BTreeMap<String, String>>,
    ) -> Result<ApiResponse, ToolError> {
        let url = build_url(&config.base_url, endpoint, query);
        let headers = build_headers(config, additional);
        let mut req = self
            .client
            .request(method.clone(), &url)
            .headers(to_header_map(&headers)?);
        if method == Method::POST || method == Method::PUT {
            if let Some(body) = body.filter(|b| !b.is_null()) {
                req = req.body(serde_json::to_string(body)?);
            }
        }
        self.execute(method, url, req).await
    }

    /// Multipart POST. The encoder owns Content-Type (it carries the
    /// boundary), so any configured or per-call value is dropped.
    pub async fn request_form(
        &self,
        config: &ApiConfig,
        endpoint: &str,
        fields: &[FormField],
        additional: Option<&BTreeMap<String, String>>,
    ) -> Result<ApiResponse, ToolError> {
        let url = build_url(&config.base_url, endpoint, None);
        let mut headers = build_headers(config, additional);
        remove_header(&mut headers, CONTENT_TYPE);
        let form = build_form(fields).await?;
        let req = self
            .client
            .post(&url)
            .headers(to_header_map(&headers)?)
            .multipart(form);
        self.execute(Method::POST, url, req).await
    }

    async fn execute(
        &self,
        method: Method,
        url: String,
        req: RequestBuilder,
    ) -> Result<ApiResponse, ToolError> {
        let started = Instant::now();
        let response = req.send().await.map_err(|err| {
            self.logger.warn(
                "API request failed",
                Some(&serde_json::json!({
                    "method": method.as_str(),
                    "url": url,
                    "error": err.to_string(),
                })),
            );
            ToolError::transport_failed(err)
        })?;
        let status = response.status();
        let headers = flatten_headers(response.headers());
        let body = response.text().await.map_err(ToolError::transport_failed)?;

        self.logger.info(
            "API request",
            Some(&serde_json::json!({
                "method": method.as_str(),
                "url": url,
                "status": status.as_u16(),
                "duration_ms": started.elapsed().as_millis() as u64,
            })),
        );
        self.logger.debug(
            "API response headers",
            Some(&serde_json::json!({ "headers": headers })),
        );

        Ok(ApiResponse {
            method: method.as_str().to_string(),
            url,
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            headers,
            data: ResponseData::decode(body),
        })
    }
}

#[async_trait::async_trait]
impl ToolHandler for ApiManager {
    async fn handle(&self, tool: &str, args: Value) -> Result<String, ToolError> {
        self.handle_tool(tool, &args).await
    }
}

//! HTTP transport for the triage backend.
//!
//! Every remote procedure is a `POST {base_url}/{procedure}` whose JSON body
//! holds the procedure's named arguments in camelCase.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use triage_core::action::{ActionResult, ActionType};
use triage_core::case::CaseContext;
use triage_core::config::ServiceConfig;
use triage_core::draft::DraftResult;
use triage_core::error::{Result, TriageError};
use triage_core::log::{SaveTriageLogRequest, TriageLogEntry};
use triage_core::service::CaseTriageService;
use triage_core::triage::TriageAssessment;
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CaseArgs<'a> {
    case_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionArgs<'a> {
    case_id: &'a str,
    action_type: &'a ActionType,
}

/// [`CaseTriageService`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCaseTriageService {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpCaseTriageService {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let base_url = config.normalized_base_url()?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|err| TriageError::config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url,
            api_token: config.api_token.clone().filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call<B, T>(&self, procedure: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.send_request(procedure, body).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Like [`Self::call`], but a `null` or empty body reads as `T::default()`.
    async fn call_or_default<B, T>(&self, procedure: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Default,
    {
        let text = self.send_request(procedure, body).await?;
        if text.trim().is_empty() {
            return Ok(T::default());
        }
        let value: Option<T> = serde_json::from_str(&text)?;
        Ok(value.unwrap_or_default())
    }

    async fn send_request<B>(&self, procedure: &str, body: &B) -> Result<String>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = format!("{}/{}", self.base_url, procedure);
        let request_id = Uuid::new_v4().to_string();
        tracing::debug!("[HttpCaseTriageService] POST {} ({})", url, request_id);

        let mut request = self
            .client
            .post(&url)
            .header(REQUEST_ID_HEADER, &request_id)
            .json(body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| {
            TriageError::transport(format!("{procedure} request failed: {err}"))
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|err| {
            TriageError::transport(format!("Failed to read {procedure} response: {err}"))
        })?;

        if !status.is_success() {
            tracing::warn!(
                "[HttpCaseTriageService] {} returned {} ({})",
                procedure,
                status,
                request_id
            );
            return Err(map_http_error(status, &text));
        }

        Ok(text)
    }
}

/// Keeps the backend's failure body so the normalizer can read its message.
fn map_http_error(status: StatusCode, body: &str) -> TriageError {
    let payload = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
    };
    TriageError::remote(Some(status.as_u16()), payload)
}

#[async_trait]
impl CaseTriageService for HttpCaseTriageService {
    async fn get_case_context(&self, case_id: &str) -> Result<CaseContext> {
        self.call("getCaseContext", &CaseArgs { case_id }).await
    }

    async fn get_triage_result(&self, case_id: &str) -> Result<TriageAssessment> {
        self.call("getTriageResult", &CaseArgs { case_id }).await
    }

    async fn get_recent_triage_logs(&self, case_id: &str) -> Result<Vec<TriageLogEntry>> {
        self.call_or_default("getRecentTriageLogs", &CaseArgs { case_id })
            .await
    }

    async fn generate_ai_draft(&self, case_id: &str) -> Result<DraftResult> {
        self.call_or_default("generateAIDraft", &CaseArgs { case_id })
            .await
    }

    async fn take_action(&self, case_id: &str, action: &ActionType) -> Result<ActionResult> {
        self.call_or_default(
            "takeAction",
            &ActionArgs {
                case_id,
                action_type: action,
            },
        )
        .await
    }

    async fn save_triage_log(&self, request: &SaveTriageLogRequest) -> Result<()> {
        self.send_request("saveTriageLog", request).await?;
        Ok(())
    }
}

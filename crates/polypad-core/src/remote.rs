//! Remote execution adapter: client for a hosted code-execution service.
//!
//! One POST per run, asking the service to block until the run completes,
//! so there is no polling state machine on this side. Every failure mode
//! (transport, non-2xx, unparsable body) maps to a distinct error that the
//! dispatcher folds into displayable text.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::RemoteConfig;
use crate::errors::RunnerError;
use crate::run::RunOutcome;

#[async_trait]
pub trait RemoteRunner: Send + Sync {
    async fn execute(&self, source: &str, language_id: u32) -> Result<RunOutcome, RunnerError>;
}

#[derive(Serialize)]
struct SubmissionRequest<'a> {
    source_code: &'a str,
    language_id: u32,
    stdin: &'a str,
}

#[derive(Deserialize)]
struct SubmissionStatus {
    description: Option<String>,
}

#[derive(Deserialize)]
struct SubmissionResponse {
    stdout: Option<String>,
    stderr: Option<String>,
    compile_output: Option<String>,
    status: Option<SubmissionStatus>,
}

pub struct RemoteRunClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    api_host: String,
}

impl RemoteRunClient {
    pub fn new(config: &RemoteConfig) -> Result<RemoteRunClient, RunnerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(RemoteRunClient {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_host: config.api_host.clone(),
        })
    }
}

#[async_trait]
impl RemoteRunner for RemoteRunClient {
    async fn execute(&self, source: &str, language_id: u32) -> Result<RunOutcome, RunnerError> {
        let payload = SubmissionRequest {
            source_code: source,
            language_id,
            stdin: "",
        };

        let url = format!("{}/submissions", self.endpoint);
        log::debug!("submitting run to {url} with language_id {language_id}");

        let mut request = self
            .http
            .post(&url)
            .query(&[("base64_encoded", "false"), ("wait", "true")])
            .json(&payload);
        if !self.api_key.is_empty() {
            request = request.header("X-RapidAPI-Key", &self.api_key);
        }
        if !self.api_host.is_empty() {
            request = request.header("X-RapidAPI-Host", &self.api_host);
        }

        let response = request
            .send()
            .await
            .map_err(|err| RunnerError::RemoteTransport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable response body>".to_string());
            log::error!("execution service rejected the run: HTTP {status}");
            return Err(RunnerError::RemoteService {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SubmissionResponse = response
            .json()
            .await
            .map_err(|err| RunnerError::RemoteResponse(err.to_string()))?;

        Ok(RunOutcome {
            stdout: parsed.stdout.unwrap_or_default(),
            stderr: parsed.stderr.unwrap_or_default(),
            compile_output: parsed.compile_output,
            status: parsed.status.and_then(|s| s.description),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> RemoteRunClient {
        RemoteRunClient::new(&RemoteConfig {
            endpoint: server.url(),
            api_key: "test-key".to_string(),
            api_host: "test-host".to_string(),
            timeout_seconds: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn maps_response_fields_into_the_outcome() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/submissions")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("base64_encoded".into(), "false".into()),
                mockito::Matcher::UrlEncoded("wait".into(), "true".into()),
            ]))
            .match_header("X-RapidAPI-Key", "test-key")
            .match_header("X-RapidAPI-Host", "test-host")
            .with_status(201)
            .with_body(
                serde_json::json!({
                    "stdout": "Hello\n",
                    "stderr": null,
                    "compile_output": null,
                    "status": { "description": "Accepted" }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let outcome = client_for(&server).execute("print(1)", 71).await.unwrap();

        mock.assert_async().await;
        assert_eq!(outcome.stdout, "Hello\n");
        assert!(outcome.stderr.is_empty());
        assert_eq!(outcome.status.as_deref(), Some("Accepted"));
    }

    #[tokio::test]
    async fn submits_the_registered_language_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/submissions")
            .match_query(mockito::Matcher::Any)
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"language_id":62,"stdin":""}"#.to_string(),
            ))
            .with_status(200)
            .with_body(serde_json::json!({ "stdout": "ok\n" }).to_string())
            .create_async()
            .await;

        let outcome = client_for(&server)
            .execute("class A {}", 62)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(outcome.stdout, "ok\n");
    }

    #[tokio::test]
    async fn non_2xx_is_a_service_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/submissions")
            .match_query(mockito::Matcher::Any)
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let err = client_for(&server).execute("print(1)", 71).await.unwrap_err();
        match err {
            RunnerError::RemoteService { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("expected RemoteService, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unparsable_body_is_a_response_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/submissions")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let err = client_for(&server).execute("print(1)", 71).await.unwrap_err();
        assert!(matches!(err, RunnerError::RemoteResponse(_)));
    }
}

// HTTP Responder
//
// 后端约定：POST {"message": ...}，返回 {"response": ...}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::modules::chat::ports::{ResponderError, ResponderPort};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    response: String,
}

pub struct HttpResponder {
    client: Client,
    endpoint: String,
}

impl HttpResponder {
    /// 创建 HTTP Responder
    ///
    /// `timeout` 为 None 时不限制请求时长
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ResponderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ResponderError::NotAvailable(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ResponderPort for HttpResponder {
    fn responder_id(&self) -> &str {
        "http"
    }

    async fn respond(&self, message: &str) -> Result<String, ResponderError> {
        debug!("Sending chat request to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|e| ResponderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Chat backend error: {} - {}", status, error_text);
            return Err(ResponderError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let data: ChatResponse = response
            .json()
            .await
            .map_err(|e| ResponderError::InvalidResponse(e.to_string()))?;

        Ok(data.response)
    }
}

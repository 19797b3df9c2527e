use shopping_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};
use ureq::Agent;

/// Blocking HTTP transport. Status codes are returned as data so the core
/// decides what a 404 or 400 means.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let HttpRequest {
            method, path, body, ..
        } = request;
        let body = body.unwrap_or_default();

        let result = match method {
            HttpMethod::Get => self.agent.get(&path).call(),
            HttpMethod::Delete => self.agent.delete(&path).call(),
            HttpMethod::Post => self
                .agent
                .post(&path)
                .content_type("application/json")
                .send(body.as_bytes()),
            HttpMethod::Put => self
                .agent
                .put(&path)
                .content_type("application/json")
                .send(body.as_bytes()),
        };

        let mut response = result
            .map_err(|e| ApiError::TransportError(format!("{} {path}: {e}", method.as_str())))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::TransportError(e.to_string()))?;

        Ok(HttpResponse::new(status, body))
    }
}

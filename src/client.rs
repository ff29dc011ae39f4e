//! Client for the remote SQL generation service.
//!
//! The service receives the schema and a dialect name and answers with SQL
//! text, which is returned untouched. One request per call: no retries, no
//! cancellation.

use reqwest::Client;
use serde::Serialize;

use crate::dialect::Dialect;
use crate::error::GenerateError;
use crate::schema::Table;

/// Endpoint used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/sql";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    tables: &'a [Table],
    dialect: Dialect,
}

#[derive(Serialize)]
struct ValidateRequest<'a> {
    sql: &'a str,
}

/// HTTP client for the generation service.
#[derive(Debug, Clone)]
pub struct SqlGeneratorClient {
    http: Client,
    base_url: String,
}

impl Default for SqlGeneratorClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl SqlGeneratorClient {
    /// Create a client for the service rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the service for `CREATE TABLE` statements in `dialect`.
    pub async fn generate(&self, tables: &[Table], dialect: Dialect) -> Result<String, GenerateError> {
        let url = format!("{}/generate", self.base_url);
        tracing::info!("Requesting {} SQL for {} table(s) from {}", dialect, tables.len(), url);

        let response = self
            .http
            .post(&url)
            .json(&GenerateRequest { tables, dialect })
            .send()
            .await
            .map_err(log_failure)?;

        let body = Self::checked_body(response).await?;
        tracing::debug!("Received {} bytes of SQL", body.len());
        Ok(body)
    }

    /// Ask the service whether `sql` is valid.
    pub async fn validate(&self, sql: &str) -> Result<bool, GenerateError> {
        let url = format!("{}/validate", self.base_url);
        tracing::info!("Validating {} bytes of SQL at {}", sql.len(), url);

        let response = self
            .http
            .post(&url)
            .json(&ValidateRequest { sql })
            .send()
            .await
            .map_err(log_failure)?;

        let body = Self::checked_body(response).await?;
        serde_json::from_str(body.trim())
            .map_err(|e| GenerateError::Request(format!("unexpected validation response: {}", e)))
    }

    async fn checked_body(response: reqwest::Response) -> Result<String, GenerateError> {
        let status = response.status();
        let body = response.text().await.map_err(log_failure)?;

        if !status.is_success() {
            tracing::warn!("Generation service returned {}: {}", status, body);
            return Err(GenerateError::Server {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }
}

fn log_failure(err: reqwest::Error) -> GenerateError {
    tracing::warn!("Generation request failed: {}", err);
    GenerateError::from(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;

    #[test]
    fn test_request_body() {
        let tables = vec![Table::new("users").column(Column::new("id", "INT").primary_key())];
        let body = serde_json::to_value(GenerateRequest {
            tables: &tables,
            dialect: Dialect::Sqlite,
        })
        .unwrap();
        assert_eq!(body["dialect"], "SQLite");
        assert_eq!(body["tables"][0]["name"], "users");
        assert_eq!(body["tables"][0]["columns"][0]["primaryKey"], true);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = SqlGeneratorClient::new("http://example.test/api/sql/");
        assert_eq!(client.base_url(), "http://example.test/api/sql");
        assert_eq!(SqlGeneratorClient::default().base_url(), DEFAULT_API_URL);
    }
}

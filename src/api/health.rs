// SPDX-License-Identifier: AGPL-3.0-or-later

use axum::Json;
use serde::Serialize;

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: i64,
}

/// Liveness probe. Always 200 while the process is running; the service
/// has no external dependencies to check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".to_string(),
        service: "recrutec-auth".to_string(),
        timestamp: chrono::Utc::now().timestamp_millis(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_up() {
        let Json(response) = health().await;
        assert_eq!(response.status, "UP");
        assert_eq!(response.service, "recrutec-auth");
    }
}

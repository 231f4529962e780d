//! Uniform operation-result envelope.
//!
//! Every public repository operation resolves to an [`ApiResponse`] rather
//! than raising for expected conditions; callers branch on `status_code`.
//! The outer route layer maps `status_code` straight to the outward HTTP
//! code and forwards `message` verbatim.

use serde::Serialize;

use crate::errors::AppError;

/// Outcome discriminator for the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Standard operation-result wrapper (consistent response format).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub status_code: u16,
}

impl<T> ApiResponse<T> {
    /// 200 with a payload.
    pub fn ok(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: None,
            data: Some(data),
            status_code: 200,
        }
    }

    /// 201 with the stored record, including store-generated fields.
    pub fn created(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: None,
            data: Some(data),
            status_code: 201,
        }
    }

    /// 200 with no payload (successful delete).
    pub fn no_payload() -> Self {
        Self {
            status: ResponseStatus::Success,
            message: None,
            data: None,
            status_code: 200,
        }
    }

    /// Error envelope with an explicit classifier and message.
    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(message.into()),
            data: None,
            status_code,
        }
    }

    /// 404 "Not Found".
    pub fn not_found() -> Self {
        Self::error(404, "Not Found")
    }

    /// 400 "Invalid Data" (e.g. an update that affected zero rows).
    pub fn invalid_data() -> Self {
        Self::error(400, "Invalid Data")
    }

    /// Envelope for an [`AppError`], carrying its classifier and message.
    pub fn failure(err: AppError) -> Self {
        Self::error(err.status_code(), err.to_string())
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == ResponseStatus::Error
    }

    /// Re-type an envelope that carries no payload, e.g. a 404 from a
    /// precheck being returned through a differently-typed operation.
    pub fn error_into<U>(self) -> ApiResponse<U> {
        debug_assert!(self.data.is_none());
        ApiResponse {
            status: self.status,
            message: self.message,
            data: None,
            status_code: self.status_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelopes_carry_payload_and_classifier() {
        let res = ApiResponse::created("row");
        assert!(res.is_success());
        assert_eq!(res.status_code, 201);
        assert_eq!(res.data, Some("row"));
        assert!(res.message.is_none());
    }

    #[test]
    fn not_found_matches_the_contract() {
        let res: ApiResponse<()> = ApiResponse::not_found();
        assert!(res.is_error());
        assert_eq!(res.status_code, 404);
        assert_eq!(res.message.as_deref(), Some("Not Found"));
    }

    #[test]
    fn error_envelopes_retype_without_loss() {
        let res: ApiResponse<String> = ApiResponse::invalid_data();
        let retyped: ApiResponse<()> = res.error_into();
        assert_eq!(retyped.status_code, 400);
        assert_eq!(retyped.message.as_deref(), Some("Invalid Data"));
    }

    #[test]
    fn serializes_with_lowercase_status_and_skips_empty_fields() {
        let res: ApiResponse<()> = ApiResponse::no_payload();
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["status_code"], 200);
        assert!(json.get("data").is_none());
        assert!(json.get("message").is_none());
    }
}

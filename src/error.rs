//! Error types for the balance service.

use serde::Deserialize;
use thiserror::Error;

/// The main error type for all service operations.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Cache store operation failed
    #[error("cache store error: {0}")]
    Store(#[from] redis::RedisError),

    /// Coinbase rejected the request with an error envelope
    #[error("Coinbase API error: {0}")]
    Api(ApiFailure),

    /// Invalid response from the API
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Request signing failed
    #[error("authentication error: {0}")]
    Auth(String),
}

/// One entry of the upstream `{"errors": [...]}` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamError {
    /// The error identifier (e.g., "invalid_token")
    pub id: String,
    /// Human-readable message from the upstream, when present
    #[serde(default)]
    pub message: Option<String>,
    /// Documentation link, when present
    #[serde(default)]
    pub url: Option<String>,
}

/// Classification metadata for one upstream error identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiErrorDescriptor {
    /// The upstream error identifier this row describes
    pub error_id: &'static str,
    /// The HTTP-style status code the identifier maps to
    pub http_code: u16,
    /// Human-readable description
    pub description: &'static str,
}

/// The error identifiers Coinbase documents, with their classification.
///
/// Lookups compare identifiers for equality and never modify this table.
pub const ERROR_DESCRIPTORS: &[ApiErrorDescriptor] = &[
    ApiErrorDescriptor {
        error_id: "two_factor_required",
        http_code: 402,
        description: "When sending money over 2fa limit",
    },
    ApiErrorDescriptor {
        error_id: "param_required",
        http_code: 400,
        description: "Missing parameter",
    },
    ApiErrorDescriptor {
        error_id: "validation_error",
        http_code: 400,
        description: "Unable to validate POST/PUT",
    },
    ApiErrorDescriptor {
        error_id: "invalid_request",
        http_code: 400,
        description: "Invalid request",
    },
    ApiErrorDescriptor {
        error_id: "personal_details_required",
        http_code: 400,
        description: "User's personal detail required to complete this request",
    },
    ApiErrorDescriptor {
        error_id: "unverified_email",
        http_code: 400,
        description: "User has not verified their email",
    },
    ApiErrorDescriptor {
        error_id: "authentication_error",
        http_code: 401,
        description: "Invalid auth (generic)",
    },
    ApiErrorDescriptor {
        error_id: "invalid_token",
        http_code: 401,
        description: "Invalid Oauth token",
    },
    ApiErrorDescriptor {
        error_id: "revoked_token",
        http_code: 401,
        description: "Revoked Oauth token",
    },
    ApiErrorDescriptor {
        error_id: "expired_token",
        http_code: 401,
        description: "Expired Oauth token",
    },
    ApiErrorDescriptor {
        error_id: "invalid_scope",
        http_code: 403,
        description: "User hasn't authenticated necessary scope",
    },
    ApiErrorDescriptor {
        error_id: "not_found",
        http_code: 404,
        description: "Resource not found",
    },
    ApiErrorDescriptor {
        error_id: "rate_limit_exceeded",
        http_code: 429,
        description: "Rate limit exceeded",
    },
    ApiErrorDescriptor {
        error_id: "internal_server_error",
        http_code: 500,
        description: "Internal server error",
    },
];

/// Returned by [`ApiFailure::from_errors`] for an empty error list.
pub const NO_ERROR: ApiErrorDescriptor = ApiErrorDescriptor {
    error_id: "",
    http_code: 200,
    description: "No error present.",
};

const UNKNOWN_ERROR: ApiErrorDescriptor = ApiErrorDescriptor {
    error_id: "",
    http_code: 500,
    description: "Unrecognized error identifier",
};

/// Look up the descriptor for an upstream error identifier.
pub fn descriptor_for(error_id: &str) -> Option<&'static ApiErrorDescriptor> {
    ERROR_DESCRIPTORS
        .iter()
        .find(|descriptor| descriptor.error_id == error_id)
}

/// An upstream rejection, enriched with descriptor metadata.
///
/// This is the `failure` arm of the client's tagged outcome; callers decide
/// whether it is fatal for their operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    /// The identifier reported by the upstream
    pub error_id: String,
    /// HTTP-style status code from the descriptor table
    pub http_code: u16,
    /// Description from the descriptor table
    pub description: &'static str,
    /// Documentation link reported by the upstream, when present
    pub url: Option<String>,
}

impl ApiFailure {
    /// Build a failure from an upstream error list.
    ///
    /// Only the first error is classified; an empty list yields the generic
    /// "no error present" descriptor.
    pub fn from_errors(errors: &[UpstreamError]) -> Self {
        match errors.first() {
            None => Self {
                error_id: NO_ERROR.error_id.to_string(),
                http_code: NO_ERROR.http_code,
                description: NO_ERROR.description,
                url: None,
            },
            Some(error) => {
                let descriptor = descriptor_for(&error.id).unwrap_or(&UNKNOWN_ERROR);
                Self {
                    error_id: error.id.clone(),
                    http_code: descriptor.http_code,
                    description: descriptor.description,
                    url: error.url.clone(),
                }
            }
        }
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} (HTTP {})",
            self.error_id, self.description, self.http_code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(id: &str) -> UpstreamError {
        UpstreamError {
            id: id.to_string(),
            message: None,
            url: None,
        }
    }

    #[test]
    fn test_descriptor_lookup() {
        let descriptor = descriptor_for("invalid_token").unwrap();
        assert_eq!(descriptor.http_code, 401);
        assert_eq!(descriptor.description, "Invalid Oauth token");
        assert!(descriptor_for("no_such_identifier").is_none());
    }

    #[test]
    fn test_lookup_does_not_mutate_table() {
        // A lookup that assigns instead of comparing would "match" the first
        // row for every identifier.
        descriptor_for("rate_limit_exceeded");
        descriptor_for("not_found");
        assert_eq!(ERROR_DESCRIPTORS[0].error_id, "two_factor_required");
        assert_eq!(
            descriptor_for("not_found"),
            descriptor_for("not_found"),
            "repeated lookups must agree"
        );
    }

    #[test]
    fn test_failure_from_first_error() {
        let failure = ApiFailure::from_errors(&[upstream("expired_token"), upstream("not_found")]);
        assert_eq!(failure.error_id, "expired_token");
        assert_eq!(failure.http_code, 401);
    }

    #[test]
    fn test_failure_from_empty_list() {
        let failure = ApiFailure::from_errors(&[]);
        assert_eq!(failure.http_code, 200);
        assert_eq!(failure.description, "No error present.");
    }

    #[test]
    fn test_failure_from_unknown_identifier() {
        let failure = ApiFailure::from_errors(&[upstream("brand_new_error")]);
        assert_eq!(failure.error_id, "brand_new_error");
        assert_eq!(failure.http_code, 500);
    }

    #[test]
    fn test_failure_carries_url() {
        let mut error = upstream("invalid_request");
        error.url = Some("https://developers.coinbase.com/api#errors".to_string());
        let failure = ApiFailure::from_errors(&[error]);
        assert_eq!(
            failure.url.as_deref(),
            Some("https://developers.coinbase.com/api#errors")
        );
    }

    #[test]
    fn test_failure_display() {
        let failure = ApiFailure::from_errors(&[upstream("not_found")]);
        assert_eq!(failure.to_string(), "not_found: Resource not found (HTTP 404)");
    }
}

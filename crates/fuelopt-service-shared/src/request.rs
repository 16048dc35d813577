//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::ProblemDetails;

/// Maximum number of candidate routes accepted by a single optimize call.
pub const MAX_OPTIMIZE_ROUTES: usize = 64;

/// Validation trait for request types.
///
/// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
pub trait Validate {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Body of `POST /api/v1/optimize/{aircraft}`.
///
/// Accepts either a bare JSON array of route file names or an object with a
/// `files` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OptimizeRequest {
    Files(Vec<String>),
    Object {
        files: Vec<String>,
        /// Evaluate candidates concurrently.
        #[serde(default)]
        parallel: bool,
    },
}

impl OptimizeRequest {
    pub fn files(&self) -> &[String] {
        match self {
            OptimizeRequest::Files(files) | OptimizeRequest::Object { files, .. } => files,
        }
    }

    pub fn parallel(&self) -> bool {
        matches!(self, OptimizeRequest::Object { parallel: true, .. })
    }
}

impl Validate for OptimizeRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        let files = self.files();
        if files.is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "At least one route file is required",
                request_id,
            )));
        }

        if files.len() > MAX_OPTIMIZE_ROUTES {
            return Err(Box::new(ProblemDetails::bad_request(
                format!(
                    "At most {} route files may be compared, got {}",
                    MAX_OPTIMIZE_ROUTES,
                    files.len()
                ),
                request_id,
            )));
        }

        if files.iter().any(|f| f.trim().is_empty()) {
            return Err(Box::new(ProblemDetails::bad_request(
                "Route file names cannot be empty",
                request_id,
            )));
        }

        Ok(())
    }
}

/// Body of `POST /api/v1/routes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRouteRequest {
    /// Target file name, e.g. `routes_option_b.csv`.
    pub filename: String,
    /// Raw CSV content.
    pub content: String,
}

impl Validate for UploadRouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if !self.filename.to_ascii_lowercase().ends_with(".csv") {
            return Err(Box::new(ProblemDetails::bad_request(
                "Only .csv files are allowed",
                request_id,
            )));
        }

        if self.content.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'content' field is required and cannot be empty",
                request_id,
            )));
        }

        Ok(())
    }
}

/// Query string of `GET /api/v1/ask-agent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskAgentQuery {
    pub question: String,
}

impl Validate for AskAgentQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.question.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'question' parameter is required and cannot be empty",
                request_id,
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimize_request_accepts_bare_array() {
        let req: OptimizeRequest =
            serde_json::from_str(r#"["routes.csv", "routes_option_b.csv"]"#).unwrap();
        assert_eq!(req.files(), ["routes.csv", "routes_option_b.csv"]);
        assert!(!req.parallel());
    }

    #[test]
    fn test_optimize_request_accepts_files_object() {
        let req: OptimizeRequest =
            serde_json::from_str(r#"{"files": ["routes.csv"], "parallel": true}"#).unwrap();
        assert_eq!(req.files(), ["routes.csv"]);
        assert!(req.parallel());
    }

    #[test]
    fn test_optimize_request_rejects_empty_list() {
        let req = OptimizeRequest::Files(vec![]);
        let problem = req.validate("req-1").unwrap_err();
        assert_eq!(problem.status, 400);
        assert_eq!(problem.instance.as_deref(), Some("req-1"));
    }

    #[test]
    fn test_optimize_request_rejects_too_many_routes() {
        let req = OptimizeRequest::Files(vec!["r.csv".to_string(); MAX_OPTIMIZE_ROUTES + 1]);
        assert!(req.validate("req-2").is_err());
    }

    #[test]
    fn test_upload_requires_csv_extension() {
        let req = UploadRouteRequest {
            filename: "routes.txt".to_string(),
            content: "waypoint,distance_km,wind,turbulence\n".to_string(),
        };
        let problem = req.validate("req-3").unwrap_err();
        assert!(problem.detail.unwrap().contains(".csv"));
    }

    #[test]
    fn test_ask_agent_requires_question() {
        let query = AskAgentQuery {
            question: "   ".to_string(),
        };
        assert!(query.validate("req-4").is_err());
    }
}

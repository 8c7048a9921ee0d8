use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Problem endpoint answered {0}")]
    ProblemStatus(StatusCode),
    #[error("Solve endpoint answered {status}: {body}")]
    SolveStatus { status: StatusCode, body: String },
    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Gzip error: {0}")]
    Gzip(#[source] std::io::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Restore client exited unsuccessfully")]
    RestoreFailed,
    #[error("Database error: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Progress bar error: {0}")]
    Progress(#[from] indicatif::style::TemplateError),
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl RunError {
    /// Process exit code reported by the binary, one per failure class.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Internal(_) | RunError::Progress(_) => 1,
            RunError::Http(_) => 3,
            RunError::ProblemStatus(_) => 4,
            RunError::Json(_) => 5,
            RunError::Base64(_) => 6,
            RunError::Gzip(_) => 7,
            RunError::Io(_) => 8,
            RunError::RestoreFailed => 9,
            RunError::Query(_) => 10,
            RunError::SolveStatus { .. } => 11,
        }
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_failure() {
        let errors = [
            RunError::ProblemStatus(StatusCode::FORBIDDEN),
            RunError::SolveStatus {
                status: StatusCode::BAD_REQUEST,
                body: String::new(),
            },
            RunError::Json(serde_json::from_str::<u8>("nope").unwrap_err()),
            RunError::Base64(base64::DecodeError::InvalidPadding),
            RunError::Gzip(std::io::Error::other("corrupt deflate stream")),
            RunError::Io(std::io::Error::other("disk full")),
            RunError::RestoreFailed,
            RunError::Query(sqlx::Error::PoolTimedOut),
            RunError::Internal(anyhow::anyhow!("boom")),
        ];

        let codes = errors.iter().map(RunError::exit_code).collect::<HashSet<_>>();
        assert_eq!(codes.len(), errors.len());
        assert!(!codes.contains(&0));
        assert!(!codes.contains(&2), "2 is reserved for configuration errors");
    }
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GranolaError>;

#[derive(Error, Debug)]
pub enum GranolaError {
  /// A remote call answered with a non-success status or never completed
  #[error("{operation} failed: {detail}")]
  Api { operation: String, detail: String },

  #[error("{message}")]
  Auth { message: String },

  #[error(
    "Invalid date '{input}': expected YYYY-MM-DD, 'today', 'yesterday', 'last week' or 'last month'"
  )]
  InvalidDate { input: String },

  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

impl GranolaError {
  pub fn api(operation: impl Into<String>, detail: impl Into<String>) -> Self {
    Self::Api { operation: operation.into(), detail: detail.into() }
  }

  pub fn auth(message: impl Into<String>) -> Self {
    Self::Auth { message: message.into() }
  }

  pub fn invalid_date(input: impl Into<String>) -> Self {
    Self::InvalidDate { input: input.into() }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_api_error_is_prefixed_with_operation() {
    let err = GranolaError::api("Get documents batch", "Unauthorized");
    assert_eq!(err.to_string(), "Get documents batch failed: Unauthorized");
  }

  #[test]
  fn test_invalid_date_names_the_input() {
    let err = GranolaError::invalid_date("next tuesday");
    assert!(err.to_string().starts_with("Invalid date 'next tuesday'"));
  }
}

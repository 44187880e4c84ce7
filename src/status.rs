//! Reply status codes and their reason phrases.

use std::fmt;

/// Status codes returned to the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// 200
    Ok,
    /// 400, body could not be decoded
    BadRequest,
    /// 403, authentication failed
    Forbidden,
    /// 404, unknown method or path
    NotFound,
    /// 422, envelope or argument validation failed
    InvalidRequest,
    /// 500
    InternalError,
}

impl StatusCode {
    /// Returns the numeric code.
    pub fn as_u16(self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::InvalidRequest => 422,
            StatusCode::InternalError => 500,
        }
    }

    /// Returns the standard reason phrase used as the default error text.
    pub fn reason(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::InvalidRequest => "Invalid Request",
            StatusCode::InternalError => "Internal Server Error",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason())
    }
}

impl From<StatusCode> for u16 {
    fn from(code: StatusCode) -> Self {
        code.as_u16()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_reasons() {
        assert_eq!(StatusCode::InvalidRequest.as_u16(), 422);
        assert_eq!(StatusCode::InternalError.reason(), "Internal Server Error");
        assert_eq!(u16::from(StatusCode::Forbidden), 403);
        assert_eq!(StatusCode::NotFound.to_string(), "404 Not Found");
    }
}

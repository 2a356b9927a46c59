use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// `{agente_id}` route segment parsed as an integer.
///
/// Existence is not checked: listing packages for an unknown agent yields an
/// empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentIdPath(pub i32);

impl FromRequest for AgentIdPath {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_agent_id(req.match_info().get("agente_id")))
    }
}

fn parse_agent_id(raw: Option<&str>) -> Result<AgentIdPath, AppError> {
    let raw = raw.ok_or_else(|| {
        AppError::bad_request(ErrorCode::MissingField, "Missing agente_id path parameter")
    })?;
    raw.parse::<i32>().map(AgentIdPath).map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidField,
            format!("agente_id must be an integer, got '{raw}'"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_agent_id() {
        assert_eq!(parse_agent_id(Some("12")).unwrap(), AgentIdPath(12));
        assert_eq!(parse_agent_id(Some("-3")).unwrap(), AgentIdPath(-3));
        assert_eq!(
            parse_agent_id(Some("abc")).unwrap_err().code(),
            ErrorCode::InvalidField
        );
        assert_eq!(
            parse_agent_id(None).unwrap_err().code(),
            ErrorCode::MissingField
        );
    }
}

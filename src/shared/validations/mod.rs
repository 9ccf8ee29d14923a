use uuid::Uuid;

use crate::shared::types::{DomainError, DomainResult, PageRequest};

/// Clamp raw limit/offset into a usable window.
///
/// Out-of-range values are corrected rather than rejected: a non-positive
/// limit falls back to the default, an oversized one is capped and a
/// negative offset becomes zero.
pub fn clamp_pagination(limit: i64, offset: i64) -> PageRequest {
    let limit = if limit <= 0 {
        PageRequest::DEFAULT_LIMIT
    } else {
        (limit as u64).min(PageRequest::MAX_LIMIT)
    };
    PageRequest {
        limit,
        offset: offset.max(0) as u64,
    }
}

pub fn validate_uuid(raw: &str) -> DomainResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| DomainError::InvalidUuid(raw.to_string()))
}

/// Treat a blank optional filter the same as an absent one.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limit_uses_default() {
        assert_eq!(clamp_pagination(0, 0).limit, 10);
        assert_eq!(clamp_pagination(-3, 0).limit, 10);
    }

    #[test]
    fn oversized_limit_is_capped() {
        assert_eq!(clamp_pagination(500, 0).limit, 100);
        assert_eq!(clamp_pagination(100, 0).limit, 100);
        assert_eq!(clamp_pagination(37, 0).limit, 37);
    }

    #[test]
    fn negative_offset_becomes_zero() {
        assert_eq!(clamp_pagination(10, -5).offset, 0);
        assert_eq!(clamp_pagination(10, 20).offset, 20);
    }

    #[test]
    fn uuid_validation() {
        assert!(validate_uuid("60601fee-2bf1-4721-ae6f-7636e79a0cba").is_ok());
        assert_eq!(
            validate_uuid("not-a-uuid"),
            Err(DomainError::InvalidUuid("not-a-uuid".into()))
        );
    }

    #[test]
    fn blank_filters_are_dropped() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some("net".into())), Some("net".into()));
        assert_eq!(non_blank(None), None);
    }
}

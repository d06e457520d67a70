//! 에러 타입 — 도메인별 에러 정의
//!
//! [`RoutelogError`]는 요청 디코딩부터 파싱까지의 모든 에러를 묶는 최상위
//! 타입입니다. `#[from]` 변환이 구현되어 있어 상위 레이어에서 `?` 연산자로
//! 자연스럽게 전파할 수 있습니다.
//!
//! 모든 에러 종류는 요청에 대해 종결적입니다. 코어 내부에 재시도나
//! 복구 경로는 없습니다.

/// Routelog 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum RoutelogError {
    /// 요청 디코딩 에러
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// 메시지 파싱 에러
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// 요청 디코딩 에러
///
/// 필수 필드 누락과 타입 불일치는 문제가 된 필드명을 구분하여 보고합니다.
/// 디코딩이 실패하면 코어 파싱은 호출되지 않습니다.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// 필수 필드 누락
    #[error("missing required field: {field}")]
    MissingField {
        /// 누락된 필드명
        field: &'static str,
    },

    /// 필드 타입 불일치
    #[error("invalid type for field: {field}")]
    InvalidType {
        /// 문제가 된 필드명
        field: &'static str,
    },

    /// 타임스탬프 형식 불일치
    #[error("invalid timestamp '{value}': {reason}")]
    Timestamp {
        /// 입력된 타임스탬프 문자열
        value: String,
        /// 실패 사유
        reason: String,
    },

    /// JSON 본문 자체가 유효하지 않음
    #[error("invalid request body: {0}")]
    Json(#[from] serde_json::Error),
}

/// 메시지 파싱 에러
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// 등록되지 않은 플랫폼 식별자
    #[error("platform not supported: {platform}")]
    NoMatchingPlatform {
        /// 요청의 플랫폼 식별자
        platform: String,
    },

    /// 어떤 패턴도 트리거되지 않았고 배치가 이벤트를 만들지 못함
    #[error("message did not match any known pattern for parsing")]
    NoMatchingParser,

    /// 트리거는 매칭되었으나 필드 추출이 기대 형태를 벗어남 — 배치 전체 중단
    #[error("message did not conform to the expected format for parsing: '{line}'")]
    IncompleteMatch {
        /// 문제가 된 메시지 라인 (운영자 진단용)
        line: String,
    },

    /// 패턴 컴파일 실패 (파서 구성 시점)
    #[error("invalid pattern '{pattern}': {reason}")]
    Pattern {
        /// 컴파일에 실패한 패턴
        pattern: String,
        /// 실패 사유
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_display() {
        let err = DecodeError::MissingField { field: "platform" };
        assert!(err.to_string().contains("platform"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn invalid_type_display() {
        let err = DecodeError::InvalidType { field: "extra" };
        assert!(err.to_string().contains("extra"));
    }

    #[test]
    fn timestamp_display() {
        let err = DecodeError::Timestamp {
            value: "2024-07-13T21:57:59Z".to_owned(),
            reason: "trailing input".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2024-07-13T21:57:59Z"));
        assert!(msg.contains("trailing input"));
    }

    #[test]
    fn incomplete_match_carries_line() {
        let err = ParseError::IncompleteMatch {
            line: "IS-IS incomplete".to_owned(),
        };
        assert!(err.to_string().contains("IS-IS incomplete"));
    }

    #[test]
    fn no_matching_platform_display() {
        let err = ParseError::NoMatchingPlatform {
            platform: "ios-xr".to_owned(),
        };
        assert!(err.to_string().contains("ios-xr"));
    }

    #[test]
    fn converts_to_routelog_error() {
        let err: RoutelogError = ParseError::NoMatchingParser.into();
        assert!(matches!(err, RoutelogError::Parse(_)));

        let err: RoutelogError = DecodeError::MissingField { field: "source" }.into();
        assert!(matches!(err, RoutelogError::Decode(_)));
    }
}

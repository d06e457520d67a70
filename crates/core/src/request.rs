//! 요청 디코딩 — JSON 본문을 [`Request`]로 검증/변환
//!
//! 와이어 형식의 요청을 필드 단위로 검증합니다. 필수 필드 누락과 타입
//! 불일치는 문제 필드명을 담은 별도 에러 종류로 보고합니다
//! ([`DecodeError`](crate::error::DecodeError)).
//!
//! `message` 필드는 두 글자 구분자 [`MESSAGE_DELIMITER`]로 결합된 여러
//! 논리 라인을 담을 수 있으며, 분리 후 각 라인을 트리밍합니다. 라인 순서는
//! 처리 순서이자 결과 이벤트 순서입니다.
//!
//! # 사용 예시
//! ```
//! use routelog_core::request::Request;
//!
//! let raw = br#"{"message":"IS-IS new L2 adjacency to er02 on ae0",
//!     "platform":"junos","source":"er01","timestamp":"2024-07-13 21:57:59"}"#;
//! let request = Request::from_slice(raw).unwrap();
//! assert_eq!(request.platform, "junos");
//! assert_eq!(request.messages.len(), 1);
//! ```

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;

use crate::error::DecodeError;
use crate::event::ExtraMap;

/// 배치 메시지 구분자 — `message` 필드 안에서 논리 라인을 결합합니다
pub const MESSAGE_DELIMITER: &str = "__";

/// 요청 타임스탬프 형식
///
/// 타임존 오프셋이 없는 고정 형식입니다. RFC 3339 등 다른 형식은
/// 거부됩니다.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 파싱 요청 — 외부 디코더가 호출당 한 번 생성하며 이후 불변입니다
#[derive(Debug, Clone)]
pub struct Request {
    /// 원시 메시지 라인 (입력 순서 = 처리 순서 = 결과 순서)
    pub messages: Vec<String>,
    /// 플랫폼 식별자 ("junos", "arista" 등)
    pub platform: String,
    /// 보고 장비 이름
    pub source: String,
    /// 이 요청에서 생성되는 모든 이벤트에 동일하게 부착되는 타임스탬프
    pub timestamp: NaiveDateTime,
    /// 불투명 메타데이터 — 모든 이벤트에 그대로 전달 (Arc 공유)
    pub extra: Arc<ExtraMap>,
}

impl Request {
    /// JSON 바이트에서 요청을 디코딩합니다.
    ///
    /// JSON 문법 오류는 [`DecodeError::Json`]으로 보고됩니다.
    pub fn from_slice(raw: &[u8]) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_slice(raw)?;
        Self::from_value(value)
    }

    /// JSON 값에서 요청을 디코딩합니다.
    ///
    /// # 검증 규칙
    /// - `message`, `platform`, `source`, `timestamp`는 필수 문자열
    /// - `timestamp`는 [`TIMESTAMP_FORMAT`] 형식만 허용
    /// - `extra`는 생략 가능 (빈 맵으로 대체), 존재하면 객체여야 함
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let Value::Object(mut body) = value else {
            return Err(DecodeError::InvalidType { field: "request" });
        };

        let platform = take_string(&mut body, "platform")?;
        let source = take_string(&mut body, "source")?;

        let raw_timestamp = take_string(&mut body, "timestamp")?;
        let timestamp = NaiveDateTime::parse_from_str(&raw_timestamp, TIMESTAMP_FORMAT).map_err(
            |e| DecodeError::Timestamp {
                value: raw_timestamp,
                reason: e.to_string(),
            },
        )?;

        let extra = match body.remove("extra") {
            None => ExtraMap::new(),
            Some(Value::Object(map)) => map,
            Some(_) => return Err(DecodeError::InvalidType { field: "extra" }),
        };

        let message = take_string(&mut body, "message")?;
        let messages: Vec<String> = message
            .split(MESSAGE_DELIMITER)
            .map(|line| line.trim().to_owned())
            .collect();

        tracing::debug!(
            platform = %platform,
            source = %source,
            lines = messages.len(),
            "decoded parse request"
        );

        Ok(Self {
            messages,
            platform,
            source,
            timestamp,
            extra: Arc::new(extra),
        })
    }
}

/// 필수 문자열 필드를 꺼냅니다. 누락/타입 불일치는 필드명을 담아 보고합니다.
fn take_string(
    body: &mut serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<String, DecodeError> {
    match body.remove(field) {
        None => Err(DecodeError::MissingField { field }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(DecodeError::InvalidType { field }),
    }
}

impl<'de> Deserialize<'de> for Request {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(de::Error::custom)
    }
}

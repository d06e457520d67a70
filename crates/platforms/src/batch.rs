//! 배치 파서 -- 플랫폼 규칙 목록을 요청 라인 전체에 적용
//!
//! [`BatchParser`]는 한 플랫폼의 순서 있는 [`LineRule`] 목록을 보관하고
//! core의 [`PlatformParser`] trait을 구현합니다.
//!
//! 배치는 한 보고의 작업 단위입니다. 라인은 입력 순서대로 평가되며, 첫
//! 추출 실패가 배치 전체를 중단시킵니다. 형식이 어긋난 라인은 상류 패턴
//! 드리프트의 신호이므로 부분 결과를 조용히 돌려주지 않습니다.

use std::sync::Arc;

use chrono::NaiveDateTime;

use routelog_core::error::ParseError;
use routelog_core::event::{ExtraMap, RouteEvent};
use routelog_core::parser::PlatformParser;
use routelog_core::request::Request;

use crate::rule::LineRule;

/// 한 플랫폼의 배치 파서
pub struct BatchParser {
    platform: &'static str,
    /// 고정 순서 규칙 목록 -- 첫 번째로 트리거되는 규칙이 이깁니다
    rules: Vec<LineRule>,
}

impl BatchParser {
    /// 규칙 목록으로 배치 파서를 만듭니다. 목록 순서가 곧 평가 순서입니다.
    pub fn new(platform: &'static str, rules: Vec<LineRule>) -> Self {
        Self { platform, rules }
    }

    /// 라인 하나를 파싱합니다.
    ///
    /// 첫 번째로 트리거되는 규칙이 추출을 수행합니다. 어떤 트리거에도
    /// 해당하지 않는 라인은 [`ParseError::NoMatchingParser`] -- 이 플랫폼의
    /// 관심 대상이 아니라는 신호이며, 배치 수준에서는 건너뜁니다.
    /// `Ok(None)`은 전이 상태로 걸러진 유효한 결과입니다.
    pub fn parse_line(
        &self,
        line: &str,
        source: &str,
        timestamp: NaiveDateTime,
        extra: &Arc<ExtraMap>,
    ) -> Result<Option<RouteEvent>, ParseError> {
        for rule in &self.rules {
            if rule.triggers_on(line) {
                return rule.extract(line, source, timestamp, extra);
            }
        }
        Err(ParseError::NoMatchingParser)
    }
}

impl PlatformParser for BatchParser {
    fn platform(&self) -> &str {
        self.platform
    }

    fn parse(&self, request: &Request) -> Result<Vec<RouteEvent>, ParseError> {
        let mut events = Vec::with_capacity(request.messages.len());
        for line in &request.messages {
            match self.parse_line(line, &request.source, request.timestamp, &request.extra) {
                Ok(Some(event)) => events.push(event),
                // 전이 상태 -- 기여 없음
                Ok(None) => {}
                // 이 플랫폼의 관심 대상이 아닌 라인
                Err(ParseError::NoMatchingParser) => {}
                Err(e) => return Err(e),
            }
        }
        if events.is_empty() {
            // 빈 성공은 표현하지 않음 -- 호출자는 "아무 일도 없었다"와
            // "아무것도 이해하지 못했다"를 구분할 수 없음
            return Err(ParseError::NoMatchingParser);
        }
        tracing::debug!(
            platform = self.platform,
            events = events.len(),
            "batch parsed"
        );
        Ok(events)
    }
}

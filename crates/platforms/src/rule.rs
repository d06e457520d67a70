//! 라인 규칙 -- 트리거와 필드 추출 패턴의 쌍
//!
//! 각 플랫폼은 이벤트 종류별로 (트리거, 추출 패턴) 쌍을 선언합니다.
//! 트리거는 전체 패턴 비용을 치르기 전에 "이 라인이 어떤 종류의
//! 메시지인가"를 싸게 판정합니다.
//!
//! 한 플랫폼 안에서 트리거는 상호 배타적이어야 한다는 것이 패턴 셋의
//! 전제 조건입니다. 평가 순서는 규칙 목록 순서로 고정되어 있으므로,
//! 우연히 겹치더라도 어느 패턴이 이기는지는 결정적입니다.

use std::sync::Arc;

use chrono::NaiveDateTime;
use regex::Regex;

use routelog_core::error::ParseError;
use routelog_core::event::{AdjacencyEvent, ExtraMap, PeeringEvent, RouteEvent};
use routelog_core::state::{normalize_adjacency_state, normalize_peering_state};

/// 트리거 -- 전체 추출 패턴 전에 수행하는 저비용 선별 검사
#[derive(Debug)]
pub enum Trigger {
    /// 고정 텍스트 접두사
    Prefix(&'static str),
    /// 라인 앞부분에 앵커된 좁은 패턴
    Anchor(Regex),
}

impl Trigger {
    /// 앵커 패턴 트리거를 컴파일합니다.
    pub fn anchor(pattern: &str) -> Result<Self, ParseError> {
        Ok(Self::Anchor(compile(pattern)?))
    }

    /// 라인이 이 트리거에 해당하는지 검사합니다.
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Self::Prefix(prefix) => line.starts_with(prefix),
            Self::Anchor(regex) => regex.is_match(line),
        }
    }
}

/// 규칙의 이벤트 종류별 구성
#[derive(Debug)]
enum RuleKind {
    /// up 마커는 플랫폼별로 다릅니다 ("new", "up" 등)
    Adjacency { up_marker: &'static str },
    Peering,
}

/// 한 이벤트 종류의 추출 규칙
///
/// 인접 패턴의 명명 그룹: `remote`, `iface`, `state`, 선택적 `reason`.
/// 피어링 패턴의 명명 그룹: `remote`, `remote_as`, `state`, `table`.
/// 패턴은 점/콜론(IPv6)/하이픈을 포함하는 식별자와, 보통은 없는 선택적
/// 후행 절을 허용해야 합니다. 추출된 모든 필드는 양끝 공백이 트리밍됩니다.
#[derive(Debug)]
pub struct LineRule {
    trigger: Trigger,
    pattern: Regex,
    kind: RuleKind,
}

impl LineRule {
    /// 인접 이벤트 규칙을 만듭니다. 패턴은 이 시점에 컴파일됩니다.
    pub fn adjacency(
        trigger: Trigger,
        pattern: &str,
        up_marker: &'static str,
    ) -> Result<Self, ParseError> {
        Ok(Self {
            trigger,
            pattern: compile(pattern)?,
            kind: RuleKind::Adjacency { up_marker },
        })
    }

    /// 피어링 이벤트 규칙을 만듭니다. 패턴은 이 시점에 컴파일됩니다.
    pub fn peering(trigger: Trigger, pattern: &str) -> Result<Self, ParseError> {
        Ok(Self {
            trigger,
            pattern: compile(pattern)?,
            kind: RuleKind::Peering,
        })
    }

    /// 라인이 이 규칙의 트리거에 해당하는지 검사합니다.
    pub fn triggers_on(&self, line: &str) -> bool {
        self.trigger.matches(line)
    }

    /// 트리거된 라인에서 이벤트를 추출합니다.
    ///
    /// 전체 패턴이 매칭되지 않거나 필수 명명 그룹이 빠지면
    /// [`ParseError::IncompleteMatch`]입니다 -- "이벤트 없음"이 아니라 하드
    /// 실패입니다. 전이 상태로 정규화되는 인접 라인은 `Ok(None)` -- 유효하지만
    /// 이벤트를 내지 않는 결과입니다. `original`은 라인을 그대로 보존합니다.
    pub fn extract(
        &self,
        line: &str,
        source: &str,
        timestamp: NaiveDateTime,
        extra: &Arc<ExtraMap>,
    ) -> Result<Option<RouteEvent>, ParseError> {
        let Some(caps) = self.pattern.captures(line) else {
            tracing::warn!(line, "triggered pattern failed to extract fields");
            return Err(ParseError::IncompleteMatch {
                line: line.to_owned(),
            });
        };

        let required = |name: &str| -> Result<String, ParseError> {
            caps.name(name)
                .map(|m| m.as_str().trim().to_owned())
                .ok_or_else(|| {
                    tracing::warn!(line, group = name, "capture group missing from match");
                    ParseError::IncompleteMatch {
                        line: line.to_owned(),
                    }
                })
        };

        match &self.kind {
            RuleKind::Adjacency { up_marker } => {
                let state_token = required("state")?;
                let remote = required("remote")?;
                let interface = required("iface")?;
                let reason = caps
                    .name("reason")
                    .map(|m| m.as_str().trim().to_owned())
                    .unwrap_or_default();

                let Some(state) = normalize_adjacency_state(&state_token, up_marker) else {
                    // 전이 상태 -- 이벤트 없음, 에러 아님
                    return Ok(None);
                };

                Ok(Some(RouteEvent::Adjacency(AdjacencyEvent {
                    local: source.to_owned(),
                    remote,
                    timestamp,
                    state,
                    interface,
                    reason,
                    extra: Arc::clone(extra),
                    original: line.to_owned(),
                })))
            }
            RuleKind::Peering => {
                let state_token = required("state")?;
                let remote = required("remote")?;
                let remote_as = required("remote_as")?;
                let table = required("table")?;

                Ok(Some(RouteEvent::Peering(PeeringEvent {
                    local: source.to_owned(),
                    remote,
                    timestamp,
                    state: normalize_peering_state(&state_token),
                    remote_as,
                    table,
                    extra: Arc::clone(extra),
                    original: line.to_owned(),
                })))
            }
        }
    }
}

/// 패턴을 컴파일합니다. 실패는 구성 시점 에러로 전파됩니다.
fn compile(pattern: &str) -> Result<Regex, ParseError> {
    Regex::new(pattern).map_err(|e| ParseError::Pattern {
        pattern: pattern.to_owned(),
        reason: e.to_string(),
    })
}

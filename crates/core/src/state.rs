//! 상태 정규화 — 벤더 상태 토큰을 두 값 열거형으로 변환
//!
//! 각 플랫폼이 내보내는 자유 텍스트 상태 토큰("Established", "UP",
//! "new L2" 등)을 [`State`]로 정규화합니다. 매칭은 대소문자 무시 부분
//! 문자열 포함 검사입니다. 벤더 텍스트 변형("UP", "up", "New")을 리터럴
//! 열거 없이 수용합니다.
//!
//! 인접 경로에는 세 번째 결과가 있습니다. 전이 상태 토큰("initializing"
//! 등)은 `None`으로 정규화되어 이벤트를 만들지 않습니다. 이는 `Down`과
//! 구분되는 결과이며, 에러도 아닙니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 인접/피어링 세션의 두 값 상태
///
/// 정규화 바깥에서 관찰 가능한 상태 값은 이 둘뿐입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    /// 세션/인접 성립
    Up,
    /// 세션/인접 끊김
    Down,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// 전이 상태 마커
///
/// 이 부분 문자열을 포함하는 인접 상태 토큰은 이벤트를 만들지 않습니다.
pub const TRANSITIONAL_MARKER: &str = "init";

/// 피어링 up 마커 — 모든 플랫폼 공통
pub const PEERING_UP_MARKER: &str = "established";

/// 인접(IS-IS 계열) 상태 토큰을 정규화합니다.
///
/// 전이 마커([`TRANSITIONAL_MARKER`])를 먼저 확인하여 `None`을 반환하고,
/// 그 다음 플랫폼별 `up_marker`("new", "up" 등)를 확인합니다. 그 외 토큰은
/// 모두 `Down`입니다.
///
/// `None`은 "이벤트를 내지 않음"이며 `Some(State::Down)`과 혼동해서는
/// 안 됩니다.
pub fn normalize_adjacency_state(token: &str, up_marker: &str) -> Option<State> {
    let token = token.to_lowercase();
    if token.contains(TRANSITIONAL_MARKER) {
        return None;
    }
    if token.contains(&up_marker.to_lowercase()) {
        return Some(State::Up);
    }
    Some(State::Down)
}

/// 피어링(BGP 계열) 상태 토큰을 정규화합니다.
///
/// 토큰이 [`PEERING_UP_MARKER`]를 포함할 때에만 `Up`이며, 그 외("Idle",
/// "Active", "Connect" 등 전이 상태 포함)는 모두 `Down`입니다. 실패 모드가
/// 없습니다.
pub fn normalize_peering_state(token: &str) -> State {
    if token.to_lowercase().contains(PEERING_UP_MARKER) {
        State::Up
    } else {
        State::Down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_display() {
        assert_eq!(State::Up.to_string(), "up");
        assert_eq!(State::Down.to_string(), "down");
    }

    #[test]
    fn state_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&State::Up).unwrap(), "\"up\"");
        assert_eq!(serde_json::to_string(&State::Down).unwrap(), "\"down\"");
    }

    #[test]
    fn adjacency_up_marker_case_insensitive() {
        assert_eq!(normalize_adjacency_state("UP", "up"), Some(State::Up));
        assert_eq!(normalize_adjacency_state("up", "up"), Some(State::Up));
        assert_eq!(normalize_adjacency_state("new L2", "new"), Some(State::Up));
        assert_eq!(normalize_adjacency_state("New L1", "new"), Some(State::Up));
    }

    #[test]
    fn adjacency_unknown_token_falls_back_to_down() {
        assert_eq!(normalize_adjacency_state("lost L2", "new"), Some(State::Down));
        assert_eq!(normalize_adjacency_state("DOWN", "up"), Some(State::Down));
        assert_eq!(normalize_adjacency_state("gone", "up"), Some(State::Down));
    }

    #[test]
    fn adjacency_transitional_is_filtered() {
        assert_eq!(normalize_adjacency_state("INIT", "up"), None);
        assert_eq!(normalize_adjacency_state("initializing", "up"), None);
        assert_eq!(normalize_adjacency_state("Init", "new"), None);
    }

    #[test]
    fn transitional_wins_over_up_marker() {
        // up 마커가 토큰 안에 함께 있어도 전이 마커가 우선
        assert_eq!(normalize_adjacency_state("init-up", "up"), None);
    }

    #[test]
    fn peering_established_is_up() {
        assert_eq!(normalize_peering_state("Established"), State::Up);
        assert_eq!(normalize_peering_state("ESTABLISHED"), State::Up);
        assert_eq!(normalize_peering_state("established"), State::Up);
    }

    #[test]
    fn peering_everything_else_is_down() {
        assert_eq!(normalize_peering_state("Idle"), State::Down);
        assert_eq!(normalize_peering_state("Active"), State::Down);
        assert_eq!(normalize_peering_state("Connect"), State::Down);
        assert_eq!(normalize_peering_state("OpenConfirm"), State::Down);
        assert_eq!(normalize_peering_state(""), State::Down);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normalize_never_panics(token in ".{0,200}", marker in "[a-z]{1,10}") {
                let _ = normalize_adjacency_state(&token, &marker);
                let _ = normalize_peering_state(&token);
            }

            #[test]
            fn peering_up_iff_contains_established(token in "[A-Za-z ]{0,60}") {
                let state = normalize_peering_state(&token);
                let contains = token.to_lowercase().contains("established");
                prop_assert_eq!(state == State::Up, contains);
            }
        }
    }
}

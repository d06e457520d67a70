//! Junos 플랫폼 패턴 셋
//!
//! IS-IS 인접 메시지와 BGP 피어링 메시지를 지원합니다. 트리거는 고정
//! 텍스트 접두사이며 서로 배타적입니다.
//!
//! 메시지 예:
//! ```text
//! IS-IS new L2 adjacency to er02.hnl01.as14525.net on ae0.3613
//! IS-IS lost L2 adjacency to er02.hnl01.as14525.net on ae0.3613, reason: Aged out
//! BGP peer 2604:c0c0:3000::13e2 (Internal AS 14525) changed state from OpenConfirm to Established (event RecvKeepAlive) (instance master)
//! ```

use routelog_core::error::ParseError;

use crate::batch::BatchParser;
use crate::rule::{LineRule, Trigger};

/// 플랫폼 식별자
pub const PLATFORM: &str = "junos";

/// 인접 상태 토큰의 up 마커 -- "new ... adjacency" 꼴의 메시지
const ADJACENCY_UP_MARKER: &str = "new";

const ADJACENCY_PATTERN: &str =
    r"^IS-IS (?P<state>.+) .+ to (?P<remote>.+) on (?P<iface>[\w.]+)(, reason: (?P<reason>.+))?$";

const PEERING_PATTERN: &str = r"^BGP peer (?P<remote>.+) \(.+AS (?P<remote_as>\d+).+changed state from \S+ to (?P<state>\S+).*\(instance (?P<table>\S+)\).*$";

/// junos 배치 파서를 구성합니다. 규칙 순서는 인접, 피어링으로 고정입니다.
pub fn parser() -> Result<BatchParser, ParseError> {
    Ok(BatchParser::new(
        PLATFORM,
        vec![
            LineRule::adjacency(
                Trigger::Prefix("IS-IS"),
                ADJACENCY_PATTERN,
                ADJACENCY_UP_MARKER,
            )?,
            LineRule::peering(Trigger::Prefix("BGP peer"), PEERING_PATTERN)?,
        ],
    ))
}

//! Arista 플랫폼 패턴 셋
//!
//! L2 네이버 인접 메시지와 VRF 피어링 메시지를 지원합니다. 트리거는 라인
//! 앞부분에 앵커된 좁은 패턴이며 서로 배타적입니다.
//!
//! 인접 메시지는 전이 상태(INIT)를 보고할 수 있고, 이 경우 이벤트 없이
//! 걸러집니다.
//!
//! 메시지 예:
//! ```text
//! L2 Neighbor State Change for SystemID 1004.2550.1100 on Et5 to UP
//! L2 Neighbor State Change for SystemID 1004.2550.1100 on Et5 to DOWN: interface went down
//! peer 10.0.0.1 (VRF default AS 65000) old state OpenConfirm event Established new state Established
//! ```

use routelog_core::error::ParseError;

use crate::batch::BatchParser;
use crate::rule::{LineRule, Trigger};

/// 플랫폼 식별자
pub const PLATFORM: &str = "arista";

/// 인접 상태 토큰의 up 마커 -- "... to UP" 꼴의 메시지
const ADJACENCY_UP_MARKER: &str = "up";

const ADJACENCY_TRIGGER: &str = r"^L[12] Neighbor";
const PEERING_TRIGGER: &str = r"^peer [0-9a-f.:]+";

const ADJACENCY_PATTERN: &str = r"^L2 Neighbor State Change .+ SystemID (?P<remote>\S+) on (?P<iface>\S+).*to (?P<state>\S+)(: (?P<reason>.+))?$";

const PEERING_PATTERN: &str = r"^peer (?P<remote>\S+) \(VRF (?P<table>\S+) AS (?P<remote_as>\S+)\) old .+ new state (?P<state>\S+)$";

/// arista 배치 파서를 구성합니다. 규칙 순서는 인접, 피어링으로 고정입니다.
pub fn parser() -> Result<BatchParser, ParseError> {
    Ok(BatchParser::new(
        PLATFORM,
        vec![
            LineRule::adjacency(
                Trigger::anchor(ADJACENCY_TRIGGER)?,
                ADJACENCY_PATTERN,
                ADJACENCY_UP_MARKER,
            )?,
            LineRule::peering(Trigger::anchor(PEERING_TRIGGER)?, PEERING_PATTERN)?,
        ],
    ))
}

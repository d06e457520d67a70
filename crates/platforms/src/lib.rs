#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`rule`]: (트리거, 추출 패턴) 쌍과 명명 그룹 필드 추출
//! - [`junos`], [`arista`]: 플랫폼별 패턴 셋
//! - [`batch`]: 배치 파서 -- fail-fast, 전부-아니면-전무
//! - [`registry`]: 플랫폼 레지스트리 / 디스패처
//!
//! # 아키텍처
//!
//! ```text
//! Request -> PlatformRegistry -> BatchParser -> LineRule -> RouteEvent
//!                |                   |             |
//!           platform id 조회     라인 순회      trigger + 추출 패턴
//! ```

pub mod arista;
pub mod batch;
pub mod junos;
pub mod registry;
pub mod rule;

// --- 주요 타입 re-export ---

// 배치 파서
pub use batch::BatchParser;

// 레지스트리
pub use registry::PlatformRegistry;

// 규칙 기본 요소
pub use rule::{LineRule, Trigger};

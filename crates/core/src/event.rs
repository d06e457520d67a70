//! 이벤트 모델 — 라우팅 인접 상태 전이의 구조화 표현
//!
//! [`RouteEvent`]는 두 변형을 갖는 닫힌 태그드 유니언입니다.
//! [`AdjacencyEvent`]는 링크 계층 네이버 관계(IS-IS 계열)의 전이를,
//! [`PeeringEvent`]는 라우팅 테이블과 AS 번호로 한정되는 프로토콜 세션
//! (BGP 계열)의 전이를 나타냅니다.
//!
//! 이벤트는 불변 값 객체입니다. 요청에 대한 역참조를 갖지 않으며, 생성 후
//! 호출자가 소유합니다. `extra` 메타데이터 맵만 요청과 `Arc`로 공유합니다.
//! 맵은 디코딩 이후 변경되지 않으므로 스레드 간 공유에 별도 동기화가
//! 필요 없습니다.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::state::State;

/// 요청 메타데이터 맵 — 코어는 내용을 해석하지 않고 그대로 전달합니다
pub type ExtraMap = serde_json::Map<String, Value>;

/// 이벤트 종류 태그
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// 링크 계층 인접 (IS-IS 계열)
    Adjacency,
    /// 프로토콜 피어링 세션 (BGP 계열)
    Peering,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adjacency => write!(f, "adjacency"),
            Self::Peering => write!(f, "peering"),
        }
    }
}

/// 안정 해시 협력자 trait
///
/// 이벤트 핑거프린트 생성은 외부 협력자에 위임됩니다. 코어는 해시 알고리즘을
/// 내장하지 않으며, 해시에 투입되는 필드와 그 순서만 정의합니다
/// ([`RouteEvent::identity`]).
pub trait IdentityHasher {
    /// 순서 있는 필드 목록에 대한 안정 다이제스트를 생성합니다.
    fn digest(&self, parts: &[&str]) -> String;
}

/// 인접 이벤트 — 공유 인터페이스 위 직접 네이버 관계의 상태 전이
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjacencyEvent {
    /// 보고 장비 (요청의 source)
    pub local: String,
    /// 원격 네이버 식별자
    pub remote: String,
    /// 이벤트 시각 (요청 타임스탬프를 그대로 부착)
    pub timestamp: NaiveDateTime,
    /// 정규화된 상태
    pub state: State,
    /// 로컬/출구 인터페이스 식별자
    pub interface: String,
    /// down 전이 사유 — 원문에 사유 절이 없으면 빈 문자열
    pub reason: String,
    /// 요청 메타데이터 (Arc 공유)
    pub extra: Arc<ExtraMap>,
    /// 원본 메시지 텍스트 (무수정)
    pub original: String,
}

impl fmt::Display for AdjacencyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AdjacencyEvent local={} remote={} interface={} state={}",
            self.local, self.remote, self.interface, self.state,
        )
    }
}

/// 피어링 이벤트 — 라우팅 인스턴스와 AS 번호로 한정되는 세션의 상태 전이
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeeringEvent {
    /// 보고 장비 (요청의 source)
    pub local: String,
    /// 원격 피어 식별자
    pub remote: String,
    /// 이벤트 시각 (요청 타임스탬프를 그대로 부착)
    pub timestamp: NaiveDateTime,
    /// 정규화된 상태
    pub state: State,
    /// 원격 AS 번호 — 숫자 텍스트를 그대로 보존 (정수로 파싱하지 않음)
    pub remote_as: String,
    /// 라우팅 테이블 / 인스턴스 이름 (VRF 등)
    pub table: String,
    /// 요청 메타데이터 (Arc 공유)
    pub extra: Arc<ExtraMap>,
    /// 원본 메시지 텍스트 (무수정)
    pub original: String,
}

impl fmt::Display for PeeringEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PeeringEvent local={} remote={} as={} table={} state={}",
            self.local, self.remote, self.remote_as, self.table, self.state,
        )
    }
}

/// 라우팅 이벤트 — 닫힌 태그드 유니언
///
/// 직렬화 시 `type` 필드("adjacency" | "peering")로 변형이 구분됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RouteEvent {
    /// 링크 계층 인접 이벤트
    Adjacency(AdjacencyEvent),
    /// 프로토콜 피어링 이벤트
    Peering(PeeringEvent),
}

impl RouteEvent {
    /// 이벤트 종류 태그
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Adjacency(_) => EventKind::Adjacency,
            Self::Peering(_) => EventKind::Peering,
        }
    }

    /// 다른 이벤트와 같은 종류인지 검사합니다.
    pub fn is(&self, other: &RouteEvent) -> bool {
        self.kind() == other.kind()
    }

    /// 정규화된 상태
    pub fn state(&self) -> State {
        match self {
            Self::Adjacency(e) => e.state,
            Self::Peering(e) => e.state,
        }
    }

    /// 상태가 Up인지
    pub fn up(&self) -> bool {
        self.state() == State::Up
    }

    /// 상태가 Down인지
    pub fn down(&self) -> bool {
        self.state() == State::Down
    }

    /// 직렬화 방식에 중립적인 속성 맵 뷰를 생성합니다.
    ///
    /// 키 집합은 변형별로 고정되어 있습니다. 인접: `type`, `local`,
    /// `remote`, `timestamp`, `state`, `interface`, `reason`, `extra`,
    /// `original`. 피어링: `interface`/`reason` 대신 `remote_as`, `table`.
    pub fn attrs(&self) -> ExtraMap {
        let mut attrs = ExtraMap::new();
        match self {
            Self::Adjacency(e) => {
                attrs.insert("type".to_owned(), json!(EventKind::Adjacency));
                attrs.insert("local".to_owned(), json!(e.local));
                attrs.insert("remote".to_owned(), json!(e.remote));
                attrs.insert("timestamp".to_owned(), json!(e.timestamp));
                attrs.insert("state".to_owned(), json!(e.state));
                attrs.insert("interface".to_owned(), json!(e.interface));
                attrs.insert("reason".to_owned(), json!(e.reason));
                attrs.insert("extra".to_owned(), Value::Object((*e.extra).clone()));
                attrs.insert("original".to_owned(), json!(e.original));
            }
            Self::Peering(e) => {
                attrs.insert("type".to_owned(), json!(EventKind::Peering));
                attrs.insert("local".to_owned(), json!(e.local));
                attrs.insert("remote".to_owned(), json!(e.remote));
                attrs.insert("timestamp".to_owned(), json!(e.timestamp));
                attrs.insert("state".to_owned(), json!(e.state));
                attrs.insert("remote_as".to_owned(), json!(e.remote_as));
                attrs.insert("table".to_owned(), json!(e.table));
                attrs.insert("extra".to_owned(), Value::Object((*e.extra).clone()));
                attrs.insert("original".to_owned(), json!(e.original));
            }
        }
        attrs
    }

    /// 핑거프린트에 투입되는 고정 순서 식별 필드 목록
    ///
    /// 인접: `[local, remote, interface]`.
    /// 피어링: `[local, remote, remote_as, table]`.
    pub fn identity(&self) -> Vec<&str> {
        match self {
            Self::Adjacency(e) => vec![e.local.as_str(), e.remote.as_str(), e.interface.as_str()],
            Self::Peering(e) => vec![
                e.local.as_str(),
                e.remote.as_str(),
                e.remote_as.as_str(),
                e.table.as_str(),
            ],
        }
    }

    /// 외부 해시 협력자에 위임하여 콘텐츠 핑거프린트를 생성합니다.
    pub fn fingerprint<H>(&self, hasher: &H) -> String
    where
        H: IdentityHasher + ?Sized,
    {
        hasher.digest(&self.identity())
    }
}

impl fmt::Display for RouteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adjacency(e) => e.fmt(f),
            Self::Peering(e) => e.fmt(f),
        }
    }
}

//! 플랫폼 레지스트리 -- 플랫폼 식별자를 배치 파서로 라우팅
//!
//! [`PlatformRegistry`]는 시작 시점에 명시적으로 구성되는 불변 값입니다.
//! 런타임 변경 경로가 없으며, 플랫폼 추가는 배포 시점의 변경입니다.
//! 구성 이후에는 잠금 없이 스레드 간 공유할 수 있습니다.
//!
//! # 사용 예시
//! ```
//! use routelog_core::request::Request;
//! use routelog_platforms::PlatformRegistry;
//!
//! let registry = PlatformRegistry::with_defaults().unwrap();
//! let request = Request::from_slice(br#"{
//!     "message":"IS-IS new L2 adjacency to er02.hnl01.as14525.net on ae0.3613",
//!     "platform":"junos",
//!     "source":"er01.gvl01.as14525.net",
//!     "timestamp":"2024-07-13 21:57:59"
//! }"#).unwrap();
//! let events = registry.dispatch(&request).unwrap();
//! assert_eq!(events.len(), 1);
//! ```

use routelog_core::error::ParseError;
use routelog_core::event::RouteEvent;
use routelog_core::parser::PlatformParser;
use routelog_core::request::Request;

use crate::{arista, junos};

/// 플랫폼 레지스트리 -- 순수 라우팅만 수행합니다
pub struct PlatformRegistry {
    /// 등록 순서 유지 -- 같은 식별자가 중복 등록되면 먼저 등록된 쪽이 이깁니다
    parsers: Vec<Box<dyn PlatformParser>>,
}

impl PlatformRegistry {
    /// 빈 레지스트리를 생성합니다.
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// 기본 플랫폼 셋(junos, arista)으로 레지스트리를 구성합니다.
    pub fn with_defaults() -> Result<Self, ParseError> {
        Ok(Self::new()
            .register(Box::new(junos::parser()?))
            .register(Box::new(arista::parser()?)))
    }

    /// 파서를 등록합니다.
    pub fn register(mut self, parser: Box<dyn PlatformParser>) -> Self {
        self.parsers.push(parser);
        self
    }

    /// 요청을 해당 플랫폼의 배치 파서로 라우팅합니다.
    ///
    /// 등록되지 않은 플랫폼 식별자는 패턴 로직을 전혀 거치지 않고
    /// [`ParseError::NoMatchingPlatform`]입니다.
    pub fn dispatch(&self, request: &Request) -> Result<Vec<RouteEvent>, ParseError> {
        let Some(parser) = self
            .parsers
            .iter()
            .find(|p| p.platform() == request.platform)
        else {
            return Err(ParseError::NoMatchingPlatform {
                platform: request.platform.clone(),
            });
        };
        tracing::debug!(platform = %request.platform, "dispatching parse request");
        parser.parse(request)
    }

    /// 등록된 플랫폼 식별자 목록 (등록 순서)
    pub fn registered_platforms(&self) -> Vec<&str> {
        self.parsers.iter().map(|p| p.platform()).collect()
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveDateTime;

    use routelog_core::event::ExtraMap;

    fn request(platform: &str, lines: &[&str]) -> Request {
        Request {
            messages: lines.iter().map(|l| (*l).to_owned()).collect(),
            platform: platform.to_owned(),
            source: "device01".to_owned(),
            timestamp: NaiveDateTime::parse_from_str("2024-07-13 21:57:59", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            extra: Arc::new(ExtraMap::new()),
        }
    }

    #[test]
    fn with_defaults_registers_both_platforms() {
        let registry = PlatformRegistry::with_defaults().unwrap();
        assert_eq!(registry.registered_platforms(), vec!["junos", "arista"]);
    }

    #[test]
    fn empty_registry_knows_no_platform() {
        let registry = PlatformRegistry::new();
        let result = registry.dispatch(&request("junos", &["IS-IS new L2 adjacency to r1 on ae0"]));
        assert!(matches!(
            result,
            Err(ParseError::NoMatchingPlatform { .. })
        ));
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let registry = PlatformRegistry::with_defaults().unwrap();
        let result = registry.dispatch(&request("no-match", &["anything"]));
        match result {
            Err(ParseError::NoMatchingPlatform { platform }) => {
                assert_eq!(platform, "no-match");
            }
            other => panic!("expected NoMatchingPlatform, got {other:?}"),
        }
    }

    #[test]
    fn empty_platform_is_rejected() {
        // 빈 플랫폼 문자열은 디코딩을 통과하지만 여기서 걸러짐
        let registry = PlatformRegistry::with_defaults().unwrap();
        let result = registry.dispatch(&request("", &["anything"]));
        assert!(matches!(
            result,
            Err(ParseError::NoMatchingPlatform { .. })
        ));
    }

    #[test]
    fn dispatch_routes_by_platform_id() {
        let registry = PlatformRegistry::with_defaults().unwrap();

        let events = registry
            .dispatch(&request(
                "junos",
                &["IS-IS new L2 adjacency to er02.hnl01.as14525.net on ae0.3613"],
            ))
            .unwrap();
        assert_eq!(events.len(), 1);

        let events = registry
            .dispatch(&request(
                "arista",
                &["L2 Neighbor State Change for SystemID 1004.2550.1100 on Et5 to UP"],
            ))
            .unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn custom_parser_can_be_registered() {
        struct NullParser;

        impl PlatformParser for NullParser {
            fn platform(&self) -> &str {
                "null"
            }

            fn parse(&self, _request: &Request) -> Result<Vec<RouteEvent>, ParseError> {
                Err(ParseError::NoMatchingParser)
            }
        }

        let registry = PlatformRegistry::new().register(Box::new(NullParser));
        assert_eq!(registry.registered_platforms(), vec!["null"]);
        let result = registry.dispatch(&request("null", &["x"]));
        assert!(matches!(result, Err(ParseError::NoMatchingParser)));
    }

    #[test]
    fn registry_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PlatformRegistry>();
    }
}

use super::group::ScenarioGroup;

/// 사용자에게 보여줄 고정 문구를 가진 스위처 오류이다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwitcherError {
    /// 목록 조회 실패.
    #[error("시나리오를 불러오지 못했습니다. 백엔드가 실행 중인지 확인하세요.")]
    Retrieval,
    /// 시나리오 적용 실패.
    #[error("시나리오를 적용하지 못했습니다. 네트워크 연결을 확인하세요.")]
    Apply,
    /// 다른 작업이 진행 중이라 요청을 거부했다.
    #[error("이전 작업이 끝난 뒤 다시 시도하세요.")]
    Busy,
}

/// 조회/적용 작업의 진행 상태이다. 한 번에 하나의 작업만 진행된다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Activity {
    /// 대기 중.
    #[default]
    Idle,
    /// 목록 조회 중.
    Fetching,
    /// 시나리오 적용 중.
    Applying { identity: String },
    /// 마지막 작업이 실패했다.
    Failed(SwitcherError),
}

impl Activity {
    /// 작업이 진행 중인지 여부.
    pub fn is_loading(&self) -> bool {
        matches!(self, Activity::Fetching | Activity::Applying { .. })
    }

    /// 표시할 오류가 있으면 반환한다.
    pub fn error(&self) -> Option<&SwitcherError> {
        match self {
            Activity::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// 목록 영역에 무엇을 그릴지 결정하는 파생 상태이다.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    /// 작업 진행 중 스피너.
    Loading,
    /// 검색어 없이 목록이 비어 있다.
    Empty,
    /// 검색 결과가 없다.
    NoMatches,
    /// 그룹별 목록.
    Groups(Vec<ScenarioGroup>),
}

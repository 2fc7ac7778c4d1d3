use crate::scenario::ScenarioEntry;
use crate::source::SourceError;

/// 백그라운드 작업에서 UI로 전달되는 완료 이벤트이다.
#[derive(Debug, Clone)]
pub enum SwitcherEvent {
    /// 목록 조회 완료.
    ScenariosFetched(Result<Vec<ScenarioEntry>, SourceError>),
    /// 시나리오 적용 완료.
    ScenarioApplied {
        entry: ScenarioEntry,
        result: Result<(), SourceError>,
    },
}

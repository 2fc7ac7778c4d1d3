mod filter;
mod group;
mod status;

pub use filter::filter_scenarios;
pub use group::{ALL_SCENARIOS_GROUP, ScenarioGroup, UNGROUPED_GROUP, group_scenarios};
pub use status::{Activity, ListView, SwitcherError};

use crate::config::SwitcherConfig;
use crate::scenario::ScenarioEntry;
use crate::source::SourceError;
use std::collections::HashSet;

/// 아직 아무 시나리오도 적용하지 않았음을 뜻하는 표식.
pub const DEFAULT_SCENARIO: &str = "default";

/// 적용 작업 완료를 반영한 결과이다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// 적용 성공. `reload`가 참이면 호스트가 스위처를 다시 띄워야 한다.
    Applied { identity: String, reload: bool },
    /// 적용 실패. 오류 문구가 설정되었다.
    Failed,
    /// 진행 중인 적용 작업이 없어 무시했다.
    Ignored,
}

/// 시나리오 스위처의 상태 모델이다.
///
/// 원격 호출은 하지 않는다. 호출 측이 `begin_*`으로 작업을 열고
/// 결과가 도착하면 `finish_*`로 닫는다.
#[derive(Debug, Clone)]
pub struct ScenarioSwitcher {
    /// 마지막으로 받아온 전체 목록.
    scenarios: Vec<ScenarioEntry>,
    /// 전체 목록과 검색어에서 파생된 목록.
    filtered: Vec<ScenarioEntry>,
    /// 사용자 검색어.
    search_term: String,
    /// 패널 열림 여부.
    open: bool,
    /// 진행 상태.
    activity: Activity,
    /// 현재 적용된 시나리오 식별자.
    current_scenario: String,
    /// 펼쳐진 그룹 키.
    expanded_groups: HashSet<String>,
    /// 접두사 그룹핑 사용 여부.
    group_enabled: bool,
    /// 적용 후 호스트 재시작 여부.
    auto_reload: bool,
}

impl ScenarioSwitcher {
    /// 설정을 받아 초기 상태를 구성한다.
    pub fn new(config: &SwitcherConfig) -> Self {
        Self {
            scenarios: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            open: false,
            activity: Activity::Idle,
            current_scenario: DEFAULT_SCENARIO.to_string(),
            expanded_groups: HashSet::new(),
            group_enabled: config.group_scenarios,
            auto_reload: config.auto_reload,
        }
    }

    /// 재시작 전에 적용된 식별자를 이어받는다.
    pub fn with_current_scenario(mut self, identity: impl Into<String>) -> Self {
        self.current_scenario = identity.into();
        self
    }

    pub fn scenarios(&self) -> &[ScenarioEntry] {
        &self.scenarios
    }

    pub fn filtered(&self) -> &[ScenarioEntry] {
        &self.filtered
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn is_loading(&self) -> bool {
        self.activity.is_loading()
    }

    /// 오류 배너에 표시할 문구.
    pub fn error_message(&self) -> Option<String> {
        self.activity.error().map(ToString::to_string)
    }

    pub fn current_scenario(&self) -> &str {
        &self.current_scenario
    }

    /// 기본 표식이 아닌 시나리오가 적용된 상태인지 여부.
    pub fn has_applied_scenario(&self) -> bool {
        self.current_scenario != DEFAULT_SCENARIO
    }

    pub fn is_current(&self, entry: &ScenarioEntry) -> bool {
        entry.identity() == self.current_scenario.as_str()
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded_groups.contains(key)
    }

    pub fn expanded_groups(&self) -> &HashSet<String> {
        &self.expanded_groups
    }

    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// 검색어를 바꾸고 필터링된 목록을 다시 계산한다.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.refilter();
    }

    /// 그룹 펼침 상태를 뒤집는다.
    pub fn toggle_group(&mut self, key: &str) {
        if !self.expanded_groups.remove(key) {
            self.expanded_groups.insert(key.to_string());
        }
    }

    /// 목록 조회를 시작한다. 다른 작업이 진행 중이면 거부한다.
    pub fn begin_fetch(&mut self) -> Result<(), SwitcherError> {
        self.ensure_idle("목록 조회")?;
        self.activity = Activity::Fetching;
        Ok(())
    }

    /// 목록 조회 결과를 반영한다. 실패하면 기존 목록은 그대로 둔다.
    pub fn finish_fetch(&mut self, result: Result<Vec<ScenarioEntry>, SourceError>) {
        if self.activity != Activity::Fetching {
            tracing::warn!("진행 중인 조회가 없어 결과를 무시합니다.");
            return;
        }
        match result {
            Ok(scenarios) => {
                tracing::info!(count = scenarios.len(), "시나리오 목록 갱신");
                self.scenarios = scenarios;
                self.refilter();
                self.activity = Activity::Idle;
            }
            Err(err) => {
                tracing::error!(error = %err, "시나리오 목록 조회 실패");
                self.activity = Activity::Failed(SwitcherError::Retrieval);
            }
        }
    }

    /// 시나리오 적용을 시작한다. 목록 소속 여부는 다시 확인하지 않는다.
    pub fn begin_apply(&mut self, entry: &ScenarioEntry) -> Result<(), SwitcherError> {
        self.ensure_idle("시나리오 적용")?;
        self.activity = Activity::Applying {
            identity: entry.identity().into_owned(),
        };
        Ok(())
    }

    /// 적용 결과를 반영한다.
    ///
    /// 성공하면 현재 표식을 갱신하고 패널을 닫는다. 실패하면 오류 문구만 남기고
    /// 패널과 현재 표식은 그대로 둔다.
    pub fn finish_apply(
        &mut self,
        entry: &ScenarioEntry,
        result: Result<(), SourceError>,
    ) -> ApplyOutcome {
        if !matches!(self.activity, Activity::Applying { .. }) {
            tracing::warn!("진행 중인 적용 작업이 없어 결과를 무시합니다.");
            return ApplyOutcome::Ignored;
        }
        let identity = entry.identity().into_owned();
        match result {
            Ok(()) => {
                tracing::info!(scenario = %identity, "시나리오 적용 완료");
                self.current_scenario = identity.clone();
                self.open = false;
                self.activity = Activity::Idle;
                ApplyOutcome::Applied {
                    identity,
                    reload: self.auto_reload,
                }
            }
            Err(err) => {
                tracing::error!(scenario = %identity, error = %err, "시나리오 적용 실패");
                self.activity = Activity::Failed(SwitcherError::Apply);
                ApplyOutcome::Failed
            }
        }
    }

    /// 현재 필터링된 목록을 그룹으로 나눈다.
    pub fn groups(&self) -> Vec<ScenarioGroup> {
        group_scenarios(&self.filtered, self.group_enabled)
    }

    /// 목록 영역의 표시 상태를 계산한다.
    pub fn list_view(&self) -> ListView {
        if self.is_loading() {
            ListView::Loading
        } else if self.filtered.is_empty() {
            if self.search_term.is_empty() {
                ListView::Empty
            } else {
                ListView::NoMatches
            }
        } else {
            ListView::Groups(self.groups())
        }
    }

    fn ensure_idle(&self, operation: &str) -> Result<(), SwitcherError> {
        if self.is_loading() {
            tracing::warn!(operation, activity = ?self.activity, "작업 진행 중이라 요청을 거부합니다.");
            return Err(SwitcherError::Busy);
        }
        Ok(())
    }

    fn refilter(&mut self) {
        self.filtered = filter_scenarios(&self.scenarios, &self.search_term);
    }
}

use crate::scenario::ScenarioEntry;

/// 그룹핑을 끈 경우 사용하는 단일 그룹 이름.
pub const ALL_SCENARIOS_GROUP: &str = "All Scenarios";
/// `/`가 없는 시나리오가 모이는 그룹 이름.
pub const UNGROUPED_GROUP: &str = "General";

/// 식별자 접두사를 공유하는 시나리오 묶음이다. 렌더링마다 새로 계산한다.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioGroup {
    /// 그룹 키.
    pub key: String,
    /// 필터링된 목록에서의 상대 순서를 유지한 구성원.
    pub scenarios: Vec<ScenarioEntry>,
}

/// 필터링된 목록을 그룹으로 나눈다. 그룹 순서는 처음 등장한 순서를 따른다.
pub fn group_scenarios(scenarios: &[ScenarioEntry], enabled: bool) -> Vec<ScenarioGroup> {
    if !enabled {
        return vec![ScenarioGroup {
            key: ALL_SCENARIOS_GROUP.to_string(),
            scenarios: scenarios.to_vec(),
        }];
    }
    let mut groups: Vec<ScenarioGroup> = Vec::new();
    for scenario in scenarios {
        let key = group_key(&scenario.identity());
        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => group.scenarios.push(scenario.clone()),
            None => groups.push(ScenarioGroup {
                key,
                scenarios: vec![scenario.clone()],
            }),
        }
    }
    groups
}

/// 첫 번째 `/` 앞부분을 그룹 키로 사용한다.
fn group_key(identity: &str) -> String {
    match identity.split_once('/') {
        Some((prefix, _)) => prefix.to_string(),
        None => UNGROUPED_GROUP.to_string(),
    }
}

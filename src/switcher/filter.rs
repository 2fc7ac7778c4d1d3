use crate::scenario::ScenarioEntry;

/// 검색어로 시나리오 목록을 거른다.
///
/// 검색어가 비어 있으면 전체 목록을 그대로 복사하고, 아니면 식별자에 검색어가
/// 대소문자 구분 없이 포함된 항목만 원래 순서대로 남긴다.
pub fn filter_scenarios(scenarios: &[ScenarioEntry], search_term: &str) -> Vec<ScenarioEntry> {
    if search_term.is_empty() {
        return scenarios.to_vec();
    }
    let needle = search_term.to_lowercase();
    scenarios
        .iter()
        .filter(|scenario| scenario.identity().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioRecord;

    fn sample() -> Vec<ScenarioEntry> {
        vec![
            ScenarioEntry::from("db/reset"),
            ScenarioEntry::Record(ScenarioRecord::with_id("DB/Seed")),
            ScenarioEntry::from("auth-fail"),
        ]
    }

    #[test]
    fn empty_term_returns_the_whole_list() {
        let list = sample();
        assert_eq!(filter_scenarios(&list, ""), list);
    }

    #[test]
    fn matching_is_case_insensitive_and_order_preserving() {
        let list = sample();
        let filtered = filter_scenarios(&list, "Db/");
        let ids: Vec<String> = filtered.iter().map(|s| s.identity().into_owned()).collect();
        assert_eq!(ids, vec!["db/reset", "DB/Seed"]);
        assert!(filtered.iter().all(|s| list.contains(s)));
    }

    #[test]
    fn no_match_yields_empty_list() {
        assert!(filter_scenarios(&sample(), "payments").is_empty());
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// 서버가 객체 형태로 내려주는 시나리오 정의이다.
///
/// 객체 전체를 수신 순서 그대로 보관하고 `id`, `name`, `description`은 조회 시 꺼낸다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioRecord {
    fields: Map<String, Value>,
}

impl ScenarioRecord {
    /// `id`만 가진 레코드를 만든다.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self::default().field("id", Value::String(id.into()))
    }

    /// `name`만 가진 레코드를 만든다.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self::default().field("name", Value::String(name.into()))
    }

    /// 필드를 덧붙인다. 이미 있는 키는 값만 바뀐다.
    pub fn field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.text("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    pub fn description(&self) -> Option<&str> {
        self.text("description")
    }

    /// 해석하지 않은 필드까지 포함한 원본 객체.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    // 빈 문자열과 문자열이 아닌 값은 없는 것으로 본다
    fn text(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// 시나리오 목록의 원소. 문자열 또는 객체 둘 다 허용한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScenarioEntry {
    /// 문자열 자체가 식별자인 경우.
    Named(String),
    /// 필드를 가진 객체인 경우.
    Record(ScenarioRecord),
}

impl ScenarioEntry {
    /// 검색, 그룹핑, 현재 시나리오 비교에 공통으로 쓰이는 식별 문자열을 계산한다.
    ///
    /// `name` → `id` → 객체 전체의 JSON 직렬화 순으로 결정한다. 빈 문자열은 없는 값으로 본다.
    /// 직렬화는 수신한 키 순서를 따른다.
    pub fn identity(&self) -> Cow<'_, str> {
        match self {
            ScenarioEntry::Named(name) => Cow::Borrowed(name.as_str()),
            ScenarioEntry::Record(record) => {
                if let Some(name) = record.name() {
                    return Cow::Borrowed(name);
                }
                if let Some(id) = record.id() {
                    return Cow::Borrowed(id);
                }
                let serialized = serde_json::to_string(record.fields());
                Cow::Owned(serialized.unwrap_or_else(|_| "{}".to_string()))
            }
        }
    }

    /// 객체 형태일 때만 존재하는 설명을 반환한다.
    pub fn description(&self) -> Option<&str> {
        match self {
            ScenarioEntry::Named(_) => None,
            ScenarioEntry::Record(record) => record.description(),
        }
    }
}

impl From<&str> for ScenarioEntry {
    fn from(value: &str) -> Self {
        ScenarioEntry::Named(value.to_string())
    }
}

impl From<ScenarioRecord> for ScenarioEntry {
    fn from(value: ScenarioRecord) -> Self {
        ScenarioEntry::Record(value)
    }
}

/// JSON 배열 본문을 시나리오 목록으로 파싱한다.
pub fn parse_scenario_list(body: &[u8]) -> Result<Vec<ScenarioEntry>, serde_json::Error> {
    serde_json::from_slice(body)
}

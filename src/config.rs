use crate::scenario::ScenarioEntry;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// 설정 파일 경로를 지정하는 환경 변수.
pub const CONFIG_PATH_ENV: &str = "SCENARIO_SWITCHER_CONFIG";
/// 백엔드 주소를 덮어쓰는 환경 변수.
pub const BASE_URL_ENV: &str = "SCENARIO_SWITCHER_BASE_URL";

/// 토글 버튼이 고정될 화면 모서리이다.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TogglePosition {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

/// 시나리오 스위처의 동작 설정이다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SwitcherConfig {
    /// 시나리오 서버 주소.
    pub base_url: String,
    /// 시나리오 목록 경로.
    pub scenarios_endpoint: String,
    /// 토글 버튼 위치.
    pub position: TogglePosition,
    /// 현재 적용된 시나리오 표시 여부.
    pub show_current_scenario: bool,
    /// 적용 성공 후 호스트를 다시 띄울지 여부.
    pub auto_reload: bool,
    /// 목록 영역 최대 높이(논리 픽셀).
    pub max_height: f32,
    /// 경로 접두사로 그룹핑할지 여부.
    pub group_scenarios: bool,
    /// HTTP 클라이언트 타임아웃(초). 없으면 전송 계층 기본값을 따른다.
    pub request_timeout_secs: Option<u64>,
    /// 지정하면 HTTP 대신 이 목록으로 조회/적용을 대체한다.
    pub offline_scenarios: Option<Vec<ScenarioEntry>>,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3002".to_string(),
            scenarios_endpoint: "/parrot/scenarios".to_string(),
            position: TogglePosition::default(),
            show_current_scenario: true,
            auto_reload: true,
            max_height: 384.0,
            group_scenarios: true,
            request_timeout_secs: None,
            offline_scenarios: None,
        }
    }
}

impl SwitcherConfig {
    /// 목록 조회 URL을 조합한다.
    pub fn scenarios_url(&self) -> String {
        format!("{}{}", self.base_url, self.scenarios_endpoint)
    }

    /// 특정 시나리오 적용 URL을 조합한다. 식별자는 가공 없이 붙인다.
    pub fn apply_url(&self, identity: &str) -> String {
        format!("{}/{}", self.scenarios_url(), identity)
    }
}

/// YAML 파일을 읽어 설정으로 역직렬화한다.
pub fn load_config_from_file(path: &Path) -> anyhow::Result<SwitcherConfig> {
    let mut file =
        File::open(path).with_context(|| format!("설정 파일을 열 수 없습니다: {}", path.display()))?;
    load_config_from_reader(&mut file)
        .with_context(|| format!("설정 파일 파싱 실패: {}", path.display()))
}

/// Reader에서 YAML을 읽어 설정 구조체로 파싱한다.
pub fn load_config_from_reader<R: Read>(reader: &mut R) -> anyhow::Result<SwitcherConfig> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    if buf.trim().is_empty() {
        return Ok(SwitcherConfig::default());
    }
    let config: SwitcherConfig = serde_yaml::from_str(&buf)?;
    Ok(config)
}

/// 실행 인자와 환경 변수를 바탕으로 최종 설정을 결정한다.
///
/// 첫 번째 인자 또는 `SCENARIO_SWITCHER_CONFIG`가 가리키는 파일을 읽고,
/// 둘 다 없으면 기본값을 사용한다. `SCENARIO_SWITCHER_BASE_URL`은 항상 마지막에 적용된다.
pub fn resolve_config(cli_path: Option<PathBuf>) -> anyhow::Result<SwitcherConfig> {
    let path = cli_path.or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));
    let mut config = match path {
        Some(path) => load_config_from_file(&path)?,
        None => SwitcherConfig::default(),
    };
    if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
        if !base_url.trim().is_empty() {
            config.base_url = base_url;
        }
    }
    Ok(config)
}

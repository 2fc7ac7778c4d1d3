use crate::config::SwitcherConfig;
use crate::scenario::{ScenarioEntry, parse_scenario_list};
use async_trait::async_trait;
use futures::future::BoxFuture;
use reqwest::header;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// 시나리오 조회/적용 과정에서 발생하는 원인 수준의 오류이다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// 서버 주소를 URL로 해석할 수 없다.
    #[error("잘못된 서버 주소입니다: {0}")]
    InvalidEndpoint(String),
    /// HTTP 클라이언트를 만들지 못했다.
    #[error("HTTP 클라이언트 생성 실패: {0}")]
    Client(String),
    /// 요청 전송 또는 응답 수신 실패.
    #[error("요청 전송 실패: {0}")]
    Transport(String),
    /// 2xx가 아닌 응답.
    #[error("HTTP 오류 상태: {status}")]
    Status { status: u16 },
    /// 응답 본문이 시나리오 배열이 아니다.
    #[error("응답 본문을 해석할 수 없습니다: {0}")]
    Decode(String),
    /// 주입된 조회/적용 함수가 실패했다.
    #[error("사용자 정의 핸들러 실패: {0}")]
    Custom(String),
}

/// ScenarioSource는 시나리오 목록 조회와 적용을 위한 추상 계층을 정의한다.
#[async_trait]
pub trait ScenarioSource: Send + Sync {
    /// 시나리오 목록을 가져온다.
    async fn fetch_scenarios(&self) -> Result<Vec<ScenarioEntry>, SourceError>;
    /// 선택된 시나리오를 백엔드에 적용한다.
    async fn apply_scenario(&self, entry: &ScenarioEntry) -> Result<(), SourceError>;
}

/// ScenarioSource를 공유하기 위한 Arc 타입 별칭이다.
pub type SharedSource = Arc<dyn ScenarioSource>;

/// 조회 동작을 대체하는 주입 함수.
pub type FetchOverride =
    Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<Vec<ScenarioEntry>>> + Send + Sync>;
/// 적용 동작을 대체하는 주입 함수.
pub type ApplyOverride =
    Arc<dyn Fn(ScenarioEntry) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// 기본 HTTP 계약(`GET {base}{endpoint}`, `POST {base}{endpoint}/{identity}`)을 구현한다.
#[derive(Debug, Clone)]
pub struct HttpScenarioSource {
    client: reqwest::Client,
    config: SwitcherConfig,
}

impl HttpScenarioSource {
    /// 설정의 주소를 검증하고 클라이언트를 구성한다.
    pub fn new(config: &SwitcherConfig) -> Result<Self, SourceError> {
        let url = config.scenarios_url();
        reqwest::Url::parse(&url)
            .map_err(|err| SourceError::InvalidEndpoint(format!("{url} ({err})")))?;
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|err| SourceError::Client(err.to_string()))?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl ScenarioSource for HttpScenarioSource {
    async fn fetch_scenarios(&self) -> Result<Vec<ScenarioEntry>, SourceError> {
        let url = self.config.scenarios_url();
        tracing::debug!(%url, "시나리오 목록 요청");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| SourceError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| SourceError::Transport(err.to_string()))?;
        parse_scenario_list(&body).map_err(|err| SourceError::Decode(err.to_string()))
    }

    async fn apply_scenario(&self, entry: &ScenarioEntry) -> Result<(), SourceError> {
        let url = self.config.apply_url(&entry.identity());
        tracing::debug!(%url, "시나리오 적용 요청");
        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|err| SourceError::Transport(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SourceError::Status {
                status: status.as_u16(),
            })
        }
    }
}

enum FetchPath {
    Override(FetchOverride),
    Http(Arc<HttpScenarioSource>),
}

enum ApplyPath {
    Override(ApplyOverride),
    Http(Arc<HttpScenarioSource>),
}

/// 주입 함수와 기본 HTTP 경로를 동작별로 조합한 구현체이다.
struct ComposedSource {
    fetch: FetchPath,
    apply: ApplyPath,
}

#[async_trait]
impl ScenarioSource for ComposedSource {
    async fn fetch_scenarios(&self) -> Result<Vec<ScenarioEntry>, SourceError> {
        match &self.fetch {
            FetchPath::Override(fetch) => fetch()
                .await
                .map_err(|err| SourceError::Custom(format!("{err:#}"))),
            FetchPath::Http(http) => http.fetch_scenarios().await,
        }
    }

    async fn apply_scenario(&self, entry: &ScenarioEntry) -> Result<(), SourceError> {
        match &self.apply {
            ApplyPath::Override(apply) => apply(entry.clone())
                .await
                .map_err(|err| SourceError::Custom(format!("{err:#}"))),
            ApplyPath::Http(http) => http.apply_scenario(entry).await,
        }
    }
}

/// 설정과 선택적 주입 함수로부터 ScenarioSource를 만든다.
///
/// 주입 함수가 있는 동작은 HTTP 경로를 전혀 사용하지 않는다. 두 동작 모두 주입되면
/// 클라이언트를 만들지 않으므로 주소 검증도 생략된다.
pub struct SourceBuilder {
    config: SwitcherConfig,
    fetch: Option<FetchOverride>,
    apply: Option<ApplyOverride>,
}

impl SourceBuilder {
    pub fn new(config: &SwitcherConfig) -> Self {
        Self {
            config: config.clone(),
            fetch: None,
            apply: None,
        }
    }

    /// 목록 조회를 사용자 함수로 대체한다.
    pub fn fetch_with<F, Fut>(mut self, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Vec<ScenarioEntry>>> + Send + 'static,
    {
        let wrapped: FetchOverride =
            Arc::new(move || -> BoxFuture<'static, anyhow::Result<Vec<ScenarioEntry>>> {
                Box::pin(fetch())
            });
        self.fetch = Some(wrapped);
        self
    }

    /// 시나리오 적용을 사용자 함수로 대체한다.
    pub fn apply_with<F, Fut>(mut self, apply: F) -> Self
    where
        F: Fn(ScenarioEntry) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let wrapped: ApplyOverride =
            Arc::new(move |entry: ScenarioEntry| -> BoxFuture<'static, anyhow::Result<()>> {
                Box::pin(apply(entry))
            });
        self.apply = Some(wrapped);
        self
    }

    pub fn build(self) -> Result<SharedSource, SourceError> {
        if self.fetch.is_none() && self.apply.is_none() {
            return Ok(Arc::new(HttpScenarioSource::new(&self.config)?));
        }
        let mut http: Option<Arc<HttpScenarioSource>> = None;
        let fetch = match self.fetch {
            Some(fetch) => FetchPath::Override(fetch),
            None => FetchPath::Http(shared_http(&mut http, &self.config)?),
        };
        let apply = match self.apply {
            Some(apply) => ApplyPath::Override(apply),
            None => ApplyPath::Http(shared_http(&mut http, &self.config)?),
        };
        Ok(Arc::new(ComposedSource { fetch, apply }))
    }
}

fn shared_http(
    slot: &mut Option<Arc<HttpScenarioSource>>,
    config: &SwitcherConfig,
) -> Result<Arc<HttpScenarioSource>, SourceError> {
    if let Some(http) = slot {
        return Ok(http.clone());
    }
    let http = Arc::new(HttpScenarioSource::new(config)?);
    *slot = Some(http.clone());
    Ok(http)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;
    use wiremock::matchers::{header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> SwitcherConfig {
        SwitcherConfig {
            base_url: server.uri(),
            ..SwitcherConfig::default()
        }
    }

    #[tokio::test]
    async fn http_fetch_decodes_mixed_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/parrot/scenarios"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                "auth-fail",
                {"id": "db/reset", "description": "초기화"}
            ])))
            .mount(&server)
            .await;

        let source = HttpScenarioSource::new(&config_for(&server)).expect("클라이언트 생성 실패");
        let list = source.fetch_scenarios().await.expect("목록 조회 실패");
        let ids: Vec<String> = list.iter().map(|s| s.identity().into_owned()).collect();
        assert_eq!(ids, vec!["auth-fail", "db/reset"]);
    }

    #[tokio::test]
    async fn http_fetch_reports_status_and_decode_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/parrot/scenarios"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let source = HttpScenarioSource::new(&config_for(&server)).expect("클라이언트 생성 실패");
        assert_eq!(
            source.fetch_scenarios().await,
            Err(SourceError::Status { status: 503 })
        );

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/parrot/scenarios"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"scenarios": []})))
            .mount(&server)
            .await;
        let source = HttpScenarioSource::new(&config_for(&server)).expect("클라이언트 생성 실패");
        assert!(matches!(
            source.fetch_scenarios().await,
            Err(SourceError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn http_apply_posts_identity_with_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/parrot/scenarios/db/reset"))
            .and(header_eq("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/parrot/scenarios/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let source = HttpScenarioSource::new(&config_for(&server)).expect("클라이언트 생성 실패");
        let entry = ScenarioEntry::Record(crate::scenario::ScenarioRecord::with_name("db/reset"));
        source.apply_scenario(&entry).await.expect("적용 실패");
        assert_eq!(
            source.apply_scenario(&ScenarioEntry::from("broken")).await,
            Err(SourceError::Status { status: 500 })
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let config = SwitcherConfig {
            base_url: "http://127.0.0.1:1".into(),
            ..SwitcherConfig::default()
        };
        let source = HttpScenarioSource::new(&config).expect("클라이언트 생성 실패");
        assert!(matches!(
            source.fetch_scenarios().await,
            Err(SourceError::Transport(_))
        ));
    }

    #[test]
    fn invalid_base_url_is_rejected_without_overrides() {
        let config = SwitcherConfig {
            base_url: "not a url".into(),
            ..SwitcherConfig::default()
        };
        assert!(matches!(
            SourceBuilder::new(&config).build(),
            Err(SourceError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            SourceBuilder::new(&config)
                .fetch_with(|| async { Ok(Vec::new()) })
                .build(),
            Err(SourceError::InvalidEndpoint(_))
        ));
    }

    #[tokio::test]
    async fn full_overrides_skip_the_http_path() {
        let config = SwitcherConfig {
            base_url: "not a url".into(),
            ..SwitcherConfig::default()
        };
        let applied = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = applied.clone();
        let source = SourceBuilder::new(&config)
            .fetch_with(|| async { Ok(vec![ScenarioEntry::from("db/seed")]) })
            .apply_with(move |entry: ScenarioEntry| {
                let sink = sink.clone();
                async move {
                    sink.lock()
                        .expect("기록 잠금 실패")
                        .push(entry.identity().into_owned());
                    Ok(())
                }
            })
            .build()
            .expect("주입 함수만으로 소스 생성 실패");

        let list = source.fetch_scenarios().await.expect("주입 조회 실패");
        assert_eq!(list, vec![ScenarioEntry::from("db/seed")]);
        source.apply_scenario(&list[0]).await.expect("주입 적용 실패");
        assert_eq!(*applied.lock().expect("기록 잠금 실패"), vec!["db/seed"]);
    }

    #[tokio::test]
    async fn override_failures_become_custom_errors() {
        let source = SourceBuilder::new(&SwitcherConfig::default())
            .fetch_with(|| async { Err(anyhow::anyhow!("mock backend down")) })
            .build()
            .expect("소스 생성 실패");
        match source.fetch_scenarios().await {
            Err(SourceError::Custom(message)) => assert!(message.contains("mock backend down")),
            other => panic!("예상하지 못한 결과: {other:?}"),
        }
    }
}

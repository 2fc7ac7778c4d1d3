use crate::config::SwitcherConfig;
use crate::engine::{SwitcherEvent, run_apply, run_fetch};
use crate::scenario::ScenarioEntry;
use crate::source::SharedSource;
use crate::switcher::{ApplyOutcome, ScenarioSwitcher};
use crate::theme::{Theme, install_custom_font};
use tokio::runtime::{Handle, Runtime};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

/// 스위처를 띄우는 호스트 애플리케이션. 화면 관련 상태만 직접 가진다.
pub struct ScenarioSwitcherApp {
    /// UI 테마 정보.
    pub(super) theme: Theme,
    /// 현재 마운트된 스위처와 백그라운드 작업.
    pub(super) mount: Mount,
    /// Tokio 런타임. 마운트는 핸들만 빌려 쓴다.
    _runtime: Runtime,
}

impl ScenarioSwitcherApp {
    /// egui Context를 받아 초기 상태를 구성하고 첫 조회를 시작한다.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: SwitcherConfig,
        source: SharedSource,
        runtime: Runtime,
    ) -> Self {
        let theme = Theme::default();
        theme.apply(&cc.egui_ctx);
        install_custom_font(&cc.egui_ctx);
        tracing::info!(url = %config.scenarios_url(), "시나리오 스위처 시작");
        let mount = Mount::new(config, source, runtime.handle().clone());
        Self {
            theme,
            mount,
            _runtime: runtime,
        }
    }
}

/// 마운트 단위 상태. 스위처, 이벤트 채널, 취소 토큰을 함께 관리한다.
pub(super) struct Mount {
    /// 스위처 설정.
    pub(super) config: SwitcherConfig,
    /// 현재 마운트된 스위처 상태.
    pub(super) switcher: ScenarioSwitcher,
    /// 호스트가 다시 뜬 횟수.
    pub(super) reload_count: u32,
    /// 작업을 띄울 런타임 핸들.
    handle: Handle,
    /// 조회/적용 대상.
    source: SharedSource,
    /// 백그라운드 작업 송신 채널.
    events_tx: UnboundedSender<SwitcherEvent>,
    /// 백그라운드 작업 수신 채널.
    events_rx: UnboundedReceiver<SwitcherEvent>,
    /// 마운트 단위 취소 토큰.
    cancel_token: CancellationToken,
}

impl Mount {
    /// 스위처를 마운트하고 곧바로 목록 조회를 시작한다.
    pub(super) fn new(config: SwitcherConfig, source: SharedSource, handle: Handle) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut mount = Self {
            switcher: ScenarioSwitcher::new(&config),
            config,
            reload_count: 0,
            handle,
            source,
            events_tx,
            events_rx,
            cancel_token: CancellationToken::new(),
        };
        mount.request_refresh();
        mount
    }

    /// 목록 조회를 요청한다. 다른 작업이 진행 중이면 무시된다.
    pub(super) fn request_refresh(&mut self) {
        if self.switcher.begin_fetch().is_err() {
            return;
        }
        self.handle.spawn(run_fetch(
            self.source.clone(),
            self.events_tx.clone(),
            self.cancel_token.clone(),
        ));
    }

    /// 선택된 시나리오 적용을 요청한다.
    pub(super) fn request_apply(&mut self, entry: ScenarioEntry) {
        if self.switcher.begin_apply(&entry).is_err() {
            return;
        }
        self.handle.spawn(run_apply(
            self.source.clone(),
            entry,
            self.events_tx.clone(),
            self.cancel_token.clone(),
        ));
    }

    /// 완료 이벤트를 모두 소비하여 스위처 상태를 동기화한다.
    pub(super) fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                SwitcherEvent::ScenariosFetched(result) => {
                    self.switcher.finish_fetch(result);
                }
                SwitcherEvent::ScenarioApplied { entry, result } => {
                    let outcome = self.switcher.finish_apply(&entry, result);
                    if let ApplyOutcome::Applied { reload: true, .. } = outcome {
                        self.reload_host();
                        // 재시작 이후 이벤트는 새 채널에서만 받는다
                        return;
                    }
                }
            }
        }
    }

    /// 스위처를 내리고 새로 마운트한다. 적용된 식별자만 이어받는다.
    pub(super) fn reload_host(&mut self) {
        self.unmount();
        let carried = self.switcher.current_scenario().to_string();
        self.switcher = ScenarioSwitcher::new(&self.config).with_current_scenario(carried);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        self.events_tx = events_tx;
        self.events_rx = events_rx;
        self.cancel_token = CancellationToken::new();
        self.reload_count += 1;
        tracing::info!(reloads = self.reload_count, "호스트 재시작");
        self.request_refresh();
    }

    /// 진행 중인 작업을 취소해 늦은 결과가 반영되지 않도록 한다.
    fn unmount(&mut self) {
        self.cancel_token.cancel();
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceBuilder;
    use crate::switcher::Activity;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn offline_source(applied: Arc<Mutex<Vec<String>>>) -> SharedSource {
        SourceBuilder::new(&SwitcherConfig::default())
            .fetch_with(|| async {
                Ok(vec![
                    ScenarioEntry::from("db/reset"),
                    ScenarioEntry::from("auth-fail"),
                ])
            })
            .apply_with(move |entry: ScenarioEntry| {
                let applied = applied.clone();
                async move {
                    applied
                        .lock()
                        .expect("잠금 실패")
                        .push(entry.identity().into_owned());
                    Ok(())
                }
            })
            .build()
            .expect("소스 구성 실패")
    }

    fn mount_with(auto_reload: bool, applied: Arc<Mutex<Vec<String>>>) -> Mount {
        let config = SwitcherConfig {
            auto_reload,
            ..SwitcherConfig::default()
        };
        Mount::new(config, offline_source(applied), Handle::current())
    }

    /// 조건이 만족될 때까지 이벤트를 소비한다.
    async fn drain_until(mount: &mut Mount, done: impl Fn(&Mount) -> bool) {
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                mount.drain_events();
                if done(mount) {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("이벤트 대기 시간 초과");
    }

    #[tokio::test]
    async fn mount_fetches_immediately() {
        let mut mount = mount_with(true, Arc::default());
        assert_eq!(mount.switcher.activity(), &Activity::Fetching);
        drain_until(&mut mount, |m| !m.switcher.is_loading()).await;
        assert_eq!(mount.switcher.scenarios().len(), 2);
        assert_eq!(mount.reload_count, 0);
    }

    #[tokio::test]
    async fn successful_apply_remounts_with_carried_marker() {
        let mut mount = mount_with(true, Arc::default());
        drain_until(&mut mount, |m| !m.switcher.is_loading()).await;

        let old_tx = mount.events_tx.clone();
        let old_token = mount.cancel_token.clone();
        let entry = ScenarioEntry::from("db/reset");
        mount.switcher.begin_apply(&entry).expect("적용 시작 실패");
        old_tx
            .send(SwitcherEvent::ScenarioApplied {
                entry,
                result: Ok(()),
            })
            .expect("이벤트 전송 실패");
        // 재시작 뒤 옛 채널에 남은 결과는 새 스위처에 반영되면 안 된다
        old_tx
            .send(SwitcherEvent::ScenariosFetched(Ok(Vec::new())))
            .expect("이벤트 전송 실패");

        mount.drain_events();

        assert_eq!(mount.reload_count, 1);
        assert_eq!(mount.switcher.activity(), &Activity::Fetching);
        assert_eq!(mount.switcher.current_scenario(), "db/reset");
        assert!(mount.switcher.scenarios().is_empty());
        assert!(old_token.is_cancelled());
        assert!(old_tx.is_closed());

        drain_until(&mut mount, |m| !m.switcher.is_loading()).await;
        assert_eq!(mount.switcher.scenarios().len(), 2);
        assert_eq!(mount.switcher.current_scenario(), "db/reset");
        assert!(mount.switcher.has_applied_scenario());
    }

    #[tokio::test]
    async fn request_apply_round_trip_reloads_once() {
        let applied = Arc::new(Mutex::new(Vec::new()));
        let mut mount = mount_with(true, applied.clone());
        drain_until(&mut mount, |m| !m.switcher.is_loading()).await;

        mount.request_apply(ScenarioEntry::from("auth-fail"));
        drain_until(&mut mount, |m| m.reload_count == 1).await;
        drain_until(&mut mount, |m| !m.switcher.is_loading()).await;

        assert_eq!(*applied.lock().expect("잠금 실패"), vec!["auth-fail".to_string()]);
        assert_eq!(mount.reload_count, 1);
        assert_eq!(mount.switcher.current_scenario(), "auth-fail");
    }

    #[tokio::test]
    async fn apply_without_auto_reload_keeps_mount() {
        let mut mount = mount_with(false, Arc::default());
        drain_until(&mut mount, |m| !m.switcher.is_loading()).await;
        let token = mount.cancel_token.clone();

        mount.request_apply(ScenarioEntry::from("db/reset"));
        drain_until(&mut mount, |m| !m.switcher.is_loading()).await;

        assert_eq!(mount.reload_count, 0);
        assert_eq!(mount.switcher.activity(), &Activity::Idle);
        assert_eq!(mount.switcher.current_scenario(), "db/reset");
        assert_eq!(mount.switcher.scenarios().len(), 2);
        assert!(!token.is_cancelled());
    }

    #[tokio::test]
    async fn dropping_mount_cancels_in_flight_work() {
        let mount = mount_with(true, Arc::default());
        let token = mount.cancel_token.clone();
        drop(mount);
        assert!(token.is_cancelled());
    }
}

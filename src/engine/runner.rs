use super::events::SwitcherEvent;
use crate::scenario::ScenarioEntry;
use crate::source::SharedSource;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

/// 시나리오 목록을 조회하고 결과 이벤트를 송신한다.
///
/// 취소되면 결과를 보내지 않는다. 스위처가 내려간 뒤 늦게 도착한 결과가
/// 상태를 건드리지 않게 하기 위함이다.
pub async fn run_fetch(
    source: SharedSource,
    sender: UnboundedSender<SwitcherEvent>,
    cancel: CancellationToken,
) {
    let result = tokio::select! {
        _ = cancel.cancelled() => {
            tracing::debug!("스위처가 해제되어 목록 조회 결과를 버립니다.");
            return;
        }
        result = source.fetch_scenarios() => result,
    };
    if cancel.is_cancelled() {
        return;
    }
    let _ = sender.send(SwitcherEvent::ScenariosFetched(result));
}

/// 선택된 시나리오를 적용하고 결과 이벤트를 송신한다.
pub async fn run_apply(
    source: SharedSource,
    entry: ScenarioEntry,
    sender: UnboundedSender<SwitcherEvent>,
    cancel: CancellationToken,
) {
    let result = tokio::select! {
        _ = cancel.cancelled() => {
            tracing::debug!(scenario = %entry.identity(), "스위처가 해제되어 적용 결과를 버립니다.");
            return;
        }
        result = source.apply_scenario(&entry) => result,
    };
    if cancel.is_cancelled() {
        return;
    }
    let _ = sender.send(SwitcherEvent::ScenarioApplied { entry, result });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioEntry;
    use crate::source::{ScenarioSource, SourceError};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::{Mutex, Notify};

    /// 호출을 기록하고, 필요하면 해제 신호가 올 때까지 응답을 미루는 목업 소스이다.
    struct RecordingSource {
        applied: Mutex<Vec<String>>,
        gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl ScenarioSource for RecordingSource {
        async fn fetch_scenarios(&self) -> Result<Vec<ScenarioEntry>, SourceError> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            Ok(vec!["db/reset".into()])
        }

        async fn apply_scenario(&self, entry: &ScenarioEntry) -> Result<(), SourceError> {
            self.applied.lock().await.push(entry.identity().into_owned());
            if entry.identity() == "broken" {
                return Err(SourceError::Status { status: 500 });
            }
            Ok(())
        }
    }

    fn source(gate: Option<Arc<Notify>>) -> Arc<RecordingSource> {
        Arc::new(RecordingSource {
            applied: Mutex::new(Vec::new()),
            gate,
        })
    }

    #[tokio::test]
    async fn fetch_sends_a_single_completion() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        run_fetch(source(None), tx, CancellationToken::new()).await;
        match rx.recv().await {
            Some(SwitcherEvent::ScenariosFetched(Ok(list))) => {
                assert_eq!(list, vec![ScenarioEntry::from("db/reset")]);
            }
            other => panic!("예상하지 못한 이벤트: {other:?}"),
        }
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn apply_reports_entry_and_result() {
        let recorder = source(None);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        run_apply(
            recorder.clone(),
            ScenarioEntry::from("broken"),
            tx,
            CancellationToken::new(),
        )
        .await;
        match rx.recv().await {
            Some(SwitcherEvent::ScenarioApplied { entry, result }) => {
                assert_eq!(entry, ScenarioEntry::from("broken"));
                assert_eq!(result, Err(SourceError::Status { status: 500 }));
            }
            other => panic!("예상하지 못한 이벤트: {other:?}"),
        }
        assert_eq!(*recorder.applied.lock().await, vec!["broken"]);
    }

    #[tokio::test]
    async fn cancelled_fetch_never_reports() {
        let gate = Arc::new(Notify::new());
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_fetch(source(Some(gate.clone())), tx, cancel.clone()));
        tokio::time::sleep(Duration::from_millis(20)).await;
        cancel.cancel();
        gate.notify_one();
        task.await.expect("조회 태스크 패닉");
        assert!(rx.recv().await.is_none());
    }
}

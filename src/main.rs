#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod config;
mod engine;
mod scenario;
mod source;
mod switcher;
mod theme;

use anyhow::Context;
use app::ScenarioSwitcherApp;
use config::{SwitcherConfig, resolve_config};
use eframe::egui;
use scenario::ScenarioEntry;
use source::{SharedSource, SourceBuilder};
use std::path::PathBuf;
use tokio::runtime::Runtime;

/// 설정을 읽고 egui 애플리케이션을 실행하는 진입점입니다.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = resolve_config(std::env::args_os().nth(1).map(PathBuf::from))?;
    let source = build_source(&config)?;
    let runtime = Runtime::new().context("Tokio 런타임 생성 실패")?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_app_id("Scenario Switcher")
            .with_inner_size([960.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Parrot Scenario Switcher",
        native_options,
        Box::new(move |cc| Box::new(ScenarioSwitcherApp::new(cc, config, source, runtime))),
    )
    .map_err(|err| anyhow::anyhow!("UI 실행 실패: {err}"))
}

/// 설정에 오프라인 목록이 있으면 조회/적용을 모두 주입 함수로 대체한다.
fn build_source(config: &SwitcherConfig) -> anyhow::Result<SharedSource> {
    let mut builder = SourceBuilder::new(config);
    if let Some(scenarios) = config.offline_scenarios.clone() {
        tracing::info!(count = scenarios.len(), "오프라인 시나리오 목록 사용");
        builder = builder
            .fetch_with(move || {
                let scenarios = scenarios.clone();
                async move { Ok(scenarios) }
            })
            .apply_with(|entry: ScenarioEntry| async move {
                tracing::info!(scenario = %entry.identity(), "오프라인 모드 적용");
                Ok(())
            });
    }
    builder.build().context("시나리오 소스 구성 실패")
}

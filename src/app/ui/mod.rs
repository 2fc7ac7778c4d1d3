use crate::config::TogglePosition;
use crate::switcher::ListView;
use eframe::egui::{self, RichText};
use std::time::Duration;

use super::state::ScenarioSwitcherApp;
use super::widgets::{GroupHeader, PrimaryButton, ScenarioRow, icon_button};

mod host;
mod list;
mod overlay;

impl eframe::App for ScenarioSwitcherApp {
    /// egui 메인 루프에서 호출되어 UI를 갱신한다.
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        self.mount.drain_events();
        self.render_host(ctx);
        self.render_overlay(ctx);
        if self.mount.switcher.is_loading() {
            // 백그라운드 결과는 입력 이벤트 없이 도착하므로 주기적으로 다시 그린다
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

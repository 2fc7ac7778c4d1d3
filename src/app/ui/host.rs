use super::*;

impl ScenarioSwitcherApp {
    /// 스위처 뒤에 깔리는 호스트 화면을 그린다.
    pub(super) fn render_host(&self, ctx: &egui::Context) {
        let palette = *self.theme.palette();
        let frame = egui::Frame::none()
            .fill(palette.bg_main)
            .inner_margin(egui::Margin::symmetric(32.0, 28.0));
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            ui.label(
                RichText::new("🦜 Parrot Scenario Switcher")
                    .size(22.0)
                    .color(palette.fg_text_primary)
                    .strong(),
            );
            ui.add_space(6.0);
            ui.label(
                RichText::new(format!("백엔드 · {}", self.mount.config.scenarios_url()))
                    .color(palette.fg_text_secondary),
            );
            ui.add_space(16.0);
            egui::Grid::new("host_summary_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("현재 시나리오");
                    ui.label(format!(": {}", self.mount.switcher.current_scenario()));
                    ui.end_row();
                    ui.label("불러온 시나리오");
                    ui.label(format!(": {}개", self.mount.switcher.scenarios().len()));
                    ui.end_row();
                    ui.label("재시작");
                    ui.label(format!(": {}회", self.mount.reload_count));
                    ui.end_row();
                });
        });
    }
}

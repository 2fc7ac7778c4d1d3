use super::*;
use crate::scenario::ScenarioEntry;

impl ScenarioSwitcherApp {
    /// 목록 영역을 표시 상태에 맞춰 그린다.
    pub(super) fn render_list(&mut self, ui: &mut egui::Ui) {
        let enabled = !self.mount.switcher.is_loading();
        let show_indicator = self.mount.config.show_current_scenario;
        let mut toggled: Option<String> = None;
        let mut selected: Option<ScenarioEntry> = None;
        egui::ScrollArea::vertical()
            .id_source("scenario_list")
            .max_height(self.mount.config.max_height)
            .auto_shrink([false, true])
            .show(ui, |ui| match self.mount.switcher.list_view() {
                ListView::Loading => self.render_placeholder(ui, "시나리오를 불러오는 중...", true),
                ListView::Empty => self.render_placeholder(ui, "사용 가능한 시나리오가 없습니다", false),
                ListView::NoMatches => {
                    self.render_placeholder(ui, "검색과 일치하는 시나리오가 없습니다", false)
                }
                ListView::Groups(groups) => {
                    for group in &groups {
                        let expanded = self.mount.switcher.is_expanded(&group.key);
                        let header = GroupHeader::new(
                            &self.theme,
                            &group.key,
                            group.scenarios.len(),
                            expanded,
                        );
                        if ui.add(header).clicked() {
                            toggled = Some(group.key.clone());
                        }
                        if !expanded {
                            continue;
                        }
                        for scenario in &group.scenarios {
                            let identity = scenario.identity();
                            let row = ScenarioRow::new(&self.theme, &identity)
                                .description(scenario.description())
                                .current(self.mount.switcher.is_current(scenario), show_indicator);
                            if ui.add_enabled(enabled, row).clicked() {
                                selected = Some(scenario.clone());
                            }
                        }
                    }
                }
            });
        if let Some(key) = toggled {
            self.mount.switcher.toggle_group(&key);
        }
        if let Some(entry) = selected {
            self.mount.request_apply(entry);
        }
    }

    fn render_placeholder(&self, ui: &mut egui::Ui, text: &str, spinner: bool) {
        let palette = *self.theme.palette();
        ui.vertical_centered(|ui| {
            ui.add_space(28.0);
            if spinner {
                ui.add(egui::Spinner::new().size(22.0).color(palette.fg_icon));
                ui.add_space(8.0);
            }
            ui.label(RichText::new(text).size(13.0).color(palette.fg_text_secondary));
            ui.add_space(28.0);
        });
    }
}

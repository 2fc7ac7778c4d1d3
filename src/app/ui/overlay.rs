use super::*;

impl ScenarioSwitcherApp {
    /// 설정된 모서리에 토글 버튼과 패널을 띄운다.
    pub(super) fn render_overlay(&mut self, ctx: &egui::Context) {
        let margin = self.theme.decorations().screen_margin;
        let (anchor, offset, align) = match self.mount.config.position {
            TogglePosition::TopRight => (
                egui::Align2::RIGHT_TOP,
                egui::vec2(-margin, margin),
                egui::Align::Max,
            ),
            TogglePosition::TopLeft => (
                egui::Align2::LEFT_TOP,
                egui::vec2(margin, margin),
                egui::Align::Min,
            ),
            TogglePosition::BottomRight => (
                egui::Align2::RIGHT_BOTTOM,
                egui::vec2(-margin, -margin),
                egui::Align::Max,
            ),
            TogglePosition::BottomLeft => (
                egui::Align2::LEFT_BOTTOM,
                egui::vec2(margin, -margin),
                egui::Align::Min,
            ),
        };
        // 아래쪽 모서리에서는 패널을 버튼 위로 연다
        let panel_above = matches!(
            self.mount.config.position,
            TogglePosition::BottomRight | TogglePosition::BottomLeft
        );
        egui::Area::new(egui::Id::new("scenario_switcher_overlay"))
            .anchor(anchor, offset)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.with_layout(egui::Layout::top_down(align), |ui| {
                    if panel_above && self.mount.switcher.is_open() {
                        self.render_panel(ui);
                        ui.add_space(8.0);
                    }
                    self.render_toggle(ui);
                    if !panel_above && self.mount.switcher.is_open() {
                        ui.add_space(8.0);
                        self.render_panel(ui);
                    }
                });
            });
    }

    /// 패널 열기/닫기 버튼을 그린다.
    fn render_toggle(&mut self, ui: &mut egui::Ui) {
        let palette = *self.theme.palette();
        let indicator = (self.mount.config.show_current_scenario
            && self.mount.switcher.has_applied_scenario())
        .then_some(palette.accent_active);
        let clicked = ui
            .add(
                PrimaryButton::new(&self.theme, "Scenarios")
                    .icon("▶")
                    .indicator(indicator),
            )
            .clicked();
        if clicked {
            self.mount.switcher.toggle_open();
        }
    }

    /// 헤더, 검색, 오류, 목록, 푸터로 이루어진 패널을 그린다.
    fn render_panel(&mut self, ui: &mut egui::Ui) {
        let palette = *self.theme.palette();
        let decorations = *self.theme.decorations();
        egui::Frame::none()
            .fill(palette.bg_panel)
            .stroke(egui::Stroke::new(1.0, palette.border_soft))
            .rounding(egui::Rounding::same(decorations.panel_rounding))
            .shadow(ui.visuals().popup_shadow)
            .show(ui, |ui| {
                ui.set_width(decorations.panel_width);
                ui.spacing_mut().item_spacing.y = 0.0;
                self.render_panel_header(ui);
                self.render_search(ui);
                self.render_error_banner(ui);
                self.render_list(ui);
                self.render_footer(ui);
            });
    }

    fn render_panel_header(&mut self, ui: &mut egui::Ui) {
        let palette = *self.theme.palette();
        let loading = self.mount.switcher.is_loading();
        let mut refresh = false;
        let mut close = false;
        self.section_frame(palette.bg_header).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Parrot Scenarios")
                        .size(16.0)
                        .color(palette.fg_text_primary)
                        .strong(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    close = icon_button(ui, &self.theme, "✖", true).clicked();
                    refresh = icon_button(ui, &self.theme, "⟳", !loading).clicked();
                    if loading {
                        ui.add(
                            egui::Spinner::new()
                                .size(14.0)
                                .color(self.theme.activity_color(self.mount.switcher.activity())),
                        );
                    }
                });
            });
        });
        if refresh {
            self.mount.request_refresh();
        }
        if close {
            self.mount.switcher.close();
        }
    }

    fn render_search(&mut self, ui: &mut egui::Ui) {
        let palette = *self.theme.palette();
        let mut term = self.mount.switcher.search_term().to_string();
        let mut changed = false;
        self.section_frame(palette.bg_panel).show(ui, |ui| {
            let edit = egui::TextEdit::singleline(&mut term)
                .hint_text("🔍 시나리오 검색...")
                .desired_width(f32::INFINITY);
            changed = ui.add(edit).changed();
        });
        if changed {
            self.mount.switcher.set_search_term(term);
        }
    }

    fn render_error_banner(&self, ui: &mut egui::Ui) {
        let palette = *self.theme.palette();
        if let Some(message) = self.mount.switcher.error_message() {
            self.section_frame(palette.bg_error).show(ui, |ui| {
                ui.set_width(ui.available_width());
                let color = self.theme.activity_color(self.mount.switcher.activity());
                ui.label(RichText::new(message).size(13.0).color(color));
            });
        }
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        let palette = *self.theme.palette();
        self.section_frame(palette.bg_header).show(ui, |ui| {
            ui.horizontal(|ui| {
                // 유휴/진행/실패 상태 점
                let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                ui.painter().circle_filled(
                    rect.center(),
                    self.theme.decorations().indicator_radius,
                    self.theme.activity_color(self.mount.switcher.activity()),
                );
                ui.label(
                    RichText::new(format!("전체: {}개 시나리오", self.mount.switcher.filtered().len()))
                        .size(12.0)
                        .color(palette.fg_text_secondary),
                );
                if self.mount.config.show_current_scenario {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!("현재: {}", self.mount.switcher.current_scenario()))
                                .size(12.0)
                                .color(palette.fg_text_secondary),
                        );
                    });
                }
            });
        });
    }

    /// 패널 구획 하나를 감싸는 프레임.
    fn section_frame(&self, fill: egui::Color32) -> egui::Frame {
        egui::Frame::none()
            .fill(fill)
            .inner_margin(self.theme.decorations().section_margin)
    }
}

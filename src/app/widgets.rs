use crate::theme::{Theme, blend_color};
use eframe::egui::{self, Color32, FontId, RichText, Widget};

/// 강조색 배경의 토글 버튼. 우측에 상태 점을 붙일 수 있다.
pub(super) struct PrimaryButton<'a> {
    theme: &'a Theme,
    label: &'a str,
    icon: &'a str,
    indicator: Option<Color32>,
}

impl<'a> PrimaryButton<'a> {
    pub(super) fn new(theme: &'a Theme, label: &'a str) -> Self {
        Self {
            theme,
            label,
            icon: "",
            indicator: None,
        }
    }

    pub(super) fn icon(mut self, icon: &'a str) -> Self {
        self.icon = icon;
        self
    }

    /// 라벨 뒤에 작은 원형 표시를 그린다.
    pub(super) fn indicator(mut self, color: Option<Color32>) -> Self {
        self.indicator = color;
        self
    }
}

impl<'a> Widget for PrimaryButton<'a> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let decorations = self.theme.decorations();
        let palette = self.theme.palette();

        let text = if self.icon.is_empty() {
            self.label.to_string()
        } else {
            format!("{}  {}", self.icon, self.label)
        };
        // 점 자리만큼 뒤에 공백을 둔다
        let text = if self.indicator.is_some() {
            format!("{text}   ")
        } else {
            text
        };
        let rich = RichText::new(text).size(14.0).strong().color(Color32::WHITE);
        let button = egui::Button::new(rich)
            .min_size(egui::vec2(0.0, decorations.button_height))
            .rounding(egui::Rounding::same(decorations.button_rounding))
            .fill(palette.accent_primary);
        let response = ui.add(button);

        if response.hovered() {
            ui.painter().rect_filled(
                response.rect,
                egui::Rounding::same(decorations.button_rounding),
                blend_color(Color32::TRANSPARENT, Color32::BLACK, 0.12),
            );
        }
        if let Some(color) = self.indicator {
            let center = egui::pos2(
                response.rect.right() - 14.0,
                response.rect.center().y,
            );
            ui.painter()
                .circle_filled(center, decorations.indicator_radius, color);
        }
        response.on_hover_cursor(egui::CursorIcon::PointingHand)
    }
}

/// 테두리 없는 아이콘 버튼. 비활성 상태에서는 흐리게 그린다.
pub(super) fn icon_button(ui: &mut egui::Ui, theme: &Theme, icon: &str, enabled: bool) -> egui::Response {
    let palette = theme.palette();
    let color = if enabled {
        palette.fg_icon
    } else {
        blend_color(palette.fg_icon, palette.bg_header, 0.5)
    };
    let button = egui::Button::new(RichText::new(icon).size(15.0).color(color)).frame(false);
    let response = ui.add_enabled(enabled, button);
    if enabled {
        response.on_hover_cursor(egui::CursorIcon::PointingHand)
    } else {
        response
    }
}

/// 그룹 이름, 구성원 수, 펼침 화살표를 한 줄에 그리는 헤더.
pub(super) struct GroupHeader<'a> {
    theme: &'a Theme,
    key: &'a str,
    count: usize,
    expanded: bool,
}

impl<'a> GroupHeader<'a> {
    pub(super) fn new(theme: &'a Theme, key: &'a str, count: usize, expanded: bool) -> Self {
        Self {
            theme,
            key,
            count,
            expanded,
        }
    }
}

impl<'a> Widget for GroupHeader<'a> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let palette = self.theme.palette();
        let decorations = self.theme.decorations();
        let size = egui::vec2(ui.available_width(), decorations.row_height * 0.85);
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
        if ui.is_rect_visible(rect) {
            let fill = if response.hovered() {
                blend_color(palette.bg_header, palette.border_soft, 0.5)
            } else {
                palette.bg_header
            };
            let painter = ui.painter();
            painter.rect_filled(rect, egui::Rounding::ZERO, fill);
            painter.hline(
                rect.x_range(),
                rect.bottom(),
                egui::Stroke::new(1.0, palette.border_soft),
            );
            painter.text(
                egui::pos2(rect.left() + 16.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                self.key,
                FontId::proportional(14.0),
                palette.fg_text_primary,
            );
            let chevron = if self.expanded { "⏷" } else { "⏵" };
            painter.text(
                egui::pos2(rect.right() - 16.0, rect.center().y),
                egui::Align2::RIGHT_CENTER,
                chevron,
                FontId::proportional(14.0),
                palette.fg_icon,
            );
            painter.text(
                egui::pos2(rect.right() - 36.0, rect.center().y),
                egui::Align2::RIGHT_CENTER,
                format!("({})", self.count),
                FontId::proportional(12.0),
                palette.fg_text_secondary,
            );
        }
        response.on_hover_cursor(egui::CursorIcon::PointingHand)
    }
}

/// 시나리오 한 건을 그리는 행. 클릭하면 적용 요청으로 이어진다.
pub(super) struct ScenarioRow<'a> {
    theme: &'a Theme,
    title: &'a str,
    description: Option<&'a str>,
    current: bool,
    show_indicator: bool,
}

impl<'a> ScenarioRow<'a> {
    pub(super) fn new(theme: &'a Theme, title: &'a str) -> Self {
        Self {
            theme,
            title,
            description: None,
            current: false,
            show_indicator: false,
        }
    }

    pub(super) fn description(mut self, description: Option<&'a str>) -> Self {
        self.description = description;
        self
    }

    /// 현재 적용된 시나리오 여부와 표시 점 노출 여부를 지정한다.
    pub(super) fn current(mut self, current: bool, show_indicator: bool) -> Self {
        self.current = current;
        self.show_indicator = show_indicator;
        self
    }
}

impl<'a> Widget for ScenarioRow<'a> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let palette = self.theme.palette();
        let decorations = self.theme.decorations();
        let size = egui::vec2(ui.available_width(), decorations.row_height);
        let sense = if ui.is_enabled() {
            egui::Sense::click()
        } else {
            egui::Sense::hover()
        };
        let (rect, response) = ui.allocate_exact_size(size, sense);
        if ui.is_rect_visible(rect) {
            let fill = if self.current {
                palette.bg_selected
            } else if response.hovered() && ui.is_enabled() {
                palette.bg_hover
            } else {
                palette.bg_panel
            };
            let painter = ui.painter();
            painter.rect_filled(rect, egui::Rounding::ZERO, fill);
            painter.hline(
                rect.x_range(),
                rect.bottom(),
                egui::Stroke::new(1.0, blend_color(palette.border_soft, palette.bg_panel, 0.5)),
            );

            let left = rect.left() + 16.0;
            // 설명이 있으면 제목을 위로 올린다
            let title_y = if self.description.is_some() {
                rect.center().y - 8.0
            } else {
                rect.center().y
            };
            painter.text(
                egui::pos2(left, title_y),
                egui::Align2::LEFT_CENTER,
                self.title,
                FontId::proportional(14.0),
                palette.fg_text_primary,
            );
            if let Some(description) = self.description {
                painter.text(
                    egui::pos2(left, rect.center().y + 10.0),
                    egui::Align2::LEFT_CENTER,
                    description,
                    FontId::proportional(12.0),
                    palette.fg_text_secondary,
                );
            }

            painter.text(
                egui::pos2(rect.right() - 16.0, rect.center().y),
                egui::Align2::RIGHT_CENTER,
                "▶",
                FontId::proportional(13.0),
                palette.fg_icon,
            );
            if self.current && self.show_indicator {
                painter.circle_filled(
                    egui::pos2(rect.right() - 40.0, rect.center().y),
                    decorations.indicator_radius,
                    palette.accent_active,
                );
            }
        }
        if ui.is_enabled() {
            response.on_hover_cursor(egui::CursorIcon::PointingHand)
        } else {
            response
        }
    }
}

use crate::switcher::Activity;
use eframe::egui::{self, Color32};

include!(concat!(env!("OUT_DIR"), "/custom_font.rs"));

/// 화면 요소별 색상 집합이다.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// 호스트 영역 배경.
    pub bg_main: Color32,
    /// 오버레이 패널 배경.
    pub bg_panel: Color32,
    /// 헤더/푸터/그룹 헤더 배경.
    pub bg_header: Color32,
    /// 현재 시나리오 행 배경.
    pub bg_selected: Color32,
    /// 마우스가 올라간 행 배경.
    pub bg_hover: Color32,
    /// 오류 배너 배경.
    pub bg_error: Color32,
    /// 기본 글자색.
    pub fg_text_primary: Color32,
    /// 보조 글자색.
    pub fg_text_secondary: Color32,
    /// 아이콘 글자색.
    pub fg_icon: Color32,
    /// 옅은 테두리.
    pub border_soft: Color32,
    /// 강조색(토글 버튼).
    pub accent_primary: Color32,
    /// 현재 시나리오 표시 점.
    pub accent_active: Color32,
    /// 오류 글자색.
    pub accent_error: Color32,
}

/// 모서리, 여백 등 크기 관련 값이다.
#[derive(Debug, Clone, Copy)]
pub struct Decorations {
    pub panel_width: f32,
    pub panel_rounding: f32,
    pub button_rounding: f32,
    pub button_height: f32,
    pub row_height: f32,
    pub indicator_radius: f32,
    pub screen_margin: f32,
    pub section_margin: egui::Margin,
}

/// UI 전체에서 참조할 공통 테마 정보.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    palette: Palette,
    decorations: Decorations,
}

impl Default for Theme {
    /// 밝은 배경의 기본 테마를 정의한다.
    fn default() -> Self {
        Self {
            palette: Palette {
                bg_main: Color32::from_rgb(243, 244, 246),
                bg_panel: Color32::WHITE,
                bg_header: Color32::from_rgb(249, 250, 251),
                bg_selected: Color32::from_rgb(219, 234, 254),
                bg_hover: Color32::from_rgb(239, 246, 255),
                bg_error: Color32::from_rgb(254, 242, 242),
                fg_text_primary: Color32::from_rgb(17, 24, 39),
                fg_text_secondary: Color32::from_rgb(107, 114, 128),
                fg_icon: Color32::from_rgb(156, 163, 175),
                border_soft: Color32::from_rgb(229, 231, 235),
                accent_primary: Color32::from_rgb(37, 99, 235),
                accent_active: Color32::from_rgb(16, 185, 129),
                accent_error: Color32::from_rgb(185, 28, 28),
            },
            decorations: Decorations {
                panel_width: 384.0,
                panel_rounding: 8.0,
                button_rounding: 8.0,
                button_height: 34.0,
                row_height: 48.0,
                indicator_radius: 4.0,
                screen_margin: 16.0,
                section_margin: egui::Margin::symmetric(16.0, 12.0),
            },
        }
    }
}

impl Theme {
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn decorations(&self) -> &Decorations {
        &self.decorations
    }

    /// egui Context에 테마 기반 스타일을 적용한다.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::light();
        visuals.window_rounding = egui::Rounding::same(self.decorations.panel_rounding);
        visuals.panel_fill = self.palette.bg_main;
        visuals.selection.bg_fill = self.palette.accent_primary;
        visuals.extreme_bg_color = self.palette.bg_panel;
        ctx.set_visuals(visuals);
    }

    /// 진행 상태에 대응하는 색상을 반환한다. 푸터 상태 점, 스피너, 오류 배너가 공유한다.
    pub fn activity_color(&self, activity: &Activity) -> Color32 {
        match activity {
            Activity::Idle => self.palette.fg_icon,
            Activity::Fetching | Activity::Applying { .. } => self.palette.accent_primary,
            Activity::Failed(_) => self.palette.accent_error,
        }
    }
}

/// 두 색을 `t` 비율로 섞는다.
pub fn blend_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| -> u8 { (x as f32 + (y as f32 - x as f32) * t).round() as u8 };
    Color32::from_rgba_unmultiplied(
        mix(a.r(), b.r()),
        mix(a.g(), b.g()),
        mix(a.b(), b.b()),
        mix(a.a(), b.a()),
    )
}

/// build.rs에서 찾은 폰트를 egui에 등록한다. 생성 시 한 번만 호출한다.
pub fn install_custom_font(ctx: &egui::Context) {
    if let Some(bytes) = embedded_font_bytes() {
        let mut fonts = egui::FontDefinitions::default();
        fonts
            .font_data
            .insert("custom".into(), egui::FontData::from_static(bytes));
        fonts
            .families
            .entry(egui::FontFamily::Proportional)
            .or_default()
            .insert(0, "custom".into());
        fonts
            .families
            .entry(egui::FontFamily::Monospace)
            .or_default()
            .insert(0, "custom".into());
        ctx.set_fonts(fonts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::switcher::SwitcherError;

    #[test]
    fn blend_hits_both_ends() {
        let a = Color32::from_rgb(0, 0, 0);
        let b = Color32::from_rgb(200, 100, 50);
        assert_eq!(blend_color(a, b, 0.0), a);
        assert_eq!(blend_color(a, b, 1.0), b);
        assert_eq!(blend_color(a, b, 0.5), Color32::from_rgb(100, 50, 25));
    }

    #[test]
    fn activity_color_distinguishes_every_state() {
        let theme = Theme::default();
        let palette = *theme.palette();
        assert_eq!(theme.activity_color(&Activity::Idle), palette.fg_icon);
        assert_eq!(theme.activity_color(&Activity::Fetching), palette.accent_primary);
        assert_eq!(
            theme.activity_color(&Activity::Applying { identity: "db/reset".into() }),
            palette.accent_primary
        );
        assert_eq!(
            theme.activity_color(&Activity::Failed(SwitcherError::Retrieval)),
            palette.accent_error
        );
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Integration tests to validate style and design token coherence.

#[cfg(test)]
mod tests {
    use iced::widget::button::Status;
    use iced::{Background, Theme};
    use iced_reel::config::DEFAULT_BACKDROP_OPACITY;
    use iced_reel::ui::design_tokens::{opacity, palette, sizing, spacing};
    use iced_reel::ui::styles::{button, container, overlay};
    use iced_reel::ui::theming::ThemeMode;

    #[test]
    fn all_button_styles_compile() {
        let theme = Theme::Dark;

        let _ = button::primary(&theme, Status::Active);
        let _ = button::list_entry(&theme, Status::Hovered);
        let _ = button::close(&theme, Status::Active);
        let _ = button::overlay(palette::WHITE, 0.5, 0.8)(&theme, Status::Active);
    }

    #[test]
    fn close_button_lightens_on_hover() {
        let theme = Theme::Light;
        let idle = button::close(&theme, Status::Active);
        let hovered = button::close(&theme, Status::Hovered);
        assert_eq!(idle.background, Some(Background::Color(palette::ERROR_600)));
        assert_eq!(hovered.background, Some(Background::Color(palette::ERROR_500)));
    }

    #[test]
    fn backdrop_uses_requested_alpha() {
        let style = overlay::backdrop(DEFAULT_BACKDROP_OPACITY)(&Theme::Dark);
        match style.background {
            Some(Background::Color(color)) => {
                assert!((color.a - opacity::BACKDROP).abs() < f32::EPSILON);
            }
            other => panic!("unexpected backdrop background: {other:?}"),
        }
    }

    #[test]
    fn panel_style_is_available_for_both_themes() {
        let _ = container::panel(opacity::SURFACE)(&Theme::Light);
        let _ = container::panel(opacity::SURFACE)(&Theme::Dark);
        let _ = container::player_area(&Theme::Dark);
        let _ = container::embed_card(&Theme::Dark);
    }

    #[test]
    fn design_tokens_are_accessible() {
        let _ = palette::PRIMARY_500;
        let _ = spacing::MD;
        assert!(sizing::CLOSE_BUTTON > 0.0);
    }

    #[test]
    fn explicit_theme_modes_map_to_iced() {
        assert_eq!(ThemeMode::Light.to_iced(), Theme::Light);
        assert_eq!(ThemeMode::Dark.to_iced(), Theme::Dark);
    }
}

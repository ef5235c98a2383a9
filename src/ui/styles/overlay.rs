// SPDX-License-Identifier: MPL-2.0
//! Overlay styles for the modal backdrop and the player controls bar.

use crate::ui::design_tokens::{
    opacity,
    palette::{BLACK, WHITE},
};
use iced::widget::container;
use iced::{Background, Color, Theme};

/// Full-window dimming layer behind the modal.
pub fn backdrop(alpha: f32) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(Color { a: alpha, ..BLACK })),
        ..Default::default()
    }
}

/// Strip holding the native player controls.
#[must_use]
pub fn controls_container(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_STRONG,
            ..BLACK
        })),
        text_color: Some(WHITE),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backdrop_uses_requested_alpha() {
        let style = backdrop(0.8)(&Theme::Light);
        let Some(Background::Color(color)) = style.background else {
            panic!("expected color background");
        };
        assert_eq!(color.a, 0.8);
        assert_eq!(color.r, 0.0);
    }
}

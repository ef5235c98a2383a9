// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{opacity, palette, radius, shadow};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Surface of the modal content panel.
///
/// The color is derived from the active Iced `Theme` background so the panel
/// stays readable in both light and dark modes.
pub fn panel(alpha: f32) -> impl Fn(&Theme) -> container::Style {
    move |theme: &Theme| {
        let base = theme.extended_palette().background.base.color;

        container::Style {
            background: Some(Background::Color(Color {
                a: opacity::SURFACE * alpha,
                ..base
            })),
            border: Border {
                radius: radius::LG.into(),
                ..Default::default()
            },
            shadow: iced::Shadow {
                color: Color {
                    a: opacity::OVERLAY_MEDIUM * alpha,
                    ..palette::BLACK
                },
                ..shadow::LG
            },
            ..Default::default()
        }
    }
}

/// Black letterbox behind the player area.
pub fn player_area(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::BLACK)),
        text_color: Some(palette::WHITE),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Card shown in place of an embedded web player.
pub fn embed_card(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(Background::Color(palette.background.weak.color)),
        text_color: Some(palette.background.weak.text),
        border: Border {
            color: palette.primary.base.color,
            width: 1.0,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

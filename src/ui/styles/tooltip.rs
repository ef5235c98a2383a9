// SPDX-License-Identifier: MPL-2.0
//! Tooltip styles with proper contrast against either theme.

use crate::ui::design_tokens::{radius, spacing, typography};
use iced::widget::{container, tooltip, Container, Text};
use iced::{Background, Border, Color, Element, Shadow, Theme, Vector};

/// Inverted tooltip surface: light on dark themes, dark on light ones.
pub fn tooltip_container(theme: &Theme) -> container::Style {
    let (bg_color, text_color) = if theme.extended_palette().is_dark {
        (
            Color::from_rgba(0.95, 0.95, 0.95, 0.98),
            Color::from_rgb(0.1, 0.1, 0.1),
        )
    } else {
        (
            Color::from_rgba(0.15, 0.15, 0.15, 0.98),
            Color::from_rgb(0.95, 0.95, 0.95),
        )
    };

    container::Style {
        background: Some(Background::Color(bg_color)),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.25),
            offset: Vector::new(0.0, 2.0),
            blur_radius: 8.0,
        },
        text_color: Some(text_color),
        ..Default::default()
    }
}

/// Wraps `content` in a tooltip showing `tip`.
pub fn styled<'a, Message: 'a>(
    content: impl Into<Element<'a, Message>>,
    tip: impl Into<String>,
    position: tooltip::Position,
) -> tooltip::Tooltip<'a, Message, Theme, iced::Renderer> {
    let tip_container = Container::new(Text::new(tip.into()).size(typography::BODY_SM))
        .padding(spacing::XS)
        .style(tooltip_container);

    tooltip(content, tip_container, position).gap(spacing::XS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_theme_uses_dark_tooltip() {
        let style = tooltip_container(&Theme::Light);
        let Some(Background::Color(bg)) = style.background else {
            panic!("Expected color background")
        };
        assert!(bg.r < 0.5);
    }

    #[test]
    fn dark_theme_uses_light_tooltip() {
        let style = tooltip_container(&Theme::Dark);
        let Some(Background::Color(bg)) = style.background else {
            panic!("Expected color background")
        };
        assert!(bg.r > 0.5);
    }
}

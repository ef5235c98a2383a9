// SPDX-License-Identifier: MPL-2.0
//! Embedded player surface.
//!
//! A web player cannot live inside the window, so the surface shows the embed
//! URL and opens it in the system browser.

use super::source::VideoSource;
use super::Message;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, container, text, Column};
use iced::{Element, Length};

pub(super) fn view<'a>(
    source: &'a VideoSource,
    open_failed: bool,
    i18n: &'a I18n,
    height: f32,
) -> Element<'a, Message> {
    let embed_url = source
        .embed_url()
        .unwrap_or_else(|| source.url().to_string());

    let mut content = Column::new()
        .spacing(spacing::SM)
        .align_x(Horizontal::Center)
        .width(Length::Fill)
        .push(text(i18n.tr("embed-player-title")).size(typography::TITLE_MD))
        .push(text(i18n.tr("embed-player-hint")).size(typography::BODY))
        .push(text(embed_url).size(typography::CAPTION))
        .push(
            button(text(i18n.tr("embed-player-open-button")).size(typography::BODY))
                .padding([spacing::XS, spacing::MD])
                .style(styles::button::primary)
                .on_press(Message::OpenInBrowser),
        );

    if open_failed {
        content = content.push(
            text(i18n.tr("embed-player-open-failed"))
                .size(typography::BODY_SM)
                .color(palette::ERROR_500),
        );
    }

    container(content)
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .padding(spacing::LG)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .style(styles::container::embed_card)
        .into()
}

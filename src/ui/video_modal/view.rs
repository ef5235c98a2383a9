// SPDX-License-Identifier: MPL-2.0
//! Overlay layout: full-window backdrop with the content panel centred on top.

use super::source::{SourceKind, VideoSource};
use super::{embed, native, Message, State, ViewContext};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::alignment::Horizontal;
use iced::widget::{
    button, center, container, mouse_area, opaque, stack, text, tooltip, Column, Row, Space,
};
use iced::{Element, Length};

pub(super) fn overlay<'a>(
    state: &'a State,
    source: &'a VideoSource,
    ctx: &ViewContext<'a>,
) -> Element<'a, Message> {
    let fade = state.reveal.opacity();

    let backdrop = mouse_area(
        container(Space::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::overlay::backdrop(
                state.modal_config.backdrop_opacity() * fade,
            )),
    )
    .on_press(Message::BackdropPressed);

    let player_height = state.modal_config.player_height();
    let player: Element<'a, Message> = match (source.kind(), state.player.as_ref()) {
        (SourceKind::Native, Some(player)) => native::view(player, ctx.i18n, player_height),
        _ => embed::view(source, state.embed_open_failed, ctx.i18n, player_height),
    };

    let close_button = styles::tooltip::styled(
        button(
            text("✕")
                .size(typography::BODY_LG)
                .width(Length::Fill)
                .align_x(Horizontal::Center),
        )
        .width(Length::Fixed(sizing::CLOSE_BUTTON))
        .height(Length::Fixed(sizing::CLOSE_BUTTON))
        .style(styles::button::close)
        .on_press(Message::CloseButtonPressed),
        ctx.i18n.tr("video-modal-close"),
        tooltip::Position::Left,
    );

    let header = Row::new()
        .push(Space::new().width(Length::Fill))
        .push(close_button);

    let body = Column::new()
        .spacing(spacing::XS)
        .push(header)
        .push(player);

    let panel = container(body)
        .width(Length::Fixed(
            state.panel_width(ctx.window_width) * state.reveal.scale(),
        ))
        .padding(spacing::MD)
        .style(styles::container::panel(fade));

    // Presses on the panel stop here instead of falling through to the backdrop
    let panel = mouse_area(panel).on_press(Message::PanelPressed);

    stack![backdrop, center(opaque(panel))].into()
}

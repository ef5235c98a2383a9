// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The launcher fills the window. While a video is open the modal overlay is
//! stacked on top of it.

use super::Message;
use crate::config::LibraryEntry;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::video_modal;
use iced::widget::{button, container, scrollable, stack, text, text_input, Column, Row};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub url_input: &'a str,
    pub library: &'a [LibraryEntry],
    pub warning: Option<&'a str>,
    pub modal: &'a video_modal::State,
    pub window_width: f32,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let launcher = container(view_launcher(&ctx))
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::LG)
        .center_x(Length::Fill);

    let overlay = ctx.modal.view(video_modal::ViewContext {
        i18n: ctx.i18n,
        window_width: ctx.window_width,
    });

    match overlay {
        Some(overlay) => stack![launcher, overlay.map(Message::Modal)].into(),
        None => launcher.into(),
    }
}

fn view_launcher<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;

    let title = text(i18n.tr("launcher-title")).size(typography::TITLE_LG);

    // The input keeps focus under the overlay, Enter must not swap the source
    let editable = !ctx.modal.is_shown();
    let input = text_input(&i18n.tr("launcher-url-placeholder"), ctx.url_input)
        .on_input_maybe(editable.then_some(Message::UrlInputChanged))
        .on_submit_maybe(editable.then_some(Message::PlayPressed))
        .padding(spacing::XS)
        .size(typography::BODY_LG)
        .width(Length::Fill);

    let can_play = editable && !ctx.url_input.trim().is_empty();
    let play_button = button(text(i18n.tr("launcher-play-button")).size(typography::BODY))
        .padding([spacing::XS, spacing::MD])
        .height(Length::Fixed(sizing::INPUT_HEIGHT))
        .style(styles::button::primary)
        .on_press_maybe(can_play.then_some(Message::PlayPressed));

    let url_row = Row::new()
        .spacing(spacing::XS)
        .push(input)
        .push(play_button);

    let mut column = Column::new()
        .spacing(spacing::MD)
        .max_width(sizing::LAUNCHER_WIDTH)
        .push(title)
        .push(url_row);

    if let Some(key) = ctx.warning {
        column = column.push(
            text(i18n.tr(key))
                .size(typography::BODY_SM)
                .color(palette::WARNING_500),
        );
    }

    column = column
        .push(text(i18n.tr("launcher-library-title")).size(typography::TITLE_SM))
        .push(view_library(ctx.library, i18n));

    column.into()
}

fn view_library<'a>(library: &'a [LibraryEntry], i18n: &I18n) -> Element<'a, Message> {
    if library.is_empty() {
        return text(i18n.tr("launcher-library-empty"))
            .size(typography::BODY_SM)
            .into();
    }

    let entries = library.iter().fold(
        Column::new().spacing(spacing::XXS),
        |column, entry| {
            let label = Column::new()
                .push(text(&entry.title).size(typography::BODY))
                .push(
                    text(&entry.url)
                        .size(typography::CAPTION)
                        .color(palette::GRAY_400),
                );
            column.push(
                button(label)
                    .width(Length::Fill)
                    .padding(spacing::XS)
                    .style(styles::button::list_entry)
                    .on_press(Message::LibraryEntrySelected(entry.url.clone())),
            )
        },
    );

    scrollable(entries).height(Length::Fill).into()
}

// SPDX-License-Identifier: MPL-2.0
//! Update logic for the launcher and the video modal it hosts.
//!
//! The launcher owns the URL being played. The modal only mirrors it: every
//! change goes through [`open_video`] or [`close_video`], which keep the two
//! in sync.

use super::Message;
use crate::ui::video_modal::{self, Event as ModalEvent};
use iced::Task;

/// Mutable view of the application state handed to the update handlers.
pub(super) struct UpdateContext<'a> {
    pub url_input: &'a mut String,
    pub video_url: &'a mut Option<String>,
    pub modal: &'a mut video_modal::State,
    pub window_width: &'a mut f32,
}

pub(super) fn update(ctx: &mut UpdateContext<'_>, message: Message) -> Task<Message> {
    match message {
        Message::UrlInputChanged(value) => {
            *ctx.url_input = value;
        }
        Message::PlayPressed => {
            if ctx.modal.is_shown() {
                return Task::none();
            }
            let url = ctx.url_input.trim().to_string();
            open_video(ctx, url);
        }
        Message::LibraryEntrySelected(url) => {
            open_video(ctx, url);
        }
        Message::Modal(message) => {
            handle_modal_message(ctx, message);
        }
        Message::WindowResized(width) => {
            *ctx.window_width = width;
        }
    }
    Task::none()
}

fn handle_modal_message(ctx: &mut UpdateContext<'_>, message: video_modal::Message) {
    match ctx.modal.update(message) {
        ModalEvent::None => {}
        ModalEvent::Close => close_video(ctx),
    }
}

/// Shows `url` in the modal. Blank input is ignored.
pub(super) fn open_video(ctx: &mut UpdateContext<'_>, url: String) {
    if url.trim().is_empty() {
        return;
    }
    *ctx.video_url = Some(url);
    ctx.modal.set_source(ctx.video_url.clone());
}

pub(super) fn close_video(ctx: &mut UpdateContext<'_>) {
    *ctx.video_url = None;
    ctx.modal.set_source(None);
}

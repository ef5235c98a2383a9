// SPDX-License-Identifier: MPL-2.0
//! Native player area: current frame, fallback text and the controls strip.

use super::Message;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{opacity, palette, spacing, typography};
use crate::ui::styles;
use crate::video_player::{NativePlayer, PlaybackState};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, container, image, text, Column, Row, Space};
use iced::{ContentFit, Element, Length};

pub(super) fn view<'a>(player: &'a NativePlayer, i18n: &'a I18n, height: f32) -> Element<'a, Message> {
    let screen: Element<'a, Message> = match (player.state(), player.frame()) {
        (PlaybackState::Failed { error }, _) => text(i18n.tr(error.i18n_key()))
            .size(typography::BODY)
            .color(palette::ERROR_500)
            .into(),
        (_, Some(frame)) => image(frame.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        (_, None) => text(i18n.tr("player-loading")).size(typography::BODY).into(),
    };

    let screen = container(screen)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center);

    let mut column = Column::new().push(screen);
    if player.state().error().is_none() {
        column = column.push(controls(player, i18n));
    }

    container(column)
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .style(styles::container::player_area)
        .into()
}

fn controls<'a>(player: &'a NativePlayer, i18n: &'a I18n) -> Element<'a, Message> {
    let playback_label = match player.state() {
        PlaybackState::Playing => i18n.tr("player-pause"),
        PlaybackState::Ended => i18n.tr("player-replay"),
        _ => i18n.tr("player-play"),
    };
    let mute_label = if player.is_muted() {
        i18n.tr("player-unmute")
    } else {
        i18n.tr("player-mute")
    };

    let mut row = Row::new()
        .spacing(spacing::XS)
        .padding(spacing::XS)
        .align_y(Vertical::Center)
        .push(control_button(playback_label, Message::TogglePlayback));

    if !player.state().is_finished() {
        row = row.push(control_button(i18n.tr("player-stop"), Message::Stop));
    }

    row = row
        .push(control_button(mute_label, Message::ToggleMute))
        .push(control_button("−".to_string(), Message::VolumeDown))
        .push(text(volume_percent(player.volume().value())).size(typography::CAPTION))
        .push(control_button("+".to_string(), Message::VolumeUp))
        .push(Space::new().width(Length::Fill));

    let status_key = match player.state() {
        PlaybackState::Ended => Some("player-ended"),
        PlaybackState::Stopped => Some("player-stopped"),
        _ => None,
    };
    if let Some(key) = status_key {
        row = row.push(text(i18n.tr(key)).size(typography::CAPTION));
    }

    row = row.push(text(format_time(player.position_secs())).size(typography::CAPTION));

    container(row)
        .width(Length::Fill)
        .style(styles::overlay::controls_container)
        .into()
}

fn control_button<'a>(label: String, message: Message) -> Element<'a, Message> {
    button(text(label).size(typography::BODY_SM))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::overlay(
            palette::WHITE,
            opacity::OVERLAY_MEDIUM,
            opacity::OVERLAY_HOVER,
        ))
        .on_press(message)
        .into()
}

fn volume_percent(volume: f32) -> String {
    format!("{:.0}%", volume * 100.0)
}

/// Formats a position as MM:SS, or HH:MM:SS past the hour.
fn format_time(seconds: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_secs = seconds.max(0.0) as u64;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_handles_zero_and_negative() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(-3.0), "00:00");
    }

    #[test]
    fn volume_is_shown_as_rounded_percent() {
        assert_eq!(volume_percent(0.0), "0%");
        assert_eq!(volume_percent(0.8), "80%");
        assert_eq!(volume_percent(1.0), "100%");
    }

    #[test]
    fn format_time_switches_to_hours() {
        assert_eq!(format_time(75.9), "01:15");
        assert_eq!(format_time(3725.0), "01:02:05");
    }
}

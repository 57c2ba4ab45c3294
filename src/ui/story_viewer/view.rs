// SPDX-License-Identifier: MPL-2.0
//! Story viewer rendering: progress segments, filter layer, roster label
//! and toasts, stacked over the media element supplied by the host.

use super::{Message, StoryViewer};
use crate::domain::story::Phase;
use crate::i18n::fluent::I18n;
use crate::playback::StoryPlaybackSession;
use crate::ui::design_tokens::{opacity, palette, sizing, spacing};
use crate::ui::filter_overlay;
use crate::ui::notifications::Toast;
use iced::widget::{button, container, text, Column, Container, Row, Space, Stack};
use iced::{alignment, Background, Color, Element, Length, Padding, Theme};

/// Portions used to split a partly filled segment.
const SEGMENT_RESOLUTION: f32 = 1000.0;

/// Fill fraction of each progress segment, left to right.
#[must_use]
pub fn segment_fills(session: &StoryPlaybackSession) -> Vec<f32> {
    let current = session.current_index();
    let progress = session.progress().value();
    (0..session.stories().len())
        .map(|index| match index.cmp(&current) {
            std::cmp::Ordering::Less => 1.0,
            std::cmp::Ordering::Equal => progress,
            std::cmp::Ordering::Greater => 0.0,
        })
        .collect()
}

impl StoryViewer {
    /// Draws the viewer over `media`, which the host renders from `Effect::LoadMedia`.
    pub fn view<'a>(&'a self, i18n: &'a I18n, media: Element<'a, Message>) -> Element<'a, Message> {
        let Some(session) = self.session() else {
            return centered_label(i18n.tr("story-media-loading"));
        };

        let mut stack = Stack::new().push(media);

        if let Some(overlay) = session
            .current_story()
            .and_then(|story| filter_overlay::resolve(story.filter))
        {
            let color = overlay.composited();
            stack = stack.push(
                Container::new(Space::new())
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .style(move |_: &Theme| solid(color)),
            );
        }

        let status = if session.media_failed() {
            Some(i18n.tr("story-media-failed"))
        } else if session.phase() == Phase::Loading {
            Some(i18n.tr("story-media-loading"))
        } else {
            None
        };
        if let Some(label) = status {
            stack = stack.push(centered_label(label));
        }

        let mut chrome = Column::new()
            .spacing(spacing::XS)
            .push(progress_segments(session))
            .push(Space::new().height(Length::Fill));
        if session.is_own() {
            chrome = chrome.push(owner_footer(session, i18n));
        }

        stack = stack
            .push(chrome.padding(spacing::XS))
            .push(Toast::view_overlay(self.notifications(), i18n).map(Message::Notification));

        // Content follows the finger during a dismiss drag.
        Container::new(stack)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(Padding {
                top: session.drag_offset(),
                right: 0.0,
                bottom: 0.0,
                left: 0.0,
            })
            .style(|_: &Theme| solid(palette::BLACK))
            .into()
    }
}

fn progress_segments<'a>(session: &StoryPlaybackSession) -> Element<'a, Message> {
    let segments = segment_fills(session).into_iter().map(segment);
    Row::with_children(segments)
        .spacing(sizing::PROGRESS_GAP)
        .width(Length::Fill)
        .into()
}

fn segment<'a>(fill: f32) -> Element<'a, Message> {
    let bar = |portion: u16, color: Color| {
        Container::new(Space::new())
            .width(Length::FillPortion(portion))
            .height(Length::Fixed(sizing::PROGRESS_SEGMENT))
            .style(move |_: &Theme| solid(color))
    };
    let track = Color {
        a: opacity::OVERLAY_MEDIUM,
        ..palette::WHITE
    };

    let filled = (fill.clamp(0.0, 1.0) * SEGMENT_RESOLUTION).round() as u16;
    let rest = SEGMENT_RESOLUTION as u16 - filled;
    let mut row = Row::new().width(Length::Fill);
    if filled > 0 {
        row = row.push(bar(filled, palette::WHITE));
    }
    if rest > 0 {
        row = row.push(bar(rest, track));
    }
    row.into()
}

fn owner_footer<'a>(
    session: &'a StoryPlaybackSession,
    i18n: &'a I18n,
) -> Element<'a, Message> {
    let roster_label = match session.roster() {
        Some(roster) => {
            let count = roster.count.to_string();
            i18n.tr_with_args("story-viewer-count", &[("count", count.as_str())])
        }
        None if session.is_roster_loading() => i18n.tr("story-viewer-loading"),
        None => i18n.tr("story-viewer-empty"),
    };

    let delete = button(text(i18n.tr("story-delete")))
        .padding(spacing::XXS)
        .style(button::danger)
        .on_press_maybe(session.controls_enabled().then_some(Message::DeleteCurrent));

    Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(Container::new(text(roster_label).color(palette::WHITE)).width(Length::Fill))
        .push(delete)
        .into()
}

fn centered_label<'a>(label: String) -> Element<'a, Message> {
    Container::new(text(label).color(palette::WHITE))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

fn solid(color: Color) -> container::Style {
    container::Style {
        background: Some(Background::Color(color)),
        ..Default::default()
    }
}

use iced::widget::image::{Handle, Image};
use iced::widget::{
    button, column, container, horizontal_space, mouse_area, progress_bar, row, scrollable,
    text, Column,
};
use iced::{Alignment, Color, ContentFit, Element, Length};
use std::path::Path;

use crate::assets::{LoadedImage, RoundImages};
use crate::state::data::Side;
use crate::state::game::{RoundPhase, RoundView};
use crate::state::summary::Summary;
use crate::Message;

const ACCENT: Color = Color::from_rgb(0.23, 0.51, 0.96);
const MUTED: Color = Color::from_rgb(0.45, 0.45, 0.45);
const CORRECT: Color = Color::from_rgb(0.13, 0.77, 0.37);
const WRONG: Color = Color::from_rgb(0.94, 0.27, 0.27);

/// Title screen
pub fn landing<'a>(status: &'a str, asset_dir: &Path) -> Element<'a, Message> {
    let content = column![
        text("SHOT ON WHAT?").size(64),
        text("Can you spot the difference between computational photography and a full-frame sensor?")
            .size(18)
            .color(MUTED),
        button(text("Begin Challenge").size(24))
            .on_press(Message::Start)
            .padding(16),
        button("Choose Photo Folder")
            .on_press(Message::ChooseFolder)
            .padding(10),
        text(format!("Photos from {}", asset_dir.display())).size(12).color(MUTED),
        text(status).size(14),
        text("Optimized for detail inspection").size(10).color(MUTED),
    ]
    .spacing(20)
    .padding(40)
    .max_width(720.0)
    .align_x(Alignment::Center);

    centered(content)
}

/// Spinner stand-in while a round's photos load
pub fn loading<'a>() -> Element<'a, Message> {
    centered(text("Processing Vision...").size(14).color(MUTED))
}

/// A round in progress
pub fn playing<'a>(round: RoundView<'a>, images: &'a RoundImages) -> Element<'a, Message> {
    let header = row![
        column![
            text("Tap on the iPhone Shot").size(10).color(MUTED),
            text(format!("{} of {}", round.step, round.total)).size(16),
        ],
        horizontal_space(),
        column![
            text("Subject").size(10).color(MUTED),
            text(round.pair.category.as_str()).size(16).color(ACCENT),
        ]
        .align_x(Alignment::End),
    ]
    .padding([12, 24])
    .align_y(Alignment::Center);

    let photos = row![
        photo_panel(Side::A, images.on(Side::A), &round),
        photo_panel(Side::B, images.on(Side::B), &round),
    ]
    .spacing(4)
    .height(Length::Fill);

    let footer = match round.was_correct() {
        Some(true) => text("Optical Perfection").color(CORRECT),
        Some(false) => text("Tricked by the Sensor").color(WRONG),
        None => text("Tap the iPhone Shot"),
    }
    .size(20);

    column![header, photos, container(footer).padding(16).center_x(Length::Fill)]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// One side of the comparison
fn photo_panel<'a>(
    side: Side,
    image: &'a LoadedImage,
    round: &RoundView<'a>,
) -> Element<'a, Message> {
    let mut label = row![text(side.to_string()).size(20)]
        .spacing(8)
        .align_y(Alignment::Center);

    label = match round.choice() {
        Some(choice) => {
            let is_phone = round.presentation.phone_side == side;
            let device = if is_phone { "iPhone" } else { "Sony" };
            let tag = text(device).size(14).color(if is_phone { CORRECT } else { MUTED });
            if choice == side {
                label.push(tag).push(text("← your pick").size(12).color(MUTED))
            } else {
                label.push(tag)
            }
        }
        None => label.push(
            button(text("Inspect").size(12))
                .on_press(Message::Inspect(side))
                .padding([4, 10]),
        ),
    };

    let photo = Image::<Handle>::new(image.handle.clone())
        .content_fit(ContentFit::Contain)
        .width(Length::Fill)
        .height(Length::Fill);

    let panel = container(column![label, photo].spacing(8))
        .padding(8)
        .width(Length::Fill)
        .height(Length::Fill);

    // Only a ready round reacts to clicks
    if round.phase == RoundPhase::Ready {
        mouse_area(panel).on_press(Message::Choose(side)).into()
    } else {
        panel.into()
    }
}

/// Full-window view of one photo before answering
pub fn inspection<'a>(side: Side, image: &'a LoadedImage) -> Element<'a, Message> {
    let photo = Image::<Handle>::new(image.handle.clone())
        .content_fit(ContentFit::Contain)
        .width(Length::Fill)
        .height(Length::Fill);

    column![
        row![
            text(format!("Sample {}", side)).size(16),
            text(format!("{} × {}", image.width, image.height)).size(12).color(MUTED),
            horizontal_space(),
            button("Close").on_press(Message::CloseInspect),
        ]
        .padding(16)
        .align_y(Alignment::Center),
        mouse_area(container(photo).padding(8).height(Length::Fill))
            .on_press(Message::CloseInspect),
        column![
            text("No pixel peeping!").size(12).color(WRONG),
            text("Tap anywhere to close inspection").size(10).color(MUTED),
        ]
        .padding(16)
        .width(Length::Fill)
        .align_x(Alignment::Center),
    ]
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

/// Final score screen
pub fn result<'a>(summary: Summary) -> Element<'a, Message> {
    let content = column![
        text(summary.score.to_string()).size(96),
        text(format!("out of {}", summary.total)).size(12).color(MUTED),
        text("Challenge Complete").size(40),
        text(summary.tier.feedback()).size(18).color(ACCENT),
        column![
            row![
                text("Accuracy").size(10).color(MUTED),
                horizontal_space(),
                text(format!("{}%", summary.rounded_percentage())).size(14),
            ],
            progress_bar(0.0..=100.0, summary.percentage as f32).height(Length::Fixed(8.0)),
        ]
        .spacing(8)
        .width(Length::Fixed(280.0)),
        button(text("Try Again").size(18))
            .on_press(Message::Start)
            .padding([12, 32]),
    ]
    .spacing(16)
    .padding(40)
    .align_x(Alignment::Center);

    centered(content)
}

/// Dead end shown when no pair could be loaded
pub fn missing_assets<'a>(files: &'a [String], asset_dir: &Path) -> Element<'a, Message> {
    let list = Column::with_children(
        files
            .iter()
            .map(|file| text(format!("• {}", file)).size(12).color(MUTED).into()),
    )
    .spacing(4);

    let content = column![
        text("IMAGES NOT FOUND").size(28).color(WRONG),
        text(format!(
            "The app couldn't find your photos. Ensure the following files are in {}:",
            asset_dir.display()
        ))
        .size(14)
        .color(MUTED),
        container(scrollable(list))
            .padding(16)
            .width(Length::Fixed(360.0))
            .height(Length::Fixed(200.0)),
        button("Go Back").on_press(Message::AcknowledgeMissing).padding([12, 32]),
    ]
    .spacing(20)
    .padding(40)
    .max_width(560.0)
    .align_x(Alignment::Center);

    centered(content)
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

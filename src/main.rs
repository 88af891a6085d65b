use iced::keyboard::{self, key, Key};
use iced::{Element, Subscription, Task, Theme};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rfd::FileDialog;
use tracing_subscriber::EnvFilter;

mod assets;
mod config;
mod error;
mod state;
mod ui;

use assets::RoundImages;
use config::Settings;
use error::AssetError;
use state::catalog::Catalog;
use state::data::Side;
use state::game::{RoundPhase, RoundToken, Screen, Session};

/// Main application state
struct ShotOnWhat {
    settings: Settings,
    /// Pairs available to new games
    catalog: Catalog,
    /// All game progress; mutated only through its transitions
    session: Session,
    rng: StdRng,
    /// Photos of the live round, released before the next round loads
    images: Option<(RoundToken, RoundImages)>,
    /// Photo opened full-window, if any
    inspecting: Option<Side>,
    /// Status line on the landing screen
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Begin (or restart) a game
    Start,
    /// User clicked "Choose Photo Folder"
    ChooseFolder,
    /// Background load of a round's photos finished
    RoundLoaded(RoundToken, Result<RoundImages, AssetError>),
    /// User picked a side
    Choose(Side),
    /// Reveal feedback has been shown long enough
    RevealElapsed(RoundToken),
    Inspect(Side),
    CloseInspect,
    /// User left the missing-files screen
    AcknowledgeMissing,
    /// Enter key: the primary action of the current screen
    Confirm,
}

impl ShotOnWhat {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();
        let catalog = Catalog::resolve(&settings);

        tracing::info!(
            "🎨 Shot on What? initialized with {} pairs from {}",
            catalog.len(),
            settings.asset_dir.display()
        );

        let status = format!("Ready. {} pairs in catalog.", catalog.len());

        (
            ShotOnWhat {
                settings,
                catalog,
                session: Session::new(),
                rng: StdRng::from_entropy(),
                images: None,
                inspecting: None,
                status,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Start => {
                let token = self.session.start_game(&self.catalog, &mut self.rng);
                self.begin_round(token)
            }
            Message::ChooseFolder => {
                if self.session.screen() != Screen::Landing {
                    return Task::none();
                }

                let folder = FileDialog::new()
                    .set_title("Select Folder with Photo Pairs")
                    .pick_folder();

                if let Some(folder_path) = folder {
                    self.settings.asset_dir = folder_path;
                    self.catalog = Catalog::resolve(&self.settings);
                    self.status = format!(
                        "✅ {} pairs found in {}",
                        self.catalog.len(),
                        self.settings.asset_dir.display()
                    );
                }

                Task::none()
            }
            Message::RoundLoaded(token, Ok(images)) => {
                if self.session.round_loaded(token) {
                    self.images = Some((token, images));
                }
                Task::none()
            }
            Message::RoundLoaded(token, Err(error)) => {
                tracing::warn!("⚠️  {}", error);
                let next = self
                    .session
                    .report_load_failure(token, error.file(), &mut self.rng);
                self.begin_round(next)
            }
            Message::Choose(side) => match self.session.submit_answer(side) {
                Some(token) => {
                    self.inspecting = None;
                    Task::perform(tokio::time::sleep(self.settings.reveal_delay()), move |_| {
                        Message::RevealElapsed(token)
                    })
                }
                None => Task::none(),
            },
            Message::RevealElapsed(token) => {
                let next = self.session.commit_answer(token, &mut self.rng);
                self.begin_round(next)
            }
            Message::Inspect(side) => {
                let ready = self
                    .session
                    .round_view()
                    .is_some_and(|round| round.phase == RoundPhase::Ready);
                if self.images.is_some() && ready {
                    self.inspecting = match self.inspecting {
                        Some(open) if open == side => None,
                        _ => Some(side),
                    };
                }
                Task::none()
            }
            Message::CloseInspect => {
                self.inspecting = None;
                Task::none()
            }
            Message::AcknowledgeMissing => {
                self.session.acknowledge_missing();
                Task::none()
            }
            Message::Confirm => match self.session.screen() {
                Screen::Landing | Screen::Result => self.update(Message::Start),
                Screen::NoPlayablePairs => self.update(Message::AcknowledgeMissing),
                Screen::Playing => Task::none(),
            },
        }
    }

    /// Swap to a new round: drop the old photos and load the new ones
    fn begin_round(&mut self, token: Option<RoundToken>) -> Task<Message> {
        self.release_images();
        self.inspecting = None;

        let Some(token) = token else {
            return Task::none();
        };
        let Some(round) = self.session.round_view() else {
            return Task::none();
        };

        let dir = self.settings.asset_dir.clone();
        let left = round.presentation.left_file.clone();
        let right = round.presentation.right_file.clone();

        Task::perform(assets::load_round(dir, left, right), move |result| {
            Message::RoundLoaded(token, result)
        })
    }

    fn release_images(&mut self) {
        if let Some((token, images)) = self.images.take() {
            tracing::debug!(
                "Released {:?} photos: {}, {}",
                token,
                images.left.file,
                images.right.file
            );
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        match self.session.screen() {
            Screen::Landing => ui::screens::landing(&self.status, &self.settings.asset_dir),
            Screen::Playing => {
                let round = self.session.round_view();
                let images = self
                    .images
                    .as_ref()
                    .filter(|(token, _)| round.is_some_and(|r| r.token == *token))
                    .map(|(_, images)| images);

                match (round, images, self.inspecting) {
                    (Some(_), Some(images), Some(side)) => {
                        ui::screens::inspection(side, images.on(side))
                    }
                    (Some(round), Some(images), None) => ui::screens::playing(round, images),
                    _ => ui::screens::loading(),
                }
            }
            Screen::Result => ui::screens::result(self.session.summary()),
            Screen::NoPlayablePairs => ui::screens::missing_assets(
                self.session.missing_files(),
                &self.settings.asset_dir,
            ),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(handle_key)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Keyboard shortcuts
fn handle_key(key: Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    match key.as_ref() {
        Key::Character("a") | Key::Character("A") | Key::Named(key::Named::ArrowLeft) => {
            Some(Message::Choose(Side::A))
        }
        Key::Character("b") | Key::Character("B") | Key::Named(key::Named::ArrowRight) => {
            Some(Message::Choose(Side::B))
        }
        Key::Named(key::Named::Enter) => Some(Message::Confirm),
        Key::Named(key::Named::Escape) => Some(Message::CloseInspect),
        _ => None,
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    iced::application(
        "Shot on What?",
        ShotOnWhat::update,
        ShotOnWhat::view,
    )
    .subscription(ShotOnWhat::subscription)
    .theme(ShotOnWhat::theme)
    .centered()
    .run_with(ShotOnWhat::new)
}

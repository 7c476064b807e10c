//! Main GUI application

use crate::backend::{BackendCommand, BackendEvent, DownloadForm};
use crate::downloader::request::{is_playlist_url, normalize_url, validate_url};
use crate::downloader::{DownloadMode, DownloadOutcome};
use crate::gui::clipboard;
use crate::gui::components::FormatPicker;
use crate::gui::theme;
use crate::utils::config::{Settings, SettingsStore};
use crate::utils::history::HistoryLog;
use iced::widget::{button, column, container, row, text, Space};
use iced::{Application, Command, Element, Length, Subscription, Theme};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{error, info, warn};

/// Channels and stores handed to the GUI at launch
pub struct AppFlags {
    pub commands: mpsc::Sender<BackendCommand>,
    pub events: Arc<Mutex<mpsc::Receiver<BackendEvent>>>,
    pub settings: SettingsStore,
    pub history: HistoryLog,
}

/// Main application state
pub struct TubefetchApp {
    commands: mpsc::Sender<BackendCommand>,
    events: Arc<Mutex<mpsc::Receiver<BackendEvent>>>,
    settings_store: SettingsStore,
    history: HistoryLog,

    // UI State
    current_view: View,
    form: DownloadForm,
    url_error: Option<String>,
    playlist_entries: Option<usize>,
    status_message: String,
    progress: f32,
    busy: bool,
    picker: Option<FormatPicker>,

    // Settings panel, edited in place until saved
    settings: Settings,
    download_path_input: String,
    format_input: String,

    history_text: String,
}

/// Application view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Main,
    Settings,
    History,
}

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Download form
    UrlChanged(String),
    PasteUrl,
    ClearUrl,
    ModeSelected(DownloadMode),
    DownloadAllToggled(bool),
    ReverseToggled(bool),
    StartChanged(String),
    EndChanged(String),
    DownloadPressed,
    CommandSent(Result<(), String>),

    // Stream picker
    PickerSelected(String),
    PickerConfirmed,
    PickerCancelled,

    // Backend
    Backend(BackendEvent),

    // View navigation
    SwitchView(View),

    // Settings
    DownloadPathChanged(String),
    FormatChanged(String),
    BrowseDownloadPath,
    DownloadPathPicked(Option<PathBuf>),
    OpenDownloadFolder,
    SaveSettings,

    // History
    RefreshHistory,
    HistoryLoaded(String),

    DialogClosed,
}

impl Application for TubefetchApp {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = AppFlags;

    fn new(flags: Self::Flags) -> (Self, Command<Message>) {
        let settings = flags.settings.load();

        let mut form = DownloadForm {
            download_all: true,
            ..Default::default()
        };
        if let Some(url) = clipboard::supported_url_from_clipboard() {
            info!("Prefilled URL from clipboard");
            form.url = url;
        }

        let app = Self {
            commands: flags.commands,
            events: flags.events,
            settings_store: flags.settings,
            history: flags.history,
            current_view: View::Main,
            form,
            url_error: None,
            playlist_entries: None,
            status_message: "Ready".to_string(),
            progress: 0.0,
            busy: false,
            picker: None,
            download_path_input: settings.download_path.to_string_lossy().into_owned(),
            format_input: settings.format.clone(),
            settings,
            history_text: String::new(),
        };

        let load_history = app.load_history();
        (app, load_history)
    }

    fn title(&self) -> String {
        String::from("Tubefetch - YouTube Downloader")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::UrlChanged(url) => {
                self.form.url = url;
                self.url_error = None;
                self.playlist_entries = None;
                Command::none()
            }

            Message::PasteUrl => {
                match clipboard::get_clipboard_content() {
                    Ok(content) => {
                        self.form.url = content.trim().to_string();
                        self.url_error = None;
                        self.playlist_entries = None;
                        self.status_message = "URL pasted from clipboard".to_string();
                    }
                    Err(e) => {
                        self.status_message = e;
                    }
                }
                Command::none()
            }

            Message::ClearUrl => {
                self.form.url.clear();
                self.url_error = None;
                self.playlist_entries = None;
                Command::none()
            }

            Message::ModeSelected(mode) => {
                self.form.mode = mode;
                Command::none()
            }

            Message::DownloadAllToggled(value) => {
                self.form.download_all = value;
                Command::none()
            }

            Message::ReverseToggled(value) => {
                self.form.reverse = value;
                Command::none()
            }

            Message::StartChanged(value) => {
                self.form.start = value;
                Command::none()
            }

            Message::EndChanged(value) => {
                self.form.end = value;
                Command::none()
            }

            Message::DownloadPressed => {
                if self.busy {
                    return Command::none();
                }
                if let Err(e) = validate_url(&normalize_url(&self.form.url)) {
                    self.url_error = Some(e.to_string());
                    return Command::none();
                }

                self.url_error = None;
                self.busy = true;
                self.progress = 0.0;
                self.status_message = "Fetching available formats...".to_string();
                self.send(BackendCommand::Download(self.form.clone()))
            }

            Message::CommandSent(Ok(())) => Command::none(),

            Message::CommandSent(Err(e)) => {
                error!("Failed to reach backend: {}", e);
                self.busy = false;
                self.status_message = format!("Error: {}", e);
                Command::none()
            }

            Message::PickerSelected(format_id) => {
                if let Some(picker) = self.picker.as_mut() {
                    picker.select(format_id);
                }
                Command::none()
            }

            Message::PickerConfirmed => {
                if let Some(picker) = self.picker.take() {
                    if let Some(id) = picker.confirm(self.form.playlist_choice()) {
                        self.status_message = format!("Starting download of format {}...", id);
                    }
                }
                Command::none()
            }

            Message::PickerCancelled => {
                if let Some(picker) = self.picker.take() {
                    picker.cancel();
                }
                Command::none()
            }

            Message::Backend(event) => self.handle_backend_event(event),

            Message::SwitchView(view) => {
                self.current_view = view;
                if view == View::History {
                    return self.load_history();
                }
                Command::none()
            }

            Message::DownloadPathChanged(path) => {
                self.download_path_input = path;
                Command::none()
            }

            Message::FormatChanged(format) => {
                self.format_input = format;
                Command::none()
            }

            Message::BrowseDownloadPath => {
                let start_dir = PathBuf::from(&self.download_path_input);
                Command::perform(
                    async move {
                        rfd::AsyncFileDialog::new()
                            .set_directory(&start_dir)
                            .pick_folder()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::DownloadPathPicked,
                )
            }

            Message::DownloadPathPicked(Some(path)) => {
                self.download_path_input = path.to_string_lossy().into_owned();
                Command::none()
            }

            Message::DownloadPathPicked(None) => Command::none(),

            Message::OpenDownloadFolder => {
                let folder = PathBuf::from(&self.download_path_input);
                if let Err(e) = open::that(&folder) {
                    warn!("Failed to open {}: {}", folder.display(), e);
                    self.status_message = format!("Could not open folder: {}", e);
                }
                Command::none()
            }

            Message::SaveSettings => {
                let mut updated = self.settings.clone();
                updated.set_download_path(&self.download_path_input);
                updated.set_format(&self.format_input);

                match self.settings_store.save(&updated) {
                    Ok(()) => {
                        self.download_path_input =
                            updated.download_path.to_string_lossy().into_owned();
                        self.format_input = updated.format.clone();
                        self.settings = updated;
                        self.status_message = "Settings saved".to_string();
                        message_dialog(
                            rfd::MessageLevel::Info,
                            "Settings",
                            "Settings saved successfully.".to_string(),
                        )
                    }
                    Err(e) => {
                        error!("Failed to save settings: {}", e);
                        self.status_message = format!("Failed to save settings: {}", e);
                        message_dialog(
                            rfd::MessageLevel::Error,
                            "Settings",
                            format!("Failed to save settings: {}", e),
                        )
                    }
                }
            }

            Message::RefreshHistory => self.load_history(),

            Message::HistoryLoaded(content) => {
                self.history_text = content;
                Command::none()
            }

            Message::DialogClosed => Command::none(),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        use crate::gui::views::{history_view, main_view, settings_view};

        let nav_button = |label: &'static str, view: View| {
            button(text(label).size(15))
                .style(iced::theme::Button::Custom(Box::new(
                    if self.current_view == view {
                        theme::NavButton::Active
                    } else {
                        theme::NavButton::Inactive
                    },
                )))
                .width(Length::Fill)
                .padding(10)
                .on_press_maybe(self.picker.is_none().then_some(Message::SwitchView(view)))
        };

        let sidebar = container(
            column![
                container(
                    text("Tubefetch")
                        .size(22)
                        .style(iced::theme::Text::Color(theme::BRAND))
                )
                .padding([16, 10]),
                Space::with_height(12),
                nav_button("Download", View::Main),
                nav_button("Settings", View::Settings),
                nav_button("History", View::History),
            ]
            .spacing(6)
            .padding(10),
        )
        .width(Length::Fixed(200.0))
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(
            theme::SidebarContainer,
        )));

        // The picker is modal: it replaces the content until answered
        let content: Element<'_, Message> = match (&self.picker, self.current_view) {
            (Some(picker), _) => picker.view(&self.form),
            (None, View::Main) => main_view(
                &self.form,
                self.url_error.as_deref(),
                self.playlist_entries.is_some() || is_playlist_url(&self.form.url),
                self.playlist_entries,
                self.busy,
                self.progress,
                &self.status_message,
            ),
            (None, View::Settings) => {
                settings_view(&self.download_path_input, &self.format_input)
            }
            (None, View::History) => history_view(&self.history_text),
        };

        container(row![
            sidebar,
            container(content)
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(24)
        ])
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(
            theme::CanvasContainer,
        )))
        .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        struct BackendEvents;

        iced::subscription::unfold(
            std::any::TypeId::of::<BackendEvents>(),
            self.events.clone(),
            |events| async move {
                let next = events.lock().await.recv().await;
                match next {
                    Some(event) => (Message::Backend(event), events),
                    // Backend stopped; nothing more will arrive
                    None => std::future::pending().await,
                }
            },
        )
    }

    fn theme(&self) -> Self::Theme {
        Theme::Light
    }
}

impl TubefetchApp {
    fn send(&self, command: BackendCommand) -> Command<Message> {
        let commands = self.commands.clone();
        Command::perform(
            async move { commands.send(command).await.map_err(|e| e.to_string()) },
            Message::CommandSent,
        )
    }

    fn load_history(&self) -> Command<Message> {
        let history = self.history.clone();
        Command::perform(
            async move { history.read_all().await },
            Message::HistoryLoaded,
        )
    }

    fn handle_backend_event(&mut self, event: BackendEvent) -> Command<Message> {
        match event {
            BackendEvent::ProbeStarted => {
                self.status_message = "Fetching available formats...".to_string();
                Command::none()
            }
            BackendEvent::PlaylistDetected { entries } => {
                self.playlist_entries = Some(entries);
                self.status_message = format!("Playlist detected: {} videos", entries);
                Command::none()
            }
            BackendEvent::SelectionRequested(prompt) => {
                // A stale picker would block its workflow forever
                if let Some(previous) = self.picker.take() {
                    previous.cancel();
                }
                self.picker = Some(FormatPicker::new(prompt));
                self.status_message = "Select a format".to_string();
                Command::none()
            }
            BackendEvent::SelectionCancelled => {
                self.busy = false;
                self.status_message = "Download cancelled".to_string();
                Command::none()
            }
            BackendEvent::DownloadStarted => {
                self.progress = 0.0;
                self.status_message = "Downloading...".to_string();
                Command::none()
            }
            BackendEvent::DownloadProgress(percent) => {
                self.progress = percent;
                if self.busy {
                    self.status_message = format!("Downloading... {:.1}%", percent);
                }
                Command::none()
            }
            BackendEvent::DownloadFinished(outcome) => {
                self.busy = false;
                let dialog = match &outcome {
                    DownloadOutcome::Success { playlist } => {
                        let message = if *playlist {
                            "Playlist download completed!"
                        } else {
                            "Download completed!"
                        };
                        self.status_message = message.to_string();
                        message_dialog(rfd::MessageLevel::Info, "Success", message.to_string())
                    }
                    DownloadOutcome::Failed(reason) => {
                        self.status_message = format!("Download failed: {}", reason);
                        message_dialog(
                            rfd::MessageLevel::Error,
                            "Error",
                            format!("Download failed: {}", reason),
                        )
                    }
                };
                Command::batch([dialog, self.load_history()])
            }
            BackendEvent::Error(message) => {
                self.busy = false;
                self.progress = 0.0;
                self.status_message = format!("Error: {}", message);
                message_dialog(rfd::MessageLevel::Error, "Error", message)
            }
        }
    }
}

fn message_dialog(level: rfd::MessageLevel, title: &str, description: String) -> Command<Message> {
    let dialog = rfd::AsyncMessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
        .set_buttons(rfd::MessageButtons::Ok);

    Command::perform(
        async move {
            dialog.show().await;
        },
        |_| Message::DialogClosed,
    )
}

use crate::events::terminal::{action_for, Action, Event, Handler as TerminalEventHandler};
use crate::ui::Screen;
use anyhow::{anyhow, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use roundup_classhelper::{
    cache::{collect_keys, TranslationCache},
    config::Config,
    helpurl::{HelpLink, WidgetMarkup},
    logger::{CaptureLogger, LogBuffer},
    popup::{Focus, PopupDocument, PopupEvent},
    rest::RestClient,
    widget::{is_disabled, Opener, PopupWindow, SessionState, WindowFeatures, WindowHost},
    ClassHelper,
};
use std::collections::HashMap;
use std::io::{self, stdout};
use std::sync::Arc;

/// Number of captured log lines kept on screen.
const LOG_LINES: usize = 50;

/// Command line options describing the wrapped link and its opener form.
///
#[derive(Clone, Debug, Default)]
pub struct Options {
    pub tracker_url: Option<String>,
    pub helpurl: String,
    pub width: String,
    pub height: String,
    pub form: Option<String>,
    pub property: Option<String>,
    pub value: String,
    pub search_with: Option<String>,
    pub title: Option<String>,
    /// Designator of the edited item, e.g. `issue12`.
    pub item: String,
}

impl Options {
    /// Return the url of the simulated opener document.
    ///
    pub fn document_url(&self, tracker_url: &str) -> String {
        format!("{}/{}", tracker_url.trim_end_matches('/'), self.item)
    }

    /// Return the widget markup the options describe.
    ///
    pub fn markup(&self) -> WidgetMarkup {
        let onclick = format!(
            "javascript:help_window('{}', '{}', '{}')",
            self.helpurl, self.width, self.height
        );
        WidgetMarkup {
            links: vec![HelpLink {
                helpurl: Some(self.helpurl.clone()),
                width: Some(self.width.clone()),
                height: Some(self.height.clone()),
                onclick: Some(onclick),
            }],
            search_with: self.search_with.clone(),
            popup_title: self.title.clone(),
        }
    }
}

/// The opener form, reduced to the named fields given on the command line.
///
#[derive(Debug, Default)]
pub struct TerminalOpener {
    document_url: String,
    fields: HashMap<String, String>,
    alerts: Vec<String>,
    followed: Option<String>,
    written: bool,
}

impl TerminalOpener {
    pub fn new(document_url: String, fields: HashMap<String, String>) -> Self {
        TerminalOpener {
            document_url,
            fields,
            ..TerminalOpener::default()
        }
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Return the link action run after the widget gave up, if any.
    ///
    pub fn followed(&self) -> Option<&str> {
        self.followed.as_deref()
    }

    /// True once a selection was written back.
    pub fn written(&self) -> bool {
        self.written
    }
}

impl Opener for TerminalOpener {
    fn document_url(&self) -> String {
        self.document_url.clone()
    }

    fn field_value(&self, _form: Option<&str>, field: &str) -> Option<String> {
        self.fields.get(field).cloned()
    }

    fn set_field_value(&mut self, _form: Option<&str>, field: &str, value: &str) -> bool {
        match self.fields.get_mut(field) {
            Some(current) => {
                info!("Field '{}' changed to '{}'", field, value);
                *current = value.to_string();
                self.written = true;
                true
            }
            None => false,
        }
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn follow_link(&mut self, action: &str) {
        info!("Following original link action");
        self.followed = Some(action.to_string());
    }
}

/// Popup window drawn in the alternate screen.
///
#[derive(Debug, Default)]
pub struct TerminalWindow {
    closed: bool,
    presented: usize,
    alerts: Vec<String>,
}

impl TerminalWindow {
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

impl PopupWindow for TerminalWindow {
    fn is_closed(&self) -> bool {
        self.closed
    }

    fn focus(&mut self) {}

    fn close(&mut self) {
        self.closed = true;
    }

    fn present(&mut self, document: &PopupDocument) {
        self.presented += 1;
        trace!("Presenting '{}' ({})", document.title, self.presented);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

/// Opens windows in the terminal; never refuses.
///
#[derive(Debug, Default)]
pub struct TerminalHost {
    features: Option<WindowFeatures>,
}

impl WindowHost for TerminalHost {
    type Window = TerminalWindow;

    fn open(&mut self, features: &WindowFeatures) -> Option<TerminalWindow> {
        debug!("Opening popup window {}", features);
        self.features = Some(*features);
        Some(TerminalWindow::default())
    }
}

/// Oversees event processing, the widget session and terminal output.
///
pub struct App {
    helper: ClassHelper<TerminalHost>,
    opener: TerminalOpener,
    logs: LogBuffer,
}

impl App {
    /// Start a new application according to the given options and
    /// configuration. Returns the result of the application execution.
    ///
    pub async fn start(options: Options, config: Config) -> Result<()> {
        let logs = CaptureLogger::install(LevelFilter::Debug)
            .map_err(|e| anyhow!("Failed to install logger: {}", e))?;

        info!("Starting application...");
        let tracker_url = config.tracker_url()?.to_string();
        let document_url = options.document_url(&tracker_url);
        let markup = options.markup();

        let mut fields = HashMap::new();
        if let Some(property) = &options.property {
            fields.insert(property.clone(), options.value.clone());
        }
        let opener = TerminalOpener::new(document_url.clone(), fields);

        let client = RestClient::new().with_credentials(config.credentials());
        if is_disabled(&document_url, config.disabled) || !client.probe(&tracker_url).await {
            warn!("Classhelper disabled, using the original link");
            eprintln!("Classhelper is disabled for {}", document_url);
            return Ok(());
        }

        let translations = Arc::new(TranslationCache::new());
        let keys = collect_keys([&markup], &config.translation_keywords);
        if let Err(e) = translations.ensure(&client, &document_url, &keys).await {
            warn!("Continuing without translations: {}", e);
        }

        let helper = ClassHelper::connect(
            markup,
            &document_url,
            client,
            translations,
            config.widget_settings(),
            TerminalHost::default(),
        )?;
        let mut app = App {
            helper,
            opener,
            logs,
        };

        // Dropdown failures leave plain text inputs.
        let _ = app.helper.ensure_dropdowns().await;
        if let Err(e) = app.helper.click(&mut app.opener).await {
            error!("Failed to open classhelper: {}", e);
        }

        if app.helper.state() == SessionState::Open {
            app.start_ui().await?;
        }
        app.report(&options);

        info!("Exiting application...");
        Ok(())
    }

    /// Enter the alternate screen, run the render loop and restore the
    /// terminal whatever the loop returned.
    ///
    async fn start_ui(&mut self) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        let result = self.run(&mut terminal).await;

        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    }

    async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            let screen = self.screen();
            terminal.draw(|frame| crate::ui::render(frame, &screen))?;

            let key = match terminal_event_handler.next()? {
                Event::Input(key) => key,
                Event::Tick => continue,
            };
            let result = match action_for(key, self.in_text_input()) {
                Action::Quit => {
                    debug!("Received application exit request.");
                    break;
                }
                Action::Popup(input) => self.helper.key(input, &mut self.opener).await,
                Action::FocusSearch => {
                    self.helper.set_focus(Focus::SearchInput(0));
                    Ok(())
                }
                Action::SubmitSearch => {
                    let data = self
                        .helper
                        .document()
                        .and_then(PopupDocument::search)
                        .map(|form| form.form_data());
                    match data {
                        Some(data) => self.helper.dispatch(PopupEvent::Search(data), &mut self.opener).await,
                        None => Ok(()),
                    }
                }
                Action::ResetSearch => self.helper.dispatch(PopupEvent::Reset, &mut self.opener).await,
                Action::Ignore => Ok(()),
            };
            if let Err(e) = result {
                debug!("Popup event failed: {}", e);
            }
            if self.helper.state() == SessionState::Closed {
                debug!("Popup closed.");
                break;
            }
        }
        Ok(())
    }

    /// True while a free text search input holds focus.
    ///
    fn in_text_input(&self) -> bool {
        let Some(document) = self.helper.document() else {
            return false;
        };
        match document.focus {
            Focus::SearchInput(index) => document
                .search()
                .and_then(|form| form.input(index))
                .map(|input| !input.is_select())
                .unwrap_or(false),
            _ => false,
        }
    }

    fn screen(&self) -> Screen<'_> {
        let descriptor = self.helper.descriptor();
        let owner_field = descriptor.owner_field.as_ref().map(|field| {
            let value = self
                .opener
                .field_value(descriptor.owner_form.as_deref(), field)
                .unwrap_or_default();
            format!("{} = {}", field, value)
        });
        let mut alerts = self.opener.alerts().to_vec();
        if let Some(window) = self.helper.window() {
            alerts.extend(window.alerts().iter().cloned());
        }
        Screen {
            document: self.helper.document(),
            owner_field,
            alerts,
            log_lines: self.logs.tail(LOG_LINES),
        }
    }

    /// Print the outcome once the terminal is restored: the written field,
    /// alerts, and the original link action when the widget gave up.
    ///
    fn report(&self, options: &Options) {
        for alert in self.opener.alerts() {
            eprintln!("{}", alert);
        }
        if let Some(action) = self.opener.followed() {
            eprintln!("Original link action: {}", action);
        }
        if !self.opener.written() {
            return;
        }
        if let Some(property) = &options.property {
            if let Some(value) = self.opener.field_value(options.form.as_deref(), property) {
                println!("{}={}", property, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Options {
        Options {
            tracker_url: None,
            helpurl: "user?@template=help&property=nosy&form=itemSynopsis".to_string(),
            width: "600".to_string(),
            height: "500".to_string(),
            form: Some("itemSynopsis".to_string()),
            property: Some("nosy".to_string()),
            value: "admin".to_string(),
            search_with: Some("username".to_string()),
            title: None,
            item: "issue12".to_string(),
        }
    }

    #[test]
    fn test_document_url() {
        let options = options();
        assert_eq!(
            options.document_url("http://localhost:8080/demo/"),
            "http://localhost:8080/demo/issue12"
        );
    }

    #[test]
    fn test_markup_carries_link_attributes() {
        let markup = options().markup();
        let link = markup.find_help_link().unwrap();
        assert_eq!(link.width.as_deref(), Some("600"));
        assert!(link.onclick.as_deref().unwrap().starts_with("javascript:help_window("));
        assert_eq!(markup.search_with.as_deref(), Some("username"));
    }

    #[test]
    fn test_opener_only_writes_known_fields() {
        let mut fields = HashMap::new();
        fields.insert("nosy".to_string(), "admin".to_string());
        let mut opener = TerminalOpener::new("http://localhost/demo/issue1".to_string(), fields);
        assert!(opener.set_field_value(None, "nosy", "admin,demo"));
        assert!(!opener.set_field_value(None, "assignedto", "demo"));
        assert!(opener.written());
        assert_eq!(opener.field_value(None, "nosy").as_deref(), Some("admin,demo"));
    }

    #[test]
    fn test_terminal_window_lifecycle() {
        let mut host = TerminalHost::default();
        let mut window = host
            .open(&WindowFeatures {
                width: 600,
                height: 500,
            })
            .unwrap();
        assert!(!window.is_closed());
        window.alert("Invalid value");
        window.close();
        assert!(window.is_closed());
        assert_eq!(window.alerts(), ["Invalid value".to_string()]);
        assert_eq!(host.features.map(|f| f.width), Some(600));
    }
}

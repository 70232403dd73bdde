//! The class helper widget.
//!
//! A [`ClassHelper`] owns one wrapped help link. Clicking it opens a popup
//! window listing records of the target class; events coming back from the
//! popup re-fetch data and swap the affected fragments. Every handler runs
//! to completion before the next event is accepted.

mod host;

pub use host::{Opener, PopupWindow, WindowFeatures, WindowHost};

use crate::cache::{DropdownCache, TranslationCache};
use crate::error::{ClassHelperError, ClassHelperResult};
use crate::helpurl::{HelpLink, HelpUrlDescriptor, SelectionMode, WidgetMarkup};
use crate::popup::{
    resolve_title, AccumulatorPanel, Focus, FormData, Fragment, FragmentId, KeyInput, Pagination,
    PopupDocument, PopupEvent, SearchForm, SelectionAccumulator, Table,
};
use crate::rest::{urls, CollectionData, RestClient};
use crate::search_spec::SearchSpec;
use log::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Document url suffix that makes opening fail.
pub const ABORT_MARKER: &str = "#classhelper-abort";
/// Document url suffix that disables the class helper.
pub const TOGGLE_MARKER: &str = "#classhelper-wc-toggle";

pub const OPEN_FAILURE_ALERT: &str =
    "Error: Failed to open classhelper, check console for more details.";
pub const PAGE_FAILURE_ALERT: &str =
    "Error: Failed to load next page, check console for more details.";

/// Lifecycle of the popup session.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SessionState {
    Closed,
    Opening,
    Open,
}

/// Who handles clicks on the wrapped link.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LinkState {
    /// The widget handles the click and the original action is suspended.
    Intercepted,
    /// The original action runs again.
    Native,
}

/// Page level settings shared by every widget.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetSettings {
    pub stylesheet: String,
    pub alternative_dropdown_paths: HashMap<String, String>,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        let mut alternative_dropdown_paths = HashMap::new();
        alternative_dropdown_paths.insert("roles".to_string(), "/rest/data/user/roles".to_string());
        WidgetSettings {
            stylesheet: "@@file/classhelper.css".to_string(),
            alternative_dropdown_paths,
        }
    }
}

/// Return true when the class helper should not register on a document.
///
pub fn is_disabled(document_url: &str, disabled_by_config: bool) -> bool {
    disabled_by_config || document_url.ends_with(TOGGLE_MARKER)
}

pub struct ClassHelper<H: WindowHost> {
    markup: WidgetMarkup,
    link: HelpLink,
    descriptor: HelpUrlDescriptor,
    base_url: String,
    item_designator: String,
    settings: WidgetSettings,
    client: RestClient,
    translations: Arc<TranslationCache>,
    dropdowns: DropdownCache,
    host: H,
    window: Option<H::Window>,
    document: Option<PopupDocument>,
    state: SessionState,
    link_state: LinkState,
}

impl<H: WindowHost> ClassHelper<H> {
    /// Take over the wrapped link of `markup`.
    ///
    /// Fails when the link or its help url is malformed; the link then
    /// keeps its original action and no popup is ever opened.
    pub fn connect(
        markup: WidgetMarkup,
        document_url: &str,
        client: RestClient,
        translations: Arc<TranslationCache>,
        settings: WidgetSettings,
        host: H,
    ) -> ClassHelperResult<Self> {
        let base_url = urls::tracker_base_url(document_url);
        let connected = markup.find_help_link().and_then(|link| {
            let descriptor = HelpUrlDescriptor::parse(link)?;
            urls::listing_url(&base_url, &descriptor)?;
            Ok((link.clone(), descriptor))
        });
        let (link, descriptor) = match connected {
            Ok(connected) => connected,
            Err(e) => {
                warn!("Classhelper not intercepting helpurl.");
                error!("{}", e);
                return Err(e.into());
            }
        };
        debug!("Classhelper connected for class '{}'", descriptor.target_class);

        Ok(ClassHelper {
            markup,
            link,
            descriptor,
            base_url,
            item_designator: urls::item_designator(document_url),
            settings,
            client,
            translations,
            dropdowns: DropdownCache::new(),
            host,
            window: None,
            document: None,
            state: SessionState::Closed,
            link_state: LinkState::Intercepted,
        })
    }

    /// Fetch the dropdown options of the search form. Failures are logged
    /// and leave the dropdowns as free text inputs.
    ///
    pub async fn ensure_dropdowns(&mut self) -> ClassHelperResult<()> {
        let result = self
            .dropdowns
            .ensure(
                &self.client,
                &self.base_url,
                self.markup.search_with.as_deref(),
                &self.settings.alternative_dropdown_paths,
            )
            .await;
        if let Err(e) = &result {
            error!("Failed to load dropdowns: {}", e);
        }
        result
    }

    /// Handle a click on the wrapped link.
    ///
    pub async fn click<O: Opener>(&mut self, opener: &mut O) -> ClassHelperResult<()> {
        if self.link_state == LinkState::Native {
            opener.follow_link(self.onclick());
            return Ok(());
        }
        if let Some(window) = self.window.as_mut().filter(|w| !w.is_closed()) {
            debug!("Popup already open, focusing it");
            window.focus();
            return Ok(());
        }

        self.state = SessionState::Opening;
        match self.open(opener).await {
            Ok(()) => {
                self.state = SessionState::Open;
                Ok(())
            }
            Err(e) => {
                self.fail(opener, OPEN_FAILURE_ALERT, &e);
                Err(e)
            }
        }
    }

    async fn open<O: Opener>(&mut self, opener: &O) -> ClassHelperResult<()> {
        if opener.document_url().ends_with(ABORT_MARKER) {
            return Err(ClassHelperError::Aborted(ABORT_MARKER));
        }

        let url = urls::listing_url(&self.base_url, &self.descriptor)?;
        debug!("Fetching {}", url);
        let envelope = self.client.collection(url.as_str()).await?;

        let selection = self.descriptor.owner_field.as_deref().map(|field| {
            let value = opener
                .field_value(self.descriptor.owner_form.as_deref(), field)
                .unwrap_or_default();
            SelectionAccumulator::seed(&value, self.descriptor.selection_mode == SelectionMode::Radio)
        });

        let features = WindowFeatures {
            width: self.descriptor.popup_width,
            height: self.descriptor.popup_height,
        };
        let mut window = self
            .host
            .open(&features)
            .ok_or(ClassHelperError::PopupBlocked)?;

        let document = self.build_document(&envelope.data, selection);
        window.present(&document);
        self.window = Some(window);
        self.document = Some(document);
        info!("Opened classhelper for '{}'", self.descriptor.target_class);
        Ok(())
    }

    fn build_document(&self, data: &CollectionData, selection: Option<SelectionAccumulator>) -> PopupDocument {
        let title = resolve_title(
            self.markup.popup_title.as_deref(),
            &self.descriptor,
            &self.item_designator,
            &self.translations,
        );
        let stylesheet = urls::stylesheet_url(&self.base_url, &self.settings.stylesheet);
        let mut document = PopupDocument::new(title, stylesheet, self.descriptor.selection_mode);

        if let Some(form) = self.search_form(None) {
            document.push(Fragment::Search(form));
            document.focus = Focus::SearchInput(0);
        }
        document.push(Fragment::Pagination(Pagination::new(
            data.links.prev_uri().map(str::to_string),
            data.links.next_uri().map(str::to_string),
            self.descriptor.page_index,
            self.descriptor.page_size,
            data.collection.len(),
            &self.translations,
        )));
        document.push(Fragment::Table(Table::build(
            self.descriptor.fields(),
            &data.collection,
            selection.as_ref(),
            self.descriptor.selection_mode != SelectionMode::None,
            &self.translations,
        )));
        if let Some(selection) = selection {
            document.push(Fragment::Accumulator(AccumulatorPanel::new(
                selection,
                &self.translations,
            )));
        }
        document
    }

    fn search_form(&self, previous: Option<&FormData>) -> Option<SearchForm> {
        let spec = SearchSpec::parse(self.markup.search_with.as_deref()?);
        if spec.is_empty() {
            return None;
        }
        Some(SearchForm::build(&spec, &self.dropdowns, &self.translations, previous))
    }

    /// Handle a message from the popup window.
    ///
    pub async fn dispatch<O: Opener>(&mut self, event: PopupEvent, opener: &mut O) -> ClassHelperResult<()> {
        if !self.is_live() {
            debug!("Ignoring {:?}, popup is closed", event);
            return Ok(());
        }
        match event {
            PopupEvent::Search(data) => self.submit_search(data, opener).await,
            PopupEvent::Reset => self.reset(opener).await,
            PopupEvent::PrevPage(url) | PopupEvent::NextPage(url) => self.change_page(&url, opener).await,
            PopupEvent::Selection(id) => {
                if let Some(document) = self.document.as_mut() {
                    document.toggle_selection(&id);
                }
                self.present();
                Ok(())
            }
            PopupEvent::Apply(value) => {
                self.apply(&value, opener);
                Ok(())
            }
            PopupEvent::Cancel => {
                self.close();
                Ok(())
            }
        }
    }

    /// Apply a key press inside the popup.
    ///
    pub async fn key<O: Opener>(&mut self, input: KeyInput, opener: &mut O) -> ClassHelperResult<()> {
        let Some(document) = self.document.as_mut() else {
            return Ok(());
        };
        let event = crate::popup::handle_key(document, input);
        self.present();
        match event {
            Some(event) => self.dispatch(event, opener).await,
            None => Ok(()),
        }
    }

    /// Move the popup focus to a control.
    ///
    pub fn set_focus(&mut self, focus: Focus) {
        if let Some(document) = self.document.as_mut() {
            document.focus = focus;
            document.normalize_focus();
        }
        self.present();
    }

    /// Search from the first page with the given form entries.
    ///
    pub async fn submit_search<O: Opener>(&mut self, data: FormData, opener: &mut O) -> ClassHelperResult<()> {
        let blocked = self
            .document
            .as_ref()
            .and_then(PopupDocument::search)
            .map(|form| form.blocked_by(&data))
            .unwrap_or(false);
        if blocked {
            debug!("Search suppressed, value is still invalid");
            return Ok(());
        }

        let result = self.search(data).await;
        match result {
            Err(e) if !e.is_recoverable() => {
                self.fail(opener, PAGE_FAILURE_ALERT, &e);
                Err(e)
            }
            other => other,
        }
    }

    async fn search(&mut self, data: FormData) -> ClassHelperResult<()> {
        let url = urls::search_url(&self.base_url, &self.descriptor.first_page(), &data)?;
        debug!("Searching {}", url);
        match self.client.search(url.as_str()).await {
            Ok(envelope) => {
                if let Some(form) = self.document.as_mut().and_then(PopupDocument::search_mut) {
                    form.clear_errors();
                }
                self.render_page(&envelope.data, url.as_str());
                Ok(())
            }
            Err(ClassHelperError::Validation { value, field }) => {
                let annotated = self
                    .document
                    .as_mut()
                    .and_then(PopupDocument::search_mut)
                    .map(|form| form.annotate(&field, &value))
                    .unwrap_or(false);
                if !annotated {
                    warn!("Ignoring invalid value '{}' for unknown search field '{}' ({})", value, field, url);
                }
                self.present();
                Ok(())
            }
            Err(ClassHelperError::Permission { message }) => {
                if let Some(window) = self.window.as_mut().filter(|w| !w.is_closed()) {
                    window.alert(&message);
                }
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Clear the search form and search again.
    ///
    pub async fn reset<O: Opener>(&mut self, opener: &mut O) -> ClassHelperResult<()> {
        let data = match self.document.as_mut().and_then(PopupDocument::search_mut) {
            Some(form) => {
                form.reset();
                form.form_data()
            }
            None => FormData::new(),
        };
        self.submit_search(data, opener).await
    }

    async fn change_page<O: Opener>(&mut self, url: &str, opener: &mut O) -> ClassHelperResult<()> {
        debug!("Fetching page {}", url);
        match self.client.collection(url).await {
            Ok(envelope) => {
                self.render_page(&envelope.data, url);
                Ok(())
            }
            Err(e) => {
                let e = ClassHelperError::from(e);
                self.fail(opener, PAGE_FAILURE_ALERT, &e);
                Err(e)
            }
        }
    }

    /// Swap pagination and table for a fetched page.
    fn render_page(&mut self, data: &CollectionData, requested_url: &str) {
        if !self.is_live() {
            debug!("Discarding page for closed popup: {}", requested_url);
            return;
        }
        let page_index = data
            .links
            .self_uri()
            .and_then(urls::page_index_of)
            .or_else(|| urls::page_index_of(requested_url))
            .unwrap_or(self.descriptor.page_index);

        let Some(document) = self.document.as_mut() else {
            return;
        };
        let selection = document.accumulator().map(|panel| panel.selection.clone());
        let pagination = Pagination::new(
            data.links.prev_uri().map(str::to_string),
            data.links.next_uri().map(str::to_string),
            page_index,
            self.descriptor.page_size,
            data.collection.len(),
            &self.translations,
        );
        let table = Table::build(
            self.descriptor.fields(),
            &data.collection,
            selection.as_ref(),
            self.descriptor.selection_mode != SelectionMode::None,
            &self.translations,
        );
        document.replace(Fragment::Pagination(pagination));
        document.replace(Fragment::Table(table));
        self.present();
    }

    fn apply<O: Opener>(&mut self, value: &str, opener: &mut O) {
        let Some(field) = self.descriptor.owner_field.as_deref() else {
            return;
        };
        if !opener.set_field_value(self.descriptor.owner_form.as_deref(), field, value) {
            warn!("Owner field '{}' not found in opener form", field);
        }
        info!("Selected '{}' for '{}'", value, field);
        self.close();
    }

    /// Replace the search field spec. A change from a previous non-empty
    /// value re-fetches dropdowns and rebuilds the search form of an open
    /// popup.
    ///
    pub async fn set_search_with(&mut self, value: Option<String>) {
        let old = self.markup.search_with.clone();
        self.markup.search_with = value.clone();
        if old.as_deref().map(str::is_empty).unwrap_or(true) || old == value {
            return;
        }
        let _ = self.ensure_dropdowns().await;

        if !self.is_live() {
            return;
        }
        let form = self.search_form(None);
        if let Some(document) = self.document.as_mut() {
            match form {
                Some(form) => document.replace_search(form),
                None => document.remove(FragmentId::Search),
            }
        }
        self.present();
    }

    fn close(&mut self) {
        if let Some(window) = self.window.as_mut() {
            window.close();
        }
        self.document = None;
        self.state = SessionState::Closed;
    }

    /// End the session after an unrecoverable error and hand the link back
    /// to its original action.
    fn fail<O: Opener>(&mut self, opener: &mut O, alert: &str, error: &ClassHelperError) {
        warn!("Classhelper not intercepting helpurl.");
        match error.url() {
            Some(url) => error!("{} (url: {})", error, url),
            None => error!("{}", error),
        }
        self.close();
        self.link_state = LinkState::Native;
        opener.alert(alert);
        opener.follow_link(self.onclick());
    }

    fn present(&mut self) {
        if let (Some(window), Some(document)) = (self.window.as_mut(), self.document.as_ref()) {
            if !window.is_closed() {
                window.present(document);
            }
        }
    }

    /// Return true while the popup window is open. A window closed by the
    /// user ends the session.
    fn is_live(&mut self) -> bool {
        let live = self.state == SessionState::Open
            && self.window.as_ref().map(|w| !w.is_closed()).unwrap_or(false);
        if !live && self.state == SessionState::Open {
            self.document = None;
            self.state = SessionState::Closed;
        }
        live
    }

    fn onclick(&self) -> &str {
        self.link.onclick.as_deref().unwrap_or_default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn link_state(&self) -> LinkState {
        self.link_state
    }

    pub fn descriptor(&self) -> &HelpUrlDescriptor {
        &self.descriptor
    }

    pub fn document(&self) -> Option<&PopupDocument> {
        self.document.as_ref()
    }

    pub fn window(&self) -> Option<&H::Window> {
        self.window.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn search_with(&self) -> Option<&str> {
        self.markup.search_with.as_deref()
    }
}

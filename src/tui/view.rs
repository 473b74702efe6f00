//! Panel view state: credential field, load settings, buttons, model cards, banners.
//!
//! The view owns every interactive widget and never talks to the network. Requests
//! leave it only through handlers registered by the orchestrator.

use std::time::Instant;

use chrono::{DateTime, Local};
use ratatui::widgets::ListState;

use crate::core::credential::CredentialStore;
use crate::core::endpoint::{CONTEXT_SIZES, CacheMode, ModelDescriptor};
use crate::core::notice::{Notice, Severity};

use super::constants::BANNER_TTL;

/// Focusable widgets, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Credential,
    ContextSize,
    CacheMode,
    ListButton,
    UnloadButton,
    Models,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::Credential,
        Focus::ContextSize,
        Focus::CacheMode,
        Focus::ListButton,
        Focus::UnloadButton,
        Focus::Models,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// A notification as displayed: stacked at the top of the results area.
pub struct Banner {
    pub notice: Notice,
    pub shown_at: Instant,
    /// Wall-clock time shown next to the message.
    pub shown_at_local: DateTime<Local>,
}

impl Banner {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= BANNER_TTL
    }
}

type RequestHandler = Box<dyn FnMut()>;
type LoadHandler = Box<dyn FnMut(&str)>;

pub struct PanelView {
    credential_input: String,
    store: Box<dyn CredentialStore>,
    context_index: usize,
    cache_mode_index: usize,
    pub(crate) focus: Focus,
    models: Vec<ModelDescriptor>,
    selected_model: usize,
    pub(crate) model_list_state: ListState,
    banners: Vec<Banner>,
    list_handler: Option<RequestHandler>,
    unload_handler: Option<RequestHandler>,
    load_handler: Option<LoadHandler>,
    /// Esc was pressed; next key = Option+key (Mac terminals with "Use option as meta").
    pub(crate) escape_pending: bool,
    /// True while any workflow is in flight (header spinner).
    busy: bool,
}

impl PanelView {
    pub fn new(store: Box<dyn CredentialStore>) -> Self {
        Self {
            credential_input: String::new(),
            store,
            context_index: 0,
            cache_mode_index: 0,
            focus: Focus::Credential,
            models: vec![],
            selected_model: 0,
            model_list_state: ListState::default(),
            banners: vec![],
            list_handler: None,
            unload_handler: None,
            load_handler: None,
            escape_pending: false,
            busy: false,
        }
    }

    pub fn credential(&self) -> &str {
        &self.credential_input
    }

    /// Selected maximum sequence length; `None` when "unspecified" is selected.
    pub fn max_seq_len(&self) -> Option<u32> {
        CONTEXT_SIZES.get(self.context_index).copied().flatten()
    }

    pub fn cache_mode(&self) -> CacheMode {
        CacheMode::ALL
            .get(self.cache_mode_index)
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn push_credential_char(&mut self, c: char) {
        self.credential_input.push(c);
        self.persist_credential();
    }

    pub(crate) fn pop_credential_char(&mut self) {
        if self.credential_input.pop().is_some() {
            self.persist_credential();
        }
    }

    pub(crate) fn clear_credential(&mut self) {
        if !self.credential_input.is_empty() {
            self.credential_input.clear();
            self.persist_credential();
        }
    }

    /// Every edit is written through immediately.
    fn persist_credential(&self) {
        if let Err(e) = self.store.store(&self.credential_input) {
            log::warn!("Failed to persist API key: {}", e);
        }
    }

    /// Restore a previously stored credential into the field. Returns it when present.
    pub fn load_stored_credential(&mut self) -> Option<String> {
        let stored = self.store.load()?;
        self.credential_input = stored.clone();
        Some(stored)
    }

    pub(crate) fn cycle_context_size(&mut self, forward: bool) {
        self.context_index = cycle(self.context_index, CONTEXT_SIZES.len(), forward);
    }

    pub(crate) fn cycle_cache_mode(&mut self, forward: bool) {
        self.cache_mode_index = cycle(self.cache_mode_index, CacheMode::ALL.len(), forward);
    }

    pub(crate) fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub(crate) fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Register the List button handler. Replaces any earlier handler.
    pub fn on_list_requested(&mut self, handler: impl FnMut() + 'static) {
        self.list_handler = Some(Box::new(handler));
    }

    /// Register the Unload button handler. Replaces any earlier handler.
    pub fn on_unload_requested(&mut self, handler: impl FnMut() + 'static) {
        self.unload_handler = Some(Box::new(handler));
    }

    pub(crate) fn emit_list_requested(&mut self) {
        if let Some(handler) = self.list_handler.as_mut() {
            handler();
        }
    }

    pub(crate) fn emit_unload_requested(&mut self) {
        if let Some(handler) = self.unload_handler.as_mut() {
            handler();
        }
    }

    /// Replace every card with one per model, in order. Activating a card calls
    /// `on_load_requested` with that model's id.
    pub fn display_models(
        &mut self,
        models: Vec<ModelDescriptor>,
        on_load_requested: impl FnMut(&str) + 'static,
    ) {
        self.models = models;
        self.selected_model = 0;
        self.model_list_state = ListState::default();
        self.load_handler = Some(Box::new(on_load_requested));
    }

    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    pub(crate) fn selected_model(&self) -> usize {
        self.selected_model
    }

    pub(crate) fn select_next_model(&mut self) {
        if !self.models.is_empty() {
            self.selected_model = (self.selected_model + 1).min(self.models.len() - 1);
        }
    }

    pub(crate) fn select_prev_model(&mut self) {
        self.selected_model = self.selected_model.saturating_sub(1);
    }

    /// "Load" on the selected card.
    pub(crate) fn activate_selected_model(&mut self) {
        let Some(model) = self.models.get(self.selected_model) else {
            return;
        };
        let id = model.id.clone();
        if let Some(handler) = self.load_handler.as_mut() {
            handler(&id);
        }
    }

    /// Show a banner at the top of the results area. Banners stack, newest first.
    pub fn show_notification(&mut self, message: impl Into<String>, severity: Severity) {
        let notice = Notice {
            message: message.into(),
            severity,
        };
        log::info!("[{}] {}", notice.severity.label(), notice.message);
        self.banners.insert(
            0,
            Banner {
                notice,
                shown_at: Instant::now(),
                shown_at_local: Local::now(),
            },
        );
    }

    pub fn show_notice(&mut self, notice: Notice) {
        self.show_notification(notice.message, notice.severity);
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    /// Dismiss the newest banner before its timeout.
    pub(crate) fn dismiss_latest_banner(&mut self) {
        if !self.banners.is_empty() {
            self.banners.remove(0);
        }
    }

    pub(crate) fn expire_banners(&mut self, now: Instant) {
        self.banners.retain(|b| !b.is_expired(now));
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.busy
    }
}

fn cycle(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::credential::MemoryCredentialStore;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn view_with(store: &MemoryCredentialStore) -> PanelView {
        PanelView::new(Box::new(store.clone()))
    }

    fn models(ids: &[&str]) -> Vec<ModelDescriptor> {
        ids.iter()
            .map(|id| ModelDescriptor { id: id.to_string() })
            .collect()
    }

    #[test]
    fn every_keystroke_is_persisted() {
        let store = MemoryCredentialStore::default();
        let mut view = view_with(&store);

        for c in "sk-1".chars() {
            view.push_credential_char(c);
        }
        assert_eq!(store.writes(), 4);
        assert_eq!(store.raw().as_deref(), Some("sk-1"));

        view.pop_credential_char();
        assert_eq!(store.raw().as_deref(), Some("sk-"));
        view.clear_credential();
        assert_eq!(store.raw().as_deref(), Some(""));
        assert_eq!(store.writes(), 6);
    }

    #[test]
    fn stored_credential_fills_the_field() {
        let store = MemoryCredentialStore::with_value("sk-test");
        let mut view = view_with(&store);

        assert_eq!(view.load_stored_credential().as_deref(), Some("sk-test"));
        assert_eq!(view.credential(), "sk-test");
    }

    #[test]
    fn no_stored_credential_leaves_field_empty() {
        let store = MemoryCredentialStore::with_value("");
        let mut view = view_with(&store);

        assert_eq!(view.load_stored_credential(), None);
        assert_eq!(view.credential(), "");
    }

    #[test]
    fn settings_default_to_unspecified_and_q4() {
        let view = view_with(&MemoryCredentialStore::default());
        assert_eq!(view.max_seq_len(), None);
        assert_eq!(view.cache_mode(), CacheMode::Q4);
    }

    #[test]
    fn settings_cycle_both_ways() {
        let mut view = view_with(&MemoryCredentialStore::default());
        view.cycle_context_size(true);
        assert_eq!(view.max_seq_len(), Some(2048));
        view.cycle_context_size(false);
        view.cycle_context_size(false);
        assert_eq!(view.max_seq_len(), Some(32768));

        view.cycle_cache_mode(false);
        assert_eq!(view.cache_mode(), CacheMode::Q8);
        view.cycle_cache_mode(true);
        assert_eq!(view.cache_mode(), CacheMode::Q4);
    }

    #[test]
    fn focus_wraps_around() {
        assert_eq!(Focus::Models.next(), Focus::Credential);
        assert_eq!(Focus::Credential.prev(), Focus::Models);
        assert_eq!(Focus::ContextSize.next(), Focus::CacheMode);
    }

    #[test]
    fn emit_invokes_registered_handler_only() {
        let mut view = view_with(&MemoryCredentialStore::default());
        view.emit_list_requested();

        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        view.on_list_requested(move || *c.borrow_mut() += 1);
        view.emit_list_requested();
        view.emit_list_requested();
        view.emit_unload_requested();
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn later_registration_replaces_handler() {
        let mut view = view_with(&MemoryCredentialStore::default());
        let calls = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&calls);
        view.on_unload_requested(move || first.borrow_mut().push("first"));
        let second = Rc::clone(&calls);
        view.on_unload_requested(move || second.borrow_mut().push("second"));

        view.emit_unload_requested();
        assert_eq!(*calls.borrow(), vec!["second"]);
    }

    #[test]
    fn display_models_replaces_cards_in_order() {
        let mut view = view_with(&MemoryCredentialStore::default());
        view.display_models(models(&["a", "b", "c"]), |_| {});
        view.select_next_model();
        view.display_models(models(&["llama-7b", "mistral-7b"]), |_| {});

        let ids: Vec<&str> = view.models().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["llama-7b", "mistral-7b"]);
        assert_eq!(view.selected_model(), 0);
    }

    #[test]
    fn each_card_loads_its_own_id() {
        let mut view = view_with(&MemoryCredentialStore::default());
        let requested = Rc::new(RefCell::new(Vec::new()));
        let r = Rc::clone(&requested);
        view.display_models(models(&["llama-7b", "mistral-7b"]), move |id| {
            r.borrow_mut().push(id.to_string())
        });

        view.activate_selected_model();
        view.select_next_model();
        view.select_next_model();
        view.activate_selected_model();

        assert_eq!(*requested.borrow(), vec!["llama-7b", "mistral-7b"]);
    }

    #[test]
    fn activate_without_cards_is_noop() {
        let mut view = view_with(&MemoryCredentialStore::default());
        view.activate_selected_model();
        view.select_next_model();
        assert_eq!(view.selected_model(), 0);
    }

    #[test]
    fn banners_stack_newest_first() {
        let mut view = view_with(&MemoryCredentialStore::default());
        view.show_notification("first", Severity::Success);
        view.show_notification("second", Severity::Danger);

        let messages: Vec<&str> = view
            .banners()
            .iter()
            .map(|b| b.notice.message.as_str())
            .collect();
        assert_eq!(messages, vec!["second", "first"]);
    }

    #[test]
    fn banners_expire_after_timeout() {
        let mut view = view_with(&MemoryCredentialStore::default());
        view.show_notification("hello", Severity::Warning);
        let shown = view.banners()[0].shown_at;

        view.expire_banners(shown + Duration::from_secs(4));
        assert_eq!(view.banners().len(), 1);
        view.expire_banners(shown + BANNER_TTL);
        assert!(view.banners().is_empty());
    }

    #[test]
    fn dismiss_removes_newest() {
        let mut view = view_with(&MemoryCredentialStore::default());
        view.show_notification("old", Severity::Success);
        view.show_notification("new", Severity::Success);
        view.dismiss_latest_banner();

        assert_eq!(view.banners().len(), 1);
        assert_eq!(view.banners()[0].notice.message, "old");
        view.dismiss_latest_banner();
        view.dismiss_latest_banner();
        assert!(view.banners().is_empty());
    }
}

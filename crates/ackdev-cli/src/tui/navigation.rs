//! Navigation controller
//!
//! Owns the active screen and applies intents to it. Every transition is an
//! entry of the `(screen, intent)` match in [`Navigator::apply`]; a pair
//! without an entry is a programming error and ends the session.

use std::mem;

use ackdev_types::{CrdCatalog, FieldFlag, FieldSet, GeneratorConfig};
use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    widgets::{Block, Borders},
};
use tracing::{debug, warn};

use super::breadcrumbs::Breadcrumbs;
use super::error::{NavigationError, Result};
use super::intent::{Flow, Intent, Message, SessionOutcome, defer};
use super::keymap::{Action, Hint, Keymap};
use super::layout::{Dimensions, FRAME_MARGIN, LayoutContext};
use super::views::{
    ConfirmDialogView, FieldListView, FooterView, HEADER_HEIGHT, HeaderView, ReferenceEditorView,
    ResourceDetailView, Response, Screen, ScreenKind, SummaryView, View, ViewCache,
    field_set_title, footer_height,
};

const DISCARD_CRUMB: &str = "Discard changes";

pub struct Navigator {
    service: String,
    model_name: String,
    catalog: CrdCatalog,
    keymap: Keymap,
    summary: SummaryView,
    screen: Screen,
    cache: ViewCache,
    breadcrumbs: Breadcrumbs,
    window: Dimensions,
    layout: LayoutContext,
    notice: Option<String>,
}

impl Navigator {
    pub fn new(service: &str, catalog: CrdCatalog, keymap: Keymap, doc: &GeneratorConfig) -> Self {
        let summary = SummaryView::new(service, &catalog, doc);
        let model_name = if doc.model_name.is_empty() {
            service
        } else {
            doc.model_name.as_str()
        };
        let mut navigator = Self {
            service: service.to_string(),
            model_name: model_name.to_string(),
            catalog,
            keymap,
            summary,
            screen: Screen::Summary,
            cache: ViewCache::default(),
            breadcrumbs: Breadcrumbs::new(),
            window: Dimensions::default(),
            layout: LayoutContext::default(),
            notice: None,
        };
        navigator.relayout();
        navigator
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_kind(&self) -> ScreenKind {
        self.screen.kind()
    }

    pub fn breadcrumbs(&self) -> &Breadcrumbs {
        &self.breadcrumbs
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn layout(&self) -> &LayoutContext {
        &self.layout
    }

    pub fn summary(&self) -> &SummaryView {
        &self.summary
    }

    /// Dispatch one message. The layout is recomputed afterwards because
    /// both the active view and the notice decide the footer height.
    pub fn update(&mut self, message: Message, doc: &mut GeneratorConfig) -> Result<Flow> {
        let flow = match message {
            Message::Interrupt => Flow::Exit(SessionOutcome::Interrupted),
            Message::Resize { width, height } => {
                self.window = Dimensions::new(width, height);
                Flow::idle()
            }
            Message::Key(key) => self.on_key(key, doc)?,
            Message::Intent(intent) => self.apply(intent, doc)?,
        };
        self.relayout();
        Ok(flow)
    }

    fn on_key(&mut self, key: KeyEvent, doc: &mut GeneratorConfig) -> Result<Flow> {
        if key.kind != KeyEventKind::Press {
            return Ok(Flow::idle());
        }
        if self.keymap.is(Action::Interrupt, &key) {
            return Ok(Flow::Exit(SessionOutcome::Interrupted));
        }
        self.notice = None;
        debug!("key {:?} on {}", key.code, self.screen.kind().name());

        let keymap = &self.keymap;
        let response = match &mut self.screen {
            Screen::Summary => self.summary.handle_key(&key, keymap),
            Screen::ResourceDetail(view) => view.handle_key(&key, keymap),
            Screen::FieldList(view) => view.handle_key(&key, keymap),
            Screen::ReferenceEditor(view) => {
                let references = doc
                    .upsert_resource(view.kind())
                    .field_mut(view.field())
                    .references_mut();
                view.handle_key(&key, keymap, references)
            }
            Screen::ConfirmDialog(view) => view.handle_key(&key, keymap),
        };

        match response {
            Response::Ignored | Response::Handled => Ok(Flow::idle()),
            Response::Intent(intent) => self.apply(intent, doc),
            Response::Defer(deferred) => Ok(Flow::Continue(vec![deferred])),
        }
    }

    fn apply(&mut self, intent: Intent, doc: &mut GeneratorConfig) -> Result<Flow> {
        let from = self.screen.kind();
        debug!("{} <- {}", from.name(), intent);

        match (from, intent) {
            (_, Intent::Quit) => return Ok(Flow::Exit(SessionOutcome::Completed)),

            (ScreenKind::Summary, Intent::SelectResource(kind)) => self.select_resource(&kind, doc),
            (ScreenKind::Summary, Intent::ToggleIgnore(kind)) => {
                if self.catalog.find(&kind).is_some() {
                    doc.toggle_ignore(&kind);
                    self.summary.sync(&self.catalog, doc);
                } else {
                    self.resource_not_found(&kind);
                }
            }
            (ScreenKind::Summary, Intent::RequestDiscard) => {
                self.breadcrumbs.push(DISCARD_CRUMB);
                self.enter(Screen::ConfirmDialog(ConfirmDialogView::new()));
            }

            (
                ScreenKind::ResourceDetail | ScreenKind::ConfirmDialog,
                Intent::ButtonSelected(id),
            ) => {
                let mapped = match &self.screen {
                    Screen::ResourceDetail(view) => view.intent_for(id),
                    Screen::ConfirmDialog(view) => view.intent_for(id),
                    _ => None,
                };
                return match mapped {
                    Some(next) => Ok(Flow::Continue(vec![defer(next)])),
                    None => Err(invalid_transition(from, Intent::ButtonSelected(id))),
                };
            }
            (ScreenKind::ResourceDetail, Intent::OpenSpecFields) => {
                self.open_fields(FieldSet::Spec, doc)
            }
            (ScreenKind::ResourceDetail, Intent::OpenStatusFields) => {
                self.open_fields(FieldSet::Status, doc)
            }
            (ScreenKind::ResourceDetail, Intent::Return)
            | (ScreenKind::ConfirmDialog, Intent::Return) => {
                self.breadcrumbs.pop();
                self.summary.sync(&self.catalog, doc);
                self.enter(Screen::Summary);
            }

            (
                ScreenKind::FieldList(set),
                Intent::ToggleFieldFlag { field, flag },
            ) => {
                self.toggle_field_flag(set, &field, flag, doc)
            }
            (ScreenKind::FieldList(set), Intent::OpenReference(field)) => {
                self.open_reference(set, &field, doc)
            }
            (ScreenKind::FieldList(_), Intent::Return) => {
                let kind = self.scope_kind().unwrap_or_default();
                let Some(view) = self
                    .cache
                    .take_detail(&kind)
                    .or_else(|| self.catalog.find(&kind).map(ResourceDetailView::new))
                else {
                    return Err(invalid_transition(from, Intent::Return));
                };
                self.breadcrumbs.pop();
                self.enter(Screen::ResourceDetail(view));
            }

            (ScreenKind::ReferenceEditor, Intent::Return) => self.close_reference(doc),

            (ScreenKind::ConfirmDialog, Intent::Discard) => {
                return Ok(Flow::Exit(SessionOutcome::Aborted));
            }

            (from, intent) => return Err(invalid_transition(from, intent)),
        }

        Ok(Flow::idle())
    }

    fn select_resource(&mut self, kind: &str, doc: &mut GeneratorConfig) {
        let Some(crd) = self.catalog.find(kind) else {
            self.resource_not_found(kind);
            return;
        };
        doc.upsert_resource(kind);
        let view = self
            .cache
            .take_detail(kind)
            .unwrap_or_else(|| ResourceDetailView::new(crd));
        self.breadcrumbs.push(kind);
        self.enter(Screen::ResourceDetail(view));
    }

    fn open_fields(&mut self, set: FieldSet, doc: &GeneratorConfig) {
        let kind = self.scope_kind().unwrap_or_default();
        let Some(crd) = self.catalog.find(&kind) else {
            self.resource_not_found(&kind);
            return;
        };
        let mut view = self
            .cache
            .take_field_list(&kind, set)
            .unwrap_or_else(|| FieldListView::new(crd, set));
        view.sync(crd, doc.resource(&kind));
        self.breadcrumbs.push(field_set_title(set));
        self.enter(Screen::FieldList(view));
    }

    fn toggle_field_flag(
        &mut self,
        set: FieldSet,
        field: &str,
        flag: FieldFlag,
        doc: &mut GeneratorConfig,
    ) {
        let kind = self.scope_kind().unwrap_or_default();
        let Some(crd) = self.catalog.find(&kind) else {
            self.resource_not_found(&kind);
            return;
        };
        if crd.field(set, field).is_none() {
            self.field_not_found(&kind, field);
            return;
        }

        doc.upsert_resource(&kind).field_mut(field).toggle(flag);
        if let Screen::FieldList(view) = &mut self.screen {
            view.sync(crd, doc.resource(&kind));
        }
    }

    fn open_reference(&mut self, set: FieldSet, field: &str, doc: &mut GeneratorConfig) {
        let kind = self.scope_kind().unwrap_or_default();
        let known = self
            .catalog
            .find(&kind)
            .is_some_and(|crd| crd.field(set, field).is_some());
        if !known {
            self.field_not_found(&kind, field);
            return;
        }

        let references = doc
            .upsert_resource(&kind)
            .field_mut(field)
            .references_mut();
        let view = ReferenceEditorView::new(&kind, set, field, &self.service, references);
        self.breadcrumbs.push(field);
        self.enter(Screen::ReferenceEditor(view));
    }

    fn close_reference(&mut self, doc: &mut GeneratorConfig) {
        let Screen::ReferenceEditor(editor) = &self.screen else {
            return;
        };
        let kind = editor.kind().to_string();
        let set = editor.set();
        editor.commit(
            doc.upsert_resource(&kind)
                .field_mut(editor.field())
                .references_mut(),
        );

        self.breadcrumbs.pop();
        let mut view = self.cache.take_field_list(&kind, set);
        if let Some(crd) = self.catalog.find(&kind) {
            let view = view.get_or_insert_with(|| FieldListView::new(crd, set));
            view.sync(crd, doc.resource(&kind));
        }
        match view {
            Some(view) => self.enter(Screen::FieldList(view)),
            None => {
                self.resource_not_found(&kind);
                self.breadcrumbs = Breadcrumbs::new();
                self.summary.sync(&self.catalog, doc);
                self.enter(Screen::Summary);
            }
        }
    }

    /// Resource kind the active screen is scoped to
    fn scope_kind(&self) -> Option<String> {
        match &self.screen {
            Screen::ResourceDetail(view) => Some(view.kind().to_string()),
            Screen::FieldList(view) => Some(view.kind().to_string()),
            Screen::ReferenceEditor(view) => Some(view.kind().to_string()),
            Screen::Summary | Screen::ConfirmDialog(_) => None,
        }
    }

    fn resource_not_found(&mut self, kind: &str) {
        warn!("Resource kind '{}' not found in {}", kind, self.service);
        self.notice = Some(format!("resource {} not found", kind));
    }

    fn field_not_found(&mut self, kind: &str, field: &str) {
        warn!("Field '{}' not found on {}", field, kind);
        self.notice = Some(format!("field {} not found on {}", field, kind));
    }

    /// Make `next` the active screen, caching the one it replaces.
    fn enter(&mut self, next: Screen) {
        let previous = mem::replace(&mut self.screen, next);
        debug!(
            "screen {} -> {}",
            previous.kind().name(),
            self.screen.kind().name()
        );
        self.cache.store(previous);
    }

    fn active_view(&self) -> &dyn View {
        match &self.screen {
            Screen::Summary => &self.summary,
            Screen::ResourceDetail(view) => view,
            Screen::FieldList(view) => view,
            Screen::ReferenceEditor(view) => view,
            Screen::ConfirmDialog(view) => view,
        }
    }

    fn active_view_mut(&mut self) -> &mut dyn View {
        match &mut self.screen {
            Screen::Summary => &mut self.summary,
            Screen::ResourceDetail(view) => view,
            Screen::FieldList(view) => view,
            Screen::ReferenceEditor(view) => view,
            Screen::ConfirmDialog(view) => view,
        }
    }

    pub fn hints(&self) -> Vec<Hint> {
        let mut hints = self.active_view().hints(&self.keymap);
        hints.push(self.keymap.hint(&[Action::Interrupt], "abort"));
        hints
    }

    fn relayout(&mut self) {
        let footer = footer_height(
            &self.hints(),
            self.notice.is_some(),
            self.window.width.saturating_sub(FRAME_MARGIN),
        );
        let layout = LayoutContext::compute(self.window, HEADER_HEIGHT, footer);
        self.layout = layout;
        self.active_view_mut().on_layout(&layout);
    }

    /// Draw header, the active view inside its bordered container, and the
    /// footer. Regions are clipped to the frame.
    pub fn render(&self, f: &mut Frame) {
        let frame_area = f.area();

        let header_area = self.layout.header_area().intersection(frame_area);
        let header = HeaderView::new(&self.model_name, &self.service, &self.breadcrumbs);
        f.render_widget(header, header_area);

        let view = self.active_view();
        let container = self.layout.container_area().intersection(frame_area);
        let block = Block::default().borders(Borders::ALL).title(view.title());
        let inner = block.inner(container);
        f.render_widget(block, container);
        view.render(inner, f.buffer_mut());

        let hints = self.hints();
        let footer_area = self.layout.footer_area().intersection(frame_area);
        f.render_widget(FooterView::new(&hints, self.notice()), footer_area);
    }
}

fn invalid_transition(from: ScreenKind, intent: Intent) -> NavigationError {
    NavigationError::InvalidTransition {
        from: from.name(),
        intent: intent.to_string(),
    }
}

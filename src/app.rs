// App state and main event loop.
// Wires the tab switcher, session, panels, and background worker to keyboard and mouse input.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::prelude::*;
use ratatui::widgets::ListState;

use crate::api::{Connection, Environment};
use crate::panels::{PanelContext, PanelHost};
use crate::runtime::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
use crate::state::{
    Console, ConsoleMessage, LoadingState, Location, NavAction, NavEffect, NavMode, NavState,
    SessionState, base_nav_items, resolve_initial_key,
};
use crate::store::UiStateStore;
use crate::ui;

/// Which top-level view is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    /// Shown after logout until a session is found again.
    Login,
}

/// Popup drawn over the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    UserMenu,
    Settings,
    Help,
    Console,
}

/// Where arrow keys go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
}

/// Startup options resolved from config and command line.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub mode: NavMode,
    /// Initial path in addressable mode, e.g. `/dashboard`.
    pub initial_path: Option<String>,
    pub github_url: String,
    pub server: String,
    pub config_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
}

/// Main application state.
pub struct App {
    pub nav: NavState,
    pub panels: PanelHost,
    pub session: SessionState,
    /// Visible path; `None` in desktop mode.
    pub location: Option<Location>,
    pub connections: LoadingState<Vec<Connection>>,
    pub environments: LoadingState<Vec<Environment>>,
    pub console: Console,
    /// Transient status-line message, cleared on the next key press.
    pub toast: Option<ConsoleMessage>,
    pub screen: Screen,
    pub overlay: Overlay,
    pub focus: Focus,
    pub sidebar_cursor: usize,
    /// Sidebar list scroll state, kept across frames.
    pub sidebar_list: ListState,
    /// Clickable areas recorded at draw time. Empty when not on screen.
    pub sidebar_hit: Rect,
    pub user_hit: Rect,
    pub settings_hit: Rect,
    pub logout_hit: Rect,
    pub options: AppOptions,
    store: UiStateStore,
    store_rx: Receiver<String>,
    outbox: Vec<RuntimeCommand>,
    pending_urls: Vec<String>,
    /// Whether the app should exit.
    pub should_quit: bool,
}

impl App {
    pub fn new(store: UiStateStore, options: AppOptions) -> Self {
        let location = match options.mode {
            NavMode::Addressable => Some(Location::new(
                options.initial_path.as_deref().unwrap_or("/"),
            )),
            NavMode::Desktop => None,
        };
        let initial = resolve_initial_key(
            options.mode,
            &store.main_page_active_tab(),
            location.as_ref().and_then(Location::first_segment),
        );
        let nav = NavState::new(base_nav_items(&options.github_url), options.mode, initial);
        let sidebar_cursor = nav
            .items()
            .iter()
            .position(|item| item.key == nav.active())
            .unwrap_or(0);
        let store_rx = store.subscribe();

        Self {
            nav,
            panels: PanelHost::new(),
            session: SessionState::new(),
            location,
            connections: LoadingState::Idle,
            environments: LoadingState::Idle,
            console: Console::new(),
            toast: None,
            screen: Screen::Main,
            overlay: Overlay::None,
            focus: Focus::Sidebar,
            sidebar_cursor,
            sidebar_list: ListState::default(),
            sidebar_hit: Rect::default(),
            user_hit: Rect::default(),
            settings_hit: Rect::default(),
            logout_hit: Rect::default(),
            options,
            store,
            store_rx,
            outbox: Vec::new(),
            pending_urls: Vec::new(),
            should_quit: false,
        }
    }

    /// Enter the initial tab and start the session and list loads.
    pub fn mount(&mut self) {
        let effects = self.nav.mount();
        self.apply_effects(effects);

        self.request_session();
        self.connections = LoadingState::Loading;
        self.environments = LoadingState::Loading;
        self.outbox.push(RuntimeCommand::FetchConnections);
        self.outbox.push(RuntimeCommand::FetchEnvironments);
    }

    /// Main event loop.
    pub fn run(
        &mut self,
        terminal: &mut Terminal<impl Backend>,
        bridge: &RuntimeBridge,
    ) -> io::Result<()> {
        self.mount();
        while !self.should_quit {
            self.flush(bridge);
            for evt in bridge.poll_events() {
                self.handle_runtime_event(evt);
            }
            self.sync_preference();
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Send queued commands to the worker and open queued links.
    fn flush(&mut self, bridge: &RuntimeBridge) {
        for cmd in self.take_commands() {
            if let Err(err) = bridge.send(cmd) {
                self.console.log_error(err.to_string());
            }
        }
        for url in std::mem::take(&mut self.pending_urls) {
            if let Err(err) = open::that_detached(&url) {
                self.console
                    .log_error(format!("Could not open {}: {}", url, err));
            }
        }
    }

    pub fn take_commands(&mut self) -> Vec<RuntimeCommand> {
        std::mem::take(&mut self.outbox)
    }

    #[cfg(test)]
    pub fn pending_urls(&self) -> &[String] {
        &self.pending_urls
    }

    /// Run a tab-switcher action and carry out its effects.
    pub fn dispatch(&mut self, action: NavAction) {
        let effects = self.nav.dispatch(action);
        self.apply_effects(effects);
    }

    fn apply_effects(&mut self, effects: Vec<NavEffect>) {
        for effect in effects {
            match effect {
                NavEffect::PersistActiveTab(key) => {
                    if let Err(err) = self.store.set_main_page_active_tab(&key) {
                        self.console
                            .log_warn(format!("Could not remember tab {}: {}", key, err));
                    }
                }
                NavEffect::ReplacePath(path) => {
                    if let Some(location) = self.location.as_mut() {
                        location.replace_path(&path);
                    }
                }
                NavEffect::OpenBrowser(url) => {
                    self.console.log_info(format!("Opening {}", url));
                    self.pending_urls.push(url);
                }
            }
        }
        self.panels.sync(self.nav.items());
    }

    /// Activate the n-th sidebar entry, or open it if it is an external link.
    pub fn activate_index(&mut self, index: usize) {
        let Some(item) = self.nav.items().get(index) else {
            return;
        };
        let action = if item.is_external() {
            NavAction::OpenExternal(item.key.to_string())
        } else {
            NavAction::Activate(item.key.to_string())
        };
        self.sidebar_cursor = index;
        self.dispatch(action);
    }

    /// Follow changes of the remembered tab made outside the shell.
    ///
    /// Only the store's current value is applied; older queued notifications
    /// (including echoes of our own writes) are dropped.
    pub fn sync_preference(&mut self) {
        let mut notified = false;
        while self.store_rx.try_recv().is_ok() {
            notified = true;
        }
        if notified {
            let current = self.store.main_page_active_tab();
            self.dispatch(NavAction::PreferenceChanged(current));
        }
        self.clamp_cursor();
    }

    fn request_session(&mut self) {
        self.session.user = LoadingState::Loading;
        self.outbox.push(RuntimeCommand::FetchUser);
    }

    /// Ask the server to end the session.
    pub fn logout(&mut self) {
        self.overlay = Overlay::None;
        if self.session.logout_in_flight {
            return;
        }
        self.session.logout_in_flight = true;
        self.outbox.push(RuntimeCommand::Logout);
    }

    /// Apply the outcome of a background request.
    pub fn handle_runtime_event(&mut self, evt: RuntimeEvent) {
        match evt {
            RuntimeEvent::UserLoaded(user) => {
                match &user {
                    Some(user) => self
                        .console
                        .log_info(format!("Signed in as {}", user.display_name())),
                    None => self.console.log_info("No active session"),
                }
                let signed_in = user.is_some();
                self.session.set_user(user);
                let admin = self.session.is_admin();
                self.dispatch(NavAction::RoleResolved { admin });
                self.clamp_cursor();

                if signed_in && self.screen == Screen::Login {
                    self.return_to_main();
                }
            }
            RuntimeEvent::UserFailed { message } => {
                self.console
                    .log_warn(format!("Could not load session: {}", message));
                self.session.set_user(None);
                self.dispatch(NavAction::RoleResolved { admin: false });
                self.clamp_cursor();
            }
            RuntimeEvent::LoggedOut => {
                self.console.log_info("Signed out");
                self.session.clear();
                self.dispatch(NavAction::RoleResolved { admin: false });
                self.clamp_cursor();
                self.screen = Screen::Login;
                self.overlay = Overlay::None;
                if let Some(location) = self.location.as_mut() {
                    location.push_path("/login");
                }
            }
            RuntimeEvent::LogoutFailed { message } => {
                self.session.logout_in_flight = false;
                let text = format!("Logout failed: {}", message);
                self.console.log_error(text.clone());
                self.toast = Some(ConsoleMessage::error(text));
            }
            RuntimeEvent::ConnectionsLoaded(connections) => {
                self.console
                    .log_info(format!("Loaded {} connections", connections.len()));
                self.connections = LoadingState::Loaded(connections);
            }
            RuntimeEvent::ConnectionsFailed { message } => {
                self.console
                    .log_warn(format!("Could not load connections: {}", message));
                self.connections = LoadingState::Error(message);
            }
            RuntimeEvent::EnvironmentsLoaded(environments) => {
                self.environments = LoadingState::Loaded(environments);
            }
            RuntimeEvent::EnvironmentsFailed { message } => {
                self.console
                    .log_warn(format!("Could not load environments: {}", message));
                self.environments = LoadingState::Error(message);
            }
        }
    }

    /// Leave the login view once a session exists again.
    fn return_to_main(&mut self) {
        self.screen = Screen::Main;
        if let Some(location) = self.location.as_mut() {
            location.push_path(&format!("/{}", self.nav.active()));
        }
        self.connections = LoadingState::Loading;
        self.environments = LoadingState::Loading;
        self.outbox.push(RuntimeCommand::FetchConnections);
        self.outbox.push(RuntimeCommand::FetchEnvironments);
    }

    fn clamp_cursor(&mut self) {
        let len = self.nav.items().len();
        if self.sidebar_cursor >= len {
            self.sidebar_cursor = len.saturating_sub(1);
        }
    }

    /// Handle keyboard and other events.
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => {}
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.toast = None;

        if self.overlay != Overlay::None {
            self.handle_overlay_key(key);
            return;
        }

        if self.screen == Screen::Login {
            match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('r') => self.request_session(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.overlay = Overlay::Help,
            KeyCode::Char('s') => self.overlay = Overlay::Settings,
            KeyCode::Char('c') => {
                self.console.mark_read();
                self.overlay = Overlay::Console;
            }
            KeyCode::Char('u') if self.session.user_menu_visible() => {
                self.overlay = Overlay::UserMenu;
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Sidebar => Focus::Content,
                    Focus::Content => Focus::Sidebar,
                };
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.activate_index(index);
            }
            _ => match self.focus {
                Focus::Sidebar => self.handle_sidebar_key(key),
                Focus::Content => self.handle_content_key(key),
            },
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) {
        let len = self.nav.items().len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if self.sidebar_cursor + 1 < len {
                    self.sidebar_cursor += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.sidebar_cursor = self.sidebar_cursor.saturating_sub(1);
            }
            KeyCode::Enter => self.activate_index(self.sidebar_cursor),
            KeyCode::Right | KeyCode::Char('l') => self.focus = Focus::Content,
            _ => {}
        }
    }

    fn handle_content_key(&mut self, key: KeyEvent) {
        let ctx = PanelContext {
            connections: &self.connections,
            environments: &self.environments,
            user: self.session.user(),
        };
        let consumed = self
            .panels
            .get_mut(self.nav.active())
            .is_some_and(|panel| panel.handle_key(key, &ctx));
        if !consumed && matches!(key.code, KeyCode::Esc | KeyCode::Left | KeyCode::Char('h')) {
            self.focus = Focus::Sidebar;
        }
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) {
        match (self.overlay, key.code) {
            (_, KeyCode::Esc) => self.overlay = Overlay::None,
            (Overlay::UserMenu, KeyCode::Enter | KeyCode::Char('l')) => self.logout(),
            (Overlay::UserMenu, KeyCode::Char('u'))
            | (Overlay::Settings, KeyCode::Char('s'))
            | (Overlay::Help, KeyCode::Char('?'))
            | (Overlay::Console, KeyCode::Char('c')) => self.overlay = Overlay::None,
            (Overlay::Console, KeyCode::Down | KeyCode::Char('j')) => self.console.select_next(),
            (Overlay::Console, KeyCode::Up | KeyCode::Char('k')) => self.console.select_prev(),
            _ => {}
        }
    }

    /// Left clicks on sidebar rows, the user entry, settings, and the logout item.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || self.screen != Screen::Main {
            return;
        }
        let pos = Position::new(mouse.column, mouse.row);

        match self.overlay {
            Overlay::UserMenu => {
                if self.logout_hit.contains(pos) {
                    self.logout();
                } else {
                    self.overlay = Overlay::None;
                }
            }
            Overlay::None => {
                if self.sidebar_hit.contains(pos) {
                    // Rows are relative to the list's scroll offset.
                    let row = (mouse.row - self.sidebar_hit.y) as usize;
                    self.focus = Focus::Sidebar;
                    self.activate_index(self.sidebar_list.offset() + row);
                } else if self.user_hit.contains(pos) && self.session.user_menu_visible() {
                    self.overlay = Overlay::UserMenu;
                } else if self.settings_hit.contains(pos) {
                    self.overlay = Overlay::Settings;
                }
            }
            _ => {}
        }
    }
}

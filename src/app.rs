//! Mount API - application lifecycle and render effect.
//!
//! Mounting wires the page together: scroll state feeds the two viewport
//! observers (nav threshold and fade threshold), the section tracker owns
//! the active id, the typewriter advances from real elapsed time, and ONE
//! render effect reads the reactive state and redraws whatever changed.
//!
//! # Example
//!
//! ```ignore
//! use folio_tui::app::{self, AppOptions};
//! use folio_tui::content;
//!
//! let handle = app::mount(content::portfolio(), AppOptions::default())?;
//! app::run(&handle)?; // blocks until q / Esc / Ctrl+C
//! app::unmount(handle)?;
//! ```

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseEventKind};
use crossterm::terminal;
use spark_signals::{Signal, effect, signal};

use crate::content::{Portfolio, SECTIONS, section_ids};
use crate::render::nav::nav_lines;
use crate::render::{Frame, Line, NAV_ROWS, PageView, TermRenderer, build_page};
use crate::state::blink::{self, DEFAULT_CARET_PERIOD};
use crate::state::fade::FadeSet;
use crate::state::section::{RegionObserver, SectionTracker};
use crate::state::typewriter::{DEFAULT_TYPE_MS, Typewriter};
use crate::state::viewport::{
    FADE_THRESHOLD, LINE_SCROLL, NAV_THRESHOLD, RegionGeom, ScrollState, ViewportObserver,
    WHEEL_SCROLL,
};
use crate::theme::{self, Mode};

// =============================================================================
// Terminal size signals
// =============================================================================

thread_local! {
    static TERMINAL_WIDTH: Signal<u16> = signal(80);
    static TERMINAL_HEIGHT: Signal<u16> = signal(24);
}

/// Current terminal width (reactive).
pub fn terminal_width() -> u16 {
    TERMINAL_WIDTH.with(|s| s.get())
}

/// Current terminal height (reactive).
pub fn terminal_height() -> u16 {
    TERMINAL_HEIGHT.with(|s| s.get())
}

/// Update the size signals (resize events, initial detection).
pub fn set_terminal_size(width: u16, height: u16) {
    TERMINAL_WIDTH.with(|s| {
        if s.get() != width {
            s.set(width);
        }
    });
    TERMINAL_HEIGHT.with(|s| {
        if s.get() != height {
            s.set(height);
        }
    });
}

fn detect_terminal_size() {
    if let Ok((width, height)) = terminal::size() {
        set_terminal_size(width, height);
    }
}

// =============================================================================
// Options and actions
// =============================================================================

/// Mount-time options.
#[derive(Debug, Clone, Copy)]
pub struct AppOptions {
    /// Initial theme mode.
    pub mode: Mode,
    /// Hero typewriter duration in milliseconds.
    pub type_ms: u64,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Dark,
            type_ms: DEFAULT_TYPE_MS,
        }
    }
}

/// Everything a key or wheel event can do to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleTheme,
    ScrollBy(i32),
    PageUp,
    PageDown,
    Top,
    Bottom,
    NextSection,
    PrevSection,
    /// Jump to section by page-order index (nav anchor).
    JumpTo(usize),
}

/// Map a key event onto an action. Release/repeat events are ignored.
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(event::KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollBy(-LINE_SCROLL)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollBy(LINE_SCROLL)),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::Top),
        KeyCode::End | KeyCode::Char('G') => Some(Action::Bottom),
        KeyCode::Tab => Some(Action::NextSection),
        KeyCode::BackTab => Some(Action::PrevSection),
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            (index < SECTIONS.len()).then_some(Action::JumpTo(index))
        }
        _ => None,
    }
}

/// Page row to jump to for a section step of `delta` from the section that
/// is currently active. Clamps at both ends of the page order.
pub fn section_jump_target(regions: &[RegionGeom], active: &str, delta: i32) -> Option<u16> {
    let current = regions.iter().position(|r| r.id == active)?;
    let target = (current as i32 + delta).clamp(0, regions.len() as i32 - 1) as usize;
    Some(regions[target].top)
}

// =============================================================================
// App state and handle
// =============================================================================

struct AppState {
    portfolio: Rc<Portfolio>,
    fades: Rc<FadeSet>,
    scroll: ScrollState,
    nav_observer: ViewportObserver,
    fade_observer: ViewportObserver,
    tracker: SectionTracker,
    typewriter: Typewriter,
    regions: Vec<RegionGeom>,
    started: Instant,
    fade_cleanups: Vec<Box<dyn FnOnce()>>,
    caret_cleanup: Rc<RefCell<Option<Box<dyn FnOnce()>>>>,
}

/// Handle returned by [`mount`] that allows unmounting.
pub struct AppHandle {
    stop_effect: Option<Box<dyn FnOnce()>>,
    running: Arc<AtomicBool>,
    state: Rc<RefCell<AppState>>,
    renderer: Rc<RefCell<TermRenderer>>,
}

impl AppHandle {
    /// Check if still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the application (sets running to false).
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Stop the render effect, release every subscription, and restore the
    /// terminal.
    pub fn unmount(mut self) -> io::Result<()> {
        self.running.store(false, Ordering::SeqCst);

        {
            let mut state = self.state.borrow_mut();
            state.tracker.release();
            for cleanup in state.fade_cleanups.drain(..) {
                cleanup();
            }
            if let Some(cleanup) = state.caret_cleanup.borrow_mut().take() {
                cleanup();
            }
        }

        if let Some(stop) = self.stop_effect.take() {
            stop();
        }

        self.renderer.borrow_mut().exit()
    }
}

impl Drop for AppHandle {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
        // Terminal restore is best effort here; the renderer's own Drop
        // covers the direct-drop path too.
        let _ = self.renderer.borrow_mut().exit();
    }
}

// =============================================================================
// Mount
// =============================================================================

/// Mount the portfolio page.
///
/// Sets up terminal size detection, the scroll/observer/tracker wiring, the
/// hero typewriter with its caret clock, and the single render effect.
/// Returns an [`AppHandle`] for the event loop and cleanup.
pub fn mount(portfolio: Portfolio, options: AppOptions) -> io::Result<AppHandle> {
    theme::set_mode(options.mode);
    detect_terminal_size();

    let portfolio = Rc::new(portfolio);
    let fades = Rc::new(FadeSet::new());
    let width = terminal_width();
    let viewport_rows = terminal_height().saturating_sub(NAV_ROWS);

    // Layout pass: geometry only, so the observers can subscribe before the
    // first frame. Styling inputs are irrelevant to row positions.
    let layout = build_page(
        &portfolio,
        width,
        &PageView::completed(),
        &fades,
        &theme::active_theme(),
    );

    let nav_observer = ViewportObserver::new(NAV_THRESHOLD);
    nav_observer.set_regions(&layout.regions);
    let fade_observer = ViewportObserver::new(FADE_THRESHOLD);
    fade_observer.set_regions(&layout.regions);

    let ids = section_ids();
    let tracker = SectionTracker::new(&ids, &nav_observer);

    let mut fade_cleanups = Vec::new();
    for id in &ids {
        if let Some(cleanup) = fade_observer.subscribe(id, fades.crossing_callback(id)) {
            fade_cleanups.push(cleanup);
        }
    }

    let mut scroll = ScrollState::new();
    scroll.set_bounds(layout.height(), viewport_rows);

    // Hero typewriter: the caret clock runs while the reveal runs and is
    // released at completion (or at unmount, whichever comes first).
    let mut typewriter = Typewriter::new(portfolio.headline, options.type_ms);
    let caret_cleanup: Rc<RefCell<Option<Box<dyn FnOnce()>>>> =
        Rc::new(RefCell::new(Some(blink::subscribe(DEFAULT_CARET_PERIOD))));
    let caret_on_done = caret_cleanup.clone();
    typewriter.on_done(Box::new(move || {
        if let Some(cleanup) = caret_on_done.borrow_mut().take() {
            cleanup();
        }
    }));

    let renderer = Rc::new(RefCell::new(TermRenderer::new()));
    renderer.borrow_mut().enter()?;

    let running = Arc::new(AtomicBool::new(true));

    // The ONE render effect: every reactive read below is a dependency.
    let running_for_effect = running.clone();
    let mode_sig = theme::mode_signal();
    let active_sig = tracker.active_signal();
    let offset_sig = scroll.offset_signal();
    let revealed_sig = typewriter.revealed_signal();
    let done_sig = typewriter.done_signal();
    let fade_version = fades.version_signal();
    let caret_sig = blink::phase_signal(DEFAULT_CARET_PERIOD);
    let portfolio_for_effect = portfolio.clone();
    let fades_for_effect = fades.clone();
    let renderer_for_effect = renderer.clone();

    let stop_fn = effect(move || {
        if !running_for_effect.load(Ordering::SeqCst) {
            return;
        }

        let theme = match mode_sig.get() {
            Mode::Dark => theme::dark(),
            Mode::Light => theme::light(),
        };
        let active = active_sig.get();
        let offset = offset_sig.get() as usize;
        let done = done_sig.get();
        let view = PageView {
            revealed: revealed_sig.get(),
            caret_visible: caret_sig.as_ref().map(|s| s.get()).unwrap_or(true),
            reveal_done: done,
        };
        let _ = fade_version.get();

        let width = terminal_width();
        let rows_below_nav = terminal_height().saturating_sub(NAV_ROWS) as usize;

        let page = build_page(&portfolio_for_effect, width, &view, &fades_for_effect, &theme);
        let bg = theme.background.resolve();

        let mut rows = nav_lines(&portfolio_for_effect, SECTIONS, &active, &theme, width);
        for i in 0..rows_below_nav {
            rows.push(
                page.lines
                    .get(offset + i)
                    .cloned()
                    .unwrap_or_else(|| Line::blank(bg)),
            );
        }

        let _ = renderer_for_effect.borrow_mut().render(&Frame { rows, bg });
    });

    let state = Rc::new(RefCell::new(AppState {
        portfolio,
        fades,
        scroll,
        nav_observer,
        fade_observer,
        tracker,
        typewriter,
        regions: layout.regions,
        started: Instant::now(),
        fade_cleanups,
        caret_cleanup,
    }));

    // Initial visibility pass: the hero crosses immediately
    {
        let state = state.borrow();
        let offset = state.scroll.offset();
        let rows = state.scroll.viewport_rows();
        state.nav_observer.update(offset, rows);
        state.fade_observer.update(offset, rows);
    }

    Ok(AppHandle {
        stop_effect: Some(Box::new(stop_fn)),
        running,
        state,
        renderer,
    })
}

/// Unmount and clean up.
pub fn unmount(handle: AppHandle) -> io::Result<()> {
    handle.unmount()
}

// =============================================================================
// Event loop
// =============================================================================

/// Run the event loop once (non-blocking, ~60fps poll).
///
/// Advances the typewriter, pumps the caret clock, and routes one input
/// event. Returns `Ok(false)` when the application should stop.
pub fn tick(handle: &AppHandle) -> io::Result<bool> {
    if !handle.is_running() {
        return Ok(false);
    }

    {
        let mut state = handle.state.borrow_mut();
        let elapsed = state.started.elapsed();
        state.typewriter.advance_to(elapsed);
    }
    // Sync the caret clock's atomic into its signal
    let _ = blink::phase(DEFAULT_CARET_PERIOD);

    if event::poll(Duration::from_millis(16))? {
        match event::read()? {
            Event::Key(key) => {
                if let Some(action) = action_for_key(key) {
                    apply_action(handle, action);
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => apply_action(handle, Action::ScrollBy(-WHEEL_SCROLL)),
                MouseEventKind::ScrollDown => apply_action(handle, Action::ScrollBy(WHEEL_SCROLL)),
                _ => {}
            },
            Event::Resize(width, height) => handle_resize(handle, width, height),
            _ => {}
        }
    }

    Ok(handle.is_running())
}

/// Run the event loop (blocking until stopped).
pub fn run(handle: &AppHandle) -> io::Result<()> {
    while tick(handle)? {
        // Continue processing events
    }
    Ok(())
}

fn apply_action(handle: &AppHandle, action: Action) {
    if action == Action::Quit {
        handle.stop();
        return;
    }
    if action == Action::ToggleTheme {
        theme::toggle_mode();
        return;
    }

    let state = handle.state.borrow();
    match action {
        Action::ScrollBy(delta) => {
            state.scroll.scroll_by(delta);
        }
        Action::PageUp => {
            state.scroll.page_up();
        }
        Action::PageDown => {
            state.scroll.page_down();
        }
        Action::Top => state.scroll.scroll_to_top(),
        Action::Bottom => state.scroll.scroll_to_bottom(),
        Action::NextSection => {
            if let Some(top) = section_jump_target(&state.regions, &state.tracker.active(), 1) {
                state.scroll.scroll_to(top);
            }
        }
        Action::PrevSection => {
            if let Some(top) = section_jump_target(&state.regions, &state.tracker.active(), -1) {
                state.scroll.scroll_to(top);
            }
        }
        Action::JumpTo(index) => {
            if let Some(region) = state.regions.get(index) {
                state.scroll.scroll_to(region.top);
            }
        }
        Action::Quit | Action::ToggleTheme => {}
    }

    // Every scroll change re-evaluates visibility
    let offset = state.scroll.offset();
    let rows = state.scroll.viewport_rows();
    state.nav_observer.update(offset, rows);
    state.fade_observer.update(offset, rows);
}

fn handle_resize(handle: &AppHandle, width: u16, height: u16) {
    {
        let mut state = handle.state.borrow_mut();
        let state = &mut *state;

        let layout = build_page(
            &state.portfolio,
            width,
            &PageView::completed(),
            &state.fades,
            &theme::active_theme(),
        );
        state.regions = layout.regions;
        state.nav_observer.set_regions(&state.regions);
        state.fade_observer.set_regions(&state.regions);

        let viewport_rows = height.saturating_sub(NAV_ROWS);
        state.scroll.set_bounds(layout.lines.len() as u16, viewport_rows);
        state.nav_observer.update(state.scroll.offset(), viewport_rows);
        state.fade_observer.update(state.scroll.offset(), viewport_rows);
    }

    handle.renderer.borrow_mut().invalidate();
    set_terminal_size(width, height);
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(action_for_key(press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(action_for_key(press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_scroll_keys() {
        assert_eq!(
            action_for_key(press(KeyCode::Down)),
            Some(Action::ScrollBy(LINE_SCROLL))
        );
        assert_eq!(
            action_for_key(press(KeyCode::Char('k'))),
            Some(Action::ScrollBy(-LINE_SCROLL))
        );
        assert_eq!(action_for_key(press(KeyCode::PageDown)), Some(Action::PageDown));
        assert_eq!(action_for_key(press(KeyCode::Home)), Some(Action::Top));
        assert_eq!(action_for_key(press(KeyCode::Char('G'))), Some(Action::Bottom));
    }

    #[test]
    fn test_section_keys() {
        assert_eq!(action_for_key(press(KeyCode::Tab)), Some(Action::NextSection));
        assert_eq!(action_for_key(press(KeyCode::BackTab)), Some(Action::PrevSection));
        assert_eq!(
            action_for_key(press(KeyCode::Char('1'))),
            Some(Action::JumpTo(0))
        );
        assert_eq!(
            action_for_key(press(KeyCode::Char('7'))),
            Some(Action::JumpTo(6))
        );
        // Beyond the section count
        assert_eq!(action_for_key(press(KeyCode::Char('9'))), None);
    }

    #[test]
    fn test_theme_key_and_unmapped() {
        assert_eq!(
            action_for_key(press(KeyCode::Char('t'))),
            Some(Action::ToggleTheme)
        );
        assert_eq!(action_for_key(press(KeyCode::Char('z'))), None);
        assert_eq!(action_for_key(press(KeyCode::F(5))), None);
    }

    fn regions() -> Vec<RegionGeom> {
        ["home", "about", "skills"]
            .iter()
            .enumerate()
            .map(|(i, id)| RegionGeom {
                id: id.to_string(),
                top: (i * 20) as u16,
                height: 20,
            })
            .collect()
    }

    #[test]
    fn test_section_jump_target_steps() {
        let regions = regions();
        assert_eq!(section_jump_target(&regions, "home", 1), Some(20));
        assert_eq!(section_jump_target(&regions, "about", 1), Some(40));
        assert_eq!(section_jump_target(&regions, "about", -1), Some(0));
    }

    #[test]
    fn test_section_jump_target_clamps() {
        let regions = regions();
        assert_eq!(section_jump_target(&regions, "home", -1), Some(0));
        assert_eq!(section_jump_target(&regions, "skills", 1), Some(40));
    }

    #[test]
    fn test_section_jump_target_unknown_active() {
        assert_eq!(section_jump_target(&regions(), "ghost", 1), None);
    }

    #[test]
    fn test_terminal_size_signals() {
        set_terminal_size(120, 40);
        assert_eq!(terminal_width(), 120);
        assert_eq!(terminal_height(), 40);

        set_terminal_size(120, 40); // idempotent
        assert_eq!(terminal_width(), 120);
    }

    #[test]
    fn test_default_options() {
        let options = AppOptions::default();
        assert_eq!(options.mode, Mode::Dark);
        assert_eq!(options.type_ms, DEFAULT_TYPE_MS);
    }
}

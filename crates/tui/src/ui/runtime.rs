//! Runtime: unified event loop and input routing for the TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Drive a single event loop that handles input and animation ticks.
//! - Route events to the main view and execute returned `Effect`s.
//!
//! Event Loop Strategy
//! - Dedicated input thread blocks on `crossterm::event::read()` and forwards
//!   events over a channel, avoiding cross-thread poll/read issues and
//!   ensuring reliable resize delivery across terminals (including iTerm2).
//! - Smart ticking: fast interval (100 ms) only while a status banner is
//!   waiting to expire; long interval (5 s) when idle.
//!
//! Entry Point
//! - `run_app(content)` is called from `lib::run` and performs setup, event
//!   processing, and teardown.
use anyhow::Result;
use crossterm::event::MouseEventKind;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use kotp_content::SiteContent;
use kotp_types::{Effect, Msg};
use kotp_util::preferences::UserPreferences;
use ratatui::{Terminal, prelude::*};
use std::time::{Duration, Instant};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};

use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::main_component::MainView;

/// Spawn a dedicated input thread that blocks on terminal input and forwards
/// `crossterm` events over a Tokio channel.
///
/// Keeping `poll()` and `read()` on the same OS thread avoids lost or delayed
/// events in some terminals.
async fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    let mut last_mouse_event: Option<Instant> = Some(Instant::now());

    tokio::spawn(async move {
        let sixteen_ms = Duration::from_millis(16);
        loop {
            if event::poll(sixteen_ms).is_ok() {
                match event::read() {
                    Ok(event) => {
                        // Throttle mouse move events to once per 16 ms.
                        let is_mouse_move = event.as_mouse_event().is_some_and(|e| e.kind == MouseEventKind::Moved);
                        let should_send = !is_mouse_move || last_mouse_event.is_some_and(|last| last.elapsed() >= sixteen_ms);
                        if is_mouse_move && should_send {
                            last_mouse_event = Some(Instant::now());
                        }

                        if should_send && let Err(e) = sender.send(event).await {
                            tracing::warn!("Failed to send event: {}", e);
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to read event: {}", e);
                        break;
                    }
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
///
/// Returns a ratatui `Terminal` backed by Crossterm for later drawing.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Renders a frame by delegating to the main view.
fn render(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

/// Handle raw crossterm input events and update `App`/components.
fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, &Msg::Resize(width, height)),

        Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

/// Executes queued effects. Route switches go through the main view so that
/// whatever the outgoing screen did this turn (closing the panel, recording
/// state) is already in place when the new screen mounts.
fn apply_effects(app: &mut App, main_view: &mut MainView, effects: &mut Vec<Effect>) {
    for effect in effects.drain(..) {
        match effect {
            Effect::SwitchTo(route) => main_view.set_current_route(app, route),
        }
    }
}

/// Entry point for the TUI runtime: sets up the terminal, spawns the event
/// producer, runs the async event loop, and performs cleanup on exit.
pub async fn run_app(content: SiteContent) -> Result<()> {
    // Input comes from a dedicated blocking thread to ensure reliability.
    let mut input_receiver = spawn_input_thread().await;
    let mut main_view = MainView::new();

    let preferences = UserPreferences::load_or_ephemeral();
    let mut app = App::new(content, preferences);
    let mut terminal = setup_terminal()?;

    let mut effects: Vec<Effect> = Vec::with_capacity(5);

    // Prime the viewport before the first frame: the navigation chrome picks
    // its layout (inline links or panel toggle) from the width, and no Resize
    // event arrives until the terminal actually changes size.
    let mut last_size: Option<(u16, u16)> = crossterm::terminal::size().ok();
    if let Some((width, height)) = last_size {
        effects.extend(main_view.handle_message(&mut app, &Msg::Resize(width, height)));
    }
    apply_effects(&mut app, &mut main_view, &mut effects);

    // Ticking strategy: fast while a banner is pending, very slow when idle.
    let fast_interval = Duration::from_millis(100);
    let idle_interval = Duration::from_millis(5000);
    let mut current_interval = idle_interval;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(&mut terminal, &mut app, &mut main_view)?;

    loop {
        // Adjust the ticker whenever the animation need flips.
        let needs_animation = app.needs_animation();
        let target_interval = if needs_animation { fast_interval } else { idle_interval };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }
        let mut needs_render = false;
        tokio::select! {
            // Terminal input events
            maybe_event = input_receiver.recv() => {
                if let Some(event) = maybe_event {
                    if let Event::Key(key_event) = event
                        && key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
                            break;
                        }
                    effects.extend(handle_input_event(&mut app, &mut main_view, event));
                } else {
                    // Input channel closed; break out to shut down cleanly.
                    break;
                }
                needs_render = true;
            }

            // Periodic animation tick
            _ = ticker.tick() => {
                effects.extend(main_view.handle_message(&mut app, &Msg::Tick));
                needs_render = needs_animation || !effects.is_empty();
            }

            // Handle Ctrl+C
            _ = signal::ctrl_c() => { break; }
        }

        // Route switches happen in the same turn as the input that asked for
        // them, before the next frame is drawn.
        apply_effects(&mut app, &mut main_view, &mut effects);

        // Fallback: detect terminal size changes even if no explicit Resize
        // event was received. This handles terminals that miss SIGWINCH or
        // drop resize notifications during interactive operations.
        if let Ok((w, h)) = crossterm::terminal::size()
            && last_size != Some((w, h))
        {
            last_size = Some((w, h));
            effects.extend(main_view.handle_message(&mut app, &Msg::Resize(w, h)));
            apply_effects(&mut app, &mut main_view, &mut effects);
            needs_render = true;
        }

        // Render if dirty
        if needs_render {
            render(&mut terminal, &mut app, &mut main_view)?;
        }
    }

    app.nav.dispose();
    cleanup_terminal(&mut terminal)?;
    Ok(())
}

//! Runtime: event loop and input routing for the picker.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode, mouse capture).
//! - Route input to the root view and execute the returned `Effect`s.
//! - Deliver deferred messages one loop turn after the frame that scheduled
//!   them, so reveals requested on open see the laid-out panel.
//!
//! Entry Point
//! - `run_app(options)` is called from `lib::run` and performs setup,
//!   event processing, and teardown.
use std::time::Duration;

use anyhow::Result;
use clockpick_types::{ClockTime, Effect, Msg};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::*};
use tokio::{signal, sync::mpsc};
use tracing::{debug, info, warn};

use crate::app::{App, PickerOptions};
use crate::ui::components::component::Component;
use crate::ui::main_component::MainView;

type TerminalBackend = CrosstermBackend<std::io::Stdout>;

/// Whether the loop keeps running after a batch of effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Exit,
}

/// Spawn a dedicated input thread that blocks on terminal input and forwards
/// `crossterm` events over a Tokio channel.
///
/// Keeping `poll()` and `read()` on the same OS thread avoids lost or delayed
/// events in some terminals.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);

    tokio::task::spawn_blocking(move || {
        let poll_interval = Duration::from_millis(50);
        loop {
            if sender.is_closed() {
                break;
            }
            match event::poll(poll_interval) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    warn!("Failed to poll event: {}", e);
                    break;
                }
            }
            match event::read() {
                // Pointer motion carries nothing the picker reacts to.
                Ok(Event::Mouse(mouse)) if mouse.kind == MouseEventKind::Moved => {}
                Ok(event) => {
                    if let Err(e) = sender.blocking_send(event) {
                        debug!("Input receiver dropped: {}", e);
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read event: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<TerminalBackend>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<TerminalBackend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<TerminalBackend>, app: &mut App, main_view: &mut MainView) -> Result<()> {
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

/// Executes effects, queueing deferred messages for after the next render.
fn process_effects(app: &mut App, effects: Vec<Effect>, deferred: &mut Vec<Msg>) -> LoopControl {
    let mut control = LoopControl::Continue;
    for effect in effects {
        match effect {
            Effect::ScheduleReveal(generation) => deferred.push(Msg::RevealDue(generation)),
            Effect::ValueCommitted(value) => app.apply_committed_value(value),
            Effect::Quit => control = LoopControl::Exit,
        }
    }
    control
}

/// Emits `Msg::Resize` when `current` differs from the last known size.
fn synthesize_resize(
    app: &mut App,
    main_view: &mut MainView,
    last_size: &mut Option<(u16, u16)>,
    current: Option<(u16, u16)>,
) -> Vec<Effect> {
    match current {
        Some((w, h)) if *last_size != current => {
            *last_size = current;
            main_view.handle_message(app, &Msg::Resize(w, h))
        }
        _ => Vec::new(),
    }
}

fn is_ctrl_c(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(key_event) if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL)
    )
}

async fn event_loop(terminal: &mut Terminal<TerminalBackend>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let (message_sender, mut message_receiver) = mpsc::unbounded_channel::<Msg>();
    let mut deferred: Vec<Msg> = Vec::new();

    render(terminal, app, main_view)?;

    // Track the last known terminal size to synthesize Resize messages when
    // some terminals fail to emit them reliably.
    let mut last_size: Option<(u16, u16)> = crossterm::terminal::size().ok();

    loop {
        let mut effects: Vec<Effect> = Vec::new();
        tokio::select! {
            // Terminal input events
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; break out to shut down cleanly.
                    break;
                };
                if is_ctrl_c(&event) {
                    break;
                }
                effects.extend(handle_input_event(app, main_view, event));
            }
            // Messages deferred past the previous frame
            Some(message) = message_receiver.recv() => {
                effects.extend(main_view.handle_message(app, &message));
            }
            // Handle Ctrl+C
            _ = signal::ctrl_c() => { break; }
        }

        // Fallback: detect terminal size changes even if no explicit Resize
        // event was received.
        effects.extend(synthesize_resize(app, main_view, &mut last_size, crossterm::terminal::size().ok()));

        if process_effects(app, effects, &mut deferred) == LoopControl::Exit {
            break;
        }

        render(terminal, app, main_view)?;

        for message in deferred.drain(..) {
            if let Err(e) = message_sender.send(message) {
                warn!("Failed to queue deferred message: {}", e);
            }
        }
    }
    Ok(())
}

/// Entry point for the TUI runtime: sets up the terminal, runs the event
/// loop, and restores the terminal even when the loop fails.
///
/// Returns the value held by the caller side when the loop exits.
pub async fn run_app(options: PickerOptions) -> Result<Option<ClockTime>> {
    let mut app = App::new(&options);
    let mut main_view = MainView::new();
    info!(theme = app.ctx.theme_id, minimum = %app.time_picker.minimum(), "starting time picker");

    let mut terminal = setup_terminal()?;
    let outcome = event_loop(&mut terminal, &mut app, &mut main_view).await;
    cleanup_terminal(&mut terminal)?;
    outcome?;

    info!(changes = app.change_count(), "time picker finished");
    Ok(app.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clockpick_types::MinimumTime;
    use crossterm::event::KeyEvent;

    #[test]
    fn reveal_is_deferred_and_commit_reaches_the_caller() {
        let mut app = App::new(&PickerOptions {
            minimum: MinimumTime::new(9, 30),
            close_on_commit: true,
            ..Default::default()
        });
        let mut deferred = Vec::new();

        let control = process_effects(
            &mut app,
            vec![Effect::ScheduleReveal(3), Effect::ValueCommitted(ClockTime::new(9, 30))],
            &mut deferred,
        );
        assert_eq!(control, LoopControl::Continue);
        assert_eq!(deferred, vec![Msg::RevealDue(3)]);
        assert_eq!(app.value(), ClockTime::new(9, 30));
        assert_eq!(app.time_picker.formatted_value().as_deref(), Some("09:30"));
    }

    #[test]
    fn quit_effect_stops_the_loop() {
        let mut app = App::new(&PickerOptions::default());
        assert_eq!(process_effects(&mut app, vec![Effect::Quit], &mut Vec::new()), LoopControl::Exit);
    }

    #[test]
    fn size_change_is_reported_once() {
        let mut app = App::new(&PickerOptions::default());
        let mut main_view = MainView::new();
        let mut last_size = Some((80, 24));

        assert!(synthesize_resize(&mut app, &mut main_view, &mut last_size, Some((80, 24))).is_empty());
        let effects = synthesize_resize(&mut app, &mut main_view, &mut last_size, Some((100, 30)));
        assert_eq!(process_effects(&mut app, effects, &mut Vec::new()), LoopControl::Continue);
        assert_eq!(last_size, Some((100, 30)));
        assert!(synthesize_resize(&mut app, &mut main_view, &mut last_size, None).is_empty());
        assert_eq!(last_size, Some((100, 30)));
    }

    #[test]
    fn ctrl_c_is_recognised_only_with_control() {
        assert!(is_ctrl_c(&Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))));
        assert!(!is_ctrl_c(&Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE))));
    }
}

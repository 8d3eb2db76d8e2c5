//! WebSocket client implementation.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::tungstenite::Message;

use crate::protocol::{ClientMessage, Envelope};
use crate::terminal::TerminalSession;

use super::state::{ClientApp, ClientState};
use super::ui;

/// Shared client app state.
type SharedApp = Arc<Mutex<ClientApp>>;

/// Run the quiz client.
pub async fn run(host: String, port: u16, rounds: usize) -> Result<(), Box<dyn std::error::Error>> {
    let app = Arc::new(Mutex::new(ClientApp::new(host.clone(), port, rounds)));

    // Connect to server
    let url = format!("ws://{}:{}", host, port);
    println!("Connecting to {}...", url);

    let (ws_stream, _) = match tokio_tungstenite::connect_async(&url).await {
        Ok(result) => result,
        Err(e) => {
            return Err(format!("Failed to connect to server: {}", e).into());
        }
    };

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // Create channel for outgoing messages
    let (tx, mut rx) = mpsc::unbounded_channel::<ClientMessage>();

    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let Ok(json) = serde_json::to_string(&msg) else {
                continue;
            };
            if ws_sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let _ = tx.send(ClientApp::initial_request());

    let app_clone = Arc::clone(&app);
    let tx_clone = tx.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_receiver.next().await {
            let text = match msg {
                Ok(Message::Text(text)) => text.to_string(),
                Ok(Message::Close(_)) => {
                    let mut app = app_clone.lock().await;
                    app.disconnect("Connection closed by server".to_string());
                    break;
                }
                Err(e) => {
                    let mut app = app_clone.lock().await;
                    app.disconnect(format!("Connection error: {}", e));
                    break;
                }
                _ => continue,
            };

            let envelope: Envelope = match serde_json::from_str(&text) {
                Ok(m) => m,
                Err(_) => continue,
            };

            let follow_up = app_clone.lock().await.handle_server_message(envelope.body);
            if let Some(request) = follow_up {
                let _ = tx_clone.send(request);
            }
        }
    });

    run_tui(app, tx).await?;

    recv_task.abort();

    Ok(())
}

/// Run the client TUI.
async fn run_tui(
    app: SharedApp,
    tx: mpsc::UnboundedSender<ClientMessage>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = TerminalSession::enter()?;

    loop {
        {
            let app = app.lock().await;
            if app.should_quit {
                break;
            }
            terminal.draw(|frame| ui::render(frame, &app))?;
        }

        // Handle input with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                let should_quit = handle_input(&app, &tx, key.code).await;
                if should_quit {
                    break;
                }
            }
        }
    }

    terminal.leave()?;
    Ok(())
}

/// Handle keyboard input. Returns true if the client should exit.
async fn handle_input(
    app: &SharedApp,
    tx: &mpsc::UnboundedSender<ClientMessage>,
    key: KeyCode,
) -> bool {
    let mut app = app.lock().await;

    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
        app.should_quit = true;
        return true;
    }

    let request = match &app.state {
        ClientState::Connecting => None,
        ClientState::CategorySelect { .. } => match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.select_previous();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.select_next();
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => app.start_quiz(),
            KeyCode::Esc => {
                app.should_quit = true;
                return true;
            }
            _ => None,
        },
        ClientState::Quiz { revealed, .. } => match key {
            KeyCode::Enter | KeyCode::Char(' ') if !revealed => {
                app.reveal_answer();
                None
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => app.mark_answer(true),
            KeyCode::Char('n') | KeyCode::Char('N') => app.mark_answer(false),
            _ => None,
        },
        ClientState::Results { .. } => {
            if matches!(key, KeyCode::Char('r') | KeyCode::Char('R')) {
                app.restart();
            } else if matches!(key, KeyCode::Esc) {
                app.should_quit = true;
                return true;
            }
            None
        }
        ClientState::Disconnected { .. } => {
            if matches!(key, KeyCode::Esc | KeyCode::Enter) {
                app.should_quit = true;
                return true;
            }
            None
        }
    };

    if let Some(request) = request {
        let _ = tx.send(request);
    }

    false
}

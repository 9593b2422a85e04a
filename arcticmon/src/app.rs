//! App state and main loop: input handling, live updates, actions, drawing.
//!
//! Everything that touches the [`View`] runs on this one loop. Network work
//! happens in spawned tasks that only report back through the event channel,
//! so renderers never run concurrently and never straddle an await.

use std::{io, process::Stdio, time::Duration};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{info, warn};

use crate::actions::{
    spawn_action, ActionInvoker, ActionOutcome, Request, RESTART_STACK, RESTART_VM, UPDATE_STACK,
    UPDATE_SYSTEM,
};
use crate::bootstrap::{finish_bootstrap, spawn_bootstrap, Overview};
use crate::client::ServerClient;
use crate::error::ClientResult;
use crate::live::{LinkEvent, LiveManager, RECONNECT_DELAY};
use crate::render::select_ssh_window;
use crate::ui;
use crate::view::{Notice, NoticeKind, Panel, SshWindow, View};

const TICK: Duration = Duration::from_millis(250);

/// Everything the background tasks report back to the loop.
#[derive(Debug)]
pub enum AppEvent {
    Link { generation: u64, event: LinkEvent },
    Overview(ClientResult<Overview>),
    ActionDone { action: String, outcome: ActionOutcome },
}

pub struct App {
    pub view: View,
    pub actions: ActionInvoker,
    live: LiveManager,
    client: ServerClient,
    tx: mpsc::Sender<AppEvent>,
    rx: mpsc::Receiver<AppEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(client: ServerClient) -> Self {
        let (tx, rx) = mpsc::channel(256);
        Self {
            view: View::new(),
            actions: ActionInvoker::new(),
            live: LiveManager::new(client.clone(), tx.clone(), RECONNECT_DELAY),
            client,
            tx,
            rx,
            should_quit: false,
        }
    }

    /// Kick off the overview fetch and the live stream side by side.
    pub fn start(&mut self) {
        spawn_bootstrap(self.client.clone(), self.tx.clone());
        self.live.connect();
        self.view.connection = self.live.state();
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.start();

        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let res = self.event_loop(&mut terminal).await;

        // Teardown
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()> {
        let mut tick = tokio::time::interval(TICK);
        loop {
            let deadline = self.live.reconnect_deadline();
            tokio::select! {
                Some(ev) = self.rx.recv() => self.handle_event(ev),
                _ = reconnect_timer(deadline) => self.reconnect_if_due(),
                _ = tick.tick() => {
                    while event::poll(Duration::ZERO)? {
                        if let Event::Key(k) = event::read()? {
                            self.handle_key(k);
                        }
                    }
                }
            }
            if self.should_quit {
                break;
            }
            let now = chrono::Local::now();
            terminal.draw(|f| ui::draw(f, &self.view, &self.actions, now))?;
        }
        Ok(())
    }

    pub fn handle_event(&mut self, ev: AppEvent) {
        match ev {
            AppEvent::Link { generation, event } => {
                self.live.handle(&mut self.view, generation, event)
            }
            AppEvent::Overview(res) => finish_bootstrap(&mut self.view, res),
            AppEvent::ActionDone { action, outcome } => {
                if let Some(n) = self.actions.finish(&action, &outcome) {
                    self.view.notice = Some(n);
                }
            }
        }
    }

    fn reconnect_if_due(&mut self) {
        if self.live.reconnect_due(Instant::now()) {
            self.reconnect();
        }
    }

    fn reconnect(&mut self) {
        self.live.connect();
        self.view.connection = self.live.state();
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_key(&mut self, k: KeyEvent) {
        if k.kind == KeyEventKind::Release {
            return;
        }

        // Prompt is modal
        if self.actions.pending().is_some() {
            match k.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    let req = self.actions.confirm();
                    self.start_action(req);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.actions.dismiss();
                }
                _ => {}
            }
            return;
        }

        match k.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('1') => select_ssh_window(&mut self.view, SshWindow::Day),
            KeyCode::Char('2') => select_ssh_window(&mut self.view, SshWindow::Week),
            KeyCode::Char('3') => select_ssh_window(&mut self.view, SshWindow::Month),
            KeyCode::Char('s') => self.request_action(RESTART_STACK),
            KeyCode::Char('u') => self.request_action(UPDATE_STACK),
            KeyCode::Char('U') => self.request_action(UPDATE_SYSTEM),
            KeyCode::Char('R') => self.request_action(RESTART_VM),
            KeyCode::Char('r') => {
                info!("manual reconnect");
                self.reconnect();
            }
            KeyCode::Tab => self.move_selection(1),
            KeyCode::BackTab => self.move_selection(-1),
            KeyCode::Char('o') => self.open_selected_service(),
            KeyCode::Char('c') => self.view.notice = None,
            _ => {}
        }
    }

    fn request_action(&mut self, action: &str) {
        let req = self.actions.request(action);
        self.start_action(req);
    }

    fn start_action(&mut self, req: Request) {
        if let Request::Invoke(action) = req {
            spawn_action(self.client.clone(), action, self.tx.clone());
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let Some(cards) = self.view.services.ready() else {
            return;
        };
        let n = cards.len() as isize;
        if n == 0 {
            return;
        }
        let cur = self.view.selected_service as isize;
        self.view.selected_service = (cur + delta).rem_euclid(n) as usize;
    }

    fn open_selected_service(&mut self) {
        let link = match &self.view.services {
            Panel::Ready(cards) => cards
                .get(self.view.selected_service)
                .and_then(|c| c.link.clone()),
            _ => None,
        };
        let Some(url) = link else { return };
        if let Err(e) = open_external(&url) {
            warn!(%url, error = %e, "could not open link");
            self.view.notice = Some(Notice {
                kind: NoticeKind::Error,
                text: format!("Could not open {url}: {e}"),
            });
        }
    }
}

async fn reconnect_timer(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

/// Hand a URL to the desktop's opener, detached from our terminal.
fn open_external(url: &str) -> io::Result<()> {
    #[cfg(target_os = "macos")]
    let mut cmd = std::process::Command::new("open");
    #[cfg(windows)]
    let mut cmd = {
        let mut c = std::process::Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    };
    #[cfg(all(not(target_os = "macos"), not(windows)))]
    let mut cmd = std::process::Command::new("xdg-open");

    cmd.arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}

use crate::api::{BlogApi, GraphqlClient};
use crate::auth::{HostedIdentity, IdentityProvider};
use crate::config::Config;
use crate::shutdown::ShutdownCoordinator;
use crate::ui::app::{App, UiCommand};
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use crate::ui::worker::{subscribe_auth_events, Worker};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

const COMMAND_BUFFER: usize = 64;
const WORKER_DRAIN: Duration = Duration::from_secs(2);

pub fn run(config: Config) -> io::Result<()> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("blogdeck-worker")
        .build()?;
    let shutdown = ShutdownCoordinator::new();

    let identity: Arc<dyn IdentityProvider> = Arc::new(
        HostedIdentity::new(&config.identity, config.api.request_timeout())
            .map_err(io::Error::other)?,
    );
    let api: Arc<dyn BlogApi> = Arc::new(
        GraphqlClient::from_config(&config.api, Arc::clone(&identity))
            .map_err(io::Error::other)?,
    );
    tracing::info!(
        endpoint = %config.api.endpoint,
        auth_mode = %config.api.auth_mode_str,
        "starting"
    );

    let tick_rate = config.ui.tick_rate();
    let events = EventHandler::new(tick_rate, shutdown.handle());

    let (command_tx, command_rx) = tokio::sync::mpsc::channel::<UiCommand>(COMMAND_BUFFER);
    let worker = Worker::new(api, Arc::clone(&identity), events.sender());
    rt.spawn(worker.run(command_rx, shutdown.handle()));
    let subscription = subscribe_auth_events(rt.handle(), identity.subscribe(), events.sender());

    let (mut terminal, guard) = setup_terminal()?;
    let mut app = App::new();
    app.set_command_sender(command_tx);
    app.mount();

    let result = event_loop(&mut terminal, &mut app, &events, tick_rate);

    shutdown.signal();
    drop(subscription);
    drop(guard);
    rt.shutdown_timeout(WORKER_DRAIN);
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    events: &EventHandler,
    tick_rate: Duration,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;
        if app.should_quit() {
            return Ok(());
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => handle_key(app, key),
            Ok(AppEvent::Tick) | Ok(AppEvent::Resize(_, _)) => {}
            Ok(AppEvent::BlogsLoaded { seq, blogs }) => app.on_blogs_loaded(seq, blogs),
            Ok(AppEvent::UserResolved { generation, user }) => {
                app.on_user_resolved(generation, user)
            }
            Ok(AppEvent::UserLookupFailed { generation }) => app.on_user_lookup_failed(generation),
            Ok(AppEvent::Auth(event)) => app.on_auth_event(event),
            Ok(AppEvent::LoginFailed(message)) => app.on_login_failed(message),
            Ok(AppEvent::Shutdown) => app.request_quit(),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }
    }
}

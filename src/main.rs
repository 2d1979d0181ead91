use crossbeam_channel::{Receiver, unbounded};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use flash_quiz::db::init_db;
use flash_quiz::logger;
use flash_quiz::models::NetResponse;
use flash_quiz::{
    AccountBackend, App, AppContext, Config, FirebaseClient, OpenTdbClient, Result, TriviaSource,
    spawn_net_worker,
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::time::Instant;

fn main() -> Result<()> {
    let config = Config::from_env()?;
    logger::init(&config.log_path());
    logger::log("Flash Quiz starting");

    let conn = init_db(&config.db_path())?;

    let trivia: Arc<dyn TriviaSource> = Arc::new(OpenTdbClient::new(&config.trivia_url)?);
    let accounts: Option<Arc<dyn AccountBackend>> = match &config.firebase_api_key {
        Some(key) => {
            let client: Arc<dyn AccountBackend> = Arc::new(FirebaseClient::new(
                key,
                config.firebase_project_id.as_deref(),
            )?);
            Some(client)
        }
        None => {
            logger::log("No Firebase API key configured, accounts disabled");
            None
        }
    };

    let (request_tx, request_rx) = unbounded();
    let (response_tx, response_rx) = unbounded();
    spawn_net_worker(trivia, accounts, response_tx, request_rx)?;

    let ctx = AppContext {
        accounts_enabled: config.accounts_enabled(),
        ..AppContext::default()
    };
    let mut app = App::new(conn, ctx, config.time_limit_secs, Some(request_tx));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &response_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        logger::log(&format!("Exited with error: {}", e));
    }
    logger::log("Flash Quiz exiting");
    result
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    net_rx: &Receiver<NetResponse>,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.draw(f))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key, Instant::now());
                }
            }
        }

        while let Ok(response) = net_rx.try_recv() {
            app.handle_net_response(response, Instant::now());
        }

        app.tick(Instant::now());

        if app.should_quit() {
            return Ok(());
        }
    }
}

use arcade::build_info;
use arcade::config::ArcadeConfig;
use arcade::input::Key;
use arcade::logging;
use arcade::session::{Session, SessionAction};
use arcade::ui::draw_ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

fn print_help() {
    println!("Arcade - Snake and Flappy Bird in the terminal\n");
    println!("Usage: arcade [options]\n");
    println!("Options:");
    println!("  --seed <n>       Seed the game RNG for a reproducible session");
    println!("  --config <path>  Load settings from a JSON file");
    println!("  --version        Show version information");
    println!("  --help           Show this help message");
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Run 'arcade --help' for usage.");
    std::process::exit(1);
}

struct CliArgs {
    seed: Option<u64>,
    config: Option<PathBuf>,
}

fn parse_args() -> CliArgs {
    let mut cli = CliArgs {
        seed: None,
        config: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--seed" => {
                let value = args.next().unwrap_or_else(|| usage_error("--seed needs a value"));
                match value.parse() {
                    Ok(seed) => cli.seed = Some(seed),
                    Err(_) => usage_error(&format!("Invalid seed: {}", value)),
                }
            }
            "--config" => {
                let value = args
                    .next()
                    .unwrap_or_else(|| usage_error("--config needs a path"));
                cli.config = Some(PathBuf::from(value));
            }
            other => usage_error(&format!("Unknown option: {}", other)),
        }
    }
    cli
}

fn main() -> arcade::Result<()> {
    let cli = parse_args();

    let mut config = match &cli.config {
        Some(path) => ArcadeConfig::load(path).unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(1);
        }),
        None => ArcadeConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    logging::init(&config)?;
    log::debug!("starting with {:?}", config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &config);

    // Cleanup terminal, even when the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &ArcadeConfig,
) -> arcade::Result<()> {
    let mut session = Session::new(config.seed);
    let frame_period = Duration::from_millis(config.frame_ms);
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| draw_ui(frame, &session))?;

        if event::poll(frame_period)? {
            if let Event::Key(key_event) = event::read()? {
                // Release and repeat events are reported on some platforms
                if key_event.kind == KeyEventKind::Press {
                    if key_event.code == KeyCode::Char('c')
                        && key_event.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        break;
                    }
                    match session.handle_key(Key::from(key_event.code)) {
                        Ok(SessionAction::Quit) => break,
                        Ok(SessionAction::Continue) => {}
                        Err(e) => {
                            log::error!("could not start game: {}", e);
                            session.return_to_menu();
                        }
                    }
                }
            }
        }

        let now = Instant::now();
        session.advance(now - last_frame);
        last_frame = now;
    }

    Ok(())
}

use clap::Parser;
use colored::Colorize;
use ratatui::{
    Terminal,
    crossterm::event::{self, Event},
};
use snippfy::app::{App, AppSettings};
use snippfy::cli::{self, Cli, Command, commands};
use snippfy::clipboard::SystemClipboard;
use snippfy::config::Config;
use snippfy::handlers;
use snippfy::logging::{self, LogConfig};
use snippfy::ui::terminal;
use std::error::Error;
use std::time::Duration;

/// Parses arguments, then either runs a one-shot command or the interactive
/// browser. Errors are printed in the CLI style and exit with status 1.
fn main() -> Result<(), Box<dyn Error>> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}  {} {:#}", "┃".bright_magenta(), "Error:".bright_red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_file = Config::locate(cli.config.as_deref())?;
    let config = Config::read(config_file.as_deref())?;
    let settings = cli::app_settings(&cli, &config);

    let mut log_config = LogConfig::from_verbosity(cli.verbose, cli.quiet);
    if cli.verbose == 0 && !cli.quiet {
        if let Some(level) = &config.log_level {
            log_config = log_config.with_level_name(level)?;
        }
    }
    if cli.is_tui() {
        log_config = log_config.with_log_file(logging::default_log_file()?);
    }
    logging::init_logging(&log_config)?;

    match &config_file {
        Some(path) => tracing::debug!(?path, "loaded config file"),
        None => tracing::debug!("no config file, using defaults"),
    }

    tracing::debug!(source = %settings.source, "starting");

    match cli.command {
        None | Some(Command::Tui) => run_tui(settings),
        Some(Command::List { tag, query }) => {
            commands::list_snippets(&settings, tag.as_deref(), &query.join(" "))
        }
        Some(Command::Show { id }) => commands::show_snippet(&settings, &id),
        Some(Command::Copy { id }) => commands::copy_snippet(&settings, &id),
        Some(Command::Tags { tree }) => commands::list_tags(&settings, tree),
    }
}

fn run_tui(settings: AppSettings) -> anyhow::Result<()> {
    let app = App::new(settings, Box::new(SystemClipboard::new()));
    terminal::with_terminal(|terminal| event_loop(terminal, app))
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> anyhow::Result<()> {
    loop {
        if app.needs_redraw {
            terminal.draw(|frame| app.render(frame))?;
            app.needs_redraw = false;
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if handlers::keys::handle_key_events(key, &mut app) {
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => app.needs_redraw = true,
                _ => {}
            }
        }

        app.tick();
    }
}

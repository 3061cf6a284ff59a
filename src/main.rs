use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tokio::net::TcpListener;

use sporlproxy::{
    bootstrap, config, error, info,
    server::{self, AppState},
    store::CredentialStore,
    success, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Path to the .env file holding credentials
    #[clap(long)]
    env_file: Option<PathBuf>,

    /// Port to listen on (overrides PORT)
    #[clap(long)]
    port: Option<u16>,

    /// Print the authorization URL instead of opening a browser
    #[clap(long)]
    no_browser: bool,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(Command::Completions(opt)) = cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let env_path = cli.env_file.unwrap_or_else(config::default_env_path);
    match config::load_env(&env_path).await {
        Ok(true) => info!("Loaded environment from {}", env_path.display()),
        Ok(false) => warning!(
            "No env file at {}, relying on process environment",
            env_path.display()
        ),
        Err(e) => error!("Cannot load environment. Err: {}", e),
    }

    let mut settings = match config::Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };
    if let Some(port) = cli.port {
        settings.port = port;
    }

    let store = match CredentialStore::open(&env_path).await {
        Ok(store) => store,
        Err(e) => error!("Cannot read credentials from {}. Err: {}", env_path.display(), e),
    };

    let addr = settings.server_addr();
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };

    let state = AppState::new(settings, store);
    success!(
        "Server running at {}/spotify",
        state.settings.public_base_url()
    );

    let server = tokio::spawn(server::start_api_server(listener, state.clone()));

    if let Err(e) = bootstrap::begin_authorization(
        &state.settings,
        &state.store,
        !cli.no_browser,
        webbrowser::open,
    )
    .await
    {
        warning!("Cannot start authorization: {}", e);
    }

    match server.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("Server stopped: {}", e),
        Err(e) => error!("Server task failed: {}", e),
    }
}

use crate::cli::{Args, Command};
use crate::config::{ConfigFile, Settings};
use crate::error::Result;
use crate::session::{require_session_name, SessionManager, Storage};
use crate::tmux::{terminal_size, TmuxManager, TmuxRunner};

pub async fn run_cli(args: Args) -> Result<()> {
    // Usage errors are reported before any file is read or created
    match &args.command {
        Command::Save { target_session, .. }
        | Command::Load { target_session, .. }
        | Command::New { target_session } => {
            require_session_name(target_session.as_deref())?;
        }
        Command::Ls { .. } => {}
    }

    let config = ConfigFile::load(args.config.as_deref()).await?;
    let settings = Settings::resolve(config, args.state_file)?;

    let manager = open_manager(&settings).await?;

    match args.command {
        Command::Ls { verbose } => handle_ls(&manager, verbose).await,

        Command::Save {
            target_session,
            current_command,
        } => handle_save(&manager, target_session.as_deref(), current_command).await,

        Command::Load {
            target_session,
            current_command,
        } => handle_load(&manager, target_session.as_deref(), current_command).await,

        Command::New { target_session } => handle_new(&manager, target_session.as_deref()).await,
    }
}

type Manager = SessionManager<TmuxRunner, Storage>;

async fn open_manager(settings: &Settings) -> Result<Manager> {
    let storage = Storage::open(&settings.state_file).await?;
    let runner = TmuxRunner::new(settings.tmux_bin.clone(), settings.socket_name.clone());
    Ok(SessionManager::new(TmuxManager::new(runner), storage))
}

async fn handle_ls(manager: &Manager, verbose: bool) -> Result<()> {
    let listing = manager.list(verbose).await?;
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

async fn handle_save(manager: &Manager, target: Option<&str>, current_command: bool) -> Result<()> {
    let windows = manager.save(target, current_command).await?;
    println!(
        "✓ Saved session: {} ({} windows)",
        target.unwrap_or_default(),
        windows.len()
    );
    println!("  Store: {}", manager.store().path().display());
    Ok(())
}

async fn handle_load(manager: &Manager, target: Option<&str>, current_command: bool) -> Result<()> {
    let count = manager.load(target, current_command).await?;
    println!(
        "✓ Loaded session: {} ({} windows)",
        target.unwrap_or_default(),
        count
    );
    Ok(())
}

async fn handle_new(manager: &Manager, target: Option<&str>) -> Result<()> {
    let size = terminal_size();
    manager.create(target, size).await?;
    println!(
        "✓ Created session: {} ({}x{})",
        target.unwrap_or_default(),
        size.cols,
        size.rows
    );
    Ok(())
}

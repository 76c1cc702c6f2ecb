use std::io;
use std::path::PathBuf;

use clap::Parser;
use taskpad::cli::{Command, run_command};
use taskpad::config::{Overrides, Settings, get_config_file_path};
use taskpad::controller::ListController;
use taskpad::error::Result;
use taskpad::list::ReconcilePolicy;
use taskpad::remote::HttpCollection;
use taskpad::ui::App;
use taskpad::wire::WireSchema;

#[derive(Parser)]
#[command(name = "taskpad")]
#[command(about = "A todo list client for a remote collection")]
struct Cli {
    #[arg(long, global = true, help = "Path to config.toml (default: ~/.taskpad/config.toml)")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Server root, e.g. http://127.0.0.1:8000")]
    base_url: Option<String>,
    #[arg(long, global = true, help = "Collection path segment under the base URL")]
    collection: Option<String>,
    #[arg(long, global = true, value_enum, help = "Field naming used by the server")]
    schema: Option<WireSchema>,
    #[command(subcommand)]
    command: Option<Command>,
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => get_config_file_path()?,
    };
    Settings::load(path)?
        .with_overrides(Overrides {
            base_url: cli.base_url.clone(),
            collection: cli.collection.clone(),
            schema: cli.schema,
        })
        .validate()
}

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = load_settings(&cli).map_err(|e| io::Error::other(e.to_string()))?;
    let remote = HttpCollection::new(&settings.base_url, &settings.collection, settings.schema)
        .map_err(|e| io::Error::other(e.to_string()))?;

    match cli.command {
        Some(command) => {
            let mut controller = ListController::new(remote);
            if let Err(e) = run_command(&mut controller, command, &mut io::stdout()).await {
                eprintln!("Error: {e}");
                return Err(io::Error::other(e.to_string()));
            }
        }
        None => {
            let mut terminal = ratatui::init();
            let mut app = App::new(remote, ReconcilePolicy::default());
            let app_result = app.run(&mut terminal);
            ratatui::restore();

            return app_result.map_err(|e| io::Error::other(e.to_string()));
        }
    }

    Ok(())
}

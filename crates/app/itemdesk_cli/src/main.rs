// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands, ItemsCommand};
use itemdesk_client::models::{Item, ItemInput};
use itemdesk_client::token::token_expiry;
use itemdesk_client::{ApiClient, AppStore, FileStorage};

mod cli;
mod logging;

fn main() -> Result<()> {
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    logging::init()?;

    let args = Cli::parse();

    if let Commands::Version = args.command {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let storage = match args.data_dir {
        Some(dir) => FileStorage::new(dir),
        None => FileStorage::default_location().ok_or(Error::NoDataDir)?,
    };
    let store = AppStore::new(ApiClient::new(&args.api_url)?, storage);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(execute(store, args.command))
}

async fn execute(mut store: AppStore<FileStorage>, command: Commands) -> Result<()> {
    match command {
        Commands::Version => {}
        Commands::Login { username, password } => {
            store.login(&username, &password).await;
            let state = store.state();
            if !state.is_authenticated {
                return Err(Error::Custom(state.auth_error.clone()));
            }
            println!("{}", state.auth_success);
        }
        Commands::Logout => {
            store.logout();
            println!("Logged out");
        }
        Commands::Status => status(&store),
        Commands::Items(command) => {
            if !store.state().is_authenticated {
                return Err(Error::NotLoggedIn);
            }
            items(&mut store, command).await?;
        }
    }
    Ok(())
}

fn status(store: &AppStore<FileStorage>) {
    let state = store.state();
    let Some(user) = state.user.as_ref().filter(|_| state.is_authenticated) else {
        println!("Not logged in");
        return;
    };
    match token_expiry(&state.token).flatten() {
        Some(exp) => println!("Logged in as {} until {}", user.username, exp.to_rfc3339()),
        None => println!("Logged in as {}", user.username),
    }
}

async fn items(store: &mut AppStore<FileStorage>, command: ItemsCommand) -> Result<()> {
    match command {
        ItemsCommand::List => {
            store.fetch_items().await;
            let state = store.state();
            if !state.items_error.is_empty() {
                return Err(Error::Custom(state.items_error.clone()));
            }
            if state.items.is_empty() {
                println!("No items");
            }
            for item in &state.items {
                print_item(item);
            }
        }
        ItemsCommand::Add { name, description } => {
            let item = store.create_item(&ItemInput { name, description }).await;
            report(store, item.as_ref())?;
        }
        ItemsCommand::Edit {
            id,
            name,
            description,
        } => {
            let item = store
                .update_item(id, &ItemInput { name, description })
                .await;
            report(store, item.as_ref())?;
        }
        ItemsCommand::Rm { id } => {
            let deleted = store.delete_item(id).await;
            let message = store.state().item_message.clone();
            if !deleted {
                return Err(Error::Custom(message));
            }
            println!("{message}");
        }
    }
    Ok(())
}

/// Print the outcome of a create or update.
fn report(store: &AppStore<FileStorage>, item: Option<&Item>) -> Result<()> {
    let message = store.state().item_message.clone();
    let Some(item) = item else {
        return Err(Error::Custom(message));
    };
    println!("{message}");
    print_item(item);
    Ok(())
}

fn print_item(item: &Item) {
    if item.description.is_empty() {
        println!("{:>6}  {}", item.id, item.name);
    } else {
        println!("{:>6}  {}  ({})", item.id, item.name, item.description);
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::{eyre::eyre, Result};
use serde::Serialize;
use serde_json::json;

use hrdesk::api::{ApiClient, ListParams};
use hrdesk::cache::EntityId;
use hrdesk::catalog::{self, Resource, ResourceKind};
use hrdesk::config::{Config, Credentials};
use hrdesk::dates;
use hrdesk::stores::payroll::EXPORT_FILENAME;
use hrdesk::{logging, Session, Stores};

#[derive(Parser, Debug)]
#[command(name = "hrdesk")]
#[command(about = "Command-line client for the HR backend")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/hrdesk/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Log to stderr instead of the log file
  #[arg(short, long)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List records of a resource
  List {
    resource: String,
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    page: Option<u64>,
    #[arg(long)]
    per_page: Option<u64>,
  },
  /// Show one record
  Get { resource: String, id: String },
  /// Show a resource's statistics
  Stats { resource: String },
  /// Delete one record
  Delete { resource: String, id: String },
  /// Today's attendance of the logged-in user
  Today,
  /// Download a payroll run as a spreadsheet
  ExportPayroll {
    id: String,
    #[arg(long)]
    out: Option<PathBuf>,
  },
  /// List known resource names
  Resources,
}

fn print_json(value: &impl Serialize) -> Result<()> {
  let text = serde_json::to_string_pretty(value).map_err(|e| eyre!("Failed to encode output: {}", e))?;
  println!("{}", text);
  Ok(())
}

fn find_resource(name: &str) -> Result<&'static Resource> {
  catalog::resolve(name).ok_or_else(|| eyre!("Unknown resource '{}'. Run `hrdesk resources` for the list.", name))
}

/// Install a token. Returns true when a session was opened by logging in,
/// so it can be closed again on exit.
async fn authenticate(client: &ApiClient, session: &Session) -> Result<bool> {
  match Config::credentials()? {
    Credentials::Token(token) => {
      client.set_token(token);
      Ok(false)
    }
    Credentials::Login { email, password } => {
      session
        .login(&email, &password)
        .await
        .map_err(|e| eyre!("Login failed: {}", e.display_message()))?;
      Ok(true)
    }
  }
}

/// Execute one subcommand against the stores.
async fn run(command: Command, stores: &Stores, config: &Config) -> Result<()> {
  match command {
    Command::List {
      resource,
      search,
      page,
      per_page,
    } => {
      let resource = find_resource(&resource)?;
      let store = resource.kind.store(stores);
      let mut params = ListParams::new().per_page(per_page.unwrap_or(config.pagination.per_page));
      if let Some(search) = search {
        params = params.search(search);
      }
      if let Some(page) = page {
        params = params.page(page);
      }
      let page = if store.spec().paginated_path.is_some() {
        store.list_paginated(&params).await?
      } else {
        store.list(&params).await?
      };
      print_json(&page)?;
    }
    Command::Get { resource, id } => {
      let resource = find_resource(&resource)?;
      let id = EntityId::from(id);
      match resource.kind.store(stores).get(&id).await? {
        Some(record) => print_json(&record)?,
        None => return Err(eyre!("{} {} not found", resource.name, id)),
      }
    }
    Command::Stats { resource } => {
      let resource = find_resource(&resource)?;
      let stats = match resource.kind {
        ResourceKind::FixedCosts => {
          let fixed = &stores.finance.fixed_costs;
          fixed
            .list_paginated(&ListParams::new().per_page(config.pagination.per_page))
            .await?;
          serde_json::to_value(fixed.summary()).map_err(|e| eyre!("Failed to encode summary: {}", e))?
        }
        ResourceKind::Credentials => {
          stores.credentials.list(&ListParams::new()).await?;
          stores.credentials.statistics()
        }
        kind => kind.store(stores).fetch_statistics().await?,
      };
      print_json(&stats)?;
    }
    Command::Delete { resource, id } => {
      let resource = find_resource(&resource)?;
      let store = resource.kind.store(stores);
      store.delete(&EntityId::from(id)).await?;
      print_json(&json!({"message": store.state().success()}))?;
    }
    Command::Today => {
      let record = stores.attendance.today().await?;
      let worked = record.as_ref().and_then(|r| {
        dates::working_hours(r.str_field("check_in"), r.str_field("check_out"))
      });
      print_json(&json!({"attendance": record, "worked": worked}))?;
    }
    Command::ExportPayroll { id, out } => {
      let blob = stores.payroll.export_excel(&EntityId::from(id)).await?;
      let path = out.unwrap_or_else(|| PathBuf::from(blob.filename_or(EXPORT_FILENAME)));
      std::fs::write(&path, &blob.bytes).map_err(|e| eyre!("Failed to write {}: {}", path.display(), e))?;
      print_json(&json!({"path": path, "bytes": blob.bytes.len()}))?;
    }
    Command::Resources => {}
  }
  Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  if let Command::Resources = args.command {
    let names: Vec<_> = catalog::RESOURCES
      .iter()
      .map(|r| json!({"name": r.name, "aliases": r.aliases, "description": r.description}))
      .collect();
    return print_json(&names);
  }

  let config = Config::load(args.config.as_deref())?;
  let _log_guard = logging::init(&config.log, args.verbose)?;

  let client = ApiClient::new(&config.api).map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;
  let session = Session::new(client.clone());
  let logged_in = authenticate(&client, &session).await?;
  let stores = Stores::new(client);

  let outcome = run(args.command, &stores, &config).await;

  if logged_in {
    if let Some(request) = session.logout().await {
      // Give the revocation a chance to leave before the runtime shuts down.
      let _ = request.await;
    }
  }
  outcome
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hal_admin::provider::ListParams;
use hal_admin::schema::{Resource, Sort};
use hal_admin::{Admin, Identifier};
use hal_admin_client_reqwest::{ClientConfig, ReqwestClient};
use serde_json::{json, Value};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "hal-admin")]
#[command(about = "Inspect and operate a HAL API described by an admin descriptor")]
#[command(version)]
struct Cli {
    /// URL of the admin descriptor document
    #[arg(long, env = "HAL_ADMIN_DESCRIPTOR")]
    descriptor: String,

    /// Bearer token sent with every request
    #[arg(long, env = "HAL_ADMIN_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the declared resources and their views
    Resources,

    /// Fetch one page of records
    List {
        resource: String,

        #[arg(long, default_value_t = 1)]
        page: u64,

        #[arg(long, default_value_t = 25)]
        per_page: u64,

        /// Sort order, as `field` or `field:ASC|DESC`
        #[arg(long, value_parser = parse_sort)]
        sort: Option<Sort>,

        /// Filter passed as a query parameter, as `key=value`
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },

    /// Fetch one record
    Show { resource: String, id: String },

    /// Delete records
    Delete {
        resource: String,

        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let output = run(cli).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<Value> {
    let mut config = ClientConfig::new();
    if let Some(token) = cli.token {
        config = config.bearer_token(token);
    }
    if let Some(secs) = cli.timeout {
        config = config.timeout(Duration::from_secs(secs));
    }
    let client = ReqwestClient::with_config(&config)?;

    let admin = Admin::builder()
        .connect(client, &cli.descriptor)
        .await
        .with_context(|| format!("failed to load the admin from {}", cli.descriptor))?;
    let provider = admin.provider();
    tracing::debug!(
        descriptor = %cli.descriptor,
        resources = admin.schema().resources().count(),
        command = ?cli.command,
        "admin loaded"
    );

    let output = match cli.command {
        Command::Resources => Value::Array(admin.schema().map_resources(describe)),
        Command::List {
            resource,
            page,
            per_page,
            sort,
            filters,
        } => {
            let mut params = ListParams::new().paginate(page, per_page);
            params.sort = sort;
            for (key, value) in filters {
                params = params.filter(key, value);
            }

            let result = provider.list(&resource, params).await?;
            json!({
                "data": result.data,
                "total": result.total,
                "has_next_page": result.has_next_page,
            })
        }
        Command::Show { resource, id } => {
            Value::Object(provider.get_one(&resource, &parse_id(&id)).await?)
        }
        Command::Delete { resource, ids } => {
            let ids: Vec<Identifier> = ids.iter().map(|id| parse_id(id)).collect();
            let deleted = provider.delete_many(&resource, &ids).await?;
            json!({ "deleted": deleted })
        }
    };

    Ok(output)
}

fn describe(resource: &Resource) -> Value {
    let views = &resource.views;
    let declared: Vec<&str> = [
        ("list", views.list.is_some()),
        ("show", views.show.is_some()),
        ("create", views.create.is_some()),
        ("edit", views.edit.is_some()),
    ]
    .into_iter()
    .filter_map(|(name, present)| present.then_some(name))
    .collect();

    json!({
        "name": resource.name,
        "title": resource.title,
        "location": resource.location,
        "id_field": resource.id_field,
        "update_method": resource.update_method,
        "deletable": resource.deletable,
        "order_by": resource.orderable_fields,
        "infinite_pagination": resource.infinite_pagination,
        "file_inputs": resource.file_inputs(),
        "views": declared,
    })
}

/// Numeric ids are sent as numbers, anything else as a string.
fn parse_id(id: &str) -> Identifier {
    match id.parse::<i64>() {
        Ok(id) => Identifier::Int(id),
        Err(_) => Identifier::from(id),
    }
}

fn parse_sort(s: &str) -> Result<Sort, String> {
    s.parse().map_err(|e: hal_admin::Error| e.to_string())
}

fn parse_filter(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected `key=value`, got `{}`", s)),
    }
}

//! Pet store demo: an in-memory API that documents itself.
//!
//! ```bash
//! cargo run -p pet_store -- doc --format yaml
//! cargo run -p pet_store -- call POST /users --body '{"name":"Henry"}'
//! cargo run -p pet_store -- demo
//! ```

mod model;
mod routes;
mod store;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use http::Method;
use routespec::dispatcher::{HandlerRequest, HandlerResponse};
use routespec::logging::init_logging;
use routespec::RegistrarConfig;
use serde_json::{json, Value};
use tracing::info;

#[derive(Parser)]
#[command(name = "pet_store", about = "Self-documenting pet store")]
struct Cli {
    /// Log level (logs go to stderr)
    #[arg(long, env = "ROUTESPEC_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the generated OpenAPI document
    Doc {
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Dispatch one request against a fresh store and print the response
    Call {
        method: String,
        /// Request target, e.g. `/pets?withOwner=true`
        target: String,
        /// JSON request body
        #[arg(long)]
        body: Option<String>,
    },
    /// Walk through creating, reading and deleting a user and a pet
    Demo,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

fn print_response(method: &Method, target: &str, resp: &HandlerResponse) -> Result<()> {
    println!("{method} {target} -> {}", resp.status);
    if !resp.body.is_null() {
        println!("{}", serde_json::to_string_pretty(&resp.body)?);
    }
    Ok(())
}

fn request(method: Method, target: &str, body: Option<Value>) -> HandlerRequest {
    let req = HandlerRequest::new(method, target);
    match body {
        Some(body) => req.with_body(body),
        None => req,
    }
}

fn demo(app: &routes::App) -> Result<()> {
    let send = |method: Method, target: &str, body: Option<Value>| -> Result<Value> {
        let resp = app.router.dispatch(request(method.clone(), target, body));
        print_response(&method, target, &resp)?;
        Ok(resp.body)
    };

    let henry = send(Method::POST, "/users", Some(json!({ "name": "Henry" })))?;
    let henry_id = henry["id"].as_str().context("user id missing")?.to_string();

    let mittens = send(
        Method::POST,
        "/pets",
        Some(json!({ "name": "Mittens", "age": 5, "ownerId": henry_id })),
    )?;
    let pet_id = mittens["id"].as_str().context("pet id missing")?.to_string();

    send(Method::GET, &format!("/pets/{pet_id}?withOwner=true"), None)?;
    send(Method::GET, &format!("/pets?ownerId={henry_id}"), None)?;
    send(Method::POST, "/pets", Some(json!({ "age": "old" })))?;
    send(Method::DELETE, &format!("/pets/{pet_id}"), None)?;
    send(Method::GET, &format!("/pets/{pet_id}"), None)?;

    info!(
        pets = app.store.list_pets(None).len(),
        users = app.store.list_users().len(),
        "Demo finished"
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let config = RegistrarConfig::from_env().context("Failed to load registrar config")?;
    let app = routes::build_app(&config).context("Failed to declare routes")?;

    match cli.command {
        Command::Doc { format } => {
            let doc = app.registry.generate()?;
            let rendered = match format {
                Format::Json => doc.to_json_pretty()?,
                Format::Yaml => doc.to_yaml()?,
            };
            println!("{rendered}");
        }
        Command::Call {
            method,
            target,
            body,
        } => {
            let method: Method = method
                .to_ascii_uppercase()
                .parse()
                .with_context(|| format!("invalid method `{method}`"))?;
            let body = body
                .map(|raw| serde_json::from_str::<Value>(&raw))
                .transpose()
                .context("--body is not valid JSON")?;
            let resp = app.router.dispatch(request(method.clone(), &target, body));
            print_response(&method, &target, &resp)?;
            if resp.status >= 500 {
                bail!("server error {}", resp.status);
            }
        }
        Command::Demo => demo(&app)?,
    }
    Ok(())
}

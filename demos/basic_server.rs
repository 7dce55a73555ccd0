//! A basic server showing routes, parameters, groups and middleware.
//!
//! Run with `RUST_LOG=info cargo run --example basic_server` and set `PORT`
//! to listen somewhere other than 8080.

use log::info;
use microroute_rs::{Context, Engine, EngineConfig, ServerConfig, StatusCode};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the logger
    env_logger::init();

    let mut engine = Engine::with_defaults(EngineConfig { debug: true });

    engine.get("/", |c: &mut Context| {
        c.html(StatusCode::Ok, "<h1>Hello microroute</h1>");
    })?;

    // Query parameters
    engine.get("/hello", |c: &mut Context| {
        let name = c.get_param_with_default("name", "World");
        c.string(StatusCode::Ok, format!("Hello, {name}!"));
    })?;

    // Path parameters and a trailing wildcard
    engine.get("/hello/:name", |c: &mut Context| {
        let body = format!("Hello, {}! You're at {}", c.param("name").unwrap_or_default(), c.path());
        c.string(StatusCode::Ok, body);
    })?;
    engine.get("/assets/*filepath", |c: &mut Context| {
        let filepath = c.param("filepath").unwrap_or_default().to_string();
        c.json(StatusCode::Ok, &json!({ "filepath": filepath }));
    })?;

    {
        let mut v1 = engine.group("/v1");
        v1.use_middleware(|c: &mut Context| {
            c.set("api_version", 1u32);
            c.next();
        });

        v1.post("/login", |c: &mut Context| {
            let username = c.post_form("username").unwrap_or_default();
            let version = *c.must_get::<u32>("api_version");
            c.json(StatusCode::Ok, &json!({ "username": username, "version": version }));
        })?;

        let mut admin = v1.group("/admin");
        admin.use_middleware(|c: &mut Context| {
            if c.header("Authorization").is_none() {
                c.fail(StatusCode::Unauthorized, "missing credentials");
                return;
            }
            c.next();
        });
        admin.get("/panic", |_: &mut Context| panic!("handler blew up"))?;
    }

    let config = ServerConfig::from_env(None)?;
    info!("Starting server on http://{}", config.addr);

    engine.run(config).await?;

    Ok(())
}

//! CLI command implementations

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::auth::{hash_password, TokenService};
use crate::cli::{error, info, print_server_banner, print_token, success, warn};
use crate::config::{self, loader::CONFIG_FILENAME, Config};

/// Initialize a new shiftboard.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILENAME);

    if config_path.exists() {
        warn("shiftboard.toml already exists");
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success("Created shiftboard.toml");
    info("Set SHIFTBOARD_JWT_SECRET and run 'shiftboard serve' to start the API");

    Ok(())
}

/// Start the HTTP API server
pub async fn serve(config_path: Option<&Path>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load_config(config_path)?;

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    print_server_banner(&config, &host, port);

    if let Err(e) = crate::api::run_server(config, &host, port).await {
        error(&format!("Server failed: {}", e));
        return Err(e.into());
    }
    Ok(())
}

/// Print a signed token for `user_id`
pub async fn token(config_path: Option<&Path>, user_id: i64) -> Result<()> {
    let config = load_config(config_path)?;
    let tokens = TokenService::new(&config.auth);

    let now = chrono::Utc::now();
    let token = tokens.issue_at(user_id, now)?;
    let expires_at = now
        .checked_add_signed(tokens.max_age())
        .ok_or_else(|| anyhow::anyhow!("token expiry out of range"))?;

    print_token(&token, user_id, expires_at);
    Ok(())
}

/// Print a bcrypt hash of `password`
pub async fn hash_password_cmd(password: &str) -> Result<()> {
    println!("{}", hash_password(password)?);
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => config::load_config_from_path(path)?,
        None => config::load_config()?,
    };
    Ok(config)
}

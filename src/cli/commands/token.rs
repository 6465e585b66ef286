use crate::auth::TokenService;
use crate::config::AppConfig;

pub fn handle(config: &AppConfig, role: &str) -> anyhow::Result<()> {
    let tokens = TokenService::new(config.security.jwt_secret.as_bytes(), config.security.jwt_expiry_hours);
    let token = tokens.issue(role)?;
    println!("{}", token);
    Ok(())
}

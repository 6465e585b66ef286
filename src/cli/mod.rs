pub mod commands;

use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "banner-api")]
#[command(about = "Banner-serving REST API")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: ConfigArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags layered over the environment-derived configuration
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    #[arg(long, global = true, help = "Interface to bind")]
    pub host: Option<String>,

    #[arg(long, global = true, help = "HTTP port")]
    pub port: Option<u16>,

    #[arg(long, global = true, help = "PostgreSQL data source name")]
    pub dsn: Option<String>,

    #[arg(long, global = true, help = "JWT secret key")]
    pub secret_key: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve,

    #[command(about = "Issue a signed token for a role and print it")]
    Token {
        #[arg(long, default_value = "admin", help = "Role claim to embed")]
        role: String,
    },
}

impl ConfigArgs {
    pub fn apply(self, config: AppConfig) -> AppConfig {
        config.with_overrides(self.host, self.port, self.dsn, self.secret_key)
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.overrides.apply(AppConfig::from_env());
    config.validate()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::serve::handle(config).await,
        Commands::Token { role } => commands::token::handle(&config, &role),
    }
}

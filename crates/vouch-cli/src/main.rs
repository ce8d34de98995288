use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vouch_token::{Role, SigningSecret, UnknownRole};

mod commands;

use commands::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "vouch",
    version,
    about = "Issue, verify, and inspect signed access tokens"
)]
struct Cli {
    /// Signing secret (overrides the env file and process environment)
    #[arg(long, global = true)]
    secret: Option<String>,

    /// Path to the env file providing JWT_SECRET_KEY
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,

    /// Log secret resolution details to stderr
    #[arg(long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Issue a new access token
    Issue {
        /// User ID to bind into the token
        #[arg(short, long)]
        user_id: String,

        /// Company (tenant) ID to bind into the token
        #[arg(short, long)]
        company_id: String,

        /// User role
        #[arg(short, long, default_value = "sales_rep", value_parser = parse_role)]
        role: Role,

        /// Token lifetime in hours; zero or negative issues an already-expired token
        #[arg(short = 'e', long, default_value_t = 24)]
        expire_hours: i64,

        /// Additional claims as a JSON object; colliding keys overwrite built-ins
        #[arg(long)]
        claims: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Header name used by the header output format
        #[arg(long, default_value = "Authorization")]
        header_name: String,
    },

    /// Check whether a token is currently valid
    Verify {
        token: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show the claims carried by a token
    Inspect {
        token: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn parse_role(s: &str) -> Result<Role, UnknownRole> {
    s.parse()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let secret = SigningSecret::resolve(cli.secret.as_deref(), &cli.env_file);

    match cli.cmd {
        Command::Issue {
            user_id,
            company_id,
            role,
            expire_hours,
            claims,
            format,
            header_name,
        } => commands::issue::run(
            &secret,
            &user_id,
            &company_id,
            role,
            expire_hours,
            claims.as_deref(),
            format,
            &header_name,
        ),

        Command::Verify { token, format } => commands::verify::run(&secret, &token, format),

        Command::Inspect { token, format } => commands::inspect::run(&secret, &token, format),
    }
}

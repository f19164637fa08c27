//! Operator CLI for the identity-provider facades.
//!
//! Connection settings come from `IDP_*` environment variables (see
//! `ProviderSettings`); each subcommand performs one facade call and prints
//! the resulting record as JSON. Failures print their normalised error
//! record to stderr.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, BufRead};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use idp_facade::domain::FacadeError;
use idp_facade::domain::params::{
    ListAuthEventsParams, ListGroupsParams, ListUsersParams, SignInParams,
};
use idp_facade::{ProviderSettings, build_admin_client, build_user_client};
use ortho_config::OrthoConfig;
use serde::Serialize;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

/// `idp-cli` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "idp-cli",
    about = "Exercise the identity-provider facades from the command line",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in with a password read from the first line of stdin.
    SignIn {
        /// Username or alias.
        #[arg(long)]
        username: String,
    },
    /// Exchange a refresh token for new tokens.
    Refresh {
        /// Refresh token from a previous sign-in.
        #[arg(long = "refresh-token")]
        refresh_token: String,
    },
    /// Show the user behind an `Authorization` header value.
    WhoAmI {
        /// `Bearer <token>` or a bare access token.
        #[arg(long)]
        authorization: String,
    },
    /// Show a user by name (privileged).
    AdminGetUser {
        /// Target username.
        #[arg(long)]
        username: String,
    },
    /// List pool users (privileged).
    ListUsers {
        /// Provider filter expression, e.g. `email ^= "a"`.
        #[arg(long)]
        filter: Option<String>,
        /// Page size.
        #[arg(long)]
        limit: Option<u32>,
        /// Token from a previous page.
        #[arg(long = "pagination-token")]
        pagination_token: Option<String>,
    },
    /// List pool groups (privileged).
    ListGroups {
        /// Page size.
        #[arg(long)]
        limit: Option<u32>,
        /// Token from a previous page.
        #[arg(long = "next-token")]
        next_token: Option<String>,
    },
    /// List a user's authentication events (privileged).
    AuthEvents {
        /// Target username.
        #[arg(long)]
        username: String,
        /// Page size.
        #[arg(long = "max-results")]
        max_results: Option<u32>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let settings = ProviderSettings::load_from_iter([OsString::from("idp-cli")])
        .map_err(|error| eyre!("failed to load provider settings: {error}"))?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    runtime.block_on(run(args.command, settings))
}

async fn run(command: Command, settings: ProviderSettings) -> Result<()> {
    match command {
        Command::SignIn { username } => {
            let password = read_password()?;
            let client = build_user_client(&settings)?;
            let params = SignInParams { username, password };
            emit(client.start_sign_in(&params).await)
        }
        Command::Refresh { refresh_token } => {
            let client = build_user_client(&settings)?;
            emit(client.refresh_session(&refresh_token).await)
        }
        Command::WhoAmI { authorization } => {
            let client = build_user_client(&settings)?;
            emit(client.get_current_user(&authorization).await)
        }
        Command::AdminGetUser { username } => {
            let client = build_admin_client(&settings)?;
            emit(client.admin_get_user(&username).await)
        }
        Command::ListUsers {
            filter,
            limit,
            pagination_token,
        } => {
            let client = build_admin_client(&settings)?;
            let params = ListUsersParams {
                filter,
                limit,
                pagination_token,
                attributes_to_get: Vec::new(),
            };
            emit(client.list_users(&params).await)
        }
        Command::ListGroups { limit, next_token } => {
            let client = build_admin_client(&settings)?;
            emit(client.list_groups(&ListGroupsParams { limit, next_token }).await)
        }
        Command::AuthEvents {
            username,
            max_results,
        } => {
            let client = build_admin_client(&settings)?;
            let params = ListAuthEventsParams {
                username,
                max_results,
                next_token: None,
            };
            emit(client.admin_list_user_auth_events(&params).await)
        }
    }
}

fn read_password() -> Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    io::stdin()
        .lock()
        .read_line(&mut line)
        .wrap_err("failed to read password from stdin")?;
    let trimmed = line.trim_end_matches(['\r', '\n']);
    if trimmed.is_empty() {
        return Err(eyre!("no password supplied on stdin"));
    }
    Ok(Zeroizing::new(trimmed.to_owned()))
}

fn emit<T: Serialize>(outcome: Result<T, FacadeError>) -> Result<()> {
    match outcome {
        Ok(record) => {
            let rendered =
                serde_json::to_string_pretty(&record).wrap_err("failed to render result")?;
            println!("{rendered}");
            Ok(())
        }
        Err(error) => {
            let rendered = serde_json::to_string_pretty(&error.info())
                .wrap_err("failed to render error")?;
            eprintln!("{rendered}");
            Err(error.into())
        }
    }
}

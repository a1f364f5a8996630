//! CLI commands: each subcommand is one of the client's views, a thin
//! wrapper over client-core. Command output goes to stdout;
//! diagnostics go through the logger.

pub mod auth;
pub mod datasets;
pub mod profile;

use crate::error::LeakscopeError;

use client_core::api::RegisterForm;
use client_core::config::AppConfig;
use client_core::session::SessionState;

use std::path::PathBuf;

const USAGE: &str = "\
leakscope - client for the data leakage detection service

USAGE:
    leakscope <command> [args]

COMMANDS:
    register <username> <password> <confirm-password> <mobile-number>
    login <username> <password>
    logout
    status
    datasets [--filter <text>] [--page <n>]
    upload <file>
    detect <dataset-id> [--out <dir>]
    profile <user-id>
";

pub fn print_usage() {
    print!("{USAGE}");
}

/// Value of `--flag <value>`, if present.
pub(crate) fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|index| args.get(index + 1))
        .cloned()
}

/// Arguments that are neither flags nor flag values.
pub(crate) fn positionals(args: &[String]) -> Vec<&str> {
    let mut positionals = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg.starts_with("--") {
            skip_next = true;
            continue;
        }
        positionals.push(arg.as_str());
    }
    positionals
}

/// Route a parsed command line to its handler.
pub async fn dispatch(
    state: &SessionState,
    config: &AppConfig,
    base_url: &str,
    args: &[String],
) -> Result<(), LeakscopeError> {
    let Some((command, rest)) = args.split_first() else {
        print_usage();
        return Err(LeakscopeError::usage("missing command"));
    };
    let positional = positionals(rest);

    match command.as_str() {
        "register" => match positional[..] {
            [username, password, confirm_password, mobile_number] => {
                auth::register(
                    state,
                    base_url,
                    RegisterForm {
                        username: username.to_string(),
                        password: password.to_string(),
                        confirm_password: confirm_password.to_string(),
                        mobile_number: mobile_number.to_string(),
                    },
                )
                .await
            }
            _ => Err(LeakscopeError::usage(
                "register <username> <password> <confirm-password> <mobile-number>",
            )),
        },

        "login" => match positional[..] {
            [username, password] => auth::login(state, base_url, username, password).await,
            _ => Err(LeakscopeError::usage("login <username> <password>")),
        },

        "logout" => auth::logout(state).await,

        "status" => auth::status(state).await,

        "datasets" => {
            let filter = flag_value(rest, "--filter");
            let page = match flag_value(rest, "--page") {
                Some(raw) => raw
                    .parse::<usize>()
                    .map_err(|_| LeakscopeError::usage("--page expects a number"))?,
                None => 1,
            };
            datasets::list(state, base_url, filter.as_deref(), page).await
        }

        "upload" => match positional[..] {
            [path] => datasets::upload(state, base_url, PathBuf::from(path).as_path()).await,
            _ => Err(LeakscopeError::usage("upload <file>")),
        },

        "detect" => match positional[..] {
            [raw_id] => {
                let dataset_id = raw_id
                    .parse::<u64>()
                    .map_err(|_| LeakscopeError::usage("detect expects a numeric dataset id"))?;
                let out_dir = flag_value(rest, "--out")
                    .map(PathBuf::from)
                    .or_else(|| config.downloads_dir.clone())
                    .unwrap_or_else(|| PathBuf::from("."));
                let written = datasets::detect(state, base_url, dataset_id, &out_dir).await?;
                println!("Saved {}", written.display());
                Ok(())
            }
            _ => Err(LeakscopeError::usage("detect <dataset-id> [--out <dir>]")),
        },

        "profile" => match positional[..] {
            [raw_user_id] => profile::show(state, base_url, raw_user_id).await,
            _ => Err(LeakscopeError::usage("profile <user-id>")),
        },

        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }

        other => {
            print_usage();
            Err(LeakscopeError::usage(format!("unknown command: {other}")))
        }
    }
}

//! Admin account and change history commands

use clap::Subcommand;

use crate::audit::AuditLogger;
use crate::crypto::{hash_password, HashParams, SecureString};
use crate::display::format_notifications;
use crate::error::{CartaError, CartaResult};

use super::{prompt_password, CliContext};

const MIN_PASSWORD_LEN: usize = 4;

/// Admin subcommands
#[derive(Subcommand)]
pub enum AdminCommands {
    /// Check the admin credentials
    Login,
    /// Replace the admin password
    SetPassword {
        /// New password; prompted for when absent
        #[arg(long, env = "CARTA_NEW_ADMIN_PASSWORD", hide_env_values = true)]
        new_password: Option<String>,
    },
}

/// Handle an admin command
pub fn handle_admin_command(ctx: &mut CliContext, cmd: AdminCommands) -> CartaResult<()> {
    match cmd {
        AdminCommands::Login => {
            ctx.open_admin_store()?;
            println!("Access granted.");
        }

        AdminCommands::SetPassword { new_password } => {
            ctx.open_admin_store()?;

            let password = match new_password {
                Some(password) => SecureString::from(password),
                None => prompt_new_password()?,
            };
            if password.chars().count() < MIN_PASSWORD_LEN {
                return Err(CartaError::Validation(format!(
                    "Password must be at least {} characters",
                    MIN_PASSWORD_LEN
                )));
            }

            ctx.settings.admin.password_hash = Some(hash_password(&password, HashParams::default())?);
            ctx.settings.save(&ctx.paths)?;
            println!("Admin password updated.");
        }
    }

    Ok(())
}

/// Show the change history from the audit log, newest first
pub fn handle_log_command(ctx: &CliContext, limit: usize) -> CartaResult<()> {
    let logger = AuditLogger::new(ctx.paths.audit_log());
    if !logger.exists() {
        println!("No changes recorded.");
        return Ok(());
    }

    let entries = logger.read_recent(limit)?;
    println!("{}", format_notifications(&entries).trim_end());
    Ok(())
}

fn prompt_new_password() -> CartaResult<SecureString> {
    let first = prompt_password("New admin password: ")?;
    let second = prompt_password("Confirm password: ")?;
    if first != second {
        return Err(CartaError::Validation("Passwords do not match".into()));
    }
    Ok(first)
}

use super::{open_pool, resolve_scope};
use crate::cli::parser::{Cli, Commands, UserAction};
use crate::config::Config;
use crate::core::user::UserLogic;
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::ui::messages::{info, success};
use crate::utils::formatting::yes_no;
use crate::utils::table::{Column, Table};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = &cli.command else {
        return Ok(());
    };

    let pool = open_pool(cfg)?;
    let conn = &pool.conn;

    match action {
        UserAction::Add {
            username,
            password,
            role,
            responsible,
        } => {
            let scope = resolve_scope(&pool, cli, None)?;
            let role = Role::from_code(role).ok_or_else(|| AppError::InvalidRole(role.clone()))?;

            let user = UserLogic::add(conn, &scope, username, password, role, *responsible)?;
            success(format!(
                "User '{}' created as {}{}",
                user.username,
                user.role.label(),
                if user.is_admin { " (admin)" } else { "" }
            ));
        }

        UserAction::List => {
            let users = UserLogic::list(conn)?;
            if users.is_empty() {
                info("No users found.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Username"),
                Column::left("Role"),
                Column::right("Clinician"),
                Column::left("Admin"),
            ]);
            for u in &users {
                table.add_row(vec![
                    u.id.to_string(),
                    u.username.clone(),
                    u.role.label().to_string(),
                    u.clinician_id.map(|c| c.to_string()).unwrap_or_default(),
                    yes_no(u.is_admin).to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        UserAction::Clinicians => {
            let clinicians = UserLogic::clinicians(conn)?;
            if clinicians.is_empty() {
                info("No clinicians found.");
                return Ok(());
            }

            let mut table = Table::new(vec![Column::right("ID"), Column::left("Name")]);
            for c in &clinicians {
                table.add_row(vec![c.id.to_string(), c.name.clone()]);
            }
            print!("{}", table.render());
        }

        UserAction::Promote { username } => {
            let scope = resolve_scope(&pool, cli, None)?;
            let user = UserLogic::promote(conn, &scope, username)?;
            success(format!("User '{}' is now a clinician", user.username));
        }

        UserAction::Grant { username } => {
            let scope = resolve_scope(&pool, cli, None)?;
            let user = UserLogic::set_admin(conn, &scope, username, true)?;
            success(format!("User '{}' is now an administrator", user.username));
        }

        UserAction::Revoke { username } => {
            let scope = resolve_scope(&pool, cli, None)?;
            let user = UserLogic::set_admin(conn, &scope, username, false)?;
            success(format!("User '{}' is no longer an administrator", user.username));
        }

        UserAction::Rename {
            username,
            new_username,
        } => {
            let scope = resolve_scope(&pool, cli, None)?;
            let user = UserLogic::rename(conn, &scope, username, new_username)?;
            success(format!("User '{}' renamed to '{}'", username, user.username));
        }

        UserAction::Passwd {
            username,
            current,
            new,
            confirm,
        } => {
            UserLogic::change_password(conn, username, current, new, confirm)?;
            success(format!("Password of '{}' changed", username));
        }
    }

    Ok(())
}

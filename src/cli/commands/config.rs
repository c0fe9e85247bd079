use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::path::Path;
use std::process::Command;

/// `$EDITOR`, then `$VISUAL`, then the platform default.
fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn open_in(editor: &str, path: &Path) -> bool {
    Command::new(editor)
        .arg(path)
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn edit(path: &Path, requested: Option<&str>) -> AppResult<()> {
    if !path.exists() {
        return Err(AppError::Config(format!(
            "{} does not exist, run `rclinic init` first",
            path.display()
        )));
    }

    let fallback = default_editor();
    let editor = requested.unwrap_or(fallback.as_str());

    if open_in(editor, path) {
        success(format!("Configuration edited with '{}'", editor));
        return Ok(());
    }

    if editor != fallback {
        warning(format!(
            "Editor '{}' not available, trying '{}'",
            editor, fallback
        ));
        if open_in(&fallback, path) {
            success(format!("Configuration edited with '{}'", fallback));
            return Ok(());
        }
    }

    Err(AppError::Config(format!(
        "no usable editor for {}",
        path.display()
    )))
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    let path = Config::config_file();

    if *print_config {
        info(format!("Configuration ({})", path.display()));
        println!("{}", cfg.to_yaml()?);
    }

    if *edit_config {
        edit(&path, editor.as_deref())?;
    }

    Ok(())
}

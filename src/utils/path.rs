use std::path::PathBuf;

/// Expand a leading `~` to the home directory. `--db` and `--file` values
/// usually come straight from the shell, already expanded; config files do not.
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path {
        "~" => Some(""),
        p => p.strip_prefix("~/").or_else(|| p.strip_prefix("~\\")),
    };

    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{confirm, warning};
use std::path::Path;

/// Refuse to clobber an existing output file unless `force` is set or the
/// operator agrees. Shared by exports and backups.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if force || !path.exists() {
        return Ok(());
    }

    warning(format!("'{}' already exists.", path.display()));

    if confirm("Overwrite it?")? {
        Ok(())
    } else {
        Err(AppError::Export(format!(
            "'{}' left untouched",
            path.display()
        )))
    }
}

//! Object storage layout for client documents and templates.
//!
//! Only the key computation lives here; uploading and listing belong to
//! whatever storage client consumes these keys.

use crate::errors::{AppError, AppResult};
use crate::models::document_type::{DocumentType, TemplateType};

pub const TEMPLATE_ROOT: &str = "modelos";

/// Trim the operator-supplied file name, drop a trailing `.pdf` and
/// replace spaces with `_`.
pub fn clean_file_name(raw: &str) -> AppResult<String> {
    let mut name = raw.trim();
    if name.to_ascii_lowercase().ends_with(".pdf") {
        name = name[..name.len() - 4].trim_end();
    }

    if name.is_empty() {
        return Err(AppError::Validation("document name cannot be empty".into()));
    }

    Ok(name.replace(' ', "_"))
}

fn join_prefix(prefix: &str, key: String) -> String {
    let prefix = prefix.trim().trim_end_matches('/');
    if prefix.is_empty() {
        key
    } else {
        format!("{}/{}", prefix, key)
    }
}

/// `{client}/{type}/{type}_{name}.pdf`
pub fn document_key(
    prefix: &str,
    client_name: &str,
    doc_type: DocumentType,
    file_name: &str,
) -> AppResult<String> {
    let client = client_name.trim();
    if client.is_empty() {
        return Err(AppError::Validation("client name cannot be empty".into()));
    }

    let folder = doc_type.folder();
    let name = clean_file_name(file_name)?;

    Ok(join_prefix(
        prefix,
        format!("{}/{}/{}_{}.pdf", client, folder, folder, name),
    ))
}

/// `modelos/{type}/{type}_{name}.pdf`
pub fn template_key(prefix: &str, template: TemplateType, file_name: &str) -> AppResult<String> {
    let folder = template.folder();
    let name = clean_file_name(file_name)?;

    Ok(join_prefix(
        prefix,
        format!("{}/{}/{}_{}.pdf", TEMPLATE_ROOT, folder, folder, name),
    ))
}

/// Folder of every document type for a client, e.g. `Ana/Laudos/`.
pub fn client_folders(prefix: &str, client_name: &str) -> Vec<String> {
    DocumentType::ALL
        .iter()
        .map(|t| join_prefix(prefix, format!("{}/{}/", client_name.trim(), t.folder())))
        .collect()
}

use super::{open_pool, resolve_scope};
use crate::cli::parser::{Cli, Commands, DocumentAction};
use crate::config::Config;
use crate::core::client::ClientLogic;
use crate::core::document::{client_folders, document_key, template_key};
use crate::errors::{AppError, AppResult};
use crate::models::document_type::{DocumentType, TemplateType};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Document { action } = &cli.command else {
        return Ok(());
    };

    let prefix = cfg.bucket_prefix.as_str();

    match action {
        DocumentAction::Key {
            client,
            doc_type,
            name,
        } => {
            let t = DocumentType::from_code(doc_type)
                .ok_or_else(|| AppError::InvalidDocumentType(doc_type.clone()))?;

            let pool = open_pool(cfg)?;
            let scope = resolve_scope(&pool, cli, None)?;
            let c = ClientLogic::resolve(&pool.conn, &scope, client)?;

            println!("{}", document_key(prefix, &c.name, t, name)?);
        }

        DocumentAction::Template {
            template_type,
            name,
        } => {
            let t = TemplateType::from_code(template_type)
                .ok_or_else(|| AppError::InvalidDocumentType(template_type.clone()))?;
            println!("{}", template_key(prefix, t, name)?);
        }

        DocumentAction::Folders { client } => {
            let pool = open_pool(cfg)?;
            let scope = resolve_scope(&pool, cli, None)?;
            let c = ClientLogic::resolve(&pool.conn, &scope, client)?;

            for folder in client_folders(prefix, &c.name) {
                println!("{}", folder);
            }
        }
    }

    Ok(())
}

use std::fs;
use std::path::PathBuf;

use pkgrecipe_core::{
    Environment, ExportItem, OutputHandler, OutputHandlerError, OutputHandlerResult,
};

/// Copies the item into a local directory as `<NAME>-<version><ext>`.
///
/// Reads `repo_dir` in addition to the usual item keys and sets
/// `exported_path`. Only plain files are supported.
pub struct LocalRepository;

impl OutputHandler for LocalRepository {
    fn name(&self) -> &str {
        "LocalRepository"
    }

    fn main(&mut self, env: &mut Environment) -> OutputHandlerResult<()> {
        let item = ExportItem::from_env(env)?;
        let repo_dir = env
            .get_str("repo_dir")
            .map(PathBuf::from)
            .ok_or_else(|| OutputHandlerError::MissingKey("repo_dir".to_string()))?;

        if !item.item_path.is_file() {
            return Err(OutputHandlerError::Failed(format!(
                "{} is not a file",
                item.item_path.display()
            )));
        }

        let extension = item
            .item_path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let destination = repo_dir.join(format!("{}-{}{}", item.name, item.version, extension));

        fs::create_dir_all(&repo_dir)?;
        fs::copy(&item.item_path, &destination)?;
        tracing::info!(
            item = %item.name,
            version = %item.version,
            destination = %destination.display(),
            "exported item"
        );

        env.insert("exported_path", destination.to_string_lossy().into_owned());
        Ok(())
    }
}

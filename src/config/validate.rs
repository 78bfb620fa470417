// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, WorkerError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::WorkerError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.runner, raw.placeholders))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_not_blank("[runner].index_import_path", cfg.runner.index_import_path.as_deref())?;
    ensure_not_blank("[placeholders].developer_dir", cfg.placeholders.developer_dir.as_deref())?;
    ensure_not_blank("[placeholders].sdkroot", cfg.placeholders.sdkroot.as_deref())?;
    Ok(())
}

fn ensure_not_blank(key: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if v.trim().is_empty() => Err(WorkerError::Config(format!(
            "{key} must not be empty; omit it to use the default"
        ))),
        _ => Ok(()),
    }
}

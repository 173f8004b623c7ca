use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use channel_logging::{channel_error, channel_info, channel_warn};
use monitor_core::SavedField;
use serde::{Deserialize, Serialize};

const FORM_FILENAME: &str = ".scrapewatch_form.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedField {
    name: String,
    value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedForm {
    fields: Vec<PersistedField>,
}

pub(crate) fn load_saved_fields(dir: &Path) -> Vec<SavedField> {
    let path = dir.join(FORM_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Vec::new();
        }
        Err(err) => {
            channel_warn!("Failed to read saved form from {:?}: {}", path, err);
            return Vec::new();
        }
    };

    let form: PersistedForm = match ron::from_str(&content) {
        Ok(form) => form,
        Err(err) => {
            channel_warn!("Failed to parse saved form from {:?}: {}", path, err);
            return Vec::new();
        }
    };

    channel_info!("Loaded saved form fields from {:?}", path);
    form.fields
        .into_iter()
        .map(|field| SavedField {
            name: field.name,
            value: field.value,
        })
        .collect()
}

pub(crate) fn save_fields(dir: &Path, fields: &BTreeMap<String, String>) {
    let form = PersistedForm {
        fields: fields
            .iter()
            .map(|(name, value)| PersistedField {
                name: name.clone(),
                value: value.clone(),
            })
            .collect(),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&form, pretty) {
        Ok(text) => text,
        Err(err) => {
            channel_error!("Failed to serialize saved form: {}", err);
            return;
        }
    };

    if let Err(err) = write_atomic(dir, FORM_FILENAME, &content) {
        channel_error!("Failed to write saved form to {:?}: {}", dir, err);
    }
}

/// Write-then-rename so a crash mid-save never truncates the stored form.
fn write_atomic(dir: &Path, filename: &str, content: &str) -> std::io::Result<()> {
    let tmp = dir.join(format!("{filename}.tmp"));
    fs::write(&tmp, content)?;
    fs::rename(&tmp, dir.join(filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut fields = BTreeMap::new();
        fields.insert("keywords".to_string(), "fintech".to_string());
        fields.insert("max_results".to_string(), "25".to_string());

        save_fields(dir.path(), &fields);
        let loaded = load_saved_fields(dir.path());

        assert_eq!(loaded.len(), 2);
        assert!(loaded
            .iter()
            .any(|field| field.name == "keywords" && field.value == "fintech"));
        assert!(loaded
            .iter()
            .any(|field| field.name == "max_results" && field.value == "25"));
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_saved_fields(dir.path()).is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(FORM_FILENAME), "not ron at all {{{").expect("write");
        assert!(load_saved_fields(dir.path()).is_empty());
    }
}

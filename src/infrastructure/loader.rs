//! Module input loading.

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::ir::Module;

pub struct ModuleLoader;

impl ModuleLoader {
    /// Read and deserialize a module description from a JSON file.
    pub fn load(path: &Path) -> Result<Module> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read module file: {}", path.display()))?;
        let module: Module = serde_json::from_str(&text)
            .with_context(|| format!("Invalid module JSON: {}", path.display()))?;
        Ok(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_reports_path_on_missing_file() {
        let err = ModuleLoader::load(Path::new("/nonexistent/module.json")).unwrap_err();
        assert!(format!("{}", err).contains("/nonexistent/module.json"));
    }

    #[test]
    fn test_load_reports_path_on_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = ModuleLoader::load(file.path()).unwrap_err();
        assert!(format!("{}", err).contains("Invalid module JSON"));
    }

    #[test]
    fn test_load_round_trips_minimal_module() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"name": "m.bc", "functions": []}"#).unwrap();
        let module = ModuleLoader::load(file.path()).unwrap();
        assert_eq!(module.name, "m.bc");
        assert!(module.functions.is_empty());
    }
}

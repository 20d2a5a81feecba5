//! Emitter configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    /// Name of the produced VIL module
    pub module_name: String,
    /// Warn about statements following a return. They are skipped either way.
    pub diagnose_unreachable_code: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            module_name: "main".to_string(),
            diagnose_unreachable_code: true,
        }
    }
}

impl EmitOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

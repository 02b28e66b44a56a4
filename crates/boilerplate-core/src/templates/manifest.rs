//! Template manifest types and parsing

use serde::{Deserialize, Serialize};

/// Variant used when `--template` is not given and no manifest names a default
pub const DEFAULT_VARIANT: &str = "main";

/// Directory of the built-in template under `<base>/templates/`
pub const DEFAULT_TEMPLATE_DIR: &str = "react-native-template-v1.0.0";

/// Entries never copied into a new project
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "node_modules",
    ".git",
    "Pods",
    "build",
    ".gradle",
    "DerivedData",
    ".DS_Store",
];

/// One template variant shipped with the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateVariant {
    /// Name passed to `init --template`
    pub name: String,

    /// Directory relative to the templates root
    pub path: String,

    /// Description shown when listing variants
    #[serde(default)]
    pub description: String,

    /// Minimum CLI version this template expects (semver)
    #[serde(default)]
    pub version: Option<String>,
}

/// Root template manifest (templates/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootManifest {
    /// Available template variants
    pub templates: Vec<TemplateVariant>,

    /// Variant used when none is requested
    #[serde(default)]
    pub default: Option<String>,

    /// Additional file or directory names skipped while copying
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for RootManifest {
    fn default() -> Self {
        Self {
            templates: vec![TemplateVariant {
                name: DEFAULT_VARIANT.to_string(),
                path: DEFAULT_TEMPLATE_DIR.to_string(),
                description: "React Native boilerplate".to_string(),
                version: None,
            }],
            default: None,
            exclude: Vec::new(),
        }
    }
}

impl RootManifest {
    pub fn default_variant(&self) -> &str {
        self.default.as_deref().unwrap_or(DEFAULT_VARIANT)
    }

    /// Find a variant by name (case-insensitive)
    pub fn variant(&self, name: &str) -> Option<&TemplateVariant> {
        self.templates
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn variant_names(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.name.as_str()).collect()
    }

    /// Default excludes followed by the manifest's own
    pub fn excludes(&self) -> Vec<String> {
        DEFAULT_EXCLUDES
            .iter()
            .map(|s| s.to_string())
            .chain(self.exclude.iter().cloned())
            .collect()
    }
}

use crate::decorate::Decorator;
use crate::error::{AgendaError, Result};
use crate::model::DayNumber;
use crate::render::{EntryRenderer, DEFAULT_TAG_STYLE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Agenda settings, stored in `<config dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgendaConfig {
    /// Keywords that mark a headline as finished
    #[serde(default = "default_done_keywords")]
    pub done_keywords: Vec<String>,

    /// Style tag applied to each todo keyword (e.g. "TODO" -> "todo")
    #[serde(default = "default_keyword_styles")]
    pub keyword_styles: BTreeMap<String, String>,

    /// Style tag applied to the `:tag:` suffix
    #[serde(default = "default_tag_style")]
    pub tag_style: String,
}

fn default_done_keywords() -> Vec<String> {
    vec!["DONE".to_string()]
}

fn default_keyword_styles() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("TODO".to_string(), "todo".to_string()),
        ("DONE".to_string(), "done".to_string()),
    ])
}

fn default_tag_style() -> String {
    DEFAULT_TAG_STYLE.to_string()
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            done_keywords: default_done_keywords(),
            keyword_styles: default_keyword_styles(),
            tag_style: default_tag_style(),
        }
    }
}

impl AgendaConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: AgendaConfig = serde_json::from_str(&content).map_err(|e| {
            AgendaError::Config(format!("{}: {}", config_path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if let Some(empty) = self.done_keywords.iter().find(|k| k.trim().is_empty()) {
            return Err(AgendaError::Config(format!(
                "done keywords must not be blank, got {:?}",
                empty
            )));
        }
        Ok(())
    }

    /// Decoration settings for a run on `today`.
    pub fn decorator(&self, today: DayNumber) -> Decorator {
        Decorator::new(today, self.done_keywords.iter().cloned())
            .with_keyword_styles(self.keyword_styles.clone())
    }

    pub fn renderer(&self) -> EntryRenderer {
        EntryRenderer::new(&self.tag_style)
    }
}

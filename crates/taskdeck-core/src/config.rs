use anyhow::{
  Context,
  anyhow
};
use serde::Deserialize;
use tracing::{
  error,
  info
};

use crate::task::{
  Category,
  Priority
};

pub const FALLBACK_CATEGORY: &str =
  "Personal";

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct AppConfig {
  #[serde(default)]
  pub version:           u32,
  #[serde(default)]
  pub categories:        Vec<Category>,
  #[serde(default)]
  pub default_priority:  Priority,
  #[serde(
    default = "default_countdown_presets"
  )]
  pub countdown_presets: Vec<u32>
}

fn default_countdown_presets() -> Vec<u32>
{
  vec![15, 25, 45, 60]
}

impl Default for AppConfig {
  fn default() -> Self {
    let category =
      |id: &str, name: &str, color: &str| {
        Category {
          id:    id.to_string(),
          name:  name.to_string(),
          color: color.to_string()
        }
      };
    Self {
      version:           1,
      categories:        vec![
        category(
          "personal",
          FALLBACK_CATEGORY,
          "#6366f1"
        ),
        category(
          "work", "Work", "#0ea5e9"
        ),
        category(
          "shopping", "Shopping",
          "#f59e0b"
        ),
        category(
          "health", "Health", "#10b981"
        ),
      ],
      default_priority:  Priority::Medium,
      countdown_presets:
        default_countdown_presets()
    }
  }
}

impl AppConfig {
  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let cfg: AppConfig =
      toml::from_str(raw).context(
        "failed to parse taskdeck config"
      )?;
    if cfg.categories.is_empty() {
      return Err(anyhow!(
        "taskdeck config defines no \
         categories"
      ));
    }
    if let Some(duplicate) =
      first_duplicate_name(
        &cfg.categories
      )
    {
      return Err(anyhow!(
        "category {duplicate:?} is \
         defined twice"
      ));
    }
    Ok(cfg)
  }

  /// Parses `raw`, falling back to the
  /// built-in defaults on any error.
  pub fn load_or_default(
    raw: &str
  ) -> Self {
    match Self::from_toml_str(raw) {
      | Ok(cfg) => {
        info!(
          version = cfg.version,
          categories = cfg.categories.len(),
          "loaded taskdeck config"
        );
        cfg
      }
      | Err(error) => {
        error!(error = %format!("{error:#}"), "invalid taskdeck config; using built-in defaults");
        Self::default()
      }
    }
  }

  pub fn default_category(&self) -> &str {
    self
      .categories
      .first()
      .map(|c| c.name.as_str())
      .unwrap_or(FALLBACK_CATEGORY)
  }
}

fn first_duplicate_name(
  categories: &[Category]
) -> Option<String> {
  categories
    .iter()
    .enumerate()
    .find(|(idx, c)| {
      categories[..*idx]
        .iter()
        .any(|prev| prev.name == c.name)
    })
    .map(|(_, c)| c.name.clone())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_categories_and_presets() {
    let raw = r##"
version = 2
countdown_presets = [10, 20]

[[categories]]
id = "work"
name = "Work"
color = "#0ea5e9"

[[categories]]
id = "home"
name = "Home"
"##;
    let cfg = AppConfig::from_toml_str(raw)
      .expect("valid config");
    assert_eq!(cfg.version, 2);
    assert_eq!(cfg.default_category(), "Work");
    assert_eq!(cfg.countdown_presets, vec![10, 20]);
    assert_eq!(cfg.categories[1].color, "#6366f1");
    assert_eq!(
      cfg.default_priority,
      Priority::Medium
    );
  }

  #[test]
  fn default_priority_is_read_from_toml() {
    let raw = r#"
default_priority = "high"

[[categories]]
id = "work"
name = "Work"
"#;
    let cfg = AppConfig::from_toml_str(raw)
      .expect("valid config");
    assert_eq!(
      cfg.default_priority,
      Priority::High
    );
  }

  #[test]
  fn unknown_default_priority_is_an_error() {
    let raw = r#"
default_priority = "urgent"

[[categories]]
id = "work"
name = "Work"
"#;
    assert!(
      AppConfig::from_toml_str(raw).is_err()
    );
  }

  #[test]
  fn empty_category_list_is_an_error() {
    let err =
      AppConfig::from_toml_str("version = 1")
        .expect_err("no categories");
    assert!(
      err.to_string().contains("no categories")
    );
  }

  #[test]
  fn duplicate_category_is_an_error() {
    let raw = r#"
[[categories]]
id = "a"
name = "Work"

[[categories]]
id = "b"
name = "Work"
"#;
    assert!(
      AppConfig::from_toml_str(raw).is_err()
    );
  }

  #[test]
  fn malformed_toml_falls_back_to_defaults(
  ) {
    let cfg =
      AppConfig::load_or_default("[[[");
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(
      cfg.default_category(),
      FALLBACK_CATEGORY
    );
  }
}

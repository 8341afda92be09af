//! Theme and configuration commands.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::cli::render::{Presenter, Status};
use crate::config::{find_config_file, Config, ThemeMode};

pub async fn cmd_theme(explicit: Option<&Path>, set: Option<&str>) -> anyhow::Result<()> {
    let path = theme_path(explicit);
    let stored = apply_theme(&path, set).await?;
    let theme = stored.display.theme;

    let presenter = Presenter::new(&stored.display.clone().with_env_overrides());
    println!(
        "{}",
        presenter.status_line(
            Status::Success,
            format!(
                "Theme set to {} ({})",
                presenter.highlight(theme.as_str()),
                path.display()
            )
        )
    );

    let overridden = std::env::var("DOCSCOPE_THEME")
        .ok()
        .and_then(|v| ThemeMode::from_str(&v))
        .filter(|env_theme| *env_theme != theme);
    if overridden.is_some() {
        println!(
            "{}",
            presenter.status_line(
                Status::Warn,
                "DOCSCOPE_THEME is set and overrides the saved theme"
            )
        );
    }
    Ok(())
}

/// Explicit path, else the discovered config file, else the default location.
fn theme_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(find_config_file)
        .unwrap_or_else(Config::default_path)
}

/// Toggle (or set) the theme stored in `path` and write it back. A missing
/// file starts from defaults and is created. Environment overrides are not
/// persisted.
async fn apply_theme(path: &Path, set: Option<&str>) -> anyhow::Result<Config> {
    let mut stored = if path.exists() {
        Config::read_file(path).await?
    } else {
        Config::default()
    };

    match set {
        Some(name) => {
            stored.display.theme = ThemeMode::from_str(name)
                .with_context(|| format!("Unknown theme '{}' (expected light or dark)", name))?;
        }
        None => {
            stored.display.toggle_theme();
        }
    }

    stored
        .save_to_path(path)
        .await
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(stored)
}

pub fn cmd_config_show(config: &Config) -> anyhow::Result<()> {
    match config.source_path {
        Some(ref path) => println!("# Loaded from {}", path.display()),
        None => println!("# No config file found, showing defaults"),
    }
    print!("{}", config.to_toml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_theme_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.toml");

        let stored = apply_theme(&path, None).await.unwrap();
        assert_eq!(stored.display.theme, ThemeMode::Dark);

        let reread = Config::read_file(&path).await.unwrap();
        assert_eq!(reread.display.theme, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn test_theme_toggles_and_keeps_other_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docscope.toml");
        std::fs::write(
            &path,
            "[service]\nendpoint = \"http://analysis:9000\"\n\n[display]\ntheme = \"dark\"\n",
        )
        .unwrap();

        let stored = apply_theme(&path, None).await.unwrap();
        assert_eq!(stored.display.theme, ThemeMode::Light);
        assert_eq!(stored.service.endpoint, "http://analysis:9000");

        let stored = apply_theme(&path, Some("dark")).await.unwrap();
        assert_eq!(stored.display.theme, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn test_theme_rejects_unknown_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docscope.toml");

        assert!(apply_theme(&path, Some("sepia")).await.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_theme_path_prefers_explicit() {
        let explicit = Path::new("/tmp/custom.yaml");
        assert_eq!(theme_path(Some(explicit)), explicit.to_path_buf());
    }
}

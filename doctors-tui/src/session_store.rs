use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};

fn root_path() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Cannot determine config directory")?
        .join("doctors-tui"))
}

pub fn token_path() -> Result<PathBuf> {
    Ok(root_path()?.join("token"))
}

fn secure_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
            .write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}

pub fn load_token() -> Result<Option<String>> {
    load_token_from(&token_path()?)
}

pub fn save_token(token: &str) -> Result<()> {
    save_token_to(&token_path()?, token)
}

pub fn clear_token() -> Result<()> {
    clear_token_at(&token_path()?)
}

fn load_token_from(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let token = std::fs::read_to_string(path).context("Failed to read token file")?;
    let token = token.trim();
    if token.is_empty() {
        return Ok(None);
    }
    Ok(Some(token.to_string()))
}

fn save_token_to(path: &Path, token: &str) -> Result<()> {
    secure_write(path, token.trim())
}

fn clear_token_at(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doctors-tui").join("token");

        assert_eq!(load_token_from(&path).unwrap(), None);

        save_token_to(&path, "  abc123\n").unwrap();
        assert_eq!(load_token_from(&path).unwrap().as_deref(), Some("abc123"));

        clear_token_at(&path).unwrap();
        assert!(!path.exists());
        clear_token_at(&path).unwrap();
    }

    #[test]
    fn blank_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "\n  \n").unwrap();

        assert_eq!(load_token_from(&path).unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        save_token_to(&path, "secret").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

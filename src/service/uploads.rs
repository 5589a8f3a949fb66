use crate::error::RecipeError;
use std::path::{Path, PathBuf};
use tracing::info;

/// Reduce a client-supplied filename to a flat, shell- and path-safe name.
///
/// Path separators become spaces, whitespace runs become `_`, anything
/// outside `[A-Za-z0-9._-]` is dropped and leading/trailing `.`/`_` are
/// stripped. Returns `None` when nothing usable remains.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let spaced: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Flat directory holding uploaded recipe images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<(), RecipeError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Write `bytes` under the sanitized form of `original_name`, replacing any
    /// file already there. Returns the stored name.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, RecipeError> {
        let name = sanitize_filename(original_name).ok_or(RecipeError::InvalidFilename)?;
        tokio::fs::write(self.dir.join(&name), bytes).await?;
        info!(image = %name, size = bytes.len(), "stored recipe image");
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn sanitize_keeps_simple_names() {
        assert_eq!(sanitize_filename("pie.jpg").as_deref(), Some("pie.jpg"));
        assert_eq!(
            sanitize_filename("My cool pic.png").as_deref(),
            Some("My_cool_pic.png")
        );
    }

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(
            sanitize_filename("../../../etc/passwd").as_deref(),
            Some("etc_passwd")
        );
        assert_eq!(
            sanitize_filename(r"C:\Users\me\cake.gif").as_deref(),
            Some("C_Users_me_cake.gif")
        );
    }

    #[test]
    fn sanitize_drops_unsafe_characters() {
        assert_eq!(
            sanitize_filename("tarte<tatin>;rm -rf.webp").as_deref(),
            Some("tartetatinrm_-rf.webp")
        );
        assert_eq!(sanitize_filename("crème.png").as_deref(), Some("crme.png"));
    }

    #[test]
    fn sanitize_rejects_empty_results() {
        assert_eq!(sanitize_filename(""), None);
        assert_eq!(sanitize_filename("../.."), None);
        assert_eq!(sanitize_filename("???"), None);
    }

    #[tokio::test]
    async fn save_writes_sanitized_file() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "recipe-box-uploads-{}-{}",
            std::process::id(),
            nanos
        ));
        let store = ImageStore::new(&dir);
        store.ensure_dir().await.expect("create upload dir");

        let name = store
            .save("../sneaky dir/pie.png", b"png-bytes")
            .await
            .expect("save image");
        assert_eq!(name, "sneaky_dir_pie.png");
        let written = std::fs::read(dir.join(&name)).expect("read back");
        assert_eq!(written, b"png-bytes");

        let err = store.save("//", b"x").await.unwrap_err();
        assert!(matches!(err, RecipeError::InvalidFilename));

        let _ = std::fs::remove_dir_all(&dir);
    }
}

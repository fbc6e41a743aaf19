use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use basketsync_core::cookie::MemoryCookieJar;
use basketsync_core::error::BasketSyncError;
use basketsync_core::traits::storage::CookieJar;

/// Cookie jar that survives between runs.
///
/// Cookies live in a [`MemoryCookieJar`]; every assignment is written back to
/// `path` as JSON so the next invocation sees it, like a browser profile.
pub struct FileCookieJar {
    path: PathBuf,
    inner: MemoryCookieJar,
}

impl FileCookieJar {
    /// Open the jar at `path`. A missing file is an empty jar.
    pub fn open(path: &Path) -> Result<Self, BasketSyncError> {
        let inner = if path.exists() {
            let text = fs::read_to_string(path)
                .map_err(|e| BasketSyncError::Storage(format!("read cookie jar failed: {e}")))?;
            MemoryCookieJar::from_json(&text)?
        } else {
            MemoryCookieJar::new()
        };

        debug!("Opened cookie jar at {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            inner,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), BasketSyncError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .map_err(|e| BasketSyncError::Storage(format!("create jar dir failed: {e}")))?;
        }
        fs::write(&self.path, self.inner.to_json()?)
            .map_err(|e| BasketSyncError::Storage(format!("write cookie jar failed: {e}")))?;
        debug!("Saved cookie jar to {}", self.path.display());
        Ok(())
    }
}

impl CookieJar for FileCookieJar {
    fn cookie_header(&self) -> Result<String, BasketSyncError> {
        self.inner.cookie_header()
    }

    fn apply(&self, assignment: &str) -> Result<(), BasketSyncError> {
        self.inner.apply(assignment)?;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basketsync_core::cookie::{read_cookie, write_cookie};
    use chrono::{Duration, Utc};

    #[test]
    fn test_missing_file_is_empty_jar() {
        let dir = tempfile::tempdir().unwrap();
        let jar = FileCookieJar::open(&dir.path().join("cookies.json")).unwrap();
        assert_eq!(jar.cookie_header().unwrap(), "");
    }

    #[test]
    fn test_cookie_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile").join("cookies.json");

        let jar = FileCookieJar::open(&path).unwrap();
        let expires = Utc::now() + Duration::days(30);
        write_cookie(&jar, "productData", r#"[{"sku":"A1","A1.qty":"1"}]"#, expires).unwrap();

        let reopened = FileCookieJar::open(&path).unwrap();
        assert_eq!(
            read_cookie(&reopened, "productData").unwrap().as_deref(),
            Some(r#"[{"sku":"A1","A1.qty":"1"}]"#)
        );
    }

    #[test]
    fn test_deleted_cookie_is_gone_after_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");

        let jar = FileCookieJar::open(&path).unwrap();
        jar.apply("productData=[1]").unwrap();
        jar.apply("productData=; expires=Thu, 01 Jan 1970 00:00:00 UTC").unwrap();

        let reopened = FileCookieJar::open(&path).unwrap();
        assert_eq!(read_cookie(&reopened, "productData").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FileCookieJar::open(&path),
            Err(BasketSyncError::Serialization(_))
        ));
    }
}

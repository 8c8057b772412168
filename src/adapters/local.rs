use crate::domain::model::User;
use crate::domain::ports::UserRepository;
use crate::utils::error::{RegistrationError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Writes each user to `<base_path>/<userId>.json`.
#[derive(Debug, Clone)]
pub struct LocalUserRepository {
    base_path: PathBuf,
}

impl LocalUserRepository {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn record_path(&self, user_id: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", user_id))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub async fn read_user(&self, user_id: &str) -> Result<User> {
        let data = tokio::fs::read(self.record_path(user_id)).await?;
        Ok(serde_json::from_slice(&data)?)
    }
}

impl UserRepository for LocalUserRepository {
    async fn create_user(&self, user: &User) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| RegistrationError::repository("Failed to create user directory", e))?;

        let data = serde_json::to_vec_pretty(user)?;
        let path = self.record_path(&user.user_id);

        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    RegistrationError::repository(format!("User {} already exists", user.user_id), e)
                }
                _ => RegistrationError::repository(format!("Failed to open {}", path.display()), e),
            })?;

        finish_record(&path, file, &data).await?;

        tracing::debug!("User record saved to {}", path.display());
        Ok(())
    }
}

/// Writes and flushes a freshly created record. A record that cannot be
/// written in full is removed so no unreadable file stays behind.
async fn finish_record<W>(path: &Path, mut writer: W, data: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = match writer.write_all(data).await {
        Ok(()) => writer.flush().await,
        Err(e) => Err(e),
    };

    if let Err(e) = written {
        drop(writer);
        if let Err(cleanup) = tokio::fs::remove_file(path).await {
            tracing::warn!("Could not remove partial record {}: {}", path.display(), cleanup);
        }
        return Err(RegistrationError::repository("Failed to write user record", e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tempfile::TempDir;

    /// Accepts a few bytes, then fails as a full disk would.
    struct FailingWriter {
        accepted: usize,
    }

    impl AsyncWrite for FailingWriter {
        fn poll_write(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<std::io::Result<usize>> {
            if self.accepted == 0 {
                let n = buf.len().min(4);
                self.accepted += n;
                Poll::Ready(Ok(n))
            } else {
                Poll::Ready(Err(std::io::Error::new(ErrorKind::Other, "disk full")))
            }
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_failed_write_removes_partial_record() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("u-1.json");
        std::fs::write(&path, b"{\"use").unwrap();

        let err = finish_record(&path, FailingWriter { accepted: 0 }, b"{\"userId\":\"u-1\"}")
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::RepositoryError { .. }));
        assert_eq!(err.to_string(), "Repository error: Failed to write user record");
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_complete_write_keeps_record() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("u-1.json");
        let file = tokio::fs::File::create(&path).await.unwrap();

        finish_record(&path, file, b"{}").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"{}");
    }
}

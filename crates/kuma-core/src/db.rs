// crates/kuma-core/src/db.rs - Local document and image database
//
// Backing store for the rich text document editor. Two record stores live
// under one versioned directory:
//
//   <root>/meta.json            {"name": "KumaCodeManagerDB", "version": 1}
//   <root>/documents/<id>.json  one document per file, overwritten on save
//   <root>/images/<id>.bin      raw image bytes, never overwritten
//   <root>/images/<id>.json     image metadata
//
// Documents reference images with `kuma-image://<id>` links inside their
// markdown content.
//
// The database opens lazily: the first operation creates the layout (or
// checks the version of an existing one) and later operations reuse it.

use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const DB_NAME: &str = "KumaCodeManagerDB";
pub const DB_VERSION: u32 = 1;

const STORE_DOCUMENTS: &str = "documents";
const STORE_IMAGES: &str = "images";
const META_FILE: &str = "meta.json";

/// URL scheme used for image links in document content
pub const IMAGE_SCHEME: &str = "kuma-image://";

static IMAGE_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"kuma-image://(img_[A-Za-z0-9_-]+)").expect("image reference pattern is valid")
});

/// Errors from the document database
#[derive(Error, Debug)]
pub enum DbError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Corrupt record {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Database {name} has version {found}, this build supports up to {supported}")]
    UnsupportedVersion {
        name: String,
        found: u32,
        supported: u32,
    },

    #[error("Invalid record id '{0}'")]
    InvalidId(String),

    #[error("Record '{0}' already exists")]
    Duplicate(String),

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Meta {
    name: String,
    version: u32,
}

/// A markdown document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentData {
    pub id: String,
    pub title: String,
    /// Markdown; images are linked as `kuma-image://<id>`
    pub content: String,
    /// Milliseconds since the Unix epoch
    pub updated_at: i64,
}

impl DocumentData {
    /// New document with a fresh id, stamped now
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: format!("doc_{}", Uuid::new_v4().simple()),
            title: title.into(),
            content: content.into(),
            updated_at: Utc::now().timestamp_millis(),
        }
    }

    /// Image ids linked from the content
    pub fn image_refs(&self) -> Vec<String> {
        image_refs(&self.content)
    }
}

/// Metadata stored next to each image blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMeta {
    pub id: String,
    pub created_at: i64,
    pub size: u64,
}

/// Extract every `kuma-image://<id>` reference, in order of appearance
pub fn image_refs(content: &str) -> Vec<String> {
    IMAGE_REF
        .captures_iter(content)
        .map(|c| c[1].to_string())
        .collect()
}

/// Markdown link text for an image id
pub fn image_link(id: &str) -> String {
    format!("![]({}{})", IMAGE_SCHEME, id)
}

/// Generate an image id: `img_<millis>_<9 base36 chars>`
pub fn new_image_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut bits = Uuid::new_v4().as_u128();
    let suffix: String = (0..9)
        .map(|_| {
            let c = ALPHABET[(bits % 36) as usize] as char;
            bits /= 36;
            c
        })
        .collect();

    format!("img_{}_{}", Utc::now().timestamp_millis(), suffix)
}

/// Handle to an on-disk document database
#[derive(Debug)]
pub struct Database {
    root: PathBuf,
    ready: OnceCell<()>,
}

impl Database {
    /// Handle for the database at `root`; nothing is touched until first use
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ready: OnceCell::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create or upgrade the layout and check the stored version
    pub async fn init(&self) -> DbResult<()> {
        self.ready.get_or_try_init(|| self.open()).await?;
        Ok(())
    }

    async fn open(&self) -> DbResult<()> {
        let meta_path = self.root.join(META_FILE);

        let stored = match tokio::fs::read_to_string(&meta_path).await {
            Ok(content) => Some(serde_json::from_str::<Meta>(&content).map_err(|source| {
                DbError::Corrupt {
                    path: meta_path.display().to_string(),
                    source,
                }
            })?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(source) => return Err(io_error(&meta_path, source)),
        };

        if let Some(meta) = &stored {
            if meta.version > DB_VERSION {
                return Err(DbError::UnsupportedVersion {
                    name: meta.name.clone(),
                    found: meta.version,
                    supported: DB_VERSION,
                });
            }
            if meta.version == DB_VERSION {
                debug!(root = %self.root.display(), "opened database");
                return Ok(());
            }
        }

        // Missing or older layout: create whatever stores are absent
        for store in [STORE_DOCUMENTS, STORE_IMAGES] {
            let dir = self.root.join(store);
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| io_error(&dir, e))?;
        }

        let meta = Meta {
            name: DB_NAME.to_string(),
            version: DB_VERSION,
        };
        write_json(&meta_path, &meta).await?;

        info!(
            root = %self.root.display(),
            from = stored.map(|m| m.version),
            to = DB_VERSION,
            "upgraded database"
        );
        Ok(())
    }

    /// Insert or replace a document
    pub async fn save_document(&self, doc: &DocumentData) -> DbResult<()> {
        self.init().await?;
        let path = self.record_path(STORE_DOCUMENTS, &doc.id, "json")?;
        write_json(&path, doc).await?;
        debug!(id = %doc.id, "saved document");
        Ok(())
    }

    pub async fn get_document(&self, id: &str) -> DbResult<Option<DocumentData>> {
        self.init().await?;
        let path = self.record_path(STORE_DOCUMENTS, id, "json")?;
        read_json(&path).await
    }

    /// All documents, most recently updated first
    pub async fn list_documents(&self) -> DbResult<Vec<DocumentData>> {
        self.init().await?;
        let dir = self.root.join(STORE_DOCUMENTS);
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| io_error(&dir, e))?;

        let mut documents = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(&dir, e))? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(doc) = read_json::<DocumentData>(&path).await? {
                    documents.push(doc);
                }
            }
        }

        documents.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
        Ok(documents)
    }

    /// Store an image and return its new id
    pub async fn save_image(&self, bytes: &[u8]) -> DbResult<String> {
        self.init().await?;
        let id = new_image_id();
        self.insert_image(&id, bytes).await?;
        Ok(id)
    }

    /// Store an image under a caller-chosen id; existing ids are refused
    ///
    /// The bytes are written to a temporary file and hard-linked into place,
    /// so a reader never sees a partial blob. If the metadata cannot be
    /// written the blob is removed again and the id stays free.
    pub async fn insert_image(&self, id: &str, bytes: &[u8]) -> DbResult<()> {
        self.init().await?;
        let blob_path = self.record_path(STORE_IMAGES, id, "bin")?;
        let meta_path = self.record_path(STORE_IMAGES, id, "json")?;
        let tmp_path = self
            .root
            .join(STORE_IMAGES)
            .join(format!(".{}.{}.tmp", id, Uuid::new_v4().simple()));

        if let Err(e) = tokio::fs::write(&tmp_path, bytes).await {
            discard(&tmp_path).await;
            return Err(io_error(&tmp_path, e));
        }
        let linked = tokio::fs::hard_link(&tmp_path, &blob_path).await;
        discard(&tmp_path).await;
        match linked {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(DbError::Duplicate(id.to_string()));
            }
            Err(e) => return Err(io_error(&blob_path, e)),
        }

        let meta = ImageMeta {
            id: id.to_string(),
            created_at: Utc::now().timestamp_millis(),
            size: bytes.len() as u64,
        };
        if let Err(e) = write_json(&meta_path, &meta).await {
            discard(&blob_path).await;
            return Err(e);
        }

        debug!(id, size = bytes.len(), "saved image");
        Ok(())
    }

    pub async fn get_image(&self, id: &str) -> DbResult<Option<Vec<u8>>> {
        self.init().await?;
        let path = self.record_path(STORE_IMAGES, id, "bin")?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    pub async fn get_image_meta(&self, id: &str) -> DbResult<Option<ImageMeta>> {
        self.init().await?;
        read_json(&self.record_path(STORE_IMAGES, id, "json")?).await
    }

    fn record_path(&self, store: &str, id: &str, ext: &str) -> DbResult<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(DbError::InvalidId(id.to_string()));
        }
        Ok(self.root.join(store).join(format!("{}.{}", id, ext)))
    }
}

/// Best-effort removal of a file left by a failed write
async fn discard(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "failed to remove file"),
    }
}

fn io_error(path: &Path, source: io::Error) -> DbError {
    DbError::Io {
        path: path.display().to_string(),
        source,
    }
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> DbResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| io_error(path, e))
}

async fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> DbResult<Option<T>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(path, e)),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| DbError::Corrupt {
            path: path.display().to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn doc(id: &str, title: &str, updated_at: i64) -> DocumentData {
        DocumentData {
            id: id.to_string(),
            title: title.to_string(),
            content: String::new(),
            updated_at,
        }
    }

    #[tokio::test]
    async fn test_lazy_init_creates_layout() {
        let temp = TempDir::new().unwrap();
        let db = Database::new(temp.path().join("db"));
        assert!(!db.root().exists());

        assert!(db.get_document("missing").await.unwrap().is_none());
        assert!(db.root().join("documents").is_dir());
        assert!(db.root().join("images").is_dir());

        let meta: Meta =
            serde_json::from_str(&std::fs::read_to_string(db.root().join(META_FILE)).unwrap())
                .unwrap();
        assert_eq!(meta.name, DB_NAME);
        assert_eq!(meta.version, DB_VERSION);
    }

    #[tokio::test]
    async fn test_newer_version_is_refused() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(META_FILE),
            r#"{"name": "KumaCodeManagerDB", "version": 7}"#,
        )
        .unwrap();

        let db = Database::new(temp.path());
        assert!(matches!(
            db.init().await,
            Err(DbError::UnsupportedVersion { found: 7, .. })
        ));
    }

    #[tokio::test]
    async fn test_documents_upsert() {
        let temp = TempDir::new().unwrap();
        let db = Database::new(temp.path());

        db.save_document(&doc("a", "first", 1)).await.unwrap();
        db.save_document(&doc("a", "second", 2)).await.unwrap();
        db.save_document(&doc("b", "other", 3)).await.unwrap();

        assert_eq!(db.get_document("a").await.unwrap().unwrap().title, "second");

        let all = db.list_documents().await.unwrap();
        let ids: Vec<_> = all.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[tokio::test]
    async fn test_images_are_insert_only() {
        let temp = TempDir::new().unwrap();
        let db = Database::new(temp.path());

        let id = db.save_image(b"\x89PNG").await.unwrap();
        assert_eq!(db.get_image(&id).await.unwrap().as_deref(), Some(&b"\x89PNG"[..]));
        assert_eq!(db.get_image_meta(&id).await.unwrap().unwrap().size, 4);

        assert!(matches!(
            db.insert_image(&id, b"other").await,
            Err(DbError::Duplicate(_))
        ));
        assert_eq!(db.get_image(&id).await.unwrap().as_deref(), Some(&b"\x89PNG"[..]));
        assert!(db.get_image("img_0_missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_image_insert_leaves_no_blob() {
        let temp = TempDir::new().unwrap();
        let db = Database::new(temp.path());
        db.init().await.unwrap();

        // a directory where the metadata file should go makes the write fail
        let meta_dir = temp.path().join(STORE_IMAGES).join("img_1_taken.json");
        std::fs::create_dir(&meta_dir).unwrap();
        assert!(matches!(
            db.insert_image("img_1_taken", b"abc").await,
            Err(DbError::Io { .. })
        ));
        assert!(db.get_image("img_1_taken").await.unwrap().is_none());

        std::fs::remove_dir(&meta_dir).unwrap();
        db.insert_image("img_1_taken", b"abc").await.unwrap();
        assert_eq!(db.get_image_meta("img_1_taken").await.unwrap().unwrap().size, 3);

        let leftovers: Vec<_> = std::fs::read_dir(temp.path().join(STORE_IMAGES))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "{:?}", leftovers);
    }

    #[tokio::test]
    async fn test_ids_cannot_escape_the_store() {
        let temp = TempDir::new().unwrap();
        let db = Database::new(temp.path());
        assert!(matches!(
            db.get_document("../meta").await,
            Err(DbError::InvalidId(_))
        ));
    }

    #[test]
    fn test_image_id_format() {
        let id = new_image_id();
        let parts: Vec<&str> = id.splitn(3, '_').collect();
        assert_eq!(parts[0], "img");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_ne!(new_image_id(), new_image_id());
    }

    #[test]
    fn test_image_refs() {
        let content = format!(
            "# Notes\n{}\ntext ![](kuma-image://img_1_abc) and ![](https://x/y.png)",
            image_link("img_42_zzzzzzzzz")
        );
        assert_eq!(image_refs(&content), ["img_42_zzzzzzzzz", "img_1_abc"]);
        assert!(image_refs("no images").is_empty());

        // every id the store accepts is also found in links
        assert_eq!(image_refs(&image_link("img_custom-id")), ["img_custom-id"]);
    }
}

use super::project::Project;
use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Args;
use colored::Colorize;
use pagekit_editor::{
    ConfigPath, EditSession, MediaUploader, PageDocument, UploadError, UploadRequest,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Args)]
pub struct UploadArgs {
    pub page: String,
    pub id: String,

    /// Image list to append to, e.g. `images`
    pub path: String,

    /// Image files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Uploader that copies images into the site's media directory
pub struct LocalMediaStore {
    dir: PathBuf,
    url_prefix: String,
}

impl LocalMediaStore {
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.into(),
        }
    }
}

#[async_trait]
impl MediaUploader for LocalMediaStore {
    async fn upload(&self, request: UploadRequest) -> Result<String, UploadError> {
        if !request.content_type.starts_with("image/") {
            return Err(UploadError::Rejected {
                file_name: request.file_name,
                reason: format!("{} is not an image", request.content_type),
            });
        }

        let transport = |err: std::io::Error| UploadError::Transport(err.to_string());
        tokio::fs::create_dir_all(&self.dir).await.map_err(transport)?;
        tokio::fs::write(self.dir.join(&request.file_name), &request.bytes)
            .await
            .map_err(transport)?;

        debug!(file = %request.file_name, bytes = request.bytes.len(), "Stored upload");
        Ok(format!(
            "{}/{}",
            self.url_prefix.trim_end_matches('/'),
            request.file_name
        ))
    }
}

pub fn upload(args: UploadArgs, cwd: &str) -> Result<()> {
    let path = ConfigPath::parse(&args.path)?;
    let Project {
        config,
        catalog,
        mut store,
    } = Project::open(cwd)?;
    let uploader = LocalMediaStore::new(config.get_media_dir(cwd), config.media_dir.as_str());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let report = runtime.block_on(async {
        let mut files = Vec::with_capacity(args.files.len());
        let mut unreadable = 0;
        for file in &args.files {
            match read_upload(file).await {
                Ok(request) => files.push(request),
                Err(err) => {
                    warn!(file = %file.display(), error = %err, "Skipping unreadable file");
                    unreadable += 1;
                }
            }
        }

        let document = PageDocument::load(&store, &args.page)?;
        let mut session = EditSession::new(&catalog, document);
        session.validate_field(&args.id, &path)?;

        let mut report = session
            .upload_into_list(&args.id, path, files, &uploader)
            .await?;
        report.failed += unreadable;
        if session.is_dirty() {
            session.save(&mut store)?;
        }
        Ok::<_, anyhow::Error>(report)
    })?;

    info!(page = %args.page, added = report.added_count(), failed = report.failed, "Upload finished");
    for url in &report.added {
        println!("{} Added {}", "✓".green(), url);
    }
    if report.failed > 0 {
        println!("{} {} file(s) failed", "✗".red(), report.failed);
    }

    Ok(())
}

async fn read_upload(path: &Path) -> Result<UploadRequest> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .with_context(|| format!("Not a file: {}", path.display()))?;

    Ok(UploadRequest::new(file_name, content_type_for(path), bytes))
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("avif") => "image/avif",
        _ => "application/octet-stream",
    }
}

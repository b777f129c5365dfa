use crate::models::selection::{is_image_path, FileSelection, SelectedFile};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 读取单个图片文件
pub async fn load_selected_file(path: &Path) -> Result<SelectedFile> {
    let bytes = fs::read(path)
        .await
        .with_context(|| format!("无法读取图片文件: {}", path.display()))?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .with_context(|| format!("无效的文件路径: {}", path.display()))?;

    Ok(SelectedFile::new(file_name, bytes))
}

/// 按给定顺序读取文件，生成选择
pub async fn load_selection_from_paths(paths: &[PathBuf]) -> Result<FileSelection> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let file = load_selected_file(path).await?;
        tracing::debug!("已读取 {} ({} 字节)", file.file_name, file.bytes.len());
        files.push(file);
    }
    Ok(FileSelection::new(files))
}

/// 扫描文件夹中的所有图片（按文件名排序），生成选择
pub async fn load_selection_from_folder(folder_path: &str) -> Result<FileSelection> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut image_paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() && is_image_path(&path) {
            image_paths.push(path);
        }
    }

    if image_paths.is_empty() {
        tracing::warn!("在文件夹 {} 中没有找到图片文件", folder_path);
        return Ok(FileSelection::default());
    }

    image_paths.sort();
    tracing::info!("在 {} 中找到 {} 张图片", folder_path, image_paths.len());

    load_selection_from_paths(&image_paths).await
}

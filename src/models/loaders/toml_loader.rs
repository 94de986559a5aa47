use crate::error::{AppError, AppResult, FileError};
use crate::models::question::DropdownQuestion;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载单个题目定义
pub async fn load_toml_to_question(toml_file_path: &Path) -> AppResult<DropdownQuestion> {
    let path_str = toml_file_path.display().to_string();
    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;

    let question: DropdownQuestion =
        toml::from_str(&content).map_err(|e| AppError::toml_parse_failed(&path_str, e))?;

    Ok(question.with_file_path(toml_file_path.to_string_lossy().to_string()))
}

/// 从文件夹中加载所有题目定义
///
/// 单个文件加载失败只记录警告，不影响其他文件
pub async fn load_all_toml_files(folder_path: &str) -> AppResult<Vec<DropdownQuestion>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            paths.push(path);
        }
    }
    // 按文件名排序，保证处理顺序稳定
    paths.sort();

    let mut questions = Vec::new();
    for path in paths {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_toml_to_question(&path).await {
            Ok(question) => {
                tracing::debug!("成功加载题目输入 {}", question.name);
                questions.push(question);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_folder() {
        let err = load_all_toml_files("/definitely/not/here").await.unwrap_err();
        assert!(matches!(err, AppError::File(FileError::DirectoryNotFound { .. })));
    }

    #[tokio::test]
    async fn test_load_folder_skips_broken_files() {
        let dir = std::env::temp_dir().join(format!("stack_dropdown_loader_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("a.toml"),
            "name = \"ans1\"\nteacher_answer = \"[[x,true]]\"\n[parameters]\noptions = \"radio\"\n",
        )
        .unwrap();
        std::fs::write(dir.join("b.toml"), "name = ").unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let questions = load_all_toml_files(dir.to_str().unwrap()).await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].name, "ans1");
        assert_eq!(questions[0].parameters.options, "radio");
        assert!(questions[0].file_path.as_deref().unwrap().ends_with("a.toml"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}

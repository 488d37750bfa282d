use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;

use super::types::{Assessment, AssessmentFile, ItemType, PageLayout, PageSpec};
use super::{CourseStructure, FileStorage};

const GUIDES_DIR: &str = ".guides";
const STRUCTURE_FILE: &str = "structure.json";

/// Course workspace kept on the local filesystem under `<root>/.guides`.
#[derive(Debug, Clone)]
pub struct LocalGuides {
    root: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StructureIndex {
    pages: Vec<StructureEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructureEntry {
    id: String,
    title: String,
    #[serde(rename = "type")]
    item_type: ItemType,
    file: String,
    layout: PageLayout,
    close_all_tabs: bool,
    show_file_tree: bool,
}

impl LocalGuides {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn guides_dir(&self) -> PathBuf {
        self.root.join(GUIDES_DIR)
    }

    fn structure_path(&self) -> PathBuf {
        self.guides_dir().join(STRUCTURE_FILE)
    }

    /// Titles of every page, in course order.
    #[cfg(test)]
    pub async fn page_titles(&self) -> Result<Vec<String>> {
        let index = self.read_index().await?;
        Ok(index.pages.into_iter().map(|p| p.title).collect())
    }

    pub async fn save_assessment(
        &self,
        assessment: &Assessment,
        files: &[AssessmentFile],
    ) -> Result<()> {
        let path = self
            .guides_dir()
            .join("assessments")
            .join(format!("{}.json", assessment.task_id));
        let json = serde_json::to_string_pretty(assessment)
            .context("Failed to serialize assessment")?;
        write_creating_parents(&path, &json).await?;

        for file in files {
            let target = self.resolve(&file.path)?;
            write_creating_parents(&target, &file.content).await?;
        }

        log::debug!(
            "Saved assessment {} with {} file(s)",
            assessment.task_id,
            files.len()
        );
        Ok(())
    }

    async fn read_index(&self) -> Result<StructureIndex> {
        let path = self.structure_path();
        match fs::read_to_string(&path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(StructureIndex::default()),
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("Failed parsing {}", path.display())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(StructureIndex::default())
            }
            Err(err) => {
                Err(err).with_context(|| format!("Failed reading {}", path.display()))
            }
        }
    }

    async fn write_index(&self, index: &StructureIndex) -> Result<()> {
        let json =
            serde_json::to_string_pretty(index).context("Failed to serialize course structure")?;
        write_creating_parents(&self.structure_path(), &json).await
    }

    /// Resolves a course-relative path, refusing anything that escapes the root.
    fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let candidate = Path::new(relative);
        let escapes = candidate.components().any(|component| {
            matches!(
                component,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if relative.trim().is_empty() || escapes {
            bail!("Refusing to write outside the course directory: {relative}");
        }
        Ok(self.root.join(candidate))
    }
}

#[async_trait]
impl CourseStructure for LocalGuides {
    async fn add(&self, page: PageSpec, position: Option<usize>) -> Result<()> {
        let mut index = self.read_index().await?;

        let id = uuid::Uuid::new_v4().simple().to_string()[..8].to_string();
        let file = format!("content/{}-{}.md", slugify(&page.title), id);
        write_creating_parents(&self.guides_dir().join(&file), &page.content).await?;

        let entry = StructureEntry {
            id,
            title: page.title,
            item_type: page.item_type,
            file,
            layout: page.layout,
            close_all_tabs: page.close_all_tabs,
            show_file_tree: page.show_file_tree,
        };

        match position {
            Some(pos) => {
                let pos = pos.min(index.pages.len());
                index.pages.insert(pos, entry);
            }
            None => index.pages.push(entry),
        }

        self.write_index(&index).await
    }
}

#[async_trait]
impl FileStorage for LocalGuides {
    async fn add(&self, path: &str, content: &str) -> Result<()> {
        let target = self.resolve(path)?;
        write_creating_parents(&target, content).await
    }
}

async fn write_creating_parents(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Unable to create directory {}", parent.display()))?;
    }
    fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "page".to_string()
    } else {
        slug.to_string()
    }
}

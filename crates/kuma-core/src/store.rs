// crates/kuma-core/src/store.rs - Task/project/settings storage
//
// The workbench is the data every command handler operates on. It lives in
// memory while a dispatcher is running and is persisted as pretty-printed
// JSON after any command that changed it.
//
// FILE LAYOUT:
//   <workspace>/.kuma/workbench.json
//
// A missing file is an empty workbench, not an error, so a freshly
// initialised workspace needs no seed data.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::model::{
    NewTask, Project, ProjectOverview, ProjectPatch, SettingKey, Task, TaskFilter, TaskPatch,
};

/// Errors from loading or saving the workbench
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Corrupt workbench file {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize workbench: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// In-memory aggregate of tasks, projects and settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workbench {
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    settings: IndexMap<String, String>,
    #[serde(default)]
    last_task_id: u64,
    #[serde(default)]
    last_project_id: u64,
    #[serde(skip)]
    dirty: bool,
}

impl Workbench {
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn task(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn project(&self, id: u64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn project_by_name(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Tasks matching `filter`, ordered by id
    pub fn filter_tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.id);
        tasks
    }

    pub fn tasks_in_project(&self, name: &str) -> Vec<Task> {
        self.filter_tasks(&TaskFilter {
            project: Some(name.to_string()),
            ..Default::default()
        })
    }

    pub fn project_overview(&self, project: &Project) -> ProjectOverview {
        let tasks = self.tasks_in_project(&project.name);
        ProjectOverview {
            project: project.clone(),
            task_count: tasks.len(),
            done_count: tasks.iter().filter(|t| t.status.is_over()).count(),
        }
    }

    pub fn add_task(&mut self, new: NewTask, now: DateTime<Utc>) -> Task {
        self.last_task_id += 1;
        let task = Task {
            id: self.last_task_id,
            name: new.name,
            description: new.description,
            status: Default::default(),
            project: new.project,
            user: new.user,
            created_at: now,
            updated_at: now,
        };
        self.tasks.push(task.clone());
        self.dirty = true;
        task
    }

    /// Apply `patch` to task `id`; returns the updated task
    pub fn update_task(&mut self, id: u64, patch: TaskPatch, now: DateTime<Utc>) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;

        if let Some(name) = patch.name {
            task.name = name;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(project) = patch.project {
            task.project = Some(project);
        }
        task.updated_at = now;

        self.dirty = true;
        Some(task.clone())
    }

    pub fn remove_task(&mut self, id: u64) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        self.dirty = true;
        Some(self.tasks.remove(index))
    }

    pub fn add_project(&mut self, name: String, description: String, now: DateTime<Utc>) -> Project {
        self.last_project_id += 1;
        let project = Project {
            id: self.last_project_id,
            name,
            description,
            created_at: now,
            updated_at: now,
        };
        self.projects.push(project.clone());
        self.dirty = true;
        project
    }

    /// Apply `patch` to project `id`
    ///
    /// A rename is carried over to every task filed under the old name and
    /// to the `default_project` setting.
    pub fn update_project(
        &mut self,
        id: u64,
        patch: ProjectPatch,
        now: DateTime<Utc>,
    ) -> Option<Project> {
        let project = self.projects.iter_mut().find(|p| p.id == id)?;
        let old_name = project.name.clone();

        if let Some(name) = patch.name {
            project.name = name;
        }
        if let Some(description) = patch.description {
            project.description = description;
        }
        project.updated_at = now;
        let updated = project.clone();

        if updated.name != old_name {
            for task in self.tasks.iter_mut() {
                if task.project.as_deref() == Some(old_name.as_str()) {
                    task.project = Some(updated.name.clone());
                }
            }
            let key = SettingKey::DefaultProject.name();
            if self.settings.get(key).map(String::as_str) == Some(old_name.as_str()) {
                self.settings.insert(key.to_string(), updated.name.clone());
            }
        }

        self.dirty = true;
        Some(updated)
    }

    /// Remove a project; a `default_project` setting naming it is cleared
    pub fn remove_project(&mut self, id: u64) -> Option<Project> {
        let index = self.projects.iter().position(|p| p.id == id)?;
        let removed = self.projects.remove(index);

        let key = SettingKey::DefaultProject.name();
        if self.settings.get(key).map(String::as_str) == Some(removed.name.as_str()) {
            self.settings.shift_remove(key);
        }

        self.dirty = true;
        Some(removed)
    }

    /// Current value of a setting, falling back to its default
    pub fn setting(&self, key: SettingKey) -> &str {
        self.settings
            .get(key.name())
            .map(String::as_str)
            .unwrap_or_else(|| key.default_value())
    }

    /// Setting value, or `None` when unset or empty
    pub fn setting_opt(&self, key: SettingKey) -> Option<&str> {
        Some(self.setting(key)).filter(|v| !v.is_empty())
    }

    pub fn set_setting(&mut self, key: SettingKey, value: String) {
        self.settings.insert(key.name().to_string(), value);
        self.dirty = true;
    }

    /// Whether anything changed since the last load or save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

/// Where the workbench is persisted
#[derive(Debug, Clone)]
pub struct WorkbenchStore {
    path: Option<PathBuf>,
}

impl WorkbenchStore {
    /// Store backed by a JSON file
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Store that never touches disk
    pub fn in_memory() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub async fn load(&self) -> StoreResult<Workbench> {
        let Some(path) = &self.path else {
            return Ok(Workbench::default());
        };

        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no workbench file, starting empty");
                return Ok(Workbench::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        let workbench: Workbench =
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: path.display().to_string(),
                source,
            })?;

        debug!(
            path = %path.display(),
            tasks = workbench.tasks.len(),
            projects = workbench.projects.len(),
            "loaded workbench"
        );
        Ok(workbench)
    }

    /// Write the workbench, replacing the previous file in one rename
    pub async fn save(&self, workbench: &Workbench) -> StoreResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let io_err = |source| StoreError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(workbench)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, path).await.map_err(io_err)?;

        info!(path = %path.display(), "saved workbench");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn new_task(name: &str, project: Option<&str>) -> NewTask {
        NewTask {
            name: name.to_string(),
            project: project.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_ids_are_sequential_and_not_reused() {
        let mut wb = Workbench::default();
        let now = Utc::now();

        let a = wb.add_task(new_task("a", None), now);
        let b = wb.add_task(new_task("b", None), now);
        assert_eq!((a.id, b.id), (1, 2));

        wb.remove_task(b.id);
        let c = wb.add_task(new_task("c", None), now);
        assert_eq!(c.id, 3);
        assert!(wb.is_dirty());
    }

    #[test]
    fn test_project_rename_follows_tasks_and_settings() {
        let mut wb = Workbench::default();
        let now = Utc::now();

        let project = wb.add_project("old".into(), String::new(), now);
        wb.add_task(new_task("a", Some("old")), now);
        wb.set_setting(SettingKey::DefaultProject, "old".into());

        let patch = ProjectPatch {
            name: Some("new".into()),
            description: None,
        };
        wb.update_project(project.id, patch, now).unwrap();

        assert_eq!(wb.tasks()[0].project.as_deref(), Some("new"));
        assert_eq!(wb.setting(SettingKey::DefaultProject), "new");
        assert_eq!(wb.project_overview(wb.project(project.id).unwrap()).task_count, 1);
    }

    #[test]
    fn test_settings_fall_back_to_defaults() {
        let mut wb = Workbench::default();
        assert_eq!(wb.setting(SettingKey::ListDone), "true");
        assert_eq!(wb.setting_opt(SettingKey::User), None);

        wb.set_setting(SettingKey::User, "alice".into());
        assert_eq!(wb.setting_opt(SettingKey::User), Some("alice"));
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_workbench() {
        let temp = TempDir::new().unwrap();
        let store = WorkbenchStore::open(temp.path().join("workbench.json"));

        let wb = store.load().await.unwrap();
        assert!(wb.tasks().is_empty());
        assert!(!wb.is_dirty());
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let store = WorkbenchStore::open(temp.path().join("nested").join("workbench.json"));

        let mut wb = Workbench::default();
        wb.add_project("kuma".into(), "desc".into(), Utc::now());
        wb.add_task(new_task("write docs", Some("kuma")), Utc::now());
        store.save(&wb).await.unwrap();

        let reloaded = store.load().await.unwrap();
        assert_eq!(reloaded.tasks().len(), 1);
        assert_eq!(reloaded.projects()[0].name, "kuma");
        assert!(!reloaded.is_dirty());

        // id counters survive the round trip
        let mut reloaded = reloaded;
        let next = reloaded.add_task(new_task("next", None), Utc::now());
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("workbench.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = WorkbenchStore::open(&path).load().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }
}

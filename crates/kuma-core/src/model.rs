// crates/kuma-core/src/model.rs - Task, project and setting records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::args::parse_bool;
use crate::i18n::Locale;

/// Progress state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    pub fn is_over(self) -> bool {
        self == Self::Done
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Todo, Locale::Zh) => "待办",
            (Self::Doing, Locale::Zh) => "进行中",
            (Self::Done, Locale::Zh) => "已完成",
            (Self::Todo, Locale::En) => "todo",
            (Self::Doing, Locale::En) => "doing",
            (Self::Done, Locale::En) => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Locale::En))
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "todo" | "待办" => Ok(Self::Todo),
            "doing" | "in-progress" | "进行中" => Ok(Self::Doing),
            "done" | "over" | "已完成" => Ok(Self::Done),
            other => Err(other.to_string()),
        }
    }
}

/// A unit of work, optionally filed under a project and assigned to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    /// Name of the owning project
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new task
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub name: String,
    pub description: String,
    pub project: Option<String>,
    pub user: Option<String>,
}

/// Partial update for a task; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub project: Option<String>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.project.is_none()
    }
}

/// Criteria for `task-list`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub user: Option<String>,
    pub status: Option<TaskStatus>,
    pub project: Option<String>,
    pub over: Option<bool>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        self.user.as_ref().is_none_or(|u| task.user.as_ref() == Some(u))
            && self.status.is_none_or(|s| task.status == s)
            && self
                .project
                .as_ref()
                .is_none_or(|p| task.project.as_ref() == Some(p))
            && self.over.is_none_or(|over| task.status.is_over() == over)
    }
}

/// A named group of tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a project
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// A project together with its task counts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectOverview {
    pub project: Project,
    pub task_count: usize,
    pub done_count: usize,
}

/// Keys accepted by `setting-update`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// Assignee for tasks created without `-u`
    User,
    /// Project for tasks created without `-p`
    DefaultProject,
    /// Whether `task-list` shows finished tasks when no status filter is given
    ListDone,
}

impl SettingKey {
    pub const ALL: [SettingKey; 3] = [Self::User, Self::DefaultProject, Self::ListDone];

    pub fn name(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::DefaultProject => "default_project",
            Self::ListDone => "list_done",
        }
    }

    /// Value used when the setting was never written
    pub fn default_value(self) -> &'static str {
        match self {
            Self::User | Self::DefaultProject => "",
            Self::ListDone => "true",
        }
    }

    /// Normalise a user-supplied value, or `None` if it is not acceptable
    ///
    /// `none` unsets `user` and `default_project` (stored as empty).
    /// Project existence for `default_project` is checked by the handler,
    /// since it needs the workbench.
    pub fn normalize_value(self, raw: &str) -> Option<String> {
        match self {
            Self::User | Self::DefaultProject => {
                let value = raw.trim();
                if value.eq_ignore_ascii_case("none") {
                    Some(String::new())
                } else {
                    Some(value.to_string())
                }
            }
            Self::ListDone => parse_bool(raw).map(|b| b.to_string()),
        }
    }

    pub fn description(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::User, Locale::Zh) => "新建任务的默认用户",
            (Self::User, Locale::En) => "Default user for new tasks",
            (Self::DefaultProject, Locale::Zh) => "新建任务的默认项目",
            (Self::DefaultProject, Locale::En) => "Default project for new tasks",
            (Self::ListDone, Locale::Zh) => "任务列表是否显示已完成任务",
            (Self::ListDone, Locale::En) => "Whether task-list shows finished tasks",
        }
    }
}

impl FromStr for SettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|k| k.name() == key)
            .ok_or(key)
    }
}

/// A setting as shown by `setting-list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub description: String,
}

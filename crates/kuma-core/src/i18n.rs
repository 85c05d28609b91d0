// crates/kuma-core/src/i18n.rs - Localised strings for the command layer
//
// Every user-facing string produced by the command core comes from this
// module. The tables are plain `match` expressions so that adding a command
// or a message without its translations is a compile error rather than a
// missing key discovered at runtime.
//
// SUPPORTED LOCALES:
// - zh: Simplified Chinese (default)
// - en: English

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::command::CommandId;

/// Errors from locale parsing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocaleError {
    #[error("Unsupported locale '{0}'. Must be one of: zh, en")]
    Unsupported(String),
}

/// Display language for command output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Zh,
    En,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" | "zh_cn" => Ok(Self::Zh),
            "en" | "en-us" | "en_us" => Ok(Self::En),
            other => Err(LocaleError::Unsupported(other.to_string())),
        }
    }
}

/// Help text for a command, keyed by its public (hyphenated) name
pub fn command_doc(id: CommandId, locale: Locale) -> &'static str {
    use CommandId::*;

    match locale {
        Locale::Zh => match id {
            TaskList => "获取所有的任务列表(参数[-u 用户名称] [-s 状态] [-p 项目名称] [-over 是否完成(boolean)])",
            TaskCreate => "创建一个任务(参数[-n 任务名称] [-p 项目名称] [-d 描述] [-u 用户名称])",
            TaskUpdate => "更新指定任务(参数[-i 任务ID] [-n 新任务名称] [-d 新描述] [-s 新状态] [-p 新项目])",
            TaskDelete => "删除指定任务(参数[-i 任务ID])",
            TaskDetail => "查看任务详情(参数[-i 任务ID])",
            ProjectList => "获取所有项目列表",
            ProjectCreate => "创建新项目(参数[-n 项目名称] [-d 项目描述])",
            ProjectUpdate => "更新指定项目(参数[-i 项目ID] [-n 新名称] [-d 新描述])",
            ProjectDelete => "删除指定项目(参数[-i 项目ID])",
            ProjectDetail => "查看项目详情(参数[-i 项目ID])",
            SettingList => "列出所有设置项",
            SettingUpdate => "更新设置项(参数[-k 键] [-v 值])",
            Help => "显示帮助信息",
            Clear => "清空命令历史",
        },
        Locale::En => match id {
            TaskList => "List tasks (args [-u user] [-s status] [-p project] [-over done(boolean)])",
            TaskCreate => "Create a task (args [-n name] [-p project] [-d description] [-u user])",
            TaskUpdate => "Update a task (args [-i task id] [-n name] [-d description] [-s status] [-p project])",
            TaskDelete => "Delete a task (args [-i task id])",
            TaskDetail => "Show task details (args [-i task id])",
            ProjectList => "List all projects",
            ProjectCreate => "Create a project (args [-n name] [-d description])",
            ProjectUpdate => "Update a project (args [-i project id] [-n name] [-d description])",
            ProjectDelete => "Delete a project (args [-i project id])",
            ProjectDetail => "Show project details (args [-i project id])",
            SettingList => "List all settings",
            SettingUpdate => "Update a setting (args [-k key] [-v value])",
            Help => "Show help",
            Clear => "Clear the command history",
        },
    }
}

/// Fixed labels: modal titles and view headings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    TaskCreated,
    TaskUpdated,
    TaskDeleted,
    TaskDetail,
    ProjectCreated,
    ProjectUpdated,
    ProjectDeleted,
    ProjectDetail,
    SettingUpdated,
    NoTasks,
    NoProjects,
}

impl Label {
    pub fn text(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::TaskCreated, Locale::Zh) => "创建任务",
            (Self::TaskCreated, Locale::En) => "Task created",
            (Self::TaskUpdated, Locale::Zh) => "更新任务",
            (Self::TaskUpdated, Locale::En) => "Task updated",
            (Self::TaskDeleted, Locale::Zh) => "删除任务",
            (Self::TaskDeleted, Locale::En) => "Task deleted",
            (Self::TaskDetail, Locale::Zh) => "任务详情",
            (Self::TaskDetail, Locale::En) => "Task details",
            (Self::ProjectCreated, Locale::Zh) => "创建项目",
            (Self::ProjectCreated, Locale::En) => "Project created",
            (Self::ProjectUpdated, Locale::Zh) => "更新项目",
            (Self::ProjectUpdated, Locale::En) => "Project updated",
            (Self::ProjectDeleted, Locale::Zh) => "删除项目",
            (Self::ProjectDeleted, Locale::En) => "Project deleted",
            (Self::ProjectDetail, Locale::Zh) => "项目详情",
            (Self::ProjectDetail, Locale::En) => "Project details",
            (Self::SettingUpdated, Locale::Zh) => "更新设置",
            (Self::SettingUpdated, Locale::En) => "Setting updated",
            (Self::NoTasks, Locale::Zh) => "暂无任务",
            (Self::NoTasks, Locale::En) => "No tasks",
            (Self::NoProjects, Locale::Zh) => "暂无项目",
            (Self::NoProjects, Locale::En) => "No projects",
        }
    }
}

/// Parameterised messages, mostly errors surfaced through command results
#[derive(Debug, Clone, PartialEq)]
pub enum Message<'a> {
    CommandNotFound(&'a str),
    MissingFlag(&'a str),
    MissingValue(&'a str),
    UnknownFlag(&'a str),
    UnexpectedToken(&'a str),
    InvalidValue { flag: &'a str, value: &'a str },
    TaskNotFound(u64),
    ProjectNotFound(&'a str),
    ProjectExists(&'a str),
    ProjectHasTasks { name: &'a str, count: usize },
    UnknownSetting(&'a str),
    InvalidSetting { key: &'a str, value: &'a str },
    NothingToUpdate,
    StorageFailure(&'a str),
}

impl Message<'_> {
    pub fn localize(&self, locale: Locale) -> String {
        match locale {
            Locale::Zh => self.zh(),
            Locale::En => self.en(),
        }
    }

    fn zh(&self) -> String {
        match self {
            Self::CommandNotFound(name) => format!("命令{}不存在", name),
            Self::MissingFlag(flag) => format!("缺少参数 {}", flag),
            Self::MissingValue(flag) => format!("参数 {} 缺少值", flag),
            Self::UnknownFlag(flag) => format!("无法识别的参数 {}", flag),
            Self::UnexpectedToken(token) => format!("多余的参数 {}", token),
            Self::InvalidValue { flag, value } => format!("参数 {} 的值无效: {}", flag, value),
            Self::TaskNotFound(id) => format!("任务{}不存在", id),
            Self::ProjectNotFound(name) => format!("项目{}不存在", name),
            Self::ProjectExists(name) => format!("项目{}已存在", name),
            Self::ProjectHasTasks { name, count } => {
                format!("项目{}下仍有{}个任务，无法删除", name, count)
            }
            Self::UnknownSetting(key) => format!("设置项{}不存在", key),
            Self::InvalidSetting { key, value } => format!("设置项{}的值无效: {}", key, value),
            Self::NothingToUpdate => "没有需要更新的字段".to_string(),
            Self::StorageFailure(detail) => format!("存储错误: {}", detail),
        }
    }

    fn en(&self) -> String {
        match self {
            Self::CommandNotFound(name) => format!("Command {} does not exist", name),
            Self::MissingFlag(flag) => format!("Missing required argument {}", flag),
            Self::MissingValue(flag) => format!("Argument {} requires a value", flag),
            Self::UnknownFlag(flag) => format!("Unrecognized argument {}", flag),
            Self::UnexpectedToken(token) => format!("Unexpected argument {}", token),
            Self::InvalidValue { flag, value } => {
                format!("Invalid value for {}: {}", flag, value)
            }
            Self::TaskNotFound(id) => format!("Task {} does not exist", id),
            Self::ProjectNotFound(name) => format!("Project {} does not exist", name),
            Self::ProjectExists(name) => format!("Project {} already exists", name),
            Self::ProjectHasTasks { name, count } => {
                format!("Project {} still has {} task(s) and cannot be deleted", name, count)
            }
            Self::UnknownSetting(key) => format!("Setting {} does not exist", key),
            Self::InvalidSetting { key, value } => {
                format!("Invalid value for setting {}: {}", key, value)
            }
            Self::NothingToUpdate => "Nothing to update".to_string(),
            Self::StorageFailure(detail) => format!("Storage error: {}", detail),
        }
    }
}

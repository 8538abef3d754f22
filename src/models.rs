use anyhow::{anyhow, bail, Result};
use serde::Serialize;

/// Task lifecycle states shown on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Done,
    ];

    /// Badge label as shown on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "К выполнению",
            TaskStatus::InProgress => "В работе",
            TaskStatus::Review => "На ревью",
            TaskStatus::Done => "Готово",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Todo => write!(f, "todo"),
            TaskStatus::InProgress => write!(f, "in-progress"),
            TaskStatus::Review => write!(f, "review"),
            TaskStatus::Done => write!(f, "done"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "todo" | "to-do" => Ok(TaskStatus::Todo),
            "in-progress" | "in_progress" | "inprogress" => Ok(TaskStatus::InProgress),
            "review" => Ok(TaskStatus::Review),
            "done" => Ok(TaskStatus::Done),
            other => Err(anyhow!("unknown task status: '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Низкий",
            TaskPriority::Medium => "Средний",
            TaskPriority::High => "Высокий",
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskPriority::Low => write!(f, "low"),
            TaskPriority::Medium => write!(f, "medium"),
            TaskPriority::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for TaskPriority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" | "med" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(anyhow!("unknown task priority: '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Planning,
    Completed,
}

impl ProjectStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "Активен",
            ProjectStatus::Planning => "Планирование",
            ProjectStatus::Completed => "Завершён",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Active => write!(f, "active"),
            ProjectStatus::Planning => write!(f, "planning"),
            ProjectStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Online,
    Offline,
}

impl Presence {
    pub fn label(&self) -> &'static str {
        match self {
            Presence::Online => "🟢 Онлайн",
            Presence::Offline => "⚫ Офлайн",
        }
    }
}

/// Status filter for the task list: either one concrete status or the
/// "all" sentinel that matches every task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: TaskStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => *s == status,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "Все",
            StatusFilter::Only(s) => s.label(),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Only(s) => write!(f, "{}", s),
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "all" | "все" => Ok(StatusFilter::All),
            other => Ok(StatusFilter::Only(other.parse()?)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee: String,
    /// Free-text project name, not a referential key.
    pub project: String,
}

impl Task {
    pub fn new(
        id: u32,
        title: &str,
        status: TaskStatus,
        priority: TaskPriority,
        assignee: &str,
        project: &str,
    ) -> Self {
        Task {
            id,
            title: title.to_string(),
            status,
            priority,
            assignee: assignee.to_string(),
            project: project.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: u32,
    pub name: String,
    /// Completion percentage, 0..=100.
    pub progress: u8,
    pub tasks: u32,
    pub deadline: String,
    pub status: ProjectStatus,
}

impl Project {
    pub fn new(
        id: u32,
        name: &str,
        progress: u8,
        tasks: u32,
        deadline: &str,
        status: ProjectStatus,
    ) -> Result<Self> {
        if progress > 100 {
            bail!("project '{}': progress {} is out of range 0..=100", name, progress);
        }
        Ok(Project {
            id,
            name: name.to_string(),
            progress,
            tasks,
            deadline: deadline.to_string(),
            status,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamMember {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub avatar: String,
    pub tasks_completed: u32,
    pub presence: Presence,
}

impl TeamMember {
    pub fn new(
        id: u32,
        name: &str,
        role: &str,
        tasks_completed: u32,
        presence: Presence,
    ) -> Self {
        TeamMember {
            id,
            name: name.to_string(),
            role: role.to_string(),
            avatar: initials(name),
            tasks_completed,
            presence,
        }
    }
}

/// Avatar fallback: first letter of each name part.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_machine_forms() {
        assert_eq!("todo".parse::<TaskStatus>().unwrap(), TaskStatus::Todo);
        assert_eq!(
            "in-progress".parse::<TaskStatus>().unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!("Review".parse::<TaskStatus>().unwrap(), TaskStatus::Review);
        assert!("shipped".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn status_display_round_trips() {
        for status in TaskStatus::ALL {
            assert_eq!(status.to_string().parse::<TaskStatus>().unwrap(), status);
        }
    }

    #[test]
    fn filter_parses_sentinel_and_statuses() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("все".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "done".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(TaskStatus::Done)
        );
        assert!("bogus".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn filter_sentinel_matches_everything() {
        for status in TaskStatus::ALL {
            assert!(StatusFilter::All.matches(status));
        }
        assert!(StatusFilter::Only(TaskStatus::Done).matches(TaskStatus::Done));
        assert!(!StatusFilter::Only(TaskStatus::Done).matches(TaskStatus::Todo));
    }

    #[test]
    fn project_progress_is_bounded() {
        assert!(Project::new(1, "Backend", 100, 4, "15 дек", ProjectStatus::Active).is_ok());
        assert!(Project::new(1, "Backend", 120, 4, "15 дек", ProjectStatus::Active).is_err());
    }

    #[test]
    fn member_initials() {
        assert_eq!(initials("Алексей Иванов"), "АИ");
        assert_eq!(initials("Мария Смирнова"), "МС");
    }
}

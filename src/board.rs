use anyhow::{bail, Result};
use crate::models::{
    Presence, Project, ProjectStatus, StatusFilter, Task, TaskPriority, TaskStatus, TeamMember,
};

/// Summary counters rendered as the stat cards above the tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct BoardStats {
    pub active_tasks: usize,
    pub active_projects: usize,
    pub review_tasks: usize,
    pub done_tasks: usize,
}

/// Order-preserving status filter. The "all" sentinel returns the input
/// sequence unchanged; input is never mutated.
pub fn filter_tasks(tasks: &[Task], filter: StatusFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| filter.matches(t.status))
        .cloned()
        .collect()
}

pub struct Board {
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
    pub team: Vec<TeamMember>,
}

impl Board {
    pub fn new(tasks: Vec<Task>, projects: Vec<Project>, team: Vec<TeamMember>) -> Result<Self> {
        for project in &projects {
            if project.progress > 100 {
                bail!(
                    "project '{}': progress {} is out of range 0..=100",
                    project.name,
                    project.progress
                );
            }
        }
        Ok(Board {
            tasks,
            projects,
            team,
        })
    }

    /// The fixed department dataset shown on the dashboard.
    pub fn demo() -> Result<Self> {
        let tasks = vec![
            Task::new(1, "Реализация API авторизации", TaskStatus::InProgress, TaskPriority::High, "АИ", "Backend Platform"),
            Task::new(2, "Оптимизация базы данных", TaskStatus::Review, TaskPriority::High, "МС", "Backend Platform"),
            Task::new(3, "Дизайн новой админ-панели", TaskStatus::InProgress, TaskPriority::Medium, "ЕК", "Admin Dashboard"),
            Task::new(4, "Настройка CI/CD pipeline", TaskStatus::Todo, TaskPriority::Medium, "ДП", "DevOps"),
            Task::new(5, "Тестирование мобильной версии", TaskStatus::Done, TaskPriority::Low, "НВ", "Mobile App"),
            Task::new(6, "Интеграция с платёжной системой", TaskStatus::Todo, TaskPriority::High, "АИ", "Backend Platform"),
        ];

        let projects = vec![
            Project::new(1, "Backend Platform", 65, 12, "15 дек", ProjectStatus::Active)?,
            Project::new(2, "Admin Dashboard", 40, 8, "20 дек", ProjectStatus::Active)?,
            Project::new(3, "Mobile App", 85, 15, "10 дек", ProjectStatus::Active)?,
            Project::new(4, "DevOps Infrastructure", 30, 6, "25 дек", ProjectStatus::Planning)?,
        ];

        let team = vec![
            TeamMember::new(1, "Алексей Иванов", "Senior Backend Developer", 24, Presence::Online),
            TeamMember::new(2, "Мария Смирнова", "Database Specialist", 18, Presence::Online),
            TeamMember::new(3, "Елена Козлова", "UI/UX Designer", 31, Presence::Offline),
            TeamMember::new(4, "Дмитрий Петров", "DevOps Engineer", 15, Presence::Online),
            TeamMember::new(5, "Наталья Волкова", "QA Engineer", 22, Presence::Online),
        ];

        Board::new(tasks, projects, team)
    }

    pub fn filtered(&self, filter: StatusFilter) -> Vec<Task> {
        filter_tasks(&self.tasks, filter)
    }

    pub fn stats(&self) -> BoardStats {
        BoardStats {
            active_tasks: self.count_tasks(TaskStatus::InProgress),
            active_projects: self
                .projects
                .iter()
                .filter(|p| p.status == ProjectStatus::Active)
                .count(),
            review_tasks: self.count_tasks(TaskStatus::Review),
            done_tasks: self.count_tasks(TaskStatus::Done),
        }
    }

    fn count_tasks(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }

    pub fn print_tasks(&self, filter: StatusFilter, json: bool) -> Result<()> {
        let tasks = self.filtered(filter);
        if json {
            println!("{}", serde_json::to_string_pretty(&tasks)?);
            return Ok(());
        }
        if tasks.is_empty() {
            println!("Нет задач со статусом '{}'", filter.label());
            return Ok(());
        }
        for task in &tasks {
            println!(
                "{:>2}. {} [{}] [{}] {} • {}",
                task.id,
                task.title,
                task.status.label(),
                task.priority.label(),
                task.assignee,
                task.project
            );
        }
        Ok(())
    }

    pub fn print_projects(&self, json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(&self.projects)?);
            return Ok(());
        }
        for project in &self.projects {
            println!(
                "{:>2}. {} [{}] {}% • {} задач • дедлайн {}",
                project.id,
                project.name,
                project.status.label(),
                project.progress,
                project.tasks,
                project.deadline
            );
        }
        Ok(())
    }

    pub fn print_team(&self, json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(&self.team)?);
            return Ok(());
        }
        for member in &self.team {
            println!(
                "{:>2}. {} ({}) • {} задач завершено • {}",
                member.id,
                member.name,
                member.role,
                member.tasks_completed,
                member.presence.label()
            );
        }
        Ok(())
    }

    pub fn print_stats(&self) {
        let stats = self.stats();
        println!("Активные задачи:  {}", stats.active_tasks);
        println!("Проекты в работе: {}", stats.active_projects);
        println!("Задачи на ревью:  {}", stats.review_tasks);
        println!("Готово за неделю: {}", stats.done_tasks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filtered_tasks_all_share_the_selected_status() {
        let board = Board::demo().unwrap();
        for status in TaskStatus::ALL {
            let filtered = filter_tasks(&board.tasks, StatusFilter::Only(status));
            assert!(filtered.iter().all(|t| t.status == status));
        }
    }

    #[test]
    fn all_sentinel_returns_input_unchanged_and_is_idempotent() {
        let board = Board::demo().unwrap();
        let once = filter_tasks(&board.tasks, StatusFilter::All);
        assert_eq!(once.len(), board.tasks.len());
        let ids: Vec<u32> = once.iter().map(|t| t.id).collect();
        let original: Vec<u32> = board.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, original);

        let twice = filter_tasks(&once, StatusFilter::All);
        let again: Vec<u32> = twice.iter().map(|t| t.id).collect();
        assert_eq!(again, ids);
    }

    #[test]
    fn filter_preserves_input_order() {
        let board = Board::demo().unwrap();
        let todos = filter_tasks(&board.tasks, StatusFilter::Only(TaskStatus::Todo));
        let ids: Vec<u32> = todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 6]);
    }

    #[test]
    fn per_status_counts_sum_to_total() {
        let board = Board::demo().unwrap();
        let total: usize = TaskStatus::ALL
            .iter()
            .map(|&s| filter_tasks(&board.tasks, StatusFilter::Only(s)).len())
            .sum();
        assert_eq!(total, board.tasks.len());
    }

    #[test]
    fn stats_counts_are_bounded() {
        let board = Board::demo().unwrap();
        let stats = board.stats();
        assert!(stats.active_tasks <= board.tasks.len());
        assert!(stats.review_tasks <= board.tasks.len());
        assert!(stats.done_tasks <= board.tasks.len());
        assert!(stats.active_projects <= board.projects.len());
    }

    #[test]
    fn demo_dataset_stats() {
        let stats = Board::demo().unwrap().stats();
        assert_eq!(stats.active_tasks, 2);
        assert_eq!(stats.active_projects, 3);
        assert_eq!(stats.review_tasks, 1);
        assert_eq!(stats.done_tasks, 1);
    }

    #[test]
    fn review_filter_finds_the_database_task() {
        let board = Board::demo().unwrap();
        let review = filter_tasks(&board.tasks, StatusFilter::Only(TaskStatus::Review));
        assert_eq!(review.len(), 1);
        assert_eq!(review[0].title, "Оптимизация базы данных");
    }

    #[test]
    fn board_rejects_out_of_range_progress() {
        // Bypass Project::new to hit the Board-level check.
        let bad = Project {
            id: 9,
            name: "Legacy Migration".to_string(),
            progress: 120,
            tasks: 3,
            deadline: "30 дек".to_string(),
            status: ProjectStatus::Planning,
        };
        assert!(Board::new(Vec::new(), vec![bad], Vec::new()).is_err());
    }
}

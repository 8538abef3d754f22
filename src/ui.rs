use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use std::io;

use crate::board::Board;
use crate::models::{StatusFilter, Task, TaskPriority, TaskStatus};

const TAB_COUNT: usize = 3;

pub struct App {
    board: Board,
    pub current_tab: usize,
    pub filter: StatusFilter,
    pub visible_tasks: Vec<Task>,
    pub task_list_state: ListState,
    pub project_list_state: ListState,
    pub team_list_state: ListState,
    pub show_filter_popup: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(board: Board) -> Self {
        let visible_tasks = board.filtered(StatusFilter::All);
        App {
            board,
            current_tab: 0,
            filter: StatusFilter::All,
            visible_tasks,
            task_list_state: ListState::default(),
            project_list_state: ListState::default(),
            team_list_state: ListState::default(),
            show_filter_popup: false,
            should_quit: false,
        }
    }

    /// Single entry point for filter changes; recomputes the visible list
    /// and resets the selection.
    pub fn set_filter(&mut self, filter: StatusFilter) {
        log::debug!("filter changed to '{}'", filter);
        self.filter = filter;
        self.visible_tasks = self.board.filtered(filter);
        let selected = if self.visible_tasks.is_empty() {
            None
        } else {
            Some(0)
        };
        self.task_list_state.select(selected);
    }

    pub fn next_tab(&mut self) {
        self.current_tab = (self.current_tab + 1) % TAB_COUNT;
    }

    pub fn previous_tab(&mut self) {
        self.current_tab = if self.current_tab == 0 {
            TAB_COUNT - 1
        } else {
            self.current_tab - 1
        };
    }

    fn list_len(&self) -> usize {
        match self.current_tab {
            0 => self.visible_tasks.len(),
            1 => self.board.projects.len(),
            2 => self.board.team.len(),
            _ => 0,
        }
    }

    fn list_state(&mut self) -> &mut ListState {
        match self.current_tab {
            1 => &mut self.project_list_state,
            2 => &mut self.team_list_state,
            _ => &mut self.task_list_state,
        }
    }

    pub fn next_item(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let state = self.list_state();
        let i = match state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn previous_item(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let state = self.list_state();
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        state.select(Some(i));
    }

    pub fn open_filter_popup(&mut self) {
        self.show_filter_popup = true;
    }

    pub fn close_filter_popup(&mut self) {
        self.show_filter_popup = false;
    }

    pub fn handle_filter_input(&mut self, c: char) {
        let filter = match c {
            '1' => Some(StatusFilter::All),
            '2' => Some(StatusFilter::Only(TaskStatus::Todo)),
            '3' => Some(StatusFilter::Only(TaskStatus::InProgress)),
            '4' => Some(StatusFilter::Only(TaskStatus::Review)),
            '5' => Some(StatusFilter::Only(TaskStatus::Done)),
            _ => None,
        };
        if let Some(filter) = filter {
            self.set_filter(filter);
            self.close_filter_popup();
        }
    }
}

pub fn run_tui(board: Board) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(board);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                if app.show_filter_popup {
                    match key.code {
                        KeyCode::Esc => app.close_filter_popup(),
                        KeyCode::Char(c) => app.handle_filter_input(c),
                        _ => {}
                    }
                } else {
                    match key.code {
                        KeyCode::Char('q') => {
                            app.should_quit = true;
                        }
                        KeyCode::Tab => {
                            app.next_tab();
                        }
                        KeyCode::BackTab => {
                            app.previous_tab();
                        }
                        KeyCode::Down => {
                            app.next_item();
                        }
                        KeyCode::Up => {
                            app.previous_item();
                        }
                        KeyCode::Char('f') => {
                            if app.current_tab == 0 {
                                app.open_filter_popup();
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(f.area());

    render_stats(f, app, chunks[0]);

    let titles: Vec<Line> = ["Задачи", "Проекты", "Команда"]
        .iter()
        .cloned()
        .map(Line::from)
        .collect();

    let header = format!(
        "Технологический отдел — {}",
        chrono::Utc::now().format("%d.%m.%Y")
    );
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(header))
        .select(app.current_tab)
        .style(Style::default().fg(Color::Cyan))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::Black),
        );

    f.render_widget(tabs, chunks[1]);

    match app.current_tab {
        0 => render_tasks(f, app, chunks[2]),
        1 => render_projects(f, app, chunks[2]),
        2 => render_team(f, app, chunks[2]),
        _ => {}
    }

    if app.show_filter_popup {
        let popup_area = centered_rect(50, 30, f.area());
        let block = Block::default()
            .title("Фильтр по статусу")
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::DarkGray));
        let content = Paragraph::new(
            "Выберите статус:\n\n1. Все\n2. К выполнению\n3. В работе\n4. На ревью\n5. Готово\n\nESC — отмена",
        )
        .block(block)
        .alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(Color::White));

        f.render_widget(content, popup_area);
    }
}

fn render_stats(f: &mut Frame, app: &App, area: Rect) {
    let stats = app.board.stats();
    let cards = [
        ("Активные задачи", stats.active_tasks, Color::Cyan),
        ("Проекты в работе", stats.active_projects, Color::Magenta),
        ("Задачи на ревью", stats.review_tasks, Color::Yellow),
        ("Готово за неделю", stats.done_tasks, Color::Green),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ]
            .as_ref(),
        )
        .split(area);

    for (i, (label, value, color)) in cards.iter().enumerate() {
        let card = Paragraph::new(Line::from(Span::styled(
            format!("{value}"),
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL).title(*label))
        .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(card, chunks[i]);
    }
}

fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Todo => Color::Blue,
        TaskStatus::InProgress => Color::Yellow,
        TaskStatus::Review => Color::Magenta,
        TaskStatus::Done => Color::Green,
    }
}

fn priority_color(priority: TaskPriority) -> Color {
    match priority {
        TaskPriority::High => Color::Red,
        TaskPriority::Medium => Color::Yellow,
        TaskPriority::Low => Color::Green,
    }
}

fn render_tasks(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let tasks: Vec<ListItem> = app
        .visible_tasks
        .iter()
        .map(|task| {
            ListItem::new(vec![Line::from(vec![
                Span::styled(
                    format!("{} ", task.title),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("[{}] ", task.status.label()),
                    Style::default().fg(status_color(task.status)),
                ),
                Span::styled(
                    format!("[{}]", task.priority.label()),
                    Style::default().fg(priority_color(task.priority)),
                ),
            ])])
        })
        .collect();

    let title = format!("Задачи — {}", app.filter.label());
    let tasks_list = List::new(tasks)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    f.render_stateful_widget(tasks_list, chunks[0], &mut app.task_list_state);

    let selected_task = app
        .task_list_state
        .selected()
        .and_then(|i| app.visible_tasks.get(i));
    let info_text = if let Some(task) = selected_task {
        format!(
            "Задача: {}\nПроект: {}\nИсполнитель: {}\nСтатус: {}\nПриоритет: {}\n\nУправление:\n• f: Фильтр по статусу\n• Tab: Следующая вкладка\n• q: Выход",
            task.title,
            task.project,
            task.assignee,
            task.status.label(),
            task.priority.label()
        )
    } else {
        "Нет задач с выбранным фильтром\n\nУправление:\n• ↑/↓: Навигация\n• f: Фильтр по статусу\n• Tab: Следующая вкладка\n• q: Выход"
            .to_string()
    };

    let info_paragraph = Paragraph::new(info_text)
        .block(Block::default().borders(Borders::ALL).title("Детали"))
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White));

    f.render_widget(info_paragraph, chunks[1]);
}

fn render_projects(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let projects: Vec<ListItem> = app
        .board
        .projects
        .iter()
        .map(|project| {
            let status_color = match project.status {
                crate::models::ProjectStatus::Active => Color::Green,
                crate::models::ProjectStatus::Planning => Color::Yellow,
                crate::models::ProjectStatus::Completed => Color::Blue,
            };
            ListItem::new(vec![Line::from(vec![
                Span::styled(
                    format!("{} ", project.name),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("[{}] ", project.status.label()),
                    Style::default().fg(status_color),
                ),
                Span::styled(
                    format!("{}%", project.progress),
                    Style::default().fg(Color::Cyan),
                ),
            ])])
        })
        .collect();

    let projects_list = List::new(projects)
        .block(Block::default().borders(Borders::ALL).title("Проекты"))
        .highlight_style(
            Style::default()
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    f.render_stateful_widget(projects_list, chunks[0], &mut app.project_list_state);

    let selected_project = app
        .project_list_state
        .selected()
        .and_then(|i| app.board.projects.get(i));

    if let Some(project) = selected_project {
        let detail_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
            .split(chunks[1]);

        let info_text = format!(
            "Проект: {}\nСтатус: {}\nЗадач: {}\nДедлайн: {}\n\nУправление:\n• ↑/↓: Навигация\n• Tab: Следующая вкладка\n• q: Выход",
            project.name,
            project.status.label(),
            project.tasks,
            project.deadline
        );
        let info_paragraph = Paragraph::new(info_text)
            .block(Block::default().borders(Borders::ALL).title("Детали"))
            .style(Style::default().fg(Color::White));
        f.render_widget(info_paragraph, detail_chunks[0]);

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Прогресс"))
            .gauge_style(Style::default().fg(Color::Cyan))
            .percent(u16::from(project.progress));
        f.render_widget(gauge, detail_chunks[1]);
    } else {
        let info_paragraph = Paragraph::new(
            "Проект не выбран\n\nУправление:\n• ↑/↓: Навигация\n• Tab: Следующая вкладка\n• q: Выход",
        )
        .block(Block::default().borders(Borders::ALL).title("Детали"))
        .style(Style::default().fg(Color::White));
        f.render_widget(info_paragraph, chunks[1]);
    }
}

fn render_team(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let members: Vec<ListItem> = app
        .board
        .team
        .iter()
        .map(|member| {
            let presence_color = match member.presence {
                crate::models::Presence::Online => Color::Green,
                crate::models::Presence::Offline => Color::DarkGray,
            };
            ListItem::new(vec![Line::from(vec![
                Span::styled("● ", Style::default().fg(presence_color)),
                Span::styled(
                    format!("{} ", member.name),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("[{}]", member.avatar),
                    Style::default().fg(Color::Cyan),
                ),
            ])])
        })
        .collect();

    let team_list = List::new(members)
        .block(Block::default().borders(Borders::ALL).title("Команда"))
        .highlight_style(
            Style::default()
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    f.render_stateful_widget(team_list, chunks[0], &mut app.team_list_state);

    let selected_member = app
        .team_list_state
        .selected()
        .and_then(|i| app.board.team.get(i));
    let info_text = if let Some(member) = selected_member {
        format!(
            "Имя: {}\nРоль: {}\nЗавершено задач: {}\nСтатус: {}\n\nУправление:\n• ↑/↓: Навигация\n• Tab: Следующая вкладка\n• q: Выход",
            member.name,
            member.role,
            member.tasks_completed,
            member.presence.label()
        )
    } else {
        "Участник не выбран\n\nУправление:\n• ↑/↓: Навигация\n• Tab: Следующая вкладка\n• q: Выход"
            .to_string()
    };

    let info_paragraph = Paragraph::new(info_text)
        .block(Block::default().borders(Borders::ALL).title("Детали"))
        .style(Style::default().fg(Color::White));

    f.render_widget(info_paragraph, chunks[1]);
}

// Helper function to create centered rectangles for popups
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_filter_refreshes_visible_list_and_selection() {
        let mut app = App::new(Board::demo().unwrap());
        assert_eq!(app.visible_tasks.len(), 6);

        app.set_filter(StatusFilter::Only(TaskStatus::Review));
        assert_eq!(app.visible_tasks.len(), 1);
        assert_eq!(app.task_list_state.selected(), Some(0));

        app.set_filter(StatusFilter::All);
        assert_eq!(app.visible_tasks.len(), 6);
    }

    #[test]
    fn filter_popup_keys_map_to_the_five_legal_values() {
        let mut app = App::new(Board::demo().unwrap());
        app.open_filter_popup();
        app.handle_filter_input('4');
        assert_eq!(app.filter, StatusFilter::Only(TaskStatus::Review));
        assert!(!app.show_filter_popup);

        app.open_filter_popup();
        app.handle_filter_input('x');
        assert_eq!(app.filter, StatusFilter::Only(TaskStatus::Review));
        assert!(app.show_filter_popup);

        app.handle_filter_input('1');
        assert_eq!(app.filter, StatusFilter::All);
    }

    #[test]
    fn tab_cycling_wraps() {
        let mut app = App::new(Board::demo().unwrap());
        app.next_tab();
        app.next_tab();
        app.next_tab();
        assert_eq!(app.current_tab, 0);
        app.previous_tab();
        assert_eq!(app.current_tab, 2);
    }

    #[test]
    fn item_navigation_wraps_and_handles_empty_lists() {
        let mut app = App::new(Board::demo().unwrap());
        app.next_item();
        assert_eq!(app.task_list_state.selected(), Some(0));
        app.previous_item();
        assert_eq!(app.task_list_state.selected(), Some(5));

        // Empty board: navigation is a no-op.
        let empty = Board::new(Vec::new(), Vec::new(), Vec::new()).unwrap();
        let mut app = App::new(empty);
        app.next_item();
        assert_eq!(app.task_list_state.selected(), None);
    }
}

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::board::Board;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitKind {
    Task,
    Project,
    Member,
}

impl HitKind {
    pub fn label(&self) -> &'static str {
        match self {
            HitKind::Task => "задача",
            HitKind::Project => "проект",
            HitKind::Member => "участник",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchHit {
    pub kind: HitKind,
    pub name: String,
    pub score: i64,
}

/// Fuzzy match the query against task titles, project names and member
/// names/roles. Results are sorted by descending score.
pub fn search(board: &Board, query: &str) -> Vec<SearchHit> {
    let matcher = SkimMatcherV2::default();
    let mut hits = Vec::new();

    for task in &board.tasks {
        if let Some(score) = matcher.fuzzy_match(&task.title, query) {
            hits.push(SearchHit {
                kind: HitKind::Task,
                name: task.title.clone(),
                score,
            });
        }
    }

    for project in &board.projects {
        if let Some(score) = matcher.fuzzy_match(&project.name, query) {
            hits.push(SearchHit {
                kind: HitKind::Project,
                name: project.name.clone(),
                score,
            });
        }
    }

    for member in &board.team {
        let haystack = format!("{} {}", member.name, member.role);
        if let Some(score) = matcher.fuzzy_match(&haystack, query) {
            hits.push(SearchHit {
                kind: HitKind::Member,
                name: member.name.clone(),
                score,
            });
        }
    }

    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits
}

pub fn print_hits(hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("Ничего не найдено");
        return;
    }
    for hit in hits {
        println!("[{}] {}", hit.kind.label(), hit.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_project_by_name() {
        let board = Board::demo().unwrap();
        let hits = search(&board, "Backend Platform");
        assert!(!hits.is_empty());
        assert!(hits
            .iter()
            .any(|h| h.kind == HitKind::Project && h.name == "Backend Platform"));
    }

    #[test]
    fn finds_task_by_title_fragment() {
        let board = Board::demo().unwrap();
        let hits = search(&board, "CI/CD");
        assert!(hits
            .iter()
            .any(|h| h.kind == HitKind::Task && h.name == "Настройка CI/CD pipeline"));
    }

    #[test]
    fn unrelated_query_yields_nothing() {
        let board = Board::demo().unwrap();
        let hits = search(&board, "xyzzy-42-quux");
        assert!(hits.is_empty());
    }

    #[test]
    fn hits_are_sorted_by_score() {
        let board = Board::demo().unwrap();
        let hits = search(&board, "Backend");
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    }
}

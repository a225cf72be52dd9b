//! Course navigation state.
//!
//! Tracks which (lesson, chapter) pairs a learner has completed while
//! working through a course and where the "Next" button goes. The state
//! is transient and owned by the caller; nothing here is persisted.

use std::collections::HashSet;

use serde::Serialize;
use utoipa::ToSchema;

use super::catalog::Course;

/// Outcome of advancing to the next piece of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advance {
    /// Moved to the chapter at these indices
    Chapter { lesson: usize, chapter: usize },
    /// Past the last chapter with every chapter completed
    CourseComplete,
    /// Past the last chapter but some chapters were skipped
    ChaptersRemaining { completed: usize, total: usize },
}

/// Transient per-course navigation state.
///
/// Indices always refer to the course the state was built against;
/// mixing courses gives nonsense, the same as it would in any cursor.
#[derive(Debug, Clone, Default)]
pub struct CourseProgress {
    /// Current (lesson, chapter) position; `None` before anything is opened
    position: Option<(usize, usize)>,
    completed: HashSet<(usize, usize)>,
    watched_titles: Vec<String>,
}

impl CourseProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current (lesson, chapter) position, if any content has been opened.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.position
    }

    /// Number of distinct chapters completed so far.
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Chapter titles watched so far, deduplicated, in first-watch order.
    pub fn watched_titles(&self) -> &[String] {
        &self.watched_titles
    }

    /// Whether the chapter at (lesson, chapter) has been completed.
    pub fn is_completed(&self, lesson: usize, chapter: usize) -> bool {
        self.completed.contains(&(lesson, chapter))
    }

    /// Whether every chapter of the lesson has been completed.
    pub fn lesson_complete(&self, course: &Course, lesson: usize) -> bool {
        course.lessons.get(lesson).is_some_and(|l| {
            (0..l.chapters.len()).all(|c| self.completed.contains(&(lesson, c)))
        })
    }

    /// Completed share of the course, scaled to 100.
    ///
    /// 0 when nothing is completed or the course has no chapters.
    pub fn percent(&self, course: &Course) -> f64 {
        let total = course.total_chapters();
        if total == 0 {
            return 0.0;
        }
        (self.completed.len() as f64 / total as f64) * 100.0
    }

    /// Open the chapter at (lesson, chapter), marking it completed and
    /// recording its title as watched.
    ///
    /// Returns false and changes nothing when the indices are out of range.
    pub fn visit(&mut self, course: &Course, lesson: usize, chapter: usize) -> bool {
        let Some(content) = course.chapter(lesson, chapter) else {
            return false;
        };

        self.completed.insert((lesson, chapter));
        if !self.watched_titles.contains(&content.title) {
            self.watched_titles.push(content.title.clone());
        }
        self.position = Some((lesson, chapter));
        true
    }

    /// Rebuild navigation state from a snapshot held by a client.
    ///
    /// Out-of-range completed pairs are dropped, watched titles are
    /// recovered from the course content, and the position is kept only
    /// if it points at a real chapter.
    pub fn resume(
        course: &Course,
        position: Option<(usize, usize)>,
        completed: &[(usize, usize)],
    ) -> Self {
        let mut progress = Self::new();
        for &(lesson, chapter) in completed {
            progress.visit(course, lesson, chapter);
        }
        progress.position = position.filter(|&(l, c)| course.chapter(l, c).is_some());
        progress
    }

    /// Move to the next piece of content, in lesson order.
    ///
    /// Starts at the first chapter, walks the current lesson's chapter
    /// list, crosses into the next lesson that has chapters, and past the
    /// last chapter reports completion -- or how much is still missing
    /// when chapters were skipped.
    pub fn advance(&mut self, course: &Course) -> Advance {
        let next = match self.position {
            None => Self::first_chapter(course, 0),
            Some((lesson, chapter)) => {
                let in_lesson = course
                    .lessons
                    .get(lesson)
                    .map_or(0, |l| l.chapters.len());
                if chapter + 1 < in_lesson {
                    Some((lesson, chapter + 1))
                } else {
                    Self::first_chapter(course, lesson + 1)
                }
            }
        };

        match next {
            Some((lesson, chapter)) => {
                self.visit(course, lesson, chapter);
                Advance::Chapter { lesson, chapter }
            }
            None => {
                let total = course.total_chapters();
                if self.completed.len() == total {
                    Advance::CourseComplete
                } else {
                    Advance::ChaptersRemaining {
                        completed: self.completed.len(),
                        total,
                    }
                }
            }
        }
    }

    /// First (lesson, chapter) at or after `from_lesson`, skipping lessons
    /// without chapters.
    fn first_chapter(course: &Course, from_lesson: usize) -> Option<(usize, usize)> {
        course
            .lessons
            .iter()
            .enumerate()
            .skip(from_lesson)
            .find(|(_, l)| !l.chapters.is_empty())
            .map(|(i, _)| (i, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Chapter, ChapterKind, Lesson};
    use uuid::Uuid;

    fn chapter(title: &str) -> Chapter {
        Chapter {
            title: title.to_string(),
            kind: ChapterKind::Video,
            link: "https://example.com/v/1".to_string(),
            duration_secs: 120,
        }
    }

    fn lesson(title: &str, chapters: &[&str]) -> Lesson {
        Lesson {
            title: title.to_string(),
            description: None,
            chapters: chapters.iter().map(|t| chapter(t)).collect(),
            test: None,
        }
    }

    fn course(lessons: Vec<Lesson>) -> Course {
        Course {
            course_id: Uuid::new_v4(),
            title: "Course".to_string(),
            description: None,
            image: None,
            video_url: None,
            lessons,
        }
    }

    #[test]
    fn test_advance_visits_every_chapter_once_in_lesson_order() {
        let course = course(vec![
            lesson("L1", &["1.1", "1.2"]),
            lesson("L2", &["2.1"]),
            lesson("L3", &["3.1", "3.2"]),
        ]);
        let mut progress = CourseProgress::new();

        let mut visited = Vec::new();
        loop {
            match progress.advance(&course) {
                Advance::Chapter { lesson, chapter } => visited.push((lesson, chapter)),
                outcome => {
                    assert_eq!(outcome, Advance::CourseComplete);
                    break;
                }
            }
        }

        assert_eq!(visited, vec![(0, 0), (0, 1), (1, 0), (2, 0), (2, 1)]);
        assert_eq!(progress.completed_count(), 5);
    }

    #[test]
    fn test_advance_reports_remaining_when_chapters_skipped() {
        let course = course(vec![lesson("L1", &["1.1", "1.2", "1.3"])]);
        let mut progress = CourseProgress::new();

        // Jump straight to the last chapter, then step past the end
        assert!(progress.visit(&course, 0, 2));
        assert_eq!(
            progress.advance(&course),
            Advance::ChaptersRemaining {
                completed: 1,
                total: 3
            }
        );
    }

    #[test]
    fn test_advance_skips_lessons_without_chapters() {
        let course = course(vec![
            lesson("L1", &["1.1"]),
            lesson("L2", &[]),
            lesson("L3", &["3.1"]),
        ]);
        let mut progress = CourseProgress::new();

        assert_eq!(
            progress.advance(&course),
            Advance::Chapter {
                lesson: 0,
                chapter: 0
            }
        );
        assert_eq!(
            progress.advance(&course),
            Advance::Chapter {
                lesson: 2,
                chapter: 0
            }
        );
        assert_eq!(progress.advance(&course), Advance::CourseComplete);
    }

    #[test]
    fn test_advance_on_empty_course_completes_vacuously() {
        let course = course(vec![]);
        let mut progress = CourseProgress::new();
        assert_eq!(progress.advance(&course), Advance::CourseComplete);
    }

    #[test]
    fn test_revisiting_a_chapter_does_not_double_count() {
        let course = course(vec![lesson("L1", &["1.1", "1.2"])]);
        let mut progress = CourseProgress::new();

        assert!(progress.visit(&course, 0, 0));
        assert!(progress.visit(&course, 0, 0));
        assert_eq!(progress.completed_count(), 1);
        assert_eq!(progress.watched_titles(), ["1.1"]);
    }

    #[test]
    fn test_visit_rejects_out_of_range_indices() {
        let course = course(vec![lesson("L1", &["1.1"])]);
        let mut progress = CourseProgress::new();

        assert!(!progress.visit(&course, 0, 3));
        assert!(!progress.visit(&course, 5, 0));
        assert_eq!(progress.completed_count(), 0);
        assert_eq!(progress.position(), None);
    }

    #[test]
    fn test_percent_tracks_completed_share() {
        let course = course(vec![
            lesson("L1", &["1.1", "1.2"]),
            lesson("L2", &["2.1", "2.2"]),
        ]);
        let mut progress = CourseProgress::new();

        assert_eq!(progress.percent(&course), 0.0);
        progress.visit(&course, 0, 0);
        assert_eq!(progress.percent(&course), 25.0);
        progress.visit(&course, 0, 1);
        progress.visit(&course, 1, 0);
        progress.visit(&course, 1, 1);
        assert_eq!(progress.percent(&course), 100.0);
    }

    #[test]
    fn test_percent_is_zero_for_course_without_chapters() {
        let course = course(vec![lesson("L1", &[])]);
        let progress = CourseProgress::new();
        assert_eq!(progress.percent(&course), 0.0);
    }

    #[test]
    fn test_lesson_complete() {
        let course = course(vec![lesson("L1", &["1.1", "1.2"]), lesson("L2", &["2.1"])]);
        let mut progress = CourseProgress::new();

        progress.visit(&course, 0, 0);
        assert!(!progress.lesson_complete(&course, 0));
        progress.visit(&course, 0, 1);
        assert!(progress.lesson_complete(&course, 0));
        assert!(!progress.lesson_complete(&course, 1));
        // Out-of-range lesson is never complete
        assert!(!progress.lesson_complete(&course, 9));
    }

    #[test]
    fn test_resume_restores_snapshot_and_continues() {
        let course = course(vec![
            lesson("L1", &["1.1", "1.2"]),
            lesson("L2", &["2.1"]),
        ]);

        let mut progress =
            CourseProgress::resume(&course, Some((0, 1)), &[(0, 0), (0, 1), (9, 9)]);
        assert_eq!(progress.completed_count(), 2);
        assert_eq!(progress.position(), Some((0, 1)));

        assert_eq!(
            progress.advance(&course),
            Advance::Chapter {
                lesson: 1,
                chapter: 0
            }
        );
        assert_eq!(progress.advance(&course), Advance::CourseComplete);
    }

    #[test]
    fn test_resume_drops_position_pointing_nowhere() {
        let course = course(vec![lesson("L1", &["1.1"])]);
        let progress = CourseProgress::resume(&course, Some((4, 0)), &[]);
        assert_eq!(progress.position(), None);
    }

    #[test]
    fn test_watched_titles_keep_first_watch_order() {
        let course = course(vec![lesson("L1", &["intro", "setup", "wrap-up"])]);
        let mut progress = CourseProgress::new();

        progress.visit(&course, 0, 2);
        progress.visit(&course, 0, 0);
        progress.visit(&course, 0, 2);
        assert_eq!(progress.watched_titles(), ["wrap-up", "intro"]);
    }
}

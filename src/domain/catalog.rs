//! Catalog domain: degrees, courses, lessons, chapters, and tests.
//!
//! A degree owns its whole course tree as one nested document, the same
//! shape the admin console edits and the learner portal renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Kind of content a chapter holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChapterKind {
    Video,
    /// Slide decks; older catalog data stores these as "ppt"
    #[serde(alias = "ppt")]
    Slide,
}

/// A single content item within a lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Chapter {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ChapterKind,
    /// Player or embed link for the content
    pub link: String,
    /// Content duration in seconds
    #[serde(rename = "duration", default)]
    pub duration_secs: u32,
}

/// One question of a lesson test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct answer
    pub correct_answer: usize,
}

/// Score of a graded test submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct TestScore {
    pub correct: usize,
    pub total: usize,
}

impl TestScore {
    /// Percentage of correct answers, 0 for an empty test.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.correct as f64 / self.total as f64) * 100.0
    }
}

/// A timed multiple-choice test attached to a lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Test {
    pub test_id: Uuid,
    pub title: String,
    /// Time limit in seconds
    #[serde(rename = "time_limit", default)]
    pub time_limit_secs: u32,
    pub questions: Vec<Question>,
}

impl Test {
    /// Grade an answer sheet against this test.
    ///
    /// `answers[i]` is the option index selected for question `i`, or
    /// `None` if it was left blank. Extra answers beyond the question
    /// count are ignored; missing ones count as wrong.
    pub fn score(&self, answers: &[Option<usize>]) -> TestScore {
        let correct = self
            .questions
            .iter()
            .enumerate()
            .filter(|(i, q)| answers.get(*i).copied().flatten() == Some(q.correct_answer))
            .count();

        TestScore {
            correct,
            total: self.questions.len(),
        }
    }
}

/// Learner-facing view of a question, with the correct answer removed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QuestionView {
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
}

/// Learner-facing view of a test; grading happens server-side.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TestView {
    pub test_id: Uuid,
    pub title: String,
    #[serde(rename = "time_limit")]
    pub time_limit_secs: u32,
    pub questions: Vec<QuestionView>,
}

impl From<&Test> for TestView {
    fn from(test: &Test) -> Self {
        Self {
            test_id: test.test_id,
            title: test.title.clone(),
            time_limit_secs: test.time_limit_secs,
            questions: test
                .questions
                .iter()
                .map(|q| QuestionView {
                    prompt: q.prompt.clone(),
                    options: q.options.clone(),
                })
                .collect(),
        }
    }
}

/// A unit within a course: ordered chapters plus an optional test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Lesson {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub chapters: Vec<Chapter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<Test>,
}

impl Lesson {
    /// Summed duration of all chapters in seconds.
    pub fn total_duration_secs(&self) -> u64 {
        self.chapters.iter().map(|c| u64::from(c.duration_secs)).sum()
    }
}

/// A course inside a degree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Course {
    pub course_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Cover image link
    #[serde(default)]
    pub image: Option<String>,
    /// Intro video shown before any chapter is selected
    #[serde(default)]
    pub video_url: Option<String>,
    pub lessons: Vec<Lesson>,
}

impl Course {
    /// Total chapter count across all lessons.
    pub fn total_chapters(&self) -> usize {
        self.lessons.iter().map(|l| l.chapters.len()).sum()
    }

    /// Look up a chapter by (lesson, chapter) indices.
    pub fn chapter(&self, lesson: usize, chapter: usize) -> Option<&Chapter> {
        self.lessons.get(lesson)?.chapters.get(chapter)
    }

    /// Find a test by id within this course.
    pub fn find_test(&self, test_id: Uuid) -> Option<(&Lesson, &Test)> {
        self.lessons.iter().find_map(|lesson| {
            lesson
                .test
                .as_ref()
                .filter(|t| t.test_id == test_id)
                .map(|t| (lesson, t))
        })
    }
}

/// Top-level curriculum grouping multiple courses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Degree {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub courses: Vec<Course>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Degree {
    /// Look up a course by id within this degree.
    pub fn course(&self, course_id: Uuid) -> Option<&Course> {
        self.courses.iter().find(|c| c.course_id == course_id)
    }

    /// Find a test by id anywhere in this degree.
    pub fn find_test(&self, test_id: Uuid) -> Option<(&Course, &Lesson, &Test)> {
        self.courses.iter().find_map(|course| {
            course
                .find_test(test_id)
                .map(|(lesson, test)| (course, lesson, test))
        })
    }
}

/// Data required to create a degree
#[derive(Debug, Clone)]
pub struct NewDegree {
    pub title: String,
    pub description: Option<String>,
    pub courses: Vec<Course>,
}

/// Field changes applied by a degree update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct DegreeChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Replaces the stored course tree wholesale
    pub courses: Option<Vec<Course>>,
}

/// A test with its location in the catalog (admin test screens).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TestSummary {
    pub test_id: Uuid,
    pub title: String,
    pub question_count: usize,
    pub time_limit_secs: u32,
    pub degree_id: Uuid,
    pub degree_title: String,
    pub course_id: Uuid,
    pub course_title: String,
    pub lesson_title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_test() -> Test {
        Test {
            test_id: Uuid::new_v4(),
            title: "Unit test".to_string(),
            time_limit_secs: 600,
            questions: vec![
                Question {
                    prompt: "1 + 1?".to_string(),
                    options: vec!["1".to_string(), "2".to_string(), "3".to_string()],
                    correct_answer: 1,
                },
                Question {
                    prompt: "2 + 2?".to_string(),
                    options: vec!["3".to_string(), "4".to_string(), "5".to_string()],
                    correct_answer: 1,
                },
                Question {
                    prompt: "3 + 3?".to_string(),
                    options: vec!["5".to_string(), "6".to_string(), "7".to_string()],
                    correct_answer: 1,
                },
            ],
        }
    }

    #[test]
    fn test_score_counts_exact_matches_only() {
        let test = sample_test();
        let score = test.score(&[Some(1), Some(0), Some(1)]);
        assert_eq!(score.correct, 2);
        assert_eq!(score.total, 3);
    }

    #[test]
    fn test_score_blank_and_missing_answers_are_wrong() {
        let test = sample_test();
        let score = test.score(&[None, Some(1)]);
        assert_eq!(score.correct, 1);
        assert_eq!(score.total, 3);
    }

    #[test]
    fn test_score_ignores_extra_answers() {
        let test = sample_test();
        let score = test.score(&[Some(1), Some(1), Some(1), Some(2), Some(0)]);
        assert_eq!(score.correct, 3);
    }

    #[test]
    fn test_score_percent() {
        let test = sample_test();
        let score = test.score(&[Some(1), Some(1), Some(0)]);
        assert!((score.percent() - 66.666).abs() < 0.01);

        let empty = Test {
            questions: vec![],
            ..sample_test()
        };
        assert_eq!(empty.score(&[]).percent(), 0.0);
    }

    #[test]
    fn test_lesson_duration_sums_chapters() {
        let lesson = Lesson {
            title: "L1".to_string(),
            description: None,
            chapters: vec![
                Chapter {
                    title: "a".to_string(),
                    kind: ChapterKind::Video,
                    link: "x".to_string(),
                    duration_secs: 90,
                },
                Chapter {
                    title: "b".to_string(),
                    kind: ChapterKind::Slide,
                    link: "y".to_string(),
                    duration_secs: 0,
                },
            ],
            test: None,
        };
        assert_eq!(lesson.total_duration_secs(), 90);
    }

    #[test]
    fn test_chapter_kind_accepts_legacy_ppt() {
        let chapter: Chapter = serde_json::from_str(
            r#"{"title":"Slides","type":"ppt","link":"https://example.com/deck","duration":0}"#,
        )
        .unwrap();
        assert_eq!(chapter.kind, ChapterKind::Slide);
    }
}

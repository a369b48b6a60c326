use std::{fs, path::Path};

use mentor_progress::LearnerProfile;
use mentor_progress::tracker::{LESSONS_PER_MODULE, MODULES_PER_COURSE};

const DEFAULT_SYSTEM_PROMPT: &str = "You are Mentor, a patient and encouraging personal tutor. \
Adapt explanations to the learner's level and preferred learning style. \
Keep lessons structured, concrete, and free of filler.";

pub fn system_prompt() -> String {
    let prompt_file = Path::new("TUTOR_PROMPT.md");
    match fs::read_to_string(prompt_file) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => DEFAULT_SYSTEM_PROMPT.to_owned(),
    }
}

pub fn course_prompt(topic: &str) -> String {
    format!(
        "Create a complete structured course on {topic}.\n\
         Include:\n\
         - Course overview\n\
         - {MODULES_PER_COURSE} modules\n\
         - {LESSONS_PER_MODULE} lessons per module"
    )
}

pub fn lesson_prompt(profile: &LearnerProfile) -> String {
    let course = profile
        .course
        .as_ref()
        .map(|course| course.raw.as_str())
        .unwrap_or_default();

    let (module, lesson) = profile.position();
    let assignment = if module >= MODULES_PER_COURSE {
        "The course is complete. Teach a review lesson that revisits the hardest material.".to_owned()
    } else {
        format!(
            "Teach module {} lesson {} with explanations suited to the learning style.",
            module + 1,
            lesson + 1
        )
    };

    format!(
        "You are an adaptive AI teacher.\n\n\
         Student level: {}\n\
         Learning style: {}\n\
         Weak topics: {}\n\n\
         Course:\n{}\n\n\
         {}",
        profile.level,
        profile.learning_style,
        profile.weak_topics_label(),
        course,
        assignment
    )
}

pub fn tutor_prompt(profile: &LearnerProfile, question: &str) -> String {
    format!(
        "You are a personal AI tutor.\n\n\
         Student level: {}\n\
         Learning style: {}\n\
         Weak topics: {}\n\n\
         Student question:\n{}",
        profile.level,
        profile.learning_style,
        profile.weak_topics_label(),
        question.trim()
    )
}

#[cfg(test)]
mod tests {
    use mentor_progress::{Course, LearnerProfile, LearningStyle};

    use super::{course_prompt, lesson_prompt, tutor_prompt};

    fn profile_with_course() -> LearnerProfile {
        let mut profile = LearnerProfile::default();
        profile.level = 3;
        profile.learning_style = LearningStyle::Visual;
        profile.course = Some(Course {
            topic: "Rust".to_owned(),
            raw: "Module 1: Ownership".to_owned(),
        });
        profile.current_module_index = 1;
        profile.current_lesson_index = 2;
        profile
    }

    #[test]
    fn course_prompt_names_topic_and_shape() {
        let prompt = course_prompt("Python Programming");
        assert!(prompt.contains("Python Programming"));
        assert!(prompt.contains("4 modules"));
        assert!(prompt.contains("3 lessons per module"));
    }

    #[test]
    fn lesson_prompt_carries_learner_context() {
        let prompt = lesson_prompt(&profile_with_course());

        assert!(prompt.contains("Student level: 3"));
        assert!(prompt.contains("Learning style: Visual"));
        assert!(prompt.contains("Weak topics: none"));
        assert!(prompt.contains("Module 1: Ownership"));
        assert!(prompt.contains("module 2 lesson 3"));
    }

    #[test]
    fn lesson_prompt_switches_to_review_after_last_module() {
        let mut profile = profile_with_course();
        profile.current_module_index = 4;
        profile.current_lesson_index = 0;

        assert!(lesson_prompt(&profile).contains("review lesson"));
    }

    #[test]
    fn tutor_prompt_lists_weak_topics() {
        let mut profile = LearnerProfile::default();
        profile.weak_topics = vec!["borrowing".to_owned(), "traits".to_owned()];

        let prompt = tutor_prompt(&profile, "  What is a lifetime?  ");
        assert!(prompt.contains("Weak topics: borrowing, traits"));
        assert!(prompt.ends_with("What is a lifetime?"));
    }
}

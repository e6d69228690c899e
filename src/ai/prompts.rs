//! Prompt builders for the question flow and roadmap generation
//!
//! Pure string assembly; callers supply the history and the current date so
//! nothing here touches the clock or the network.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ai::OPTION_COUNT;

/// Length of the generated plan in days (roughly six months).
pub const ROADMAP_WINDOW_DAYS: i64 = 180;

/// Advisory cutoff communicated to the model; not enforced here.
pub const MAX_QUESTIONS: usize = 10;

/// One answered question from the flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaPair {
    pub q: String,
    pub a: String,
}

/// Render the Q&A history one line per exchange, oldest first.
///
/// This is model context, not a parseable format; no escaping is done.
pub fn format_history(messages: &[QaPair]) -> String {
    messages
        .iter()
        .map(|m| format!("Q: {} | A: {}", m.q, m.a))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn next_question_prompt(history: &str, last_answer: &str) -> String {
    format!(
        r#"Context: A user is building a career roadmap.
History: {history}
User's last choice: {last_answer}

Task: Generate the NEXT logical question and {OPTION_COUNT} multiple-choice options.
If we have enough info (at question {MAX_QUESTIONS}), signal 'FINISH'.

Output ONLY valid JSON:
{{
  "question": "The next logical question",
  "options": ["Option A", "Option B", "Option C", "Option D"],
  "status": "CONTINUE or FINISH"
}}
"#
    )
}

pub fn roadmap_prompt(history: &str, start: NaiveDate) -> String {
    let end = start + Duration::days(ROADMAP_WINDOW_DAYS);
    let day_two = start + Duration::days(1);
    let first_deadline = start + Duration::days(28);
    let second_deadline = start + Duration::days(90);

    let mut prompt = format!(
        r#"Based on this user profile: {history}

Generate a comprehensive 6-month career roadmap as a DAILY CALENDAR with specific tasks for each date.

Start Date: {start}
End Date: {end}

IMPORTANT: Return ONLY valid JSON matching this exact structure:

{{
  "start_date": "{start}",
  "daily_tasks": [
    {{
      "date": "{start}",
      "day_name": "{start_day}",
      "tasks": [
        {{
          "title": "Set up development environment",
          "description": "Install necessary tools and configure workspace",
          "duration": "2 hours",
          "priority": "high"
        }}
      ]
    }},
    {{
      "date": "{day_two}",
      "day_name": "{day_two_day}",
      "tasks": [
        {{
          "title": "Practice exercises",
          "description": "Complete 5 coding exercises",
          "duration": "1.5 hours",
          "priority": "medium"
        }}
      ]
    }}
  ],
  "skills_to_learn": ["Skill 1", "Skill 2", "Skill 3", "Skill 4", "Skill 5", "Skill 6"],
  "recommended_projects": [
    {{
      "title": "Project 1",
      "description": "Build this project by Week 4",
      "deadline": "{first_deadline}"
    }},
    {{
      "title": "Project 2",
      "description": "Complete by end of Month 3",
      "deadline": "{second_deadline}"
    }}
  ]
}}
"#,
        start = start.format("%Y-%m-%d"),
        end = end.format("%Y-%m-%d"),
        start_day = start.format("%A"),
        day_two = day_two.format("%Y-%m-%d"),
        day_two_day = day_two.format("%A"),
        first_deadline = first_deadline.format("%Y-%m-%d"),
        second_deadline = second_deadline.format("%Y-%m-%d"),
    );

    prompt.push_str(
        r#"
Requirements:
- Generate tasks for EVERY DAY between the start and end date (approximately 180 days)
- Each day should have 1-3 specific, actionable tasks
- Tasks should progress logically from basics to advanced
- Each task must have: title, description, duration estimate, and priority (high/medium/low)
- Make tasks specific to the user's career path and experience level
- Include practical exercises, not just theory
- Weekend tasks should be lighter (practice, review, or optional challenges)
- Include 6-10 entries in skills_to_learn and 3-5 entries in recommended_projects

Task Distribution Guidelines:
- Week 1-2: Setup and fundamentals
- Week 3-4: Core concepts and first small projects
- Month 2: Intermediate skills with hands-on practice
- Month 3-4: Real projects and specialization
- Month 5: Advanced topics and portfolio building
- Month 6: Interview prep, networking, job applications

Output ONLY the JSON, no other text."#,
    );

    prompt
}

//! Static registry of categories, subjects and personas.
//!
//! The catalog is compiled in and never mutated. Order matters: the first
//! category is the session default, and the first subject of a category is
//! selected whenever that category is chosen.

// ============================================================================
// Types
// ============================================================================

/// A top-level topic area, e.g. "School".
#[derive(Debug, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub emoji: &'static str,
    pub persona: Persona,
    pub subjects: &'static [Subject],
}

/// A subject within a category, with suggested opening questions.
#[derive(Debug, PartialEq, Eq)]
pub struct Subject {
    pub name: &'static str,
    pub emoji: &'static str,
    pub starters: &'static [&'static str],
}

/// The assistant character a category talks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    StudyBuddy,
    LifeCoach,
}

/// Subject name that means "no particular focus" for the tutor persona.
pub const ALL_SUBJECTS: &str = "All Subjects";

const STUDY_BUDDY_PROMPT: &str = "You are StudyBuddy, a friendly and patient AI tutor for students of all ages. Explain school topics in simple, clear language.
- Always explain step by step
- Use simple analogies and real-life examples
- Be encouraging — never make the student feel dumb
- For math, show your working clearly
- Keep answers focused and not too long
- Use emojis occasionally to keep things friendly 😊";

const LIFE_COACH_PROMPT: &str = "You are LifeCoach, a warm and practical AI life skills guide for everyday people. Help with real-world skills in a simple, non-judgmental way.
- Give practical, actionable advice that anyone can follow
- Use simple language — no jargon
- Be warm and encouraging — everyone is learning at their own pace
- Break down tasks into small, doable steps
- Share quick tips and common mistakes to avoid
- Keep it conversational and friendly 😊";

impl Persona {
    pub fn name(&self) -> &'static str {
        match self {
            Persona::StudyBuddy => "StudyBuddy",
            Persona::LifeCoach => "LifeCoach",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Persona::StudyBuddy => "🎓",
            Persona::LifeCoach => "🌱",
        }
    }

    pub fn tagline(&self) -> &'static str {
        match self {
            Persona::StudyBuddy => "Your personal AI tutor",
            Persona::LifeCoach => "Real-world skills for everyday life",
        }
    }

    /// Build the instruction string sent to the model for `subject`.
    pub fn instruction(&self, subject: &Subject) -> String {
        match self {
            Persona::StudyBuddy if subject.name == ALL_SUBJECTS => STUDY_BUDDY_PROMPT.to_string(),
            Persona::StudyBuddy => format!("{STUDY_BUDDY_PROMPT}\n\nFocus on: {}.", subject.name),
            Persona::LifeCoach => format!(
                "{LIFE_COACH_PROMPT}\n\nThe user is asking about: {}. Focus your advice on that area.",
                subject.name
            ),
        }
    }
}

impl Category {
    /// The subject selected when this category is chosen.
    pub fn default_subject(&self) -> &'static Subject {
        &self.subjects[0]
    }

    /// Case-insensitive subject lookup.
    pub fn subject(&self, name: &str) -> Option<&'static Subject> {
        let name = name.trim();
        self.subjects
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

// ============================================================================
// Registry
// ============================================================================

static CATEGORIES: &[Category] = &[
    Category {
        name: "School",
        emoji: "📚",
        persona: Persona::StudyBuddy,
        subjects: &[
            Subject {
                name: ALL_SUBJECTS,
                emoji: "📚",
                starters: &[
                    "What is photosynthesis?",
                    "How do I solve fractions?",
                    "What caused World War 2?",
                ],
            },
            Subject {
                name: "Math",
                emoji: "🔢",
                starters: &[
                    "How do I solve fractions?",
                    "What is Pythagoras theorem?",
                    "Explain algebra basics",
                ],
            },
            Subject {
                name: "Science",
                emoji: "🔬",
                starters: &[
                    "What is photosynthesis?",
                    "How does gravity work?",
                    "What are atoms made of?",
                ],
            },
            Subject {
                name: "History",
                emoji: "🏛️",
                starters: &[
                    "What caused World War 2?",
                    "Who was Napoleon?",
                    "What was the Renaissance?",
                ],
            },
            Subject {
                name: "English",
                emoji: "✍️",
                starters: &[
                    "What is a metaphor?",
                    "How do I write an essay?",
                    "What is past tense?",
                ],
            },
            Subject {
                name: "Geography",
                emoji: "🌍",
                starters: &[
                    "What causes earthquakes?",
                    "What is climate change?",
                    "How are mountains formed?",
                ],
            },
        ],
    },
    Category {
        name: "Life Skills",
        emoji: "🌱",
        persona: Persona::LifeCoach,
        subjects: &[
            Subject {
                name: "Cooking",
                emoji: "🍳",
                starters: &[
                    "How do I boil eggs perfectly?",
                    "What can I cook with rice and eggs?",
                    "How do I make a simple pasta?",
                ],
            },
            Subject {
                name: "Budgeting",
                emoji: "💰",
                starters: &[
                    "How do I make a monthly budget?",
                    "What is the 50/30/20 rule?",
                    "How do I start saving money?",
                ],
            },
            Subject {
                name: "Job Interviews",
                emoji: "💼",
                starters: &[
                    "How do I answer 'tell me about yourself'?",
                    "What should I wear to an interview?",
                    "How do I handle tough interview questions?",
                ],
            },
            Subject {
                name: "Health",
                emoji: "💪",
                starters: &[
                    "How do I start exercising as a beginner?",
                    "What is a balanced diet?",
                    "How do I improve my sleep?",
                ],
            },
            Subject {
                name: "Communication",
                emoji: "🗣️",
                starters: &[
                    "How do I speak more confidently?",
                    "How do I write a professional email?",
                    "How do I handle conflict calmly?",
                ],
            },
            Subject {
                name: "Money Basics",
                emoji: "🏦",
                starters: &[
                    "What is a credit score?",
                    "How do taxes work?",
                    "What is an emergency fund?",
                ],
            },
        ],
    },
];

/// All categories in display order.
pub fn categories() -> &'static [Category] {
    CATEGORIES
}

/// The category a new session starts in.
pub fn default_category() -> &'static Category {
    &CATEGORIES[0]
}

/// Case-insensitive category lookup.
pub fn find_category(name: &str) -> Option<&'static Category> {
    let name = name.trim();
    CATEGORIES.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

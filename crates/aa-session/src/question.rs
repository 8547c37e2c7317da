//! The built-in estimation questions.

/// Length at which list previews are cut.
pub const PREVIEW_CHARS: usize = 80;

/// An effort-estimation question shown before the roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    /// Stable identifier, persisted across runs.
    pub id: &'static str,
    /// Full question text.
    pub text: &'static str,
}

const QUESTIONS: &[Question] = &[
    Question {
        id: "q1",
        text: "We are modifying flight card styling in the flight select page. We are going to \
               change the shadow effect, hover effect and size of the prices. How many points you \
               think the change will be?",
    },
    Question {
        id: "q2",
        text: "Customer has asked you to estimate what it takes to modify existing API end point \
               that fetches information about used car listing. Customer wants to add information \
               whether the car has been crashed before or not. What would be your estimate for \
               the change in points",
    },
    Question {
        id: "q3",
        text: "Customer has asked estimate of effort for changing the passenger information page. \
               We want to change the passenger information to have large yellow boxes around each \
               filed that is required, to help customer quickly find information they need to \
               fill out. What would be your estimate for the change in points?",
    },
];

/// All questions in display order.
pub fn all() -> &'static [Question] {
    QUESTIONS
}

/// The question shown when nothing (valid) was selected.
pub fn first() -> &'static Question {
    &QUESTIONS[0]
}

/// Look up a question by id.
pub fn find(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

impl Question {
    /// The text cut to `max_chars` characters, with `…` appended when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        let mut chars = self.text.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{head}…")
        } else {
            head
        }
    }

    /// 1-based position in the catalog.
    pub fn number(&self) -> usize {
        QUESTIONS
            .iter()
            .position(|q| q.id == self.id)
            .map_or(0, |i| i + 1)
    }
}

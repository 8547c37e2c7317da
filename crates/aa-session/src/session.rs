//! Demo flow management.
//!
//! `DemoSession` walks a participant through the demo: pick a question,
//! read it, hide it, choose an anchor, roll the loaded dice and view the
//! result. It owns the rule that only one roll is in flight at a time and
//! persists every selection and completed roll through a [`SessionStore`].

use aa_dice::{Anchor, LoadedRollEngine, RollDisplay, RollHandle, RollResult};

use crate::error::{SessionError, SessionResult};
use crate::question::{self, PREVIEW_CHARS, Question};
use crate::store::SessionStore;

/// Which part of the demo is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Choosing a question from the catalog.
    QuestionSelect,
    /// Reading the chosen question.
    QuestionDisplay,
    /// Choosing an anchor before rolling.
    AnchorChoice,
    /// Dice animation in progress.
    Rolling,
    /// The roll result is shown.
    ShowingResult,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuestionSelect => write!(f, "question selection"),
            Self::QuestionDisplay => write!(f, "question"),
            Self::AnchorChoice => write!(f, "anchor choice"),
            Self::Rolling => write!(f, "rolling"),
            Self::ShowingResult => write!(f, "result"),
        }
    }
}

/// An interactive demo session.
#[derive(Debug)]
pub struct DemoSession {
    store: SessionStore,
    screen: Screen,
    question: &'static Question,
    anchor: Option<Anchor>,
    shown_result: Option<RollResult>,
    last_result: Option<RollResult>,
}

impl DemoSession {
    /// Start a session, restoring the question and last roll from `store`.
    ///
    /// A previously selected question opens straight on its display screen.
    /// Unknown or missing ids start on question selection.
    pub fn restore(store: SessionStore) -> Self {
        let saved = store.selected_question_id();
        let found = saved.as_deref().and_then(question::find);
        if let (Some(id), None) = (&saved, found) {
            tracing::warn!(id = %id, "stored question no longer exists");
        }
        let last_result = store.last_result();

        Self {
            screen: if found.is_some() {
                Screen::QuestionDisplay
            } else {
                Screen::QuestionSelect
            },
            question: found.unwrap_or_else(question::first),
            anchor: None,
            shown_result: None,
            last_result,
            store,
        }
    }

    /// The current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The selected (or default) question.
    pub fn question(&self) -> &'static Question {
        self.question
    }

    /// The anchor chosen for the next roll.
    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    /// The result currently on screen.
    pub fn shown_result(&self) -> Option<&RollResult> {
        self.shown_result.as_ref()
    }

    /// The most recent completed roll, including one restored from storage.
    pub fn last_result(&self) -> Option<&RollResult> {
        self.last_result.as_ref()
    }

    /// Whether a roll can be started now.
    pub fn can_roll(&self) -> bool {
        self.screen == Screen::AnchorChoice && self.anchor.is_some()
    }

    /// Select and display a question.
    pub fn select_question(&mut self, id: &str) -> SessionResult<&'static Question> {
        self.expect_screen(Screen::QuestionSelect, "select a question")?;
        let q = question::find(id).ok_or_else(|| SessionError::UnknownQuestion(id.to_string()))?;
        self.store.save_selected_question_id(q.id);
        self.question = q;
        self.screen = Screen::QuestionDisplay;
        Ok(q)
    }

    /// Hide the question and move on to the dice.
    pub fn hide_question(&mut self) -> SessionResult<()> {
        self.expect_screen(Screen::QuestionDisplay, "hide the question")?;
        self.shown_result = None;
        self.anchor = None;
        self.screen = Screen::AnchorChoice;
        Ok(())
    }

    /// Choose the anchor for the next roll.
    pub fn choose_anchor(&mut self, anchor: Anchor) -> SessionResult<()> {
        self.expect_screen(Screen::AnchorChoice, "choose an anchor")?;
        self.anchor = Some(anchor);
        Ok(())
    }

    /// Start the loaded roll for the chosen anchor.
    ///
    /// Fails while another roll is in flight or before an anchor is chosen.
    /// The caller awaits the handle and passes the result to
    /// [`finish_roll`](Self::finish_roll).
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn start_roll<D: RollDisplay>(
        &mut self,
        engine: &mut LoadedRollEngine,
        display: D,
    ) -> SessionResult<RollHandle> {
        if self.screen == Screen::Rolling {
            return Err(SessionError::InvalidAction(
                "a roll is already in progress".into(),
            ));
        }
        self.expect_screen(Screen::AnchorChoice, "roll")?;
        let anchor = self
            .anchor
            .ok_or_else(|| SessionError::InvalidAction("choose an anchor first".into()))?;
        self.screen = Screen::Rolling;
        Ok(engine.roll(anchor, display))
    }

    /// Record the outcome of the roll in flight and show it.
    pub fn finish_roll(&mut self, result: RollResult) -> SessionResult<()> {
        self.expect_screen(Screen::Rolling, "finish a roll")?;
        self.store.save_roll(&result);
        self.shown_result = Some(result.clone());
        self.last_result = Some(result);
        self.screen = Screen::ShowingResult;
        Ok(())
    }

    /// Abandon the roll in flight and return to the anchor choice.
    pub fn cancel_roll(&mut self) -> SessionResult<()> {
        self.expect_screen(Screen::Rolling, "cancel a roll")?;
        self.screen = Screen::AnchorChoice;
        Ok(())
    }

    /// Hide the result and go back to question selection.
    ///
    /// Clears the anchor choice so the next round starts fresh.
    pub fn hide_results(&mut self) -> SessionResult<()> {
        self.expect_screen(Screen::ShowingResult, "hide the results")?;
        self.shown_result = None;
        self.anchor = None;
        self.screen = Screen::QuestionSelect;
        Ok(())
    }

    /// Process a line of interactive input and return a response.
    ///
    /// Rolling is asynchronous and handled by the front end, not here.
    pub fn process(&mut self, input: &str) -> SessionResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "help" | "?" => Ok(self.help()),
            "questions" => Ok(self.list_questions()),
            "select" => {
                let q = self.select_question(rest)?;
                Ok(format!("Question {}:\n{}", q.number(), q.text))
            }
            "hide" if rest.eq_ignore_ascii_case("results") => {
                self.hide_results()?;
                Ok("Results hidden. Pick a question to go again.".into())
            }
            "done" => {
                self.hide_results()?;
                Ok("Results hidden. Pick a question to go again.".into())
            }
            "hide" => {
                self.hide_question()?;
                Ok("Question hidden. Choose an anchor: low or high.".into())
            }
            "anchor" => {
                let anchor = rest.parse::<Anchor>()?;
                self.choose_anchor(anchor)?;
                Ok(format!("Anchor set to {anchor}. Type 'roll' to roll the dice."))
            }
            "status" => Ok(self.status()),
            _ => Err(SessionError::UnknownCommand(cmd)),
        }
    }

    /// A short summary of the session state.
    pub fn status(&self) -> String {
        let mut out = format!(
            "Screen: {}\nQuestion: {}",
            self.screen,
            self.question.preview(PREVIEW_CHARS)
        );
        if let Some(anchor) = self.anchor {
            out.push_str(&format!("\nAnchor: {anchor}"));
        }
        match &self.last_result {
            Some(r) => out.push_str(&format!("\nLast roll: {r} ({} anchor)", r.anchor())),
            None => out.push_str("\nLast roll: none"),
        }
        out
    }

    fn list_questions(&self) -> String {
        question::all()
            .iter()
            .map(|q| {
                let marker = if q.id == self.question.id { '*' } else { ' ' };
                format!("{marker} {} {}. {}", q.id, q.number(), q.preview(PREVIEW_CHARS))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn help(&self) -> String {
        [
            "Commands:",
            "  questions          list the questions",
            "  select <id>        select and show a question",
            "  hide               hide the question and go to the dice",
            "  anchor <low|high>  choose the anchor",
            "  roll               roll the loaded dice",
            "  done               hide the results and start over",
            "  status             show the session state",
            "  quit               leave",
        ]
        .join("\n")
    }

    fn expect_screen(&self, expected: Screen, action: &str) -> SessionResult<()> {
        if self.screen == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidAction(format!(
                "cannot {action} on the {} screen",
                self.screen
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aa_dice::{AnimationConfig, EngineConfig};
    use tempfile::TempDir;

    fn session() -> (TempDir, DemoSession) {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path().join("state.json"));
        (dir, DemoSession::restore(store))
    }

    fn engine() -> LoadedRollEngine {
        LoadedRollEngine::new(
            EngineConfig::default()
                .with_seed(42)
                .with_animation(AnimationConfig::from_millis(10, 50)),
        )
        .unwrap()
    }

    #[test]
    fn fresh_session_starts_on_selection() {
        let (_dir, s) = session();
        assert_eq!(s.screen(), Screen::QuestionSelect);
        assert_eq!(s.question().id, "q1");
        assert!(s.last_result().is_none());
        assert!(!s.can_roll());
    }

    #[test]
    fn select_persists_and_restores() {
        let (dir, mut s) = session();
        s.select_question("q3").unwrap();
        assert_eq!(s.screen(), Screen::QuestionDisplay);

        let restored = DemoSession::restore(SessionStore::open(dir.path().join("state.json")));
        assert_eq!(restored.screen(), Screen::QuestionDisplay);
        assert_eq!(restored.question().id, "q3");
    }

    #[test]
    fn unknown_stored_question_starts_on_selection() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path().join("state.json"));
        store.save_selected_question_id("q42");
        let s = DemoSession::restore(store);
        assert_eq!(s.screen(), Screen::QuestionSelect);
        assert_eq!(s.question().id, "q1");
    }

    #[test]
    fn unknown_question_is_rejected() {
        let (_dir, mut s) = session();
        assert!(matches!(
            s.select_question("nope"),
            Err(SessionError::UnknownQuestion(id)) if id == "nope"
        ));
        assert_eq!(s.screen(), Screen::QuestionSelect);
    }

    #[test]
    fn actions_outside_their_screen_fail() {
        let (_dir, mut s) = session();
        assert!(matches!(s.hide_question(), Err(SessionError::InvalidAction(_))));
        assert!(matches!(
            s.choose_anchor(Anchor::Low),
            Err(SessionError::InvalidAction(_))
        ));
        assert!(matches!(s.hide_results(), Err(SessionError::InvalidAction(_))));
        assert!(matches!(
            s.finish_roll(RollResult::new(1, 1, Anchor::Low)),
            Err(SessionError::InvalidAction(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn roll_requires_anchor() {
        let (_dir, mut s) = session();
        let mut engine = engine();
        s.select_question("q1").unwrap();
        s.hide_question().unwrap();
        let err = s.start_roll(&mut engine, ()).unwrap_err();
        assert!(err.to_string().contains("choose an anchor first"));
        assert_eq!(s.screen(), Screen::AnchorChoice);
    }

    #[tokio::test(start_paused = true)]
    async fn full_round_persists_result() {
        let (dir, mut s) = session();
        let mut engine = engine();
        s.select_question("q2").unwrap();
        s.hide_question().unwrap();
        s.choose_anchor(Anchor::High).unwrap();
        assert!(s.can_roll());

        let mut handle = s.start_roll(&mut engine, ()).unwrap();
        assert_eq!(s.screen(), Screen::Rolling);
        assert!(!s.can_roll());
        let result = handle.resolved().await.unwrap();
        s.finish_roll(result.clone()).unwrap();

        assert_eq!(s.screen(), Screen::ShowingResult);
        assert_eq!(s.shown_result(), Some(&result));
        assert!(Anchor::High.permits(result.total()));

        let store = SessionStore::open(dir.path().join("state.json"));
        assert_eq!(store.last_anchor(), Some(Anchor::High));
        let stored = store.last_result().unwrap();
        assert_eq!(stored.total(), result.total());
        assert_eq!(stored.face1(), result.face1());
    }

    #[tokio::test(start_paused = true)]
    async fn second_roll_is_refused_while_rolling() {
        let (_dir, mut s) = session();
        let mut engine = engine();
        s.select_question("q1").unwrap();
        s.hide_question().unwrap();
        s.choose_anchor(Anchor::Low).unwrap();
        let _handle = s.start_roll(&mut engine, ()).unwrap();
        let err = s.start_roll(&mut engine, ()).unwrap_err();
        assert!(err.to_string().contains("already in progress"));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_returns_to_anchor_choice() {
        let (_dir, mut s) = session();
        let mut engine = engine();
        s.select_question("q1").unwrap();
        s.hide_question().unwrap();
        s.choose_anchor(Anchor::Low).unwrap();
        let mut handle = s.start_roll(&mut engine, ()).unwrap();
        assert!(handle.stop());
        s.cancel_roll().unwrap();
        assert_eq!(s.screen(), Screen::AnchorChoice);
        assert_eq!(s.anchor(), Some(Anchor::Low));
        assert!(s.last_result().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn hide_results_resets_anchor() {
        let (_dir, mut s) = session();
        let mut engine = engine();
        s.select_question("q1").unwrap();
        s.hide_question().unwrap();
        s.choose_anchor(Anchor::Low).unwrap();
        let mut handle = s.start_roll(&mut engine, ()).unwrap();
        let result = handle.resolved().await.unwrap();
        s.finish_roll(result).unwrap();

        s.hide_results().unwrap();
        assert_eq!(s.screen(), Screen::QuestionSelect);
        assert_eq!(s.anchor(), None);
        assert!(s.shown_result().is_none());
        assert!(s.last_result().is_some());
    }

    #[test]
    fn restore_loads_last_roll() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path().join("state.json"));
        store.save_roll(&RollResult::new(2, 2, Anchor::Low));
        let s = DemoSession::restore(store);
        assert_eq!(s.last_result().map(RollResult::total), Some(4));
        assert!(s.status().contains("Last roll: 2 + 2 = 4 (low anchor)"));
    }

    #[test]
    fn process_walks_the_flow() {
        let (_dir, mut s) = session();
        assert!(s.process("questions").unwrap().contains("* q1 1."));
        assert!(s.process("select q2").unwrap().starts_with("Question 2:"));
        assert!(s.process("hide").unwrap().contains("Choose an anchor"));
        assert!(s.process("anchor HIGH").unwrap().contains("Anchor set to high"));
        assert!(s.can_roll());
        assert!(s.process("status").unwrap().contains("Anchor: high"));
    }

    #[test]
    fn process_rejects_bad_input() {
        let (_dir, mut s) = session();
        assert!(s.process("").unwrap().is_empty());
        assert!(matches!(
            s.process("dance"),
            Err(SessionError::UnknownCommand(c)) if c == "dance"
        ));
        s.process("select q1").unwrap();
        s.process("hide").unwrap();
        assert!(matches!(
            s.process("anchor medium"),
            Err(SessionError::Dice(_))
        ));
        assert_eq!(s.anchor(), None);
    }

    #[test]
    fn help_lists_roll() {
        let (_dir, mut s) = session();
        let help = s.process("help").unwrap();
        assert!(help.contains("roll"));
        assert!(help.contains("anchor <low|high>"));
    }
}

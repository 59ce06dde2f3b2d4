use chrono::{DateTime, Utc};
use exercise_core::interaction::Interaction;
use exercise_core::model::content::{ExerciseContent, MatchSide};
use exercise_core::model::{Variation, Verdict};
use exercise_core::{Clock, Resolver, Stopwatch, evaluate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::progress::{self, ProgressEntry, ProgressSummary};
use crate::error::SessionError;

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

/// Caller-supplied options for a new session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Explicit variation tag; unrecognized tags fall back to classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation: Option<String>,
    /// Overrides the content's own shuffling flag where it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub randomize: Option<bool>,
}

impl SessionConfig {
    #[must_use]
    pub fn with_variation(mut self, tag: impl Into<String>) -> Self {
        self.variation = Some(tag.into());
        self
    }

    #[must_use]
    pub fn with_randomize(mut self, randomize: bool) -> Self {
        self.randomize = Some(randomize);
        self
    }
}

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    InProgress,
    Checked,
}

/// Serializable picture of a session, for hosts that persist or mirror it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub variation: Variation,
    pub phase: Phase,
    pub current_index: usize,
    pub attempt_count: u32,
    pub elapsed_secs: u64,
    pub interaction: Interaction,
    pub verdict: Option<Verdict>,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One learner's attempt at one exercise.
///
/// Moves `NotStarted → InProgress → Checked`, and back to `InProgress` on
/// [`ExerciseSession::redo`]. Mutations return whether they applied; all of
/// them are refused once the attempt is checked.
pub struct ExerciseSession {
    content: ExerciseContent,
    variation: Variation,
    randomize: Option<bool>,
    interaction: Interaction,
    phase: Phase,
    current_index: usize,
    attempt_count: u32,
    verdict: Option<Verdict>,
    stopwatch: Stopwatch,
    clock: Clock,
    started_at: Option<DateTime<Utc>>,
    checked_at: Option<DateTime<Utc>>,
}

impl ExerciseSession {
    /// Resolve the variation and build the first attempt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Malformed` if the content cannot back a session.
    pub fn new(content: ExerciseContent, config: SessionConfig) -> Result<Self, SessionError> {
        Self::with_resolver(content, config, &Resolver::default())
    }

    /// Like [`ExerciseSession::new`] with custom classification thresholds.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Malformed` if the content cannot back a session.
    pub fn with_resolver(
        content: ExerciseContent,
        config: SessionConfig,
        resolver: &Resolver,
    ) -> Result<Self, SessionError> {
        Self::with_rng(content, config, resolver, &mut rand::rng())
    }

    /// Build a session drawing the initial shuffle from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Malformed` if the content cannot back a session.
    pub fn with_rng<R: Rng + ?Sized>(
        content: ExerciseContent,
        config: SessionConfig,
        resolver: &Resolver,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let variation = resolver.resolve(&content, config.variation.as_deref())?;
        let interaction = Interaction::new(&content, variation, config.randomize, rng)?;

        Ok(Self {
            content,
            variation,
            randomize: config.randomize,
            interaction,
            phase: Phase::NotStarted,
            current_index: 0,
            attempt_count: 1,
            verdict: None,
            stopwatch: Stopwatch::new(),
            clock: Clock::default(),
            started_at: None,
            checked_at: None,
        })
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn content(&self) -> &ExerciseContent {
        &self.content
    }

    #[must_use]
    pub fn variation(&self) -> Variation {
        self.variation
    }

    #[must_use]
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    /// Verdict of the current attempt; `None` until checked.
    #[must_use]
    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.stopwatch.elapsed_secs()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn checked_at(&self) -> Option<DateTime<Utc>> {
        self.checked_at
    }

    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.phase == Phase::Checked
    }

    /// Move to `InProgress` and start the elapsed counter. No-op unless
    /// the session has not started yet.
    pub fn start(&mut self) {
        if self.phase == Phase::NotStarted {
            self.phase = Phase::InProgress;
            self.started_at = Some(self.clock.now());
            self.stopwatch.start();
            tracing::debug!(variation = %self.variation, "exercise started");
        }
    }

    /// Advance the elapsed counter by one second. Driven by the host timer;
    /// ignored unless the attempt is in progress.
    pub fn tick(&mut self) {
        self.stopwatch.tick();
    }

    fn mutate(
        &mut self,
        op: &'static str,
        apply: impl FnOnce(&ExerciseContent, &mut Interaction) -> bool,
    ) -> bool {
        if self.phase == Phase::Checked {
            tracing::debug!(op, "ignoring mutation on checked exercise");
            return false;
        }
        let applied = apply(&self.content, &mut self.interaction);
        if applied {
            self.start();
        } else {
            tracing::debug!(op, variation = %self.variation, "rejected mutation");
        }
        applied
    }

    //
    // ─── MUTATIONS ─────────────────────────────────────────────────────────────
    //

    pub fn select_option(&mut self, question: usize, option: usize) -> bool {
        self.mutate("select_option", |content, interaction| {
            match (content, interaction) {
                (ExerciseContent::MultipleChoice(c), Interaction::MultipleChoice(s)) => {
                    s.select_option(c, question, option)
                }
                _ => false,
            }
        })
    }

    pub fn set_blank_value(&mut self, sentence: usize, blank: usize, value: &str) -> bool {
        self.mutate("set_blank_value", |_, interaction| match interaction {
            Interaction::FillBlank(s) => s.set_blank_value(sentence, blank, value),
            _ => false,
        })
    }

    pub fn move_segment(&mut self, sentence: usize, from: usize, to: usize) -> bool {
        self.mutate("move_segment", |_, interaction| match interaction {
            Interaction::Ordering(s) => s.move_segment(sentence, from, to),
            _ => false,
        })
    }

    /// Side-by-side matching: arm, disarm or link.
    pub fn select(&mut self, side: MatchSide, index: usize) -> bool {
        self.mutate("select", |_, interaction| match interaction {
            Interaction::SideBySide(s) => s.select(side, index),
            _ => false,
        })
    }

    pub fn unlink(&mut self, left: usize) -> bool {
        self.mutate("unlink", |_, interaction| match interaction {
            Interaction::SideBySide(s) => s.unlink(left),
            _ => false,
        })
    }

    /// Question-based matching: place a bank word in a question slot.
    pub fn assign_word(&mut self, question: usize, word: usize) -> bool {
        self.mutate("assign_word", |_, interaction| match interaction {
            Interaction::QuestionBased(s) => s.assign_word(question, word),
            _ => false,
        })
    }

    pub fn clear_word(&mut self, question: usize) -> bool {
        self.mutate("clear_word", |_, interaction| match interaction {
            Interaction::QuestionBased(s) => s.clear_word(question),
            _ => false,
        })
    }

    pub fn select_column(&mut self, column: usize, position: usize) -> bool {
        self.mutate("select_column", |_, interaction| match interaction {
            Interaction::Threesome(s) => s.select_column(column, position),
            _ => false,
        })
    }

    /// Categorize: move an item into a category, or to the pool with `None`.
    pub fn move_item(&mut self, item: usize, target: Option<usize>) -> bool {
        self.mutate("move_item", |_, interaction| match interaction {
            Interaction::Categorize(s) => s.move_item(item, target),
            _ => false,
        })
    }

    pub fn toggle(&mut self, id: usize) -> bool {
        self.mutate("toggle", |_, interaction| match interaction {
            Interaction::Selector(s) => s.toggle(id),
            _ => false,
        })
    }

    //
    // ─── CHECK / REDO ──────────────────────────────────────────────────────────
    //

    /// Grade the attempt and freeze it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyChecked` if this attempt was already graded.
    pub fn check(&mut self) -> Result<&Verdict, SessionError> {
        if self.phase == Phase::Checked {
            return Err(SessionError::AlreadyChecked);
        }
        self.start();

        let verdict = evaluate(&self.content, &self.interaction);
        self.stopwatch.stop();
        self.phase = Phase::Checked;
        self.checked_at = Some(self.clock.now());
        tracing::info!(
            variation = %self.variation,
            attempt = self.attempt_count,
            correct = verdict.overall_correct(),
            elapsed_secs = self.stopwatch.elapsed_secs(),
            "exercise checked"
        );
        Ok(self.verdict.insert(verdict))
    }

    /// Start a fresh attempt with a new shuffle.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotChecked` unless the current attempt is checked.
    pub fn redo(&mut self) -> Result<(), SessionError> {
        self.redo_with_rng(&mut rand::rng())
    }

    /// [`ExerciseSession::redo`] drawing the shuffle from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotChecked` unless the current attempt is checked.
    pub fn redo_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SessionError> {
        if self.phase != Phase::Checked {
            return Err(SessionError::NotChecked);
        }

        self.interaction = Interaction::new(&self.content, self.variation, self.randomize, rng)?;
        self.verdict = None;
        self.attempt_count += 1;
        self.current_index = 0;
        self.phase = Phase::InProgress;
        self.started_at = Some(self.clock.now());
        self.checked_at = None;
        self.stopwatch.restart();
        tracing::info!(
            variation = %self.variation,
            attempt = self.attempt_count,
            "exercise restarted"
        );
        Ok(())
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    /// Number of navigable units (questions, sentences, pairs, rows, categories).
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.interaction.unit_count()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current_index + 1)
    }

    pub fn previous(&mut self) -> bool {
        match self.current_index.checked_sub(1) {
            Some(index) => self.go_to(index),
            None => false,
        }
    }

    /// Jump to any unit. Callers gate free jumps with
    /// [`can_jump`](super::can_jump).
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.unit_count() {
            return false;
        }
        self.current_index = index;
        true
    }

    //
    // ─── PROGRESS ──────────────────────────────────────────────────────────────
    //

    /// One entry per navigable unit.
    #[must_use]
    pub fn progress_entries(&self) -> Vec<ProgressEntry> {
        progress::entries(&self.interaction.answered_units(), self.verdict.as_ref())
    }

    #[must_use]
    pub fn progress(&self) -> ProgressSummary {
        ProgressSummary::from_entries(&self.progress_entries())
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            variation: self.variation,
            phase: self.phase,
            current_index: self.current_index,
            attempt_count: self.attempt_count,
            elapsed_secs: self.stopwatch.elapsed_secs(),
            interaction: self.interaction.clone(),
            verdict: self.verdict.clone(),
        }
    }
}

impl fmt::Debug for ExerciseSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExerciseSession")
            .field("kind", &self.content.kind())
            .field("variation", &self.variation)
            .field("phase", &self.phase)
            .field("current_index", &self.current_index)
            .field("attempt_count", &self.attempt_count)
            .field("verdict", &self.verdict)
            .field("started_at", &self.started_at)
            .field("checked_at", &self.checked_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

/// Game state machine
///
/// `Session` owns everything that changes during play: the current screen,
/// the shuffled active pair set, the score/history and the set of files
/// that failed to load. The UI only reads it and calls the transition
/// methods below.
///
/// Asynchronous work (image loads, the reveal delay) is tagged with the
/// `RoundToken` of the round it was issued for. A result whose token is no
/// longer live is dropped, which is how an in-flight load is abandoned when
/// the round changes underneath it.

use rand::Rng;

use super::catalog::Catalog;
use super::data::{GameState, PhotoPair, RoundPresentation, RoundResult, Side};
use super::round::assign_sides;
use super::summary::{summarize, Summary};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Landing,
    Playing,
    Result,
    /// Every pair was removed because its files are missing
    NoPlayablePairs,
}

/// Generation number of a round entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoundToken(u64);

/// Where the live round is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Waiting for both images
    Loading,
    /// Images shown, waiting for a choice
    Ready,
    /// Answer given, feedback showing
    Revealed { choice: Side },
}

#[derive(Debug, Clone)]
struct Round {
    token: RoundToken,
    presentation: RoundPresentation,
    phase: RoundPhase,
}

/// Read-only view of the live round for the UI
#[derive(Debug, Clone, Copy)]
pub struct RoundView<'a> {
    pub token: RoundToken,
    pub pair: &'a PhotoPair,
    pub presentation: &'a RoundPresentation,
    pub phase: RoundPhase,
    /// 1-based round number
    pub step: usize,
    /// Size of the active set
    pub total: usize,
}

impl RoundView<'_> {
    /// The user's choice, once revealed
    pub fn choice(&self) -> Option<Side> {
        match self.phase {
            RoundPhase::Revealed { choice } => Some(choice),
            _ => None,
        }
    }

    /// Whether the revealed choice was right
    pub fn was_correct(&self) -> Option<bool> {
        self.choice().map(|c| c == self.presentation.phone_side)
    }
}

/// One play session
#[derive(Debug, Default)]
pub struct Session {
    screen: Screen,
    pairs: Vec<PhotoPair>,
    game: GameState,
    missing_files: Vec<String>,
    round: Option<Round>,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Read-only accessors ==========

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// The session's working list of pairs
    pub fn active_pairs(&self) -> &[PhotoPair] {
        &self.pairs
    }

    /// Files that failed to load, deduplicated, in failure order
    pub fn missing_files(&self) -> &[String] {
        &self.missing_files
    }

    /// The live round, if one is on screen
    pub fn round_view(&self) -> Option<RoundView<'_>> {
        if self.screen != Screen::Playing || self.game.is_game_over {
            return None;
        }
        let round = self.round.as_ref()?;
        let pair = self.pairs.get(self.game.current_index)?;

        Some(RoundView {
            token: round.token,
            pair,
            presentation: &round.presentation,
            phase: round.phase,
            step: self.game.current_index + 1,
            total: self.pairs.len(),
        })
    }

    pub fn summary(&self) -> Summary {
        summarize(&self.game.history)
    }

    // ========== Transitions ==========

    /// Start (or restart) a game from the landing or result screen.
    ///
    /// Returns the token of the first round to load.
    pub fn start_game<R: Rng + ?Sized>(
        &mut self,
        catalog: &Catalog,
        rng: &mut R,
    ) -> Option<RoundToken> {
        if !matches!(self.screen, Screen::Landing | Screen::Result) {
            tracing::debug!("Ignoring start while on {:?}", self.screen);
            return None;
        }

        self.pairs = catalog.shuffle(rng);
        self.missing_files.clear();
        self.game = GameState::default();
        self.round = None;
        self.screen = Screen::Playing;

        tracing::info!("🎮 New game with {} pairs", self.pairs.len());

        if self.pairs.is_empty() {
            self.screen = Screen::NoPlayablePairs;
            return None;
        }

        Some(self.enter_round(rng))
    }

    /// Both images of a round arrived
    pub fn round_loaded(&mut self, token: RoundToken) -> bool {
        match self.live_round_mut(token) {
            Some(round) if round.phase == RoundPhase::Loading => {
                round.phase = RoundPhase::Ready;
                true
            }
            _ => {
                tracing::debug!("Dropping stale load result {:?}", token);
                false
            }
        }
    }

    /// The user picked a side.
    ///
    /// Only the first choice of a loaded round counts. Returns the token to
    /// commit once the reveal delay has passed.
    pub fn submit_answer(&mut self, choice: Side) -> Option<RoundToken> {
        if self.screen != Screen::Playing || self.game.is_game_over {
            return None;
        }
        let round = self.round.as_mut()?;
        if round.phase != RoundPhase::Ready {
            return None;
        }

        round.phase = RoundPhase::Revealed { choice };
        Some(round.token)
    }

    /// Record the revealed answer and move to the next round.
    ///
    /// Returns the token of the next round to load, if any.
    pub fn commit_answer<R: Rng + ?Sized>(
        &mut self,
        token: RoundToken,
        rng: &mut R,
    ) -> Option<RoundToken> {
        let (choice, correct_choice) = match self.live_round_mut(token) {
            Some(Round {
                phase: RoundPhase::Revealed { choice },
                presentation,
                ..
            }) => (*choice, presentation.phone_side),
            _ => {
                tracing::debug!("Dropping stale answer commit {:?}", token);
                return None;
            }
        };
        let pair_id = self.pairs.get(self.game.current_index)?.id;

        let was_correct = choice == correct_choice;
        self.game.history.push(RoundResult {
            pair_id,
            was_correct,
            user_choice: choice,
            correct_choice,
        });
        if was_correct {
            self.game.score += 1;
        }
        self.game.current_index += 1;
        self.round = None;

        if self.game.current_index >= self.pairs.len() {
            self.game.is_game_over = true;
            self.settle();
            return None;
        }

        Some(self.enter_round(rng))
    }

    /// One of the live round's files could not be loaded.
    ///
    /// The pair is dropped from the active set without moving the index, so
    /// the next pair slides into the current slot. Returns the token of the
    /// substitute round to load, if any.
    pub fn report_load_failure<R: Rng + ?Sized>(
        &mut self,
        token: RoundToken,
        file: &str,
        rng: &mut R,
    ) -> Option<RoundToken> {
        match self.live_round_mut(token) {
            Some(round) if round.phase == RoundPhase::Loading => {}
            _ => {
                tracing::debug!("Dropping stale load failure {:?} ({})", token, file);
                return None;
            }
        }

        tracing::warn!("⚠️  Missing asset: {}", file);
        if !self.missing_files.iter().any(|f| f == file) {
            self.missing_files.push(file.to_string());
        }

        let index = self.game.current_index;
        let removed = self.pairs.remove(index);
        self.round = None;
        tracing::info!(
            "Removed pair {} ({}), {} left",
            removed.id,
            removed.category,
            self.pairs.len()
        );

        if self.pairs.is_empty() {
            self.screen = Screen::NoPlayablePairs;
            return None;
        }
        if index >= self.pairs.len() {
            self.game.is_game_over = true;
            self.settle();
            return None;
        }

        Some(self.enter_round(rng))
    }

    /// Leave the missing-files screen
    pub fn acknowledge_missing(&mut self) {
        if self.screen == Screen::NoPlayablePairs {
            self.screen = Screen::Landing;
        }
    }

    // ========== Internals ==========

    /// Begin the round at `current_index` with a fresh side assignment
    fn enter_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> RoundToken {
        self.generation += 1;
        let token = RoundToken(self.generation);
        let presentation = assign_sides(&self.pairs[self.game.current_index], rng);

        self.round = Some(Round {
            token,
            presentation,
            phase: RoundPhase::Loading,
        });
        token
    }

    fn live_round_mut(&mut self, token: RoundToken) -> Option<&mut Round> {
        if self.screen != Screen::Playing {
            return None;
        }
        self.round.as_mut().filter(|round| round.token == token)
    }

    /// Game over while playing always lands on the result screen
    fn settle(&mut self) {
        if self.game.is_game_over && self.screen == Screen::Playing {
            let summary = self.summary();
            tracing::info!("🏁 Game over: {}/{}", summary.score, summary.total);
            self.screen = Screen::Result;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog(n: u32) -> Catalog {
        Catalog::new(
            (1..=n)
                .map(|id| PhotoPair {
                    id,
                    phone_file: format!("{id} iphone.jpg"),
                    full_frame_file: format!("{id} sony.jpg"),
                    category: format!("Subject {id}"),
                })
                .collect(),
        )
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2024)
    }

    /// Load the live round and answer it; returns the next token
    fn play_round(
        session: &mut Session,
        token: RoundToken,
        correct: bool,
        rng: &mut StdRng,
    ) -> Option<RoundToken> {
        assert!(session.round_loaded(token));
        let phone_side = session.round_view().unwrap().presentation.phone_side;
        let choice = if correct { phone_side } else { phone_side.other() };
        let commit = session.submit_answer(choice).unwrap();
        session.commit_answer(commit, rng)
    }

    fn assert_score_matches_history(session: &Session) {
        let correct = session.game().history.iter().filter(|r| r.was_correct).count();
        assert_eq!(session.game().score as usize, correct);
    }

    #[test]
    fn test_start_resets_everything() {
        let mut rng = rng();
        let mut session = Session::new();
        assert_eq!(session.screen(), Screen::Landing);

        let token = session.start_game(&catalog(4), &mut rng);
        assert!(token.is_some());
        assert_eq!(session.screen(), Screen::Playing);
        assert_eq!(session.game(), &GameState::default());
        assert_eq!(session.active_pairs().len(), 4);

        let view = session.round_view().unwrap();
        assert_eq!(view.phase, RoundPhase::Loading);
        assert_eq!(view.step, 1);
        assert_eq!(view.total, 4);
    }

    #[test]
    fn test_input_ignored_until_loaded() {
        let mut rng = rng();
        let mut session = Session::new();
        session.start_game(&catalog(2), &mut rng).unwrap();

        assert_eq!(session.submit_answer(Side::A), None);
        assert_eq!(session.round_view().unwrap().phase, RoundPhase::Loading);
    }

    #[test]
    fn test_second_answer_is_ignored() {
        let mut rng = rng();
        let mut session = Session::new();
        let token = session.start_game(&catalog(2), &mut rng).unwrap();
        session.round_loaded(token);

        let commit = session.submit_answer(Side::A).unwrap();
        let before = session.game().clone();

        assert_eq!(session.submit_answer(Side::B), None);
        assert_eq!(session.game(), &before);
        assert_eq!(session.round_view().unwrap().choice(), Some(Side::A));

        session.commit_answer(commit, &mut rng);
        assert_eq!(session.game().history.len(), 1);
        assert_eq!(session.game().history[0].user_choice, Side::A);

        // A second commit for the same round changes nothing
        let after = session.game().clone();
        assert_eq!(session.commit_answer(commit, &mut rng), None);
        assert_eq!(session.game(), &after);
    }

    #[test]
    fn test_presentation_stable_within_round() {
        let mut rng = rng();
        let mut session = Session::new();
        let token = session.start_game(&catalog(3), &mut rng).unwrap();

        let first = session.round_view().unwrap().presentation.clone();
        session.round_loaded(token);
        assert_eq!(session.round_view().unwrap().presentation, &first);
        session.submit_answer(Side::B);
        assert_eq!(session.round_view().unwrap().presentation, &first);
    }

    #[test]
    fn test_answer_scoring_and_index() {
        let mut rng = rng();
        let mut session = Session::new();
        let mut token = session.start_game(&catalog(4), &mut rng);

        let mut expected_index = 0;
        for correct in [true, false, true] {
            let live = token.unwrap();
            session.round_loaded(live);
            let view = session.round_view().unwrap();
            let pair_id = view.pair.id;
            let phone_side = view.presentation.phone_side;
            let choice = if correct { phone_side } else { phone_side.other() };

            let commit = session.submit_answer(choice).unwrap();
            token = session.commit_answer(commit, &mut rng);
            expected_index += 1;

            let last = session.game().history.last().unwrap();
            assert_eq!(last.pair_id, pair_id);
            assert_eq!(last.was_correct, last.user_choice == last.correct_choice);
            assert_eq!(last.correct_choice, phone_side);
            assert_eq!(session.game().current_index, expected_index);
            assert_eq!(session.game().history.len(), expected_index);
            assert_score_matches_history(&session);
        }
        assert_eq!(session.screen(), Screen::Playing);
    }

    #[test]
    fn test_three_rounds_two_correct() {
        let mut rng = rng();
        let mut session = Session::new();
        let mut token = session.start_game(&catalog(3), &mut rng);

        for correct in [true, true, false] {
            token = play_round(&mut session, token.unwrap(), correct, &mut rng);
        }

        assert_eq!(token, None);
        assert!(session.game().is_game_over);
        assert_eq!(session.screen(), Screen::Result);

        let summary = session.summary();
        assert_eq!(summary.score, 2);
        assert_eq!(summary.total, 3);
        assert!((summary.percentage - 66.67).abs() < 0.01);
        assert_eq!(summary.tier, crate::state::summary::Tier::Mid);
    }

    #[test]
    fn test_perfect_run() {
        let mut rng = rng();
        let mut session = Session::new();
        let mut token = session.start_game(&catalog(5), &mut rng);

        while let Some(live) = token {
            token = play_round(&mut session, live, true, &mut rng);
        }

        let summary = session.summary();
        assert_eq!(summary.percentage, 100.0);
        assert_eq!(summary.tier, crate::state::summary::Tier::Top);
        assert_eq!(session.screen(), Screen::Result);
    }

    #[test]
    fn test_failure_removes_pair_and_keeps_index() {
        let mut rng = rng();
        let mut session = Session::new();
        let token = session.start_game(&catalog(2), &mut rng).unwrap();
        let second = session.active_pairs()[1].clone();
        let failed_file = session.round_view().unwrap().presentation.left_file.clone();

        let next = session.report_load_failure(token, &failed_file, &mut rng);
        assert!(next.is_some());
        assert_ne!(next, Some(token));

        assert_eq!(session.active_pairs().len(), 1);
        assert_eq!(session.game().current_index, 0);
        assert_eq!(session.round_view().unwrap().pair, &second);
        assert_eq!(session.missing_files(), [failed_file]);

        // The old round's results no longer apply
        assert!(!session.round_loaded(token));

        let done = play_round(&mut session, next.unwrap(), false, &mut rng);
        assert_eq!(done, None);
        assert_eq!(session.screen(), Screen::Result);
        assert_eq!(session.summary().total, 1);
    }

    #[test]
    fn test_last_pair_missing_ends_game() {
        let mut rng = rng();
        let mut session = Session::new();
        let token = session.start_game(&catalog(2), &mut rng);
        let last = play_round(&mut session, token.unwrap(), true, &mut rng).unwrap();

        let next = session.report_load_failure(last, "gone.jpg", &mut rng);
        assert_eq!(next, None);
        assert_eq!(session.game().current_index, 1);
        assert!(session.game().is_game_over);
        assert_eq!(session.screen(), Screen::Result);
        assert_eq!(session.summary().total, 1);
    }

    #[test]
    fn test_single_missing_pair_is_a_dead_end() {
        let mut rng = rng();
        let mut session = Session::new();
        let token = session.start_game(&catalog(1), &mut rng).unwrap();

        assert_eq!(session.report_load_failure(token, "1 sony.jpg", &mut rng), None);
        assert_eq!(session.screen(), Screen::NoPlayablePairs);
        assert!(!session.game().is_game_over);
        assert!(session.round_view().is_none());
        assert_eq!(session.missing_files(), ["1 sony.jpg".to_string()]);

        session.acknowledge_missing();
        assert_eq!(session.screen(), Screen::Landing);

        // Restart starts clean and hits the same files again
        let retry = session.start_game(&catalog(1), &mut rng);
        assert!(retry.is_some());
        assert!(session.missing_files().is_empty());
    }

    #[test]
    fn test_missing_files_are_deduplicated() {
        let mut rng = rng();
        let mut session = Session::new();
        let mut token = session.start_game(&catalog(3), &mut rng);

        for _ in 0..2 {
            token = session.report_load_failure(token.unwrap(), "shared.jpg", &mut rng);
        }
        assert_eq!(session.missing_files(), ["shared.jpg".to_string()]);
        assert_eq!(session.active_pairs().len(), 1);
        assert!(token.is_some());
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut rng = rng();
        let mut session = Session::new();
        let token = session.start_game(&catalog(3), &mut rng).unwrap();
        let next = play_round(&mut session, token, true, &mut rng).unwrap();

        assert_eq!(session.report_load_failure(token, "old.jpg", &mut rng), None);
        assert_eq!(session.active_pairs().len(), 3);
        assert!(session.missing_files().is_empty());

        // Failures after a successful load do not count either
        session.round_loaded(next);
        assert_eq!(session.report_load_failure(next, "late.jpg", &mut rng), None);
        assert_eq!(session.active_pairs().len(), 3);
    }

    #[test]
    fn test_empty_catalog() {
        let mut rng = rng();
        let mut session = Session::new();

        assert_eq!(session.start_game(&catalog(0), &mut rng), None);
        assert_eq!(session.screen(), Screen::NoPlayablePairs);
        assert!(session.missing_files().is_empty());
    }

    #[test]
    fn test_restart_from_result() {
        let mut rng = rng();
        let mut session = Session::new();
        let token = session.start_game(&catalog(1), &mut rng);
        play_round(&mut session, token.unwrap(), true, &mut rng);
        assert_eq!(session.screen(), Screen::Result);

        assert!(session.start_game(&catalog(2), &mut rng).is_some());
        assert_eq!(session.screen(), Screen::Playing);
        assert_eq!(session.game(), &GameState::default());
        assert_eq!(session.summary().total, 0);
    }

    #[test]
    fn test_start_ignored_mid_game() {
        let mut rng = rng();
        let mut session = Session::new();
        let token = session.start_game(&catalog(2), &mut rng);

        assert_eq!(session.start_game(&catalog(2), &mut rng), None);
        assert_eq!(session.round_view().unwrap().token, token.unwrap());
    }
}

//! The game state store
//!
//! [`GameStateStore`] owns one [`GameSessionState`] and exposes the named
//! operations the presentation layer calls in response to user input and
//! timer expiry. Every applied operation broadcasts the full resulting
//! snapshot to all subscribers before returning.

use std::fmt::Debug;

use tracing::{debug, warn};

use crate::{
    config::{GameConfig, Question},
    constants,
    observer::{Observer, SubscriptionId, Subscribers},
    state::{GameSessionState, Options, Phase, Scoreboard, Team},
};

/// Owner of a single game session's state
///
/// All mutations go through `&mut self`, so at most one transition is in
/// flight at a time and subscribers only ever observe complete snapshots.
pub struct GameStateStore {
    /// The session record
    state: GameSessionState,
    /// Options chosen at construction, kept across resets
    options: Options,
    /// Observers notified after every transition
    subscribers: Subscribers<GameSessionState>,
}

impl Debug for GameStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameStateStore")
            .field("state", &self.state)
            .field("options", &self.options)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for GameStateStore {
    fn default() -> Self {
        Self::new()
    }
}

// Subscriptions and reads
impl GameStateStore {
    /// Creates a store with team scoring enabled
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shoutout::state::Phase;
    /// use shoutout::store::GameStateStore;
    ///
    /// let store = GameStateStore::new();
    /// assert_eq!(store.phase(), Phase::ConfigLoading);
    /// ```
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Creates a store with the given options
    ///
    /// # Arguments
    ///
    /// * `options` - Options kept for the lifetime of the store
    pub fn with_options(options: Options) -> Self {
        Self {
            state: GameSessionState::initial(options),
            options,
            subscribers: Subscribers::default(),
        }
    }

    /// Registers an observer
    ///
    /// The observer is called once immediately with the current snapshot,
    /// then once after every applied transition.
    ///
    /// # Returns
    ///
    /// The handle to pass to [`GameStateStore::unsubscribe`]
    pub fn subscribe<O: Observer<GameSessionState> + 'static>(
        &mut self,
        mut observer: O,
    ) -> SubscriptionId {
        observer.notify(&self.state);
        let id = self.subscribers.add(observer);
        debug!(%id, "subscribed to game state");
        id
    }

    /// Removes an observer
    ///
    /// # Returns
    ///
    /// `true` if the subscription existed, `false` otherwise
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.subscribers.remove(id);
        debug!(%id, removed, "unsubscribed from game state");
        removed
    }

    /// Returns the number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Borrows the current snapshot
    pub fn snapshot(&self) -> &GameSessionState {
        &self.state
    }

    /// Returns the options this store was created with
    pub fn options(&self) -> Options {
        self.options
    }

    /// Returns the current phase
    pub fn phase(&self) -> Phase {
        self.state.game_state
    }

    /// The question on screen, if any
    pub fn current_question(&self) -> Option<&Question> {
        self.state.current_question()
    }

    /// Whether the session reached its terminal phase
    pub fn is_complete(&self) -> bool {
        self.state.game_state == Phase::GameComplete
    }

    /// Returns a team's score, or `None` without team scoring
    pub fn team_score(&self, team: Team) -> Option<u64> {
        self.state.scoring.as_ref().map(|s| s.team_score(team))
    }

    /// Returns the pending tally, or `None` without team scoring
    pub fn current_counter(&self) -> Option<u64> {
        self.state.scoring.as_ref().map(Scoreboard::current_counter)
    }

    /// Applies a transition and broadcasts the result
    fn update<F: FnOnce(&mut GameSessionState)>(&mut self, operation: &'static str, f: F) {
        f(&mut self.state);
        debug!(
            operation,
            phase = %self.state.game_state,
            index = self.state.current_question_index,
            "applied game state transition"
        );
        self.subscribers.notify_all(&self.state);
    }

    /// Applies a transition to the scoreboard, if team scoring is enabled
    fn update_scoring<F: FnOnce(&mut Scoreboard)>(&mut self, operation: &'static str, f: F) {
        if self.state.scoring.is_none() {
            debug!(operation, "team scoring disabled, ignoring");
            return;
        }
        self.update(operation, |state| {
            if let Some(scoring) = state.scoring.as_mut() {
                f(scoring);
            }
        });
    }
}

// Question flow
impl GameStateStore {
    /// Loads a configuration and rewinds to its first question
    ///
    /// Overwrites any previous configuration. Team scores carry over; use
    /// [`GameStateStore::reset_game`] to clear them. Enters `config-loaded`
    /// with team scoring, `playing` without.
    pub fn load_config(&mut self, config: GameConfig) {
        let next_phase = if self.options.team_scoring() {
            Phase::ConfigLoaded
        } else {
            Phase::Playing
        };
        self.update("load_config", |state| {
            state.config = Some(config);
            state.current_question_index = 0;
            state.reset_reveals();
            state.timer_expired = false;
            state.game_state = next_phase;
        });
    }

    /// Enters the `playing` phase
    pub fn start_game(&mut self) {
        if self.is_complete() {
            debug!("game complete, ignoring start");
            return;
        }
        self.update("start_game", |state| {
            state.game_state = Phase::Playing;
        });
    }

    /// Opens one reveal slot
    ///
    /// Opening the last closed slot completes the question and, with team
    /// scoring, sets the counter to the number of open slots.
    ///
    /// # Arguments
    ///
    /// * `index` - The slot to open, below [`constants::reveal::SLOT_COUNT`]
    ///
    /// # Returns
    ///
    /// `false` if the call was ignored because the index is out of range
    /// or the game is complete, `true` otherwise
    pub fn reveal_answer(&mut self, index: usize) -> bool {
        if index >= constants::reveal::SLOT_COUNT {
            warn!(index, "reveal slot out of range, ignoring");
            return false;
        }
        if self.is_complete() {
            debug!(index, "game complete, ignoring reveal");
            return false;
        }
        self.update("reveal_answer", |state| {
            state.slots_mut()[index] = true;
            if state.all_revealed() {
                state.game_state = Phase::QuestionComplete;
                let count = state.revealed_count() as u64;
                if let Some(scoring) = state.scoring.as_mut() {
                    scoring.set_counter(count);
                }
            }
        });
        true
    }

    /// Opens every reveal slot and completes the question
    ///
    /// With team scoring, the counter is set to the number of slots that
    /// were open before this call, not to the slot count.
    pub fn reveal_all(&mut self) {
        if self.is_complete() {
            debug!("game complete, ignoring reveal all");
            return;
        }
        self.update("reveal_all", |state| {
            let previously_revealed = state.revealed_count() as u64;
            state.slots_mut().fill(true);
            state.game_state = Phase::QuestionComplete;
            if let Some(scoring) = state.scoring.as_mut() {
                scoring.set_counter(previously_revealed);
            }
        });
    }

    /// Advances to the next question
    ///
    /// Closes every slot, clears the timer flag and the counter. Moving past
    /// the last question, or advancing without a configuration, completes
    /// the game; the index never exceeds the question count.
    pub fn next_question(&mut self) {
        if self.is_complete() {
            debug!("game complete, ignoring next question");
            return;
        }
        self.update("next_question", |state| {
            let count = state.config.as_ref().map_or(0, GameConfig::len);
            let next_index = (state.current_question_index + 1).min(count);

            state.current_question_index = next_index;
            state.reset_reveals();
            state.timer_expired = false;
            if let Some(scoring) = state.scoring.as_mut() {
                scoring.set_counter(0);
            }
            state.game_state = if next_index >= count {
                Phase::GameComplete
            } else {
                Phase::Playing
            };
        });
    }

    /// Records whether the external countdown ran out
    pub fn set_timer_expired(&mut self, expired: bool) {
        self.update("set_timer_expired", |state| {
            state.timer_expired = expired;
        });
    }

    /// Returns to the default state, dropping the configuration and scores
    pub fn reset_game(&mut self) {
        let options = self.options;
        self.update("reset_game", |state| {
            *state = GameSessionState::initial(options);
        });
    }
}

// Team scoring
impl GameStateStore {
    /// Adds one to the counter
    pub fn increment_counter(&mut self) {
        self.update_scoring("increment_counter", Scoreboard::increment);
    }

    /// Subtracts one from the counter, stopping at zero
    pub fn decrement_counter(&mut self) {
        self.update_scoring("decrement_counter", Scoreboard::decrement);
    }

    /// Sets the counter to zero
    pub fn reset_counter(&mut self) {
        self.update_scoring("reset_counter", |scoring| scoring.set_counter(0));
    }

    /// Awards the counter to a team and sets the counter to zero
    pub fn add_to_team(&mut self, team: Team) {
        self.update_scoring("add_to_team", |scoring| scoring.award(team));
    }

    /// Awards the counter to the first team
    pub fn add_to_team1(&mut self) {
        self.add_to_team(Team::Team1);
    }

    /// Awards the counter to the second team
    pub fn add_to_team2(&mut self) {
        self.add_to_team(Team::Team2);
    }
}

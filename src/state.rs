//! Session state and its snapshot form
//!
//! [`GameSessionState`] is the single record owned by the store and the
//! exact value handed to subscribers after every transition. Its serialized
//! form keeps the field and phase names the presentation layer renders.

use enum_map::{Enum, EnumMap};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    config::{GameConfig, Question},
    constants,
};

/// The phase of the game session
///
/// Sessions start in `ConfigLoading` and move towards `GameComplete`,
/// which only a reset leaves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// No configuration has been loaded yet
    #[default]
    #[display("config-loading")]
    ConfigLoading,
    /// A configuration is loaded and the host has not started yet
    /// (team scoring only)
    #[display("config-loaded")]
    ConfigLoaded,
    /// A question is on screen and answers are being revealed
    #[display("playing")]
    Playing,
    /// Every reveal slot of the current question is open
    #[display("question-complete")]
    QuestionComplete,
    /// All questions have been played
    #[display("game-complete")]
    GameComplete,
}

/// One of the two competing teams
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize, derive_more::Display,
)]
pub enum Team {
    /// The first team
    #[display("team 1")]
    Team1,
    /// The second team
    #[display("team 2")]
    Team2,
}

/// Serialization helper for Scoreboard struct
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreboardSerde {
    team1_score: u64,
    team2_score: u64,
    current_counter: u64,
}

/// Team scores and the scratch counter of the team scoring variant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ScoreboardSerde", into = "ScoreboardSerde")]
pub struct Scoreboard {
    /// Points accumulated by each team across the session
    team_scores: EnumMap<Team, u64>,
    /// Tally waiting to be awarded to a team
    current_counter: u64,
}

impl From<ScoreboardSerde> for Scoreboard {
    fn from(serde: ScoreboardSerde) -> Self {
        let ScoreboardSerde {
            team1_score,
            team2_score,
            current_counter,
        } = serde;
        Self {
            team_scores: EnumMap::from_array([team1_score, team2_score]),
            current_counter,
        }
    }
}

impl From<Scoreboard> for ScoreboardSerde {
    fn from(scoreboard: Scoreboard) -> Self {
        Self {
            team1_score: scoreboard.team_scores[Team::Team1],
            team2_score: scoreboard.team_scores[Team::Team2],
            current_counter: scoreboard.current_counter,
        }
    }
}

impl Scoreboard {
    /// Returns the score of a team
    pub fn team_score(&self, team: Team) -> u64 {
        self.team_scores[team]
    }

    /// Returns the pending tally
    pub fn current_counter(&self) -> u64 {
        self.current_counter
    }

    pub(crate) fn set_counter(&mut self, value: u64) {
        self.current_counter = value;
    }

    pub(crate) fn increment(&mut self) {
        self.current_counter = self.current_counter.saturating_add(1);
    }

    pub(crate) fn decrement(&mut self) {
        self.current_counter = self.current_counter.saturating_sub(1);
    }

    /// Moves the pending tally onto a team's score
    pub(crate) fn award(&mut self, team: Team) {
        self.team_scores[team] = self.team_scores[team].saturating_add(self.current_counter);
        self.current_counter = 0;
    }
}

/// Options fixed for the lifetime of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Whether team scores, the counter, and the `config-loaded` phase exist
    team_scoring: bool,
}

impl Default for Options {
    /// Team scoring is enabled by default
    fn default() -> Self {
        Self { team_scoring: true }
    }
}

impl Options {
    /// Creates options with team scoring switched on or off
    pub fn new(team_scoring: bool) -> Self {
        Self { team_scoring }
    }

    /// Options for the baseline game without scoring
    pub fn baseline() -> Self {
        Self::new(false)
    }

    /// Whether team scoring is enabled
    pub fn team_scoring(&self) -> bool {
        self.team_scoring
    }
}

/// The complete state of one game session
///
/// Subscribers receive this value after every mutation. The reveal slots
/// are empty until a configuration is loaded and hold exactly
/// [`constants::reveal::SLOT_COUNT`] entries from then on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSessionState {
    /// The loaded configuration, if any
    pub config: Option<GameConfig>,
    /// Index of the question on screen; equals the question count once done
    pub current_question_index: usize,
    /// Which reveal slots of the current question are open
    pub revealed_answers: Vec<bool>,
    /// Whether the external countdown reported that time ran out
    pub timer_expired: bool,
    /// The current phase
    pub game_state: Phase,
    /// Scores and counter, present only with team scoring enabled
    #[serde(flatten)]
    pub scoring: Option<Scoreboard>,
}

impl GameSessionState {
    /// The default state of a fresh or reset session
    pub fn initial(options: Options) -> Self {
        Self {
            config: None,
            current_question_index: 0,
            revealed_answers: Vec::new(),
            timer_expired: false,
            game_state: Phase::ConfigLoading,
            scoring: options.team_scoring().then(Scoreboard::default),
        }
    }

    /// The question at the current index, if the game has one
    pub fn current_question(&self) -> Option<&Question> {
        self.config
            .as_ref()?
            .questions
            .get(self.current_question_index)
    }

    /// Number of open reveal slots
    pub fn revealed_count(&self) -> usize {
        self.revealed_answers.iter().filter(|r| **r).count()
    }

    /// Indices of the open reveal slots, in ascending order
    pub fn revealed_slots(&self) -> Vec<usize> {
        self.revealed_answers.iter().positions(|r| *r).collect_vec()
    }

    /// Whether every reveal slot is open
    pub fn all_revealed(&self) -> bool {
        self.revealed_answers.len() == constants::reveal::SLOT_COUNT
            && self.revealed_answers.iter().all(|r| *r)
    }

    /// Converts the snapshot to a JSON string for the presentation layer
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }

    /// Closes every reveal slot, materializing them if absent
    pub(crate) fn reset_reveals(&mut self) {
        self.revealed_answers = vec![false; constants::reveal::SLOT_COUNT];
    }

    /// Mutable access to the reveal slots with the length invariant restored
    pub(crate) fn slots_mut(&mut self) -> &mut Vec<bool> {
        if self.revealed_answers.len() != constants::reveal::SLOT_COUNT {
            self.revealed_answers
                .resize(constants::reveal::SLOT_COUNT, false);
        }
        &mut self.revealed_answers
    }
}

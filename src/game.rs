use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info, trace, warn};

use crate::card::Card;
use crate::deck::Deck;
use crate::error::GameError;
use crate::player::Player;
use crate::state::{GameResult, GameSettings, GameStatus, PlayerId, PlayerSummary, RoundReport};

pub const DEFAULT_SEED: u64 = 0xBA7A_111E_5EED_5EED;

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub settings: GameSettings,
    pub seed: u64,
    pub max_rounds: Option<usize>,
}

impl GameConfig {
    pub fn new(player_count: usize, seed: u64) -> Result<Self, GameError> {
        Ok(Self {
            settings: GameSettings::new(player_count)?,
            seed,
            max_rounds: None,
        })
    }
}

/// Builder that enables deterministic hand injection for tests and scenarios.
pub struct GameBuilder {
    config: GameConfig,
    hands: Option<Vec<Vec<Card>>>,
    names: Option<Vec<String>>,
}

impl GameBuilder {
    pub fn new(player_count: usize) -> Result<Self, GameError> {
        Ok(Self {
            config: GameConfig::new(player_count, DEFAULT_SEED)?,
            hands: None,
            names: None,
        })
    }

    pub fn with_deck_shape(mut self, cards_per_suit: u32, suit_count: u32, joker_count: u32) -> Self {
        self.config.settings.cards_per_suit = cards_per_suit;
        self.config.settings.suit_count = suit_count;
        self.config.settings.joker_count = joker_count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Stop the game after `limit` rounds; it then ends as [`GameStatus::Aborted`].
    pub fn with_max_rounds(mut self, limit: usize) -> Self {
        self.config.max_rounds = Some(limit);
        self
    }

    /// Skip shuffling and dealing: seat `i` starts with `hands[i]`, front first.
    pub fn with_hands(mut self, hands: Vec<Vec<Card>>) -> Self {
        self.hands = Some(hands);
        self
    }

    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = Some(names);
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// Bataille round engine.
pub struct Game {
    settings: GameSettings,
    status: GameStatus,
    players: Vec<Player>,
    /// Seats still in the game, in the order of the last ranking.
    active: Vec<PlayerId>,
    round_count: usize,
    max_rounds: Option<usize>,
    deck_size: usize,
    forfeited_cards: usize,
    rng: StdRng,
}

impl Game {
    pub fn builder(player_count: usize) -> Result<GameBuilder, GameError> {
        GameBuilder::new(player_count)
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder {
            config,
            hands: None,
            names: None,
        }
        .build()
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self.status, GameStatus::Ongoing)
    }

    pub fn round_count(&self) -> usize {
        self.round_count
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn active_players(&self) -> &[PlayerId] {
        &self.active
    }

    /// Number of cards dealt at the start of the game.
    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    pub fn cards_in_hands(&self) -> usize {
        self.players.iter().map(Player::hand_size).sum()
    }

    /// Cards of piles that nobody could collect.
    pub fn forfeited_cards(&self) -> usize {
        self.forfeited_cards
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn standings(&self) -> Vec<PlayerSummary> {
        self.players
            .iter()
            .enumerate()
            .map(|(id, player)| PlayerSummary {
                id,
                name: player.name().to_string(),
                hand_size: player.hand_size(),
                active: self.active.contains(&id),
            })
            .collect()
    }

    pub fn result(&self) -> GameResult {
        let winner = self.winner();
        GameResult {
            winner,
            winner_name: winner.map(|id| self.players[id].name().to_string()),
            round_count: self.round_count,
            status: self.status,
        }
    }

    /// Plays rounds until at most one player holds cards or the round limit is hit.
    pub fn run(&mut self) -> Result<GameResult, GameError> {
        info!(
            players = self.players.len(),
            active = self.active.len(),
            cards = self.deck_size,
            "starting bataille"
        );
        while !self.is_finished() {
            if self
                .max_rounds
                .is_some_and(|limit| self.round_count >= limit)
            {
                warn!(rounds = self.round_count, "round limit reached, aborting game");
                self.status = GameStatus::Aborted;
                break;
            }
            self.play_round()?;
        }
        let result = self.result();
        info!(
            winner = ?result.winner_name,
            rounds = result.round_count,
            "game over"
        );
        Ok(result)
    }

    /// Resolves a single round, batailles included.
    pub fn play_round(&mut self) -> Result<RoundReport, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        self.round_count += 1;
        let mut report = RoundReport {
            round: self.round_count,
            ..RoundReport::default()
        };
        let mut pile = Vec::new();

        for &id in &self.active {
            self.players[id].play_card()?;
        }
        self.rank_active();

        while self.leader_is_tied() {
            report.batailles += 1;
            let leading = self.players[self.active[0]].score();
            let tied: Vec<PlayerId> = self
                .active
                .iter()
                .copied()
                .take_while(|&id| self.players[id].score() == leading)
                .collect();
            trace!(round = report.round, ?tied, ?leading, "bataille");

            for id in tied {
                let player = &mut self.players[id];
                if player.has_card() {
                    player.discard_card()?;
                    if player.has_card() {
                        player.play_card()?;
                        continue;
                    }
                }
                // Out of cards mid-bataille: the player's stake joins the pile.
                pile.extend(player.take_played_cards());
                player.clear();
                report.cleared.push(id);
                trace!(round = report.round, player = id, "ran out of cards during bataille");
            }
            self.rank_active();
        }

        for &id in &self.active {
            pile.extend(self.players[id].take_played_cards());
        }
        pile.shuffle(&mut self.rng);
        report.pile_size = pile.len();

        let leader = self.active[0];
        if self.players[leader].score().is_some() {
            self.players[leader].collect_cards(pile);
            report.winner = Some(leader);
        } else {
            self.forfeited_cards += pile.len();
        }

        for &id in &self.active {
            self.players[id].clear();
        }
        let players = &self.players;
        let (remaining, eliminated): (Vec<PlayerId>, Vec<PlayerId>) =
            self.active.iter().partition(|&&id| players[id].has_card());
        self.active = remaining;
        report.eliminated = eliminated;
        self.settle_status();

        debug!(
            round = report.round,
            winner = ?report.winner,
            pile = report.pile_size,
            batailles = report.batailles,
            remaining = self.active.len(),
            "round resolved"
        );
        Ok(report)
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder {
            config,
            hands,
            names,
        } = builder;
        let settings = config.settings;
        settings.validate()?;
        if config.max_rounds == Some(0) {
            return Err(GameError::InvalidConfiguration("round limit must be positive"));
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let stacks = match hands {
            Some(hands) => {
                if hands.len() != settings.player_count {
                    return Err(GameError::InvalidConfiguration(
                        "one hand must be provided per player",
                    ));
                }
                let max = settings.joker_rank();
                if let Some(card) = hands.iter().flatten().find(|card| card.rank() > max) {
                    return Err(GameError::InvalidCard {
                        rank: card.rank(),
                        max,
                    });
                }
                hands
            }
            None => Deck::new(settings.cards_per_suit, settings.suit_count, settings.joker_count)?
                .distribute(settings.player_count, &mut rng)?,
        };

        let names = match names {
            Some(names) if names.len() != settings.player_count => {
                return Err(GameError::InvalidConfiguration(
                    "one name must be provided per player",
                ));
            }
            Some(names) => names,
            None => (0..settings.player_count)
                .map(|id| format!("Player {id}"))
                .collect(),
        };

        let deck_size = stacks.iter().map(Vec::len).sum();
        let players: Vec<Player> = names
            .into_iter()
            .zip(stacks)
            .map(|(name, cards)| Player::new(name, cards))
            .collect();
        let active = (0..players.len())
            .filter(|&id| players[id].has_card())
            .collect();

        let mut game = Game {
            settings,
            status: GameStatus::Ongoing,
            players,
            active,
            round_count: 0,
            max_rounds: config.max_rounds,
            deck_size,
            forfeited_cards: 0,
            rng,
        };
        game.settle_status();
        Ok(game)
    }

    /// Stable sort of the active seats by descending score.
    fn rank_active(&mut self) {
        let players = &self.players;
        self.active
            .sort_by(|a, b| players[*b].score().cmp(&players[*a].score()));
    }

    fn leader_is_tied(&self) -> bool {
        match self.active.as_slice() {
            [first, second, ..] => {
                let leading = self.players[*first].score();
                leading.is_some() && leading == self.players[*second].score()
            }
            _ => false,
        }
    }

    fn settle_status(&mut self) {
        self.status = match self.active.as_slice() {
            [] => GameStatus::NoWinner,
            [winner] => GameStatus::Finished { winner: *winner },
            _ => GameStatus::Ongoing,
        };
    }
}

use crate::Key;
use crate::Points;
use crate::Position;
use crate::schema::*;

/// A finished game: the root of every graph.
#[derive(Debug, Clone, Default)]
pub struct Game {
    key: Option<Key<Self>>,
    winner: i16,
    scores: [Points; 2],
    pub players: Vec<GamePlayer>,
}

impl Game {
    pub fn new(winner: i16, scores: [Points; 2]) -> Self {
        Self {
            key: None,
            winner,
            scores,
            players: Vec::new(),
        }
    }
    pub fn winner(&self) -> i16 {
        self.winner
    }
    pub fn scores(&self) -> [Points; 2] {
        self.scores
    }
}

impl Parent for Game {
    const TABLE: &'static str = GAME;
    const REFERENCES: Option<(&'static str, &'static str)> = None;
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("winning_team", Kind::Int2, |g| Value::Int2(g.winner)),
        Column::required("team1_score",  Kind::Int2, |g| Value::Int2(g.scores[0])),
        Column::required("team2_score",  Kind::Int2, |g| Value::Int2(g.scores[1])),
    ];
    fn key(&self) -> Option<Key<Self>> {
        self.key
    }
    fn assign(&mut self, key: Key<Self>) {
        self.key = Some(key);
    }
}

/// Who sat in a seat for the whole game.
/// Composite key: (game_id, seat)
#[derive(Debug, Clone)]
pub struct GamePlayer {
    owner: Option<Key<Game>>,
    seat: Position,
    actor: String,
}

impl GamePlayer {
    pub fn new(seat: Position, actor: impl Into<String>) -> Self {
        Self {
            owner: None,
            seat,
            actor: actor.into(),
        }
    }
    pub fn seat(&self) -> Position {
        self.seat
    }
    pub fn actor(&self) -> &str {
        &self.actor
    }
}

impl Leaf for GamePlayer {
    type Parent = Game;
    const TABLE: &'static str = GAME_PLAYER;
    const PRIMARY: &'static [&'static str] = &["game_id", "seat"];
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("game_id", Kind::Int8, |p| Value::from(p.owner)),
        Column::required("seat",    Kind::Int2, |p| Value::from(p.seat)),
        Column::required("actor",   Kind::Text, |p| Value::Text(&p.actor)),
    ];
    fn attach(&mut self, key: Key<Game>) {
        self.owner = Some(key);
    }
}

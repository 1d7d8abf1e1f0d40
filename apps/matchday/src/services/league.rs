//! League setup and the read side used by reporting layers.

use rand::Rng;
use time::OffsetDateTime;
use tracing::info;

use super::seasons::SeasonService;
use crate::db::txn::with_txn;
use crate::domain::replay::MatchEvent;
use crate::domain::squad::{generate_squad, NewPlayer};
use crate::domain::standings::TableRow;
use crate::error::AppError;
use crate::repos::clubs::Club;
use crate::repos::leagues::League;
use crate::repos::matches::Match;
use crate::repos::rounds::Round;
use crate::repos::seasons::Season;
use crate::repos::{clubs, leagues, match_events, matches, players, rounds, seasons, standings};
use crate::state::app_state::AppState;

#[derive(Debug, Clone)]
pub struct NewClub {
    pub name: String,
    pub squad: Vec<NewPlayer>,
}

impl NewClub {
    pub fn new(name: impl Into<String>, squad: Vec<NewPlayer>) -> Self {
        Self {
            name: name.into(),
            squad,
        }
    }

    /// A club with a randomly generated squad.
    pub fn generated<R: Rng + ?Sized>(name: impl Into<String>, rng: &mut R) -> Self {
        Self::new(name, generate_squad(rng))
    }
}

#[derive(Debug, Clone)]
pub struct NewLeague {
    pub name: String,
    pub country: String,
    pub start_year: i32,
    pub clubs: Vec<NewClub>,
    /// Kick-off time of the first round
    pub first_kickoff: OffsetDateTime,
    /// Season seed; drawn from entropy when absent
    pub rng_seed: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct LeagueSetup {
    pub league: League,
    pub clubs: Vec<Club>,
    pub season: Season,
}

/// A round with its matches, in kick-off order.
#[derive(Debug, Clone)]
pub struct RoundFixtures {
    pub round: Round,
    pub matches: Vec<Match>,
}

pub struct LeagueService {
    state: AppState,
}

impl LeagueService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Persist a league with its clubs and squads, then schedule and install
    /// its first season. All or nothing.
    pub async fn create_league(&self, new: NewLeague) -> Result<LeagueSetup, AppError> {
        let round_spacing = self.state.engine.round_spacing;
        let rng_seed = new.rng_seed.unwrap_or_else(rand::random::<i64>);

        let setup = with_txn(&self.state, move |txn| {
            Box::pin(async move {
                let league = leagues::create_league(txn, &new.name, &new.country).await?;

                let mut created = Vec::with_capacity(new.clubs.len());
                for club in &new.clubs {
                    let row = clubs::create_club(txn, league.id, &club.name).await?;
                    players::insert_squad(txn, row.id, &club.squad).await?;
                    created.push(row);
                }

                let season = SeasonService::new()
                    .create_season(
                        txn,
                        league.id,
                        new.start_year,
                        rng_seed,
                        new.first_kickoff,
                        round_spacing,
                    )
                    .await?;
                seasons::install_current(txn, season.id).await?;
                let season = seasons::require_season(txn, season.id).await?;

                Ok(LeagueSetup {
                    league,
                    clubs: created,
                    season,
                })
            })
        })
        .await?;

        info!(
            league_id = setup.league.id,
            clubs = setup.clubs.len(),
            season_id = setup.season.id,
            season = %setup.season.name,
            "league created"
        );
        Ok(setup)
    }

    pub async fn leagues(&self) -> Result<Vec<League>, AppError> {
        Ok(leagues::find_all(&self.state.db).await?)
    }

    pub async fn current_season(&self, league_id: i64) -> Result<Option<Season>, AppError> {
        leagues::require_league(&self.state.db, league_id).await?;
        Ok(seasons::find_current(&self.state.db, league_id).await?)
    }

    /// Every season of the league, oldest first.
    pub async fn season_history(&self, league_id: i64) -> Result<Vec<Season>, AppError> {
        Ok(seasons::find_all_by_league(&self.state.db, league_id).await?)
    }

    pub async fn standings(&self, season_id: i64) -> Result<Vec<TableRow>, AppError> {
        seasons::require_season(&self.state.db, season_id).await?;
        Ok(standings::table(&self.state.db, season_id).await?)
    }

    pub async fn fixtures(&self, season_id: i64) -> Result<Vec<RoundFixtures>, AppError> {
        let db = &self.state.db;
        let all_rounds = rounds::find_all_by_season(db, season_id).await?;
        let mut all_matches = matches::find_by_season(db, season_id).await?;

        let mut out = Vec::with_capacity(all_rounds.len());
        for round in all_rounds {
            let (in_round, rest): (Vec<Match>, Vec<Match>) = all_matches
                .into_iter()
                .partition(|m| m.round_id == round.id);
            all_matches = rest;
            out.push(RoundFixtures {
                round,
                matches: in_round,
            });
        }
        Ok(out)
    }

    /// Persisted narrative of a completed match, in order.
    pub async fn match_events(&self, match_id: i64) -> Result<Vec<MatchEvent>, AppError> {
        matches::require_match(&self.state.db, match_id).await?;
        Ok(match_events::find_by_match(&self.state.db, match_id).await?)
    }
}

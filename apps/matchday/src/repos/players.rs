//! Roster repository functions: persisted players <-> domain squads.

use sea_orm::ConnectionTrait;

use crate::adapters::players_sea as players_adapter;
use crate::domain::squad::{Attributes, NewPlayer, Role, SquadPlayer};
use crate::entities::players::{self, PlayerRole};
use crate::errors::domain::DomainError;

/// Load a club's squad in squad-number order.
pub async fn load_squad<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    club_id: i64,
) -> Result<Vec<SquadPlayer>, DomainError> {
    let rows = players_adapter::find_by_club(conn, club_id).await?;
    Ok(rows.into_iter().map(SquadPlayer::from).collect())
}

/// Persist a generated squad; squad numbers follow slice order from 1.
pub async fn insert_squad<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    club_id: i64,
    squad: &[NewPlayer],
) -> Result<(), DomainError> {
    let rows = squad
        .iter()
        .enumerate()
        .map(|(idx, p)| players_adapter::PlayerCreate {
            club_id,
            name: p.name.clone(),
            role: p.role.into(),
            squad_no: idx as i16 + 1,
            stamina: p.attrs.stamina as i16,
            playmaking: p.attrs.playmaking as i16,
            scoring: p.attrs.scoring as i16,
            winger: p.attrs.winger as i16,
            goalkeeping: p.attrs.goalkeeping as i16,
            passing: p.attrs.passing as i16,
            defending: p.attrs.defending as i16,
            set_pieces: p.attrs.set_pieces as i16,
            condition: p.attrs.condition as i16,
        })
        .collect();
    players_adapter::insert_many(conn, rows).await?;
    Ok(())
}

fn attr(value: i16) -> u8 {
    value.clamp(0, 100) as u8
}

impl From<players::Model> for SquadPlayer {
    fn from(model: players::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            role: model.role.into(),
            attrs: Attributes {
                stamina: attr(model.stamina),
                playmaking: attr(model.playmaking),
                scoring: attr(model.scoring),
                winger: attr(model.winger),
                goalkeeping: attr(model.goalkeeping),
                passing: attr(model.passing),
                defending: attr(model.defending),
                set_pieces: attr(model.set_pieces),
                condition: attr(model.condition),
            },
        }
    }
}

impl From<PlayerRole> for Role {
    fn from(role: PlayerRole) -> Self {
        match role {
            PlayerRole::Goalkeeper => Role::Goalkeeper,
            PlayerRole::CentralDefender => Role::CentralDefender,
            PlayerRole::WingBack => Role::WingBack,
            PlayerRole::Midfielder => Role::Midfielder,
            PlayerRole::Winger => Role::Winger,
            PlayerRole::Forward => Role::Forward,
        }
    }
}

impl From<Role> for PlayerRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Goalkeeper => PlayerRole::Goalkeeper,
            Role::CentralDefender => PlayerRole::CentralDefender,
            Role::WingBack => PlayerRole::WingBack,
            Role::Midfielder => PlayerRole::Midfielder,
            Role::Winger => PlayerRole::Winger,
            Role::Forward => PlayerRole::Forward,
        }
    }
}

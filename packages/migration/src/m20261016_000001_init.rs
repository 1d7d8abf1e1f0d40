use sea_orm::Statement;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::extension::postgres::Type as PgType;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Leagues {
    Table,
    Id,
    Name,
    Country,
    CreatedAt,
}

#[derive(Iden)]
enum Clubs {
    Table,
    Id,
    LeagueId,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum Players {
    Table,
    Id,
    ClubId,
    Name,
    Role,
    SquadNo,
    Stamina,
    Playmaking,
    Scoring,
    Winger,
    Goalkeeping,
    Passing,
    Defending,
    SetPieces,
    Condition,
}

#[derive(Iden)]
enum Seasons {
    Table,
    Id,
    LeagueId,
    Name,
    StartYear,
    IsCurrent,
    NextRoundNo,
    RngSeed,
    CreatedAt,
    ArchivedAt,
}

#[derive(Iden)]
enum SeasonRounds {
    Table,
    Id,
    SeasonId,
    RoundNo,
    IsLast,
    ScheduledAt,
    CompletedAt,
}

#[derive(Iden)]
enum Matches {
    Table,
    Id,
    SeasonId,
    RoundId,
    HomeClubId,
    AwayClubId,
    ScheduledAt,
    Status,
    HomeScore,
    AwayScore,
    SimHomeScore,
    SimAwayScore,
    Finished,
    LastInRound,
    StartedAt,
    CompletedAt,
    Stats,
}

#[derive(Iden)]
enum MatchEvents {
    Table,
    Id,
    MatchId,
    Seq,
    Minute,
    Stoppage,
    Kind,
    ClubId,
    PlayerId,
    Description,
    HomeScore,
    AwayScore,
    KeyEvent,
}

#[derive(Iden)]
enum Standings {
    Table,
    Id,
    SeasonId,
    ClubId,
    Played,
    Won,
    Drawn,
    Lost,
    GoalsFor,
    GoalsAgainst,
    Points,
}

#[derive(Iden)]
enum MatchStatusEnum {
    #[iden = "match_status"]
    Type,
}

#[derive(Iden)]
enum PlayerRoleEnum {
    #[iden = "player_role"]
    Type,
}

async fn enum_exists(manager: &SchemaManager<'_>, enum_name: &str) -> Result<bool, DbErr> {
    let result = manager
        .get_connection()
        .query_one(Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            format!("SELECT 1 FROM pg_type WHERE typname = '{}'", enum_name),
        ))
        .await?;
    Ok(result.is_some())
}

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        match manager.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres => {
                if !enum_exists(manager, "match_status").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(MatchStatusEnum::Type)
                                .values(["SCHEDULED", "LIVE", "COMPLETED"])
                                .to_owned(),
                        )
                        .await?;
                }
                if !enum_exists(manager, "player_role").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(PlayerRoleEnum::Type)
                                .values([
                                    "GOALKEEPER",
                                    "CENTRAL_DEFENDER",
                                    "WING_BACK",
                                    "MIDFIELDER",
                                    "WINGER",
                                    "FORWARD",
                                ])
                                .to_owned(),
                        )
                        .await?;
                }
            }
            sea_orm::DatabaseBackend::Sqlite => {
                // SQLite stores enums as TEXT
            }
            _ => {
                return Err(DbErr::Custom("Unsupported database backend".into()));
            }
        }

        // leagues
        manager
            .create_table(
                Table::create()
                    .table(Leagues::Table)
                    .if_not_exists()
                    .col(id_col(Leagues::Id))
                    .col(ColumnDef::new(Leagues::Name).string().not_null())
                    .col(ColumnDef::new(Leagues::Country).string().not_null())
                    .col(
                        ColumnDef::new(Leagues::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // clubs
        manager
            .create_table(
                Table::create()
                    .table(Clubs::Table)
                    .if_not_exists()
                    .col(id_col(Clubs::Id))
                    .col(ColumnDef::new(Clubs::LeagueId).big_integer().not_null())
                    .col(ColumnDef::new(Clubs::Name).string().not_null())
                    .col(
                        ColumnDef::new(Clubs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clubs_league_id")
                            .from(Clubs::Table, Clubs::LeagueId)
                            .to(Leagues::Table, Leagues::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_clubs_league_id")
                    .table(Clubs::Table)
                    .col(Clubs::LeagueId)
                    .to_owned(),
            )
            .await?;

        // players
        let mut players = Table::create();
        players
            .table(Players::Table)
            .if_not_exists()
            .col(id_col(Players::Id))
            .col(ColumnDef::new(Players::ClubId).big_integer().not_null())
            .col(ColumnDef::new(Players::Name).string().not_null())
            .col(
                ColumnDef::new(Players::Role)
                    .custom(PlayerRoleEnum::Type)
                    .not_null(),
            )
            .col(ColumnDef::new(Players::SquadNo).small_integer().not_null());
        for attr in [
            Players::Stamina,
            Players::Playmaking,
            Players::Scoring,
            Players::Winger,
            Players::Goalkeeping,
            Players::Passing,
            Players::Defending,
            Players::SetPieces,
            Players::Condition,
        ] {
            players.col(ColumnDef::new(attr).small_integer().not_null());
        }
        players.foreign_key(
            ForeignKey::create()
                .name("fk_players_club_id")
                .from(Players::Table, Players::ClubId)
                .to(Clubs::Table, Clubs::Id)
                .on_delete(ForeignKeyAction::Cascade),
        );
        manager.create_table(players.to_owned()).await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_players_club_id")
                    .table(Players::Table)
                    .col(Players::ClubId)
                    .to_owned(),
            )
            .await?;

        // seasons
        manager
            .create_table(
                Table::create()
                    .table(Seasons::Table)
                    .if_not_exists()
                    .col(id_col(Seasons::Id))
                    .col(ColumnDef::new(Seasons::LeagueId).big_integer().not_null())
                    .col(ColumnDef::new(Seasons::Name).string().not_null())
                    .col(ColumnDef::new(Seasons::StartYear).integer().not_null())
                    .col(
                        ColumnDef::new(Seasons::IsCurrent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Seasons::NextRoundNo)
                            .small_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Seasons::RngSeed).big_integer().not_null())
                    .col(
                        ColumnDef::new(Seasons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Seasons::ArchivedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seasons_league_id")
                            .from(Seasons::Table, Seasons::LeagueId)
                            .to(Leagues::Table, Leagues::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_seasons_league_current")
                    .table(Seasons::Table)
                    .col(Seasons::LeagueId)
                    .col(Seasons::IsCurrent)
                    .to_owned(),
            )
            .await?;

        // season_rounds
        manager
            .create_table(
                Table::create()
                    .table(SeasonRounds::Table)
                    .if_not_exists()
                    .col(id_col(SeasonRounds::Id))
                    .col(
                        ColumnDef::new(SeasonRounds::SeasonId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeasonRounds::RoundNo)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeasonRounds::IsLast)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SeasonRounds::ScheduledAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeasonRounds::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_season_rounds_season_id")
                            .from(SeasonRounds::Table, SeasonRounds::SeasonId)
                            .to(Seasons::Table, Seasons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_season_rounds_season_round")
                    .table(SeasonRounds::Table)
                    .col(SeasonRounds::SeasonId)
                    .col(SeasonRounds::RoundNo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // matches
        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(id_col(Matches::Id))
                    .col(ColumnDef::new(Matches::SeasonId).big_integer().not_null())
                    .col(ColumnDef::new(Matches::RoundId).big_integer().not_null())
                    .col(ColumnDef::new(Matches::HomeClubId).big_integer().not_null())
                    .col(ColumnDef::new(Matches::AwayClubId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Matches::ScheduledAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::Status)
                            .custom(MatchStatusEnum::Type)
                            .not_null()
                            .default("SCHEDULED"),
                    )
                    .col(ColumnDef::new(Matches::HomeScore).small_integer().null())
                    .col(ColumnDef::new(Matches::AwayScore).small_integer().null())
                    .col(ColumnDef::new(Matches::SimHomeScore).small_integer().null())
                    .col(ColumnDef::new(Matches::SimAwayScore).small_integer().null())
                    .col(
                        ColumnDef::new(Matches::Finished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Matches::LastInRound)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Matches::StartedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Matches::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Matches::Stats).json().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_season_id")
                            .from(Matches::Table, Matches::SeasonId)
                            .to(Seasons::Table, Seasons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_round_id")
                            .from(Matches::Table, Matches::RoundId)
                            .to(SeasonRounds::Table, SeasonRounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_home_club_id")
                            .from(Matches::Table, Matches::HomeClubId)
                            .to(Clubs::Table, Clubs::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_away_club_id")
                            .from(Matches::Table, Matches::AwayClubId)
                            .to(Clubs::Table, Clubs::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_matches_status_scheduled_at")
                    .table(Matches::Table)
                    .col(Matches::Status)
                    .col(Matches::ScheduledAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_matches_round_id")
                    .table(Matches::Table)
                    .col(Matches::RoundId)
                    .to_owned(),
            )
            .await?;

        // match_events
        manager
            .create_table(
                Table::create()
                    .table(MatchEvents::Table)
                    .if_not_exists()
                    .col(id_col(MatchEvents::Id))
                    .col(ColumnDef::new(MatchEvents::MatchId).big_integer().not_null())
                    .col(ColumnDef::new(MatchEvents::Seq).integer().not_null())
                    .col(ColumnDef::new(MatchEvents::Minute).small_integer().not_null())
                    .col(
                        ColumnDef::new(MatchEvents::Stoppage)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(MatchEvents::Kind).string_len(24).not_null())
                    .col(ColumnDef::new(MatchEvents::ClubId).big_integer().null())
                    .col(ColumnDef::new(MatchEvents::PlayerId).big_integer().null())
                    .col(ColumnDef::new(MatchEvents::Description).string().not_null())
                    .col(
                        ColumnDef::new(MatchEvents::HomeScore)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MatchEvents::AwayScore)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MatchEvents::KeyEvent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_events_match_id")
                            .from(MatchEvents::Table, MatchEvents::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_match_events_match_seq")
                    .table(MatchEvents::Table)
                    .col(MatchEvents::MatchId)
                    .col(MatchEvents::Seq)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // standings
        let mut standings = Table::create();
        standings
            .table(Standings::Table)
            .if_not_exists()
            .col(id_col(Standings::Id))
            .col(ColumnDef::new(Standings::SeasonId).big_integer().not_null())
            .col(ColumnDef::new(Standings::ClubId).big_integer().not_null());
        for stat in [
            Standings::Played,
            Standings::Won,
            Standings::Drawn,
            Standings::Lost,
            Standings::GoalsFor,
            Standings::GoalsAgainst,
            Standings::Points,
        ] {
            standings.col(ColumnDef::new(stat).integer().not_null().default(0));
        }
        standings
            .foreign_key(
                ForeignKey::create()
                    .name("fk_standings_season_id")
                    .from(Standings::Table, Standings::SeasonId)
                    .to(Seasons::Table, Seasons::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_standings_club_id")
                    .from(Standings::Table, Standings::ClubId)
                    .to(Clubs::Table, Clubs::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        manager.create_table(standings.to_owned()).await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_standings_season_club")
                    .table(Standings::Table)
                    .col(Standings::SeasonId)
                    .col(Standings::ClubId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order; indexes go with their tables
        manager
            .drop_table(Table::drop().table(Standings::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MatchEvents::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Matches::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SeasonRounds::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Seasons::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clubs::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Leagues::Table).if_exists().to_owned())
            .await?;

        match manager.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres => {
                manager
                    .drop_type(
                        PgType::drop()
                            .name(PlayerRoleEnum::Type)
                            .if_exists()
                            .to_owned(),
                    )
                    .await?;

                manager
                    .drop_type(
                        PgType::drop()
                            .name(MatchStatusEnum::Type)
                            .if_exists()
                            .to_owned(),
                    )
                    .await?;
            }
            sea_orm::DatabaseBackend::Sqlite => {
                // SQLite doesn't have enum types to drop
            }
            _ => {
                return Err(DbErr::Custom("Unsupported database backend".into()));
            }
        }

        Ok(())
    }
}

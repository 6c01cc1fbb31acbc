//! Mutation root: create, update and delete for every entity.
//!
//! Updates are partial: omitted input fields keep their stored value. Deletes return
//! `false` when no document had the given ID.

use super::resolvers::{create, delete, update};
use crate::api::models::{
    competitions::{CompetitionCreate, CompetitionResponse, CompetitionUpdate},
    contracts::{ContractCreate, ContractResponse, ContractUpdate},
    managers::{ManagerCreate, ManagerResponse, ManagerUpdate},
    matches::{MatchCreate, MatchResponse, MatchUpdate},
    player_stats::{PlayerStatsCreate, PlayerStatsResponse, PlayerStatsUpdate},
    players::{PlayerCreate, PlayerResponse, PlayerUpdate},
    seasons::{SeasonCreate, SeasonResponse, SeasonUpdate},
    stadiums::{StadiumCreate, StadiumResponse, StadiumUpdate},
    trophies::{TrophyCreate, TrophyResponse, TrophyUpdate},
};
use crate::db::models::{
    competitions::CompetitionDBResponse, contracts::ContractDBResponse, managers::ManagerDBResponse, matches::MatchDBResponse,
    player_stats::PlayerStatsDBResponse, players::PlayerDBResponse, seasons::SeasonDBResponse, stadiums::StadiumDBResponse,
    trophies::TrophyDBResponse,
};
use crate::types::Resource;
use async_graphql::{Context, Object, Result};
use uuid::Uuid;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_player(&self, ctx: &Context<'_>, input: PlayerCreate) -> Result<PlayerResponse> {
        create::<PlayerDBResponse, _>(ctx, &input).await
    }

    async fn update_player(&self, ctx: &Context<'_>, id: Uuid, input: PlayerUpdate) -> Result<PlayerResponse> {
        update::<PlayerDBResponse, _>(ctx, Resource::Players, id, &input).await
    }

    async fn delete_player(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        delete::<PlayerDBResponse>(ctx, id).await
    }

    async fn create_manager(&self, ctx: &Context<'_>, input: ManagerCreate) -> Result<ManagerResponse> {
        create::<ManagerDBResponse, _>(ctx, &input).await
    }

    async fn update_manager(&self, ctx: &Context<'_>, id: Uuid, input: ManagerUpdate) -> Result<ManagerResponse> {
        update::<ManagerDBResponse, _>(ctx, Resource::Managers, id, &input).await
    }

    async fn delete_manager(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        delete::<ManagerDBResponse>(ctx, id).await
    }

    async fn create_stadium(&self, ctx: &Context<'_>, input: StadiumCreate) -> Result<StadiumResponse> {
        create::<StadiumDBResponse, _>(ctx, &input).await
    }

    async fn update_stadium(&self, ctx: &Context<'_>, id: Uuid, input: StadiumUpdate) -> Result<StadiumResponse> {
        update::<StadiumDBResponse, _>(ctx, Resource::Stadiums, id, &input).await
    }

    async fn delete_stadium(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        delete::<StadiumDBResponse>(ctx, id).await
    }

    async fn create_competition(&self, ctx: &Context<'_>, input: CompetitionCreate) -> Result<CompetitionResponse> {
        create::<CompetitionDBResponse, _>(ctx, &input).await
    }

    async fn update_competition(&self, ctx: &Context<'_>, id: Uuid, input: CompetitionUpdate) -> Result<CompetitionResponse> {
        update::<CompetitionDBResponse, _>(ctx, Resource::Competitions, id, &input).await
    }

    async fn delete_competition(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        delete::<CompetitionDBResponse>(ctx, id).await
    }

    async fn create_season(&self, ctx: &Context<'_>, input: SeasonCreate) -> Result<SeasonResponse> {
        create::<SeasonDBResponse, _>(ctx, &input).await
    }

    async fn update_season(&self, ctx: &Context<'_>, id: Uuid, input: SeasonUpdate) -> Result<SeasonResponse> {
        update::<SeasonDBResponse, _>(ctx, Resource::Seasons, id, &input).await
    }

    async fn delete_season(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        delete::<SeasonDBResponse>(ctx, id).await
    }

    async fn create_contract(&self, ctx: &Context<'_>, input: ContractCreate) -> Result<ContractResponse> {
        create::<ContractDBResponse, _>(ctx, &input).await
    }

    async fn update_contract(&self, ctx: &Context<'_>, id: Uuid, input: ContractUpdate) -> Result<ContractResponse> {
        update::<ContractDBResponse, _>(ctx, Resource::Contracts, id, &input).await
    }

    async fn delete_contract(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        delete::<ContractDBResponse>(ctx, id).await
    }

    async fn create_trophy(&self, ctx: &Context<'_>, input: TrophyCreate) -> Result<TrophyResponse> {
        create::<TrophyDBResponse, _>(ctx, &input).await
    }

    async fn update_trophy(&self, ctx: &Context<'_>, id: Uuid, input: TrophyUpdate) -> Result<TrophyResponse> {
        update::<TrophyDBResponse, _>(ctx, Resource::Trophies, id, &input).await
    }

    async fn delete_trophy(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        delete::<TrophyDBResponse>(ctx, id).await
    }

    async fn create_player_stats(&self, ctx: &Context<'_>, input: PlayerStatsCreate) -> Result<PlayerStatsResponse> {
        create::<PlayerStatsDBResponse, _>(ctx, &input).await
    }

    async fn update_player_stats(&self, ctx: &Context<'_>, id: Uuid, input: PlayerStatsUpdate) -> Result<PlayerStatsResponse> {
        update::<PlayerStatsDBResponse, _>(ctx, Resource::PlayerStats, id, &input).await
    }

    async fn delete_player_stats(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        delete::<PlayerStatsDBResponse>(ctx, id).await
    }

    /// The score and result are derived from the goal list.
    async fn create_match(&self, ctx: &Context<'_>, input: MatchCreate) -> Result<MatchResponse> {
        create::<MatchDBResponse, _>(ctx, &input).await
    }

    async fn update_match(&self, ctx: &Context<'_>, id: Uuid, input: MatchUpdate) -> Result<MatchResponse> {
        update::<MatchDBResponse, _>(ctx, Resource::Matches, id, &input).await
    }

    async fn delete_match(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        delete::<MatchDBResponse>(ctx, id).await
    }
}

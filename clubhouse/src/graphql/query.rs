//! Query root: a single-item lookup, a filtered list and a count for every entity.

use super::inputs::{
    CompetitionFilter, ContractFilter, ManagerFilter, MatchFilter, PlayerFilter, PlayerStatsFilter, SeasonFilter, SortInput,
    StadiumFilter, TrophyFilter, conditions_of,
};
use super::resolvers::{ListArgs, count, fetch, list};
use crate::api::models::{
    competitions::CompetitionResponse, contracts::ContractResponse, managers::ManagerResponse, matches::MatchResponse,
    player_stats::PlayerStatsResponse, players::PlayerResponse, seasons::SeasonResponse, stadiums::StadiumResponse,
    trophies::TrophyResponse,
};
use crate::db::models::{
    competitions::CompetitionDBResponse, contracts::ContractDBResponse, managers::ManagerDBResponse, matches::MatchDBResponse,
    player_stats::PlayerStatsDBResponse, players::PlayerDBResponse, seasons::SeasonDBResponse, stadiums::StadiumDBResponse,
    trophies::TrophyDBResponse,
};
use async_graphql::{Context, Object, Result};
use uuid::Uuid;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn player(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<PlayerResponse>> {
        fetch::<PlayerDBResponse, _>(ctx, id).await
    }

    async fn players(
        &self,
        ctx: &Context<'_>,
        filter: Option<PlayerFilter>,
        sort: Option<SortInput>,
        skip: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<PlayerResponse>> {
        list::<PlayerDBResponse, _>(ctx, conditions_of(&filter), ListArgs::new(sort, skip, limit)).await
    }

    async fn player_count(&self, ctx: &Context<'_>, filter: Option<PlayerFilter>) -> Result<u64> {
        count::<PlayerDBResponse>(ctx, conditions_of(&filter)).await
    }

    async fn manager(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<ManagerResponse>> {
        fetch::<ManagerDBResponse, _>(ctx, id).await
    }

    async fn managers(
        &self,
        ctx: &Context<'_>,
        filter: Option<ManagerFilter>,
        sort: Option<SortInput>,
        skip: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<ManagerResponse>> {
        list::<ManagerDBResponse, _>(ctx, conditions_of(&filter), ListArgs::new(sort, skip, limit)).await
    }

    async fn manager_count(&self, ctx: &Context<'_>, filter: Option<ManagerFilter>) -> Result<u64> {
        count::<ManagerDBResponse>(ctx, conditions_of(&filter)).await
    }

    async fn stadium(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<StadiumResponse>> {
        fetch::<StadiumDBResponse, _>(ctx, id).await
    }

    async fn stadiums(
        &self,
        ctx: &Context<'_>,
        filter: Option<StadiumFilter>,
        sort: Option<SortInput>,
        skip: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<StadiumResponse>> {
        list::<StadiumDBResponse, _>(ctx, conditions_of(&filter), ListArgs::new(sort, skip, limit)).await
    }

    async fn stadium_count(&self, ctx: &Context<'_>, filter: Option<StadiumFilter>) -> Result<u64> {
        count::<StadiumDBResponse>(ctx, conditions_of(&filter)).await
    }

    async fn competition(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<CompetitionResponse>> {
        fetch::<CompetitionDBResponse, _>(ctx, id).await
    }

    async fn competitions(
        &self,
        ctx: &Context<'_>,
        filter: Option<CompetitionFilter>,
        sort: Option<SortInput>,
        skip: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<CompetitionResponse>> {
        list::<CompetitionDBResponse, _>(ctx, conditions_of(&filter), ListArgs::new(sort, skip, limit)).await
    }

    async fn competition_count(&self, ctx: &Context<'_>, filter: Option<CompetitionFilter>) -> Result<u64> {
        count::<CompetitionDBResponse>(ctx, conditions_of(&filter)).await
    }

    async fn season(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<SeasonResponse>> {
        fetch::<SeasonDBResponse, _>(ctx, id).await
    }

    async fn seasons(
        &self,
        ctx: &Context<'_>,
        filter: Option<SeasonFilter>,
        sort: Option<SortInput>,
        skip: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<SeasonResponse>> {
        list::<SeasonDBResponse, _>(ctx, conditions_of(&filter), ListArgs::new(sort, skip, limit)).await
    }

    async fn season_count(&self, ctx: &Context<'_>, filter: Option<SeasonFilter>) -> Result<u64> {
        count::<SeasonDBResponse>(ctx, conditions_of(&filter)).await
    }

    async fn contract(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<ContractResponse>> {
        fetch::<ContractDBResponse, _>(ctx, id).await
    }

    async fn contracts(
        &self,
        ctx: &Context<'_>,
        filter: Option<ContractFilter>,
        sort: Option<SortInput>,
        skip: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<ContractResponse>> {
        list::<ContractDBResponse, _>(ctx, conditions_of(&filter), ListArgs::new(sort, skip, limit)).await
    }

    async fn contract_count(&self, ctx: &Context<'_>, filter: Option<ContractFilter>) -> Result<u64> {
        count::<ContractDBResponse>(ctx, conditions_of(&filter)).await
    }

    async fn trophy(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<TrophyResponse>> {
        fetch::<TrophyDBResponse, _>(ctx, id).await
    }

    async fn trophies(
        &self,
        ctx: &Context<'_>,
        filter: Option<TrophyFilter>,
        sort: Option<SortInput>,
        skip: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<TrophyResponse>> {
        list::<TrophyDBResponse, _>(ctx, conditions_of(&filter), ListArgs::new(sort, skip, limit)).await
    }

    async fn trophy_count(&self, ctx: &Context<'_>, filter: Option<TrophyFilter>) -> Result<u64> {
        count::<TrophyDBResponse>(ctx, conditions_of(&filter)).await
    }

    async fn player_stats(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<PlayerStatsResponse>> {
        fetch::<PlayerStatsDBResponse, _>(ctx, id).await
    }

    async fn player_stats_list(
        &self,
        ctx: &Context<'_>,
        filter: Option<PlayerStatsFilter>,
        sort: Option<SortInput>,
        skip: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<PlayerStatsResponse>> {
        list::<PlayerStatsDBResponse, _>(ctx, conditions_of(&filter), ListArgs::new(sort, skip, limit)).await
    }

    async fn player_stats_count(&self, ctx: &Context<'_>, filter: Option<PlayerStatsFilter>) -> Result<u64> {
        count::<PlayerStatsDBResponse>(ctx, conditions_of(&filter)).await
    }

    #[graphql(name = "match")]
    async fn fixture(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<MatchResponse>> {
        fetch::<MatchDBResponse, _>(ctx, id).await
    }

    async fn matches(
        &self,
        ctx: &Context<'_>,
        filter: Option<MatchFilter>,
        sort: Option<SortInput>,
        skip: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<MatchResponse>> {
        list::<MatchDBResponse, _>(ctx, conditions_of(&filter), ListArgs::new(sort, skip, limit)).await
    }

    async fn match_count(&self, ctx: &Context<'_>, filter: Option<MatchFilter>) -> Result<u64> {
        count::<MatchDBResponse>(ctx, conditions_of(&filter)).await
    }
}

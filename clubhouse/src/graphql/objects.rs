//! Relationship fields resolved on demand from the stored reference IDs.
//!
//! References are not cascaded on delete, so a to-one relationship resolves to `null`
//! and a to-many relationship skips entries whose document no longer exists.

use super::resolvers::{fetch, fetch_many, fetch_optional, find_all};
use crate::api::models::{
    competitions::CompetitionResponse, contracts::ContractResponse, matches::MatchResponse, player_stats::PlayerStatsResponse,
    players::PlayerResponse, seasons::SeasonResponse, stadiums::StadiumResponse, trophies::TrophyResponse,
};
use crate::db::filter::{Comparison, Filter};
use crate::db::models::{
    competitions::CompetitionDBResponse, contracts::ContractDBResponse, matches::MatchDBResponse,
    player_stats::PlayerStatsDBResponse, players::PlayerDBResponse, seasons::SeasonDBResponse, stadiums::StadiumDBResponse,
    trophies::TrophyDBResponse,
};
use async_graphql::{ComplexObject, Context, Result};
use serde_json::json;

#[ComplexObject]
impl PlayerResponse {
    async fn contracts(&self, ctx: &Context<'_>) -> Result<Vec<ContractResponse>> {
        find_all::<ContractDBResponse, _>(ctx, Filter::new().eq("player_id", self.id.to_string())).await
    }

    async fn stats(&self, ctx: &Context<'_>) -> Result<Vec<PlayerStatsResponse>> {
        find_all::<PlayerStatsDBResponse, _>(ctx, Filter::new().eq("player_id", self.id.to_string())).await
    }
}

#[ComplexObject]
impl CompetitionResponse {
    async fn seasons(&self, ctx: &Context<'_>) -> Result<Vec<SeasonResponse>> {
        let filter = Filter::new().with("competition_ids", Comparison::Has(json!(self.id)));
        find_all::<SeasonDBResponse, _>(ctx, filter).await
    }

    async fn trophies(&self, ctx: &Context<'_>) -> Result<Vec<TrophyResponse>> {
        find_all::<TrophyDBResponse, _>(ctx, Filter::new().eq("competition_id", self.id.to_string())).await
    }
}

#[ComplexObject]
impl SeasonResponse {
    async fn competitions(&self, ctx: &Context<'_>) -> Result<Vec<CompetitionResponse>> {
        fetch_many::<CompetitionDBResponse, _>(ctx, &self.competition_ids).await
    }

    async fn matches(&self, ctx: &Context<'_>) -> Result<Vec<MatchResponse>> {
        find_all::<MatchDBResponse, _>(ctx, Filter::new().eq("season_id", self.id.to_string())).await
    }
}

#[ComplexObject]
impl ContractResponse {
    async fn player(&self, ctx: &Context<'_>) -> Result<Option<PlayerResponse>> {
        fetch::<PlayerDBResponse, _>(ctx, self.player_id).await
    }
}

#[ComplexObject]
impl TrophyResponse {
    async fn competition(&self, ctx: &Context<'_>) -> Result<Option<CompetitionResponse>> {
        fetch::<CompetitionDBResponse, _>(ctx, self.competition_id).await
    }

    async fn season(&self, ctx: &Context<'_>) -> Result<Option<SeasonResponse>> {
        fetch::<SeasonDBResponse, _>(ctx, self.season_id).await
    }
}

#[ComplexObject]
impl PlayerStatsResponse {
    async fn player(&self, ctx: &Context<'_>) -> Result<Option<PlayerResponse>> {
        fetch::<PlayerDBResponse, _>(ctx, self.player_id).await
    }

    async fn season(&self, ctx: &Context<'_>) -> Result<Option<SeasonResponse>> {
        fetch::<SeasonDBResponse, _>(ctx, self.season_id).await
    }

    /// `null` for totals across all competitions in the season
    async fn competition(&self, ctx: &Context<'_>) -> Result<Option<CompetitionResponse>> {
        fetch_optional::<CompetitionDBResponse, _>(ctx, self.competition_id).await
    }
}

#[ComplexObject]
impl MatchResponse {
    async fn competition(&self, ctx: &Context<'_>) -> Result<Option<CompetitionResponse>> {
        fetch::<CompetitionDBResponse, _>(ctx, self.competition_id).await
    }

    async fn season(&self, ctx: &Context<'_>) -> Result<Option<SeasonResponse>> {
        fetch::<SeasonDBResponse, _>(ctx, self.season_id).await
    }

    async fn stadium(&self, ctx: &Context<'_>) -> Result<Option<StadiumResponse>> {
        fetch_optional::<StadiumDBResponse, _>(ctx, self.stadium_id).await
    }

    async fn lineup_players(&self, ctx: &Context<'_>) -> Result<Vec<PlayerResponse>> {
        fetch_many::<PlayerDBResponse, _>(ctx, &self.lineup).await
    }

    async fn substitute_players(&self, ctx: &Context<'_>) -> Result<Vec<PlayerResponse>> {
        fetch_many::<PlayerDBResponse, _>(ctx, &self.substitutes).await
    }
}

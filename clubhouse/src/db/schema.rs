//! `$jsonSchema` validators installed on each MongoDB collection.
//!
//! These mirror the shape of the stored documents (required fields and BSON types) so that
//! writes bypassing the repositories still cannot corrupt a collection. Value rules such as
//! length and range limits are enforced by each entity's `validate` before every write.

use mongodb::bson::{Bson, Document, doc};

const COMMON_REQUIRED: [&str; 3] = ["id", "created_at", "updated_at"];

fn collection_schema(required: &[&str], mut properties: Document) -> Document {
    for field in COMMON_REQUIRED {
        properties.insert(field, string());
    }
    let required: Vec<&str> = COMMON_REQUIRED.iter().chain(required).copied().collect();
    doc! {
        "$jsonSchema": {
            "bsonType": "object",
            "required": required,
            "properties": properties,
        }
    }
}

fn string() -> Document {
    doc! { "bsonType": "string" }
}

fn one_of(values: &[&str]) -> Document {
    doc! { "bsonType": "string", "enum": values.to_vec() }
}

fn number() -> Document {
    doc! { "bsonType": ["int", "long", "double", "decimal"] }
}

fn counter() -> Document {
    doc! { "bsonType": ["int", "long"], "minimum": 0 }
}

fn boolean() -> Document {
    doc! { "bsonType": "bool" }
}

fn string_array() -> Document {
    doc! { "bsonType": "array", "items": { "bsonType": "string" } }
}

/// Allow `null` in addition to the given type
fn nullable(mut schema: Document) -> Document {
    let types = match schema.remove("bsonType") {
        Some(Bson::Array(mut types)) => {
            types.push(Bson::String("null".to_string()));
            types
        }
        Some(single) => vec![single, Bson::String("null".to_string())],
        None => vec![Bson::String("null".to_string())],
    };
    schema.insert("bsonType", types);
    schema
}

pub fn players() -> Document {
    collection_schema(
        &["name", "position", "nationality", "date_of_birth", "active"],
        doc! {
            "name": string(),
            "position": one_of(&["goalkeeper", "defender", "midfielder", "forward"]),
            "nationality": string(),
            "date_of_birth": string(),
            "shirt_number": nullable(number()),
            "height_cm": nullable(number()),
            "active": boolean(),
        },
    )
}

pub fn managers() -> Document {
    collection_schema(
        &["name", "nationality", "date_of_birth", "appointed_on", "active"],
        doc! {
            "name": string(),
            "nationality": string(),
            "date_of_birth": string(),
            "appointed_on": string(),
            "departed_on": nullable(string()),
            "active": boolean(),
        },
    )
}

pub fn stadiums() -> Document {
    collection_schema(
        &["name", "city", "capacity", "surface"],
        doc! {
            "name": string(),
            "city": string(),
            "capacity": number(),
            "opened_year": nullable(number()),
            "surface": one_of(&["grass", "hybrid", "artificial"]),
        },
    )
}

pub fn competitions() -> Document {
    collection_schema(
        &["name", "kind"],
        doc! {
            "name": string(),
            "kind": one_of(&["league", "domestic_cup", "continental", "friendly"]),
            "country": nullable(string()),
        },
    )
}

pub fn seasons() -> Document {
    collection_schema(
        &["name", "start_year", "end_year", "competition_ids"],
        doc! {
            "name": string(),
            "start_year": number(),
            "end_year": number(),
            "competition_ids": {
                "bsonType": "array",
                "minItems": 1,
                "items": { "bsonType": "string" },
            },
        },
    )
}

pub fn contracts() -> Document {
    collection_schema(
        &["player_id", "start_date", "end_date", "weekly_wage"],
        doc! {
            "player_id": string(),
            "start_date": string(),
            "end_date": string(),
            "weekly_wage": number(),
            "release_clause": nullable(number()),
        },
    )
}

pub fn trophies() -> Document {
    collection_schema(
        &["name", "competition_id", "season_id"],
        doc! {
            "name": string(),
            "competition_id": string(),
            "season_id": string(),
            "won_on": nullable(string()),
        },
    )
}

pub fn player_stats() -> Document {
    collection_schema(
        &[
            "player_id",
            "season_id",
            "appearances",
            "goals",
            "assists",
            "yellow_cards",
            "red_cards",
            "minutes_played",
        ],
        doc! {
            "player_id": string(),
            "season_id": string(),
            "competition_id": nullable(string()),
            "appearances": counter(),
            "goals": counter(),
            "assists": counter(),
            "yellow_cards": counter(),
            "red_cards": counter(),
            "minutes_played": counter(),
        },
    )
}

pub fn matches() -> Document {
    collection_schema(
        &[
            "competition_id",
            "season_id",
            "opponent",
            "kickoff",
            "venue",
            "lineup",
            "substitutes",
            "goals",
            "score",
            "result",
        ],
        doc! {
            "competition_id": string(),
            "season_id": string(),
            "stadium_id": nullable(string()),
            "opponent": string(),
            "kickoff": string(),
            "venue": one_of(&["home", "away", "neutral"]),
            "lineup": {
                "bsonType": "array",
                "minItems": 1,
                "maxItems": 11,
                "items": { "bsonType": "string" },
            },
            "substitutes": string_array(),
            "goals": {
                "bsonType": "array",
                "items": {
                    "bsonType": "object",
                    "required": ["minute", "side"],
                    "properties": {
                        "minute": number(),
                        "side": one_of(&["club", "opponent"]),
                        "scorer_id": nullable(string()),
                        "assist_id": nullable(string()),
                    },
                },
            },
            "score": {
                "bsonType": "object",
                "required": ["club", "opponent"],
                "properties": { "club": counter(), "opponent": counter() },
            },
            "result": one_of(&["win", "draw", "loss"]),
        },
    )
}

//! Opening catalogue records and the JSON payloads exchanged with the trainer.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A game worth studying for an opening or one of its variations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamousGame {
    pub game: String,
    #[serde(default)]
    pub year: Option<GameYear>,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub moves: String,
}

/// Catalogues write the year either as a number or as free text ("c. 1620").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GameYear {
    Number(i32),
    Text(String),
}

impl fmt::Display for GameYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameYear::Number(n) => write!(f, "{n}"),
            GameYear::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    pub variation_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub strategic_ideas: Vec<String>,
    #[serde(default)]
    pub famous_games: Vec<FamousGame>,
    #[serde(default)]
    pub moves: Vec<String>,
}

/// Full catalogue record for one opening. Also the opening detail payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opening {
    pub id: u32,
    pub opening_name: String,
    #[serde(default)]
    pub eco_code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub strategic_ideas: Vec<String>,
    #[serde(default)]
    pub famous_games: Vec<FamousGame>,
    #[serde(default)]
    pub variations: Vec<Variation>,
}

impl Opening {
    /// Look up a variation by name, ignoring ASCII case.
    pub fn variation(&self, name: &str) -> Option<&Variation> {
        self.variations
            .iter()
            .find(|v| v.variation_name.eq_ignore_ascii_case(name))
    }

    pub fn summary(&self) -> OpeningSummary {
        OpeningSummary {
            id: self.id,
            opening_name: self.opening_name.clone(),
            eco_code: self.eco_code.clone(),
            variation_names: self
                .variations
                .iter()
                .map(|v| v.variation_name.clone())
                .collect(),
        }
    }
}

/// One row of the opening list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningSummary {
    pub id: u32,
    pub opening_name: String,
    #[serde(default)]
    pub eco_code: String,
    #[serde(rename = "variations", default)]
    pub variation_names: Vec<String>,
}

/// A randomly chosen variation. `moves` is informational; the trainer
/// fetches the line separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomPick {
    pub opening_id: u32,
    pub variation_name: String,
    #[serde(default)]
    pub moves: Vec<String>,
}

/// On-disk catalogue: `{"Openings": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalogue {
    #[serde(rename = "Openings", default)]
    pub openings: Vec<Opening>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckMoveRequest {
    pub opening_id: u32,
    pub variation_name: String,
    #[serde(default)]
    pub current_index: usize,
    #[serde(default)]
    pub user_move: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum CheckMoveResponse {
    Correct { next_index: usize },
    Incorrect { correct_move: String, next_index: usize },
}

/// Practice record for one variation, keyed `"<openingId>-<variationName>"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariationProgress {
    /// Furthest index reached with a correct move.
    #[serde(default)]
    pub move_index: usize,
    /// Wrong-answer count per move index.
    #[serde(default)]
    pub failures: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_practiced_at: Option<String>,
}

/// On-disk progress log: `{"Progress": {...}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressLog {
    #[serde(rename = "Progress", default)]
    pub progress: BTreeMap<String, VariationProgress>,
}

pub fn progress_key(opening_id: u32, variation_name: &str) -> String {
    format!("{opening_id}-{variation_name}")
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) if s.is_empty() => Vec::new(),
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
      "Openings": [
        {
          "id": 1,
          "openingName": "Ruy Lopez",
          "ecoCode": "C60",
          "description": "Spanish game.",
          "strategicIdeas": "Pressure on e5.",
          "famousGames": [
            {"game": "Fischer vs Spassky", "year": 1972, "event": "World Championship", "moves": "1. e4 e5"}
          ],
          "variations": [
            {
              "variationName": "Morphy Defense",
              "strategicIdeas": ["Kick the bishop", "Keep tension"],
              "famousGames": [{"game": "Anon", "year": "c. 1900", "event": "Club"}],
              "moves": ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"]
            }
          ]
        }
      ]
    }"#;

    #[test]
    fn test_catalogue_deserializes_loose_fields() {
        let catalogue: Catalogue = serde_json::from_str(SAMPLE).unwrap();
        let opening = &catalogue.openings[0];
        assert_eq!(opening.strategic_ideas, vec!["Pressure on e5."]);
        assert_eq!(opening.famous_games[0].year, Some(GameYear::Number(1972)));

        let variation = opening.variation("morphy defense").unwrap();
        assert_eq!(variation.strategic_ideas.len(), 2);
        assert_eq!(variation.moves.len(), 6);
        assert_eq!(
            variation.famous_games[0].year.as_ref().map(|y| y.to_string()),
            Some("c. 1900".to_string())
        );
    }

    #[test]
    fn test_summary_uses_variations_key() {
        let catalogue: Catalogue = serde_json::from_str(SAMPLE).unwrap();
        let json = serde_json::to_value(catalogue.openings[0].summary()).unwrap();
        assert_eq!(json["openingName"], "Ruy Lopez");
        assert_eq!(json["ecoCode"], "C60");
        assert_eq!(json["variations"][0], "Morphy Defense");
    }

    #[test]
    fn test_check_move_response_wire_format() {
        let correct = serde_json::to_value(CheckMoveResponse::Correct { next_index: 3 }).unwrap();
        assert_eq!(correct, serde_json::json!({"result": "correct", "nextIndex": 3}));

        let incorrect = serde_json::to_value(CheckMoveResponse::Incorrect {
            correct_move: "Nf3".into(),
            next_index: 1,
        })
        .unwrap();
        assert_eq!(
            incorrect,
            serde_json::json!({"result": "incorrect", "correctMove": "Nf3", "nextIndex": 1})
        );
    }

    #[test]
    fn test_check_move_request_defaults() {
        let req: CheckMoveRequest =
            serde_json::from_str(r#"{"openingId": 2, "variationName": "Main"}"#).unwrap();
        assert_eq!(req.current_index, 0);
        assert_eq!(req.user_move, "");
    }
}

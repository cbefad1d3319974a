use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Number, Value};
use std::str::FromStr;

use super::is_blank;
use crate::error::{Error, Result};
use crate::model::{Campaign, PlanetRef};

const KIND: &str = "campaign";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCampaign {
    #[serde(default)]
    planet_index: Option<i64>,
    faction: String,
    players: i64,
    health: f64,
    max_health: f64,
    percentage: Number,
    defense: bool,
    major_order: bool,
    #[serde(default)]
    expire_date_time: Option<i64>,
}

/// Decode the campaigns document, a JSON array of campaign objects.
///
/// Records are identified by their array position in errors.
pub fn decode_campaigns(json: &str) -> Result<Vec<Campaign>> {
    if is_blank(json) {
        return Ok(Vec::new());
    }

    let doc: Vec<Value> =
        serde_json::from_str(json).map_err(|e| Error::decode(KIND, "<document>", e))?;

    doc.into_iter()
        .enumerate()
        .map(|(pos, value)| decode_campaign(pos, value))
        .collect()
}

fn decode_campaign(pos: usize, value: Value) -> Result<Campaign> {
    let record = format!("#{}", pos);
    let raw: RawCampaign =
        serde_json::from_value(value).map_err(|e| Error::decode(KIND, record.as_str(), e))?;

    let percentage = parse_decimal(&raw.percentage)
        .ok_or_else(|| Error::decode(KIND, record.as_str(), format!("percentage {} is not a decimal", raw.percentage)))?;

    Ok(Campaign {
        planet: raw.planet_index.map(|index| PlanetRef { index }),
        faction: raw.faction,
        players: raw.players,
        health: raw.health,
        max_health: raw.max_health,
        percentage,
        defense: raw.defense,
        major_order: raw.major_order,
        expire_date_time: raw.expire_date_time,
    })
}

/// Parse from the number's source text. With `arbitrary_precision` the
/// `Number` keeps the digits exactly as written in the document.
fn parse_decimal(n: &Number) -> Option<Decimal> {
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
        .map(|d| d.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "planetIndex": 126,
            "faction": "Terminids",
            "players": 4210,
            "health": 412345,
            "maxHealth": 1000000,
            "percentage": 58.7655,
            "defense": false,
            "majorOrder": true,
            "expireDateTime": null
        },
        {
            "planetIndex": 64,
            "faction": "Automatons",
            "players": 12,
            "health": 100.5,
            "maxHealth": 200,
            "percentage": 49.75,
            "defense": true,
            "majorOrder": false,
            "expireDateTime": 1712345678
        }
    ]"#;

    #[test]
    fn test_decode_campaigns() {
        let campaigns = decode_campaigns(SAMPLE).unwrap();
        assert_eq!(campaigns.len(), 2);

        let first = &campaigns[0];
        assert_eq!(first.planet, Some(PlanetRef { index: 126 }));
        assert_eq!(first.faction, "Terminids");
        assert_eq!(first.players, 4210);
        assert_eq!(first.health, 412345.0);
        assert!(first.major_order);
        assert!(!first.defense);
        assert_eq!(first.expire_date_time, None);

        assert_eq!(campaigns[1].expire_date_time, Some(1712345678));
        assert!(campaigns[1].defense);
    }

    #[test]
    fn test_percentage_is_exact() {
        let campaigns = decode_campaigns(SAMPLE).unwrap();
        assert_eq!(campaigns[0].percentage, Decimal::new(587655, 4));
        assert_eq!(campaigns[0].percentage.to_string(), "58.7655");
        assert_eq!(campaigns[1].percentage, Decimal::new(4975, 2));
    }

    #[test]
    fn test_percentage_keeps_digits_beyond_f64() {
        let json = r#"[{"planetIndex": 1, "faction": "A", "players": 0, "health": 1, "maxHealth": 1,
                        "percentage": 12.34567890123456789, "defense": false, "majorOrder": false}]"#;
        let campaigns = decode_campaigns(json).unwrap();
        assert_eq!(campaigns[0].percentage.to_string(), "12.34567890123456789");
        assert_eq!(campaigns[0].health, 1.0);
    }

    #[test]
    fn test_percentage_in_scientific_notation() {
        let n: Number = serde_json::from_str("1e-7").unwrap();
        assert_eq!(parse_decimal(&n), Some(Decimal::new(1, 7)));
    }

    #[test]
    fn test_missing_optional_fields() {
        let json = r#"[{"faction": "Illuminate", "players": 0, "health": 1, "maxHealth": 1,
                        "percentage": 100, "defense": false, "majorOrder": false}]"#;
        let campaigns = decode_campaigns(json).unwrap();
        assert_eq!(campaigns[0].planet, None);
        assert_eq!(campaigns[0].expire_date_time, None);
        assert_eq!(campaigns[0].percentage.to_string(), "100");
    }

    #[test]
    fn test_missing_required_field_names_the_record() {
        let json = r#"[
            {"planetIndex": 1, "faction": "A", "players": 0, "health": 1, "maxHealth": 1,
             "percentage": 1, "defense": false, "majorOrder": false},
            {"planetIndex": 2, "players": 0, "health": 1, "maxHealth": 1,
             "percentage": 1, "defense": false, "majorOrder": false}
        ]"#;
        match decode_campaigns(json).unwrap_err() {
            Error::Decode { kind, record, reason } => {
                assert_eq!(kind, "campaign");
                assert_eq!(record, "#1");
                assert!(reason.contains("faction"), "{}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_inputs_decode_to_nothing() {
        assert!(decode_campaigns("").unwrap().is_empty());
        assert!(decode_campaigns("null").unwrap().is_empty());
        assert!(decode_campaigns("[]").unwrap().is_empty());
    }
}

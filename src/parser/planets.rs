use serde::Deserialize;
use serde_json::{Map, Value};

use super::is_blank;
use crate::error::{Error, Result};
use crate::model::{canonical_slug, Biome, Environment, Planet};

const KIND: &str = "planet";

#[derive(Debug, Deserialize)]
struct RawPlanet {
    name: String,
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    biome: Option<RawBiome>,
    #[serde(default)]
    environmentals: Option<Vec<RawEnvironment>>,
}

/// The API sends `{}` for planets without a biome
#[derive(Debug, Deserialize)]
struct RawBiome {
    slug: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEnvironment {
    name: String,
    description: String,
}

/// Decode the planets document, an object keyed by stringified planet index.
///
/// Records keep the document's key order. The first malformed record aborts
/// decoding with an error naming its key.
pub fn decode_planets(json: &str) -> Result<Vec<Planet>> {
    if is_blank(json) {
        return Ok(Vec::new());
    }

    let doc: Map<String, Value> =
        serde_json::from_str(json).map_err(|e| Error::decode(KIND, "<document>", e))?;

    doc.into_iter()
        .map(|(key, value)| decode_planet(&key, value))
        .collect()
}

fn decode_planet(key: &str, value: Value) -> Result<Planet> {
    let index: i64 = key
        .trim()
        .parse()
        .map_err(|_| Error::decode(KIND, key, "key is not an integer index"))?;

    let raw: RawPlanet = serde_json::from_value(value).map_err(|e| Error::decode(KIND, key, e))?;

    let biome = match raw.biome {
        None | Some(RawBiome { slug: None, description: None }) => None,
        Some(RawBiome {
            slug: Some(slug),
            description: Some(description),
        }) => Some(Biome {
            slug: canonical_slug(&slug),
            description,
        }),
        Some(_) => return Err(Error::decode(KIND, key, "biome needs both slug and description")),
    };

    let environments = raw
        .environmentals
        .unwrap_or_default()
        .into_iter()
        .map(|e| Environment {
            name: e.name,
            description: e.description,
        })
        .collect();

    Ok(Planet {
        index,
        name: raw.name,
        sector: raw.sector,
        biome,
        environments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "0": {
            "name": "Super Earth",
            "sector": "Sol",
            "biome": {},
            "environmentals": []
        },
        "10": {
            "name": "Fenrir III",
            "sector": "Altus",
            "biome": {"slug": "moor", "description": "Foggy moorland"},
            "environmentals": [
                {"name": "Intense Heat", "description": "Hot."},
                {"name": "Fire Tornadoes", "description": "Spinning fire."}
            ],
            "position": {"x": 0.1, "y": 0.2}
        },
        "2": {
            "name": "Klen Dahth II",
            "sector": "Altus",
            "biome": {"slug": "Moor", "description": "Foggy moorland"}
        }
    }"#;

    #[test]
    fn test_decode_planets() {
        let planets = decode_planets(SAMPLE).unwrap();
        assert_eq!(planets.len(), 3);

        // document order, not numeric or lexical order
        let indexes: Vec<i64> = planets.iter().map(|p| p.index).collect();
        assert_eq!(indexes, vec![0, 10, 2]);

        assert_eq!(planets[0].biome, None);
        assert!(planets[0].environments.is_empty());
        assert_eq!(planets[0].sector.as_deref(), Some("Sol"));

        let fenrir = &planets[1];
        assert_eq!(fenrir.name, "Fenrir III");
        assert_eq!(fenrir.biome.as_ref().unwrap().slug, "Moor");
        assert_eq!(fenrir.environments.len(), 2);
        assert_eq!(fenrir.environments[1].name, "Fire Tornadoes");

        assert!(planets[2].environments.is_empty());
        assert_eq!(planets[1].biome, planets[2].biome);
    }

    #[test]
    fn test_empty_inputs_decode_to_nothing() {
        assert!(decode_planets("").unwrap().is_empty());
        assert!(decode_planets("  ").unwrap().is_empty());
        assert!(decode_planets("null").unwrap().is_empty());
        assert!(decode_planets("{}").unwrap().is_empty());
    }

    #[test]
    fn test_null_fields() {
        let planets =
            decode_planets(r#"{"5": {"name": "X", "sector": null, "biome": null, "environmentals": null}}"#)
                .unwrap();
        assert_eq!(planets[0].sector, None);
        assert_eq!(planets[0].biome, None);
        assert!(planets[0].environments.is_empty());
    }

    #[test]
    fn test_missing_name_names_the_record() {
        let err = decode_planets(r#"{"1": {"name": "A"}, "7": {"sector": "Sol"}}"#).unwrap_err();
        match err {
            Error::Decode { kind, record, reason } => {
                assert_eq!(kind, "planet");
                assert_eq!(record, "7");
                assert!(reason.contains("name"), "{}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_non_integer_key_is_rejected() {
        let err = decode_planets(r#"{"abc": {"name": "A"}}"#).unwrap_err();
        assert!(matches!(err, Error::Decode { ref record, .. } if record == "abc"));
    }

    #[test]
    fn test_partial_biome_is_rejected() {
        let err = decode_planets(r#"{"1": {"name": "A", "biome": {"slug": "moor"}}}"#).unwrap_err();
        assert!(matches!(err, Error::Decode { ref record, .. } if record == "1"));
    }

    #[test]
    fn test_malformed_environment_is_rejected() {
        let json = r#"{"3": {"name": "A", "environmentals": [{"name": "Rain"}]}}"#;
        assert!(matches!(decode_planets(json), Err(Error::Decode { .. })));
    }

    #[test]
    fn test_array_document_is_rejected() {
        let err = decode_planets("[]").unwrap_err();
        assert!(matches!(err, Error::Decode { ref record, .. } if record == "<document>"));
    }
}

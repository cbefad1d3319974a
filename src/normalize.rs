//! Derives the deduplicated dimension sets from decoded planets.
//!
//! Every set is emitted in order of first occurrence so repeated runs over
//! the same document assign the same surrogate ids.

use std::collections::HashSet;
use std::hash::Hash;

use crate::model::{Biome, Environment, Planet};

/// Deduplicated dimension entities for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dimensions {
    pub environments: Vec<Environment>,
    pub biomes: Vec<Biome>,
    pub sectors: Vec<String>,
}

impl Dimensions {
    pub fn from_planets(planets: &[Planet]) -> Self {
        Self {
            environments: unique_environments(planets),
            biomes: unique_biomes(planets),
            sectors: unique_sectors(planets),
        }
    }
}

pub fn unique_biomes(planets: &[Planet]) -> Vec<Biome> {
    unique_in_order(planets.iter().filter_map(|p| p.biome.as_ref()))
}

pub fn unique_environments(planets: &[Planet]) -> Vec<Environment> {
    unique_in_order(planets.iter().flat_map(|p| p.environments.iter()))
}

pub fn unique_sectors(planets: &[Planet]) -> Vec<String> {
    unique_in_order(planets.iter().filter_map(|p| p.sector.as_ref()))
}

fn unique_in_order<'a, T>(items: impl Iterator<Item = &'a T>) -> Vec<T>
where
    T: Eq + Hash + Clone + 'a,
{
    let mut seen: HashSet<&T> = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        if seen.insert(item) {
            out.push(item.clone());
        }
    }
    out
}

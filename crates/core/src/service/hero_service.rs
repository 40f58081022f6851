//! Read-only superhero queries.

use std::sync::Arc;

use mvc_storage::CollectionStore;

use crate::error::HeroError;
use crate::model::{Hero, HeroAttribute};

/// Planet names that count as Earth in the age query.
pub const EARTH_NAMES: [&str; 2] = ["Earth", "Tierra"];

/// Heroes must be strictly older than this to appear in the age query.
const AGE_THRESHOLD: f64 = 30.0;

/// Minimum number of powers for the age query.
const MIN_POWERS: usize = 2;

/// Query service for the superheroes collection. Never writes.
pub struct HeroService<S> {
    store: Arc<S>,
}

impl<S> Clone for HeroService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: CollectionStore<Hero>> HeroService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// First hero with `id`, if any.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Hero>, HeroError> {
        let heroes = self.store.load_all().await?;
        Ok(heroes.into_iter().find(|h| h.id == id))
    }

    /// Heroes whose `attribute` text contains `value`, ignoring case.
    ///
    /// Known names are parsed with [`HeroAttribute::from_str`]. Any other
    /// name is looked up among the heroes' extra keys, and fails with
    /// [`HeroError::UnknownAttribute`] only when no hero carries it.
    ///
    /// [`HeroAttribute::from_str`]: std::str::FromStr::from_str
    pub async fn find_by_attribute(
        &self,
        attribute: &str,
        value: &str,
    ) -> Result<Vec<Hero>, HeroError> {
        let needle = value.to_lowercase();
        let mut heroes = self.store.load_all().await?;
        match attribute.parse::<HeroAttribute>() {
            Ok(attr) => heroes.retain(|h| attr.text(h).to_lowercase().contains(&needle)),
            Err(unknown) => {
                if !heroes.iter().any(|h| h.extra_text(attribute).is_some()) {
                    return Err(unknown);
                }
                heroes.retain(|h| {
                    h.extra_text(attribute)
                        .is_some_and(|text| text.to_lowercase().contains(&needle))
                });
            }
        }
        tracing::debug!(attribute, value, matches = heroes.len(), "hero attribute search");
        Ok(heroes)
    }

    /// Heroes older than 30, from Earth, with at least two powers.
    ///
    /// A hero without a numeric age never qualifies.
    pub async fn older_than_30_earth_heroes_with_multiple_powers(
        &self,
    ) -> Result<Vec<Hero>, HeroError> {
        let mut heroes = self.store.load_all().await?;
        heroes.retain(|h| {
            h.age_years().is_some_and(|age| age > AGE_THRESHOLD)
                && EARTH_NAMES.contains(&h.home_planet.as_str())
                && h.powers.len() >= MIN_POWERS
        });
        Ok(heroes)
    }
}

use std::fmt;
use std::str::FromStr;

use mvc_storage::Record;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::lenient;
use crate::error::HeroError;

/// A superhero as stored in the superheroes data file.
///
/// Keys follow the data file's Spanish names; the English camelCase names are
/// accepted on read. Keys outside the known set are kept in `extra` and
/// written back unchanged. No field is validated: nulls and values of an
/// unexpected type fall back to empty values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: i64,
    #[serde(rename = "nombreSuperHeroe", alias = "name", default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(rename = "nombreReal", alias = "realName", default, deserialize_with = "lenient::text")]
    pub real_name: String,
    #[serde(
        rename = "edad",
        alias = "age",
        default,
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<Number>,
    #[serde(rename = "planetaOrigen", alias = "homePlanet", default, deserialize_with = "lenient::text")]
    pub home_planet: String,
    #[serde(rename = "debilidad", alias = "weakness", default, deserialize_with = "lenient::text")]
    pub weakness: String,
    #[serde(rename = "poder", alias = "powers", default, deserialize_with = "lenient::text_list")]
    pub powers: Vec<String>,
    #[serde(rename = "aliados", alias = "allies", default, deserialize_with = "lenient::text_list")]
    pub allies: Vec<String>,
    #[serde(rename = "enemigos", alias = "enemies", default, deserialize_with = "lenient::text_list")]
    pub enemies: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Hero {
    /// Age as a number of years, when the record has a numeric age.
    pub fn age_years(&self) -> Option<f64> {
        self.age.as_ref().and_then(Number::as_f64)
    }

    /// Text of an attribute outside the known set, matched on its key
    /// ignoring case. `None` when this hero has no such key.
    pub fn extra_text(&self, key: &str) -> Option<String> {
        self.extra
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| lenient::value_text(v))
    }
}

impl Record for Hero {
    fn id(&self) -> i64 {
        self.id
    }
}

/// The attributes a hero can be searched by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroAttribute {
    Id,
    Name,
    RealName,
    Age,
    HomePlanet,
    Weakness,
    Powers,
    Allies,
    Enemies,
}

impl HeroAttribute {
    pub const ALL: [HeroAttribute; 9] = [
        HeroAttribute::Id,
        HeroAttribute::Name,
        HeroAttribute::RealName,
        HeroAttribute::Age,
        HeroAttribute::HomePlanet,
        HeroAttribute::Weakness,
        HeroAttribute::Powers,
        HeroAttribute::Allies,
        HeroAttribute::Enemies,
    ];

    /// Key used for this attribute in the data file.
    pub fn key(self) -> &'static str {
        match self {
            HeroAttribute::Id => "id",
            HeroAttribute::Name => "nombreSuperHeroe",
            HeroAttribute::RealName => "nombreReal",
            HeroAttribute::Age => "edad",
            HeroAttribute::HomePlanet => "planetaOrigen",
            HeroAttribute::Weakness => "debilidad",
            HeroAttribute::Powers => "poder",
            HeroAttribute::Allies => "aliados",
            HeroAttribute::Enemies => "enemigos",
        }
    }

    /// Textual form of the attribute's value: numbers in decimal, lists
    /// joined with `,`.
    pub fn text(self, hero: &Hero) -> String {
        match self {
            HeroAttribute::Id => hero.id.to_string(),
            HeroAttribute::Name => hero.name.clone(),
            HeroAttribute::RealName => hero.real_name.clone(),
            HeroAttribute::Age => hero.age.as_ref().map(Number::to_string).unwrap_or_default(),
            HeroAttribute::HomePlanet => hero.home_planet.clone(),
            HeroAttribute::Weakness => hero.weakness.clone(),
            HeroAttribute::Powers => hero.powers.join(","),
            HeroAttribute::Allies => hero.allies.join(","),
            HeroAttribute::Enemies => hero.enemies.join(","),
        }
    }
}

impl fmt::Display for HeroAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for HeroAttribute {
    type Err = HeroError;

    /// Accepts the data-file key or the English name, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let attr = match s.to_lowercase().as_str() {
            "id" => HeroAttribute::Id,
            "nombresuperheroe" | "nombre" | "name" => HeroAttribute::Name,
            "nombrereal" | "realname" => HeroAttribute::RealName,
            "edad" | "age" => HeroAttribute::Age,
            "planetaorigen" | "homeplanet" => HeroAttribute::HomePlanet,
            "debilidad" | "weakness" => HeroAttribute::Weakness,
            "poder" | "poderes" | "powers" => HeroAttribute::Powers,
            "aliados" | "allies" => HeroAttribute::Allies,
            "enemigos" | "enemies" => HeroAttribute::Enemies,
            _ => return Err(HeroError::UnknownAttribute(s.to_string())),
        };
        Ok(attr)
    }
}

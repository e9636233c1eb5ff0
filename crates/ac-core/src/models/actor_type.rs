use crate::{CoreError, CoreResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorType {
    #[default]
    Person,
    Application,
    Group,
    Organization,
    Service,
}

impl ActorType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Person => "PERSON",
            Self::Application => "APPLICATION",
            Self::Group => "GROUP",
            Self::Organization => "ORGANIZATION",
            Self::Service => "SERVICE",
        }
    }

    /// GraphQL object type used when an actor of this kind is written to the cache.
    pub fn typename(&self) -> &str {
        match self {
            Self::Person => "Person",
            Self::Application => "Application",
            Self::Group => "Group",
            Self::Organization => "Organization",
            Self::Service => "Service",
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group)
    }

    pub fn is_person(&self) -> bool {
        matches!(self, Self::Person)
    }
}

impl FromStr for ActorType {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PERSON" => Ok(Self::Person),
            "APPLICATION" => Ok(Self::Application),
            "GROUP" => Ok(Self::Group),
            "ORGANIZATION" => Ok(Self::Organization),
            "SERVICE" => Ok(Self::Service),
            _ => Err(CoreError::InvalidActorType {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

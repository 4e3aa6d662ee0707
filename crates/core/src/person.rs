//! Person identity: a trimmed, non-empty name.

use core::borrow::Borrow;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A participant in a shared-expense group.
///
/// The trimmed name is the only identity key; comparison is case- and
/// whitespace-sensitive after trimming. Ordering is lexicographic by name,
/// which is what the ledger uses to pick the drift-absorbing person.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Person(String);

impl Person {
    pub fn new(name: impl AsRef<str>) -> DomainResult<Self> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_person("name must be non-empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Person {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Person {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Person> for String {
    fn from(value: Person) -> Self {
        value.0
    }
}

impl AsRef<str> for Person {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Person {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed() {
        let p = Person::new("  Alice \t").unwrap();
        assert_eq!(p.name(), "Alice");
        assert_eq!(p, Person::new("Alice").unwrap());
    }

    #[test]
    fn blank_names_are_rejected() {
        for bad in ["", "   ", "\n\t"] {
            assert!(matches!(Person::new(bad), Err(DomainError::InvalidPerson(_))));
        }
    }

    #[test]
    fn identity_is_case_sensitive() {
        assert_ne!(Person::new("alice").unwrap(), Person::new("Alice").unwrap());
    }

    #[test]
    fn ordering_is_lexicographic() {
        let mut people: Vec<Person> = ["bob", "Alice", "Carol"]
            .iter()
            .map(|n| n.parse().unwrap())
            .collect();
        people.sort();
        let names: Vec<&str> = people.iter().map(Person::name).collect();
        assert_eq!(names, vec!["Alice", "Carol", "bob"]);
    }

    #[test]
    fn deserialization_validates() {
        let p: Person = serde_json::from_str("\" Dana \"").unwrap();
        assert_eq!(p.name(), "Dana");
        assert!(serde_json::from_str::<Person>("\"  \"").is_err());
    }
}

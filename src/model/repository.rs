use crate::github::FetchError;
use std::fmt::{Display, Formatter};

/// Repository identifier in `owner/name` form.
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

// New
impl Repository {
    fn new(owner: impl ToString, name: impl ToString) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    /// File-name friendly form, `owner-name`.
    pub fn slug(&self) -> String {
        format!("{}-{}", self.owner, self.name)
    }
}

// Parser
impl Repository {
    pub fn parse(identifier: &str) -> Result<Self, FetchError> {
        let Some((owner, name)) = identifier.trim().split_once('/') else {
            return Err(FetchError::InvalidRepository);
        };
        let (owner, name) = (owner.trim(), name.trim());
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(FetchError::InvalidRepository);
        }
        Ok(Self::new(owner, name))
    }
}

impl Display for Repository {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

use std::{fmt::Display, ops::Deref};

use serde::Serialize;

/// The name of a repository.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(pub String);

impl Deref for RepositoryName {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for RepositoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The number of stars a repository has.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarsCounter(pub u64);

impl Deref for StarsCounter {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for StarsCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The number of forks a repository has.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForksCounter(pub u64);

impl Deref for ForksCounter {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ForksCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the repository listing of an account.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRecord {
    /// The name of the repository.
    name: RepositoryName,

    /// The number of stars the repository has.
    stars: StarsCounter,

    /// The number of forks the repository has.
    forks: ForksCounter,

    /// The login of the account owning the repository, when the listing reports it.
    owner: Option<String>,
}

impl RepositoryRecord {
    /// Creates a new `RepositoryRecord` instance.
    pub fn new(name: &str, stars: u64, forks: u64, owner: Option<&str>) -> Self {
        Self {
            name: RepositoryName(name.to_string()),
            stars: StarsCounter(stars),
            forks: ForksCounter(forks),
            owner: owner.map(str::to_string),
        }
    }

    /// Retrieves the repository name.
    pub fn name(&self) -> &RepositoryName {
        &self.name
    }

    /// Retrieves the stars of the repository.
    pub fn stars(&self) -> StarsCounter {
        self.stars
    }

    /// Retrieves the forks of the repository.
    pub fn forks(&self) -> ForksCounter {
        self.forks
    }

    /// Retrieves the owner login of the repository.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }
}

impl Display for RepositoryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Repository: {}, Stars: {}, Forks: {}",
            self.name, self.stars, self.forks
        )
    }
}

/// The aggregated statistics of every repository fetched in one run.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TotalsSummary {
    /// Sum of the stars of all repositories.
    pub total_stars: u64,

    /// Sum of the forks of all repositories.
    pub total_forks: u64,

    /// The repositories, in the order they were fetched.
    pub repositories: Vec<RepositoryRecord>,
}

impl TotalsSummary {
    /// Sums the stars and forks of the given repositories.
    pub fn from_repositories(repositories: Vec<RepositoryRecord>) -> Self {
        let (total_stars, total_forks) = repositories
            .iter()
            .fold((0u64, 0u64), |(stars, forks), repository| {
                (
                    stars.saturating_add(*repository.stars()),
                    forks.saturating_add(*repository.forks()),
                )
            });

        Self {
            total_stars,
            total_forks,
            repositories,
        }
    }

    /// Computes the change from a previously displayed summary to this one.
    pub fn compare(&self, previous: &TotalsSummary) -> TotalsDelta {
        TotalsDelta {
            stars: saturating_delta(self.total_stars, previous.total_stars),
            forks: saturating_delta(self.total_forks, previous.total_forks),
        }
    }
}

fn saturating_delta(current: u64, previous: u64) -> i64 {
    if current >= previous {
        i64::try_from(current - previous).unwrap_or(i64::MAX)
    } else {
        i64::try_from(previous - current).map_or(i64::MIN, |decrease| -decrease)
    }
}

impl Display for TotalsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Totals: repositories={}, stars={}, forks={}",
            self.repositories.len(),
            self.total_stars,
            self.total_forks
        )
    }
}

/// The difference between two totals summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TotalsDelta {
    /// Change of the total stars.
    pub stars: i64,

    /// Change of the total forks.
    pub forks: i64,
}

impl TotalsDelta {
    /// Whether any of the totals changed.
    pub fn has_changes(&self) -> bool {
        self.stars != 0 || self.forks != 0
    }
}

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use thiserror::Error;

use crate::models::{Activity, Directory};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse seed file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("activity '{0}' appears more than once")]
    DuplicateActivity(String),
    #[error("activity '{0}' has max_participants = 0")]
    ZeroCapacity(String),
    #[error("activity '{activity}' lists {email} more than once")]
    DuplicateParticipant { activity: String, email: String },
}

/// Built-in Mergington High School activities.
pub fn default_seed() -> Directory {
    let mut activities = Directory::new();
    let mut add = |name: &str, activity: Activity| {
        activities.insert(name.to_string(), activity);
    };

    add(
        "Chess Club",
        Activity::new(
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM",
            12,
        )
        .with_participants(["michael@mergington.edu", "daniel@mergington.edu"]),
    );
    add(
        "Programming Class",
        Activity::new(
            "Learn programming fundamentals and build software projects",
            "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
            20,
        )
        .with_participants(["emma@mergington.edu", "sophia@mergington.edu"]),
    );
    add(
        "Gym Class",
        Activity::new(
            "Physical education and sports activities",
            "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
            30,
        )
        .with_participants(["john@mergington.edu", "olivia@mergington.edu"]),
    );
    add(
        "Basketball Team",
        Activity::new(
            "Practice and compete in interschool basketball games",
            "Mondays and Wednesdays, 4:00 PM - 6:00 PM",
            15,
        )
        .with_participants(["james@mergington.edu"]),
    );
    add(
        "Tennis Club",
        Activity::new(
            "Improve your serve and play friendly matches",
            "Tuesdays, 4:00 PM - 5:30 PM",
            10,
        )
        .with_participants(["lucas@mergington.edu"]),
    );
    add(
        "Drama Club",
        Activity::new(
            "Act, direct and stage the school's theater productions",
            "Thursdays, 3:30 PM - 5:30 PM",
            25,
        )
        .with_participants(["ava@mergington.edu", "mia@mergington.edu"]),
    );
    add(
        "Art Studio",
        Activity::new(
            "Explore painting, drawing and sculpture",
            "Wednesdays, 3:30 PM - 5:00 PM",
            18,
        )
        .with_participants(["amelia@mergington.edu"]),
    );
    add(
        "Math Olympiad",
        Activity::new(
            "Solve challenging problems and prepare for math competitions",
            "Mondays, 3:30 PM - 4:30 PM",
            10,
        )
        .with_participants(["ethan@mergington.edu"]),
    );
    add(
        "Debate Team",
        Activity::new(
            "Sharpen public speaking and argumentation skills",
            "Fridays, 4:00 PM - 5:30 PM",
            16,
        )
        .with_participants(["charlotte@mergington.edu", "henry@mergington.edu"]),
    );

    activities
}

/// Reads a seed file shaped like the `GET /activities` response body.
pub fn load_seed(path: impl AsRef<Path>) -> Result<Directory, SeedError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let SeedEntries(entries) =
        serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut activities = Directory::with_capacity(entries.len());
    for (name, activity) in entries {
        if activities.contains_key(&name) {
            return Err(SeedError::DuplicateActivity(name));
        }
        activities.insert(name, activity);
    }
    validate_seed(&activities)?;
    Ok(activities)
}

/// Seed object entries in file order, repeated keys included.
struct SeedEntries(Vec<(String, Activity)>);

impl<'de> Deserialize<'de> for SeedEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = SeedEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of activity name to activity")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SeedEntries, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Activity>()? {
                    entries.push(entry);
                }
                Ok(SeedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

pub fn validate_seed(activities: &Directory) -> Result<(), SeedError> {
    for (name, activity) in activities {
        if activity.max_participants == 0 {
            return Err(SeedError::ZeroCapacity(name.clone()));
        }
        let mut seen = HashSet::new();
        for email in &activity.participants {
            if !seen.insert(email.as_str()) {
                return Err(SeedError::DuplicateParticipant {
                    activity: name.clone(),
                    email: email.clone(),
                });
            }
        }
    }
    Ok(())
}

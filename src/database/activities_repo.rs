use parking_lot::RwLock;

use crate::models::{Activity, Directory};

/// In-memory activity directory. Lives from process start to process end.
///
/// Every mutation runs under the write lock for its whole check-then-act
/// sequence, and readers only ever see complete states.
#[derive(Debug, Default)]
pub struct ActivityDirectory {
    activities: RwLock<Directory>,
}

impl ActivityDirectory {
    pub fn new(activities: Directory) -> Self {
        Self {
            activities: RwLock::new(activities),
        }
    }

    /// Consistent copy of the whole directory.
    pub fn snapshot(&self) -> Directory {
        self.activities.read().clone()
    }

    pub fn get(&self, name: &str) -> Option<Activity> {
        self.activities.read().get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.activities.read().keys().cloned().collect()
    }

    /// Runs `f` against the named activity while holding exclusive access.
    /// Returns `None` if the activity does not exist.
    pub fn with_activity_mut<T>(
        &self,
        name: &str,
        f: impl FnOnce(&mut Activity) -> T,
    ) -> Option<T> {
        let mut activities = self.activities.write();
        activities.get_mut(name).map(f)
    }
}

use tracing::debug;

use crate::models::{Milestone, MilestoneStatus, Priority};
use crate::storage::{ROADMAP_KEY, Storage, StorageError};

/// Milestone counts by status, for the progress overview cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
}

/// Ordered, mutable collection of roadmap milestones.
///
/// The list order is the display order and is preserved exactly as the
/// user arranges it. Every successful mutation writes the whole list back
/// to the `roadmap` key, so the roadmap survives restarts the same way the
/// account registry does.
pub struct RoadmapStore<'a, S: Storage> {
    storage: &'a S,
    milestones: Vec<Milestone>,
}

impl<'a, S: Storage> RoadmapStore<'a, S> {
    pub fn new(storage: &'a S) -> Result<Self, StorageError> {
        let milestones = storage.get_json(ROADMAP_KEY)?.unwrap_or_default();
        Ok(Self {
            storage,
            milestones,
        })
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn len(&self) -> usize {
        self.milestones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
    }

    /// Append a new pending milestone. Rejects empty titles and due dates
    /// by returning `None` without touching the list.
    pub fn add(
        &mut self,
        title: &str,
        description: &str,
        due_date: &str,
        priority: Priority,
    ) -> Result<Option<&Milestone>, StorageError> {
        if title.is_empty() || due_date.is_empty() {
            return Ok(None);
        }

        let milestone = Milestone::new(
            title.to_string(),
            description.to_string(),
            due_date.to_string(),
            priority,
        );
        debug!(id = %milestone.id, title, "adding milestone");
        self.milestones.push(milestone);
        self.save()?;
        Ok(self.milestones.last())
    }

    /// Replace the status of the milestone with the given id. Returns
    /// whether the id was found; an unknown id changes nothing.
    pub fn update_status(
        &mut self,
        id: &str,
        status: MilestoneStatus,
    ) -> Result<bool, StorageError> {
        let Some(milestone) = self.milestones.iter_mut().find(|m| m.id == id) else {
            return Ok(false);
        };
        milestone.status = status;
        self.save()?;
        Ok(true)
    }

    /// Remove the milestone with the given id. Unknown ids are a no-op.
    pub fn delete(&mut self, id: &str) -> Result<bool, StorageError> {
        let before = self.milestones.len();
        self.milestones.retain(|m| m.id != id);
        if self.milestones.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Move the milestone at `source` so it ends up at `destination`,
    /// shifting everything in between by one. Out-of-range indices are
    /// rejected (returns `false`, list untouched) rather than panicking.
    pub fn move_milestone(
        &mut self,
        source: usize,
        destination: usize,
    ) -> Result<bool, StorageError> {
        if source >= self.milestones.len() || destination >= self.milestones.len() {
            return Ok(false);
        }
        if source == destination {
            return Ok(true);
        }

        let milestone = self.milestones.remove(source);
        self.milestones.insert(destination, milestone);
        self.save()?;
        Ok(true)
    }

    /// Derived counts by status; reads nothing and writes nothing
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for milestone in &self.milestones {
            match milestone.status {
                MilestoneStatus::Completed => counts.completed += 1,
                MilestoneStatus::InProgress => counts.in_progress += 1,
                MilestoneStatus::Pending => counts.pending += 1,
            }
        }
        counts
    }

    /// Populate an empty roadmap with the starter plan. Returns `false`
    /// when milestones already exist.
    pub fn init_starter(&mut self) -> Result<bool, StorageError> {
        if !self.milestones.is_empty() {
            return Ok(false);
        }
        self.milestones = starter_roadmap();
        self.save()?;
        Ok(true)
    }

    fn save(&self) -> Result<(), StorageError> {
        self.storage.set_json(ROADMAP_KEY, &self.milestones)
    }
}

/// The ten-milestone starter plan that ships with the product
pub fn starter_roadmap() -> Vec<Milestone> {
    let entries: [(&str, &str, &str, &str, MilestoneStatus, Priority); 10] = [
        (
            "1",
            "Market Research & Validation",
            "Conduct comprehensive market research and validate the business idea",
            "2024-02-15",
            MilestoneStatus::Completed,
            Priority::High,
        ),
        (
            "2",
            "Business Plan Development",
            "Create detailed business plan with financial projections",
            "2024-02-28",
            MilestoneStatus::InProgress,
            Priority::High,
        ),
        (
            "3",
            "MVP Development",
            "Build minimum viable product for initial testing",
            "2024-03-15",
            MilestoneStatus::Pending,
            Priority::High,
        ),
        (
            "4",
            "Team Building",
            "Recruit key team members and advisors",
            "2024-03-01",
            MilestoneStatus::InProgress,
            Priority::Medium,
        ),
        (
            "5",
            "Funding Strategy",
            "Develop funding strategy and prepare pitch deck",
            "2024-03-30",
            MilestoneStatus::Pending,
            Priority::High,
        ),
        (
            "6",
            "Legal Setup",
            "Incorporate business and handle legal requirements",
            "2024-04-15",
            MilestoneStatus::Pending,
            Priority::Medium,
        ),
        (
            "7",
            "Beta Testing",
            "Launch beta version and gather user feedback",
            "2024-04-30",
            MilestoneStatus::Pending,
            Priority::High,
        ),
        (
            "8",
            "Marketing Strategy",
            "Develop comprehensive marketing and go-to-market strategy",
            "2024-05-15",
            MilestoneStatus::Pending,
            Priority::Medium,
        ),
        (
            "9",
            "Product Launch",
            "Official product launch and public announcement",
            "2024-06-01",
            MilestoneStatus::Pending,
            Priority::High,
        ),
        (
            "10",
            "Scale & Growth",
            "Focus on scaling operations and user acquisition",
            "2024-07-01",
            MilestoneStatus::Pending,
            Priority::Medium,
        ),
    ];

    entries
        .into_iter()
        .map(
            |(id, title, description, due_date, status, priority)| Milestone {
                id: id.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                due_date: due_date.to_string(),
                status,
                priority,
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store(storage: &MemoryStorage) -> RoadmapStore<'_, MemoryStorage> {
        RoadmapStore::new(storage).expect("store opens")
    }

    #[test]
    fn add_appends_a_pending_milestone() {
        let storage = MemoryStorage::new();
        let mut roadmap = store(&storage);

        roadmap
            .add("Design", "", "2024-05-01", Priority::Low)
            .expect("storage works")
            .expect("valid milestone is accepted");
        let added = roadmap
            .add("Build", "the MVP", "2024-06-01", Priority::High)
            .expect("storage works")
            .expect("valid milestone is accepted");

        assert_eq!(added.title, "Build");
        assert_eq!(added.status, MilestoneStatus::Pending);
        assert_eq!(roadmap.len(), 2);
        assert_eq!(roadmap.milestones()[1].title, "Build");
    }

    #[test]
    fn add_rejects_empty_title_or_due_date() {
        let storage = MemoryStorage::new();
        let mut roadmap = store(&storage);

        assert!(
            roadmap
                .add("", "desc", "2024-05-01", Priority::Medium)
                .expect("storage works")
                .is_none()
        );
        assert!(
            roadmap
                .add("Title", "desc", "", Priority::Medium)
                .expect("storage works")
                .is_none()
        );
        assert!(roadmap.is_empty());
    }

    #[test]
    fn update_status_on_unknown_id_changes_nothing() {
        let storage = MemoryStorage::new();
        let mut roadmap = store(&storage);
        roadmap
            .add("Design", "", "2024-05-01", Priority::Low)
            .expect("storage works");

        let before = roadmap.milestones().to_vec();
        let found = roadmap
            .update_status("no-such-id", MilestoneStatus::Completed)
            .expect("storage works");

        assert!(!found);
        assert_eq!(roadmap.milestones(), before.as_slice());
    }

    #[test]
    fn update_status_allows_any_transition() {
        let storage = MemoryStorage::new();
        let mut roadmap = store(&storage);
        let id = roadmap
            .add("Design", "", "2024-05-01", Priority::Low)
            .expect("storage works")
            .expect("accepted")
            .id
            .clone();

        // Straight to completed, then back to pending; no enforced order
        assert!(
            roadmap
                .update_status(&id, MilestoneStatus::Completed)
                .expect("storage works")
        );
        assert!(
            roadmap
                .update_status(&id, MilestoneStatus::Pending)
                .expect("storage works")
        );
        assert_eq!(roadmap.milestones()[0].status, MilestoneStatus::Pending);
    }

    #[test]
    fn delete_removes_only_the_matching_id() {
        let storage = MemoryStorage::new();
        let mut roadmap = store(&storage);
        let first = roadmap
            .add("One", "", "2024-05-01", Priority::Low)
            .expect("storage works")
            .expect("accepted")
            .id
            .clone();
        roadmap
            .add("Two", "", "2024-05-02", Priority::Low)
            .expect("storage works");

        assert!(roadmap.delete(&first).expect("storage works"));
        assert!(!roadmap.delete("unknown").expect("storage works"));
        assert_eq!(roadmap.len(), 1);
        assert_eq!(roadmap.milestones()[0].title, "Two");
    }

    #[test]
    fn move_milestone_splices_and_keeps_relative_order() {
        let storage = MemoryStorage::new();
        let mut roadmap = store(&storage);
        for (title, due) in [("A", "2024-01-01"), ("B", "2024-01-02"), ("C", "2024-01-03"), ("D", "2024-01-04")] {
            roadmap
                .add(title, "", due, Priority::Medium)
                .expect("storage works");
        }

        assert!(roadmap.move_milestone(0, 2).expect("storage works"));
        let titles: Vec<&str> = roadmap.milestones().iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C", "A", "D"]);

        // Multiset of ids is preserved
        assert_eq!(roadmap.len(), 4);
    }

    #[test]
    fn move_to_same_position_changes_nothing() {
        let storage = MemoryStorage::new();
        let mut roadmap = store(&storage);
        roadmap
            .add("Design", "", "2024-05-01", Priority::Low)
            .expect("storage works");

        let before = roadmap.milestones().to_vec();
        assert!(roadmap.move_milestone(0, 0).expect("storage works"));
        assert_eq!(roadmap.milestones(), before.as_slice());
    }

    #[test]
    fn move_rejects_out_of_range_indices() {
        let storage = MemoryStorage::new();
        let mut roadmap = store(&storage);
        roadmap
            .add("Design", "", "2024-05-01", Priority::Low)
            .expect("storage works");

        let before = roadmap.milestones().to_vec();
        assert!(!roadmap.move_milestone(0, 5).expect("storage works"));
        assert!(!roadmap.move_milestone(3, 0).expect("storage works"));
        assert_eq!(roadmap.milestones(), before.as_slice());
    }

    #[test]
    fn status_counts_match_the_list() {
        let storage = MemoryStorage::new();
        let mut roadmap = store(&storage);
        roadmap.init_starter().expect("storage works");

        let counts = roadmap.status_counts();
        assert_eq!(
            counts,
            StatusCounts {
                completed: 1,
                in_progress: 2,
                pending: 7,
            }
        );
    }

    #[test]
    fn roadmap_persists_across_store_instances() {
        let storage = MemoryStorage::new();
        {
            let mut roadmap = store(&storage);
            roadmap
                .add("Design", "", "2024-05-01", Priority::Low)
                .expect("storage works");
        }

        let reloaded = store(&storage);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.milestones()[0].title, "Design");
    }

    #[test]
    fn init_starter_only_seeds_an_empty_roadmap() {
        let storage = MemoryStorage::new();
        let mut roadmap = store(&storage);

        assert!(roadmap.init_starter().expect("storage works"));
        assert_eq!(roadmap.len(), 10);
        assert!(!roadmap.init_starter().expect("storage works"));
        assert_eq!(roadmap.len(), 10);
    }
}

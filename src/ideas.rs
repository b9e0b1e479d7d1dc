use rand::seq::SliceRandom;

use crate::models::{Difficulty, StartupIdea};
use crate::storage::{LIKED_IDEAS_KEY, Storage, StorageError};

/// Industry filter values offered by the dashboard
pub const INDUSTRIES: &[&str] = &[
    "All",
    "Technology",
    "Healthcare",
    "Education",
    "Finance",
    "E-commerce",
    "Social Impact",
];

/// The built-in idea catalog plus the user's liked ids.
///
/// The catalog itself is hard-coded product content; only the liked ids
/// are persisted (under `likedIdeas`). "Generating" new ideas reshuffles
/// the catalog.
pub struct IdeaCatalog<'a, S: Storage> {
    storage: &'a S,
    ideas: Vec<StartupIdea>,
    liked: Vec<String>,
}

impl<'a, S: Storage> IdeaCatalog<'a, S> {
    pub fn new(storage: &'a S) -> Result<Self, StorageError> {
        let liked = storage.get_json(LIKED_IDEAS_KEY)?.unwrap_or_default();
        Ok(Self {
            storage,
            ideas: builtin_ideas(),
            liked,
        })
    }

    pub fn ideas(&self) -> &[StartupIdea] {
        &self.ideas
    }

    pub fn liked(&self) -> &[String] {
        &self.liked
    }

    pub fn is_liked(&self, idea_id: &str) -> bool {
        self.liked.iter().any(|id| id == idea_id)
    }

    /// Case-insensitive substring search over title and description,
    /// narrowed by industry ("All" matches everything)
    pub fn filtered(&self, search: &str, industry: &str) -> Vec<&StartupIdea> {
        let needle = search.to_lowercase();
        self.ideas
            .iter()
            .filter(|idea| {
                let matches_search = idea.title.to_lowercase().contains(&needle)
                    || idea.description.to_lowercase().contains(&needle);
                let matches_industry = industry == "All" || idea.industry == industry;
                matches_search && matches_industry
            })
            .collect()
    }

    /// Toggle a like and persist the new set. Returns whether the idea is
    /// liked afterwards.
    pub fn toggle_like(&mut self, idea_id: &str) -> Result<bool, StorageError> {
        if let Some(pos) = self.liked.iter().position(|id| id == idea_id) {
            self.liked.remove(pos);
        } else {
            self.liked.push(idea_id.to_string());
        }
        self.storage.set_json(LIKED_IDEAS_KEY, &self.liked)?;
        Ok(self.is_liked(idea_id))
    }

    /// Present the catalog in a fresh order
    pub fn shuffle(&mut self) {
        self.ideas.shuffle(&mut rand::thread_rng());
    }
}

fn idea(
    id: &str,
    title: &str,
    description: &str,
    industry: &str,
    rating: f32,
    target_market: &str,
    revenue_model: &str,
    key_features: &[&str],
    views: u32,
    market_potential: &str,
    difficulty: Difficulty,
) -> StartupIdea {
    StartupIdea {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        industry: industry.to_string(),
        rating,
        target_market: target_market.to_string(),
        revenue_model: revenue_model.to_string(),
        key_features: key_features.iter().map(|f| f.to_string()).collect(),
        views,
        market_potential: market_potential.to_string(),
        difficulty,
    }
}

/// The shipped catalog, in its default display order
pub fn builtin_ideas() -> Vec<StartupIdea> {
    vec![
        idea(
            "1",
            "AI Meal Prep Coach",
            "Personalized weekly meal plans that adapt to dietary goals, budget and what is already in the fridge",
            "Technology",
            4.8,
            "Busy professionals aged 25-45 who want to eat healthier without planning overhead",
            "Freemium subscription with premium nutritionist consultations",
            &[
                "Fridge photo ingredient recognition",
                "Budget-aware shopping lists",
                "Macro tracking synced with fitness apps",
            ],
            2841,
            "+32%",
            Difficulty::Medium,
        ),
        idea(
            "2",
            "TeleVet Connect",
            "On-demand video consultations with licensed veterinarians for routine pet health questions",
            "Healthcare",
            4.6,
            "Pet owners in areas with limited access to veterinary clinics",
            "Pay-per-consultation plus a care membership tier",
            &[
                "24/7 triage chat",
                "Prescription delivery partnerships",
                "Pet health records vault",
            ],
            1975,
            "+27%",
            Difficulty::Hard,
        ),
        idea(
            "3",
            "SkillBridge Micro-Mentoring",
            "Fifteen-minute mentoring sessions matching junior developers with senior engineers",
            "Education",
            4.7,
            "Early-career software engineers and career changers",
            "Marketplace commission on paid sessions",
            &[
                "Calendar-aware matching",
                "Session recording and notes",
                "Skill gap tracking",
            ],
            3420,
            "+41%",
            Difficulty::Easy,
        ),
        idea(
            "4",
            "RoundUp Impact Investing",
            "Micro-investing app that rounds up purchases into curated sustainable portfolios",
            "Finance",
            4.4,
            "Gen Z and millennial first-time investors",
            "Assets-under-management fee with zero trading commissions",
            &[
                "Spare change round-ups",
                "Impact reporting per portfolio",
                "Fractional green bonds",
            ],
            2210,
            "+24%",
            Difficulty::Hard,
        ),
        idea(
            "5",
            "Wardrobe Loop",
            "Peer-to-peer clothing resale with AI-assisted pricing and one-tap listing",
            "E-commerce",
            4.5,
            "Fashion-conscious consumers reducing textile waste",
            "Transaction fee plus promoted listings",
            &[
                "Photo-based condition grading",
                "Instant price suggestions",
                "Prepaid shipping labels",
            ],
            2678,
            "+29%",
            Difficulty::Medium,
        ),
        idea(
            "6",
            "Neighborly Repair Network",
            "Local marketplace connecting people with vetted fixers to repair instead of replace household items",
            "Social Impact",
            4.3,
            "Urban households and repair professionals",
            "Booking fee with optional repair guarantees",
            &[
                "Repairability quick-quotes",
                "Verified fixer profiles",
                "Waste-diverted impact counter",
            ],
            1530,
            "+19%",
            Difficulty::Easy,
        ),
        idea(
            "7",
            "FocusFlow Study Rooms",
            "Virtual co-working rooms with accountability matching for students preparing for exams",
            "Education",
            4.2,
            "University students and professional certification candidates",
            "Monthly subscription with a free community tier",
            &[
                "Pomodoro-synced group timers",
                "Accountability partner matching",
                "Distraction-blocking integrations",
            ],
            1894,
            "+22%",
            Difficulty::Easy,
        ),
        idea(
            "8",
            "ClinicQueue",
            "Real-time waitlist and intake automation for walk-in clinics and urgent care",
            "Healthcare",
            4.6,
            "Walk-in clinics, urgent care centers and their patients",
            "Per-location SaaS licensing",
            &[
                "Live wait-time boards",
                "Pre-arrival digital intake forms",
                "No-show prediction",
            ],
            2437,
            "+35%",
            Difficulty::Medium,
        ),
        idea(
            "9",
            "LedgerPilot",
            "Automated bookkeeping copilot for solo founders that turns bank feeds into investor-ready reports",
            "Finance",
            4.7,
            "Solo founders and micro-businesses without an accountant",
            "Tiered monthly subscription",
            &[
                "Bank feed categorization",
                "One-click investor updates",
                "Quarterly tax estimates",
            ],
            3102,
            "+38%",
            Difficulty::Medium,
        ),
        idea(
            "10",
            "GreenRoute Logistics",
            "Route optimization for small delivery fleets that prices every trip in fuel and carbon",
            "Technology",
            4.4,
            "Local courier companies with 5-50 vehicles",
            "Per-vehicle monthly licensing",
            &[
                "Carbon-aware route planning",
                "Driver mobile manifests",
                "Customer delivery windows",
            ],
            1762,
            "+26%",
            Difficulty::Hard,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn search_matches_title_and_description_case_insensitively() {
        let storage = MemoryStorage::new();
        let catalog = IdeaCatalog::new(&storage).expect("catalog opens");

        let by_title = catalog.filtered("meal prep", "All");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "AI Meal Prep Coach");

        let by_description = catalog.filtered("BOOKKEEPING", "All");
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].title, "LedgerPilot");
    }

    #[test]
    fn industry_filter_narrows_results() {
        let storage = MemoryStorage::new();
        let catalog = IdeaCatalog::new(&storage).expect("catalog opens");

        let education = catalog.filtered("", "Education");
        assert_eq!(education.len(), 2);
        assert!(education.iter().all(|i| i.industry == "Education"));

        assert_eq!(catalog.filtered("", "All").len(), catalog.ideas().len());
        assert!(catalog.filtered("zeppelin", "All").is_empty());
    }

    #[test]
    fn toggle_like_persists_and_untoggles() {
        let storage = MemoryStorage::new();
        let mut catalog = IdeaCatalog::new(&storage).expect("catalog opens");

        assert!(catalog.toggle_like("3").expect("storage works"));
        assert!(catalog.is_liked("3"));

        // Liked set survives a reload
        let reloaded = IdeaCatalog::new(&storage).expect("catalog opens");
        assert!(reloaded.is_liked("3"));

        assert!(!catalog.toggle_like("3").expect("storage works"));
        assert!(!catalog.is_liked("3"));
    }

    #[test]
    fn shuffle_keeps_the_same_ideas() {
        let storage = MemoryStorage::new();
        let mut catalog = IdeaCatalog::new(&storage).expect("catalog opens");
        let mut ids_before: Vec<String> =
            catalog.ideas().iter().map(|i| i.id.clone()).collect();

        catalog.shuffle();

        let mut ids_after: Vec<String> = catalog.ideas().iter().map(|i| i.id.clone()).collect();
        ids_before.sort();
        ids_after.sort();
        assert_eq!(ids_before, ids_after);
    }
}

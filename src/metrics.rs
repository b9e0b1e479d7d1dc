//! Analytics data behind the metrics dashboard.
//!
//! All of it is hard-coded product content; only the small derived
//! summaries are computed. Rendering is left to whichever surface
//! consumes this.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// One headline card: a display value with its period-over-period change
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineMetric {
    pub title: &'static str,
    pub value: &'static str,
    pub change: &'static str,
    pub trend: Trend,
}

pub fn headline_metrics() -> Vec<HeadlineMetric> {
    vec![
        HeadlineMetric {
            title: "Total Users",
            value: "2,847",
            change: "+12.5%",
            trend: Trend::Up,
        },
        HeadlineMetric {
            title: "Idea Views",
            value: "18,392",
            change: "+8.2%",
            trend: Trend::Up,
        },
        HeadlineMetric {
            title: "Liked Ideas",
            value: "1,247",
            change: "+15.3%",
            trend: Trend::Up,
        },
        HeadlineMetric {
            title: "Success Rate",
            value: "87%",
            change: "+2.1%",
            trend: Trend::Up,
        },
    ]
}

/// Monthly signup and activity numbers for the last six months
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGrowth {
    pub months: Vec<&'static str>,
    pub new_users: Vec<u32>,
    pub active_users: Vec<u32>,
}

pub fn user_growth() -> UserGrowth {
    UserGrowth {
        months: vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun"],
        new_users: vec![120, 190, 300, 500, 200, 300],
        active_users: vec![80, 150, 250, 400, 180, 280],
    }
}

impl UserGrowth {
    pub fn total_new_users(&self) -> u32 {
        self.new_users.iter().sum()
    }

    /// Month with the most signups
    pub fn peak_month(&self) -> Option<&'static str> {
        self.new_users
            .iter()
            .zip(&self.months)
            .max_by_key(|(count, _)| **count)
            .map(|(_, month)| *month)
    }
}

/// Idea views per week for the current month
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyIdeaViews {
    pub weeks: Vec<&'static str>,
    pub views: Vec<u32>,
}

pub fn weekly_idea_views() -> WeeklyIdeaViews {
    WeeklyIdeaViews {
        weeks: vec!["Week 1", "Week 2", "Week 3", "Week 4"],
        views: vec![1200, 1900, 3000, 2500],
    }
}

impl WeeklyIdeaViews {
    pub fn total(&self) -> u32 {
        self.views.iter().sum()
    }
}

/// Share of catalog ideas per industry, in percent
pub fn industry_distribution() -> Vec<(&'static str, u32)> {
    vec![
        ("Technology", 35),
        ("Healthcare", 20),
        ("Finance", 15),
        ("Education", 12),
        ("E-commerce", 10),
        ("Other", 8),
    ]
}

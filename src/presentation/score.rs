//! Heuristic "design quality" scoring of rendered todo lists
//!
//! The arithmetic is decorative. It sits behind [`Scorer`] so callers can swap
//! it out without touching sessions or triggers.

use crate::presentation::render::CONTAINER_WIDTH;
use crate::todo::TodoItem;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub const MAX_SCORE: f64 = 10.0;

/// Relative weight of each axis in the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub design: f64,
    pub usability: f64,
    pub creativity: f64,
    pub content: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            design: 0.40,
            usability: 0.30,
            creativity: 0.20,
            content: 0.10,
        }
    }
}

impl ScoreWeights {
    pub fn total(&self) -> f64 {
        self.design + self.usability + self.creativity + self.content
    }
}

/// Per-axis scores, each in 0..=10
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub design: f64,
    pub usability: f64,
    pub creativity: f64,
    pub content: f64,
    pub overall: f64,
}

impl Evaluation {
    pub fn tier(&self) -> AwardTier {
        AwardTier::from_score(self.overall)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardTier {
    SiteOfTheDay,
    DeveloperAward,
    HonorableMention,
    KeepImproving,
}

impl AwardTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 9.0 {
            AwardTier::SiteOfTheDay
        } else if score >= 8.5 {
            AwardTier::DeveloperAward
        } else if score >= 6.5 {
            AwardTier::HonorableMention
        } else {
            AwardTier::KeepImproving
        }
    }
}

impl fmt::Display for AwardTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AwardTier::SiteOfTheDay => write!(f, "SITE OF THE DAY"),
            AwardTier::DeveloperAward => write!(f, "DEVELOPER AWARD"),
            AwardTier::HonorableMention => write!(f, "HONORABLE MENTION"),
            AwardTier::KeepImproving => write!(f, "KEEP IMPROVING"),
        }
    }
}

/// Scores a rendered display together with the todos behind it
pub trait Scorer: Send + Sync {
    fn score(&self, display: &str, todos: &[TodoItem]) -> Evaluation;

    fn name(&self) -> &'static str;
}

/// Fixed base scores plus bonuses for layout and content traits
#[derive(Debug, Clone, Default)]
pub struct HeuristicScorer {
    weights: ScoreWeights,
}

impl HeuristicScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    fn design(display: &str) -> f64 {
        let mut score = 7.0;

        let widths: Vec<usize> = display.split('\n').map(|l| l.chars().count()).collect();
        let first = widths.first().copied().unwrap_or(0);
        if widths.iter().all(|w| *w == first || *w == 0) {
            score += 1.0;
        }
        if display.contains('▓') {
            score += 0.8;
        }
        if display.contains('[') {
            score += 0.5;
        }
        score += 0.7;

        f64::min(score, MAX_SCORE)
    }

    fn usability(todos: &[TodoItem]) -> f64 {
        let mut score = 7.5;

        let statuses: HashSet<_> = todos.iter().map(|t| t.status).collect();
        if statuses.len() > 1 {
            score += 1.0;
        }
        if todos.iter().all(|t| t.content.chars().count() > 10) {
            score += 0.8;
        }
        score += 0.7;

        f64::min(score, MAX_SCORE)
    }

    fn creativity(display: &str) -> f64 {
        let mut score = 8.0;
        if display.contains('▓') {
            score += 0.5;
        }
        score += 0.5;

        f64::min(score, MAX_SCORE)
    }

    fn content(todos: &[TodoItem]) -> f64 {
        let mut score = 7.5;

        if !todos.is_empty() {
            let total: usize = todos.iter().map(|t| t.content.chars().count()).sum();
            if total as f64 / todos.len() as f64 > 20.0 {
                score += 1.0;
            }
        }
        let priorities: HashSet<_> = todos.iter().map(|t| t.priority).collect();
        if priorities.len() > 1 {
            score += 0.5;
        }

        f64::min(score, MAX_SCORE)
    }
}

impl Scorer for HeuristicScorer {
    fn score(&self, display: &str, todos: &[TodoItem]) -> Evaluation {
        let design = Self::design(display);
        let usability = Self::usability(todos);
        let creativity = Self::creativity(display);
        let content = Self::content(todos);

        let overall = design * self.weights.design
            + usability * self.weights.usability
            + creativity * self.weights.creativity
            + content * self.weights.content;

        Evaluation {
            design,
            usability,
            creativity,
            content,
            overall,
        }
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

/// Boxed per-axis breakdown of an evaluation
pub fn scorecard(evaluation: &Evaluation) -> String {
    let border = "▓".repeat(CONTAINER_WIDTH);
    let rows = [
        format!("DESIGN:     {:.1}/10", evaluation.design),
        format!("USABILITY:  {:.1}/10", evaluation.usability),
        format!("CREATIVITY: {:.1}/10", evaluation.creativity),
        format!("CONTENT:    {:.1}/10", evaluation.content),
        String::new(),
        format!(
            "OVERALL:    {:.1}/10 -> {}",
            evaluation.overall,
            evaluation.tier()
        ),
    ];

    let mut lines = vec![border.clone()];
    for row in rows {
        lines.push(format!("▓ {:<44} ▓", row));
    }
    lines.push(border);
    lines.join("\n")
}

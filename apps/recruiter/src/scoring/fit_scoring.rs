//! Fit Scoring: weighted six-factor heuristic scorer for a candidate vs a job.
//!
//! Every sub-scorer is total: missing input yields a neutral score (5.0, or
//! 6.0 for location) instead of an error, so `FitScorer::score` never fails.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::candidate::{CandidateRecord, EducationEntry, ExperienceEntry};
use crate::models::job::JobRecord;
use crate::scoring::reference_sets::{contains_any, contains_any_marker, ReferenceSets};

const NEUTRAL_SCORE: f64 = 5.0;
const NEUTRAL_LOCATION_SCORE: f64 = 6.0;
const MAX_SCORE: f64 = 10.0;
const WEIGHT_TOLERANCE: f64 = 1e-9;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// The six per-dimension scores, each in [0, 10].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub education: f64,
    pub trajectory: f64,
    pub company: f64,
    pub skills: f64,
    pub location: f64,
    pub tenure: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    D,
}

impl Grade {
    pub fn from_total(total: f64) -> Self {
        if total >= 8.5 {
            Grade::A
        } else if total >= 7.5 {
            Grade::BPlus
        } else if total >= 6.5 {
            Grade::B
        } else if total >= 5.5 {
            Grade::CPlus
        } else if total >= 4.5 {
            Grade::C
        } else {
            Grade::D
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Strongly Recommend")]
    StronglyRecommend,
    #[serde(rename = "Recommend")]
    Recommend,
    #[serde(rename = "Consider")]
    Consider,
    #[serde(rename = "Weak Match")]
    WeakMatch,
    #[serde(rename = "Not Recommended")]
    NotRecommended,
}

impl Recommendation {
    pub fn from_total(total: f64) -> Self {
        if total >= 8.0 {
            Recommendation::StronglyRecommend
        } else if total >= 7.0 {
            Recommendation::Recommend
        } else if total >= 6.0 {
            Recommendation::Consider
        } else if total >= 5.0 {
            Recommendation::WeakMatch
        } else {
            Recommendation::NotRecommended
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::StronglyRecommend => "Strongly Recommend",
            Recommendation::Recommend => "Recommend",
            Recommendation::Consider => "Consider",
            Recommendation::WeakMatch => "Weak Match",
            Recommendation::NotRecommended => "Not Recommended",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full scoring result for one candidate. Computed once, never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub subscores: SubScores,
    /// Weighted total in [0, 10], rounded to 2 decimals.
    pub total: f64,
    pub grade: Grade,
    pub recommendation: Recommendation,
}

// ────────────────────────────────────────────────────────────────────────────
// Weights
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub education: f64,
    pub trajectory: f64,
    pub company: f64,
    pub skills: f64,
    pub location: f64,
    pub tenure: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            education: 0.20,
            trajectory: 0.20,
            company: 0.15,
            skills: 0.25,
            location: 0.10,
            tenure: 0.10,
        }
    }
}

impl ScoringWeights {
    /// Validated constructor: weights must be non-negative and sum to 1.0.
    pub fn new(
        education: f64,
        trajectory: f64,
        company: f64,
        skills: f64,
        location: f64,
        tenure: f64,
    ) -> Result<Self, AppError> {
        let weights = Self {
            education,
            trajectory,
            company,
            skills,
            location,
            tenure,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let all = self.as_array();
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(AppError::Validation(
                "Scoring weights must be finite and non-negative".to_string(),
            ));
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(AppError::Validation(format!(
                "Scoring weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    fn as_array(&self) -> [f64; 6] {
        [
            self.education,
            self.trajectory,
            self.company,
            self.skills,
            self.location,
            self.tenure,
        ]
    }

    fn weighted_total(&self, s: &SubScores) -> f64 {
        s.education * self.education
            + s.trajectory * self.trajectory
            + s.company * self.company
            + s.skills * self.skills
            + s.location * self.location
            + s.tenure * self.tenure
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scorer
// ────────────────────────────────────────────────────────────────────────────

/// Heuristic fit scorer. Holds its vocabularies and weights; stateless per call.
#[derive(Debug, Clone, Default)]
pub struct FitScorer {
    sets: ReferenceSets,
    weights: ScoringWeights,
}

impl FitScorer {
    pub fn new(sets: ReferenceSets, weights: ScoringWeights) -> Result<Self, AppError> {
        weights.validate()?;
        Ok(Self { sets, weights })
    }

    pub fn reference_sets(&self) -> &ReferenceSets {
        &self.sets
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn score(&self, candidate: &CandidateRecord, job: &JobRecord) -> ScoreBreakdown {
        let subscores = SubScores {
            education: clamp_score(self.score_education(&candidate.education)),
            trajectory: clamp_score(self.score_trajectory(&candidate.experience)),
            company: clamp_score(self.score_company(&candidate.experience)),
            skills: clamp_score(self.score_skills(candidate, job)),
            location: clamp_score(self.score_location(&candidate.location, &job.location)),
            tenure: clamp_score(score_tenure(&candidate.experience)),
        };

        let total = clamp_score(self.weights.weighted_total(&subscores));

        ScoreBreakdown {
            subscores,
            total: round2(total),
            grade: Grade::from_total(total),
            recommendation: Recommendation::from_total(total),
        }
    }

    /// Best entry wins: school prestige (9.5 / 7.0 / 5.0) plus a degree bonus.
    fn score_education(&self, education: &[EducationEntry]) -> f64 {
        if education.is_empty() {
            return NEUTRAL_SCORE;
        }

        education
            .iter()
            .map(|edu| {
                let school = edu.school.to_lowercase();
                let degree = edu.degree.to_lowercase();

                let base = if contains_any(&school, &self.sets.elite_schools) {
                    9.5
                } else if contains_any(&school, &self.sets.institution_keywords) {
                    7.0
                } else {
                    5.0
                };

                let bonus = if contains_any_marker(&degree, &self.sets.doctorate_markers) {
                    1.0
                } else if contains_any_marker(&degree, &self.sets.masters_markers) {
                    0.5
                } else {
                    0.0
                };

                f64::min(base + bonus, MAX_SCORE)
            })
            .fold(0.0, f64::max)
    }

    /// Rewards title promotions between consecutive roles.
    fn score_trajectory(&self, experience: &[ExperienceEntry]) -> f64 {
        if experience.len() < 2 {
            return NEUTRAL_SCORE;
        }

        let points: f64 = experience
            .windows(2)
            .map(|pair| {
                let earlier = pair[0].title.to_lowercase();
                let later = pair[1].title.to_lowercase();
                let senior = &self.sets.seniority_markers;
                let management = &self.sets.management_markers;

                if contains_any(&later, senior) {
                    if contains_any(&earlier, senior) {
                        0.0
                    } else {
                        2.0
                    }
                } else if contains_any(&later, management) && !contains_any(&earlier, management)
                {
                    3.0
                } else {
                    0.0
                }
            })
            .sum();

        let transitions = (experience.len() - 1) as f64;
        f64::min(NEUTRAL_SCORE + points / transitions, MAX_SCORE)
    }

    fn score_company(&self, experience: &[ExperienceEntry]) -> f64 {
        if experience.is_empty() {
            return NEUTRAL_SCORE;
        }

        let relevant = experience
            .iter()
            .filter(|e| contains_any(&e.company.to_lowercase(), &self.sets.top_companies))
            .count();

        ratio_ladder(relevant as f64 / experience.len() as f64)
    }

    fn score_skills(&self, candidate: &CandidateRecord, job: &JobRecord) -> f64 {
        let job_skills = self.job_skill_set(job);
        if job_skills.is_empty() {
            return NEUTRAL_SCORE;
        }

        let candidate_skills = self.candidate_skill_set(candidate);
        let matched = candidate_skills.intersection(&job_skills).count();

        ratio_ladder(matched as f64 / job_skills.len() as f64)
    }

    /// Declared skills plus vocabulary terms mentioned in any role.
    fn candidate_skill_set(&self, candidate: &CandidateRecord) -> HashSet<String> {
        let mut skills: HashSet<String> = candidate
            .skills
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        for exp in &candidate.experience {
            let title = exp.title.to_lowercase();
            let description = exp.description.to_lowercase();
            skills.extend(self.sets.skills_in(&title).map(str::to_string));
            skills.extend(self.sets.skills_in(&description).map(str::to_string));
        }

        skills
    }

    /// Declared skill tags plus vocabulary terms mentioned in any requirement.
    fn job_skill_set(&self, job: &JobRecord) -> HashSet<String> {
        let mut skills: HashSet<String> = job
            .skills
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        for requirement in &job.requirements {
            let requirement = requirement.to_lowercase();
            skills.extend(self.sets.skills_in(&requirement).map(str::to_string));
        }

        skills
    }

    /// First matching rule wins: exact, same metro, remote, same state, else far.
    fn score_location(&self, candidate_location: &str, job_location: &str) -> f64 {
        let candidate_loc = candidate_location.trim().to_lowercase();
        let job_loc = job_location.trim().to_lowercase();

        if candidate_loc.is_empty() || job_loc.is_empty() {
            return NEUTRAL_LOCATION_SCORE;
        }

        if candidate_loc == job_loc {
            return 10.0;
        }

        let same_metro = self.sets.metro_groups.iter().any(|group| {
            contains_any(&candidate_loc, group) && contains_any(&job_loc, group)
        });
        if same_metro {
            return 8.0;
        }

        if candidate_loc.contains("remote") || job_loc.contains("remote") {
            return NEUTRAL_LOCATION_SCORE;
        }

        let same_state = self.sets.state_groups.iter().any(|group| {
            contains_any_marker(&candidate_loc, group) && contains_any_marker(&job_loc, group)
        });
        if same_state {
            return 7.0;
        }

        4.0
    }
}

/// Count-based tenure proxy: one role reads as two years, otherwise two years
/// spread across all roles. Start/end dates are deliberately not consulted.
fn score_tenure(experience: &[ExperienceEntry]) -> f64 {
    if experience.is_empty() {
        return NEUTRAL_SCORE;
    }

    let avg_tenure = if experience.len() > 1 {
        2.0 / experience.len() as f64
    } else {
        2.0
    };

    if avg_tenure >= 2.0 {
        9.5
    } else if avg_tenure >= 1.5 {
        8.0
    } else if avg_tenure >= 1.0 {
        6.0
    } else {
        3.0
    }
}

/// Shared threshold ladder for company and skills ratios.
fn ratio_ladder(ratio: f64) -> f64 {
    if ratio >= 0.8 {
        9.5
    } else if ratio >= 0.6 {
        8.0
    } else if ratio >= 0.4 {
        7.0
    } else if ratio >= 0.2 {
        6.0
    } else {
        5.0
    }
}

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, MAX_SCORE)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

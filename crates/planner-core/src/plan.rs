//! Generated strategy plan and the typed addressing of its list items.
//!
//! The plan shape is produced by an external generator, so every panel
//! carries a serde default and partially populated results deserialize
//! cleanly.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Goal {
    pub title: String,
    pub description: String,
    pub kpis: Vec<String>,
    pub timeframe: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentPillar {
    pub name: String,
    pub description: String,
    pub content_ideas: Vec<String>,
    pub formats: Vec<String>,
    pub posting_frequency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyMetric {
    pub name: String,
    pub target: String,
    pub measurement: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsAndKpis {
    pub key_metrics: Vec<KeyMetric>,
    pub reporting_cadence: String,
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RevenueStream {
    pub name: String,
    pub description: String,
    pub potential_revenue: String,
    pub timeline: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonetizationStrategy {
    pub revenue_streams: Vec<RevenueStream>,
    pub pricing_notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScalingPhase {
    pub name: String,
    pub duration: String,
    pub focus: String,
    pub milestones: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScalabilityPlanning {
    pub phases: Vec<ScalingPhase>,
    pub automation_opportunities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Risk {
    pub risk: String,
    pub likelihood: String,
    pub impact: String,
    pub mitigation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskMitigation {
    pub risks: Vec<Risk>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeeklyScheduleEntry {
    pub day: String,
    pub platform: String,
    pub content_type: String,
    pub topic: String,
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformStrategy {
    pub platform: String,
    pub approach: String,
    pub posting_frequency: String,
    pub best_times: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignIdea {
    pub name: String,
    pub objective: String,
    pub duration: String,
    pub channels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompetitorInsight {
    pub competitor: String,
    pub strengths: String,
    pub gaps: String,
    pub opportunity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JourneyStage {
    pub stage: String,
    pub objective: String,
    pub content: Vec<String>,
    pub metric: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceAllocation {
    pub area: String,
    pub percentage: u8,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComplianceItem {
    pub area: String,
    pub requirement: String,
    pub action: String,
}

/// A generated content strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentStrategyPlanOutput {
    pub executive_summary: String,
    pub target_audience_overview: String,
    pub goals: Vec<Goal>,
    pub content_pillars: Vec<ContentPillar>,
    #[serde(rename = "analyticsAndKPIs")]
    pub analytics_and_kpis: AnalyticsAndKpis,
    pub monetization_strategy: MonetizationStrategy,
    pub scalability_planning: ScalabilityPlanning,
    pub risk_mitigation: RiskMitigation,
    pub suggested_weekly_schedule: Vec<WeeklyScheduleEntry>,
    pub platform_strategies: Vec<PlatformStrategy>,
    pub campaign_ideas: Vec<CampaignIdea>,
    pub competitor_insights: Vec<CompetitorInsight>,
    pub customer_journey: Vec<JourneyStage>,
    pub resource_allocation: Vec<ResourceAllocation>,
    pub compliance: Vec<ComplianceItem>,
}

// ─────────────────────────────────────────────────────────────────
// Item addressing
// ─────────────────────────────────────────────────────────────────

/// Position of a single actionable list item inside a plan.
///
/// Indices are positional; a whole-plan replacement invalidates them,
/// which the plan document tracks through its generation counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum PlanItemRef {
    Goal(usize),
    Pillar(usize),
    Metric(usize),
    RevenueStream(usize),
    Risk(usize),
}

impl PlanItemRef {
    pub fn kind(&self) -> &'static str {
        match self {
            PlanItemRef::Goal(_) => "goal",
            PlanItemRef::Pillar(_) => "content pillar",
            PlanItemRef::Metric(_) => "metric",
            PlanItemRef::RevenueStream(_) => "revenue stream",
            PlanItemRef::Risk(_) => "risk",
        }
    }

    pub fn index(&self) -> usize {
        match *self {
            PlanItemRef::Goal(i)
            | PlanItemRef::Pillar(i)
            | PlanItemRef::Metric(i)
            | PlanItemRef::RevenueStream(i)
            | PlanItemRef::Risk(i) => i,
        }
    }

    /// The section that displays this item.
    pub fn section(&self) -> PlanSection {
        match self {
            PlanItemRef::Goal(_) => PlanSection::Goals,
            PlanItemRef::Pillar(_) => PlanSection::ContentPillars,
            PlanItemRef::Metric(_) => PlanSection::AnalyticsKpis,
            PlanItemRef::RevenueStream(_) => PlanSection::Monetization,
            PlanItemRef::Risk(_) => PlanSection::RiskMitigation,
        }
    }
}

impl std::fmt::Display for PlanItemRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} #{}", self.kind(), self.index() + 1)
    }
}

/// The typed value of a single plan item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PlanItem {
    Goal(Goal),
    Pillar(ContentPillar),
    Metric(KeyMetric),
    RevenueStream(RevenueStream),
    Risk(Risk),
}

impl PlanItem {
    pub fn kind(&self) -> &'static str {
        match self {
            PlanItem::Goal(_) => "goal",
            PlanItem::Pillar(_) => "content pillar",
            PlanItem::Metric(_) => "metric",
            PlanItem::RevenueStream(_) => "revenue stream",
            PlanItem::Risk(_) => "risk",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            PlanItem::Goal(g) => &g.title,
            PlanItem::Pillar(p) => &p.name,
            PlanItem::Metric(m) => &m.name,
            PlanItem::RevenueStream(r) => &r.name,
            PlanItem::Risk(r) => &r.risk,
        }
    }

    /// Plain-text rendering used for the clipboard and the canvas.
    pub fn to_text(&self) -> String {
        match self {
            PlanItem::Goal(g) => {
                let mut out = format!("{}\n{}", g.title, g.description);
                if !g.kpis.is_empty() {
                    out.push_str(&format!("\nKPIs: {}", g.kpis.join(", ")));
                }
                if !g.timeframe.is_empty() {
                    out.push_str(&format!("\nTimeframe: {}", g.timeframe));
                }
                out
            }
            PlanItem::Pillar(p) => {
                let mut out = format!("{}\n{}", p.name, p.description);
                for idea in &p.content_ideas {
                    out.push_str(&format!("\n- {}", idea));
                }
                if !p.posting_frequency.is_empty() {
                    out.push_str(&format!("\nFrequency: {}", p.posting_frequency));
                }
                out
            }
            PlanItem::Metric(m) => {
                format!("{}\nTarget: {}\nMeasured by: {}", m.name, m.target, m.measurement)
            }
            PlanItem::RevenueStream(r) => format!(
                "{}\n{}\nPotential: {} ({})",
                r.name, r.description, r.potential_revenue, r.timeline
            ),
            PlanItem::Risk(r) => format!(
                "{}\nLikelihood: {} / Impact: {}\nMitigation: {}",
                r.risk, r.likelihood, r.impact, r.mitigation
            ),
        }
    }
}

impl ContentStrategyPlanOutput {
    /// Read a single item.
    pub fn item(&self, target: PlanItemRef) -> Option<PlanItem> {
        match target {
            PlanItemRef::Goal(i) => self.goals.get(i).cloned().map(PlanItem::Goal),
            PlanItemRef::Pillar(i) => self.content_pillars.get(i).cloned().map(PlanItem::Pillar),
            PlanItemRef::Metric(i) => self
                .analytics_and_kpis
                .key_metrics
                .get(i)
                .cloned()
                .map(PlanItem::Metric),
            PlanItemRef::RevenueStream(i) => self
                .monetization_strategy
                .revenue_streams
                .get(i)
                .cloned()
                .map(PlanItem::RevenueStream),
            PlanItemRef::Risk(i) => self.risk_mitigation.risks.get(i).cloned().map(PlanItem::Risk),
        }
    }

    /// Return a copy of this plan with one item replaced.
    pub fn with_item(&self, target: PlanItemRef, item: PlanItem) -> Result<Self> {
        let mut next = self.clone();
        let index = target.index();
        let missing = || Error::item_not_found(target.kind(), index);

        match (target, item) {
            (PlanItemRef::Goal(i), PlanItem::Goal(v)) => {
                *next.goals.get_mut(i).ok_or_else(missing)? = v;
            }
            (PlanItemRef::Pillar(i), PlanItem::Pillar(v)) => {
                *next.content_pillars.get_mut(i).ok_or_else(missing)? = v;
            }
            (PlanItemRef::Metric(i), PlanItem::Metric(v)) => {
                *next
                    .analytics_and_kpis
                    .key_metrics
                    .get_mut(i)
                    .ok_or_else(missing)? = v;
            }
            (PlanItemRef::RevenueStream(i), PlanItem::RevenueStream(v)) => {
                *next
                    .monetization_strategy
                    .revenue_streams
                    .get_mut(i)
                    .ok_or_else(missing)? = v;
            }
            (PlanItemRef::Risk(i), PlanItem::Risk(v)) => {
                *next.risk_mitigation.risks.get_mut(i).ok_or_else(missing)? = v;
            }
            (target, item) => {
                return Err(Error::ItemKindMismatch {
                    expected: target.kind().to_string(),
                    actual: item.kind().to_string(),
                });
            }
        }

        Ok(next)
    }

    /// Every addressable item, in display order.
    pub fn item_refs(&self) -> Vec<PlanItemRef> {
        PlanSection::ALL
            .iter()
            .flat_map(|section| section.item_refs(self))
            .collect()
    }

    /// Headline outline of the plan, used for the mind-map hand-off.
    pub fn outline(&self) -> String {
        let mut out = String::from("Content Strategy\n");
        for section in PlanSection::ALL {
            let refs = section.item_refs(self);
            if refs.is_empty() {
                continue;
            }
            out.push_str(&format!("  {}\n", section.title()));
            for r in refs {
                if let Some(item) = self.item(r) {
                    out.push_str(&format!("    {}\n", item.title()));
                }
            }
        }
        out
    }
}

// ─────────────────────────────────────────────────────────────────
// Display sections
// ─────────────────────────────────────────────────────────────────

/// The display sections of a rendered plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSection {
    ExecutiveSummary,
    AudienceOverview,
    Goals,
    ContentPillars,
    AnalyticsKpis,
    Monetization,
    Scalability,
    RiskMitigation,
    WeeklySchedule,
    PlatformStrategy,
    CampaignStrategy,
    CompetitorStrategy,
    CustomerJourney,
    ResourceAllocation,
    Compliance,
}

impl PlanSection {
    pub const ALL: [PlanSection; 15] = [
        PlanSection::ExecutiveSummary,
        PlanSection::AudienceOverview,
        PlanSection::Goals,
        PlanSection::ContentPillars,
        PlanSection::AnalyticsKpis,
        PlanSection::Monetization,
        PlanSection::Scalability,
        PlanSection::RiskMitigation,
        PlanSection::WeeklySchedule,
        PlanSection::PlatformStrategy,
        PlanSection::CampaignStrategy,
        PlanSection::CompetitorStrategy,
        PlanSection::CustomerJourney,
        PlanSection::ResourceAllocation,
        PlanSection::Compliance,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            PlanSection::ExecutiveSummary => "Executive Summary",
            PlanSection::AudienceOverview => "Target Audience",
            PlanSection::Goals => "Strategic Goals",
            PlanSection::ContentPillars => "Content Pillars",
            PlanSection::AnalyticsKpis => "Analytics & KPIs",
            PlanSection::Monetization => "Monetization",
            PlanSection::Scalability => "Scalability Planning",
            PlanSection::RiskMitigation => "Risk Mitigation",
            PlanSection::WeeklySchedule => "Weekly Schedule",
            PlanSection::PlatformStrategy => "Platform Strategy",
            PlanSection::CampaignStrategy => "Campaign Strategy",
            PlanSection::CompetitorStrategy => "Competitor Strategy",
            PlanSection::CustomerJourney => "Customer Journey",
            PlanSection::ResourceAllocation => "Resource Allocation",
            PlanSection::Compliance => "Compliance",
        }
    }

    /// Actionable items shown in this section.
    pub fn item_refs(&self, plan: &ContentStrategyPlanOutput) -> Vec<PlanItemRef> {
        match self {
            PlanSection::Goals => (0..plan.goals.len()).map(PlanItemRef::Goal).collect(),
            PlanSection::ContentPillars => (0..plan.content_pillars.len())
                .map(PlanItemRef::Pillar)
                .collect(),
            PlanSection::AnalyticsKpis => (0..plan.analytics_and_kpis.key_metrics.len())
                .map(PlanItemRef::Metric)
                .collect(),
            PlanSection::Monetization => (0..plan.monetization_strategy.revenue_streams.len())
                .map(PlanItemRef::RevenueStream)
                .collect(),
            PlanSection::RiskMitigation => (0..plan.risk_mitigation.risks.len())
                .map(PlanItemRef::Risk)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Text lines of the non-item content of a section.
    pub fn section_lines(&self, plan: &ContentStrategyPlanOutput) -> Vec<String> {
        match self {
            PlanSection::ExecutiveSummary => paragraph(&plan.executive_summary),
            PlanSection::AudienceOverview => paragraph(&plan.target_audience_overview),
            PlanSection::Goals
            | PlanSection::ContentPillars
            | PlanSection::Monetization
            | PlanSection::RiskMitigation => Vec::new(),
            PlanSection::AnalyticsKpis => {
                let kpis = &plan.analytics_and_kpis;
                let mut lines = Vec::new();
                if !kpis.reporting_cadence.is_empty() {
                    lines.push(format!("Reporting: {}", kpis.reporting_cadence));
                }
                if !kpis.tools.is_empty() {
                    lines.push(format!("Tools: {}", kpis.tools.join(", ")));
                }
                lines
            }
            PlanSection::Scalability => {
                let mut lines = Vec::new();
                for phase in &plan.scalability_planning.phases {
                    lines.push(format!("{} ({}): {}", phase.name, phase.duration, phase.focus));
                    lines.extend(phase.milestones.iter().map(|m| format!("  - {}", m)));
                }
                for op in &plan.scalability_planning.automation_opportunities {
                    lines.push(format!("Automate: {}", op));
                }
                lines
            }
            PlanSection::WeeklySchedule => plan
                .suggested_weekly_schedule
                .iter()
                .map(|e| format!("{} {} {} {}: {}", e.day, e.time, e.platform, e.content_type, e.topic))
                .collect(),
            PlanSection::PlatformStrategy => plan
                .platform_strategies
                .iter()
                .map(|p| {
                    format!(
                        "{}: {} ({}; best {})",
                        p.platform,
                        p.approach,
                        p.posting_frequency,
                        p.best_times.join(", ")
                    )
                })
                .collect(),
            PlanSection::CampaignStrategy => plan
                .campaign_ideas
                .iter()
                .map(|c| {
                    format!(
                        "{} [{}]: {} via {}",
                        c.name,
                        c.duration,
                        c.objective,
                        c.channels.join(", ")
                    )
                })
                .collect(),
            PlanSection::CompetitorStrategy => plan
                .competitor_insights
                .iter()
                .map(|c| {
                    format!(
                        "{}: strong at {}; gap {}; opportunity {}",
                        c.competitor, c.strengths, c.gaps, c.opportunity
                    )
                })
                .collect(),
            PlanSection::CustomerJourney => plan
                .customer_journey
                .iter()
                .map(|s| format!("{}: {} ({}) [{}]", s.stage, s.objective, s.content.join(", "), s.metric))
                .collect(),
            PlanSection::ResourceAllocation => plan
                .resource_allocation
                .iter()
                .map(|r| format!("{:>3}% {}: {}", r.percentage, r.area, r.notes))
                .collect(),
            PlanSection::Compliance => plan
                .compliance
                .iter()
                .map(|c| format!("{}: {} -> {}", c.area, c.requirement, c.action))
                .collect(),
        }
    }

    /// Whether the section has anything to show.
    pub fn is_empty(&self, plan: &ContentStrategyPlanOutput) -> bool {
        self.item_refs(plan).is_empty() && self.section_lines(plan).is_empty()
    }
}

fn paragraph(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> ContentStrategyPlanOutput {
        ContentStrategyPlanOutput {
            executive_summary: "Grow a loyal audience.".to_string(),
            goals: vec![
                Goal {
                    title: "Grow reach".to_string(),
                    ..Default::default()
                },
                Goal {
                    title: "Convert leads".to_string(),
                    ..Default::default()
                },
            ],
            content_pillars: vec![ContentPillar {
                name: "Education".to_string(),
                content_ideas: vec!["How-to threads".to_string()],
                ..Default::default()
            }],
            risk_mitigation: RiskMitigation {
                risks: vec![Risk {
                    risk: "Burnout".to_string(),
                    ..Default::default()
                }],
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_item_reads_by_position() {
        let plan = sample_plan();
        let item = plan.item(PlanItemRef::Goal(1)).unwrap();
        assert_eq!(item.title(), "Convert leads");
        assert!(plan.item(PlanItemRef::Goal(5)).is_none());
        assert!(plan.item(PlanItemRef::Metric(0)).is_none());
    }

    #[test]
    fn test_with_item_returns_new_plan() {
        let plan = sample_plan();
        let replacement = PlanItem::Goal(Goal {
            title: "Build community".to_string(),
            ..Default::default()
        });

        let next = plan.with_item(PlanItemRef::Goal(0), replacement).unwrap();

        assert_eq!(next.goals[0].title, "Build community");
        assert_eq!(plan.goals[0].title, "Grow reach");
        assert_eq!(next.goals[1], plan.goals[1]);
    }

    #[test]
    fn test_with_item_rejects_kind_mismatch() {
        let plan = sample_plan();
        let result = plan.with_item(PlanItemRef::Goal(0), PlanItem::Risk(Risk::default()));
        assert!(matches!(result, Err(Error::ItemKindMismatch { .. })));
    }

    #[test]
    fn test_with_item_rejects_out_of_range() {
        let plan = sample_plan();
        let result = plan.with_item(PlanItemRef::Pillar(3), PlanItem::Pillar(ContentPillar::default()));
        assert!(matches!(result, Err(Error::ItemNotFound { index: 3, .. })));
    }

    #[test]
    fn test_item_refs_in_display_order() {
        let plan = sample_plan();
        assert_eq!(
            plan.item_refs(),
            vec![
                PlanItemRef::Goal(0),
                PlanItemRef::Goal(1),
                PlanItemRef::Pillar(0),
                PlanItemRef::Risk(0),
            ]
        );
    }

    #[test]
    fn test_partial_plan_deserializes_with_defaults() {
        let json = r#"{"goals":[{"title":"Only a title"}],"analyticsAndKPIs":{"tools":["GA4"]}}"#;
        let plan: ContentStrategyPlanOutput = serde_json::from_str(json).unwrap();
        assert_eq!(plan.goals[0].title, "Only a title");
        assert!(plan.goals[0].kpis.is_empty());
        assert_eq!(plan.analytics_and_kpis.tools, vec!["GA4"]);
        assert!(plan.compliance.is_empty());
    }

    #[test]
    fn test_fifteen_sections() {
        assert_eq!(PlanSection::ALL.len(), 15);
        let plan = sample_plan();
        assert!(!PlanSection::ExecutiveSummary.is_empty(&plan));
        assert!(PlanSection::Compliance.is_empty(&plan));
    }

    #[test]
    fn test_outline_lists_item_titles() {
        let outline = sample_plan().outline();
        assert!(outline.contains("Strategic Goals"));
        assert!(outline.contains("Convert leads"));
        assert!(!outline.contains("Compliance"));
    }

    #[test]
    fn test_pillar_text_includes_ideas() {
        let plan = sample_plan();
        let text = plan.item(PlanItemRef::Pillar(0)).unwrap().to_text();
        assert!(text.contains("- How-to threads"));
    }

    #[test]
    fn test_item_ref_display() {
        assert_eq!(PlanItemRef::RevenueStream(0).to_string(), "revenue stream #1");
    }
}

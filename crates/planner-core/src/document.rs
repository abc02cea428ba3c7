//! Versioned plan document and the commands that produce new versions.
//!
//! A document is never mutated. Applying a command yields a new document
//! or a conflict. Whole-plan replacements bump `generation`; single-item
//! replacements bump that item's revision, so regenerations of different
//! items merge while a stale result for the same item is rejected.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::plan::{ContentStrategyPlanOutput, PlanItem, PlanItemRef};

/// Version of one item at the moment a regeneration was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStamp {
    pub plan_generation: u64,
    pub item_revision: u64,
}

#[derive(Debug, Clone)]
pub enum PlanCommand {
    /// Host update or fresh generation.
    ReplacePlan(ContentStrategyPlanOutput),

    /// Regenerated item, valid only against the stamp it was started from.
    ReplaceItem {
        target: PlanItemRef,
        item: PlanItem,
        expected: ItemStamp,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanDocument {
    plan: ContentStrategyPlanOutput,
    generation: u64,
    item_revisions: HashMap<PlanItemRef, u64>,
}

impl PlanDocument {
    pub fn new(plan: ContentStrategyPlanOutput) -> Self {
        Self {
            plan,
            generation: 1,
            item_revisions: HashMap::new(),
        }
    }

    pub fn plan(&self) -> &ContentStrategyPlanOutput {
        &self.plan
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stamp(&self, target: PlanItemRef) -> ItemStamp {
        ItemStamp {
            plan_generation: self.generation,
            item_revision: self.item_revisions.get(&target).copied().unwrap_or(0),
        }
    }

    /// Apply a command, returning the next document.
    pub fn apply(&self, command: PlanCommand) -> Result<PlanDocument> {
        match command {
            PlanCommand::ReplacePlan(plan) => Ok(PlanDocument {
                plan,
                generation: self.generation + 1,
                item_revisions: HashMap::new(),
            }),
            PlanCommand::ReplaceItem {
                target,
                item,
                expected,
            } => {
                if self.stamp(target) != expected {
                    return Err(Error::conflict(target.to_string()));
                }
                let plan = self.plan.with_item(target, item)?;
                let mut item_revisions = self.item_revisions.clone();
                *item_revisions.entry(target).or_insert(0) += 1;
                Ok(PlanDocument {
                    plan,
                    generation: self.generation,
                    item_revisions,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{ContentPillar, Goal};

    fn doc() -> PlanDocument {
        PlanDocument::new(ContentStrategyPlanOutput {
            goals: vec![Goal::default(), Goal::default()],
            content_pillars: vec![ContentPillar::default()],
            ..Default::default()
        })
    }

    fn goal(title: &str) -> PlanItem {
        PlanItem::Goal(Goal {
            title: title.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_replace_item_with_current_stamp() {
        let d = doc();
        let stamp = d.stamp(PlanItemRef::Goal(0));
        let next = d
            .apply(PlanCommand::ReplaceItem {
                target: PlanItemRef::Goal(0),
                item: goal("New"),
                expected: stamp,
            })
            .unwrap();

        assert_eq!(next.plan().goals[0].title, "New");
        assert_eq!(next.stamp(PlanItemRef::Goal(0)).item_revision, 1);
        // Original value untouched
        assert_eq!(d.plan().goals[0].title, "");
    }

    #[test]
    fn test_different_items_merge() {
        let d = doc();
        let s0 = d.stamp(PlanItemRef::Goal(0));
        let s1 = d.stamp(PlanItemRef::Goal(1));

        let d = d
            .apply(PlanCommand::ReplaceItem {
                target: PlanItemRef::Goal(0),
                item: goal("A"),
                expected: s0,
            })
            .unwrap();
        let d = d
            .apply(PlanCommand::ReplaceItem {
                target: PlanItemRef::Goal(1),
                item: goal("B"),
                expected: s1,
            })
            .unwrap();

        assert_eq!(d.plan().goals[0].title, "A");
        assert_eq!(d.plan().goals[1].title, "B");
    }

    #[test]
    fn test_same_item_stale_result_conflicts() {
        let d = doc();
        let stamp = d.stamp(PlanItemRef::Goal(0));
        let d = d
            .apply(PlanCommand::ReplaceItem {
                target: PlanItemRef::Goal(0),
                item: goal("first"),
                expected: stamp,
            })
            .unwrap();

        let result = d.apply(PlanCommand::ReplaceItem {
            target: PlanItemRef::Goal(0),
            item: goal("second"),
            expected: stamp,
        });
        assert!(matches!(result, Err(Error::Conflict { .. })));
    }

    #[test]
    fn test_replace_plan_invalidates_stamps() {
        let d = doc();
        let stamp = d.stamp(PlanItemRef::Pillar(0));
        let d = d
            .apply(PlanCommand::ReplacePlan(doc().plan().clone()))
            .unwrap();
        assert_eq!(d.generation(), 2);

        let result = d.apply(PlanCommand::ReplaceItem {
            target: PlanItemRef::Pillar(0),
            item: PlanItem::Pillar(ContentPillar::default()),
            expected: stamp,
        });
        assert!(matches!(result, Err(Error::Conflict { .. })));
    }
}

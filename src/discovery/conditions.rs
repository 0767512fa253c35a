use crate::reflection::ConditionAttribute;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IgnoreDecision {
    pub ignored: bool,
    pub message: Option<String>,
}

/// Groups conditions by group name. A group is satisfied when any of its
/// entries says the test should run; the member is ignored when some group is
/// not satisfied, carrying the first message found in an unsatisfied group.
pub fn evaluate_conditions(conditions: &[ConditionAttribute]) -> IgnoreDecision {
    let mut groups: Vec<(&str, Vec<&ConditionAttribute>)> = Vec::new();
    for condition in conditions {
        match groups.iter_mut().find(|(name, _)| *name == condition.group) {
            Some((_, members)) => members.push(condition),
            None => groups.push((condition.group.as_str(), vec![condition])),
        }
    }

    let mut decision = IgnoreDecision::default();
    for (_, members) in &groups {
        if members.iter().any(|c| c.should_run()) {
            continue;
        }
        decision.ignored = true;
        if decision.message.is_none() {
            decision.message = members.iter().find_map(|c| c.message.clone());
        }
    }
    decision
}

/// Method-level decision first, then the class; either one ignoring wins.
pub fn combine(method: IgnoreDecision, class: IgnoreDecision) -> IgnoreDecision {
    let ignored = method.ignored || class.ignored;
    let message = if method.ignored {
        method.message.or(if class.ignored { class.message } else { None })
    } else if class.ignored {
        class.message
    } else {
        None
    };
    IgnoreDecision { ignored, message }
}

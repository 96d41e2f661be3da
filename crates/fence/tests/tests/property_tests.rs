#[path = "property/evaluator_rules.rs"]
mod evaluator_rules;

#[path = "property/trace_termination.rs"]
mod trace_termination;

#[path = "e2e/violation_traces.rs"]
mod violation_traces;

#[path = "e2e/rooted_rules.rs"]
mod rooted_rules;

#[path = "e2e/audit_mirroring.rs"]
mod audit_mirroring;

#[path = "e2e/host_events.rs"]
mod host_events;

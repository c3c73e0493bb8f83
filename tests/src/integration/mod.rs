//! Cross-module flows through the public service API.

mod emergency_flows;

// Host for the team split engine: config files, CSV sources, JSON report.

pub mod config;
pub mod report;
pub mod sources;

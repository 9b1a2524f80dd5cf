// Library root: seeded team splitting over normalized participant records.
//
// Stages run strictly in sequence: normalize -> shuffle -> assign -> stats.
// `pipeline::TeamSplitter` wires them together for callers that don't need
// the individual stages.

pub mod config;
pub mod draft;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod rng;
pub mod shuffle;
pub mod stats;

pub use config::{AssignmentStrategy, RunConfig};
pub use normalize::{NormalizedSet, RawSource, SourceWarning};
pub use pipeline::{DraftOutcome, SplitError, TeamSplitter};
pub use record::{FieldValue, ParticipantRecord, RecordSet};

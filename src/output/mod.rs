mod formatter;
mod record;

pub use formatter::{DiscoveryOutput, DiscoveryReport, OutputFormatter};
pub use record::TestCaseRecord;

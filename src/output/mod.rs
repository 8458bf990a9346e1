// Output formatting — report artifacts, the report sink seam, and the
// terminal summary.

pub mod report;
pub mod sink;
pub mod terminal;

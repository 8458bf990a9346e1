// Concord: word-frequency profiling and similarity analysis for text corpora
//
// This is the library root. Each module corresponds to a stage of the
// batch analysis pipeline or to one of its external seams.

pub mod analysis;
pub mod config;
pub mod corpus;
pub mod output;
pub mod pipeline;

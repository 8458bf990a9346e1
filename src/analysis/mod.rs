// Analysis stages — tokenization, counting, ranking, and pair scoring.

pub mod frequency;
pub mod similarity;
pub mod tokenize;
pub mod top_terms;

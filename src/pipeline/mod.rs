// Pipeline orchestration — the staged batch run.

pub mod analyze;

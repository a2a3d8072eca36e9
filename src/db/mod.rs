pub mod job_queries;
pub mod sql;

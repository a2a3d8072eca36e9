mod job;

pub use job::{CreateJob, Job, JobFilter, UpdateJob};

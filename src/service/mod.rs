pub mod constituents;
pub mod finance;
pub mod pipeline;
pub mod report;

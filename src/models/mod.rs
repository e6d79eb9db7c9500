pub mod constituent;
pub mod earnings;
pub mod report;

pub use constituent::Constituent;
pub use earnings::EarningsSurprise;
pub use report::ReportEntry;

//! Context aggregation, report generation and the orchestrator tying them together

pub mod context;
pub mod report;
pub mod researcher;

pub use context::{ContextAggregator, FILING_QUERY, ResearchContext};
pub use report::ReportGenerator;
pub use researcher::{Analysis, StockResearcher};
